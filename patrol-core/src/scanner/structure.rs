//! Structural text walks — brace nesting depth and function spans.
//!
//! A deliberately small state machine (in-string / not-in-string) rather
//! than a tokenizer: adequate for approximate nesting detection, not
//! correctness-critical. Braces inside comments are still counted.

use regex::Regex;

/// Result of a nesting-depth walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NestingScan {
    /// Deepest brace nesting observed.
    pub max_depth: usize,
    /// Byte offset of the `{` that reached the maximum.
    pub max_depth_offset: usize,
}

/// Walk the text left to right, tracking brace depth outside string
/// literals. Quote characters toggle an in-string flag unless preceded by
/// an escaping backslash.
pub fn max_nesting_depth(text: &str) -> NestingScan {
    let mut depth = 0usize;
    let mut max_depth = 0usize;
    let mut max_depth_offset = 0usize;
    let mut in_string: Option<char> = None;
    let mut escaped = false;

    for (offset, ch) in text.char_indices() {
        if let Some(quote) = in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == quote {
                in_string = None;
            }
            continue;
        }
        match ch {
            '\'' | '"' => in_string = Some(ch),
            '{' => {
                depth += 1;
                if depth > max_depth {
                    max_depth = depth;
                    max_depth_offset = offset;
                }
            }
            '}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }

    NestingScan {
        max_depth,
        max_depth_offset,
    }
}

/// A function-like block located in the text.
#[derive(Debug, Clone, Copy)]
pub struct FunctionSpan {
    /// Byte offset of the header match.
    pub header_offset: usize,
    /// Byte length of the header match.
    pub header_len: usize,
    /// Number of lines between the opening and closing brace, inclusive.
    pub line_count: usize,
}

/// Locate function bodies by header pattern and measure their length.
/// Headers whose next significant character is `;` (declarations) and
/// unbalanced bodies are skipped.
pub fn function_spans(text: &str, header: &Regex) -> Vec<FunctionSpan> {
    let mut spans = Vec::new();
    for m in header.find_iter(text) {
        let Some(open) = find_block_open(text, m.end()) else {
            continue;
        };
        let Some(close) = find_block_close(text, open) else {
            continue;
        };
        let line_count = text[open..=close].matches('\n').count() + 1;
        spans.push(FunctionSpan {
            header_offset: m.start(),
            header_len: m.len(),
            line_count,
        });
    }
    spans
}

/// Find the opening `{` after `from`, honoring string literals. Returns
/// `None` when a `;` terminates the header first.
fn find_block_open(text: &str, from: usize) -> Option<usize> {
    let mut in_string: Option<char> = None;
    let mut escaped = false;
    for (offset, ch) in text[from..].char_indices() {
        if let Some(quote) = in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == quote {
                in_string = None;
            }
            continue;
        }
        match ch {
            '\'' | '"' => in_string = Some(ch),
            '{' => return Some(from + offset),
            ';' => return None,
            _ => {}
        }
    }
    None
}

/// Find the `}` matching the `{` at `open`, honoring string literals.
fn find_block_close(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string: Option<char> = None;
    let mut escaped = false;
    for (offset, ch) in text[open..].char_indices() {
        if let Some(quote) = in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == quote {
                in_string = None;
            }
            continue;
        }
        match ch {
            '\'' | '"' => in_string = Some(ch),
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + offset);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_nesting() {
        assert_eq!(max_nesting_depth("a{b{c}d}e").max_depth, 2);
    }

    #[test]
    fn test_brace_inside_string_not_counted() {
        // The } inside the quoted segment must not close the block.
        assert_eq!(max_nesting_depth("{'}'}").max_depth, 1);
        assert_eq!(max_nesting_depth(r#"{"}"}"#).max_depth, 1);
    }

    #[test]
    fn test_escaped_quote_stays_in_string() {
        // "\"{" — the escaped quote does not end the literal.
        assert_eq!(max_nesting_depth(r#""\"{" "#).max_depth, 0);
    }

    #[test]
    fn test_max_depth_offset_points_at_deepest_brace() {
        let scan = max_nesting_depth("a{b{c}d}e");
        assert_eq!(scan.max_depth_offset, 3);
    }

    #[test]
    fn test_unbalanced_closing_braces_saturate() {
        assert_eq!(max_nesting_depth("}}}{").max_depth, 1);
    }

    #[test]
    fn test_function_spans() {
        let header = Regex::new(r"(?m)^function\s+\w+\s*\(").unwrap();
        let text = "function one() {\n  a();\n  b();\n}\nfunction two();\n";
        let spans = function_spans(text, &header);
        assert_eq!(spans.len(), 1, "declaration without body is skipped");
        assert_eq!(spans[0].line_count, 4);
    }

    #[test]
    fn test_function_span_ignores_brace_in_string() {
        let header = Regex::new(r"(?m)^function\s+\w+\s*\(").unwrap();
        let text = "function f() {\n  const s = '}';\n  g();\n}\n";
        let spans = function_spans(text, &header);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].line_count, 4);
    }
}
