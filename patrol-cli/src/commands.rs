//! Subcommand implementations.

use anyhow::Context;
use patrol_core::report::{self, Aggregate, ReportFamily};
use patrol_core::{
    Language, ProgressSink, RuleCheck, RuleFamily, ScanConfig, ScanEngine, ScanRequest,
    ScanResult, Severity,
};
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;

/// Arguments for `patrol scan`.
#[derive(clap::Args, Debug)]
pub struct ScanArgs {
    /// File or directory to scan
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Minimum severity to report (low, medium, high, critical)
    #[arg(long)]
    pub min_severity: Option<String>,

    /// Rule families to evaluate (security, best-practices, memory)
    #[arg(long, value_delimiter = ',')]
    pub family: Vec<String>,

    /// Report title
    #[arg(long, default_value = "Patrol Scan Report")]
    pub title: String,

    /// Exit non-zero when issues at or above this severity are found
    #[arg(long)]
    pub fail_on: Option<String>,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum OutputFormat {
    Text,
    Markdown,
    Json,
}

/// Progress sink that narrates the batch through tracing.
struct LogProgress;

impl ProgressSink for LogProgress {
    fn file_started(&self, path: &Path, index: usize, total: usize) {
        tracing::debug!(file = %path.display(), "scanning ({}/{total})", index + 1);
    }

    fn cancelled(&self, scanned: usize, total: usize) {
        tracing::info!(scanned, total, "scan interrupted, partial results follow");
    }
}

pub async fn scan(args: ScanArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => patrol_core::config::load_config(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ScanConfig::default(),
    };
    if let Some(severity) = &args.min_severity {
        config.severity_threshold = severity
            .parse::<Severity>()
            .map_err(|e| anyhow::anyhow!(e))?;
    }
    if !args.family.is_empty() {
        config.families = args
            .family
            .iter()
            .map(|f| f.parse::<RuleFamily>().map_err(|e| anyhow::anyhow!(e)))
            .collect::<anyhow::Result<Vec<_>>>()?;
    }

    let families = config.families.clone();
    let engine = ScanEngine::new(config)?;

    let result = if args.path.is_file() {
        scan_single_file(&engine, &args.path)?
    } else {
        // Ctrl-C cancels between files; partial results are still reported.
        let token = CancellationToken::new();
        let signal_token = token.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                signal_token.cancel();
            }
        });
        engine
            .scan_workspace(&args.path, &token, &LogProgress)
            .await?
    };

    let rendered = render(&result, &args, &families)?;
    match &args.output {
        Some(path) => {
            report::write_report(path, &rendered)?;
            tracing::info!(report = %path.display(), "report written");
        }
        None => print!("{rendered}"),
    }

    engine.shutdown();

    if let Some(threshold) = &args.fail_on {
        let threshold = threshold.parse::<Severity>().map_err(|e| anyhow::anyhow!(e))?;
        let failing = result
            .issues
            .iter()
            .filter(|i| i.severity >= threshold)
            .count();
        if failing > 0 {
            anyhow::bail!("{failing} issue(s) at or above {threshold} severity");
        }
    }
    Ok(())
}

fn scan_single_file(engine: &ScanEngine, path: &Path) -> anyhow::Result<ScanResult> {
    let source_text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let request = ScanRequest {
        language_id: Language::from_path(path).as_str().to_string(),
        source_text,
        file_path: path.to_path_buf(),
    };
    Ok(engine.scan_source(&request))
}

fn render(result: &ScanResult, args: &ScanArgs, families: &[RuleFamily]) -> anyhow::Result<String> {
    Ok(match args.format {
        OutputFormat::Text => report::text::render(result),
        OutputFormat::Markdown => {
            // A single-family scan gets that family's advice section;
            // mixed scans fall back to the general one.
            let family = match families {
                [only] => ReportFamily::from(*only),
                _ => ReportFamily::General,
            };
            let aggregate = Aggregate::from_issues(&result.issues);
            report::markdown::render(&aggregate, &args.title, family)
        }
        OutputFormat::Json => report::json::render(result)?,
    })
}

pub fn rules(language: Option<String>) -> anyhow::Result<()> {
    let catalog = patrol_core::RuleCatalog::builtin();
    let language = language.map(|id| Language::from_id(&id));

    for rule in catalog.rules() {
        if let Some(language) = language
            && !rule.applies_to(language)
        {
            continue;
        }
        let languages = if rule.languages.is_empty() {
            "all".to_string()
        } else {
            rule.languages
                .iter()
                .map(|l| l.as_str())
                .collect::<Vec<_>>()
                .join(",")
        };
        let kind = match &rule.check {
            RuleCheck::Pattern(_) => "pattern",
            RuleCheck::MissingCounterpart { .. } => "counterpart",
            RuleCheck::MaxNestingDepth(_) => "nesting",
            RuleCheck::MaxFunctionLines(_) => "length",
        };
        println!(
            "{:<14} {:<8} {:<11} {:<24} {}",
            rule.id, rule.severity, kind, languages, rule.title
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_args(format: OutputFormat) -> ScanArgs {
        ScanArgs {
            path: ".".into(),
            format,
            output: None,
            config: None,
            min_severity: None,
            family: Vec::new(),
            title: "Patrol Scan Report".into(),
            fail_on: None,
        }
    }

    fn sample_result() -> ScanResult {
        let engine = ScanEngine::new(ScanConfig::default()).unwrap();
        engine.scan_source(&ScanRequest {
            source_text: "eval(userInput);\n".into(),
            language_id: "javascript".into(),
            file_path: "app.js".into(),
        })
    }

    #[test]
    fn test_render_markdown_uses_single_family_section() {
        let result = sample_result();
        let md = render(
            &result,
            &scan_args(OutputFormat::Markdown),
            &[RuleFamily::Security],
        )
        .unwrap();
        assert!(md.contains("# Patrol Scan Report"));
        assert!(md.contains("## General Security Recommendations"));
    }

    #[test]
    fn test_render_text_positions_are_one_based() {
        let result = sample_result();
        let text = render(&result, &scan_args(OutputFormat::Text), &[]).unwrap();
        assert!(text.contains("app.js:1:1"));
    }
}
