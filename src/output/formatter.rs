//! Output formatters: console, JSON and Markdown renderings of a ranking report

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::RankingReport;
use colored::{Color, Colorize};
use std::path::Path;

pub trait OutputFormatter {
    fn format_report(&self, report: &RankingReport) -> Result<String>;
}

/// Colored terminal output
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// The `[{"resume", "score", "feedback"}, ...]` array
pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, score_percent: f64) -> String {
        let (badge, color) = if score_percent >= 80.0 {
            ("STRONG", Color::Green)
        } else if score_percent >= 60.0 {
            ("SOLID", Color::BrightGreen)
        } else if score_percent >= 40.0 {
            ("PARTIAL", Color::Yellow)
        } else {
            ("WEAK", Color::BrightRed)
        };

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &RankingReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("RESUME RANKING", 1));
        output.push_str(&format!(
            "Generated: {} | Model: {} | Processing time: {}ms\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.embedding_model,
            report.metadata.processing_time_ms
        ));
        output.push_str(&format!(
            "Ranked {} of {} submitted resumes\n",
            report.results.len(),
            report.metadata.documents_submitted
        ));

        output.push_str(&self.format_header("Ranking", 2));
        for (rank, result) in report.results.iter().enumerate() {
            output.push_str(&format!(
                "{:>2}. {} {:>6.2}% {}\n",
                rank + 1,
                self.colorize(&result.document_id, Color::Cyan),
                result.score_percent,
                self.format_score_badge(result.score_percent)
            ));
            if self.detailed {
                output.push_str(&format!(
                    "    Keyword match: {:.1}% | Raw similarity: {:.4}\n",
                    result.match_percentage, result.similarity
                ));
            }
            output.push_str(&format!("    {}\n\n", result.feedback));
        }

        if !report.skipped.is_empty() {
            output.push_str(&self.format_header("Skipped", 3));
            for skipped in &report.skipped {
                output.push_str(&format!(
                    "  • {} ({})\n",
                    self.colorize(&skipped.filename, Color::Red),
                    skipped.reason
                ));
            }
        }

        Ok(output)
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &RankingReport) -> Result<String> {
        let entries = report.entries();
        if self.pretty {
            Ok(serde_json::to_string_pretty(&entries)?)
        } else {
            Ok(serde_json::to_string(&entries)?)
        }
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &RankingReport) -> Result<String> {
        let mut output = String::from("# Resume Ranking\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "*Generated {} with `{}` in {}ms*\n\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.embedding_model,
                report.metadata.processing_time_ms
            ));
        }

        output.push_str("| Rank | Resume | Score |\n|---:|---|---:|\n");
        for (rank, result) in report.results.iter().enumerate() {
            output.push_str(&format!(
                "| {} | {} | {:.2}% |\n",
                rank + 1,
                escape_table_cell(&result.document_id),
                result.score_percent
            ));
        }

        output.push_str("\n## Feedback\n");
        for result in &report.results {
            output.push_str(&format!("\n### {}\n\n{}\n", result.document_id, result.feedback));
        }

        if !report.skipped.is_empty() {
            output.push_str("\n## Skipped\n\n");
            for skipped in &report.skipped {
                output.push_str(&format!("- {}: {}\n", skipped.filename, skipped.reason));
            }
        }

        Ok(output)
    }
}

fn escape_table_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, true, true)
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
        }
    }

    pub fn generate_report(&self, report: &RankingReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: &OutputFormat, timestamp: bool) -> String {
    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console => format!("ranking{}.txt", timestamp_suffix),
        OutputFormat::Json => format!("ranking{}.json", timestamp_suffix),
        OutputFormat::Markdown => format!("ranking{}.md", timestamp_suffix),
    }
}
