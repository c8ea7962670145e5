//! CLI interface for the resume ranker

use crate::config::OutputFormat;
use crate::output::formatter::suggest_filename;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resume-ranker")]
#[command(about = "Rank resumes against a job description")]
#[command(long_about = "Score a batch of resumes against one job description using semantic embeddings, and explain each score with keyword-gap feedback")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank resumes against a job description
    Rank(RankArgs),

    /// Embedding model management commands
    Models {
        #[command(subcommand)]
        action: ModelAction,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Args)]
pub struct RankArgs {
    /// Resume files to rank
    #[arg(required = true)]
    pub resumes: Vec<PathBuf>,

    /// Path to job description file (TXT, MD, PDF)
    #[arg(short, long, conflicts_with = "job_text")]
    pub job: Option<PathBuf>,

    /// Job description given inline
    #[arg(long)]
    pub job_text: Option<String>,

    /// Embedding model to use
    #[arg(short, long)]
    pub embedding: Option<String>,

    /// Output format: console, json, markdown
    #[arg(short, long)]
    pub output: Option<String>,

    /// Show keyword match and raw similarity per resume
    #[arg(short, long)]
    pub detailed: bool,

    /// Save output to file (a timestamped name is chosen when no path is given)
    #[arg(short, long, num_args = 0..=1)]
    pub save: Option<Option<PathBuf>>,
}

impl RankArgs {
    /// Where the rendered report goes, or `None` for stdout
    pub fn save_path(&self, format: &OutputFormat) -> Option<PathBuf> {
        match &self.save {
            Some(Some(path)) => Some(path.clone()),
            Some(None) => Some(PathBuf::from(suggest_filename(format, true))),
            None => None,
        }
    }
}

#[derive(Subcommand)]
pub enum ModelAction {
    /// List available embedding models
    List,

    /// Download an embedding model
    Download {
        /// Model name or HuggingFace repo ID
        model: String,

        /// Force re-download if model exists
        #[arg(short, long)]
        force: bool,
    },

    /// Show model information
    Info {
        /// Model name
        model: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown",
            format
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("JSON"), Ok(OutputFormat::Json));
        assert_eq!(parse_output_format("md"), Ok(OutputFormat::Markdown));
        assert_eq!(parse_output_format("console"), Ok(OutputFormat::Console));
        assert!(parse_output_format("pdf").is_err());
    }

    #[test]
    fn test_rank_command_parses() {
        let cli = Cli::parse_from([
            "resume-ranker",
            "rank",
            "--job-text",
            "rust developer",
            "a.pdf",
            "b.pdf",
            "--output",
            "json",
        ]);

        match cli.command {
            Commands::Rank(args) => {
                assert_eq!(args.resumes.len(), 2);
                assert_eq!(args.job_text.as_deref(), Some("rust developer"));
                assert!(args.job.is_none());
                assert_eq!(args.output.as_deref(), Some("json"));
            }
            _ => panic!("expected rank command"),
        }
    }

    fn rank_args(argv: &[&str]) -> RankArgs {
        match Cli::parse_from(argv).command {
            Commands::Rank(args) => args,
            _ => panic!("expected rank command"),
        }
    }

    #[test]
    fn test_save_path_resolution() {
        let args = rank_args(&["resume-ranker", "rank", "a.pdf", "--job-text", "rust"]);
        assert_eq!(args.save_path(&OutputFormat::Json), None);

        let args = rank_args(&["resume-ranker", "rank", "a.pdf", "--save", "out/report.md"]);
        assert_eq!(
            args.save_path(&OutputFormat::Markdown),
            Some(PathBuf::from("out/report.md"))
        );

        let args = rank_args(&["resume-ranker", "rank", "a.pdf", "--job-text", "rust", "--save"]);
        let suggested = args.save_path(&OutputFormat::Json).unwrap();
        let name = suggested.to_string_lossy();
        assert!(name.starts_with("ranking_"));
        assert!(name.ends_with(".json"));
    }

    #[test]
    fn test_job_and_job_text_conflict() {
        let result = Cli::try_parse_from([
            "resume-ranker",
            "rank",
            "--job",
            "job.txt",
            "--job-text",
            "rust",
            "a.pdf",
        ]);
        assert!(result.is_err());
    }
}
