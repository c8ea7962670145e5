//! Resume ranker: rank resumes against a job description

use clap::Parser;
use log::{error, info};
use resume_ranker::cli::{self, Cli, Commands, ConfigAction, ModelAction, RankArgs};
use resume_ranker::input::InputManager;
use resume_ranker::output::formatter::{save_report_to_file, ReportGenerator};
use resume_ranker::output::RankingReport;
use resume_ranker::processing::embedding_manager::EmbeddingModelManager;
use resume_ranker::{Config, Model2VecProvider, RankRequest, Ranker, RankerError, Result};
use std::path::Path;
use std::process;
use std::sync::Arc;
use std::time::Instant;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let loaded = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Rank(args) => run_rank(args, &config).await?,

        Commands::Models { action } => {
            let mut model_manager = EmbeddingModelManager::new(&config).await?;

            match action {
                ModelAction::List => {
                    println!("📚 Available Embedding Models\n");
                    for model in model_manager.list_available_models() {
                        let status = if model_manager.is_model_downloaded(&model.name) {
                            "✅ Downloaded"
                        } else {
                            "⬇️  Available"
                        };
                        let default_marker = if model.name == config.models.default_embedding_model {
                            " (default)"
                        } else {
                            ""
                        };
                        println!(
                            "  • {}{} ({}) - {} MB, {} dims [{}]",
                            model.name, default_marker, model.repo_id, model.size_mb, model.dimensions, status
                        );
                        println!("    {}", model.description);
                    }

                    let downloaded = model_manager.list_downloaded_models();
                    if downloaded.is_empty() {
                        println!("\n💡 No models downloaded yet. The default model is fetched on first use.");
                    } else {
                        println!("\n📦 Downloaded: {}", downloaded.join(", "));
                    }
                }

                ModelAction::Download { model, force } => {
                    let model_id = model_manager
                        .resolve_model_id(&model)
                        .ok_or_else(|| RankerError::ModelNotFound(model.clone()))?;

                    if !force && model_manager.is_model_downloaded(&model_id) {
                        println!("✅ Model '{}' is already downloaded!", model_id);
                        println!("💡 Use --force to re-download");
                        return Ok(());
                    }

                    let model_path = model_manager.download_model(&model_id, force).await?;
                    println!("✅ Model '{}' downloaded successfully!", model_id);
                    println!("📁 Location: {}", model_path.display());
                }

                ModelAction::Info { model } => {
                    let model_id = model_manager
                        .resolve_model_id(&model)
                        .ok_or_else(|| RankerError::ModelNotFound(model.clone()))?;
                    let model_info = model_manager
                        .get_model_info(&model_id)
                        .ok_or_else(|| RankerError::ModelNotFound(model.clone()))?;

                    println!("📋 Model Information for '{}'\n", model_id);
                    println!("Repository: {}", model_info.repo_id);
                    println!("Size: {} MB", model_info.size_mb);
                    println!("Dimensions: {}", model_info.dimensions);
                    println!("Description: {}", model_info.description);

                    match model_manager.get_model_path(&model_id) {
                        Some(path) => println!("Status: ✅ Downloaded ({})", path.display()),
                        None => {
                            println!("Status: ⬇️  Available for download");
                            println!("\n💡 To download this model, run:");
                            println!("   resume-ranker models download {}", model_id);
                        }
                    }
                }
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration ({})\n", config_path.display());
                println!("Models Directory: {}", config.models_dir().display());
                println!("Default Embedding Model: {}", config.models.default_embedding_model);
                if let Some(model) = config.get_model_by_name(&config.models.default_embedding_model) {
                    println!("  {} ({} dims, {} MB)", model.repo_id, model.dimensions, model.size_mb);
                }
                println!(
                    "Accepted Resume Types: {}",
                    config.ranking.accepted_extensions.join(", ")
                );
                println!("Output Format: {:?}", config.output.format);
            }

            Some(ConfigAction::Reset) => {
                Config::default().save_to(config_path)?;
                println!("✅ Configuration reset successfully!");
            }
        },
    }

    Ok(())
}

async fn run_rank(args: RankArgs, config: &Config) -> Result<()> {
    let mut input_manager = InputManager::new();

    let job_description = match (&args.job, &args.job_text) {
        (Some(path), _) => input_manager.extract_text(path).await?,
        (None, Some(text)) => text.clone(),
        // an empty description is rejected by request validation below
        (None, None) => String::new(),
    };

    let documents = input_manager.read_documents(&args.resumes).await?;
    let request = RankRequest::new(job_description, documents);

    // Reject bad batches before loading (or downloading) a model
    request.validate(&config.ranking.accepted_extensions)?;

    let output_format = match &args.output {
        Some(format) => cli::parse_output_format(format).map_err(RankerError::InvalidInput)?,
        None => config.output.format,
    };
    let save_path = args.save_path(&output_format);

    let provider = Model2VecProvider::from_config(config, args.embedding.as_deref()).await?;
    let ranker = Ranker::from_config(Arc::new(provider), &config.ranking);

    info!("Ranking {} resumes", request.documents.len());
    let start_time = Instant::now();
    let outcome = ranker.rank_request(&request)?;
    let report = RankingReport::new(
        outcome,
        ranker.model_name(),
        start_time.elapsed().as_millis() as u64,
    );

    let generator = ReportGenerator::with_options(
        config.output.color_output && save_path.is_none(),
        args.detailed || config.output.detailed,
        true,
        true,
    );
    let rendered = generator.generate_report(&report, &output_format)?;

    match &save_path {
        Some(path) => {
            save_report_to_file(&rendered, path)?;
            println!("💾 Report saved to {}", path.display());
        }
        None => println!("{}", rendered),
    }

    Ok(())
}
