use actix_web::{web, App, HttpServer};
use answer_pool_api::config::ApiConfig;
use answer_pool_api::handlers::{self, AllocationState};
use answer_pool_api::helpers::cors::build_cors;
use answer_pool_api::helpers::database::initialize_database;
use answer_pool_api::helpers::logging::init_tracing;
use answer_pool_api::helpers::sheets::{check_sheets, ensure_sheets, initialize_sheets, SAMPLE_ANSWERS};
use answer_pool_api::storage::{SheetStore, SqliteSheetStore};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "answer-pool-api")]
#[command(about = "Serve a first-come-first-served pool of answers")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the HTTP server (default)
    Serve,

    /// Reset both sheets to their headers and optionally fill Answers
    Seed {
        /// Fill Answers with the built-in sample fruits
        #[arg(long)]
        sample: bool,

        /// Answer text to add, ids are assigned in order starting at 1
        #[arg(long = "answer")]
        answers: Vec<String>,
    },

    /// Report which sheets exist and list the available answers
    Check,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (config, config_path) = match &cli.config {
        Some(path) => ApiConfig::load_from(path)?,
        None => ApiConfig::load()?,
    };

    let log_dir = config
        .logging
        .as_ref()
        .and_then(|logging| logging.directory.clone());
    let _guard = init_tracing(log_dir.as_deref());

    info!(config = %config_path.display(), "Loaded configuration");

    let connection = initialize_database(&config.database.path)?;
    let store: Arc<dyn SheetStore> = Arc::new(SqliteSheetStore::new(connection));
    let layout = config.sheets.layout();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            if config.sheets.create_missing {
                ensure_sheets(store.as_ref(), &layout).await?;
            }
            check_sheets(store.as_ref(), &layout).await?;

            let state = web::Data::new(AllocationState::new(store, layout));
            let cors = config.cors.clone();
            let bind_addr = config.server.bind_addr();
            info!("Starting answer-pool-api server at http://{}", bind_addr);

            HttpServer::new(move || {
                App::new()
                    .wrap(build_cors(cors.as_ref()))
                    .app_data(state.clone())
                    .configure(handlers::configure)
            })
            .bind(bind_addr)?
            .run()
            .await?;
        }
        Commands::Seed { sample, answers } => {
            let mut texts: Vec<&str> = if sample {
                SAMPLE_ANSWERS.to_vec()
            } else {
                Vec::new()
            };
            texts.extend(answers.iter().map(String::as_str));

            initialize_sheets(store.as_ref(), &layout, &texts).await?;
            println!("Seeded {} answer(s) into '{}'", texts.len(), layout.answers);
        }
        Commands::Check => {
            let report = check_sheets(store.as_ref(), &layout).await?;
            let found = |present: bool| if present { "yes" } else { "no" };

            println!("Database: {}", config.database.path.display());
            println!(
                "'{}' sheet found: {}",
                layout.answers,
                found(report.answers_sheet_found)
            );
            println!(
                "'{}' sheet found: {}",
                layout.responses,
                found(report.responses_sheet_found)
            );
            for answer in &report.available {
                println!("  {:>4}  {}", answer.id, answer.text);
            }

            if !report.is_healthy() {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
