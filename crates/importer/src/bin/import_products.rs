use clap::{Parser, Subcommand};
use importer::{
    ApiProductClient, CsvProductImporter, DatabaseProductSink, ImportPolicy, ImportResult,
    ProductSink, StaticToken, csv_import::DEFAULT_MAX_BYTES, read_csv_file, validate_csv,
};
use sqlx::postgres::PgPoolOptions;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "import-products")]
#[command(about = "Bulk CSV product importer for the nursery catalog", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Largest file accepted, in bytes
    #[arg(long, env = "IMPORT_MAX_BYTES", default_value_t = DEFAULT_MAX_BYTES, global = true)]
    max_bytes: u64,

    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and validate a file without persisting anything
    Validate { file: PathBuf },
    /// Send every accepted row to the catalog HTTP API
    Api {
        file: PathBuf,

        #[arg(long, env = "API_URL")]
        api_url: String,

        #[arg(long, env = "API_TOKEN")]
        api_token: Option<String>,

        /// Per-request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,

        #[command(flatten)]
        options: ImportOptions,
    },
    /// Write every accepted row directly into the catalog database
    Database {
        file: PathBuf,

        #[arg(long, env = "DATABASE_URL")]
        database_url: String,

        #[command(flatten)]
        options: ImportOptions,
    },
}

#[derive(clap::Args)]
struct ImportOptions {
    #[arg(long, env = "IMPORT_POLICY", default_value_t = ImportPolicy::AbortOnAnyError)]
    policy: ImportPolicy,

    /// Directory where a JSON report of the import is written
    #[arg(long)]
    report: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("import_products={},importer={}", log_level, log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let succeeded = match cli.command {
        Commands::Validate { file } => handle_validate(&file, cli.max_bytes).await?,
        Commands::Api {
            file,
            api_url,
            api_token,
            timeout,
            options,
        } => {
            let mut client = ApiProductClient::new(api_url, timeout.map(Duration::from_secs))?;
            if let Some(token) = api_token {
                client = client.with_token_provider(StaticToken::new(token));
            }
            handle_import(client, &file, cli.max_bytes, options).await?
        }
        Commands::Database {
            file,
            database_url,
            options,
        } => {
            tracing::info!("Connecting to database...");
            let pool = PgPoolOptions::new()
                .max_connections(1)
                .connect(&database_url)
                .await?;
            handle_import(DatabaseProductSink::new(pool), &file, cli.max_bytes, options).await?
        }
    };

    if !succeeded {
        return Err("import did not complete cleanly".into());
    }

    Ok(())
}

async fn handle_validate(file: &Path, max_bytes: u64) -> Result<bool, Box<dyn std::error::Error>> {
    tracing::info!("Validating CSV file: {}", file.display());

    let content = read_csv_file(file, max_bytes).await?;
    let batch = validate_csv(&content);

    if let Some(rejection) = &batch.rejection {
        tracing::error!("✗ {}", rejection);
        return Ok(false);
    }

    for row_error in &batch.errors {
        tracing::error!("  {}", row_error);
    }
    tracing::info!(
        "Summary: {} valid, {} invalid",
        batch.accepted.len(),
        batch.errors.len()
    );

    Ok(batch.is_clean())
}

async fn handle_import<S: ProductSink>(
    sink: S,
    file: &Path,
    max_bytes: u64,
    options: ImportOptions,
) -> Result<bool, Box<dyn std::error::Error>> {
    tracing::info!(
        "Importing {} via {} (policy: {})",
        file.display(),
        sink.name(),
        options.policy
    );

    let content = read_csv_file(file, max_bytes).await?;
    let importer = CsvProductImporter::new(sink).with_policy(options.policy);
    let result = importer.import(&content).await?;

    print_result(&result);

    if let Some(dir) = &options.report {
        write_report(dir, &result).await?;
    }

    Ok(result.is_success())
}

fn print_result(result: &ImportResult) {
    if let Some(rejection) = &result.rejection {
        tracing::error!("✗ {}", rejection);
        return;
    }

    for row_error in &result.errors {
        tracing::error!("  {}", row_error);
    }

    if result.errors.is_empty() {
        tracing::info!("✓ Imported {} product(s)", result.imported);
    } else {
        tracing::warn!(
            "Summary: {} imported, {} row(s) with errors",
            result.imported,
            result.errors.len()
        );
    }
}

async fn write_report(dir: &Path, result: &ImportResult) -> Result<(), Box<dyn std::error::Error>> {
    tokio::fs::create_dir_all(dir).await?;

    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H-%M-%S");
    let filepath = dir.join(format!("{}_import_report.json", timestamp));

    let json = serde_json::to_string_pretty(result)?;
    tokio::fs::write(&filepath, json).await?;

    tracing::info!("Report written to: {}", filepath.display());
    Ok(())
}
