use clap::Parser;
use insightx_api::RestApi;
use insightx_profile::ProfilerConfig;
use insightx_retrieval::RetrievalConfig;
use insightx_storage::StorageManager;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Dataset profiler and context router for retrieval-augmented chat
#[derive(Parser, Debug)]
#[command(name = "insightx")]
#[command(about = "Profile tabular uploads and route questions to grounded or general answers", long_about = None)]
struct Args {
    /// Path to the data directory
    #[arg(short, long, default_value = "./data")]
    data_dir: PathBuf,

    /// HTTP API port
    #[arg(long, default_value_t = 6333)]
    http_port: u16,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Minimum top similarity for a grounded answer
    #[arg(long, default_value_t = insightx_retrieval::config::DEFAULT_THRESHOLD)]
    threshold: f32,

    /// Fragments kept per query
    #[arg(long, default_value_t = insightx_retrieval::config::DEFAULT_TOP_K)]
    top_k: usize,

    /// Fragments scanned per query
    #[arg(long, default_value_t = insightx_retrieval::config::DEFAULT_WORKING_SET_CAP)]
    working_set_cap: usize,

    /// Non-missing values sampled per column for type inference
    #[arg(long, default_value_t = insightx_profile::config::DEFAULT_SAMPLE_CAP)]
    sample_cap: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting InsightX v{}", env!("CARGO_PKG_VERSION"));
    info!("Data directory: {:?}", args.data_dir);
    info!("HTTP API port: {}", args.http_port);

    let profiler_config = ProfilerConfig::default().with_sample_cap(args.sample_cap);
    let retrieval_config = RetrievalConfig::default()
        .with_threshold(args.threshold)
        .with_top_k(args.top_k)
        .with_working_set_cap(args.working_set_cap);
    info!(
        "Routing threshold {:.2}, top-k {}, working set {}",
        retrieval_config.threshold, retrieval_config.top_k, retrieval_config.working_set_cap
    );

    let storage = Arc::new(StorageManager::with_config(
        &args.data_dir,
        profiler_config,
        retrieval_config,
    )?);
    info!("Storage initialized");

    let storage_http = storage.clone();
    let http_port = args.http_port;
    let http_handle = std::thread::spawn(move || {
        info!("Starting HTTP server on port {}", http_port);
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = RestApi::start(storage_http, http_port).await {
                tracing::error!("HTTP server error: {}", e);
            }
        })
    });

    info!("InsightX started successfully");
    info!("HTTP API: http://localhost:{}/", args.http_port);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        _ = tokio::task::spawn_blocking(move || {
            http_handle.join().ok();
        }) => {
            info!("HTTP server stopped");
        }
    }

    info!("Shutting down...");
    Ok(())
}
