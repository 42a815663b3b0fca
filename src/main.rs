use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::EnvFilter;

use axum_server::tls_rustls::RustlsConfig;
use clap::{Parser, Subcommand};
use http::{Method, header::CONTENT_TYPE};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

use anyhow::anyhow;

use learnsphere::{ServerConfig, maintenance, routes, state::AppState};

/// LearnSphere - ML learning material generator
#[derive(Parser, Debug)]
#[command(name = "learnsphere")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to configuration file (YAML)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Delete generated audio files older than a threshold
    PruneAudio {
        /// Minimum age, in hours, of files to delete
        #[arg(long = "older-than-hours", default_value_t = 24 * 7)]
        older_than_hours: u64,

        /// Report what would be deleted without deleting anything
        #[arg(long)]
        dry_run: bool,

        /// Audio directory (defaults to `<static_dir>/audio` from the configuration)
        #[arg(long = "audio-dir", value_name = "DIR")]
        audio_dir: Option<PathBuf>,
    },
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<ServerConfig> {
    match path {
        Some(config_path) => {
            info!("Loading configuration from {}", config_path.display());
            ServerConfig::from_file(config_path).map_err(|e| anyhow!(e.to_string()))
        }
        None => ServerConfig::from_env().map_err(|e| anyhow!(e.to_string())),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists (must be done before config loading)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Must be installed before any TLS connection is attempted
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow!("Failed to install default crypto provider"))?;

    let cli = Cli::parse();

    if let Some(command) = cli.command {
        match command {
            Commands::PruneAudio {
                older_than_hours,
                dry_run,
                audio_dir,
            } => {
                let audio_dir = match audio_dir {
                    Some(dir) => dir,
                    None => load_config(cli.config.as_ref())?.audio_dir(),
                };
                let older_than = Duration::from_secs(older_than_hours.saturating_mul(3600));
                let report = maintenance::prune_audio(&audio_dir, older_than, dry_run).await?;

                let verb = if dry_run { "Would remove" } else { "Removed" };
                for path in &report.removed {
                    println!("{verb} {}", path.display());
                }
                println!(
                    "{verb} {} of {} audio files ({} bytes)",
                    report.removed.len(),
                    report.scanned,
                    report.bytes_freed
                );
                return Ok(());
            }
        }
    }

    let config = load_config(cli.config.as_ref())?;

    let address = config.address();
    let tls_config = config.tls.clone();
    let cors_origins = config.cors_allowed_origins.clone();
    info!(
        model = %config.openrouter_model,
        tts_provider = %config.tts_provider,
        static_dir = %config.static_dir.display(),
        "Starting LearnSphere on {address}"
    );

    let app_state = AppState::new(config)
        .await
        .map_err(|e| anyhow!("Failed to initialise application state: {e}"))?;

    let cors_layer = match cors_origins.as_deref() {
        Some("*") => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([CONTENT_TYPE])
            .allow_credentials(false),
        Some(origins) => {
            let origins: Vec<_> = origins
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([CONTENT_TYPE])
        }
        None => {
            // The bundled UI is same-origin, so no CORS headers are needed
            info!(
                "CORS not configured, defaulting to same-origin only. \
                 Set CORS_ALLOWED_ORIGINS to enable cross-origin access."
            );
            CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([CONTENT_TYPE])
        }
    };

    // Security headers
    let security_headers = tower::ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::overriding(
            http::header::X_CONTENT_TYPE_OPTIONS,
            http::HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            http::header::X_FRAME_OPTIONS,
            http::HeaderValue::from_static("DENY"),
        ));

    let app = routes::create_app_router(app_state.clone()).layer(cors_layer);
    let app = routes::apply_rate_limit(app, &app_state.config).layer(security_headers);

    let socket_addr: SocketAddr = address
        .parse()
        .map_err(|e| anyhow!("Invalid server address '{}': {}", address, e))?;

    if let Some(tls) = tls_config {
        let rustls_config = RustlsConfig::from_pem_file(&tls.cert_path, &tls.key_path)
            .await
            .map_err(|e| {
                anyhow!(
                    "Failed to load TLS certificates from {} and {}: {}",
                    tls.cert_path.display(),
                    tls.key_path.display(),
                    e
                )
            })?;

        info!("Server listening on https://{} (TLS enabled)", socket_addr);

        axum_server::bind_rustls(socket_addr, rustls_config)
            .serve(app.into_make_service_with_connect_info::<SocketAddr>())
            .await
            .map_err(|e| anyhow!("TLS server error: {}", e))?;
    } else {
        info!("Server listening on http://{}", socket_addr);

        let listener = TcpListener::bind(&socket_addr).await?;
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await?;
    }

    Ok(())
}
