/// Airwave Server - shared now-playing coordinator
use airwave_playback::Catalog;
use airwave_server::{api, config::ServerConfig, AccessPolicy, AppState, Station};
use clap::{Parser, Subcommand};
use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
    sync::Arc,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "airwave-server")]
#[command(about = "Airwave shared now-playing coordinator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP/WebSocket server
    Serve {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Listening port (overrides the configuration file)
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,
    },
    /// Check a songs file and list its entries
    Catalog {
        /// Songs file path
        #[arg(short, long, default_value = "songs.json")]
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "airwave_server=info,airwave_playback=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config, port } => {
            serve(config.as_deref(), port).await?;
        }
        Commands::Catalog { path } => {
            list_catalog(&path)?;
        }
    }

    Ok(())
}

async fn serve(config_path: Option<&Path>, port: Option<u16>) -> anyhow::Result<()> {
    // Load configuration
    let mut config = ServerConfig::load(config_path)?;
    if let Some(port) = port {
        config.server.port = port;
    }
    config.validate()?;

    tracing::info!("Starting Airwave Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    let access = AccessPolicy::new(config.credential());
    if access.is_open() {
        tracing::warn!(
            "No credential configured (AIRWAVE_AUTH_CREDENTIAL): every command is authorized"
        );
    }

    let catalog = Catalog::load_or_empty(&config.catalog.path);
    let station = Arc::new(Station::new(catalog, access));

    if let Some(dir) = &config.web.dir {
        tracing::info!("Serving web UI from {:?}", dir);
    }
    let app = api::router(AppState::new(station), config.web.dir.clone());

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let term = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let term = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = term => {},
    }

    tracing::info!("Shutdown signal received");
}

fn list_catalog(path: &Path) -> anyhow::Result<()> {
    let catalog = Catalog::load(path)?;

    println!("Catalog {:?} ({} entries):", path, catalog.len());
    for (name, entry) in catalog.sorted_entries() {
        let title = entry.title.as_deref().unwrap_or("(untitled)");
        println!("  {} - {} <{}>", name, title, entry.location);
    }

    Ok(())
}
