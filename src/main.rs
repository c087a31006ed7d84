use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::bail;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use habitual::config::ServerConfig;
use habitual::server::{AppState, create_router, spawn_cleanup_task};
use habitual::store::{SqliteStore, Store};

const CLEANUP_INTERVAL: Duration = Duration::from_secs(10 * 60);

#[derive(Parser)]
#[command(name = "habitual")]
#[command(about = "A self-hostable habit tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database and seed the habit templates
    Init {
        /// Data directory for the database
        #[arg(long, default_value = "./data")]
        data_dir: PathBuf,
    },

    /// Start the server
    Serve {
        /// TOML config file; flags below override its values
        #[arg(long, short)]
        config: Option<PathBuf>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(long, short)]
        port: Option<u16>,

        /// Data directory for the database
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
}

fn run_init(data_dir: PathBuf) -> anyhow::Result<()> {
    fs::create_dir_all(&data_dir)?;

    let config = ServerConfig {
        data_dir,
        ..Default::default()
    };
    let db_path = config.db_path();
    let existed = db_path.exists();

    let store = SqliteStore::new(&db_path)?;
    store.initialize()?;

    if existed {
        println!("Database already initialized at {}", db_path.display());
    } else {
        println!("Initialized database at {}", db_path.display());
    }

    Ok(())
}

fn load_config(
    path: Option<PathBuf>,
    host: Option<String>,
    port: Option<u16>,
    data_dir: Option<PathBuf>,
) -> anyhow::Result<ServerConfig> {
    let mut config = match path {
        Some(path) => ServerConfig::from_file(&path)?,
        None => ServerConfig::default(),
    };

    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(data_dir) = data_dir {
        config.data_dir = data_dir;
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("habitual=info".parse()?))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { data_dir } => run_init(data_dir)?,
        Commands::Serve {
            config,
            host,
            port,
            data_dir,
        } => {
            let config = load_config(config, host, port, data_dir)?;

            let db_path = config.db_path();
            if !db_path.exists() {
                bail!(
                    "Database not found at {}. Run 'habitual init' first.",
                    db_path.display()
                );
            }

            let store = SqliteStore::new(&db_path)?;
            store.initialize()?;

            if config.expose_otp {
                tracing::warn!("Sign-in codes are echoed in responses (expose_otp = true)");
            }

            let addr = config.socket_addr()?;
            let state = Arc::new(AppState::new(Arc::new(store), config));
            spawn_cleanup_task(state.clone(), CLEANUP_INTERVAL);

            let app = create_router(state);

            info!("Starting server on {}", addr);

            let listener = tokio::net::TcpListener::bind(addr).await?;
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
