use std::{net::SocketAddr, path::Path, sync::Arc};

use clap::Parser;
use color_eyre::{
    Result,
    eyre::{Context, eyre},
};
use sinew::{
    ConnectionHandle, adapters::router, config::AppConfigValidator, config::loader::load_config,
    tracing_setup, utils::GracefulShutdown,
};

#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    #[clap(subcommand)]
    command: Option<Commands>,

    #[clap(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Parser, Debug)]
enum Commands {
    /// Validate configuration file
    Validate {
        /// Configuration file to validate
        #[clap(short, long, default_value = "config.toml")]
        config: String,
    },
    /// Initialize a new configuration file
    Init {
        /// Output path for the new config file
        #[clap(short, long, default_value = "config.toml")]
        config: String,
    },
    /// Start the HTTP service (default)
    Serve {
        /// Configuration file to use
        #[clap(short, long, default_value = "config.toml")]
        config: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    let (command, config_path) = match args.command {
        Some(Commands::Validate { config }) => ("validate", config),
        Some(Commands::Init { config }) => ("init", config),
        Some(Commands::Serve { config }) => ("serve", config),
        None => ("serve", args.config), // Default to serve with config from args
    };

    match command {
        "validate" => validate_config_command(&config_path),
        "init" => init_config_command(&config_path).await,
        "serve" => serve(&config_path).await,
        _ => unreachable!(),
    }
}

async fn serve(config_path: &str) -> Result<()> {
    tracing_setup::init_tracing().map_err(|e| eyre!("Failed to initialize tracing: {}", e))?;

    tracing::info!("Loading configuration from {config_path}");
    let config =
        load_config(config_path).with_context(|| format!("Failed to load {config_path}"))?;

    AppConfigValidator::validate(&config).context("Configuration validation failed")?;

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .context("Failed to parse listen address")?;

    let db = Arc::new(ConnectionHandle::new(config.database.clone()));
    db.open()
        .await
        .with_context(|| format!("Failed to open {} database", config.database.driver))?;

    match db.version().await {
        Ok(version) => tracing::info!("Connected to {} ({})", config.database.driver, version),
        Err(e) => tracing::warn!("Connected but version probe failed: {}", e),
    }

    let app = router(db.clone());

    let graceful_shutdown = Arc::new(GracefulShutdown::new());
    let signal_handler_shutdown = graceful_shutdown.clone();
    tokio::spawn(async move {
        if let Err(e) = signal_handler_shutdown.run_signal_handler().await {
            tracing::error!("Signal handler error: {}", e);
        }
    });

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    tracing::info!("Sinew listening on {}", addr);

    let server_result = tokio::select! {
        result = axum::serve(listener, app) => {
            result.context("Server error")
        },
        shutdown_reason = graceful_shutdown.wait_for_shutdown_signal() => {
            tracing::info!("Shutdown signal received: {:?}", shutdown_reason);
            Ok(())
        }
    };

    if let Err(e) = db.close().await {
        tracing::warn!("Error closing database handle: {}", e);
    }

    server_result?;

    tracing_setup::shutdown_tracing();

    Ok(())
}

/// Validate configuration file and exit
fn validate_config_command(config_path: &str) -> Result<()> {
    println!("🔍 Validating configuration file: {config_path}");

    if !Path::new(config_path).exists() {
        eprintln!("❌ Error: Configuration file '{config_path}' not found");
        std::process::exit(1);
    }

    let config = match load_config(config_path) {
        Ok(config) => {
            println!("✅ Configuration parsing: OK");
            config
        }
        Err(e) => {
            eprintln!("❌ Configuration parsing failed:");
            eprintln!("   {e}");
            std::process::exit(1);
        }
    };

    match AppConfigValidator::validate(&config) {
        Ok(()) => {
            println!("✅ Configuration validation: OK");
            println!();
            println!("📋 Configuration Summary:");
            println!("   • Listen Address: {}", config.listen_addr);
            println!("   • Driver: {}", config.database.driver);
            println!(
                "   • Database: {} @ {}:{}",
                config.database.name, config.database.host, config.database.port
            );
            println!(
                "   • Pool: {} max / {} idle",
                config.database.max_connections, config.database.max_idle_connections
            );
            println!();
            println!("🎉 Configuration is valid and ready to use!");
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ Configuration validation failed:");
            eprintln!("{e}");
            println!();
            println!("💡 Common fixes:");
            println!("   • Verify listen address format (e.g., '127.0.0.1:9000')");
            println!("   • Use one of the supported drivers: postgres, mysql, sqlite");
            println!("   • Network drivers need a numeric port and protocol = \"tcp\"");
            std::process::exit(1);
        }
    }
}

/// Initialize a new configuration file
async fn init_config_command(config_path: &str) -> Result<()> {
    let path = Path::new(config_path);
    if path.exists() {
        eprintln!("❌ Error: Configuration file '{config_path}' already exists");
        std::process::exit(1);
    }

    let default_config = r#"# Sinew Configuration

# The address the HTTP service listens on
listen_addr = "127.0.0.1:9000"

# Backend database connection
[database]
driver = "mysql"          # postgres, mysql or sqlite
protocol = "tcp"
host = "localhost"
port = "3306"
name = "tutorial"
user = "root"
password = ""             # or set SINEW__DATABASE__PASSWORD

# Pool tuning
max_connections = 10
max_idle_connections = 1
conn_max_lifetime_secs = 1800
acquire_timeout_secs = 30

# Liveness probes are cached for this many seconds; defaults to
# conn_max_lifetime_secs when unset. Set to 0 to probe on every check.
# ping_cache_secs = 60
"#;

    tokio::fs::write(path, default_config)
        .await
        .context("Failed to write config file")?;
    println!("✅ Created default configuration at: {config_path}");
    println!("   Run 'sinew serve --config {config_path}' to start the service");
    Ok(())
}
