//! Manbot - Entry Point
//!
//! Options:
//! - --config <path> / -c: config file (default: config.toml, or $MANBOT_CONFIG)
//! - --json: JSON log lines on stderr

use manbot::config::DEFAULT_CONFIG_PATH;
use manbot::Config;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    // Parse args
    let args: Vec<String> = std::env::args().collect();
    let json_logs = args.iter().any(|a| a == "--json");
    let help_mode = args.iter().any(|a| a == "--help" || a == "-h");
    let config_path = args
        .iter()
        .position(|a| a == "--config" || a == "-c")
        .and_then(|i| args.get(i + 1).cloned())
        .or_else(|| std::env::var("MANBOT_CONFIG").ok())
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    if help_mode {
        println!("Manbot v{}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("Usage: manbot [OPTIONS]");
        println!();
        println!("Options:");
        println!("  --config, -c <PATH>  Config file (default: {})", DEFAULT_CONFIG_PATH);
        println!("  --json               Log JSON lines to stderr");
        println!("  --help, -h           Show this help");
        println!();
        println!("Environment variables:");
        println!("  MANBOT_CONFIG        Config file path");
        println!("  RUST_LOG             Log level (trace, debug, info, warn, error)");
        return Ok(());
    }

    let log_level = std::env::var("RUST_LOG")
        .map(|s| match s.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        })
        .unwrap_or(Level::INFO);

    if json_logs {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .json()
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    } else {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_ansi(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    }

    let config = match Config::from_file(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    info!("Manbot v{}", env!("CARGO_PKG_VERSION"));
    info!("Man server: {}", config.man_server);
    info!("Trigger: {}", config.trigger);

    if let Err(e) = manbot::discord::run(&config).await {
        error!("{}", e);
        std::process::exit(1);
    }

    Ok(())
}
