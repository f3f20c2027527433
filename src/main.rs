use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use m3u_xmltv::{config::Config, utils::UrlUtils, web::WebServer};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "m3u-xmltv")]
#[command(version)]
#[command(about = "Serves a JSON channel catalog as an M3U playlist and an XMLTV guide")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Listening IP address
    #[arg(short = 'H', long, value_name = "IP")]
    host: Option<String>,

    /// Listening port
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,

    /// Upstream catalog URL (overrides MEDIA_URL and the config file)
    #[arg(short, long, value_name = "URL")]
    media_url: Option<String>,

    /// Log level
    #[arg(short = 'v', long, default_value = "info")]
    log_level: String,

    /// Log output format
    #[arg(long, value_enum, default_value = "text")]
    log_format: LogFormat,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_filter = if cli.log_level == "trace" {
        format!("m3u_xmltv={},tower_http=trace", cli.log_level)
    } else {
        format!("m3u_xmltv={}", cli.log_level)
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| log_filter.into());
    let registry = tracing_subscriber::registry().with(filter);
    match cli.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }

    info!("Starting m3u-xmltv v{}", env!("CARGO_PKG_VERSION"));

    let mut config = Config::load_from_file(&cli.config)?;
    config.apply_env_overrides(|key| std::env::var(key).ok());

    // Override config with CLI arguments
    if let Some(host) = cli.host {
        config.web.host = host;
    }
    if let Some(port) = cli.port {
        config.web.port = port;
    }
    if let Some(media_url) = cli.media_url.filter(|url| !url.is_empty()) {
        config.upstream.url = Some(media_url);
    }

    match config.upstream_url() {
        Some(url) => info!("Using channel catalog: {}", UrlUtils::obfuscate_credentials(url)),
        None => info!("No upstream catalog URL configured; set MEDIA_URL"),
    }

    let web_server = WebServer::new(config)?;
    info!(
        "Starting web server on {}:{}",
        web_server.host(),
        web_server.port()
    );
    web_server.serve().await?;

    Ok(())
}
