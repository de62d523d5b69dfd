use anyhow::Result;
use clap::Parser;
use mediaqr_server::{MediaQrConfig, init_tracing, run};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Media to QR upload server", long_about = None)]
struct Args {
    /// Configuration file, used instead of ./mediaqr.toml
    #[arg(short, long, env = "MEDIAQR_CONFIG")]
    config: Option<PathBuf>,

    /// Address to listen on, overriding the configuration
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before the configuration reads the environment
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let mut config = MediaQrConfig::load(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        config = config.with_bind_address(bind);
    }

    init_tracing(config.log_level(), *config.json_logs())?;
    info!(
        backend = %config.backend(),
        max_file_size = config.max_file_size(),
        cleanup = config.enable_cleanup(),
        "Starting mediaqr"
    );

    run(config).await?;
    Ok(())
}
