//! Process advisor server binary.
//!
//! Loads `.env` / XDG config into the environment, initializes tracing, builds the analysis
//! service (degraded when the provider credential is missing) and serves HTTP until Ctrl-C.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use config::ServiceSettings;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "advisor-serve")]
#[command(about = "Process advisor: HTTP API that suggests automation opportunities for a process")]
struct Args {
    /// Directory holding the .env file (default: current directory)
    #[arg(long, value_name = "DIR")]
    env_dir: Option<PathBuf>,

    /// Listen host; overrides HOST
    #[arg(long, value_name = "HOST")]
    host: Option<String>,

    /// Listen port; overrides PORT
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();

    let skipped = config::load_and_apply(config::APP_NAME, args.env_dir.as_deref());
    let _ = config::init_tracing(config::DEFAULT_LOG_DIRECTIVES);
    for e in &skipped {
        warn!(error = %e, "config layer skipped; remaining layers applied");
    }

    let mut settings = ServiceSettings::from_env()?;
    if let Some(host) = args.host {
        settings.host = host;
    }
    if let Some(port) = args.port {
        settings.port = port;
    }
    info!(
        model = %settings.model,
        temperature = settings.temperature,
        require_domain = settings.require_domain,
        "settings loaded"
    );

    let service = Arc::new(serve::build_service(&settings));
    serve::run_serve(&settings.bind_addr(), service).await
}
