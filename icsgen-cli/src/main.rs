mod config;
mod local;
mod logging;
mod server;

use std::net::IpAddr;
use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use clap::Parser;
use tracing::info;

use crate::config::Config;
use crate::logging::LogFormat;

#[derive(Parser, Debug)]
#[command(name = "icsgen")]
#[command(about = "Generate iCalendar files of all-day events from JSON")]
struct Cli {
    /// Run in server mode
    #[arg(long)]
    server: bool,

    /// Input JSON file (for local mode)
    #[arg(long)]
    input: Option<PathBuf>,

    /// Output ICS file (for local mode) [default: output/calendar.ics]
    #[arg(long)]
    output: Option<PathBuf>,

    /// Port to run the server on (for server mode) [default: 8080]
    #[arg(long)]
    port: Option<u16>,

    /// Address to bind the server to (for server mode) [default: 0.0.0.0]
    #[arg(long)]
    host: Option<IpAddr>,

    /// Domain appended to event ids to form UIDs [default: example.com]
    #[arg(long)]
    uid_domain: Option<String>,

    /// TOML config file; flags given on the command line take precedence
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log output format
    #[arg(long, value_enum, default_value_t)]
    log_format: LogFormat,
}

impl Cli {
    fn resolve_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(ref output) = self.output {
            config.output = output.clone();
        }
        if let Some(ref uid_domain) = self.uid_domain {
            config.uid_domain = uid_domain.clone();
        }

        Ok(config)
    }

    /// Input path for local mode, which cannot run without one
    fn local_input(&self) -> Result<&Path> {
        match self.input.as_deref() {
            Some(input) => Ok(input),
            None => bail!("Input file is required in local mode. Use --input flag."),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_format)?;

    let config = cli.resolve_config()?;

    if cli.server {
        return server::serve(&config).await;
    }

    let input = cli.local_input()?;
    info!("Running in local mode...");
    local::generate_local_ics(input, &config.output, &config.encoder())
}
