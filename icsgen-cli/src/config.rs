//! Runtime configuration.
//!
//! Built once at startup from defaults, an optional TOML file and the
//! command-line flags (in that order of precedence), then handed to the
//! adapters by reference.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use icsgen_core::Encoder;
use icsgen_core::ics::DEFAULT_UID_DOMAIN;
use serde::Deserialize;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_OUTPUT: &str = "output/calendar.ics";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Address the server binds to
    pub host: IpAddr,
    /// Port the server listens on
    pub port: u16,
    /// Where local mode writes the calendar
    pub output: PathBuf,
    /// Domain appended to event ids to build UIDs
    pub uid_domain: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            output: PathBuf::from(DEFAULT_OUTPUT),
            uid_domain: DEFAULT_UID_DOMAIN.to_string(),
        }
    }
}

impl Config {
    /// Load a TOML config file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read config file {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Could not parse config file {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Encoder configured for this run
    pub fn encoder(&self) -> Encoder {
        Encoder::new().with_uid_domain(&self.uid_domain)
    }
}
