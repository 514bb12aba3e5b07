//! Bridge configuration.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Timeout applied to a command round-trip when none is configured.
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(30);

/// Tunables for the bridge, loadable from a TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Upper bound on one command round-trip, e.g. "30s" or "500ms".
    ///
    /// A hung connection-handle call would otherwise suspend its caller
    /// forever; every send is bounded by this. There is no retry at this
    /// layer.
    pub command_timeout: Option<String>,
}

impl BridgeConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: BridgeConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// The parsed command timeout, falling back to the default on absent
    /// or unparseable input.
    pub fn command_timeout(&self) -> Duration {
        self.command_timeout
            .as_deref()
            .map(parse_timeout)
            .unwrap_or(DEFAULT_COMMAND_TIMEOUT)
    }
}

fn parse_timeout(s: &str) -> Duration {
    let s = s.trim();
    if let Some(ms) = s.strip_suffix("ms") {
        ms.parse::<u64>()
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_COMMAND_TIMEOUT)
    } else if let Some(secs) = s.strip_suffix('s') {
        secs.parse::<u64>()
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_COMMAND_TIMEOUT)
    } else {
        DEFAULT_COMMAND_TIMEOUT
    }
}
