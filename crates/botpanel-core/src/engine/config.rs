// Pawz Bot Panel — Configuration
//
// Optional TOML file at `~/.paw/botpanel.toml`:
//
//   api_base = "https://api.telegram.org/bot"
//   discovery_limit = 100
//
//   [whatsapp]
//   number = "+62 851 8906 3747"
//   message = "Hello, I need support."
//
// Every field has a default and a missing file is not an error. The bot
// token is deliberately absent: it is supplied per invocation.

use crate::atoms::constants::{CONFIG_DIR, CONFIG_FILE, DISCOVERY_LIMIT_DEFAULT, DISCOVERY_LIMIT_MAX, TG_API};
use crate::atoms::error::{BotError, BotResult};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PanelConfig {
    /// Prefix the token is appended to, `bot` marker included.
    pub api_base: String,
    /// Updates read per discovery scan (1..=100).
    pub discovery_limit: u32,
    pub whatsapp: WhatsAppLinkConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct WhatsAppLinkConfig {
    /// Support number used when `wa-link` gets no explicit number.
    pub number: Option<String>,
    /// Pre-filled message used when `wa-link` gets no explicit message.
    pub message: Option<String>,
}

impl Default for PanelConfig {
    fn default() -> Self {
        PanelConfig {
            api_base: TG_API.into(),
            discovery_limit: DISCOVERY_LIMIT_DEFAULT,
            whatsapp: WhatsAppLinkConfig::default(),
        }
    }
}

impl PanelConfig {
    /// Returns the default config path: `~/.paw/botpanel.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    pub fn parse(content: &str) -> BotResult<Self> {
        let config: PanelConfig =
            toml::from_str(content).map_err(|e| BotError::config(format!("TOML parse error: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> BotResult<Self> {
        if !path.exists() {
            debug!("[config] {} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config = Self::parse(&content)?;
        info!("[config] Loaded {}", path.display());
        Ok(config)
    }

    /// Load from `path` if given, else from the default location.
    pub fn load_or_default(path: Option<&Path>) -> BotResult<Self> {
        match path {
            Some(p) => Self::load(p),
            None => match Self::default_path() {
                Some(p) => Self::load(&p),
                None => Ok(Self::default()),
            },
        }
    }

    pub fn validate(&self) -> BotResult<()> {
        if !(self.api_base.starts_with("https://") || self.api_base.starts_with("http://")) {
            return Err(BotError::config(format!(
                "api_base '{}' must be an http(s) URL",
                self.api_base
            )));
        }
        if self.discovery_limit == 0 || self.discovery_limit > DISCOVERY_LIMIT_MAX {
            return Err(BotError::config(format!(
                "discovery_limit {} out of range 1..={}",
                self.discovery_limit, DISCOVERY_LIMIT_MAX
            )));
        }
        Ok(())
    }
}
