//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// HTTP and check behavior settings
    #[serde(default)]
    pub checker: CheckerConfig,

    /// Target section for the menu search
    #[serde(default)]
    pub section: MenuSection,

    /// Outbound email settings
    #[serde(default)]
    pub email: EmailConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.checker.page_url)
            .map_err(|e| AppError::validation(format!("checker.page_url: {e}")))?;
        Url::parse(&self.checker.base_url)
            .map_err(|e| AppError::validation(format!("checker.base_url: {e}")))?;
        if self.checker.user_agent.trim().is_empty() {
            return Err(AppError::validation("checker.user_agent is empty"));
        }
        if self.checker.timeout_secs == 0 {
            return Err(AppError::validation("checker.timeout_secs must be > 0"));
        }
        if self.section.heading_terms.is_empty() {
            return Err(AppError::validation("section.heading_terms is empty"));
        }
        if self.section.primary_keyword.trim().is_empty() {
            return Err(AppError::validation("section.primary_keyword is empty"));
        }
        Ok(())
    }

    /// Validate email settings. Separate from `validate` so the resolver
    /// and ledger commands work without a configured relay.
    pub fn validate_email(&self) -> Result<()> {
        if self.email.from.trim().is_empty() {
            return Err(AppError::validation("email.from is empty"));
        }
        if self.email.to.is_empty() {
            return Err(AppError::validation("email.to has no recipients"));
        }
        if self.email.smtp_server.trim().is_empty() {
            return Err(AppError::validation("email.smtp_server is empty"));
        }
        if self.email.smtp_port == 0 {
            return Err(AppError::validation("email.smtp_port must be > 0"));
        }
        Ok(())
    }
}

/// HTTP client and check behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckerConfig {
    /// URL of the page listing the menus
    #[serde(default = "defaults::page_url")]
    pub page_url: String,

    /// Fixed origin used to absolutize relative PDF links
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Directory holding the downloaded menu PDF
    #[serde(default = "defaults::download_dir")]
    pub download_dir: String,

    /// Path of the persisted ledger record
    #[serde(default = "defaults::state_file")]
    pub state_file: String,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            page_url: defaults::page_url(),
            base_url: defaults::base_url(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            download_dir: defaults::download_dir(),
            state_file: defaults::state_file(),
        }
    }
}

/// Target section identifier scoping the menu search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuSection {
    /// Human-readable section name, used in notifications
    #[serde(default = "defaults::section_name")]
    pub name: String,

    /// Substrings that must all appear in a heading (case-sensitive)
    #[serde(default = "defaults::heading_terms")]
    pub heading_terms: Vec<String>,

    /// Keyword the PDF URL must contain (matched lowercased)
    #[serde(default = "defaults::primary_keyword")]
    pub primary_keyword: String,

    /// Token the PDF URL must not contain (matched against the uppercased URL)
    #[serde(default = "defaults::exclusion_token")]
    pub exclusion_token: String,

    /// Keywords accepted by the broad fallback tier (matched lowercased)
    #[serde(default = "defaults::fallback_keywords")]
    pub fallback_keywords: Vec<String>,

    /// Substring rejected by the broad fallback tier (matched lowercased)
    #[serde(default = "defaults::fallback_exclusion")]
    pub fallback_exclusion: String,
}

impl Default for MenuSection {
    fn default() -> Self {
        Self {
            name: defaults::section_name(),
            heading_terms: defaults::heading_terms(),
            primary_keyword: defaults::primary_keyword(),
            exclusion_token: defaults::exclusion_token(),
            fallback_keywords: defaults::fallback_keywords(),
            fallback_exclusion: defaults::fallback_exclusion(),
        }
    }
}

/// Outbound email settings for the authenticated relay.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EmailConfig {
    /// Sender address
    #[serde(default)]
    pub from: String,

    /// Recipient addresses
    #[serde(default)]
    pub to: Vec<String>,

    /// SMTP relay host
    #[serde(default)]
    pub smtp_server: String,

    /// SMTP submission port
    #[serde(default = "defaults::smtp_port")]
    pub smtp_port: u16,

    /// Relay username
    #[serde(default)]
    pub username: String,

    /// Relay password
    #[serde(default)]
    pub password: String,
}

mod defaults {
    // Checker defaults
    pub fn page_url() -> String {
        "https://paiperlek.lu/kantin/".into()
    }
    pub fn base_url() -> String {
        "https://paiperlek.lu".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn download_dir() -> String {
        "menus".into()
    }
    pub fn state_file() -> String {
        "state.json".into()
    }

    // Section defaults
    pub fn section_name() -> String {
        "SEA Gonderange/ Bourglinster".into()
    }
    pub fn heading_terms() -> Vec<String> {
        vec!["SEA Gonderange".into(), "Bourglinster".into()]
    }
    pub fn primary_keyword() -> String {
        "gonderange".into()
    }
    pub fn exclusion_token() -> String {
        "JGL".into()
    }
    pub fn fallback_keywords() -> Vec<String> {
        vec!["gonderange".into(), "bourglinster".into()]
    }
    pub fn fallback_exclusion() -> String {
        "junglinster".into()
    }

    // Email defaults
    pub fn smtp_port() -> u16 {
        587
    }
}
