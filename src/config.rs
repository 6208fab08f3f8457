use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_CODE_THEME, DEFAULT_LOG_FILE, MAX_QUICK_REPLIES,
    WEBHOOK_URL_ENV,
};
use crate::errors::{HookchatError, HookchatResult};
use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path, path::PathBuf, str::FromStr};

/// A predefined message offered as a one-tap button under the message list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickReply {
    pub label: String,
    pub icon: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Endpoint receiving `{message, sessionId}`. Not validated; a missing
    /// or bad URL surfaces as a server error when sending.
    pub webhook_url: Option<String>,
    pub title: String,
    pub bot_name: String,
    pub bot_status: String,
    pub avatar_path: PathBuf,
    pub avatar_alt: String,
    pub quick_replies: Vec<QuickReply>,
    pub code_theme: String,
    pub request_timeout_secs: Option<u64>,
    pub log_file: PathBuf,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            webhook_url: None,
            title: "🤖 Chat Assistant".to_string(),
            bot_name: "Assistant".to_string(),
            bot_status: "Online".to_string(),
            avatar_path: PathBuf::from("chatbot.png"),
            avatar_alt: "Bot avatar".to_string(),
            quick_replies: vec![QuickReply {
                label: "Help".to_string(),
                icon: "🆘".to_string(),
            }],
            code_theme: DEFAULT_CODE_THEME.to_string(),
            request_timeout_secs: None,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Reads the user config file (if any), then applies the environment.
    pub fn load() -> HookchatResult<Config> {
        let mut config = match config_path() {
            Some(path) if path.exists() => Config::from_path(&path)?,
            _ => Config::default(),
        };
        config.apply_webhook_override(env::var(WEBHOOK_URL_ENV).ok());
        validate_config(&config)?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> HookchatResult<Config> {
        let config_str = fs::read_to_string(path).map_err(|e| {
            HookchatError::config_error(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        serde_json::from_str(&config_str)
            .map_err(|e| HookchatError::config_error(format!("Failed to parse config: {}", e)))
    }

    /// The environment wins over the file when it carries a value.
    pub fn apply_webhook_override(&mut self, url: Option<String>) {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.webhook_url = Some(url);
        }
    }

    /// Empty string when unset; reqwest rejects it at send time.
    pub fn webhook_url(&self) -> &str {
        self.webhook_url.as_deref().unwrap_or_default()
    }
}

fn config_path() -> Option<PathBuf> {
    home::home_dir().map(|home| {
        home.join(".config")
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    })
}

pub fn validate_config(config: &Config) -> HookchatResult<()> {
    if config.quick_replies.len() > MAX_QUICK_REPLIES {
        return Err(HookchatError::config_error(format!(
            "At most {} quick replies are supported, got {}",
            MAX_QUICK_REPLIES,
            config.quick_replies.len()
        )));
    }

    if config
        .quick_replies
        .iter()
        .any(|reply| reply.label.trim().is_empty())
    {
        return Err(HookchatError::config_error(
            "Quick reply labels must not be blank",
        ));
    }

    if log::LevelFilter::from_str(&config.log_level).is_err() {
        return Err(HookchatError::config_error(format!(
            "Unknown log level: {}",
            config.log_level
        )));
    }

    Ok(())
}
