//! Telegram notification configuration.

use serde::Deserialize;

use crate::error::{ConfigError, Result};

/// Telegram notification configuration.
///
/// `TELEGRAM_BOT_TOKEN` and `TELEGRAM_CHAT_ID` override the file values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TelegramAppConfig {
    /// Enable telegram notifications.
    #[serde(default)]
    pub enabled: bool,
    /// Bot API token.
    #[serde(default)]
    pub token: Option<String>,
    /// Chat that receives trade summaries.
    #[serde(default)]
    pub chat_id: Option<i64>,
}

impl TelegramAppConfig {
    /// Credentials are required once notifications are enabled.
    #[allow(clippy::result_large_err)]
    pub(crate) fn validate(&self) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }
        if self.token.as_deref().map_or(true, str::is_empty) {
            return Err(ConfigError::MissingField {
                field: "telegram.token",
            }
            .into());
        }
        if self.chat_id.is_none() {
            return Err(ConfigError::MissingField {
                field: "telegram.chat_id",
            }
            .into());
        }
        Ok(())
    }
}
