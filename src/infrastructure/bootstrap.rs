//! Composition root: builds the gateway, notifiers and orchestrator from
//! configuration.

use std::sync::Arc;

use tracing::info;
#[cfg(not(feature = "telegram"))]
use tracing::warn;

use crate::adapter::outbound::paper::PaperExchange;
#[cfg(feature = "telegram")]
use crate::adapter::outbound::notifier::telegram::{TelegramConfig, TelegramNotifier};
use crate::application::TradeOrchestrator;
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::settings::Config;
use crate::port::{ExchangeGateway, LogNotifier, Notifier, NotifierRegistry};

/// Build the exchange gateway for this configuration.
///
/// Only paper venues are available, so live mode is refused.
#[allow(clippy::result_large_err)]
pub fn build_gateway(config: &Config) -> Result<Arc<dyn ExchangeGateway>> {
    if !config.dry {
        return Err(ConfigError::InvalidValue {
            field: "dry",
            reason: "no live exchange connector is available; set dry = true".to_string(),
        }
        .into());
    }
    if config.paper.exchanges.is_empty() {
        return Err(ConfigError::MissingField {
            field: "paper.exchanges",
        }
        .into());
    }

    let gateway = PaperExchange::from_config(config.symbol()?, &config.paper);
    info!(
        venues = gateway.current_exchanges().len(),
        "Paper exchanges ready"
    );
    Ok(Arc::new(gateway))
}

/// Build notifier registry from configuration.
///
/// Trade summaries always go to the log; Telegram is added when enabled.
#[cfg(feature = "telegram")]
pub fn build_notifier_registry(config: &Config) -> NotifierRegistry {
    let mut registry = NotifierRegistry::new();
    registry.register(Box::new(LogNotifier));

    if config.telegram.enabled {
        if let (Some(token), Some(chat_id)) = (&config.telegram.token, config.telegram.chat_id) {
            registry.register(Box::new(TelegramNotifier::new(TelegramConfig {
                bot_token: token.clone(),
                chat_id,
            })));
            info!("Telegram notifier enabled");
        }
    }

    registry
}

/// Build notifier registry from configuration (non-telegram variant).
#[cfg(not(feature = "telegram"))]
pub fn build_notifier_registry(config: &Config) -> NotifierRegistry {
    let mut registry = NotifierRegistry::new();
    registry.register(Box::new(LogNotifier));
    if config.telegram.enabled {
        warn!("Telegram enabled in config but the binary was built without the telegram feature");
    }
    registry
}

/// Wire every component and start the orchestrator.
pub async fn build_orchestrator(config: &Config) -> Result<TradeOrchestrator> {
    let gateway = build_gateway(config)?;
    let notifier: Arc<dyn Notifier> = Arc::new(build_notifier_registry(config));
    TradeOrchestrator::start(config.orchestrator_settings()?, gateway, notifier).await
}
