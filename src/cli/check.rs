//! Handler for the `check` command.

use std::path::Path;

use serde_json::json;

use crate::application::OrchestratorSettings;
use crate::error::Result;
use crate::infrastructure::config::Config;

/// Validate configuration file without starting the bot.
#[allow(clippy::result_large_err)]
pub fn execute_config<P: AsRef<Path>>(config_path: P, as_json: bool) -> Result<()> {
    let path = config_path.as_ref();
    let config = Config::load(path)?;
    let settings = config.orchestrator_settings()?;

    if as_json {
        println!("{}", json_summary(&config, &settings)?);
        return Ok(());
    }

    println!("Checking configuration: {}", path.display());
    println!();
    println!("✓ Configuration file is valid");
    println!();
    println!("Summary:");
    println!("  Symbol: {}", settings.symbol);
    println!(
        "  Order size: {} {}",
        settings.order_size,
        settings.symbol.counter()
    );
    println!(
        "  Min profit: {} {}",
        settings.min_profit,
        settings.symbol.base()
    );
    println!("  Dry mode: {}", settings.dry);
    println!(
        "  Log level: {} ({})",
        config.logging.level, config.logging.format
    );
    println!();

    if config.paper.exchanges.is_empty() {
        println!("⚠ No paper exchanges configured");
    } else {
        println!("Paper exchanges:");
        for (exchange, venue) in &config.paper.exchanges {
            println!("  {exchange}: bid {} / ask {}", venue.bid, venue.ask);
        }
    }

    if !config.dry {
        println!("⚠ dry = false: `ceres run` only supports paper exchanges");
    }

    if config.telegram.enabled {
        println!("✓ Telegram configured and enabled");
    } else {
        println!("  Telegram: disabled");
    }

    println!();
    println!("Configuration is ready to use.");
    Ok(())
}

#[allow(clippy::result_large_err)]
fn json_summary(config: &Config, settings: &OrchestratorSettings) -> Result<String> {
    let exchanges: Vec<String> = config
        .paper
        .exchanges
        .keys()
        .map(ToString::to_string)
        .collect();
    let summary = json!({
        "symbol": settings.symbol.to_string(),
        "order_size": settings.order_size.to_string(),
        "min_profit": settings.min_profit.to_string(),
        "dry": settings.dry,
        "paper_exchanges": exchanges,
        "telegram": config.telegram.enabled,
    });
    Ok(serde_json::to_string_pretty(&summary)?)
}
