//! Handler for the `run` command.

use std::time::Duration;

use tokio::signal;
use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::application::TradeOrchestrator;
use crate::cli::RunArgs;
use crate::error::Result;
use crate::infrastructure::bootstrap::build_orchestrator;
use crate::infrastructure::config::Config;

/// Execute the run command.
pub async fn execute(args: &RunArgs) -> Result<()> {
    let mut config = Config::load(&args.config)?;

    // Apply CLI overrides
    if let Some(ref level) = args.log_level {
        config.logging.level = level.clone();
    }
    if args.json_logs {
        config.logging.format = "json".to_string();
    }
    if let Some(min_profit) = args.min_profit {
        config.min_profit = min_profit;
    }

    config.init_logging();
    info!(config = %args.config.display(), "ceres starting");

    let mut orchestrator = build_orchestrator(&config).await?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            info!("Shutdown signal received");
            let _ = shutdown_tx.send(true);
        }
    });

    let completed = drive(
        &mut orchestrator,
        args.cycles,
        Duration::from_millis(args.interval_ms),
        shutdown_rx,
    )
    .await?;

    let stats = orchestrator.stats();
    info!(
        cycles = completed,
        trades = stats.trades_count(),
        total_profit = %stats.total_profit(),
        total_turnover = %stats.total_turnover(),
        "ceres stopped"
    );
    Ok(())
}

/// Run cycles back to back with `interval` between them and return how many
/// completed.
///
/// A shutdown request is honoured only between cycles, so both legs of a
/// started trade are always submitted. A failed cycle is logged and the next
/// one starts, except after a partial execution, which is returned.
pub async fn drive(
    orchestrator: &mut TradeOrchestrator,
    cycles: Option<u64>,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> Result<u64> {
    let mut completed: u64 = 0;

    while !*shutdown.borrow() {
        let result = orchestrator.main_cycle().await;
        completed += 1;
        match result {
            Ok(outcome) => info!(cycle = completed, outcome = outcome.label(), "Cycle finished"),
            Err(e) if e.is_partial_execution() => {
                error!(error = %e, "Partial execution, manual reconciliation required");
                return Err(e);
            }
            Err(e) => warn!(cycle = completed, error = %e, "Cycle failed"),
        }

        if cycles.is_some_and(|limit| completed >= limit) {
            break;
        }

        tokio::select! {
            () = tokio::time::sleep(interval) => {}
            changed = shutdown.changed() => {
                // Sender gone without a request: keep the schedule.
                if changed.is_err() {
                    tokio::time::sleep(interval).await;
                }
            }
        }
    }

    Ok(completed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use rust_decimal_macros::dec;

    use crate::application::OrchestratorSettings;
    use crate::domain::OrderSide;
    use crate::port::ExchangeGateway;
    use crate::testkit::domain::ever_usdt;
    use crate::testkit::exchange::ScriptedExchange;
    use crate::testkit::notifier::RecordingNotifier;

    async fn orchestrator(gateway: &Arc<ScriptedExchange>) -> TradeOrchestrator {
        let settings = OrchestratorSettings {
            symbol: ever_usdt(),
            order_size: dec!(20),
            min_profit: dec!(0.001),
            dry: true,
        };
        let gateway: Arc<dyn ExchangeGateway> = gateway.clone();
        TradeOrchestrator::start(settings, gateway, Arc::new(RecordingNotifier::new()))
            .await
            .unwrap()
    }

    fn profitable_exchange() -> ScriptedExchange {
        ScriptedExchange::new()
            .with_book("kucoin", dec!(0.06670), dec!(0.06682))
            .with_book("bybit", dec!(0.06707), dec!(0.06720))
    }

    #[tokio::test]
    async fn shutdown_during_a_trade_waits_for_both_legs() {
        let gateway = Arc::new(profitable_exchange().with_order_delay(Duration::from_millis(200)));
        let mut orchestrator = orchestrator(&gateway).await;
        let (tx, rx) = watch::channel(false);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            tx.send(true).unwrap();
        });

        let completed = drive(&mut orchestrator, None, Duration::from_secs(60), rx)
            .await
            .unwrap();

        assert_eq!(completed, 1);
        let sides: Vec<_> = gateway.orders().iter().map(|leg| leg.side()).collect();
        assert_eq!(sides, vec![OrderSide::Buy, OrderSide::Sell]);
        assert_eq!(orchestrator.stats().trades_count(), 1);
    }

    #[tokio::test]
    async fn shutdown_before_start_runs_nothing() {
        let gateway = Arc::new(profitable_exchange());
        let mut orchestrator = orchestrator(&gateway).await;
        let (_tx, rx) = watch::channel(true);

        let completed = drive(&mut orchestrator, None, Duration::ZERO, rx)
            .await
            .unwrap();

        assert_eq!(completed, 0);
        assert_eq!(gateway.book_calls(), 0);
    }

    #[tokio::test]
    async fn stops_after_the_cycle_limit() {
        let gateway = Arc::new(profitable_exchange());
        let mut orchestrator = orchestrator(&gateway).await;
        let (_tx, rx) = watch::channel(false);

        let completed = drive(&mut orchestrator, Some(3), Duration::ZERO, rx)
            .await
            .unwrap();

        assert_eq!(completed, 3);
        assert_eq!(orchestrator.stats().trades_count(), 3);
    }

    #[tokio::test]
    async fn failed_cycles_do_not_stop_the_loop() {
        let gateway = Arc::new(profitable_exchange());
        gateway.set_book_failure(Some("offline"));
        let mut orchestrator = orchestrator(&gateway).await;
        let (_tx, rx) = watch::channel(false);

        let completed = drive(&mut orchestrator, Some(2), Duration::ZERO, rx)
            .await
            .unwrap();

        assert_eq!(completed, 2);
        assert_eq!(gateway.book_calls(), 2);
    }

    #[tokio::test]
    async fn partial_execution_stops_with_an_error() {
        let gateway = Arc::new(profitable_exchange().fail_order(2));
        let mut orchestrator = orchestrator(&gateway).await;
        let (_tx, rx) = watch::channel(false);

        let result = drive(&mut orchestrator, Some(5), Duration::ZERO, rx).await;

        assert!(result.is_err_and(|e| e.is_partial_execution()));
        assert_eq!(gateway.order_calls(), 2);
    }
}
