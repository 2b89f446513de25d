//! Periodic tick driver
//!
//! Calls `Fleet::tick_all` on a fixed cadence from a tokio task. The task is
//! owned by a `TickDriver` handle: it stops on request, on Ctrl+C, after an
//! optional tick budget, or is aborted when the handle is dropped.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use spa_simulator_core_rs::{Fleet, TickResult};
use tokio::sync::{oneshot, Mutex};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// How each tick is reported
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    /// Print a JSON fleet snapshot to stdout after every tick
    pub json: bool,
}

/// Handle to a running tick task
pub struct TickDriver {
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<Result<u64>>>,
}

impl TickDriver {
    /// Start ticking `fleet` every `period`
    ///
    /// The first tick fires immediately. With `max_ticks` the task ends on its
    /// own after that many ticks.
    pub fn spawn(
        fleet: Arc<Mutex<Fleet>>,
        period: Duration,
        max_ticks: Option<u64>,
        report: ReportOptions,
    ) -> Self {
        let (tx, rx) = oneshot::channel();
        let handle = tokio::spawn(run_loop(fleet, period, max_ticks, report, rx));
        Self {
            shutdown: Some(tx),
            handle: Some(handle),
        }
    }

    /// Wait for the tick budget to run out (or for Ctrl+C)
    pub async fn join_or_interrupt(mut self) -> Result<u64> {
        let mut handle = self.handle.take().context("driver already joined")?;

        tokio::select! {
            res = &mut handle => res.context("tick task panicked")?,
            res = tokio::signal::ctrl_c() => {
                if let Err(err) = res {
                    warn!(?err, "failed to listen for Ctrl+C");
                }
                info!("interrupt received, stopping driver");
                self.signal_shutdown();
                handle.await.context("tick task panicked")?
            }
        }
    }

    /// Ask the task to stop and wait for it
    pub async fn stop(mut self) -> Result<u64> {
        self.signal_shutdown();
        let handle = self.handle.take().context("driver already joined")?;
        handle.await.context("tick task panicked")?
    }

    fn signal_shutdown(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            // The task may already have finished on its own.
            let _ = tx.send(());
        }
    }
}

impl Drop for TickDriver {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

async fn run_loop(
    fleet: Arc<Mutex<Fleet>>,
    period: Duration,
    max_ticks: Option<u64>,
    report: ReportOptions,
    mut shutdown: oneshot::Receiver<()>,
) -> Result<u64> {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut ticks = 0u64;

    loop {
        if max_ticks.is_some_and(|max| ticks >= max) {
            debug!(ticks, "tick budget exhausted");
            break;
        }

        tokio::select! {
            _ = &mut shutdown => {
                debug!(ticks, "driver shutdown requested");
                break;
            }
            _ = interval.tick() => {
                let mut fleet = fleet.lock().await;
                let result = fleet.tick_all();
                ticks += 1;
                report_tick(&fleet, &result, report)?;
            }
        }
    }

    Ok(ticks)
}

fn report_tick(fleet: &Fleet, result: &TickResult, report: ReportOptions) -> Result<()> {
    info!(
        tick = result.tick,
        powered = result.devices_ticked,
        faulted = result.devices_faulted,
        "fleet tick"
    );

    for device in fleet.list_all() {
        let state = device.physical_state();
        debug!(
            id = device.device_id(),
            name = device.identity().display_name(),
            power = state.power_on(),
            water = state.water_temperature(),
            heater = state.heater_on(),
            cooler = state.cooler_on(),
            error = state.error_condition().map(|f| f.as_str()).unwrap_or("-"),
            "device"
        );
    }

    if report.json {
        let line = serde_json::to_string(&fleet.snapshot()).context("serializing snapshot")?;
        println!("{}", line);
    }

    Ok(())
}
