//! Main scanning engine implementation
//!
//! The engine fans a target list out over a bounded pool of concurrent
//! probes and streams records back in completion order. Every submitted
//! target produces exactly one record: probe faults and panics are caught
//! per target and reported as an `error` record instead of aborting the
//! batch. With `concurrency == 1` the stream degenerates to sequential
//! scanning in input order.

use crate::config::ScanConfig;
use crate::network::{ConnectProbe, PortState, Probe};
use crate::scanner::{ScanRecord, Target};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};

/// Bounded-concurrency scan engine
pub struct ScanEngine {
    config: ScanConfig,
    probe: Arc<dyn Probe>,
}

impl ScanEngine {
    /// Create a new scan engine backed by the TCP connect probe
    pub fn new(config: ScanConfig) -> crate::Result<Self> {
        let timeout = config.timeout_duration();
        Self::with_probe(config, Arc::new(ConnectProbe::new(timeout)))
    }

    /// Create a new scan engine with a custom probe implementation
    pub fn with_probe(config: ScanConfig, probe: Arc<dyn Probe>) -> crate::Result<Self> {
        config.validate()?;
        Ok(Self { config, probe })
    }

    /// Scan targets, yielding one record per target as probes complete
    ///
    /// Targets are submitted in input order, at most `concurrency` in flight
    /// at once; as each probe finishes, the next target is submitted and the
    /// finished record becomes available on the returned receiver. The
    /// receiver is a one-pass stream: it closes once every submitted target
    /// has been reported. Dropping it early stops further submission;
    /// attempts already in flight run to their natural completion and their
    /// records are discarded.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn scan<I>(&self, targets: I) -> mpsc::Receiver<ScanRecord>
    where
        I: IntoIterator<Item = Target> + Send + 'static,
        I::IntoIter: Send + 'static,
    {
        let concurrency = self.config.concurrency;
        let probe = Arc::clone(&self.probe);
        let (tx, rx) = mpsc::channel(concurrency);
        let limiter = Arc::new(Semaphore::new(concurrency));

        tokio::spawn(async move {
            log::debug!("scan started with concurrency {}", concurrency);

            for target in targets {
                if tx.is_closed() {
                    log::debug!("receiver dropped, stopping submission");
                    break;
                }

                let permit = match limiter.clone().acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => break,
                };
                let probe = Arc::clone(&probe);
                let tx = tx.clone();

                tokio::spawn(async move {
                    // Held until the record is sent, so a capacity-1 engine
                    // preserves input order.
                    let _permit = permit;

                    let state = match AssertUnwindSafe(probe.probe(&target)).catch_unwind().await
                    {
                        Ok(Ok(state)) => state,
                        Ok(Err(err)) => {
                            log::warn!("probe fault for {}: {}", target, err);
                            PortState::Error
                        }
                        Err(_) => {
                            log::warn!("probe panicked for {}", target);
                            PortState::Error
                        }
                    };

                    let _ = tx.send(ScanRecord::new(target, state)).await;
                });
            }
        });

        rx
    }
}
