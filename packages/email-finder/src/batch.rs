//! Sequential, paced batch lookups.
//!
//! Exactly one lookup is in flight at any time and a fixed delay separates
//! consecutive calls; this is how the provider's rate limit is respected.
//! Every seed processed yields exactly one result, in input order, no
//! matter how the lookup ended.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::time::Duration;

use futures::FutureExt;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::lookup::{Lookup, LookupRequest, DEFAULT_LIMIT};
use crate::normalize::normalize_domain;
use crate::types::{LookupResult, SeedRecord};

pub const DEFAULT_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOptions {
    /// Pause between consecutive lookups (not after the last one).
    pub delay: Duration,
    /// Result cap passed to every lookup.
    pub limit: u32,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            delay: DEFAULT_DELAY,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Snapshot handed to the progress callback after each item.
#[derive(Debug, Clone, Copy)]
pub struct BatchProgress<'a> {
    pub completed: usize,
    pub total: usize,
    /// Everything accumulated so far, in input order.
    pub results: &'a [LookupResult],
}

impl BatchProgress<'_> {
    pub fn latest(&self) -> Option<&LookupResult> {
        self.results.last()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    pub results: Vec<LookupResult>,
    /// True when the batch stopped early on the cancellation token. Only
    /// seeds before the stop point have results.
    pub cancelled: bool,
}

pub struct BatchDriver<L: Lookup> {
    lookup: L,
    options: BatchOptions,
    cancel: CancellationToken,
}

impl<L: Lookup> BatchDriver<L> {
    pub fn new(lookup: L, options: BatchOptions) -> Self {
        Self {
            lookup,
            options,
            cancel: CancellationToken::new(),
        }
    }

    /// Stop the batch between items when `token` is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    pub fn options(&self) -> &BatchOptions {
        &self.options
    }

    /// Run every seed through the lookup, one at a time.
    pub async fn run<F>(&self, seeds: &[SeedRecord], mut on_progress: F) -> BatchOutcome
    where
        F: FnMut(BatchProgress<'_>),
    {
        let total = seeds.len();
        let mut results: Vec<LookupResult> = Vec::with_capacity(total);
        let mut cancelled = false;

        info!(total, delay_ms = self.options.delay.as_millis() as u64, "Starting batch");

        for (index, seed) in seeds.iter().enumerate() {
            if self.cancel.is_cancelled() {
                cancelled = true;
                break;
            }

            let result = self.process(seed, index, total).await;
            results.push(result);
            on_progress(BatchProgress {
                completed: results.len(),
                total,
                results: &results,
            });

            if index + 1 < total {
                tokio::select! {
                    _ = self.cancel.cancelled() => {
                        cancelled = true;
                        break;
                    }
                    _ = tokio::time::sleep(self.options.delay) => {}
                }
            }
        }

        let successful = results.iter().filter(|r| r.is_success()).count();
        if cancelled {
            warn!(completed = results.len(), total, "Batch cancelled");
        } else {
            info!(total, successful, failed = total - successful, "Batch complete");
        }

        BatchOutcome { results, cancelled }
    }

    async fn process(&self, seed: &SeedRecord, index: usize, total: usize) -> LookupResult {
        let domain = normalize_domain(&seed.domain);
        info!(index = index + 1, total, domain = %domain, "Looking up domain");

        let request = LookupRequest::new(domain)
            .with_company(&seed.company_name)
            .with_limit(self.options.limit);

        let result = match AssertUnwindSafe(self.lookup.lookup(&request))
            .catch_unwind()
            .await
        {
            Ok(result) => result,
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                error!(domain = %request.domain, error = %message, "Lookup panicked");
                let company = if seed.company_name.is_empty() {
                    &request.domain
                } else {
                    &seed.company_name
                };
                LookupResult::failed(company, &request.domain, message)
            }
        };

        if let Some(err) = result.error() {
            warn!(domain = %request.domain, error = %err, "Lookup failed");
        }
        result
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "lookup failed unexpectedly".to_string()
    }
}
