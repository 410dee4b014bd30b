use std::time::Duration;

use crate::{
    constants::DEFAULT_REQUEST_DELAY,
    error::BatchError,
    pincodes::Pincodes,
    report::Report,
    stores::{Lookup, StoreLocator},
};

use tokio::time;
use tracing::{info, warn};

/// Reported to the caller after each pincode is looked up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Progress<'a> {
    /// 1-based position of `pincode` in the batch.
    pub index: usize,
    pub total: usize,
    pub pincode: &'a str,
    pub stores_found: usize,
}

#[derive(Debug)]
pub struct Summary {
    pub spreadsheet: Vec<u8>,
    pub rows: usize,
    pub pincodes: usize,
    /// Pincodes whose lookup failed outright, as opposed to finding no stores.
    pub failed_lookups: usize,
}

#[derive(Debug)]
pub enum BatchOutcome {
    Completed(Summary),
    /// Every lookup came back empty; no spreadsheet is produced.
    NoStores { pincodes: usize },
}

/// Runs one lookup per pincode, one at a time, and assembles the results.
#[derive(Clone, Debug)]
pub struct Batch {
    locator: StoreLocator,
    delay: Duration,
}

impl Batch {
    pub fn new(locator: StoreLocator) -> Self {
        Self {
            locator,
            delay: DEFAULT_REQUEST_DELAY,
        }
    }

    /// Pause inserted between consecutive lookups.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub async fn run<F>(
        &self,
        pincodes: &Pincodes,
        mut on_progress: F,
    ) -> Result<BatchOutcome, BatchError>
    where
        F: FnMut(Progress<'_>),
    {
        if pincodes.is_empty() {
            return Err(BatchError::NoPincodes);
        }

        let total = pincodes.len();
        let mut results = Vec::with_capacity(total);
        let mut failed_lookups = 0;
        for (i, pincode) in pincodes.iter().enumerate() {
            if i > 0 && !self.delay.is_zero() {
                time::sleep(self.delay).await;
            }
            let lookup = self.locator.lookup(pincode).await;
            if matches!(lookup, Lookup::NoResult(_)) {
                failed_lookups += 1;
            }
            let stores = lookup.into_stores();
            on_progress(Progress {
                index: i + 1,
                total,
                pincode: pincode.as_str(),
                stores_found: stores.len(),
            });
            results.push((pincode.clone(), stores));
        }

        let report = Report::assemble(results);
        if report.is_empty() {
            warn!(pincodes = total, failed_lookups, "no stores found for any pincode");
            return Ok(BatchOutcome::NoStores { pincodes: total });
        }

        let spreadsheet = report.to_xlsx()?;
        info!(
            rows = report.row_count(),
            pincodes = total,
            failed_lookups,
            "batch complete"
        );
        Ok(BatchOutcome::Completed(Summary {
            spreadsheet,
            rows: report.row_count(),
            pincodes: total,
            failed_lookups,
        }))
    }
}
