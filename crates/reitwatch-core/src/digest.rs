use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{PortfolioMetrics, ReitRecord, SectorSummary};

/// One pipeline run's complete output, handed to the renderers and the
/// notifier. Records stay in watchlist order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Digest {
    /// RFC3339 UTC timestamp of the run.
    pub generated_at: String,
    pub records: Vec<ReitRecord>,
    pub sectors: BTreeMap<String, SectorSummary>,
    pub portfolio: PortfolioMetrics,
}

impl Digest {
    /// Records sorted by change percentage, best first. Stable, so records
    /// with equal change keep their watchlist order.
    pub fn by_change_desc(&self) -> Vec<&ReitRecord> {
        let mut sorted: Vec<&ReitRecord> = self.records.iter().collect();
        sorted.sort_by(|a, b| {
            b.change_pct
                .partial_cmp(&a.change_pct)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        sorted
    }

    pub fn top_gainer(&self) -> Option<&ReitRecord> {
        self.by_change_desc().first().copied()
    }

    pub fn top_loser(&self) -> Option<&ReitRecord> {
        self.by_change_desc().last().copied()
    }
}
