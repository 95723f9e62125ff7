//! Types for the pipeline module.

use serde::{Deserialize, Serialize};

use crate::order::{Order, ProcessStatus};

/// Result of one alert attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertOutcome {
    /// Alert acknowledged; the item's counter now holds `notifications`.
    Sent { notifications: u32 },
    /// The alert endpoint answered with a non-success status.
    Rejected { status: u16 },
    /// The alert endpoint could not be reached or the call failed otherwise.
    Failed { error: String },
}

impl AlertOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent { .. })
    }
}

/// Result of one update attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    Sent,
    Rejected { status: u16 },
    Failed { error: String },
}

impl UpdateOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent)
    }
}

/// Per-order counts gathered while processing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessTally {
    /// Items classified as delivered (alert attempted).
    pub delivered: usize,
    /// Delivered items whose alert was acknowledged.
    pub notified: usize,
    /// All items in the order.
    pub total: usize,
}

impl ProcessTally {
    /// Alerts attempted but not acknowledged.
    pub fn failed_alerts(&self) -> usize {
        self.delivered - self.notified
    }
}

/// An order after processing, with the counts that produced its status.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedOrder {
    pub order: Order,
    pub tally: ProcessTally,
}

impl ProcessedOrder {
    /// The status written by the processor.
    pub fn status(&self) -> ProcessStatus {
        self.order
            .process_status
            .unwrap_or_else(|| ProcessStatus::from_counts(self.tally.delivered, self.tally.total))
    }
}

/// Counts for one batch run. Informational only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub run_id: String,
    pub orders_fetched: usize,
    pub processed: usize,
    pub partial: usize,
    pub not_processed: usize,
    pub alerts_sent: usize,
    pub alerts_failed: usize,
    pub updates_sent: usize,
    pub updates_failed: usize,
}

impl BatchSummary {
    pub(crate) fn record(&mut self, processed: &ProcessedOrder) {
        match processed.status() {
            ProcessStatus::Processed => self.processed += 1,
            ProcessStatus::Partial => self.partial += 1,
            ProcessStatus::NotProcessed => self.not_processed += 1,
        }
        self.alerts_sent += processed.tally.notified;
        self.alerts_failed += processed.tally.failed_alerts();
    }

    pub(crate) fn record_update(&mut self, outcome: &UpdateOutcome) {
        if outcome.is_sent() {
            self.updates_sent += 1;
        } else {
            self.updates_failed += 1;
        }
    }

    /// Orders that were not forwarded because they were not fully delivered.
    pub fn skipped(&self) -> usize {
        self.partial + self.not_processed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_records_status_and_alerts() {
        let mut summary = BatchSummary::default();
        let mut order = Order::new(1, vec![]);
        order.process_status = Some(ProcessStatus::Partial);

        summary.record(&ProcessedOrder {
            order,
            tally: ProcessTally {
                delivered: 2,
                notified: 1,
                total: 3,
            },
        });
        summary.record_update(&UpdateOutcome::Rejected { status: 500 });

        assert_eq!(summary.partial, 1);
        assert_eq!(summary.alerts_sent, 1);
        assert_eq!(summary.alerts_failed, 1);
        assert_eq!(summary.updates_failed, 1);
        assert_eq!(summary.skipped(), 1);
    }
}
