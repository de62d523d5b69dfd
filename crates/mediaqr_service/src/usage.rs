//! Storage accounting and aggregate statistics.

use chrono::{DateTime, Utc};
use mediaqr_storage::StoreTotals;
use serde::{Deserialize, Serialize};

/// Default soft capacity: 500 MiB.
pub const DEFAULT_STORAGE_CAPACITY_BYTES: u64 = 500 * BYTES_PER_MB;

const BYTES_PER_KB: u64 = 1024;
const BYTES_PER_MB: u64 = 1024 * 1024;

/// Usage against the configured (reported, not enforced) capacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageReport {
    /// Sum of live payload sizes
    pub used_bytes: u64,
    /// Configured capacity
    pub total_capacity_bytes: u64,
    /// `used / total * 100`, unrounded
    pub percentage_used: f64,
    /// Used space in MiB, two decimals
    pub used_mb: f64,
    /// Remaining space in MiB, two decimals; negative when over capacity
    pub available_mb: f64,
    /// Capacity in MiB, two decimals
    pub total_mb: f64,
    /// `percentage_used` rounded to two decimals
    pub percentage: f64,
}

impl UsageReport {
    /// Build a report from store totals. Zero capacity reports zero percent.
    pub fn new(used_bytes: u64, total_capacity_bytes: u64) -> Self {
        let percentage_used = if total_capacity_bytes == 0 {
            0.0
        } else {
            used_bytes as f64 / total_capacity_bytes as f64 * 100.0
        };
        let used_mb = round2(used_bytes as f64 / BYTES_PER_MB as f64);
        let total_mb = round2(total_capacity_bytes as f64 / BYTES_PER_MB as f64);

        Self {
            used_bytes,
            total_capacity_bytes,
            percentage_used,
            used_mb,
            available_mb: round2(total_mb - used_mb),
            total_mb,
            percentage: round2(percentage_used),
        }
    }
}

/// Aggregate statistics across all records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreStats {
    /// Number of live records
    pub total_files: u64,
    /// Total payload size in MiB, two decimals
    pub total_size_mb: f64,
    /// Mean payload size in KiB, two decimals
    pub avg_size_kb: f64,
    /// Most recent upload time
    pub last_upload: Option<DateTime<Utc>>,
}

impl From<StoreTotals> for StoreStats {
    fn from(totals: StoreTotals) -> Self {
        let avg_size_kb = if totals.record_count == 0 {
            0.0
        } else {
            round2(totals.total_bytes as f64 / totals.record_count as f64 / BYTES_PER_KB as f64)
        };
        Self {
            total_files: totals.record_count,
            total_size_mb: round2(totals.total_bytes as f64 / BYTES_PER_MB as f64),
            avg_size_kb,
            last_upload: totals.last_created_at,
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
