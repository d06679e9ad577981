//! Report engine — aggregates an accumulated transaction set.
//!
//! Everything is computed in one pass structure-by-structure and
//! returned atomically. An empty transaction list is an explicit
//! error, never a report full of zero-divisions.

use crate::{
    error::{SimError, SimResult},
    transaction::{round_cents, Transaction},
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_transactions: usize,
    pub fraudulent_transactions: usize,
    pub normal_transactions: usize,
    pub fraud_rate: f64,
    pub total_amount: f64,
    pub fraud_amount: f64,
    pub fraud_amount_percentage: f64,
    pub average_risk_score: f64,
    pub unique_users: usize,
    pub unique_merchants: usize,
    pub unique_devices: usize,
    pub unique_locations: usize,
}

/// Count and cent-rounded volume for one fraud pattern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternStats {
    pub count: usize,
    pub amount: f64,
}

/// Per-city or per-payment-method rollup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentStats {
    pub total_transactions: usize,
    pub fraud_transactions: usize,
    pub fraud_rate: f64,
    pub total_amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimReport {
    pub summary: ReportSummary,
    pub pattern_analysis: BTreeMap<String, PatternStats>,
    pub location_analysis: BTreeMap<String, SegmentStats>,
    pub payment_method_analysis: BTreeMap<String, SegmentStats>,
    /// The most recent 100 transactions, in generation order.
    pub transactions: Vec<Transaction>,
}

impl SimReport {
    pub fn generate(transactions: &[Transaction]) -> SimResult<SimReport> {
        if transactions.is_empty() {
            return Err(SimError::NoTransactions);
        }

        let total = transactions.len();
        let fraud_count = transactions
            .iter()
            .filter(|t| t.fraud_pattern.is_some())
            .count();

        let total_amount: f64 = transactions.iter().map(|t| t.amount).sum();
        let fraud_amount: f64 = transactions
            .iter()
            .filter(|t| t.fraud_pattern.is_some())
            .map(|t| t.amount)
            .sum();

        let scored: Vec<f64> = transactions.iter().filter_map(|t| t.risk_score).collect();
        let average_risk_score = if scored.is_empty() {
            0.0
        } else {
            round3(scored.iter().sum::<f64>() / scored.len() as f64)
        };

        let unique_users: HashSet<&str> =
            transactions.iter().map(|t| t.user_id.as_str()).collect();
        let unique_merchants: HashSet<&str> =
            transactions.iter().map(|t| t.merchant_id.as_str()).collect();
        let unique_devices: HashSet<&str> = transactions
            .iter()
            .map(|t| t.device_fingerprint.as_str())
            .collect();
        let unique_locations: HashSet<&str> =
            transactions.iter().map(|t| t.location.city.as_str()).collect();

        let summary = ReportSummary {
            total_transactions: total,
            fraudulent_transactions: fraud_count,
            normal_transactions: total - fraud_count,
            fraud_rate: fraud_count as f64 / total as f64,
            total_amount: round_cents(total_amount),
            fraud_amount: round_cents(fraud_amount),
            fraud_amount_percentage: if total_amount > 0.0 {
                fraud_amount / total_amount * 100.0
            } else {
                0.0
            },
            average_risk_score,
            unique_users: unique_users.len(),
            unique_merchants: unique_merchants.len(),
            unique_devices: unique_devices.len(),
            unique_locations: unique_locations.len(),
        };

        let mut pattern_analysis: BTreeMap<String, PatternStats> = BTreeMap::new();
        for t in transactions {
            if let Some(pattern) = t.fraud_pattern {
                let entry = pattern_analysis
                    .entry(pattern.as_str().to_string())
                    .or_insert(PatternStats {
                        count: 0,
                        amount: 0.0,
                    });
                entry.count += 1;
                entry.amount += t.amount;
            }
        }
        for stats in pattern_analysis.values_mut() {
            stats.amount = round_cents(stats.amount);
        }

        let location_analysis =
            segment_stats(transactions, |t| t.location.city.clone());
        let payment_method_analysis =
            segment_stats(transactions, |t| t.payment_method.as_str().to_string());

        let tail_start = total.saturating_sub(100);
        let recent = transactions[tail_start..].to_vec();

        Ok(SimReport {
            summary,
            pattern_analysis,
            location_analysis,
            payment_method_analysis,
            transactions: recent,
        })
    }
}

/// Group transactions by a key and roll up totals. Keys only exist
/// where transactions exist, so fraud_rate is always an exact
/// division by a positive count.
fn segment_stats<F>(transactions: &[Transaction], key: F) -> BTreeMap<String, SegmentStats>
where
    F: Fn(&Transaction) -> String,
{
    let mut raw: BTreeMap<String, (usize, usize, f64)> = BTreeMap::new();
    for t in transactions {
        let entry = raw.entry(key(t)).or_insert((0, 0, 0.0));
        entry.0 += 1;
        if t.fraud_pattern.is_some() {
            entry.1 += 1;
        }
        entry.2 += t.amount;
    }

    raw.into_iter()
        .map(|(k, (total, fraud, amount))| {
            (
                k,
                SegmentStats {
                    total_transactions: total,
                    fraud_transactions: fraud,
                    fraud_rate: fraud as f64 / total as f64,
                    total_amount: round_cents(amount),
                },
            )
        })
        .collect()
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}
