use std::collections::BTreeMap;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::call::{CallOutcome, CallRecord, Sentiment};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DashboardMetrics {
    pub total_calls: usize,
    pub total_booked: usize,
    /// Percent of calls that ended booked, 0.0 when there are no calls.
    pub conversion_rate: f64,
    /// `None` when no booked call carries both rates; a real 0% discount is `Some(0.0)`.
    pub avg_discount_percent: Option<f64>,
    pub outcomes_breakdown: BTreeMap<CallOutcome, usize>,
    pub sentiment_breakdown: BTreeMap<Sentiment, usize>,
}

/// Rebuilds the dashboard from a full ledger snapshot.
pub fn compute(records: &[CallRecord]) -> DashboardMetrics {
    let total_calls = records.len();
    let total_booked =
        records.iter().filter(|record| record.outcome == CallOutcome::Booked).count();
    let conversion_rate = if total_calls > 0 {
        total_booked as f64 / total_calls as f64 * 100.0
    } else {
        0.0
    };

    let discounts: Vec<f64> = records.iter().filter_map(booked_discount_percent).collect();

    let mut outcomes_breakdown = BTreeMap::new();
    let mut sentiment_breakdown = BTreeMap::new();
    for record in records {
        *outcomes_breakdown.entry(record.outcome).or_insert(0) += 1;
        *sentiment_breakdown.entry(record.sentiment).or_insert(0) += 1;
    }

    DashboardMetrics {
        total_calls,
        total_booked,
        conversion_rate,
        avg_discount_percent: mean(&discounts),
        outcomes_breakdown,
        sentiment_breakdown,
    }
}

fn booked_discount_percent(record: &CallRecord) -> Option<f64> {
    if record.outcome != CallOutcome::Booked {
        return None;
    }
    let listed = record.listed_rate?;
    let agreed = record.agreed_rate?;
    if listed <= Decimal::ZERO {
        return None;
    }

    let exact = listed
        .checked_sub(agreed)
        .and_then(|gap| gap.checked_div(listed))
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED));
    match exact {
        Some(percent) => percent.to_f64(),
        // Out of Decimal range; f64 has the headroom for any pair of Decimal rates.
        None => {
            let listed = listed.to_f64()?;
            let agreed = agreed.to_f64()?;
            Some((listed - agreed) / listed * 100.0)
        }
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}
