//! Linear trend over daily totals
//!
//! Ordinary least squares with the day index as the only feature. The fit
//! runs in `f64`; amounts are exact decimals everywhere else.

use std::collections::BTreeSet;

use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::DailyTotal;

/// Fitted line: `amount = slope * day_index + intercept`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendModel {
    pub slope: f64,
    pub intercept: f64,
}

impl TrendModel {
    /// Fit a least-squares line through (day_index, amount) pairs
    ///
    /// Fails with [`Error::InsufficientData`] unless at least two distinct
    /// day indices are present. The result does not depend on input order.
    pub fn fit(daily: &[DailyTotal]) -> Result<Self> {
        let distinct_days = daily
            .iter()
            .map(|d| d.day_index)
            .collect::<BTreeSet<_>>()
            .len();
        if distinct_days < 2 {
            return Err(Error::InsufficientData {
                days: distinct_days,
            });
        }

        let mut points = daily
            .iter()
            .map(|d| {
                let y = d.amount.to_f64().ok_or_else(|| {
                    Error::OutOfRange(format!("amount {} on {}", d.amount, d.date))
                })?;
                Ok((d.day_index as f64, y))
            })
            .collect::<Result<Vec<(f64, f64)>>>()?;

        // Fixed summation order keeps the fit bit-for-bit stable
        points.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));

        let n = points.len() as f64;
        let mean_x = points.iter().map(|p| p.0).sum::<f64>() / n;
        let mean_y = points.iter().map(|p| p.1).sum::<f64>() / n;

        let (sxy, sxx) = points.iter().fold((0.0, 0.0), |(sxy, sxx), (x, y)| {
            let dx = x - mean_x;
            (sxy + dx * (y - mean_y), sxx + dx * dx)
        });

        // sxx > 0 because there are at least two distinct x values
        let slope = sxy / sxx;
        let intercept = mean_y - slope * mean_x;

        debug!(
            "Fitted trend over {} days: slope={:.4}, intercept={:.4}",
            points.len(),
            slope,
            intercept
        );
        Ok(Self { slope, intercept })
    }

    /// Raw (unclamped) prediction for a day index
    pub fn predict(&self, day_index: i64) -> f64 {
        self.slope * day_index as f64 + self.intercept
    }
}
