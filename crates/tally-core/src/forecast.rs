//! Forward projection of a fitted trend

use chrono::Days;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use crate::error::{Error, Result};
use crate::models::{DailyTotal, ForecastPoint};
use crate::trend::TrendModel;

/// Project `horizon_days` calendar days past the last observed date
///
/// Predictions are clamped at zero and rounded to cents. `daily` must be the
/// sorted series the model was fitted on.
pub fn forecast(
    daily: &[DailyTotal],
    model: &TrendModel,
    horizon_days: u32,
) -> Result<Vec<ForecastPoint>> {
    if horizon_days == 0 {
        return Err(Error::InvalidHorizon(horizon_days));
    }
    let last = daily.last().ok_or(Error::NoData)?;
    if last
        .date
        .checked_add_days(Days::new(u64::from(horizon_days)))
        .is_none()
    {
        return Err(Error::OutOfRange(format!(
            "{} + {} days",
            last.date, horizon_days
        )));
    }

    (1..=horizon_days)
        .map(|i| {
            let date = last
                .date
                .checked_add_days(Days::new(u64::from(i)))
                .ok_or_else(|| {
                    Error::OutOfRange(format!("{} + {} days", last.date, i))
                })?;

            let raw = model.predict(last.day_index + i64::from(i));
            // Also catches NaN and negative zero
            let clamped = if raw > 0.0 { raw } else { 0.0 };
            let predicted_amount = Decimal::from_f64(clamped)
                .ok_or_else(|| Error::OutOfRange(format!("predicted amount {}", raw)))?
                .round_dp(2);

            Ok(ForecastPoint {
                date,
                predicted_amount,
            })
        })
        .collect()
}
