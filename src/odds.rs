//! American-odds payout calculator.
//!
//! American (moneyline) odds quote a bet relative to 100 units:
//!   +150 → a 100 stake wins 150
//!   −150 → a 150 stake wins 100
//!
//! So for a stake `s`:
//!   odds > 0:  profit = s · odds / 100
//!   odds < 0:  profit = s · 100 / |odds|
//! and the total returned on a win is `payout = profit + s`.

use serde::Serialize;

use crate::error::{ApiError, ApiResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Payout {
    pub profit: f64,
    pub payout: f64,
}

/// Profit and total payout of a winning bet.
///
/// # Errors
/// `InvalidInput` when the stake is negative or either value is not finite,
/// and for odds of exactly 0, which no American line can take.
pub fn american_payout(stake: f64, odds: f64) -> ApiResult<Payout> {
    if !stake.is_finite() || stake < 0.0 {
        return Err(ApiError::InvalidInput(format!(
            "stake must be a non-negative number, got {}",
            stake
        )));
    }
    if !odds.is_finite() || odds == 0.0 {
        return Err(ApiError::InvalidInput(format!(
            "odds must be a non-zero number, got {}",
            odds
        )));
    }

    let profit = if odds > 0.0 {
        stake * (odds / 100.0)
    } else {
        stake * (100.0 / odds.abs())
    };
    Ok(Payout {
        profit,
        payout: profit + stake,
    })
}
