//! Request bodies as received, and their validation into typed requests.
//!
//! Fields are read as raw JSON so that a missing or wrong-typed field turns
//! into `InvalidInput` naming the field, instead of a generic decode error.
//! Numbers may arrive as JSON numbers or numeric strings, under the same
//! rules for both.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{ApiError, ApiResult};
use crate::models::{integral_value, MatchRequest};

/// `POST /api/predict` body
#[derive(Debug, Default, Deserialize)]
pub struct PredictPayload {
    pub team_a: Option<Value>,
    pub team_b: Option<Value>,
    pub hour: Option<Value>,
    pub day_code: Option<Value>,
}

impl PredictPayload {
    pub fn validate(self) -> ApiResult<MatchRequest> {
        Ok(MatchRequest {
            team_a: required_team("team_a", self.team_a)?,
            team_b: required_team("team_b", self.team_b)?,
            hour: required_int("hour", self.hour)?,
            day_code: required_int("day_code", self.day_code)?,
        })
    }
}

/// `POST /api/odds` body
#[derive(Debug, Default, Deserialize)]
pub struct OddsPayload {
    pub stake: Option<Value>,
    pub odds: Option<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OddsRequest {
    pub stake: f64,
    pub odds: f64,
}

impl OddsPayload {
    pub fn validate(self) -> ApiResult<OddsRequest> {
        Ok(OddsRequest {
            stake: required_float("stake", self.stake)?,
            odds: required_float("odds", self.odds)?,
        })
    }
}

fn missing(field: &str) -> ApiError {
    ApiError::InvalidInput(format!("`{}` is required", field))
}

fn required_team(field: &str, value: Option<Value>) -> ApiResult<String> {
    match value.ok_or_else(|| missing(field))? {
        Value::String(s) if !s.trim().is_empty() => Ok(s),
        other => Err(ApiError::InvalidInput(format!(
            "`{}` must be a team name, got {}",
            field, other
        ))),
    }
}

fn required_int(field: &str, value: Option<Value>) -> ApiResult<i64> {
    let value = value.ok_or_else(|| missing(field))?;
    integral_value(&value).ok_or_else(|| {
        ApiError::InvalidInput(format!("`{}` must be an integer, got {}", field, value))
    })
}

fn required_float(field: &str, value: Option<Value>) -> ApiResult<f64> {
    let value = value.ok_or_else(|| missing(field))?;
    let parsed = match &value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    parsed.filter(|f: &f64| f.is_finite()).ok_or_else(|| {
        ApiError::InvalidInput(format!("`{}` must be a number, got {}", field, value))
    })
}
