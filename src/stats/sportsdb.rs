use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use super::provider::StatsProvider;
use crate::error::{ApiError, ApiResult};
use crate::models::{integral_value, Roster, TeamStats};

const DEFAULT_BASE_URL: &str = "https://www.thesportsdb.com/api/v1/json";

/// Team directory and team lookup backed by TheSportsDB v1 API.
/// Docs: <https://www.thesportsdb.com/api.php>
pub struct TheSportsDB {
    http: Client,
    api_key: String,
    /// Base URL for overriding in tests
    base_url: Url,
    /// League name as TheSportsDB spells it, e.g. "Spanish La Liga"
    league: String,
}

impl TheSportsDB {
    pub fn new(
        api_key: Option<&str>,
        base_url: Option<&str>,
        league: &str,
        timeout: Duration,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        let base = base_url.unwrap_or(DEFAULT_BASE_URL);
        let base_url =
            Url::parse(base).with_context(|| format!("Invalid TheSportsDB base URL: {}", base))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("TheSportsDB base URL cannot carry a path: {}", base);
        }
        Ok(TheSportsDB {
            http,
            // "3" is TheSportsDB's public free-tier key
            api_key: api_key.unwrap_or("3").to_string(),
            base_url,
            league: league.to_string(),
        })
    }

    /// `{base}/{api_key}/{file}`
    fn endpoint(&self, file: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(&self.api_key).push(file);
        }
        url
    }

    async fn get_json(&self, url: Url, what: &str) -> ApiResult<Value> {
        debug!("Fetching {} from {}", what, url);

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::unavailable(self.name(), format!("{} request failed: {}", what, e)))?;

        if !resp.status().is_success() {
            return Err(ApiError::unavailable(
                self.name(),
                format!("failed to fetch {}: HTTP {}", what, resp.status()),
            ));
        }

        resp.json()
            .await
            .map_err(|e| ApiError::UpstreamMalformed(format!("{}: body is not JSON: {}", what, e)))
    }
}

#[async_trait]
impl StatsProvider for TheSportsDB {
    fn name(&self) -> &str {
        "TheSportsDB"
    }

    async fn fetch_roster(&self) -> ApiResult<Roster> {
        let mut url = self.endpoint("search_all_teams.php");
        url.query_pairs_mut().append_pair("l", &self.league);

        let raw = self.get_json(url, &format!("{} teams", self.league)).await?;
        let roster = parse_roster(&raw)?;
        info!("Fetched {} teams for {}", roster.len(), self.league);
        Ok(roster)
    }

    async fn fetch_team_stats(&self, team_id: &str) -> ApiResult<TeamStats> {
        let mut url = self.endpoint("lookupteam.php");
        url.query_pairs_mut().append_pair("id", team_id);

        let raw = self
            .get_json(url, &format!("stats for team ID {}", team_id))
            .await?;
        parse_team_stats(&raw, team_id)
    }
}

fn parse_roster(raw: &Value) -> ApiResult<Roster> {
    let teams = match raw.get("teams") {
        Some(Value::Array(teams)) => teams,
        // A league directory with no teams is never a valid answer.
        Some(Value::Null) => {
            return Err(ApiError::UpstreamMalformed(
                "roster response has `teams: null`".to_string(),
            ))
        }
        Some(_) => {
            return Err(ApiError::UpstreamMalformed(
                "`teams` is not an array".to_string(),
            ))
        }
        None => {
            return Err(ApiError::UpstreamMalformed(
                "roster response has no `teams` field".to_string(),
            ))
        }
    };

    let mut roster = Roster::new();
    for team in teams {
        let name = team["strTeam"].as_str().ok_or_else(|| {
            ApiError::UpstreamMalformed("roster entry without `strTeam`".to_string())
        })?;
        let team_id = match &team["idTeam"] {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            _ => {
                return Err(ApiError::UpstreamMalformed(format!(
                    "roster entry '{}' without `idTeam`",
                    name
                )))
            }
        };
        roster.insert(name, team_id);
    }
    Ok(roster)
}

fn parse_team_stats(raw: &Value, team_id: &str) -> ApiResult<TeamStats> {
    let teams = match raw.get("teams") {
        Some(Value::Array(teams)) => teams,
        Some(Value::Null) => return Err(ApiError::TeamNotFound(team_id.to_string())),
        Some(_) => {
            return Err(ApiError::UpstreamMalformed(format!(
                "`teams` for team ID {} is not an array",
                team_id
            )))
        }
        None => {
            return Err(ApiError::UpstreamMalformed(format!(
                "lookup for team ID {} has no `teams` field",
                team_id
            )))
        }
    };
    let team = teams
        .first()
        .ok_or_else(|| ApiError::TeamNotFound(team_id.to_string()))?;

    Ok(TeamStats {
        goals_scored: int_stat(team, "intGoalsScored")?,
        goals_conceded: int_stat(team, "intGoalsConceded")?,
        shots: int_stat(team, "intShots")?,
        shots_on_target: int_stat(team, "intShotsOnTarget")?,
        average_distance: float_stat(team, "strAverageDistance")?,
        free_kicks: int_stat(team, "intFreeKicks")?,
        penalties_scored: int_stat(team, "intPenaltiesScored")?,
        penalties_attempted: int_stat(team, "intPenaltiesAttempted")?,
    })
}

fn malformed_stat(key: &str, value: &Value) -> ApiError {
    ApiError::UpstreamMalformed(format!("`{}` is not numeric: {}", key, value))
}

/// Missing, null and blank fields read as 0. Anything else must parse as a
/// non-negative count.
fn int_stat(team: &Value, key: &str) -> ApiResult<i64> {
    let value = match team.get(key) {
        None | Some(Value::Null) => return Ok(0),
        Some(Value::String(s)) if s.trim().is_empty() => return Ok(0),
        Some(value) => value,
    };
    match integral_value(value) {
        Some(n) if n >= 0 => Ok(n),
        Some(_) => Err(ApiError::UpstreamMalformed(format!(
            "`{}` is a negative count: {}",
            key, value
        ))),
        None => Err(malformed_stat(key, value)),
    }
}

fn float_stat(team: &Value, key: &str) -> ApiResult<f64> {
    let value = match team.get(key) {
        None | Some(Value::Null) => return Ok(0.0),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) if s.trim().is_empty() => return Ok(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };
    value
        .filter(|f| f.is_finite())
        .ok_or_else(|| malformed_stat(key, &team[key]))
}
