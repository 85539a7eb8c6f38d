use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use super::FixtureProvider;
use crate::error::{ApiError, ApiResult};
use crate::models::Fixture;

const DEFAULT_BASE_URL: &str = "https://understat.com";
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Season fixtures from understat.com's league data endpoint.
pub struct Understat {
    http: Client,
    base_url: Url,
    /// understat league slug, e.g. "La_Liga"
    league: String,
    /// Season start year, e.g. "2025" for 2025/26
    season: String,
}

impl Understat {
    pub fn new(base_url: Option<&str>, league: &str, season: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        let base = base_url.unwrap_or(DEFAULT_BASE_URL);
        let base_url =
            Url::parse(base).with_context(|| format!("Invalid understat base URL: {}", base))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("understat base URL cannot carry a path: {}", base);
        }
        Ok(Understat {
            http,
            base_url,
            league: league.to_string(),
            season: season.to_string(),
        })
    }

    /// `{base}/getLeagueData/{league}/{season}`
    fn league_data_url(&self) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push("getLeagueData")
                .push(&self.league)
                .push(&self.season);
        }
        url
    }
}

#[async_trait]
impl FixtureProvider for Understat {
    fn name(&self) -> &str {
        "understat"
    }

    async fn fetch_fixtures(&self) -> ApiResult<Vec<Fixture>> {
        let url = self.league_data_url();
        debug!("Fetching {} {} fixtures from {}", self.league, self.season, url);

        let resp = self
            .http
            .get(url)
            // The endpoint only answers AJAX-style requests.
            .header("X-Requested-With", "XMLHttpRequest")
            .send()
            .await
            .map_err(|e| ApiError::unavailable(self.name(), format!("fixtures request failed: {}", e)))?;

        if !resp.status().is_success() {
            return Err(ApiError::unavailable(
                self.name(),
                format!("failed to fetch {} fixtures: HTTP {}", self.league, resp.status()),
            ));
        }

        let raw: Value = resp
            .json()
            .await
            .map_err(|e| ApiError::UpstreamMalformed(format!("fixtures body is not JSON: {}", e)))?;

        let fixtures = parse_league_dates(&raw)?;
        info!(
            "Fetched {} fixtures for {} {}",
            fixtures.len(),
            self.league,
            self.season
        );
        Ok(fixtures)
    }
}

fn parse_league_dates(raw: &Value) -> ApiResult<Vec<Fixture>> {
    let dates = raw["dates"].as_array().ok_or_else(|| {
        ApiError::UpstreamMalformed("league data has no `dates` array".to_string())
    })?;
    dates.iter().map(parse_fixture).collect()
}

fn parse_fixture(entry: &Value) -> ApiResult<Fixture> {
    let id = entry["id"].as_str().unwrap_or("?");
    let malformed = |what: &str| ApiError::UpstreamMalformed(format!("fixture {}: {}", id, what));

    let is_result = entry["isResult"]
        .as_bool()
        .ok_or_else(|| malformed("missing `isResult`"))?;
    let datetime = entry["datetime"]
        .as_str()
        .ok_or_else(|| malformed("missing `datetime`"))?;
    // understat publishes kickoff times in UTC without an offset.
    let kickoff = NaiveDateTime::parse_from_str(datetime, DATETIME_FORMAT)
        .map_err(|_| malformed(&format!("unparseable datetime '{}'", datetime)))?
        .and_utc();
    let home_team = entry["h"]["title"]
        .as_str()
        .ok_or_else(|| malformed("missing home team"))?;
    let away_team = entry["a"]["title"]
        .as_str()
        .ok_or_else(|| malformed("missing away team"))?;

    Ok(Fixture {
        home_team: home_team.to_string(),
        away_team: away_team.to_string(),
        kickoff,
        is_result,
    })
}
