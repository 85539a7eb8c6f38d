//! Shared test doubles and helpers.

use async_trait::async_trait;
use axum::Router;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::error::{ApiError, ApiResult};
use crate::fixtures::FixtureProvider;
use crate::models::{Fixture, Roster, TeamStats};
use crate::predict::features::FeatureVector;
use crate::predict::model::{OutcomeClassifier, CLASS_COUNT};
use crate::stats::StatsProvider;

/// Serve `app` on an ephemeral local port and return its base URL.
pub async fn spawn_server(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

pub fn la_liga_roster() -> Roster {
    [
        ("Real Madrid", "133738"),
        ("Barcelona", "133739"),
        ("Atletico Madrid", "133729"),
        ("Sevilla", "133735"),
        ("Athletic Bilbao", "133727"),
    ]
    .into_iter()
    .collect()
}

/// In-memory stats source that records what it was asked for.
pub struct StubStats {
    roster: Option<Roster>,
    stats: HashMap<String, TeamStats>,
    roster_calls: AtomicUsize,
    stats_requests: Mutex<Vec<String>>,
}

impl StubStats {
    pub fn new(roster: Roster) -> Self {
        StubStats {
            roster: Some(roster),
            stats: HashMap::new(),
            roster_calls: AtomicUsize::new(0),
            stats_requests: Mutex::new(Vec::new()),
        }
    }

    /// Every roster fetch fails as if the directory were down.
    pub fn failing_roster() -> Self {
        StubStats {
            roster: None,
            ..StubStats::new(Roster::new())
        }
    }

    pub fn with_stats(mut self, team_id: &str, stats: TeamStats) -> Self {
        self.stats.insert(team_id.to_string(), stats);
        self
    }

    pub fn roster_calls(&self) -> usize {
        self.roster_calls.load(Ordering::SeqCst)
    }

    pub fn stats_requests(&self) -> Vec<String> {
        self.stats_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl StatsProvider for StubStats {
    async fn fetch_roster(&self) -> ApiResult<Roster> {
        self.roster_calls.fetch_add(1, Ordering::SeqCst);
        self.roster
            .clone()
            .ok_or_else(|| ApiError::unavailable(self.name(), "failed to fetch teams: HTTP 503"))
    }

    async fn fetch_team_stats(&self, team_id: &str) -> ApiResult<TeamStats> {
        self.stats_requests.lock().unwrap().push(team_id.to_string());
        self.stats
            .get(team_id)
            .cloned()
            .ok_or_else(|| ApiError::TeamNotFound(team_id.to_string()))
    }

    fn name(&self) -> &str {
        "stub-stats"
    }
}

/// Classifier that always answers the same probabilities and remembers the
/// last row it saw.
pub struct FixedClassifier {
    proba: [f64; CLASS_COUNT],
    last: Mutex<Option<FeatureVector>>,
}

impl FixedClassifier {
    pub fn new(proba: [f64; CLASS_COUNT]) -> Self {
        FixedClassifier {
            proba,
            last: Mutex::new(None),
        }
    }

    pub fn last_features(&self) -> Option<FeatureVector> {
        self.last.lock().unwrap().clone()
    }
}

impl OutcomeClassifier for FixedClassifier {
    fn predict_proba(&self, features: &FeatureVector) -> ApiResult<[f64; CLASS_COUNT]> {
        *self.last.lock().unwrap() = Some(features.clone());
        Ok(self.proba)
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

/// Fixture source serving a canned list, or failing when given none.
pub struct StubFixtures {
    fixtures: Option<Vec<Fixture>>,
}

impl StubFixtures {
    pub fn new(fixtures: Vec<Fixture>) -> Self {
        StubFixtures {
            fixtures: Some(fixtures),
        }
    }

    pub fn failing() -> Self {
        StubFixtures { fixtures: None }
    }
}

#[async_trait]
impl FixtureProvider for StubFixtures {
    async fn fetch_fixtures(&self) -> ApiResult<Vec<Fixture>> {
        self.fixtures
            .clone()
            .ok_or_else(|| ApiError::unavailable(self.name(), "HTTP 502"))
    }

    fn name(&self) -> &str {
        "stub-fixtures"
    }
}
