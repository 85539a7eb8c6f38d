pub mod understat;

pub use understat::Understat;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::ApiResult;
use crate::models::{Fixture, UpcomingMatch};

/// Maximum number of fixtures `GET /api/upcoming-matches` returns.
pub const UPCOMING_LIMIT: usize = 5;

/// Source of the season's match schedule and result flags.
#[async_trait]
pub trait FixtureProvider: Send + Sync {
    /// Every fixture of the configured season, in the provider's order.
    async fn fetch_fixtures(&self) -> ApiResult<Vec<Fixture>>;

    /// Human-readable name for logging.
    fn name(&self) -> &str;
}

/// Unplayed fixtures kicking off strictly after `now`, in the order the
/// provider listed them, capped at `limit`.
pub fn select_upcoming(
    fixtures: Vec<Fixture>,
    now: DateTime<Utc>,
    limit: usize,
) -> Vec<UpcomingMatch> {
    fixtures
        .into_iter()
        .filter(|f| !f.is_result && f.kickoff > now)
        .take(limit)
        .map(UpcomingMatch::from)
        .collect()
}
