use async_trait::async_trait;

use crate::error::ApiResult;
use crate::models::{Roster, TeamStats};

/// Source of the league roster and per-team season statistics.
///
/// Every call is one outbound request; implementations never cache.
#[async_trait]
pub trait StatsProvider: Send + Sync {
    /// Current teams in the tracked league.
    async fn fetch_roster(&self) -> ApiResult<Roster>;

    /// Season aggregates for the team with the given provider ID.
    async fn fetch_team_stats(&self, team_id: &str) -> ApiResult<TeamStats>;

    /// Human-readable name for logging.
    fn name(&self) -> &str;
}
