use std::sync::Arc;
use tracing::{debug, info};

use super::features::{build_features, VENUE_HOME};
use super::model::OutcomeClassifier;
use super::team_codes::build_code_mapping;
use crate::error::{ApiError, ApiResult};
use crate::models::{MatchRequest, PredictionResult, Roster};
use crate::stats::StatsProvider;

/// Turns a match-up request into outcome probabilities.
///
/// Holds no per-request state: the roster and team codes are rebuilt from a
/// fresh fetch on every call.
#[derive(Clone)]
pub struct Predictor {
    stats: Arc<dyn StatsProvider>,
    classifier: Arc<dyn OutcomeClassifier>,
    league: String,
}

impl Predictor {
    pub fn new(
        stats: Arc<dyn StatsProvider>,
        classifier: Arc<dyn OutcomeClassifier>,
        league: &str,
    ) -> Self {
        Predictor {
            stats,
            classifier,
            league: league.to_string(),
        }
    }

    /// Predict `team_a` (at home) against `team_b`.
    ///
    /// Both teams must be in the current roster; that is checked before any
    /// statistics are requested. Only team A's statistics feed the model.
    pub async fn predict(&self, req: &MatchRequest) -> ApiResult<PredictionResult> {
        let roster = self.stats.fetch_roster().await?;

        let codes = build_code_mapping(&roster);
        debug!("Built team codes for {} teams", codes.len());

        let (team_a_id, opp_code) = match (roster.team_id(&req.team_a), codes.code(&req.team_b)) {
            (Some(id), Some(code)) => (id, code),
            _ => return Err(self.not_in_league(&roster, req)),
        };

        let stats = self.stats.fetch_team_stats(team_a_id).await?;
        let features = build_features(VENUE_HOME, opp_code, req.hour, req.day_code, &stats);
        debug!("Features for {} vs {}: {:?}", req.team_a, req.team_b, features.named());

        let proba = self.classifier.predict_proba(&features)?;
        if proba.iter().any(|p| !(0.0..=1.0).contains(p)) {
            return Err(ApiError::Model(format!(
                "{} returned probabilities outside [0, 1]: {:?}",
                self.classifier.name(),
                proba
            )));
        }
        let [win_a, win_b, draw] = proba;
        info!(
            "Predicted {} vs {} ({}): A {:.3}, B {:.3}, draw {:.3}",
            req.team_a,
            req.team_b,
            self.classifier.name(),
            win_a,
            win_b,
            draw
        );
        Ok(PredictionResult { win_a, win_b, draw })
    }

    fn not_in_league(&self, roster: &Roster, req: &MatchRequest) -> ApiError {
        let mut teams = Vec::new();
        for team in [&req.team_a, &req.team_b] {
            if !roster.contains(team) && !teams.contains(team) {
                teams.push(team.clone());
            }
        }
        ApiError::TeamNotInLeague {
            teams,
            league: self.league.clone(),
        }
    }
}
