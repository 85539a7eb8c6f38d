pub mod facts;
pub mod request;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::fixtures::{select_upcoming, FixtureProvider, UPCOMING_LIMIT};
use crate::models::{PredictionResult, UpcomingMatch};
use crate::odds::{american_payout, Payout};
use crate::predict::Predictor;
use facts::LEAGUE_FACTS;
use request::{OddsPayload, PredictPayload};

#[derive(Clone)]
pub struct AppState {
    pub predictor: Predictor,
    pub fixtures: Arc<dyn FixtureProvider>,
}

/// Build the Axum router for the API.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/upcoming-matches", get(upcoming_matches_handler))
        .route("/api/predict", post(predict_handler))
        .route("/api/odds", post(odds_handler))
        .route("/api/facts", get(facts_handler))
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

fn invalid_body(rejection: JsonRejection) -> ApiError {
    ApiError::InvalidInput(rejection.body_text())
}

/// GET /
async fn index_handler() -> &'static str {
    "La Liga prediction API is running!"
}

/// GET /api/upcoming-matches
async fn upcoming_matches_handler(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<UpcomingMatch>>> {
    let fixtures = state.fixtures.fetch_fixtures().await?;
    let upcoming = select_upcoming(fixtures, Utc::now(), UPCOMING_LIMIT);
    info!(
        "Serving {} upcoming matches from {}",
        upcoming.len(),
        state.fixtures.name()
    );
    Ok(Json(upcoming))
}

/// POST /api/predict
async fn predict_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PredictPayload>, JsonRejection>,
) -> ApiResult<Json<PredictionResult>> {
    let Json(payload) = payload.map_err(invalid_body)?;
    let req = payload.validate()?;
    state.predictor.predict(&req).await.map(Json)
}

/// POST /api/odds
async fn odds_handler(payload: Result<Json<OddsPayload>, JsonRejection>) -> ApiResult<Json<Payout>> {
    let Json(payload) = payload.map_err(invalid_body)?;
    let req = payload.validate()?;
    american_payout(req.stake, req.odds).map(Json)
}

/// GET /api/facts
async fn facts_handler() -> Json<[&'static str; 6]> {
    Json(LEAGUE_FACTS)
}
