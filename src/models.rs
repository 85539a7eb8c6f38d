use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

/// Teams currently tracked for the league: display name -> provider team ID.
///
/// The upstream directory returns teams in no guaranteed order, so nothing
/// here depends on insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    teams: HashMap<String, String>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a team. A repeated name keeps the last ID seen.
    pub fn insert(&mut self, name: impl Into<String>, team_id: impl Into<String>) {
        self.teams.insert(name.into(), team_id.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.teams.contains_key(name)
    }

    pub fn team_id(&self, name: &str) -> Option<&str> {
        self.teams.get(name).map(String::as_str)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.teams.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}

impl<N: Into<String>, I: Into<String>> FromIterator<(N, I)> for Roster {
    fn from_iter<T: IntoIterator<Item = (N, I)>>(iter: T) -> Self {
        let mut roster = Roster::new();
        for (name, id) in iter {
            roster.insert(name, id);
        }
        roster
    }
}

/// Season aggregates for one team. Fields the provider omits stay at zero;
/// counts are never negative.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TeamStats {
    pub goals_scored: i64,
    pub goals_conceded: i64,
    pub shots: i64,
    pub shots_on_target: i64,
    /// Average shot distance (yards)
    pub average_distance: f64,
    pub free_kicks: i64,
    pub penalties_scored: i64,
    pub penalties_attempted: i64,
}

/// Read an integer from a JSON number or numeric string. Integral floats
/// (`20.0`, `"20.0"`) are accepted in both forms; values outside the `i64`
/// range are not.
pub fn integral_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(exact_i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(exact_i64))
        }
        _ => None,
    }
}

fn exact_i64(f: f64) -> Option<i64> {
    // 2^63 is exact as an f64; i64::MAX is not.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    (f.fract() == 0.0 && (-LIMIT..LIMIT).contains(&f)).then_some(f as i64)
}

/// A scheduled or played match as reported by the fixtures source.
#[derive(Debug, Clone, PartialEq)]
pub struct Fixture {
    pub home_team: String,
    pub away_team: String,
    pub kickoff: DateTime<Utc>,
    /// True once the match has a final result
    pub is_result: bool,
}

/// Response row for `GET /api/upcoming-matches`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpcomingMatch {
    pub home_team: String,
    pub away_team: String,
    pub date: DateTime<Utc>,
}

impl From<Fixture> for UpcomingMatch {
    fn from(f: Fixture) -> Self {
        UpcomingMatch {
            home_team: f.home_team,
            away_team: f.away_team,
            date: f.kickoff,
        }
    }
}

/// A validated prediction request. Team A is always treated as the home side.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchRequest {
    pub team_a: String,
    pub team_b: String,
    pub hour: i64,
    pub day_code: i64,
}

/// Outcome probabilities in the classifier's trained class order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionResult {
    pub win_a: f64,
    pub win_b: f64,
    pub draw: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_roster_last_id_wins() {
        let roster: Roster = [("Sevilla", "133739"), ("Sevilla", "999")]
            .into_iter()
            .collect();
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.team_id("Sevilla"), Some("999"));
        assert!(!roster.contains("sevilla"));
    }

    #[test]
    fn test_upcoming_match_serializes_iso_date() {
        let m = UpcomingMatch::from(Fixture {
            home_team: "Girona".into(),
            away_team: "Valencia".into(),
            kickoff: Utc.with_ymd_and_hms(2025, 8, 15, 19, 0, 0).unwrap(),
            is_result: false,
        });
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["home_team"], "Girona");
        assert_eq!(json["away_team"], "Valencia");
        assert_eq!(json["date"], "2025-08-15T19:00:00Z");
    }
}
