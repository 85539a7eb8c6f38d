use serde::Serialize;

use crate::models::TeamStats;

pub const FEATURE_COUNT: usize = 13;

/// Column order the classifier was trained on. Changing it silently corrupts
/// every prediction.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "venue_code",
    "opp_code",
    "hour",
    "day_code",
    "goal_diff_rolling",
    "gf_rolling",
    "ga_rolling",
    "sh_rolling",
    "sot_rolling",
    "dist_rolling",
    "fk_rolling",
    "pk_rolling",
    "pkatt_rolling",
];

/// Venue code for "the team whose stats are used plays at home".
pub const VENUE_HOME: i64 = 1;

/// One classifier input row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureVector {
    pub venue_code: i64,
    pub opp_code: i64,
    pub hour: i64,
    pub day_code: i64,
    pub goal_diff_rolling: i64,
    pub gf_rolling: i64,
    pub ga_rolling: i64,
    pub sh_rolling: i64,
    pub sot_rolling: i64,
    pub dist_rolling: f64,
    pub fk_rolling: i64,
    pub pk_rolling: i64,
    pub pkatt_rolling: i64,
}

impl FeatureVector {
    /// Values in `FEATURE_NAMES` order.
    pub fn to_row(&self) -> [f64; FEATURE_COUNT] {
        [
            self.venue_code as f64,
            self.opp_code as f64,
            self.hour as f64,
            self.day_code as f64,
            self.goal_diff_rolling as f64,
            self.gf_rolling as f64,
            self.ga_rolling as f64,
            self.sh_rolling as f64,
            self.sot_rolling as f64,
            self.dist_rolling,
            self.fk_rolling as f64,
            self.pk_rolling as f64,
            self.pkatt_rolling as f64,
        ]
    }

    pub fn named(&self) -> [(&'static str, f64); FEATURE_COUNT] {
        let row = self.to_row();
        std::array::from_fn(|i| (FEATURE_NAMES[i], row[i]))
    }
}

/// Assemble the input row. Only the stats-bearing team's snapshot feeds the
/// rolling columns; `hour` and `day_code` pass through unvalidated.
pub fn build_features(
    venue_code: i64,
    opp_code: u32,
    hour: i64,
    day_code: i64,
    stats: &TeamStats,
) -> FeatureVector {
    FeatureVector {
        venue_code,
        opp_code: i64::from(opp_code),
        hour,
        day_code,
        goal_diff_rolling: stats.goals_scored - stats.goals_conceded,
        gf_rolling: stats.goals_scored,
        ga_rolling: stats.goals_conceded,
        sh_rolling: stats.shots,
        sot_rolling: stats.shots_on_target,
        dist_rolling: stats.average_distance,
        fk_rolling: stats.free_kicks,
        pk_rolling: stats.penalties_scored,
        pkatt_rolling: stats.penalties_attempted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> TeamStats {
        TeamStats {
            goals_scored: 80,
            goals_conceded: 20,
            shots: 500,
            shots_on_target: 200,
            average_distance: 16.5,
            free_kicks: 12,
            penalties_scored: 7,
            penalties_attempted: 9,
        }
    }

    #[test]
    fn test_row_order() {
        let f = build_features(VENUE_HOME, 3, 21, 5, &stats());
        assert_eq!(
            f.to_row(),
            [1.0, 3.0, 21.0, 5.0, 60.0, 80.0, 20.0, 500.0, 200.0, 16.5, 12.0, 7.0, 9.0]
        );
    }

    #[test]
    fn test_named_columns_match_training_order() {
        let f = build_features(VENUE_HOME, 3, 21, 5, &stats());
        let names: Vec<&str> = f.named().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, FEATURE_NAMES);
        assert_eq!(f.named()[1], ("opp_code", 3.0));
        assert_eq!(f.named()[9], ("dist_rolling", 16.5));
    }

    #[test]
    fn test_goal_diff_exact_and_unclamped() {
        let mut s = stats();
        s.goals_scored = 12;
        s.goals_conceded = 47;
        let f = build_features(VENUE_HOME, 1, 18, 0, &s);
        assert_eq!(f.goal_diff_rolling, -35);
    }

    #[test]
    fn test_hour_and_day_pass_through_unvalidated() {
        let f = build_features(VENUE_HOME, 1, 99, -4, &TeamStats::default());
        assert_eq!(f.hour, 99);
        assert_eq!(f.day_code, -4);
        assert_eq!(f.goal_diff_rolling, 0);
        assert_eq!(f.dist_rolling, 0.0);
    }
}
