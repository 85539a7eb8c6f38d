//! Integer codes for opponents, derived from the roster.
//!
//! Codes are ranks of the alphabetically sorted team names, starting at 1.
//! They are rebuilt from every fresh roster, so a team joining or leaving the
//! league shifts the codes of the teams that sort after it.

use std::collections::HashMap;

use crate::models::Roster;

/// Team name -> opponent code (1..=N).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamCodes {
    codes: HashMap<String, u32>,
}

impl TeamCodes {
    pub fn code(&self, team: &str) -> Option<u32> {
        self.codes.get(team).copied()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

/// Rank every roster team by plain (case-sensitive) string order.
pub fn build_code_mapping(roster: &Roster) -> TeamCodes {
    let mut names: Vec<&str> = roster.names().collect();
    names.sort_unstable();

    let codes = names
        .into_iter()
        .zip(1u32..)
        .map(|(name, code)| (name.to_string(), code))
        .collect();
    TeamCodes { codes }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEAMS: [(&str, &str); 5] = [
        ("Real Madrid", "133738"),
        ("Barcelona", "133739"),
        ("Atletico Madrid", "133729"),
        ("Sevilla", "133735"),
        ("Athletic Bilbao", "133727"),
    ];

    #[test]
    fn test_codes_follow_alphabetical_rank() {
        let codes = build_code_mapping(&TEAMS.into_iter().collect());
        assert_eq!(codes.code("Athletic Bilbao"), Some(1));
        assert_eq!(codes.code("Atletico Madrid"), Some(2));
        assert_eq!(codes.code("Barcelona"), Some(3));
        assert_eq!(codes.code("Real Madrid"), Some(4));
        assert_eq!(codes.code("Sevilla"), Some(5));
        assert_eq!(codes.code("Girona"), None);
    }

    #[test]
    fn test_codes_unique_and_in_range() {
        let codes = build_code_mapping(&TEAMS.into_iter().collect());
        let mut seen: Vec<u32> = TEAMS
            .iter()
            .map(|(name, _)| codes.code(name).unwrap())
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_insertion_order_does_not_matter() {
        let forward: Roster = TEAMS.into_iter().collect();
        let reversed: Roster = TEAMS.into_iter().rev().collect();
        assert_eq!(build_code_mapping(&forward), build_code_mapping(&reversed));
    }

    #[test]
    fn test_case_sensitive_ordering() {
        // Uppercase sorts before lowercase in plain string order.
        let roster: Roster = [("alaves", "1"), ("Zaragoza", "2")].into_iter().collect();
        let codes = build_code_mapping(&roster);
        assert_eq!(codes.code("Zaragoza"), Some(1));
        assert_eq!(codes.code("alaves"), Some(2));
    }

    #[test]
    fn test_membership_change_shifts_codes() {
        let before = build_code_mapping(&TEAMS.into_iter().collect());
        let mut grown: Roster = TEAMS.into_iter().collect();
        grown.insert("Alaves", "134221");
        let after = build_code_mapping(&grown);
        assert_eq!(after.code("Alaves"), Some(1));
        assert_eq!(after.code("Sevilla"), Some(6));
        assert_ne!(before.code("Sevilla"), after.code("Sevilla"));
    }

    #[test]
    fn test_empty_roster() {
        assert!(build_code_mapping(&Roster::new()).is_empty());
    }
}
