/// Trivia served by `GET /api/facts`.
pub const LEAGUE_FACTS: [&str; 6] = [
    "La Liga was founded in 1929",
    "Real Madrid holds the record for most titles (35)",
    "The El Clásico (Real Madrid vs Barcelona) is the most watched club match in the world",
    "Only 9 teams have never been relegated from La Liga",
    "The fastest goal in La Liga history was scored in 7.42 seconds by Joseba Llorente in 2008",
    "Lionel Messi holds the record for most goals in a single season (50 goals in 2011-12)",
];
