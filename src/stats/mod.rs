pub mod provider;
pub mod sportsdb;

pub use provider::StatsProvider;
pub use sportsdb::TheSportsDB;
