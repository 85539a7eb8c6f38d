use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;

/// La Liga match prediction API
#[derive(Parser, Debug, Clone)]
#[command(name = "laliga-predictor", version, about)]
pub struct Config {
    /// API listen address
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:5000")]
    pub listen_addr: String,

    /// TheSportsDB API base URL
    #[arg(
        long,
        env = "SPORTSDB_API_URL",
        default_value = "https://www.thesportsdb.com/api/v1/json"
    )]
    pub sportsdb_api_url: String,

    /// TheSportsDB API key (free tier key is used when unset)
    #[arg(long, env = "SPORTSDB_API_KEY")]
    pub sportsdb_api_key: Option<String>,

    /// League name as listed by TheSportsDB
    #[arg(long, env = "LEAGUE", default_value = "Spanish La Liga")]
    pub league: String,

    /// understat base URL
    #[arg(long, env = "UNDERSTAT_URL", default_value = "https://understat.com")]
    pub understat_url: String,

    /// understat league slug
    #[arg(long, env = "UNDERSTAT_LEAGUE", default_value = "La_Liga")]
    pub understat_league: String,

    /// Season start year (2025 = 2025/26)
    #[arg(long, env = "SEASON", default_value = "2025")]
    pub season: String,

    /// Path to the exported naive-Bayes model (JSON)
    #[arg(long, env = "MODEL_PATH", default_value = "models/nb_model.json")]
    pub model_path: String,

    /// Timeout for each outbound request, in seconds
    #[arg(long, env = "HTTP_TIMEOUT_SECS", default_value = "10")]
    pub http_timeout_secs: u64,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.listen_addr.parse::<SocketAddr>().is_err() {
            anyhow::bail!("listen_addr is not a socket address: {}", self.listen_addr);
        }
        if self.league.trim().is_empty() {
            anyhow::bail!("league must not be empty");
        }
        if self.understat_league.trim().is_empty() {
            anyhow::bail!("understat_league must not be empty");
        }
        if self.season.trim().is_empty() {
            anyhow::bail!("season must not be empty");
        }
        if self.http_timeout_secs == 0 {
            anyhow::bail!("http_timeout_secs must be positive");
        }
        Ok(())
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}
