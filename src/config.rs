use std::{net::SocketAddr, time::Duration};

use clap::Parser;

use crate::{model::credential::Credential, service::live_updates::PollSettings};

/// League Stats GraphQL backend
#[derive(Parser, Debug, Clone)]
#[command(name = "league-stats")]
#[command(version, about, long_about = None)]
pub struct Settings {
    /// Riot API key sent with every upstream request
    #[arg(long = "api-key", env = "RIOT_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Address the HTTP server listens on
    #[arg(long, env = "LEAGUE_STATS_BIND", default_value = "0.0.0.0:3000")]
    pub bind: SocketAddr,

    /// Timeout for a single Riot API call, in seconds
    #[arg(long = "request-timeout-secs", env = "LEAGUE_STATS_REQUEST_TIMEOUT", default_value_t = 10, value_parser = seconds())]
    pub request_timeout_secs: u64,

    /// Pause between live game polls of a subscription, in seconds
    #[arg(long = "poll-interval-secs", env = "LEAGUE_STATS_POLL_INTERVAL", default_value_t = 30, value_parser = seconds())]
    pub poll_interval_secs: u64,

    /// Pause after a failed live game poll, in seconds
    #[arg(long = "error-backoff-secs", env = "LEAGUE_STATS_ERROR_BACKOFF", default_value_t = 60, value_parser = seconds())]
    pub error_backoff_secs: u64,

    /// How often expired cache entries are swept, in seconds
    #[arg(long = "cache-sweep-secs", env = "LEAGUE_STATS_CACHE_SWEEP", default_value_t = 60, value_parser = seconds())]
    pub cache_sweep_secs: u64,
}

// A zero period would make the timers spin and every upstream call time out
fn seconds() -> clap::builder::RangedU64ValueParser<u64> {
    clap::value_parser!(u64).range(1..)
}

impl Settings {
    pub fn credential(&self) -> Credential {
        Credential::new(self.api_key.clone())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn cache_sweep_interval(&self) -> Duration {
        Duration::from_secs(self.cache_sweep_secs)
    }

    pub fn poll_settings(&self) -> PollSettings {
        PollSettings {
            interval: Duration::from_secs(self.poll_interval_secs),
            error_backoff: Duration::from_secs(self.error_backoff_secs),
        }
    }
}
