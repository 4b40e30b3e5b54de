use std::{collections::VecDeque, fmt::Display, sync::Arc, time::Duration};

use dashmap::DashMap;
use tokio::time::Instant;
use tracing::debug;

use crate::model::credential::{Credential, KeyTier};

/// Groups of upstream endpoints that are budgeted separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndpointClass {
    LeagueListing,
    SummonerDetail,
    LiveGame,
}

impl EndpointClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndpointClass::LeagueListing => "league-listing",
            EndpointClass::SummonerDetail => "summoner-detail",
            EndpointClass::LiveGame => "live-game",
        }
    }
}

impl Display for EndpointClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quota {
    pub requests: u32,
    pub window: Duration,
}

#[derive(Debug, Clone, Copy)]
pub struct RateLimitPolicy {
    pub trial: Quota,
    pub production: Quota,
}

impl RateLimitPolicy {
    pub fn quota_for(&self, tier: KeyTier) -> Quota {
        match tier {
            KeyTier::Trial => self.trial,
            KeyTier::Production => self.production,
        }
    }
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self {
            trial: Quota {
                requests: 100,
                window: Duration::from_millis(120_000),
            },
            production: Quota {
                requests: 3000,
                window: Duration::from_millis(10_000),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    Admitted { remaining: u32 },
    /// `reset_at` is the instant the oldest request in the window falls out of it.
    Denied { reset_at: Instant },
}

impl RateLimitDecision {
    pub fn is_admitted(&self) -> bool {
        matches!(self, RateLimitDecision::Admitted { .. })
    }
}

/// Sliding-window limiter keyed by credential and endpoint class.
///
/// Every key holds the admission instants still inside its window. Checks lock the key's
/// shard for the whole prune-count-record sequence, so concurrent callers cannot both see
/// spare quota for the last slot.
///
/// Callers sharing a credential share its buckets, no matter who they are.
pub struct RateLimiter {
    windows: Arc<DashMap<String, VecDeque<Instant>>>,
    policy: RateLimitPolicy,
}

impl Clone for RateLimiter {
    fn clone(&self) -> Self {
        Self {
            windows: Arc::clone(&self.windows),
            policy: self.policy,
        }
    }
}

impl RateLimiter {
    pub fn new(policy: RateLimitPolicy) -> Self {
        Self {
            windows: Arc::new(DashMap::new()),
            policy,
        }
    }

    pub fn check_limit(&self, credential: &Credential, endpoint: EndpointClass) -> RateLimitDecision {
        let quota = self.policy.quota_for(credential.tier());
        let key = format!("{}:{}", credential.as_str(), endpoint);
        let now = Instant::now();

        let mut timestamps = self.windows.entry(key).or_default();
        while timestamps
            .front()
            .is_some_and(|admitted| now.duration_since(*admitted) >= quota.window)
        {
            timestamps.pop_front();
        }

        if timestamps.len() >= quota.requests as usize {
            let reset_at = timestamps.front().map_or(now, |oldest| *oldest) + quota.window;
            debug!(%endpoint, ?credential, "rate limit reached");
            return RateLimitDecision::Denied { reset_at };
        }

        timestamps.push_back(now);
        RateLimitDecision::Admitted {
            remaining: quota.requests - timestamps.len() as u32,
        }
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(RateLimitPolicy::default())
    }
}
