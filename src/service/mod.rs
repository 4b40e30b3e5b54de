pub mod cache;
pub mod data_manager;
pub mod gameapi;
pub mod live_updates;
pub mod lookup;
pub mod rate_limiter;
