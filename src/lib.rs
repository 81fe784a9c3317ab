mod caching;
pub mod charts;
pub mod config;
pub mod dai_market;
pub mod env;
pub mod export;
pub mod flipside;
pub mod frame;
pub mod granularity;
mod health;
pub mod log;
pub mod policy_markers;
pub mod resample;
pub mod reshape;
mod serve;

pub use caching::{CacheKey, Dataset, FrameCache};
pub use serve::start_server;
