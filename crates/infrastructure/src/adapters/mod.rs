//! Adapters for external services.

mod reqwest_fetcher;
mod system_clock;

pub use reqwest_fetcher::ReqwestFetcher;
pub use system_clock::SystemClock;
