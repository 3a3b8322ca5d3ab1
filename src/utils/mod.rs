pub mod cache;
pub mod http;
pub mod logging;

pub use cache::TtlCache;
pub use http::{build_client, RateLimiter};
