pub mod http;
pub mod resolution_cache;
pub mod retry;

pub use http::build_http_client;
pub use resolution_cache::ResolutionCache;
pub use retry::{run_with_retry, AttemptOutcome, Backoff, RetryPolicy, RetryState};
