pub mod retry;

pub use retry::{AttemptOutcome, FetchOutcome, RetryPolicy, fetch_with_retry};
