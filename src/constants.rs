//! Application constants
//!
//! Centralized location for user-facing strings and protocol limits.

/// Application name, shown in the header
pub const APP_NAME: &str = "Motiv Quotes";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Maximum quote length accepted by the submission form
pub const MAX_QUOTE_LENGTH: usize = 250;

/// Row cap for a single list query
pub const LIST_LIMIT: usize = 1000;

/// Default remote table holding the quotes
pub const DEFAULT_TABLE: &str = "quotes";

/// Timeout for one gateway round trip
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default log file name, written inside the config directory
pub const DEFAULT_LOG_FILE: &str = "motiv.log";

/// Default tracing filter when neither config nor RUST_LOG set one
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Notification shown when a list query fails
pub const LOAD_FAILURE_MESSAGE: &str = "There was a problem getting data";

/// Shown in the list area while a query is in flight
pub const LOADING_MESSAGE: &str = "Loading...";

/// Shown instead of the list when it is empty
pub const EMPTY_LIST_MESSAGE: &str = "No quotes for this tag yet! Create the first one.";
