use anyhow::Error;

/// Where a failure came from, which decides how the UI degrades
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Listing children failed: stay at the current level
    Fetch,
    /// Create/rename/delete/move failed: the change is not applied
    Mutation,
    /// Jump-to could not find an ancestor or the target: silent abort
    Resolution,
    /// A repository call exceeded its deadline
    Timeout,
    /// SQLite or filesystem trouble underneath any of the above
    Storage,
}

/// Marker error for a repository call that hit its deadline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimedOut {
    pub operation: &'static str,
    pub after_ms: u64,
}

impl std::fmt::Display for TimedOut {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} timed out after {}ms", self.operation, self.after_ms)
    }
}

impl std::error::Error for TimedOut {}

/// Classify an error from its chain, falling back to the kind of operation
/// that produced it
pub fn classify_error(error: &Error, fallback: ErrorKind) -> ErrorKind {
    for cause in error.chain() {
        if cause.downcast_ref::<TimedOut>().is_some() {
            return ErrorKind::Timeout;
        }
        if cause.downcast_ref::<rusqlite::Error>().is_some() {
            return ErrorKind::Storage;
        }
    }

    let error_msg = error.to_string().to_lowercase();
    if error_msg.contains("timeout") || error_msg.contains("timed out") {
        return ErrorKind::Timeout;
    }

    fallback
}

/// Format error message for tech-savvy audience - show raw error details
pub fn format_error_message(error: &Error) -> String {
    // The root cause is the most informative part of a context chain
    let mut source = error.source();
    let mut deepest = error.to_string();

    while let Some(err) = source {
        deepest = err.to_string();
        source = err.source();
    }

    deepest
}

/// One-line toast text for a failed operation
pub fn toast_message(action: &str, error: &Error, fallback: ErrorKind) -> String {
    match classify_error(error, fallback) {
        ErrorKind::Timeout => format!("{} timed out", action),
        _ => format!("{} failed: {}", action, format_error_message(error)),
    }
}
