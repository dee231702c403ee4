//! Error types

use thiserror::Error;

/// Failure reported by a region data source.
///
/// "No results" is not an error: sources return an empty list for unknown or
/// childless parents. These variants cover transport and payload problems
/// only, and they never escape to the change callback — the selector logs
/// them and surfaces an empty list for the affected level.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The backing service could not be reached or answered with a failure
    #[error("region service unavailable: {0}")]
    Unavailable(String),

    /// The service answered but the payload could not be decoded
    #[error("malformed region payload: {0}")]
    Malformed(String),
}
