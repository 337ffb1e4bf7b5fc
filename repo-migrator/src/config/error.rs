//! Configuration error types.

use thiserror::Error;

/// Errors that can occur while resolving operator input into a run
/// configuration. All of these are fatal before any network call is made.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A repository reference was not of the `<owner>/<name>` form.
    #[error("Invalid repository reference '{spec}': expected <owner>/<name>")]
    InvalidRepository { spec: String },

    /// Source and destination roots differ but no destination token was
    /// supplied, so the destination side cannot authenticate.
    #[error("Source and destination roots differ but no destination token was supplied")]
    MissingDestinationToken,
}
