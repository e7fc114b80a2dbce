use sea_orm::DbErr;
use thiserror::Error;

/// Failure taxonomy for the search core.
///
/// Input validation and configuration problems are raised before any store
/// round-trip; store failures are passed through without translation or
/// retry.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid page request: page size must be greater than zero")]
    InvalidPageRequest,

    #[error("Team filter requires a team join in the query spec")]
    MissingTeamJoin,

    #[error("Store error: {0}")]
    Store(#[from] DbErr),
}
