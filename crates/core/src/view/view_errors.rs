use thiserror::Error;

/// Errors raised by the mutation coordinator.
///
/// Each submission moves one lead through
/// `Idle -> Pending -> Committed | RolledBack`; these errors cover the
/// rejected transitions. All of them are isolated to the single record
/// under mutation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    /// At most one mutation per record may be in flight.
    #[error("a status update for lead '{0}' is already in flight")]
    AlreadyPending(String),

    #[error("lead '{0}' is not present in the current view")]
    UnknownLead(String),

    /// The remote declined or lost the update; the local value was rolled
    /// back to its pre-mutation state.
    #[error("status update for lead '{id}' was rejected: {cause}")]
    Rejected { id: String, cause: String },
}
