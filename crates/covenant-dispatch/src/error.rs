//! One-shot dispatch errors.

use covenant_core::{ContractError, DispatchError};
use thiserror::Error;

/// Error returned by [`handle_request`](crate::handle_request).
///
/// Combines the construction-time checks with the per-request failure,
/// since the one-shot entry point performs both.
#[derive(Debug, Error)]
pub enum HandleError {
    /// The contract or implementation tree is defective.
    #[error(transparent)]
    Contract(#[from] ContractError),

    /// The request failed after validation.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}
