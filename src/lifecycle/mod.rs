//! The proposal/contract lifecycle engine.
//!
//! Every marketplace state transition funnels through here: proposal
//! submit/accept/reject, contract complete/cancel, and the notification
//! side effects they enqueue. Handlers stay thin and map the typed errors
//! below onto HTTP responses.

pub mod contracts;
pub mod notifications;
pub mod proposals;

use sea_orm::{DbErr, TransactionError};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{contracts as contract_models, projects};

/// Typed failures surfaced by every lifecycle operation.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// The actor lacks the required relationship to the entity.
    #[error("{0}")]
    Unauthorized(String),
    /// A referenced entity is absent.
    #[error("{0}")]
    NotFound(String),
    /// The operation is not legal in the entity's current state.
    #[error("{0}")]
    InvalidState(String),
    /// Storage contention on the accept path survived the bounded retry.
    #[error("{0}")]
    Conflict(String),
    /// The request payload fails a precondition (e.g. non-positive bid).
    #[error("{0}")]
    Validation(String),
    /// Any other storage failure.
    #[error(transparent)]
    Db(#[from] DbErr),
}

impl From<TransactionError<LifecycleError>> for LifecycleError {
    fn from(err: TransactionError<LifecycleError>) -> Self {
        match err {
            TransactionError::Connection(e) => LifecycleError::Db(e),
            TransactionError::Transaction(e) => e,
        }
    }
}

/// The actor must be the client who owns the project.
pub fn ensure_project_client(
    project: &projects::Model,
    actor_id: Uuid,
) -> Result<(), LifecycleError> {
    if project.client_id != actor_id {
        return Err(LifecycleError::Unauthorized(
            "Only the project's client can do this".to_string(),
        ));
    }
    Ok(())
}

/// The actor must be one of the contract's two named parties.
pub fn ensure_contract_party(
    contract: &contract_models::Model,
    actor_id: Uuid,
) -> Result<(), LifecycleError> {
    if !contract.is_party(actor_id) {
        return Err(LifecycleError::Unauthorized(
            "You are not a party to this contract".to_string(),
        ));
    }
    Ok(())
}

/// Whether a storage error is Postgres telling us two transactions raced
/// (serialization failure or deadlock). The accept path retries these once.
pub fn is_serialization_conflict(err: &DbErr) -> bool {
    let text = err.to_string();
    text.contains("40001")
        || text.contains("40P01")
        || text.contains("could not serialize")
        || text.contains("deadlock detected")
}
