//! Error types for responder configuration and dispatch.

use crate::identity::ResponderId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResponderError {
    #[error("event source has no target to attach to")]
    MissingTarget,

    #[error("responder is already attached")]
    AlreadyAttached,

    #[error("responder {0} is already attached to this arbitration context")]
    DuplicateId(ResponderId),

    #[error("re-entrant dispatch into the arbitration context")]
    Reentrant,
}
