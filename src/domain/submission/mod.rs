//! Submission domain - Backend contract, outcomes and the submission state machine

mod backend;
mod controller;
mod outcome;

pub use backend::{EntityBackend, IndexCatalog, IndexInfo};
#[cfg(test)]
pub use backend::{MockEntityBackend, MockIndexCatalog};
pub use controller::{
    dispatch, IgnoredReason, SubmissionController, SubmissionState, SubmissionTicket,
    SubmitResponse,
};
pub use outcome::{EntityId, FailureReason, SubmissionFailure, SubmissionOutcome};
