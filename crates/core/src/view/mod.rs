//! View module - per-page state, refresh scheduling, and status mutation.

mod poller;
mod view_errors;
mod view_model;
mod view_service;

pub use poller::RefreshScheduler;
pub use view_errors::MutationError;
pub use view_model::LeadViewState;
pub use view_service::{LeadViewService, RefreshTarget};
