//! Unredaction orchestration
//!
//! Ties the core model to a prediction service:
//! - [`Unredactor`]: stateless request/response reconciliation on a staged copy
//! - [`DocumentSession`]: shared document with a single-flight unredaction guard

pub mod error;
pub mod session;
pub mod unredactor;

pub use error::UnredactionError;
pub use session::{DocumentSession, UnredactionReport};
pub use unredactor::{UnredactionOutcome, Unredactor, UnredactorConfig};
