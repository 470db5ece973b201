//! Structured values embedded in envelopes.

mod auth;
mod reservation;
mod resource;
mod slice;
mod status;
mod term;

pub use auth::AuthRecord;
pub use reservation::{ReservationPredecessorRecord, ReservationStateRecord};
pub use resource::{ResourceDataRecord, ResourceSetRecord};
pub use slice::SliceRecord;
pub use status::{ResultRecord, UpdateDataRecord};
pub use term::TermRecord;
