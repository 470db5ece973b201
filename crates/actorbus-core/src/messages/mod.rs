//! Concrete envelope variants, grouped by the conversation they belong to.

mod query;
mod reservation;
mod slice;
mod ticket;

pub use query::{FailedRpc, Query, QueryResult, StatusResponse};
pub use reservation::{
    AddReservation, CloseReservations, GetReservationsRequest, GetReservationsResponse,
    GetReservationsStateRequest, GetReservationsStateResponse, RemoveReservation,
    ResultReservation, ResultReservationState, UpdateReservation,
};
pub use slice::{AddSlice, GetSlicesRequest, GetSlicesResponse, RemoveSlice, ResultSlice, UpdateSlice};
pub use ticket::{Claim, ClaimResources, ClaimResourcesResponse, Redeem, UpdateTicket};
