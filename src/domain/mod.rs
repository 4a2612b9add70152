//! Domain aggregates shared by the tour list, the itinerary editor and the remote API.

pub mod itinerary;
pub mod photo;
pub mod tour;
pub mod types;
