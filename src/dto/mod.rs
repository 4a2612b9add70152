//! DTOs that bridge services with the JSON routes.

pub mod itinerary;
pub mod tours;
