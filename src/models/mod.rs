//! Data Models Module
//!
//! Station types plus request and response DTOs for the HTTP API.

mod requests;
mod responses;
mod station;

pub use requests::*;
pub use responses::*;
pub use station::*;
