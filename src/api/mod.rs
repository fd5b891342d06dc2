//! API Module
//!
//! HTTP handlers and routing for the station service REST API.
//!
//! # Endpoints
//! - `GET /stations/:code` - Retrieve one station
//! - `GET /stations?ids=` - Retrieve several stations
//! - `GET /search/bbox` - Bounding box search
//! - `GET /search/radius` - Radius search
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
