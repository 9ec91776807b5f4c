//! Web layer for travel order resolution.
//!
//! Provides JSON endpoints for listing stations, resolving recognized
//! entities into travel orders and searching journeys.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router, status_for_kind};
pub use state::AppState;
