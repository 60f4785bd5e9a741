//! Batch HTTP surface (service-function adapters).

pub mod handlers;
pub mod routes;

pub use handlers::{ApiState, AppError, ServerState};
pub use routes::create_router;
