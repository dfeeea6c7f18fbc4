//! Pagewise relay server: HTTP routes, shared state and command line.

pub mod cli;
pub mod routes;
pub mod state;

pub use routes::build_router;
pub use state::AppState;
