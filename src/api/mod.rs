mod extract;
pub mod public;
pub mod routes;
mod server;
mod state;
pub use extract::BearerToken;
pub use server::{app, serve};
pub use state::AppState;
