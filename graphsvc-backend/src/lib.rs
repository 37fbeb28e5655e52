pub mod app;
pub mod error;
pub mod handlers;
pub mod lifecycle;
pub mod state;
pub mod validation;

pub use app::build_router;
