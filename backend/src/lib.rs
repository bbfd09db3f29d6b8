pub mod config;
pub mod routes;
pub mod store;

pub use routes::app;
pub use store::TaskStore;
