pub mod config;
pub mod extractors;
pub mod logging;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod scheduler;
pub mod session;
pub mod state;
pub mod store;
pub mod validation;
pub mod workers;
