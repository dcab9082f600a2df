pub mod configuration;
pub mod domain;
pub mod routes;
pub mod session_state;
pub mod session_store;
pub mod startup;
pub mod telemetry;
pub mod utils;
