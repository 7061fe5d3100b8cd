pub mod client;
pub mod errors;
pub mod render;
pub mod routes;
pub mod bootstrap;
