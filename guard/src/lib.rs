pub mod decision;
pub mod engine;
pub mod routes;
pub mod types;
