pub mod client;
pub mod errors;
pub mod metrics;
pub mod model;
pub mod rest;
pub mod summary;
