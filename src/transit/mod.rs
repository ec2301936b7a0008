mod client;
mod models;
mod transit_error;

pub use client::TransitClient;
pub use models::StopPoint;
pub use transit_error::TransitError;
