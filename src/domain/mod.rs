pub mod boundary;
pub mod filter;
pub mod listing;
pub mod station;

pub use boundary::{BoundaryPolygon, BoundarySet};
pub use filter::FilterSelection;
pub use listing::{Coordinate, Listing};
pub use station::TransitStation;
