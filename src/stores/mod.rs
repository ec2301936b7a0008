pub mod boundaries;
pub mod listings;
pub mod zones;
