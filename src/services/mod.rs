pub mod decoder;
pub mod profile;
pub mod stats;
pub mod store;
