pub mod asset;
pub mod status;
pub mod summary;
