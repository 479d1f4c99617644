pub mod build;
pub mod plan;
pub mod preview;
pub mod profile;
