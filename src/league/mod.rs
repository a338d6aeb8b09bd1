pub mod scoring;
pub mod standings;
