pub mod prediction;
pub mod round;
pub mod standings;
