pub mod points_calculator;
pub mod standings_calculator;
