pub mod backend_health_handler;
pub mod scoring_handler;
pub mod standings_handler;
