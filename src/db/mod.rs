pub mod standings_queries;
