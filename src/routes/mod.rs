use actix_web::web;

pub mod backend_health;
pub mod standings;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(backend_health::backend_health);

    cfg.service(standings::get_standings)
        .service(standings::get_round_standings)
        .service(standings::score_round)
        .service(standings::get_league_standings)
        .service(standings::get_dashboard);
}
