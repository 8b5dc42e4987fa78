pub mod board;
pub mod error;
pub mod health;

use actix_web::web;

use crate::services::MarketDataSource;

pub fn config<S: MarketDataSource + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(health::config)
            .configure(board::config::<S>)
            .default_service(web::to(health::fallback))
    );
}
