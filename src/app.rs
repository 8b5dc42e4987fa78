//! 应用组装
//!
//! 中间件顺序：请求日志（最外层）→ 跨域头 → panic 兜底 → 路由

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::Logger,
    web, App, Error,
};

use crate::handlers;
use crate::middleware::{CatchPanic, CorsMiddleware};
use crate::services::{BoardService, MarketDataSource};

pub fn build_app<S: MarketDataSource + 'static>(
    service: web::Data<BoardService<S>>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(service)
        .app_data(handlers::error::query_config())
        .wrap(CatchPanic)
        .wrap(CorsMiddleware::default())  // 跨域响应头
        .wrap(Logger::default())  // 请求日志
        .configure(handlers::config::<S>)
}
