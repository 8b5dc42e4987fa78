use actix_web::{http::Method, web, HttpRequest, HttpResponse, Result};
use crate::models::{ErrorResponse, HealthStatus};

/// 健康检查
///
/// GET /api/health
pub async fn health_check() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(HealthStatus::ok()))
}

/// CORS 预检占位
///
/// OPTIONS /api/options
pub async fn preflight() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// `/api` 下未匹配的请求
///
/// 任意路径的 OPTIONS 预检返回 204，其余返回 404
pub async fn fallback(req: HttpRequest) -> HttpResponse {
    if req.method() == Method::OPTIONS {
        HttpResponse::NoContent().finish()
    } else {
        HttpResponse::NotFound().json(ErrorResponse::new(format!("接口不存在: {}", req.path())))
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/options", web::route().method(Method::OPTIONS).to(preflight));
}
