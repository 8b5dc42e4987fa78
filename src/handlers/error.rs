//! 接口错误
//!
//! 统一转换为 `{"error": "..."}` 响应，只暴露错误信息本身

use actix_web::{error, http::StatusCode, HttpRequest, HttpResponse, ResponseError};
use std::fmt;

use crate::models::ErrorResponse;
use crate::services::error::FetchError;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Upstream(FetchError),
    Internal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "{}", msg),
            ApiError::Upstream(e) => write!(f, "上游数据获取失败: {}", e),
            ApiError::Internal(msg) => write!(f, "{}", msg),
        }
    }
}

impl From<FetchError> for ApiError {
    fn from(e: FetchError) -> Self {
        ApiError::Upstream(e)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ApiError::Internal(msg) = self {
            log::error!("Error: {}", msg);
        }
        HttpResponse::build(self.status_code()).json(ErrorResponse::new(self.to_string()))
    }
}

/// 查询参数解析失败时返回 400 与错误信息
pub fn query_config() -> actix_web::web::QueryConfig {
    actix_web::web::QueryConfig::default().error_handler(|err, _req: &HttpRequest| {
        let message = err.to_string();
        error::InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(ErrorResponse::new(message)),
        )
        .into()
    })
}
