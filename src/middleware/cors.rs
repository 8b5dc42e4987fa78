//! CORS 响应头中间件
//!
//! 为所有响应追加宽松的跨域头，前端看板可直接跨域访问。
//! 内层以 `Err` 返回的错误（如 panic 兜底）会先渲染成响应再补上跨域头。

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    error::InternalError,
    http::header::{
        HeaderMap, HeaderValue, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
        ACCESS_CONTROL_ALLOW_ORIGIN,
    },
    Error,
};
use futures::future::{ok, LocalBoxFuture, Ready};
use std::rc::Rc;

/// 跨域响应头
#[derive(Clone)]
struct CorsHeaders {
    allow_origin: HeaderValue,
    allow_methods: HeaderValue,
    allow_headers: HeaderValue,
}

impl Default for CorsHeaders {
    fn default() -> Self {
        Self {
            allow_origin: HeaderValue::from_static("*"),
            allow_methods: HeaderValue::from_static("GET, POST, OPTIONS"),
            allow_headers: HeaderValue::from_static("Content-Type"),
        }
    }
}

impl CorsHeaders {
    fn apply(&self, headers: &mut HeaderMap) {
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, self.allow_origin.clone());
        headers.insert(ACCESS_CONTROL_ALLOW_METHODS, self.allow_methods.clone());
        headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, self.allow_headers.clone());
    }
}

/// CORS 中间件
#[derive(Default)]
pub struct CorsMiddleware {
    headers: Rc<CorsHeaders>,
}

impl<S, B> Transform<S, ServiceRequest> for CorsMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = CorsMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(CorsMiddlewareService {
            service: Rc::new(service),
            headers: self.headers.clone(),
        })
    }
}

pub struct CorsMiddlewareService<S> {
    service: Rc<S>,
    headers: Rc<CorsHeaders>,
}

impl<S, B> Service<ServiceRequest> for CorsMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let cors = self.headers.clone();

        Box::pin(async move {
            match service.call(req).await {
                Ok(mut res) => {
                    cors.apply(res.headers_mut());
                    Ok(res)
                }
                Err(err) => {
                    let mut response = err.error_response();
                    cors.apply(response.headers_mut());
                    Err(InternalError::from_response(err, response).into())
                }
            }
        })
    }
}
