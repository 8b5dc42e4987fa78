//! 未预期错误兜底中间件
//!
//! 处理器内部 panic 时返回 500 与 `{"error": "..."}`，不泄露调用栈
//!
//! 路由阶段需要独占请求，这里不持有请求副本，panic 以 `Err` 形式交给外层渲染

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error,
};
use futures::future::{ok, FutureExt, LocalBoxFuture, Ready};
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::rc::Rc;

use crate::handlers::error::ApiError;

pub struct CatchPanic;

impl<S, B> Transform<S, ServiceRequest> for CatchPanic
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = CatchPanicService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(CatchPanicService {
            service: Rc::new(service),
        })
    }
}

pub struct CatchPanicService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for CatchPanicService<S>
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

        Box::pin(async move {
            match AssertUnwindSafe(async move { service.call(req).await })
                .catch_unwind()
                .await
            {
                Ok(res) => res,
                Err(payload) => Err(ApiError::Internal(panic_message(payload)).into()),
            }
        })
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "internal server error".to_string()
    }
}
