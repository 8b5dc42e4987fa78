//! 中间件

pub mod catch_panic;
pub mod cors;

pub use catch_panic::CatchPanic;
pub use cors::CorsMiddleware;
