pub mod board;
pub mod response;
pub mod stock;

pub use board::*;
pub use response::*;
pub use stock::*;
