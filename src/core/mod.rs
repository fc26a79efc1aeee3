//! Application surfaces around the scanner (HTTP API, scheduled rescans)

pub mod http;
pub mod scheduler;

pub use http::*;
pub use scheduler::*;
