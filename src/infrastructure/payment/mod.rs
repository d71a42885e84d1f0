//! Payment infrastructure module

mod http;

pub use http::HttpPaymentGateway;
