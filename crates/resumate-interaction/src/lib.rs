//! Network interaction with the Resumate backend.

pub mod http_transport;

pub use http_transport::HttpTransport;
