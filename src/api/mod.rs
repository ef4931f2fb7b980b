pub mod config;
pub mod credentials;
pub mod http;

pub use config::{ClientConfig, TransportMode, DEFAULT_BASE_URL};
pub use credentials::{guid_valid, Credentials};
pub use http::{
    AsyncTransport, BlockingTransport, HttpRequest, HttpResponse, ReqwestAsyncTransport,
    ReqwestBlockingTransport, Transport,
};
