//! HTTP transport and session cookie storage

pub mod client;
pub mod cookies;

pub use client::{HttpClient, HttpClientBuilder};
pub use cookies::SessionCookieJar;
