//! Request-scoped cookie access for Starberry handlers.
//!
//! [`HttpCookieService`] reads the cookies a request carried and stages
//! `Set-Cookie` values on the response, keeping at most one staged value per
//! cookie name.

pub mod config;
pub mod error;
pub mod http;
pub mod prelude;
pub mod service;

pub use config::CookieConfig;
pub use error::{CookieError, Result};
pub use http::cookie::{Cookie, CookieMap, SESSION_EXPIRY};
pub use http::meta::{HeaderValue, HttpMeta};
pub use http::options::{CookieOptions, SameSite};
pub use service::{CookieService, HttpCookieService, PendingCookies};
