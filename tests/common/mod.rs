#![allow(dead_code)]

pub mod cookie_jar;

use starberry_cookies::{HttpCookieService, HttpMeta};

/// A request carrying `header` as its `Cookie` header. Empty means no header.
pub fn request_with_cookies(header: &str) -> HttpMeta {
    let mut request = HttpMeta::default();
    if !header.is_empty() {
        request.set_attribute("Cookie", header);
    }
    request
}

pub fn service_for(header: &str) -> HttpCookieService {
    init_tracing();
    HttpCookieService::new(&request_with_cookies(header))
}

/// Log output for `cargo test -- --nocapture`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}

/// The `Set-Cookie` expiry string for `at`.
pub fn http_date(at: &chrono::DateTime<chrono::Utc>) -> String {
    at.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}
