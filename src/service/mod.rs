pub mod cookie_service;
pub mod pending;

pub use cookie_service::{CookieService, HttpCookieService};
pub use pending::PendingCookies;
