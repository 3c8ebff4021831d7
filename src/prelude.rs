pub use crate::{CookieConfig, CookieError};
pub use crate::{Cookie, CookieMap, SESSION_EXPIRY};
pub use crate::{CookieOptions, SameSite};
pub use crate::{CookieService, HttpCookieService};
pub use crate::HttpMeta;

pub use chrono::{Duration, Utc};
pub use tokio_util::sync::CancellationToken;
