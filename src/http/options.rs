//! The framework-native cookie options and `Set-Cookie` formatting.

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use std::fmt;

use super::cookie::{format_http_date, SESSION_EXPIRY};

/// The `SameSite` attribute. `Unspecified` writes no attribute at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SameSite {
    #[default]
    Unspecified,
    None,
    Lax,
    Strict,
}

impl fmt::Display for SameSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unspecified => write!(f, ""),
            Self::None => write!(f, "None"),
            Self::Lax => write!(f, "Lax"),
            Self::Strict => write!(f, "Strict"),
        }
    }
}

/// Options for a `Set-Cookie` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieOptions {
    pub expires: Option<DateTime<Utc>>,
    pub max_age: Option<Duration>,
    pub domain: Option<String>,
    pub path: Option<String>,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
    pub partitioned: bool,
}

impl Default for CookieOptions {
    /// Path `/`, no expiry, no flags, SameSite unspecified.
    fn default() -> Self {
        Self {
            expires: None,
            max_age: None,
            domain: None,
            path: Some("/".to_string()),
            secure: false,
            http_only: false,
            same_site: SameSite::Unspecified,
            partitioned: false,
        }
    }
}

impl CookieOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// [`SESSION_EXPIRY`] leaves the expiry unset.
    pub fn expires(mut self, at: DateTime<Utc>) -> Self {
        self.expires = if at == SESSION_EXPIRY { None } else { Some(at) };
        self
    }

    pub fn max_age(mut self, max_age: Duration) -> Self {
        self.max_age = Some(max_age);
        self
    }

    pub fn domain<T: Into<String>>(mut self, domain: T) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn path<T: Into<String>>(mut self, path: T) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    pub fn http_only(mut self, http_only: bool) -> Self {
        self.http_only = http_only;
        self
    }

    pub fn same_site(mut self, same_site: SameSite) -> Self {
        self.same_site = same_site;
        self
    }

    pub fn partitioned(mut self, partitioned: bool) -> Self {
        self.partitioned = partitioned;
        self
    }

    /// Formats one `Set-Cookie` value. `value` is written as given, callers
    /// encode it beforehand.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use starberry_cookies::http::options::{CookieOptions, SameSite};
    ///
    /// let options = CookieOptions::new().http_only(true).same_site(SameSite::Strict);
    /// assert_eq!(
    ///     options.set_cookie_value("theme", "dark"),
    ///     "theme=dark; path=/; HttpOnly; SameSite=Strict"
    /// );
    /// ```
    pub fn set_cookie_value(&self, name: &str, value: &str) -> String {
        let mut result = format!("{}={}", name, value);
        if let Some(ref expires) = self.expires {
            result.push_str(&format!("; expires={}", format_http_date(expires)));
        }
        if let Some(ref max_age) = self.max_age {
            result.push_str(&format!("; max-age={}", max_age.num_seconds()));
        }
        if let Some(ref domain) = self.domain {
            result.push_str(&format!("; domain={}", domain));
        }
        if let Some(ref path) = self.path {
            result.push_str(&format!("; path={}", path));
        }
        if self.http_only {
            result.push_str("; HttpOnly");
        }
        if self.secure {
            result.push_str("; Secure");
        }
        if self.same_site != SameSite::Unspecified {
            result.push_str(&format!("; SameSite={}", self.same_site));
        }
        if self.partitioned {
            result.push_str("; Partitioned");
        }
        result
    }
}
