use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use indexmap::IndexMap;
use regex::Regex;

use crate::error::{CookieError, Result};

/// Expiry value that marks a session cookie.
///
/// Any expiry setter receiving this value stores no expiry at all, so the
/// resulting `Set-Cookie` carries no `expires` attribute. It never means
/// "expire immediately".
pub const SESSION_EXPIRY: DateTime<Utc> = DateTime::<Utc>::MIN_UTC;

/// The date written into a `Set-Cookie` that deletes a cookie.
pub const EXPIRED_DATE: &str = "Thu, 01 Jan 1970 00:00:00 GMT";

// No whitespace, control characters or header delimiters
static COOKIE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s\x00-\x1F\x7F,;=]+$").expect("cookie name pattern"));

/// Checks that `name` can be used as the name of a cookie.
///
/// # Examples
///
/// ```rust
/// use starberry_cookies::http::cookie::validate_name;
/// assert!(validate_name("sessionId").is_ok());
/// assert!(validate_name("").is_err());
/// assert!(validate_name("=;").is_err());
/// ```
pub fn validate_name(name: &str) -> Result<()> {
    if COOKIE_NAME.is_match(name) {
        Ok(())
    } else {
        Err(CookieError::InvalidName(name.to_string()))
    }
}

/// Formats a timestamp as an RFC 1123 HTTP date, e.g. `Sun, 06 Nov 1994 08:49:37 GMT`.
pub fn format_http_date(at: &DateTime<Utc>) -> String {
    at.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

fn normalize_expiry(at: DateTime<Utc>) -> Option<DateTime<Utc>> {
    if at == SESSION_EXPIRY { None } else { Some(at) }
}

/// The cookies of one request, keyed by name, in the order the request sent them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CookieMap(pub IndexMap<String, Cookie>);

impl CookieMap {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Parses a `Cookie` request header into a CookieMap.
    ///
    /// Pairs without a `=` or with an empty name are skipped. The value is
    /// everything after the first `=`, so base64 padding survives.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use starberry_cookies::http::cookie::CookieMap;
    ///
    /// let cookies = CookieMap::parse("sessionId=abc123; token=eyJ0==; broken");
    /// assert_eq!(cookies.get("sessionId").unwrap().get_value(), "abc123");
    /// assert_eq!(cookies.get("token").unwrap().get_value(), "eyJ0==");
    /// assert_eq!(cookies.len(), 2);
    /// ```
    pub fn parse<T: AsRef<str>>(cookies: T) -> Self {
        let mut cookie_map = CookieMap::new();
        for pair in cookies.as_ref().split(';') {
            if let Some((name, value)) = pair.split_once('=') {
                let name = name.trim();
                if name.is_empty() {
                    continue;
                }
                cookie_map.insert(Cookie::new(name, value.trim()));
            }
        }
        cookie_map
    }

    pub fn get<T: AsRef<str>>(&self, name: T) -> Option<&Cookie> {
        self.0.get(name.as_ref())
    }

    /// Inserts a cookie under its own name. A cookie with that name is
    /// replaced in place.
    pub fn insert(&mut self, cookie: Cookie) -> Option<Cookie> {
        self.0.insert(cookie.name.clone(), cookie)
    }

    /// Removes a cookie, keeping the order of the rest.
    pub fn remove<T: AsRef<str>>(&mut self, name: T) -> Option<Cookie> {
        self.0.shift_remove(name.as_ref())
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        self.0.keys().cloned().collect()
    }

    pub fn values(&self) -> impl Iterator<Item = &Cookie> {
        self.0.values()
    }

    /// Merges another map into this one, later cookies win.
    pub fn extend(&mut self, other: CookieMap) {
        self.0.extend(other.0);
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for CookieMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(pairs: I) -> Self {
        let mut cookie_map = CookieMap::new();
        for (name, value) in pairs {
            cookie_map.insert(Cookie::new(name, value));
        }
        cookie_map
    }
}

impl IntoIterator for CookieMap {
    type Item = (String, Cookie);
    type IntoIter = indexmap::map::IntoIter<String, Cookie>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// A cookie as the application sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    /// `None` is a session cookie
    pub expires: Option<DateTime<Utc>>,
    /// `None` falls back to the configured default path
    pub path: Option<String>,
    pub http_only: bool,
    pub secure: bool,
}

impl Cookie {
    /// Creates a session cookie with no path and no flags.
    ///
    /// # Examples
    /// ```rust
    /// use chrono::{Duration, Utc};
    /// use starberry_cookies::http::cookie::Cookie;
    ///
    /// let cookie = Cookie::new("sessionId", "abc123")
    ///     .expires(Utc::now() + Duration::days(1))
    ///     .path("/app")
    ///     .http_only(true);
    /// assert!(!cookie.is_session());
    /// ```
    pub fn new<N: Into<String>, V: ToString>(name: N, value: V) -> Self {
        Self {
            name: name.into(),
            value: value.to_string(),
            expires: None,
            path: None,
            http_only: false,
            secure: false,
        }
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_value(&self) -> &str {
        &self.value
    }

    pub fn set_value<T: ToString>(&mut self, value: T) {
        self.value = value.to_string();
    }

    /// Sets the expiry. [`SESSION_EXPIRY`] turns the cookie into a session cookie.
    pub fn expires(self, at: DateTime<Utc>) -> Self {
        Self { expires: normalize_expiry(at), ..self }
    }

    pub fn get_expires(&self) -> Option<DateTime<Utc>> {
        self.expires
    }

    pub fn set_expires(&mut self, at: DateTime<Utc>) {
        self.expires = normalize_expiry(at);
    }

    pub fn is_session(&self) -> bool {
        self.expires.is_none()
    }

    pub fn path<T: ToString>(self, path: T) -> Self {
        Self { path: Some(path.to_string()), ..self }
    }

    pub fn get_path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn http_only(self, http_only: bool) -> Self {
        Self { http_only, ..self }
    }

    pub fn secure(self, secure: bool) -> Self {
        Self { secure, ..self }
    }

    /// Validates the name of this cookie, see [`validate_name`].
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)
    }
}
