//! A browser cookie store, reduced to what `document.cookie` exposes.
//!
//! Used as an oracle: feeding it the `Set-Cookie` values the service staged
//! must leave the cookies the handler intended.

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attribute {
    Domain,
    Expires,
    MaxAge,
    Path,
    SameSite,
    Secure,
    Partitioned,
}

const ATTRIBUTES: &[(&str, Attribute)] = &[
    ("domain", Attribute::Domain),
    ("expires", Attribute::Expires),
    ("max-age", Attribute::MaxAge),
    ("path", Attribute::Path),
    ("samesite", Attribute::SameSite),
    ("secure", Attribute::Secure),
    ("partitioned", Attribute::Partitioned),
];

fn attribute(key: &str) -> Option<Attribute> {
    ATTRIBUTES
        .iter()
        .find(|(name, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, attribute)| *attribute)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredCookie {
    pub name: String,
    pub value: String,
    pub domain: Option<String>,
    pub expires: Option<DateTime<Utc>>,
    pub max_age: Option<i64>,
    pub path: Option<String>,
    pub same_site: Option<String>,
    pub secure: bool,
    pub partitioned: bool,
}

impl StoredCookie {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires.is_some_and(|expires| now > expires)
    }

    /// Only truthy fields of `update` overwrite: an empty value, a missing
    /// attribute or an absent `secure` never clear what is stored.
    fn merge(&mut self, update: StoredCookie) {
        if !update.value.is_empty() {
            self.value = update.value;
        }
        if let Some(domain) = update.domain.filter(|domain| !domain.is_empty()) {
            self.domain = Some(domain);
        }
        if update.expires.is_some() {
            self.expires = update.expires;
        }
        if let Some(path) = update.path.filter(|path| !path.is_empty()) {
            self.path = Some(path);
        }
        if let Some(max_age) = update.max_age.filter(|max_age| *max_age != 0) {
            self.max_age = Some(max_age);
        }
        if let Some(same_site) = update.same_site.filter(|same_site| !same_site.is_empty()) {
            self.same_site = Some(same_site);
        }
        if update.secure {
            self.secure = true;
        }
        if update.partitioned {
            self.partitioned = true;
        }
    }
}

/// Splits `key=value; attr=value; flag` into trimmed pairs.
fn split_parts(set_cookie: &str) -> Vec<(String, String)> {
    let mut parts = Vec::new();
    for raw in set_cookie.split(';') {
        let (key, value) = match raw.split_once('=') {
            Some((key, value)) => (key.trim(), value.trim()),
            None => {
                let part = raw.trim();
                if attribute(part).is_some() { (part, "") } else { ("", part) }
            }
        };
        if key.is_empty() && value.is_empty() {
            continue;
        }
        parts.push((key.to_string(), value.to_string()));
    }
    parts
}

/// Keeps the first part of every key, compared case-insensitively.
fn dedup_parts(parts: Vec<(String, String)>) -> Vec<(String, String)> {
    let mut seen: Vec<String> = Vec::new();
    let mut unique = Vec::new();
    for (key, value) in parts {
        let lower = key.to_lowercase();
        if seen.contains(&lower) {
            continue;
        }
        seen.push(lower);
        unique.push((key, value));
    }
    unique
}

/// Parses one `Set-Cookie` string. `None` when it names no cookie.
pub fn parse_set_cookie(set_cookie: &str) -> Option<StoredCookie> {
    let mut cookie = StoredCookie::default();
    let mut named = false;
    for (key, value) in dedup_parts(split_parts(set_cookie)) {
        match attribute(&key) {
            Some(Attribute::Domain) => cookie.domain = Some(value),
            Some(Attribute::Expires) => {
                cookie.expires = DateTime::parse_from_rfc2822(&value)
                    .ok()
                    .map(|expires| expires.with_timezone(&Utc));
            }
            Some(Attribute::MaxAge) => cookie.max_age = value.parse().ok(),
            Some(Attribute::Path) => cookie.path = Some(value),
            Some(Attribute::SameSite) => cookie.same_site = Some(value),
            Some(Attribute::Secure) => cookie.secure = true,
            Some(Attribute::Partitioned) => cookie.partitioned = true,
            // Only the first custom pair is the cookie, the rest is noise
            None if !named => {
                named = true;
                cookie.name = key;
                cookie.value = value;
            }
            None => {}
        }
    }
    if cookie.name.is_empty() { None } else { Some(cookie) }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieJar {
    // Insertion order, like the keys of a JS object
    cookies: Vec<StoredCookie>,
}

impl CookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the jar from a `Cookie` request header, as if the browser already held them.
    pub fn from_request_header(header: &str, now: DateTime<Utc>) -> Self {
        header
            .split(';')
            .fold(CookieJar::new(), |jar, pair| jar.apply(pair, now))
    }

    /// The jar after the browser receives `set_cookie`.
    pub fn apply(&self, set_cookie: &str, now: DateTime<Utc>) -> CookieJar {
        let mut jar = self.clone();
        if let Some(update) = parse_set_cookie(set_cookie) {
            match jar.cookies.iter_mut().find(|cookie| cookie.name == update.name) {
                Some(stored) => stored.merge(update),
                None => jar.cookies.push(update),
            }
        }
        jar.cookies.retain(|cookie| !cookie.is_expired(now));
        jar
    }

    /// Applies several `Set-Cookie` values in order.
    pub fn apply_all<I, T>(&self, set_cookies: I, now: DateTime<Utc>) -> CookieJar
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        set_cookies
            .into_iter()
            .fold(self.clone(), |jar, set_cookie| jar.apply(set_cookie.as_ref(), now))
    }

    pub fn get(&self, name: &str) -> Option<&StoredCookie> {
        self.cookies.iter().find(|cookie| cookie.name == name)
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    /// What `document.cookie` would read at `now`.
    pub fn cookie_string(&self, now: DateTime<Utc>) -> String {
        self.cookies
            .iter()
            .filter(|cookie| !cookie.is_expired(now))
            .map(|cookie| format!("{}={}", cookie.name, cookie.value))
            .collect::<Vec<_>>()
            .join("; ")
    }
}
