use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use crate::config::CookieConfig;
use crate::error::Result;
use crate::http::cookie::{validate_name, Cookie, CookieMap, SESSION_EXPIRY};
use crate::http::meta::HttpMeta;
use crate::http::options::CookieOptions;
use crate::http::url_encoding::{decode_cookie_value, encode_cookie_value};

use super::pending::PendingCookies;

/// Read request cookies and stage cookie mutations on the response.
///
/// Every operation completes before it returns; the async signatures and the
/// cancellation token follow the framework's handler conventions. A token
/// that is already cancelled does not abort anything.
#[async_trait]
pub trait CookieService: Send + Sync {
    /// All cookies of the request that have not been removed.
    async fn get_all(&self) -> Vec<Cookie>;

    async fn get(&self, name: &str) -> Option<Cookie>;

    async fn set(&mut self, cookie: Cookie, cancel: Option<&CancellationToken>) -> Result<()>;

    /// Stages several cookies. If any name is invalid nothing is staged.
    async fn set_many(&mut self, cookies: Vec<Cookie>, cancel: Option<&CancellationToken>) -> Result<()>;

    /// Stages a session cookie.
    async fn set_value(&mut self, name: &str, value: &str, cancel: Option<&CancellationToken>) -> Result<()>;

    async fn set_with_expiry(
        &mut self,
        name: &str,
        value: &str,
        expires: DateTime<Utc>,
        cancel: Option<&CancellationToken>,
    ) -> Result<()>;

    async fn set_with_options(
        &mut self,
        name: &str,
        value: &str,
        options: CookieOptions,
        cancel: Option<&CancellationToken>,
    ) -> Result<()>;

    async fn remove(&mut self, name: &str, cancel: Option<&CancellationToken>);

    async fn remove_all(&mut self, cancel: Option<&CancellationToken>);
}

/// Request-scoped [`CookieService`] over the framework's header model.
///
/// Owns a snapshot of the request cookies and the log of staged
/// `Set-Cookie` values. Nothing reaches the response until [`commit`].
///
/// [`commit`]: HttpCookieService::commit
#[derive(Debug, Clone)]
pub struct HttpCookieService {
    request_cookies: CookieMap,
    pending: PendingCookies,
    config: CookieConfig,
}

impl HttpCookieService {
    /// Builds the snapshot from the request's `cookie` header.
    pub fn new(request: &HttpMeta) -> Self {
        Self::with_config(request, CookieConfig::default())
    }

    pub fn with_config(request: &HttpMeta, config: CookieConfig) -> Self {
        Self::from_cookies(request.parse_cookies(), config)
    }

    /// Builds the snapshot from name/value pairs the host has already parsed.
    ///
    /// # Examples
    /// ```rust
    /// use starberry_cookies::config::CookieConfig;
    /// use starberry_cookies::service::HttpCookieService;
    ///
    /// let service = HttpCookieService::from_pairs([("theme", "dark")], CookieConfig::default());
    /// assert_eq!(service.cookie("theme").unwrap().get_value(), "dark");
    /// ```
    pub fn from_pairs<I, K, V>(pairs: I, config: CookieConfig) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToString,
    {
        Self::from_cookies(pairs.into_iter().collect(), config)
    }

    fn from_cookies(cookies: CookieMap, config: CookieConfig) -> Self {
        let request_cookies = if config.effective_encode_values() {
            let mut decoded = CookieMap::new();
            for (_, mut cookie) in cookies {
                let value = decode_cookie_value(cookie.get_value());
                cookie.set_value(value);
                decoded.insert(cookie);
            }
            decoded
        } else {
            cookies
        };
        debug!(count = request_cookies.len(), "cookie snapshot built from request");
        Self {
            request_cookies,
            pending: PendingCookies::new(),
            config,
        }
    }

    /// Adopts the `set-cookie` values already staged on `response`, so they
    /// are deduplicated like values staged through this service.
    pub fn with_response(mut self, response: &HttpMeta) -> Self {
        for value in response.set_cookie_values() {
            self.pending.append(value);
        }
        self
    }

    pub fn config(&self) -> &CookieConfig {
        &self.config
    }

    pub fn pending(&self) -> &PendingCookies {
        &self.pending
    }

    /// Writes the staged values to `response` as its `set-cookie` header,
    /// replacing whatever the header held.
    pub fn commit(&self, response: &mut HttpMeta) {
        debug!(count = self.pending.len(), "committing staged cookies");
        response.replace_set_cookies(self.pending.values().to_vec());
    }

    // --------------------------------------------------
    // Reads
    // --------------------------------------------------

    pub fn cookies(&self) -> impl Iterator<Item = &Cookie> {
        self.request_cookies.values()
    }

    pub fn cookie(&self, name: &str) -> Option<&Cookie> {
        self.request_cookies.get(name)
    }

    // --------------------------------------------------
    // Mutations
    // --------------------------------------------------

    /// Translates a cookie into options: no expiry or [`SESSION_EXPIRY`] stays
    /// a session cookie, a missing or empty path takes the configured default.
    pub fn options_for(&self, cookie: &Cookie) -> CookieOptions {
        let path = match cookie.path.as_deref() {
            Some(path) if !path.is_empty() => path.to_string(),
            _ => self.config.effective_default_path().to_string(),
        };
        CookieOptions {
            expires: cookie.expires.filter(|at| *at != SESSION_EXPIRY),
            path: Some(path),
            http_only: cookie.http_only,
            secure: cookie.secure,
            same_site: self.config.effective_same_site(),
            ..CookieOptions::default()
        }
    }

    pub fn stage_cookie(&mut self, cookie: &Cookie) -> Result<()> {
        let options = self.options_for(cookie);
        self.stage_with_options(&cookie.name, &cookie.value, &options)
    }

    /// Replaces any staged value for `name` with a new one.
    pub fn stage_with_options(&mut self, name: &str, value: &str, options: &CookieOptions) -> Result<()> {
        if let Err(err) = validate_name(name) {
            warn!(name, "rejected cookie with invalid name");
            return Err(err);
        }
        let replaced = self.pending.remove_named(name).is_some();
        let value = if self.config.effective_encode_values() {
            encode_cookie_value(value)
        } else {
            value.to_string()
        };
        self.pending.append(options.set_cookie_value(name, &value));
        debug!(name, replaced, "staged cookie");
        Ok(())
    }

    /// Drops any staged value for `name`. If the request carried the cookie,
    /// the client is told to delete it and the snapshot forgets it.
    pub fn expire(&mut self, name: &str) {
        let dropped = self.pending.remove_named(name).is_some();
        let in_request = self.request_cookies.remove(name).is_some();
        if in_request {
            let path = self.config.effective_default_path().to_string();
            self.pending.append_delete(name, &path);
        }
        debug!(name, dropped, in_request, "expired cookie");
    }

    /// Expires every cookie of the request. Values staged for names the
    /// request did not carry are kept.
    pub fn expire_all(&mut self) {
        for name in self.request_cookies.names() {
            self.expire(&name);
        }
        self.request_cookies.clear();
    }
}

fn note_cancellation(cancel: Option<&CancellationToken>) {
    if cancel.is_some_and(CancellationToken::is_cancelled) {
        trace!("cancellation requested, cookie operations complete synchronously");
    }
}

#[async_trait]
impl CookieService for HttpCookieService {
    async fn get_all(&self) -> Vec<Cookie> {
        self.cookies().cloned().collect()
    }

    async fn get(&self, name: &str) -> Option<Cookie> {
        self.cookie(name).cloned()
    }

    async fn set(&mut self, cookie: Cookie, cancel: Option<&CancellationToken>) -> Result<()> {
        note_cancellation(cancel);
        self.stage_cookie(&cookie)
    }

    async fn set_many(&mut self, cookies: Vec<Cookie>, cancel: Option<&CancellationToken>) -> Result<()> {
        note_cancellation(cancel);
        if let Some(err) = cookies.iter().find_map(|cookie| cookie.validate().err()) {
            warn!(%err, "rejected cookie batch");
            return Err(err);
        }
        for cookie in &cookies {
            self.stage_cookie(cookie)?;
        }
        Ok(())
    }

    async fn set_value(&mut self, name: &str, value: &str, cancel: Option<&CancellationToken>) -> Result<()> {
        note_cancellation(cancel);
        self.stage_cookie(&Cookie::new(name, value))
    }

    async fn set_with_expiry(
        &mut self,
        name: &str,
        value: &str,
        expires: DateTime<Utc>,
        cancel: Option<&CancellationToken>,
    ) -> Result<()> {
        note_cancellation(cancel);
        self.stage_cookie(&Cookie::new(name, value).expires(expires))
    }

    async fn set_with_options(
        &mut self,
        name: &str,
        value: &str,
        options: CookieOptions,
        cancel: Option<&CancellationToken>,
    ) -> Result<()> {
        note_cancellation(cancel);
        self.stage_with_options(name, value, &options)
    }

    async fn remove(&mut self, name: &str, cancel: Option<&CancellationToken>) {
        note_cancellation(cancel);
        self.expire(name);
    }

    async fn remove_all(&mut self, cancel: Option<&CancellationToken>) {
        note_cancellation(cancel);
        self.expire_all();
    }
}
