use serde::Deserialize;

use crate::http::options::SameSite;

/// Defaults applied by the cookie service.
///
/// Each parameter is either explicitly set or falls back to its default.
/// Can be deserialized from an application's config file; missing keys stay unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CookieConfig {
    /// Path for cookies that do not carry one and for delete instructions (None = `/`)
    default_path: Option<String>,

    /// SameSite for cookies staged without explicit options (None = unspecified)
    same_site: Option<SameSite>,

    /// Percent-encode outgoing values and decode incoming ones (None = true)
    encode_values: Option<bool>,
}

const DEFAULT_PATH: &str = "/";
const DEFAULT_ENCODE_VALUES: bool = true;

impl CookieConfig {
    /// Creates a config with every parameter unset
    ///
    /// # Examples
    /// ```
    /// use starberry_cookies::config::CookieConfig;
    /// let config = CookieConfig::new();
    /// assert!(config.default_path().is_none());
    /// assert_eq!(config.effective_default_path(), "/");
    /// ```
    pub fn new() -> Self {
        Self {
            default_path: None,
            same_site: None,
            encode_values: None,
        }
    }

    // --------------------------------------------------
    // Default path
    // --------------------------------------------------

    pub fn default_path(&self) -> Option<&str> {
        self.default_path.as_deref()
    }

    pub fn set_default_path(&mut self, path: Option<String>) {
        self.default_path = path;
    }

    pub fn with_default_path<T: Into<String>>(mut self, path: T) -> Self {
        self.default_path = Some(path.into());
        self
    }

    /// An empty configured path counts as unset
    pub fn effective_default_path(&self) -> &str {
        match self.default_path.as_deref() {
            Some(path) if !path.is_empty() => path,
            _ => DEFAULT_PATH,
        }
    }

    // --------------------------------------------------
    // SameSite
    // --------------------------------------------------

    pub fn same_site(&self) -> Option<SameSite> {
        self.same_site
    }

    pub fn set_same_site(&mut self, same_site: Option<SameSite>) {
        self.same_site = same_site;
    }

    pub fn with_same_site(mut self, same_site: SameSite) -> Self {
        self.same_site = Some(same_site);
        self
    }

    pub fn effective_same_site(&self) -> SameSite {
        self.same_site.unwrap_or_default()
    }

    // --------------------------------------------------
    // Value encoding
    // --------------------------------------------------

    pub fn encode_values(&self) -> Option<bool> {
        self.encode_values
    }

    pub fn set_encode_values(&mut self, encode: Option<bool>) {
        self.encode_values = encode;
    }

    pub fn with_encode_values(mut self, encode: bool) -> Self {
        self.encode_values = Some(encode);
        self
    }

    pub fn effective_encode_values(&self) -> bool {
        self.encode_values.unwrap_or(DEFAULT_ENCODE_VALUES)
    }
}
