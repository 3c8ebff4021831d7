use super::cookie::CookieMap;
use std::collections::HashMap;

/// Represents a value for an HTTP header, which can be either a single string or multiple values.
///
/// Most headers combine multiple values with commas, but `Set-Cookie` keeps
/// every value as its own header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderValue {
    /// A single header value
    Single(String),
    /// Multiple header values
    Multiple(Vec<String>),
}

impl HeaderValue {
    /// Create a new HeaderValue from a single string.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use starberry_cookies::http::meta::HeaderValue;
    /// let header = HeaderValue::new("sessionId=abc123");
    /// assert_eq!(header.len(), 1);
    /// ```
    pub fn new<T: Into<String>>(value: T) -> Self {
        HeaderValue::Single(value.into())
    }

    /// Add a value to the header without combining it with existing values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use starberry_cookies::http::meta::HeaderValue;
    /// let mut cookies = HeaderValue::new("sessionId=abc123; path=/");
    /// cookies.add_without_combining("theme=dark; path=/");
    ///
    /// assert_eq!(cookies.values(), vec!["sessionId=abc123; path=/", "theme=dark; path=/"]);
    /// ```
    pub fn add_without_combining<T: Into<String>>(&mut self, value: T) {
        match self {
            HeaderValue::Single(_) => {
                let original = std::mem::replace(self, HeaderValue::Multiple(Vec::new()));
                if let HeaderValue::Single(s) = original {
                    *self = HeaderValue::Multiple(vec![s, value.into()]);
                }
            }
            HeaderValue::Multiple(v) => v.push(value.into()),
        }
    }

    /// Returns the number of values in this HeaderValue.
    pub fn len(&self) -> usize {
        match self {
            HeaderValue::Single(_) => 1,
            HeaderValue::Multiple(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Gets all values as a vector of string slices.
    pub fn values(&self) -> Vec<&str> {
        match self {
            HeaderValue::Single(value) => vec![value.as_str()],
            HeaderValue::Multiple(values) => values.iter().map(String::as_str).collect(),
        }
    }

    /// Formats the value as header lines, one line per value.
    ///
    /// # Examples
    /// ```rust
    /// use starberry_cookies::http::meta::HeaderValue;
    /// let mut header = HeaderValue::new("a=1; path=/");
    /// header.add_without_combining("b=2; path=/");
    /// assert_eq!(
    ///     header.into_header_string("Set-Cookie"),
    ///     "Set-Cookie: a=1; path=/\r\nSet-Cookie: b=2; path=/\r\n"
    /// );
    /// ```
    pub fn into_header_string(&self, header_name: &str) -> String {
        let mut result = String::new();
        for v in self.values() {
            result.push_str(&format!("{}: {}\r\n", header_name, v));
        }
        result
    }
}

impl From<String> for HeaderValue {
    fn from(value: String) -> Self {
        HeaderValue::new(value)
    }
}

impl From<&str> for HeaderValue {
    fn from(value: &str) -> Self {
        HeaderValue::new(value.to_string())
    }
}

impl From<Vec<String>> for HeaderValue {
    fn from(values: Vec<String>) -> Self {
        HeaderValue::Multiple(values)
    }
}

impl IntoIterator for HeaderValue {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        match self {
            HeaderValue::Single(s) => vec![s].into_iter(),
            HeaderValue::Multiple(v) => v.into_iter(),
        }
    }
}

/// Header section of a request or response.
///
/// Keys are stored lowercase. Request cookies come from `cookie`, response
/// cookies live in `set-cookie`.
#[derive(Debug, Clone, Default)]
pub struct HttpMeta {
    pub header: HashMap<String, HeaderValue>,
}

impl HttpMeta {
    pub fn new(header: HashMap<String, HeaderValue>) -> Self {
        let header = header
            .into_iter()
            .map(|(key, value)| (key.to_lowercase(), value))
            .collect();
        Self { header }
    }

    pub fn get_header<T: AsRef<str>>(&self, key: T) -> Option<&HeaderValue> {
        self.header.get(&key.as_ref().to_lowercase())
    }

    /// Sets a header, replacing every previous value under that key.
    pub fn set_attribute<T: AsRef<str>, S: Into<HeaderValue>>(&mut self, key: T, value: S) {
        self.header.insert(key.as_ref().to_lowercase(), value.into());
    }

    /// Parses the request `cookie` header, in the order the cookies were sent.
    ///
    /// Several `cookie` header lines are merged into one map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use starberry_cookies::http::meta::HttpMeta;
    ///
    /// let mut meta = HttpMeta::default();
    /// meta.set_attribute("Cookie", "sessionId=abc123; theme=dark");
    /// assert_eq!(meta.parse_cookies().get("theme").unwrap().get_value(), "dark");
    /// ```
    pub fn parse_cookies(&self) -> CookieMap {
        let mut cookie_map = CookieMap::new();
        if let Some(value) = self.header.get("cookie") {
            for line in value.values() {
                cookie_map.extend(CookieMap::parse(line));
            }
        }
        cookie_map
    }

    /// The `set-cookie` values staged on this response, in order.
    pub fn set_cookie_values(&self) -> Vec<String> {
        match self.header.get("set-cookie") {
            Some(value) => value.values().into_iter().map(str::to_string).collect(),
            None => Vec::new(),
        }
    }

    /// Replaces the `set-cookie` header. An empty list removes the header.
    pub fn replace_set_cookies(&mut self, values: Vec<String>) {
        if values.is_empty() {
            self.header.remove("set-cookie");
        } else {
            self.header.insert("set-cookie".to_string(), HeaderValue::Multiple(values));
        }
    }
}
