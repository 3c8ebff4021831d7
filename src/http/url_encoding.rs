use percent_encoding::{percent_decode_str, percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Everything outside the RFC 3986 unreserved set is escaped
const COOKIE_VALUE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Encodes a cookie value so it can sit inside a `Set-Cookie` header
///
/// # Example
/// ```
/// use starberry_cookies::http::url_encoding::encode_cookie_value;
/// assert_eq!(encode_cookie_value("a b;c"), "a%20b%3Bc");
/// assert_eq!(encode_cookie_value("dark"), "dark");
/// ```
pub fn encode_cookie_value(input: &str) -> String {
    percent_encode(input.as_bytes(), COOKIE_VALUE_SET).to_string()
}

/// Decodes a cookie value received in a `Cookie` header.
///
/// Invalid UTF-8 sequences are replaced rather than rejected, the value is
/// still handed to the application.
///
/// # Example
/// ```
/// use starberry_cookies::http::url_encoding::decode_cookie_value;
/// assert_eq!(decode_cookie_value("a%20b%3Bc"), "a b;c");
/// ```
pub fn decode_cookie_value(input: &str) -> String {
    percent_decode_str(input)
        .decode_utf8_lossy()
        .into_owned()
}
