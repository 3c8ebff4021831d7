use std::fmt;

/// Errors raised by the cookie service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CookieError {
    /// The name is empty or contains a character that would corrupt a
    /// `Set-Cookie` fragment (whitespace, control characters, `,`, `;`, `=`).
    InvalidName(String),
}

impl fmt::Display for CookieError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidName(name) if name.is_empty() => write!(f, "Cookie name cannot be empty"),
            Self::InvalidName(name) => write!(f, "Invalid cookie name: {:?}", name),
        }
    }
}

impl std::error::Error for CookieError {}

pub type Result<T> = std::result::Result<T, CookieError>;
