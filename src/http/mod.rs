pub mod cookie;
pub mod meta;
pub mod options;
pub mod url_encoding;
