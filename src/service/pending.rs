//! The ordered log of `Set-Cookie` values staged on a response.

use crate::http::cookie::EXPIRED_DATE;

/// Staged `Set-Cookie` values, in the order they will be sent.
///
/// Entries are matched to a cookie by the literal `name=` prefix. The log
/// itself does not enforce one entry per name; the service removes the old
/// entry before appending a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingCookies {
    entries: Vec<String>,
}

impl PendingCookies {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Seeds the log with values already staged elsewhere.
    pub fn from_values<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self { entries: values.into_iter().map(Into::into).collect() }
    }

    pub fn append<T: Into<String>>(&mut self, value: T) {
        self.entries.push(value.into());
    }

    /// Appends an instruction for the client to delete `name`.
    ///
    /// # Examples
    /// ```rust
    /// use starberry_cookies::service::pending::PendingCookies;
    /// let mut pending = PendingCookies::new();
    /// pending.append_delete("theme", "/");
    /// assert_eq!(pending.values(), ["theme=; expires=Thu, 01 Jan 1970 00:00:00 GMT; path=/"]);
    /// ```
    pub fn append_delete(&mut self, name: &str, path: &str) {
        self.entries.push(format!("{}=; expires={}; path={}", name, EXPIRED_DATE, path));
    }

    /// Removes the first entry for `name`, matched case-sensitively by the
    /// `name=` prefix. At most one entry is removed.
    pub fn remove_named(&mut self, name: &str) -> Option<String> {
        let index = self.position(name)?;
        Some(self.entries.remove(index))
    }

    /// The first entry staged for `name`.
    pub fn find(&self, name: &str) -> Option<&str> {
        self.position(name).map(|index| self.entries[index].as_str())
    }

    /// Number of entries staged for `name`.
    pub fn count_named(&self, name: &str) -> usize {
        self.entries.iter().filter(|entry| Self::matches(entry, name)).count()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|entry| Self::matches(entry, name))
    }

    fn matches(entry: &str, name: &str) -> bool {
        entry
            .strip_prefix(name)
            .is_some_and(|rest| rest.starts_with('='))
    }

    pub fn values(&self) -> &[String] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for PendingCookies {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a PendingCookies {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_matches_whole_name_only() {
        let mut pending = PendingCookies::from_values(["ab=1; path=/", "a=2; path=/"]);
        assert_eq!(pending.remove_named("a").as_deref(), Some("a=2; path=/"));
        assert_eq!(pending.values(), ["ab=1; path=/"]);
    }

    #[test]
    fn test_remove_is_case_sensitive() {
        let mut pending = PendingCookies::from_values(["Theme=dark; path=/"]);
        assert_eq!(pending.remove_named("theme"), None);
        assert_eq!(pending.len(), 1);
    }

    #[test]
    fn test_remove_takes_first_match_only() {
        let mut pending = PendingCookies::from_values(["a=1", "b=2", "a=3"]);
        pending.remove_named("a");
        assert_eq!(pending.values(), ["b=2", "a=3"]);
        assert_eq!(pending.count_named("a"), 1);
        assert_eq!(pending.find("a"), Some("a=3"));
    }

    #[test]
    fn test_into_iter_keeps_order() {
        let mut pending = PendingCookies::new();
        assert!(pending.is_empty());
        pending.append("a=1; path=/");
        let collected: Vec<String> = pending.into_iter().collect();
        assert_eq!(collected, vec!["a=1; path=/"]);
    }
}
