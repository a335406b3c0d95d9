//! Resolution of index resources against the base location of a shard set.
//!
//! A shard set is addressed by a *base location*: either an absolute URL
//! (`https://tiles.example.org/names`, `file:///srv/names`) or a plain path
//! prefix (`names`, `/srv/names`). Every resource of the set lives directly
//! under it as `<base>/<name>`, where `name` is a single path segment such as
//! `index_metadata.json` or `mai.json`.
//!
//! The functions in this module refuse names that could escape the base:
//! names must not contain separators or traversal sequences.

use url::Url;

use osmtext_common::{Result, error::ErrorKind};

macro_rules! verify {
    ($expr:expr, $base:expr) => {{
        let result = $expr;
        verify(result, stringify!($expr), $base, "")?;
    }};

    ($expr:expr, $base:expr, $name:expr) => {{
        let result = $expr;
        verify(result, stringify!($expr), $base, $name)?;
    }};
}

/// The verified base location of a shard set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BaseLocation(String);

impl BaseLocation {
    /// Creates a base location from a URL or a path prefix.
    ///
    /// Trailing slashes are trimmed. Absolute URLs must not carry credentials,
    /// a query or a fragment.
    pub fn new(base: &str) -> Result<BaseLocation> {
        let trimmed = base.trim_end_matches('/');
        verify!(!trimmed.is_empty(), base);
        if let Some(url) = parse_absolute_url(trimmed) {
            verify!(url.username().is_empty(), base);
            verify!(url.password().is_none(), base);
            verify!(url.query().is_none(), base);
            verify!(url.fragment().is_none(), base);
        }
        Ok(BaseLocation(trimmed.to_string()))
    }

    /// Returns the base location as a string slice, without a trailing slash.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the base is an absolute URL rather than a path prefix.
    pub fn is_url(&self) -> bool {
        parse_absolute_url(&self.0).is_some()
    }

    /// Resolves a resource name into the full location `<base>/<name>`.
    pub fn resolve(&self, name: &str) -> Result<String> {
        let name = ResourceName::new(name)
            .map_err(|_| make_err("invalid resource name", &self.0, name))?;
        Ok(format!("{}/{}", self.0, &*name))
    }
}

impl std::fmt::Display for BaseLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for BaseLocation {
    type Error = osmtext_common::error::Error;

    fn try_from(base: &str) -> std::result::Result<Self, Self::Error> {
        BaseLocation::new(base)
    }
}

/// A resource name that has been verified to be a single, non-traversing path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceName<'a>(&'a str);

impl<'a> ResourceName<'a> {
    pub fn new(name: &'a str) -> Result<ResourceName<'a>> {
        verify!(Self::is_valid(name), "", name);
        Ok(ResourceName(name))
    }

    pub fn is_valid(name: &str) -> bool {
        !name.is_empty() && !name.contains(['/', '\\']) && Self::is_valid_segment(name)
    }

    fn is_valid_segment(segment: &str) -> bool {
        !matches!(
            segment.to_ascii_lowercase().as_str(),
            ".." | "%2e%2e" | "%2e." | ".%2e" | "." | "%2e"
        )
    }
}

impl std::ops::Deref for ResourceName<'_> {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.0
    }
}

/// Parses `s` as an absolute URL with a real scheme.
///
/// Single-letter schemes are rejected so that Windows drive paths (`C:/idx`)
/// stay path prefixes.
pub(crate) fn parse_absolute_url(s: &str) -> Option<Url> {
    let url = Url::parse(s).ok()?;
    (url.scheme().len() > 1).then_some(url)
}

fn verify(predicate: bool, condition: &str, base: &str, name: &str) -> Result<()> {
    if predicate {
        Ok(())
    } else {
        Err(make_err(condition, base, name))
    }
}

fn make_err(reason: &str, base: &str, name: &str) -> osmtext_common::error::Error {
    ErrorKind::ResolveLocation {
        base: base.to_string(),
        name: name.to_string(),
        reason: reason.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::{BaseLocation, ResourceName};

    #[test]
    fn test_resolve_path_prefix() {
        let base = BaseLocation::new("address").unwrap();
        assert!(!base.is_url());
        assert_eq!(
            base.resolve("index_metadata.json").unwrap(),
            "address/index_metadata.json"
        );
        assert_eq!(base.resolve("mai.json").unwrap(), "address/mai.json");
    }

    #[test]
    fn test_trailing_slashes_trimmed() {
        let base = BaseLocation::new("/srv/names//").unwrap();
        assert_eq!(base.as_str(), "/srv/names");
        assert_eq!(base.resolve("abc.json").unwrap(), "/srv/names/abc.json");
    }

    #[test]
    fn test_resolve_url() {
        let base = BaseLocation::new("https://tiles.example.org/names/").unwrap();
        assert!(base.is_url());
        assert_eq!(
            base.resolve("nor.json").unwrap(),
            "https://tiles.example.org/names/nor.json"
        );
    }

    #[test]
    fn test_windows_drive_is_a_path() {
        let base = BaseLocation::new("C:/names").unwrap();
        assert!(!base.is_url());
    }

    #[test]
    fn test_invalid_bases() {
        assert!(BaseLocation::new("").is_err());
        assert!(BaseLocation::new("///").is_err());
        assert!(BaseLocation::new("https://user:pw@example.org/names").is_err());
        assert!(BaseLocation::new("https://example.org/names?x=1").is_err());
        assert!(BaseLocation::new("https://example.org/names#frag").is_err());
    }

    #[test]
    fn test_invalid_names() {
        let base = BaseLocation::new("names").unwrap();
        assert!(base.resolve("").is_err());
        assert!(base.resolve("..").is_err());
        assert!(base.resolve("%2E%2e").is_err());
        assert!(base.resolve("a/b.json").is_err());
        assert!(base.resolve("a\\b.json").is_err());
        assert!(ResourceName::is_valid("zürich.json"));
    }
}
