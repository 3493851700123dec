use std::fmt;
use url::Url;

/// The fixed URL prefix a crawl is confined to
///
/// A candidate URL is on the base domain iff its serialized form starts with
/// the base domain's serialized form. This is a literal string-prefix test,
/// not a structural host/path comparison: with a base of
/// `http://example.com/docs`, the URL `http://example.com/docs-archive/` also
/// qualifies.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use webcrawl::url::BaseDomain;
///
/// let base = BaseDomain::new(Url::parse("http://my-domain.com").unwrap());
/// assert!(base.contains(&Url::parse("http://my-domain.com/x").unwrap()));
/// assert!(!base.contains(&Url::parse("http://other-domain.com/x").unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseDomain {
    url: Url,
}

impl BaseDomain {
    /// Creates a base domain from an absolute URL
    pub fn new(url: Url) -> Self {
        Self { url }
    }

    /// The base domain URL
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The serialized prefix candidates are matched against
    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    /// Returns true if `candidate` lies on this base domain
    pub fn contains(&self, candidate: &Url) -> bool {
        candidate.as_str().starts_with(self.as_str())
    }
}

impl From<Url> for BaseDomain {
    fn from(url: Url) -> Self {
        Self::new(url)
    }
}

impl fmt::Display for BaseDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
