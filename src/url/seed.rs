use crate::{UrlError, UrlResult};
use url::Url;

/// Parses user input into the seed URL of a crawl
///
/// The input must be a full absolute URL including its scheme; surrounding
/// whitespace is ignored. Only `http` and `https` URLs with a host are
/// accepted, since those are the only ones a crawl can fetch.
///
/// # Examples
///
/// ```
/// use webcrawl::url::parse_seed_url;
///
/// let seed = parse_seed_url("https://monzo.com").unwrap();
/// assert_eq!(seed.as_str(), "https://monzo.com/");
///
/// assert!(parse_seed_url("monzo.com").is_err());
/// ```
pub fn parse_seed_url(input: &str) -> UrlResult<Url> {
    let trimmed = input.trim();

    let url = Url::parse(trimmed).map_err(|source| UrlError::Parse {
        input: trimmed.to_string(),
        source,
    })?;

    match url.scheme() {
        "http" | "https" => {}
        other => return Err(UrlError::InvalidScheme(other.to_string())),
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost(trimmed.to_string()));
    }

    Ok(url)
}
