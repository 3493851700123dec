//! Integration tests for the crawler
//!
//! The end-to-end scenarios run against an in-memory fixture site; the HTTP
//! tests use wiremock to stand up mock servers.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use url::Url;
use webcrawl::config::{Config, FetcherConfig};
use webcrawl::crawler::{crawl, Crawler, Document, DocumentFetcher, HttpFetcher, LinkExtractor};
use webcrawl::url::BaseDomain;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const HOMEPAGE_URL: &str = "http://my-homepage.com";
const A_URL: &str = "http://my-homepage.com/a";
const B_URL: &str = "http://my-homepage.com/b";
const C_URL: &str = "http://my-homepage.com/c";
const AB_URL: &str = "http://my-homepage.com/a/b";

/// Builds an HTML page with one anchor per href
///
/// The head carries a stylesheet, favicon and script so that only `<a>`
/// elements are shown to contribute links.
fn build_page_with_links(hrefs: &[&str]) -> String {
    let mut html = String::from(
        r#"<html lang="en-us">
   <head>
      <script type="text/javascript" async="" src="//j.6sc.co/6si.min.js"></script>
      <meta property="og:description" content="A test page">
      <link rel="shortcut icon" href="/assets/images/global/favicon.ico">
      <link rel="stylesheet" href="https://styles.css">
      <script type="text/javascript" src="https://a-script"></script>
   </head><body>"#,
    );

    for href in hrefs {
        html.push_str(&format!(r#"<div><a href="{}">link</a></div>"#, href));
    }

    html.push_str("</body></html>");
    html
}

/// In-memory site keyed by serialized URL, recording every request
struct FixtureSite {
    pages: HashMap<String, String>,
    requests: Rc<RefCell<Vec<String>>>,
}

impl FixtureSite {
    fn new() -> Self {
        Self {
            pages: HashMap::new(),
            requests: Rc::new(RefCell::new(Vec::new())),
        }
    }

    fn page(mut self, url: &str, hrefs: &[&str]) -> Self {
        let key = Url::parse(url).expect("fixture URL").to_string();
        self.pages.insert(key, build_page_with_links(hrefs));
        self
    }
}

impl DocumentFetcher for FixtureSite {
    async fn fetch_document(&self, url: &Url) -> Option<Document> {
        self.requests.borrow_mut().push(url.to_string());
        self.pages
            .get(url.as_str())
            .map(|body| Document::parse(url.clone(), body))
    }
}

/// The five-page site:
///
/// ```text
/// http://my-homepage.com      -> itself, ./a
/// http://my-homepage.com/a    -> home, /a/b, b
/// http://my-homepage.com/b    -> home, a, c, a/b
/// http://my-homepage.com/c    -> home, a, a, off-domain, a/b, another-page (unavailable)
/// http://my-homepage.com/a/b  -> ../a
/// ```
fn homepage_site() -> FixtureSite {
    let another_page = format!("{}/another-page", HOMEPAGE_URL);

    FixtureSite::new()
        .page(HOMEPAGE_URL, &[HOMEPAGE_URL, "./a"])
        .page(A_URL, &[HOMEPAGE_URL, "/a/b", B_URL])
        .page(B_URL, &[HOMEPAGE_URL, A_URL, C_URL, AB_URL])
        .page(
            C_URL,
            &[
                HOMEPAGE_URL,
                A_URL,
                A_URL,
                "http://off-domain.com",
                AB_URL,
                another_page.as_str(),
            ],
        )
        .page(AB_URL, &["../a"])
}

#[tokio::test]
async fn test_end_to_end_report() {
    let site = homepage_site();
    let mut out = Vec::new();

    let seed = Url::parse(HOMEPAGE_URL).expect("seed");
    let stats = Crawler::for_seed(site, seed, &mut out)
        .crawl()
        .await
        .expect("Crawl failed");

    let expected = [
        "http://my-homepage.com/",
        "- http://my-homepage.com/",
        "- http://my-homepage.com/a",
        "http://my-homepage.com/a",
        "- http://my-homepage.com/",
        "- http://my-homepage.com/a/b",
        "- http://my-homepage.com/b",
        "http://my-homepage.com/a/b",
        "- http://my-homepage.com/a",
        "http://my-homepage.com/b",
        "- http://my-homepage.com/",
        "- http://my-homepage.com/a",
        "- http://my-homepage.com/c",
        "- http://my-homepage.com/a/b",
        "http://my-homepage.com/c",
        "- http://my-homepage.com/",
        "- http://my-homepage.com/a",
        "- http://my-homepage.com/a/b",
        "- http://my-homepage.com/another-page",
        "http://my-homepage.com/another-page",
    ];
    let mut expected = expected.join("\n");
    expected.push('\n');

    assert_eq!(String::from_utf8(out).expect("utf-8 report"), expected);

    assert_eq!(stats.pages_visited, 6);
    assert_eq!(stats.pages_unavailable, 1);
    assert_eq!(stats.links_reported, 14);
    assert_eq!(stats.links_enqueued, 5);
}

#[tokio::test]
async fn test_end_to_end_visit_order() {
    let site = homepage_site();
    let requests = Rc::clone(&site.requests);
    let mut out = Vec::new();

    let seed = Url::parse(HOMEPAGE_URL).expect("seed");
    Crawler::for_seed(site, seed, &mut out)
        .crawl()
        .await
        .expect("Crawl failed");

    assert_eq!(
        *requests.borrow(),
        vec![
            "http://my-homepage.com/",
            "http://my-homepage.com/a",
            "http://my-homepage.com/a/b",
            "http://my-homepage.com/b",
            "http://my-homepage.com/c",
            "http://my-homepage.com/another-page",
        ]
    );

    let report = String::from_utf8(out).expect("utf-8 report");
    assert!(!report.contains("off-domain"));
}

#[tokio::test]
async fn test_unavailable_page_emits_no_links() {
    let site = FixtureSite::new()
        .page("http://gap.test/", &["/missing", "/present"])
        .page("http://gap.test/present", &["/after"]);
    let mut out = Vec::new();

    let seed = Url::parse("http://gap.test/").expect("seed");
    let stats = Crawler::for_seed(site, seed, &mut out)
        .crawl()
        .await
        .expect("Crawl failed");

    assert_eq!(
        String::from_utf8(out).expect("utf-8 report"),
        "http://gap.test/\n\
         - http://gap.test/missing\n\
         - http://gap.test/present\n\
         http://gap.test/missing\n\
         http://gap.test/present\n\
         - http://gap.test/after\n\
         http://gap.test/after\n"
    );
    assert_eq!(stats.pages_unavailable, 2);
}

#[tokio::test]
async fn test_explicit_base_domain_filters_links() {
    let site = FixtureSite::new()
        .page("http://my-domain.com/", &["http://my-domain.com/x", "http://other-domain.com/x"])
        .page("http://my-domain.com/x", &[]);
    let mut out = Vec::new();

    let base = BaseDomain::new(Url::parse("http://my-domain.com").expect("base"));
    let seed = Url::parse("http://my-domain.com/").expect("seed");
    Crawler::new(LinkExtractor::new(base), site, seed, &mut out)
        .crawl()
        .await
        .expect("Crawl failed");

    assert_eq!(
        String::from_utf8(out).expect("utf-8 report"),
        "http://my-domain.com/\n- http://my-domain.com/x\nhttp://my-domain.com/x\n"
    );
}

fn html_response(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "text/html")
}

fn test_fetcher() -> HttpFetcher {
    let config = FetcherConfig {
        user_agent: "TestBot/1.0".to_string(),
        timeout_secs: 5,
        connect_timeout_secs: 5,
        max_redirects: 5,
    };
    HttpFetcher::new(&config).expect("Failed to build fetcher")
}

#[tokio::test]
async fn test_http_fetcher_returns_html_document() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(html_response(build_page_with_links(&["/other"])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let url = Url::parse(&format!("{}/page", mock_server.uri())).expect("page url");
    let document = test_fetcher()
        .fetch_document(&url)
        .await
        .expect("document should be available");

    assert_eq!(document.url(), &url);

    let base = BaseDomain::new(Url::parse(&mock_server.uri()).expect("base"));
    let links = LinkExtractor::new(base).scrape_for_links(&document);
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].as_str(), format!("{}/other", mock_server.uri()));
}

#[tokio::test]
async fn test_http_fetcher_error_status_is_unavailable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let fetcher = test_fetcher();
    let broken = Url::parse(&format!("{}/broken", mock_server.uri())).expect("url");
    let missing = Url::parse(&format!("{}/missing", mock_server.uri())).expect("url");

    assert!(fetcher.fetch_document(&broken).await.is_none());
    assert!(fetcher.fetch_document(&missing).await.is_none());
}

#[tokio::test]
async fn test_http_fetcher_non_html_is_unavailable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/logo.png"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(vec![0x89, b'P', b'N', b'G'], "image/png"),
        )
        .mount(&mock_server)
        .await;

    let url = Url::parse(&format!("{}/logo.png", mock_server.uri())).expect("url");
    assert!(test_fetcher().fetch_document(&url).await.is_none());
}

#[tokio::test]
async fn test_http_fetcher_unreachable_is_unavailable() {
    // Nothing listens on the discard port
    let url = Url::parse("http://127.0.0.1:9/").expect("url");
    assert!(test_fetcher().fetch_document(&url).await.is_none());
}

#[tokio::test]
async fn test_http_fetcher_resolves_against_redirect_target() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/docs/new/"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/docs/new/"))
        .respond_with(html_response(build_page_with_links(&["child"])))
        .mount(&mock_server)
        .await;

    let old = Url::parse(&format!("{}/old", mock_server.uri())).expect("url");
    let document = test_fetcher()
        .fetch_document(&old)
        .await
        .expect("document should be available");

    assert_eq!(
        document.url().as_str(),
        format!("{}/docs/new/", mock_server.uri())
    );

    let base = BaseDomain::new(Url::parse(&mock_server.uri()).expect("base"));
    let links = LinkExtractor::new(base).scrape_for_links(&document);
    assert_eq!(links.len(), 1);
    assert_eq!(
        links[0].as_str(),
        format!("{}/docs/new/child", mock_server.uri())
    );
}

#[tokio::test]
async fn test_full_crawl_over_http() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_response(build_page_with_links(&[
            "/page1",
            "page2",
            "http://other.test/x",
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page1"))
        .respond_with(html_response(build_page_with_links(&["/", "/page2", "/gone"])))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page2"))
        .respond_with(html_response(build_page_with_links(&["./logo.png"])))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/logo.png"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(vec![0u8; 8], "image/png"))
        .expect(1)
        .mount(&mock_server)
        .await;

    // "/gone" has no mock and answers 404

    let mut out = Vec::new();
    let stats = crawl(&Config::default(), &base_url, &mut out)
        .await
        .expect("Crawl failed");

    let expected = format!(
        "{b}/\n\
         - {b}/page1\n\
         - {b}/page2\n\
         {b}/page1\n\
         - {b}/\n\
         - {b}/page2\n\
         - {b}/gone\n\
         {b}/page2\n\
         - {b}/logo.png\n\
         {b}/gone\n\
         {b}/logo.png\n",
        b = base_url
    );
    assert_eq!(String::from_utf8(out).expect("utf-8 report"), expected);

    assert_eq!(stats.pages_visited, 5);
    assert_eq!(stats.pages_unavailable, 2);

    // Wiremock verifies the expect(1) counts when mock_server drops
}
