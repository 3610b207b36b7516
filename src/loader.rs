//! Loads page HTML from disk or over HTTP.

use std::time::Duration;

use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::Client;
use tracing::{debug, info};
use url::{Host, Url};

use crate::config::{FetchConfig, DEFAULT_USER_AGENT};
use crate::document::HtmlDocument;
use crate::error::{GtmselError, Result};
use crate::resource::ParsedResource;
use crate::types::ResourceKind;

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_FETCH_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl From<&FetchConfig> for LoadOptions {
    fn from(fetch: &FetchConfig) -> Self {
        Self {
            timeout: fetch.timeout,
            user_agent: fetch.user_agent.clone(),
        }
    }
}

/// Raw HTML of `resource`.
pub async fn load_html(resource: &ParsedResource, options: &LoadOptions) -> Result<String> {
    let html = match resource.kind {
        ResourceKind::File => tokio::fs::read_to_string(&resource.value).await?,
        ResourceKind::Url => fetch_html(&resource.value, options).await?,
    };
    info!(
        input = %resource.value,
        kind = resource.kind.as_str(),
        bytes = html.len(),
        "loaded page"
    );
    Ok(html)
}

/// Loads `resource` and parses it into a queryable document.
pub async fn load_document(resource: &ParsedResource, options: &LoadOptions) -> Result<HtmlDocument> {
    let html = load_html(resource, options).await?;
    Ok(HtmlDocument::parse(&html))
}

async fn fetch_html(url: &str, options: &LoadOptions) -> Result<String> {
    let mut builder = Client::builder().timeout(options.timeout);
    // Local dev servers are never behind the system proxy.
    if is_loopback(url) {
        builder = builder.no_proxy();
    }
    let client = builder.build().map_err(GtmselError::Network)?;

    debug!(%url, timeout = ?options.timeout, "fetching page");
    let response = client
        .get(url)
        .header(USER_AGENT, options.user_agent.as_str())
        .header(ACCEPT, "text/html,application/xhtml+xml")
        .send()
        .await
        .map_err(GtmselError::Network)?;

    let status = response.status();
    if !status.is_success() {
        return Err(GtmselError::HttpStatus {
            url: url.to_string(),
            status,
        });
    }

    response.text().await.map_err(GtmselError::Network)
}

fn is_loopback(url: &str) -> bool {
    match Url::parse(url).ok().as_ref().and_then(Url::host) {
        Some(Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
        Some(Host::Ipv4(ip)) => ip.is_loopback(),
        Some(Host::Ipv6(ip)) => ip.is_loopback(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentQuery;
    use std::io::Write;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves one canned HTTP response and hands back the raw request.
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.expect("accept");
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.expect("read request");
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket
                .write_all(response.as_bytes())
                .await
                .expect("write response");
            String::from_utf8_lossy(&request).into_owned()
        });
        (format!("http://{addr}/page"), handle)
    }

    fn url_resource(url: String) -> ParsedResource {
        ParsedResource {
            kind: ResourceKind::Url,
            value: url,
        }
    }

    #[test]
    fn loopback_hosts_are_detected() {
        assert!(is_loopback("http://localhost:3000/"));
        assert!(is_loopback("http://127.0.0.1:8080/page"));
        assert!(is_loopback("http://[::1]/"));
        assert!(!is_loopback("https://example.com/"));
    }

    #[tokio::test]
    async fn loads_local_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".html")
            .tempfile()
            .expect("temp file");
        file.write_all(b"<body><a id=\"x\">x</a></body>").expect("write html");
        let resource = ParsedResource {
            kind: ResourceKind::File,
            value: file.path().to_string_lossy().into_owned(),
        };

        let doc = load_document(&resource, &LoadOptions::default())
            .await
            .expect("load file");
        assert_eq!(doc.query_count("#x").unwrap(), 1);
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let resource = ParsedResource {
            kind: ResourceKind::File,
            value: "/definitely/missing/page.html".to_string(),
        };
        let err = load_html(&resource, &LoadOptions::default()).await.unwrap_err();
        assert!(matches!(err, GtmselError::Io(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn fetches_url_with_configured_user_agent() {
        let (url, server) = serve_once("200 OK", "<body><button>Go</button></body>").await;
        let options = LoadOptions {
            user_agent: "probe/1.0".to_string(),
            ..LoadOptions::default()
        };

        let html = load_html(&url_resource(url), &options).await.expect("fetch");
        assert!(html.contains("<button>Go</button>"));

        let request = server.await.expect("server task").to_ascii_lowercase();
        assert!(request.contains("user-agent: probe/1.0"), "got {request}");
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let (url, server) = serve_once("404 Not Found", "gone").await;
        let err = load_html(&url_resource(url), &LoadOptions::default())
            .await
            .unwrap_err();
        server.await.expect("server task");

        match err {
            GtmselError::HttpStatus { status, .. } => assert_eq!(status.as_u16(), 404),
            other => panic!("expected HttpStatus, got {other:?}"),
        }
    }
}
