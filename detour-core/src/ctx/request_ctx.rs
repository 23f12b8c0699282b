use http::{HeaderMap, Method, Uri, header};
use pingora::prelude::Session;

/// Canonical request context passed through the Detour pipeline
#[derive(Debug)]
pub struct RequestCtx {
    /// HTTP method (immutable once hydrated)
    pub method: Method,

    /// Original URI as received from the client (immutable, for logging/debugging)
    pub original_uri: Uri,

    /// Request-target as it arrived on the wire: an origin-form path+query,
    /// or a full absolute-form URL for forward-proxy-style requests.
    pub raw_target: String,

    /// Declared `Host` header value (`:authority` for HTTP/2); may be empty.
    pub host: String,

    /// Headers (readable by devices)
    pub headers: HeaderMap,

    /// Whether the downstream connection is TLS-secured.
    pub tls: bool,

    /// Optional override for the upstream request target (mutable by devices)
    pub upstream_path: Option<String>,

    /// Headers staged by devices for the gateway to merge into the final
    /// response.
    pub response_headers: HeaderMap,
}

impl Default for RequestCtx {
    fn default() -> Self {
        Self::empty()
    }
}

impl RequestCtx {
    pub fn empty() -> Self {
        Self {
            method: Method::GET,
            original_uri: Uri::default(),
            raw_target: String::new(),
            host: String::new(),
            headers: HeaderMap::new(),
            tls: false,
            upstream_path: None,
            response_headers: HeaderMap::new(),
        }
    }

    /// Create a boundary to decouple session from logic.
    /// This makes testing the hydration code easier.
    pub fn hydrate_from_session(&mut self, session: &Session) {
        let req = session.req_header();

        let tls = session
            .digest()
            .map(|d| d.ssl_digest.is_some())
            .unwrap_or(false);

        self.hydrate(req.method.clone(), req.uri.clone(), req.headers.clone(), tls);
    }

    pub fn hydrate(&mut self, method: Method, uri: Uri, headers: HeaderMap, tls: bool) {
        self.raw_target = raw_target_of(&uri);
        self.host = declared_host(&uri, &headers);
        self.method = method;
        self.original_uri = uri;
        self.headers = headers;
        self.tls = tls;
    }

    /// Target used when proxying upstream
    pub fn upstream_path(&self) -> &str {
        if let Some(path) = self.upstream_path.as_deref() {
            return path;
        }

        self.original_uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/")
    }
}

/// The wire request-target. An absolute-form request line parses into a URI
/// with a scheme; reprinting it restores the full URL.
fn raw_target_of(uri: &Uri) -> String {
    if uri.scheme().is_some() {
        return uri.to_string();
    }

    uri.path_and_query()
        .map(|pq| pq.to_string())
        .unwrap_or_else(|| "/".to_string())
}

fn declared_host(uri: &Uri, headers: &HeaderMap) -> String {
    headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .or_else(|| uri.authority().map(|a| a.to_string()))
        .unwrap_or_default()
}
