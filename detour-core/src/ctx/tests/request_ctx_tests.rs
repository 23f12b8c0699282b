use crate::ctx::RequestCtx;
use http::{HeaderMap, HeaderValue, Method, Uri, header};
use pretty_assertions::assert_eq;

fn host_headers(host: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::HOST, HeaderValue::from_str(host).unwrap());
    headers
}

#[test]
fn hydrate_origin_form_target() {
    // Arrange
    let mut ctx = RequestCtx::empty();
    let uri: Uri = "/a/b?x=1".parse().unwrap();

    // Act
    ctx.hydrate(Method::GET, uri, host_headers("example.com"), false);

    // Assert
    assert_eq!(ctx.raw_target, "/a/b?x=1");
    assert_eq!(ctx.host, "example.com");
    assert!(!ctx.tls);
}

#[test]
fn hydrate_absolute_form_target() {
    // Arrange
    let mut ctx = RequestCtx::empty();
    let uri: Uri = "http://other.example:9090/path?q=1".parse().unwrap();

    // Act
    ctx.hydrate(Method::GET, uri, host_headers("example.com"), false);

    // Assert
    assert_eq!(ctx.raw_target, "http://other.example:9090/path?q=1");
    // The declared host is still the Host header; the absolute-form target
    // only wins during canonical URL reconstruction.
    assert_eq!(ctx.host, "example.com");
}

#[test]
fn host_falls_back_to_uri_authority() {
    // Arrange (HTTP/2 requests carry :authority in the URI, not a Host header)
    let mut ctx = RequestCtx::empty();
    let uri: Uri = "http://example.com:8080/x".parse().unwrap();

    // Act
    ctx.hydrate(Method::GET, uri, HeaderMap::new(), false);

    // Assert
    assert_eq!(ctx.host, "example.com:8080");
}

#[test]
fn missing_host_degrades_to_empty() {
    let mut ctx = RequestCtx::empty();
    let uri: Uri = "/x".parse().unwrap();

    ctx.hydrate(Method::GET, uri, HeaderMap::new(), false);

    assert_eq!(ctx.host, "");
}

#[test]
fn upstream_path_defaults_to_original_target() {
    let mut ctx = RequestCtx::empty();
    let uri: Uri = "/a/b?x=1".parse().unwrap();

    ctx.hydrate(Method::GET, uri, host_headers("example.com"), false);

    assert_eq!(ctx.upstream_path(), "/a/b?x=1");
}

#[test]
fn upstream_path_override_wins() {
    let mut ctx = RequestCtx::empty();
    let uri: Uri = "/a/b?x=1".parse().unwrap();
    ctx.hydrate(Method::GET, uri, host_headers("example.com"), false);

    ctx.upstream_path = Some("/rewritten".to_string());

    assert_eq!(ctx.upstream_path(), "/rewritten");
}
