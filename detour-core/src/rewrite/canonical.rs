use crate::ctx::RequestCtx;
use once_cell::sync::Lazy;
use regex::Regex;

pub(crate) const SCHEME_HTTP: &str = "http";
pub(crate) const SCHEME_HTTPS: &str = "https";

/// Recognizes absolute-form request targets: scheme, then an optional host
/// (bracketed IPv6 literal or dotted/word name), an optional `:port`, and
/// the remainder of the target.
static ABSOLUTE_TARGET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(https?)://(\[[\w:.]+\]|[\w._-]+)?(:\d+)?(.*)$")
        .expect("absolute-target pattern is valid")
});

/// Reconstruct the canonical absolute URL of a request.
///
/// Defaults come from the `Host` header and the wire request-target; an
/// absolute-form target overrides scheme, host and port piecewise, with
/// empty host/port captures keeping the defaults. Transport truth wins for
/// the scheme: a TLS connection is `https` no matter what the target claims.
///
/// This function never fails. A missing or malformed host yields a
/// syntactically odd but usable best-effort string.
pub fn canonical_url(ctx: &RequestCtx) -> String {
    let mut scheme = SCHEME_HTTP;
    let mut host = ctx.host.as_str();
    let mut port = "";
    let mut target = ctx.raw_target.as_str();

    if let Some(caps) = ABSOLUTE_TARGET.captures(&ctx.raw_target) {
        if let Some(m) = caps.get(1) {
            scheme = m.as_str();
        }

        if let Some(m) = caps.get(2).filter(|m| !m.as_str().is_empty()) {
            host = m.as_str();
        }

        if let Some(m) = caps.get(3).filter(|m| !m.as_str().is_empty()) {
            port = m.as_str();
        }

        // The remainder is taken as-is: an absolute target with no path has
        // an empty path, not the default one.
        target = caps.get(4).map_or("", |m| m.as_str());
    }

    if ctx.tls {
        scheme = SCHEME_HTTPS;
    }

    // The port capture carries its own leading colon; the target its own
    // leading slash.
    format!("{scheme}://{host}{port}{target}")
}
