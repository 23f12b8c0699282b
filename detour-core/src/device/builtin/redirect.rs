use crate::conf::error::ConfigError;
use crate::conf::types::RedirectDeviceConfig;
use crate::ctx::{RequestCtx, ResponseCtx};
use crate::device::core::{Device, DeviceResult};
use crate::rewrite::{Disposition, MatchTrace, RuleSet, canonical_url};
use http::{HeaderMap, HeaderName, HeaderValue, header};
use url::Url;

// Diagnostic headers emitted when debug mode is on.
pub const HEADER_NAME: &str = "x-detour-name";
pub const HEADER_REGEX: &str = "x-detour-regex";
pub const HEADER_REPLACEMENT: &str = "x-detour-replacement";
pub const HEADER_STATUS_CODE: &str = "x-detour-status-code";
pub const HEADER_OLD_URL: &str = "x-detour-old-url";
pub const HEADER_NEW_URL: &str = "x-detour-new-url";

/// RedirectDevice rewrites or redirects requests whose canonical URL
/// matches an ordered list of regex rules.
///
/// The rule set is compiled once at construction and shared read-only by
/// every in-flight request. Per request, the device reconstructs the
/// canonical URL, evaluates the rules, and either lets the request continue
/// (possibly with a rewritten upstream target) or answers with a redirect.
#[derive(Debug)]
pub struct RedirectDevice {
    name: String,
    debug: bool,
    rules: RuleSet,
}

impl RedirectDevice {
    pub fn from_config(cfg: &RedirectDeviceConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            name: cfg.name.clone(),
            debug: cfg.debug,
            rules: RuleSet::compile(&cfg.rules)?,
        })
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    fn debug_headers(&self, trace: &MatchTrace) -> HeaderMap {
        let mut headers = HeaderMap::new();

        set_header(&mut headers, HEADER_NAME, &self.name);
        set_header(&mut headers, HEADER_REGEX, &trace.pattern);
        set_header(&mut headers, HEADER_REPLACEMENT, &trace.replacement);
        set_header(
            &mut headers,
            HEADER_STATUS_CODE,
            &trace.status.as_u16().to_string(),
        );
        set_header(&mut headers, HEADER_OLD_URL, &trace.old_url);
        set_header(&mut headers, HEADER_NEW_URL, &trace.new_url);

        headers
    }

    fn redirect_response(&self, location: &Url, trace: &MatchTrace) -> ResponseCtx {
        let mut headers = if self.debug {
            self.debug_headers(trace)
        } else {
            HeaderMap::new()
        };

        headers.insert(header::CONTENT_LENGTH, HeaderValue::from_static("0"));
        // Placeholder only; the transport layer stamps the real date.
        headers.insert(header::DATE, HeaderValue::from_static(""));
        set_header(&mut headers, "location", location.as_str());

        ResponseCtx::new(trace.status, headers, Vec::new())
    }
}

impl Device for RedirectDevice {
    /// Redirect evaluation is request-only; responses pass through untouched.
    fn on_request(&self, ctx: &mut RequestCtx) -> DeviceResult {
        if self.rules.is_empty() {
            // Nothing can match; skip reconstruction entirely.
            return DeviceResult::Continue;
        }

        let canonical = canonical_url(ctx);

        match self.rules.evaluate(&canonical, &ctx.method) {
            Disposition::PassThrough => DeviceResult::Continue,

            Disposition::Rewrite { url, trace } => {
                if self.debug {
                    ctx.response_headers.extend(self.debug_headers(&trace));
                }

                let mut target = url.path().to_string();
                if let Some(query) = url.query() {
                    target.push('?');
                    target.push_str(query);
                }
                ctx.upstream_path = Some(target);

                DeviceResult::Continue
            }

            Disposition::Redirect {
                location, trace, ..
            } => DeviceResult::Respond(self.redirect_response(&location, &trace)),
        }
    }
}

fn set_header(headers: &mut HeaderMap, name: &'static str, value: &str) {
    if let Ok(value) = HeaderValue::from_str(value) {
        headers.insert(HeaderName::from_static(name), value);
    }
}
