use super::rule::RuleSet;
use http::{Method, StatusCode};
use url::Url;

/// The decided outcome for one request.
#[derive(Debug)]
pub enum Disposition {
    /// No rule applied; the request continues unchanged.
    PassThrough,

    /// The first matching rule reproduced the canonical URL exactly; the
    /// request continues downstream with its target replaced by the
    /// reparsed form.
    Rewrite { url: Url, trace: MatchTrace },

    /// The first matching rule produced a different URL; the client is
    /// redirected and the upstream is never contacted.
    Redirect {
        location: Url,
        status: StatusCode,
        trace: MatchTrace,
    },
}

/// What matched and what it produced, kept for diagnostic headers.
#[derive(Debug, Clone)]
pub struct MatchTrace {
    pub pattern: String,
    pub replacement: String,
    pub status: StatusCode,
    pub old_url: String,
    pub new_url: String,
}

impl RuleSet {
    /// Scan rules in order against the canonical URL and return the first
    /// disposition. A candidate the URL parser rejects disqualifies only
    /// that rule; the scan continues with the next one.
    pub fn evaluate(&self, canonical: &str, method: &Method) -> Disposition {
        for rule in &self.rules {
            if !rule.pattern.is_match(canonical) {
                continue;
            }

            let candidate = rule
                .pattern
                .replace_all(canonical, rule.replacement.as_str());

            let parsed = match Url::parse(&candidate) {
                Ok(url) => url,
                Err(err) => {
                    tracing::debug!(
                        pattern = rule.pattern.as_str(),
                        candidate = candidate.as_ref(),
                        "rewritten URL does not parse, skipping rule: {err}"
                    );
                    continue;
                }
            };

            let status = resolve_status(rule.status, method);

            let trace = MatchTrace {
                pattern: rule.pattern.as_str().to_string(),
                replacement: rule.replacement.clone(),
                status,
                old_url: canonical.to_string(),
                new_url: candidate.clone().into_owned(),
            };

            if candidate != canonical {
                return Disposition::Redirect {
                    location: parsed,
                    status,
                    trace,
                };
            }

            return Disposition::Rewrite { url: parsed, trace };
        }

        Disposition::PassThrough
    }
}

/// Redirect status for a matched rule.
///
/// An unset code defaults to 302 for GET and 307 for everything else; an
/// explicit 301 on a non-GET request becomes 308. 301 permits clients to
/// replay the request as a GET, 308 does not. All other explicit codes are
/// used verbatim.
pub(crate) fn resolve_status(configured: Option<StatusCode>, method: &Method) -> StatusCode {
    let status = configured.unwrap_or(if method == Method::GET {
        StatusCode::FOUND
    } else {
        StatusCode::TEMPORARY_REDIRECT
    });

    if method != Method::GET && status == StatusCode::MOVED_PERMANENTLY {
        return StatusCode::PERMANENT_REDIRECT;
    }

    status
}
