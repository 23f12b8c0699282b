use crate::conf::error::ConfigError;
use crate::conf::types::RedirectRuleConfig;
use http::StatusCode;
use regex::Regex;

/// One compiled rewrite rule: a pattern tested against the canonical URL
/// and a replacement template using `$1`/`${name}` capture references.
#[derive(Debug)]
pub struct RedirectRule {
    pub(crate) pattern: Regex,
    pub(crate) replacement: String,

    /// `None` selects the method-sensitive default at redirect time.
    pub(crate) status: Option<StatusCode>,
}

impl RedirectRule {
    pub fn compile(index: usize, cfg: &RedirectRuleConfig) -> Result<Self, ConfigError> {
        let pattern = Regex::new(&cfg.regex)
            .map_err(|source| ConfigError::InvalidRegex { index, source })?;

        let status = match cfg.status_code {
            0 => None,
            code => Some(
                StatusCode::from_u16(code)
                    .map_err(|_| ConfigError::InvalidStatusCode { index, code })?,
            ),
        };

        Ok(Self {
            pattern,
            replacement: cfg.replacement.clone(),
            status,
        })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }
}

/// Ordered rule list; first match wins. Immutable after construction and
/// freely shareable across in-flight requests.
#[derive(Debug, Default)]
pub struct RuleSet {
    pub(crate) rules: Vec<RedirectRule>,
}

impl RuleSet {
    /// Compile every configured rule, failing on the first invalid one.
    /// A rule set is never partially built.
    pub fn compile(configs: &[RedirectRuleConfig]) -> Result<Self, ConfigError> {
        let rules = configs
            .iter()
            .enumerate()
            .map(|(index, cfg)| RedirectRule::compile(index, cfg))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { rules })
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }
}
