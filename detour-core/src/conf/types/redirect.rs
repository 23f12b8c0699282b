use serde::Deserialize;

/// Configuration for the redirect device: an ordered list of rewrite rules
/// applied to the canonical URL of every request.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RedirectDeviceConfig {
    /// Whether the redirect device is installed at all.
    #[serde(default = "default_enable")]
    pub enable: bool,

    /// Emit diagnostic response headers for matched rules.
    #[serde(default)]
    pub debug: bool,

    /// Instance name reported in diagnostic headers.
    #[serde(default = "default_name")]
    pub name: String,

    /// Rules are evaluated in the order they appear; first match wins.
    #[serde(default)]
    pub rules: Vec<RedirectRuleConfig>,
}

impl Default for RedirectDeviceConfig {
    fn default() -> Self {
        Self {
            enable: default_enable(),
            debug: false,
            name: default_name(),
            rules: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RedirectRuleConfig {
    /// Pattern tested against the full canonical URL.
    pub regex: String,

    /// Replacement template; `$1`/`${name}` refer to capture groups. Use the
    /// braced form when a group reference is followed by a word character.
    pub replacement: String,

    /// 0 (or omitted) selects a method-sensitive default at redirect time.
    #[serde(default)]
    pub status_code: u16,
}

fn default_enable() -> bool {
    true
}

fn default_name() -> String {
    "redirect".to_string()
}
