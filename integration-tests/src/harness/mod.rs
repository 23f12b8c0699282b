mod server;
mod upstream;

pub use server::TestServer;

use detour_core::conf::types::RedirectRuleConfig;

/// Shorthand for building a redirect rule in tests.
pub fn rule(regex: &str, replacement: &str, status_code: u16) -> RedirectRuleConfig {
    RedirectRuleConfig {
        regex: regex.to_string(),
        replacement: replacement.to_string(),
        status_code,
    }
}
