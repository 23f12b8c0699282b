mod canonical;
mod engine;
mod rule;

pub use canonical::canonical_url;
pub use engine::{Disposition, MatchTrace};
pub use rule::{RedirectRule, RuleSet};
