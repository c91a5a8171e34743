//! Host-facing rule registry.
//!
//! The registry maps stable rule names to their identity metadata and to
//! factories that build configured rule instances. Hosts use it to
//! enumerate rules, resolve the message ids attached to diagnostics, and
//! construct the rule set for one file pass. The checking algorithm never
//! consults it.

use crate::config::StatlineConfig;
use crate::max_statements_per_line_rule::{MaxStatementsPerLine, MAX_STATEMENTS_PER_LINE_META};
use crate::rule::{Rule, RuleMeta};

/// Stable plugin name reported alongside diagnostics.
pub const PLUGIN_NAME: &str = "statline";

/// Plugin version, taken from the crate version.
pub const PLUGIN_VERSION: &str = env!("CARGO_PKG_VERSION");

type RuleFactory = fn(&StatlineConfig) -> Box<dyn Rule>;

struct RegistryEntry {
    meta: &'static RuleMeta,
    factory: RuleFactory,
}

/// A registry of all rules this plugin provides.
pub struct Registry {
    entries: Vec<RegistryEntry>,
}

impl Registry {
    /// Creates a registry holding the built-in rules.
    pub fn with_default_rules() -> Self {
        Registry {
            entries: vec![RegistryEntry {
                meta: &MAX_STATEMENTS_PER_LINE_META,
                factory: |config| {
                    Box::new(MaxStatementsPerLine::new(
                        config.max_statements_per_line.resolve(),
                    ))
                },
            }],
        }
    }

    /// Looks up a rule's identity metadata by its stable name.
    pub fn meta(&self, name: &str) -> Option<&'static RuleMeta> {
        self.entries
            .iter()
            .find(|entry| entry.meta.name == name)
            .map(|entry| entry.meta)
    }

    /// Iterates over the stable names of all registered rules.
    pub fn rule_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.meta.name)
    }

    /// Builds configured instances of every registered rule for one file
    /// pass. Instances carry per-file state and must not be shared across
    /// concurrent passes.
    pub fn build_rules(&self, config: &StatlineConfig) -> Vec<Box<dyn Rule>> {
        self.entries
            .iter()
            .map(|entry| (entry.factory)(config))
            .collect()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_default_rules()
    }
}
