use regex::Regex;

use crate::error::ConfigError;

/// Restricts emitted domains to those matching a pattern from their start.
#[derive(Debug, Clone, Default)]
pub struct ScopeFilter {
    pattern: Option<Regex>,
}

impl ScopeFilter {
    pub fn new(pattern: Option<&str>) -> Result<Self, ConfigError> {
        let pattern = pattern
            .map(|p| {
                Regex::new(&format!("^(?:{p})")).map_err(|source| ConfigError::ScopeRegex {
                    pattern: p.to_string(),
                    source,
                })
            })
            .transpose()?;
        Ok(Self { pattern })
    }

    pub fn is_in_scope(&self, domain: &str) -> bool {
        let Some(pattern) = &self.pattern else {
            return true;
        };
        if pattern.is_match(domain) {
            true
        } else {
            tracing::warn!(domain, scope = %pattern, "domain is not in scanning scope");
            false
        }
    }
}
