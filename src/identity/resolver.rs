use std::collections::HashMap;
use tracing::{info, warn};

use super::config::IdentityConfig;

/// Canonical representation of a player.
///
/// A Registered identity has a stable Discord handle and owns a set of
/// Wingspan-name aliases. A Standalone identity is a raw player name that
/// nobody has registered; it is its own single alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    Registered {
        handle: String,
        aliases: Vec<String>,
    },
    Standalone {
        name: String,
    },
}

impl Identity {
    /// Name shown for this identity (Discord handle or the raw name)
    pub fn display_name(&self) -> &str {
        match self {
            Identity::Registered { handle, .. } => handle,
            Identity::Standalone { name } => name,
        }
    }

    pub fn handle(&self) -> Option<&str> {
        match self {
            Identity::Registered { handle, .. } => Some(handle),
            Identity::Standalone { .. } => None,
        }
    }

    /// All raw names that belong to this identity, stored casing preserved
    pub fn alias_names(&self) -> Vec<&str> {
        match self {
            Identity::Registered { aliases, .. } => {
                aliases.iter().map(String::as_str).collect()
            }
            Identity::Standalone { name } => vec![name.as_str()],
        }
    }

    /// Whether a raw player name belongs to this identity, ignoring case
    pub fn matches(&self, raw_name: &str) -> bool {
        let normalized = normalize(raw_name);
        self.alias_names()
            .iter()
            .any(|alias| normalize(alias) == normalized)
    }

    /// Lowercased key used to deduplicate identities across raw names
    pub fn dedupe_key(&self) -> String {
        match self {
            Identity::Registered { handle, .. } => format!("handle:{}", normalize(handle)),
            Identity::Standalone { name } => format!("name:{}", normalize(name)),
        }
    }
}

/// Normalizes a raw name for matching: trims whitespace, strips a single
/// leading "@", lowercases.
fn normalize(raw_name: &str) -> String {
    let trimmed = raw_name.trim();
    let stripped = trimmed.strip_prefix('@').unwrap_or(trimmed);
    stripped.to_lowercase()
}

/// Strips only the display-irrelevant decoration, preserving casing
fn display_form(raw_name: &str) -> &str {
    let trimmed = raw_name.trim();
    trimmed.strip_prefix('@').unwrap_or(trimmed)
}

/// Maps raw player-name strings to canonical identities.
///
/// Built once from the registered-player configuration and immutable for
/// the process lifetime. Resolution never fails: unknown names become
/// Standalone identities.
pub struct IdentityResolver {
    /// normalized handle -> (stored handle, stored-casing aliases)
    by_handle: HashMap<String, (String, Vec<String>)>,
    /// normalized alias -> normalized handle
    by_alias: HashMap<String, String>,
}

impl IdentityResolver {
    pub fn new(config: IdentityConfig) -> Self {
        let mut by_handle = HashMap::new();
        let mut by_alias: HashMap<String, String> = HashMap::new();

        for (handle, player) in config.0 {
            let handle_key = normalize(&handle);

            for alias in &player.wingspan_names {
                let alias_key = normalize(alias);
                if let Some(existing) = by_alias.get(&alias_key) {
                    if *existing != handle_key {
                        warn!(
                            alias = %alias,
                            first_handle = %existing,
                            second_handle = %handle_key,
                            "Alias registered to multiple handles, keeping first"
                        );
                        continue;
                    }
                }
                by_alias.insert(alias_key, handle_key.clone());
            }

            by_handle.insert(handle_key, (display_form(&handle).to_string(), player.wingspan_names));
        }

        info!(
            registered_handles = by_handle.len(),
            aliases = by_alias.len(),
            "Identity resolver initialized"
        );

        Self { by_handle, by_alias }
    }

    /// Creates a resolver with no registered players; every name resolves
    /// to a Standalone identity.
    pub fn empty() -> Self {
        Self::new(IdentityConfig::default())
    }

    /// Resolves a raw name to its canonical identity. Registered handles
    /// win over aliases; anything else is Standalone with its original
    /// casing preserved.
    pub fn resolve(&self, raw_name: &str) -> Identity {
        let key = normalize(raw_name);

        if let Some((handle, aliases)) = self.by_handle.get(&key) {
            return Identity::Registered {
                handle: handle.clone(),
                aliases: aliases.clone(),
            };
        }

        if let Some(handle_key) = self.by_alias.get(&key) {
            if let Some((handle, aliases)) = self.by_handle.get(handle_key) {
                return Identity::Registered {
                    handle: handle.clone(),
                    aliases: aliases.clone(),
                };
            }
        }

        Identity::Standalone {
            name: display_form(raw_name).to_string(),
        }
    }

    /// Stored-casing alias list for a handle; empty if the handle is unknown
    pub fn aliases_of(&self, handle: &str) -> Vec<String> {
        self.by_handle
            .get(&normalize(handle))
            .map(|(_, aliases)| aliases.clone())
            .unwrap_or_default()
    }

    /// Inverse lookup: the handle owning a raw name as an alias, if any
    pub fn handle_of(&self, raw_name: &str) -> Option<String> {
        let handle_key = self.by_alias.get(&normalize(raw_name))?;
        self.by_handle
            .get(handle_key)
            .map(|(handle, _)| handle.clone())
    }
}
