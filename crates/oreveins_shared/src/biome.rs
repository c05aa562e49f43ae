//! # Biomes
//!
//! The engine never classifies terrain itself; it only asks the host which
//! biome a position is in and compares names and tags.

use serde::{Deserialize, Serialize};

use crate::constants::NAMESPACE;

/// A biome as reported by the host.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Biome {
    /// Registry name, e.g. `minecraft:plains`.
    pub name: String,
    /// Tags/categories the host associates with this biome (`hot`, `dry`, ...).
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Biome {
    /// Creates a biome with no tags.
    ///
    /// Names without a namespace are placed in the default one.
    #[must_use]
    pub fn new(name: &str) -> Self {
        let name = if name.contains(':') {
            name.to_string()
        } else {
            format!("{NAMESPACE}:{name}")
        };
        Self {
            name,
            tags: Vec::new(),
        }
    }

    /// Adds a tag.
    #[must_use]
    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tags.push(tag.to_string());
        self
    }

    /// The name without its namespace (`plains` for `minecraft:plains`).
    #[must_use]
    pub fn path(&self) -> &str {
        self.name
            .split_once(':')
            .map_or(self.name.as_str(), |(_, path)| path)
    }

    /// Returns true if `name` refers to this biome, with or without namespace.
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.name == name || self.path() == name
    }

    /// Returns true if any tag equals `tag`, ignoring ASCII case.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

impl Default for Biome {
    fn default() -> Self {
        Self::new("plains")
    }
}
