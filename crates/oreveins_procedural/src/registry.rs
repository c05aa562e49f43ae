//! # Vein Registry
//!
//! Name-keyed storage of every loaded [`VeinType`]. Built once, then shared
//! read-only between placement threads.
//!
//! Iteration follows registration order, which is also the order placement
//! visits vein types in.

use std::collections::HashMap;

use crate::error::{VeinError, VeinResult};
use crate::palette::BlockStateParser;
use crate::vein_type::VeinType;

/// Registered vein types by name.
#[derive(Clone, Debug, Default)]
pub struct VeinRegistry {
    veins: Vec<(String, VeinType)>,
    index: HashMap<String, usize>,
}

impl VeinRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a vein type.
    ///
    /// # Errors
    ///
    /// - [`VeinError::DuplicateName`] if `name` is taken
    /// - [`VeinError::InvalidVeinType`] if the vein type fails validation
    pub fn register(&mut self, name: &str, vein: VeinType) -> VeinResult<()> {
        if self.index.contains_key(name) {
            return Err(VeinError::DuplicateName(name.to_string()));
        }
        vein.validate().map_err(|reason| VeinError::InvalidVeinType {
            name: name.to_string(),
            reason,
        })?;

        self.index.insert(name.to_string(), self.veins.len());
        self.veins.push((name.to_string(), vein));
        tracing::debug!(vein = name, "registered vein type");
        Ok(())
    }

    /// Looks up a vein type.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&VeinType> {
        self.index.get(name).map(|&i| &self.veins[i].1)
    }

    /// Names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.veins.iter().map(|(name, _)| name.as_str())
    }

    /// `(name, vein type)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &VeinType)> {
        self.veins.iter().map(|(name, vein)| (name.as_str(), vein))
    }

    /// Number of vein types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.veins.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.veins.is_empty()
    }

    /// Summary line of one vein type.
    ///
    /// # Errors
    ///
    /// Returns [`VeinError::NotFound`] if `name` is not registered.
    pub fn describe<P: BlockStateParser + ?Sized>(&self, name: &str, blocks: &P) -> VeinResult<String> {
        self.lookup(name)
            .map(|vein| vein.describe(name, blocks))
            .ok_or_else(|| VeinError::NotFound(name.to_string()))
    }

    /// Names starting with `prefix`, in registration order.
    pub fn complete<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a str> {
        self.names().filter(move |name| name.starts_with(prefix))
    }
}
