//! # Block Palette
//!
//! Turns configuration text such as `minecraft:redstone_ore[lit=true]` into
//! [`BlockState`] values and back.
//!
//! The engine itself only goes through [`BlockStateParser`]; a host plugs in
//! its own block registry there. [`BlockPalette`] is the in-process
//! registry used by the binaries and tests.
//!
//! ## Text Format
//!
//! ```text
//! [namespace:]path[ '[' key=value (',' key=value)* ']' ]
//! ```
//!
//! A missing namespace means `minecraft`. Property order does not matter.

use std::collections::HashMap;

use oreveins_shared::{BlockState, NAMESPACE};

use crate::error::BlockParseError;

/// Converts between block-state text and [`BlockState`].
pub trait BlockStateParser {
    /// Parses one block state.
    ///
    /// # Errors
    ///
    /// Returns a [`BlockParseError`] if the text is malformed or names a
    /// block or state the registry does not know.
    fn parse(&self, text: &str) -> Result<BlockState, BlockParseError>;

    /// Canonical text of a state, used in diagnostics.
    fn format(&self, state: BlockState) -> String;
}

#[derive(Clone, Debug)]
struct BlockEntry {
    name: String,
    /// Normalized property strings; index 0 is the default state (`""`).
    states: Vec<String>,
}

/// A block registry: names to ids, property combinations to meta indices.
///
/// Id 0 is always `minecraft:air`.
#[derive(Clone, Debug)]
pub struct BlockPalette {
    blocks: Vec<BlockEntry>,
    by_name: HashMap<String, u16>,
}

impl BlockPalette {
    /// Creates a palette containing only air.
    #[must_use]
    pub fn new() -> Self {
        let mut palette = Self {
            blocks: Vec::new(),
            by_name: HashMap::new(),
        };
        palette.register("minecraft:air");
        palette
    }

    /// The common overworld, nether and end blocks.
    #[must_use]
    pub fn vanilla() -> Self {
        const BLOCKS: &[&str] = &[
            "stone",
            "granite",
            "diorite",
            "andesite",
            "deepslate",
            "tuff",
            "dirt",
            "grass_block",
            "gravel",
            "sand",
            "sandstone",
            "clay",
            "water",
            "lava",
            "netherrack",
            "end_stone",
            "coal_ore",
            "iron_ore",
            "copper_ore",
            "gold_ore",
            "redstone_ore",
            "lapis_ore",
            "diamond_ore",
            "emerald_ore",
            "nether_quartz_ore",
            "nether_gold_ore",
            "grass",
            "tall_grass",
            "dead_bush",
        ];

        let mut palette = Self::new();
        for name in BLOCKS {
            palette.register(name);
        }
        palette.add_states("redstone_ore", &["lit=true"]);
        palette.add_states("deepslate", &["axis=x", "axis=z"]);
        palette
    }

    fn add_states(&mut self, name: &str, properties: &[&str]) {
        for props in properties {
            // Preset input is well formed.
            let _ = self.register_state(name, props);
        }
    }

    /// Registers a block, returning its default state. Idempotent.
    pub fn register(&mut self, name: &str) -> BlockState {
        let name = qualify(name);
        if let Some(&id) = self.by_name.get(&name) {
            return BlockState::new(id);
        }

        let id = self.blocks.len() as u16;
        self.by_name.insert(name.clone(), id);
        self.blocks.push(BlockEntry {
            name,
            states: vec![String::new()],
        });
        BlockState::new(id)
    }

    /// Registers a property combination of a block (registering the block
    /// too if needed), returning its state. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`BlockParseError::Malformed`] if `properties` is not a
    /// `key=value` list.
    pub fn register_state(&mut self, name: &str, properties: &str) -> Result<BlockState, BlockParseError> {
        let props = normalize_properties(properties)?;
        let id = self.register(name).id;
        let entry = &mut self.blocks[id as usize];

        let meta = match entry.states.iter().position(|s| *s == props) {
            Some(meta) => meta,
            None => {
                entry.states.push(props);
                entry.states.len() - 1
            }
        };
        Ok(BlockState::with_meta(id, meta as u16))
    }

    /// Default state of a registered block.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<BlockState> {
        self.by_name.get(&qualify(name)).map(|&id| BlockState::new(id))
    }

    /// Registered name of the block a state belongs to.
    #[must_use]
    pub fn name(&self, state: BlockState) -> Option<&str> {
        self.blocks.get(state.id as usize).map(|b| b.name.as_str())
    }

    /// Number of registered blocks, air included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Always false: air is registered on construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl Default for BlockPalette {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockStateParser for BlockPalette {
    fn parse(&self, text: &str) -> Result<BlockState, BlockParseError> {
        let (name, properties) = split_state(text)?;
        let id = *self
            .by_name
            .get(&name)
            .ok_or_else(|| BlockParseError::UnknownBlock(name.clone()))?;

        let Some(properties) = properties else {
            return Ok(BlockState::new(id));
        };

        let props = normalize_properties(properties)?;
        self.blocks[id as usize]
            .states
            .iter()
            .position(|s| *s == props)
            .map(|meta| BlockState::with_meta(id, meta as u16))
            .ok_or(BlockParseError::UnknownState {
                block: name,
                properties: props,
            })
    }

    fn format(&self, state: BlockState) -> String {
        let Some(entry) = self.blocks.get(state.id as usize) else {
            return format!("#{}:{}", state.id, state.meta);
        };
        match entry.states.get(state.meta as usize) {
            Some(props) if props.is_empty() => entry.name.clone(),
            Some(props) => format!("{}[{props}]", entry.name),
            None => format!("{}#{}", entry.name, state.meta),
        }
    }
}

/// Adds the default namespace to a bare path.
fn qualify(name: &str) -> String {
    if name.contains(':') {
        name.to_string()
    } else {
        format!("{NAMESPACE}:{name}")
    }
}

/// Splits `name[props]` into a qualified name and the raw property text.
fn split_state(text: &str) -> Result<(String, Option<&str>), BlockParseError> {
    let text = text.trim();
    let malformed = || BlockParseError::Malformed(text.to_string());

    let (name, properties) = match text.split_once('[') {
        Some((name, rest)) => {
            let inner = rest.strip_suffix(']').ok_or_else(malformed)?;
            (name, Some(inner))
        }
        None => (text, None),
    };

    let valid_char = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit() || "_-./".contains(c);
    let valid_part = |part: &str| !part.is_empty() && part.chars().all(valid_char);
    let well_formed = match name.split_once(':') {
        Some((namespace, path)) => valid_part(namespace) && valid_part(path),
        None => valid_part(name),
    };
    if !well_formed {
        return Err(malformed());
    }

    Ok((qualify(name), properties))
}

/// Sorts `k=v` pairs by key and joins them with commas.
fn normalize_properties(properties: &str) -> Result<String, BlockParseError> {
    let malformed = || BlockParseError::Malformed(properties.to_string());

    let mut pairs = Vec::new();
    for pair in properties.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').ok_or_else(malformed)?;
        let (key, value) = (key.trim(), value.trim());
        if key.is_empty() || value.is_empty() {
            return Err(malformed());
        }
        pairs.push((key, value));
    }

    pairs.sort_unstable_by_key(|&(key, _)| key);
    if pairs.windows(2).any(|w| w[0].0 == w[1].0) {
        return Err(malformed());
    }

    Ok(pairs
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join(","))
}
