//! # Vein Error Types
//!
//! All errors that can occur while loading, registering or querying veins.
//! Placement itself has no error path.

use thiserror::Error;

/// Errors returned by the host's block-state parser.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlockParseError {
    /// The block name is not registered.
    #[error("unknown block: {0}")]
    UnknownBlock(String),

    /// The block exists but the property combination does not.
    #[error("unknown state {properties} for block {block}")]
    UnknownState {
        /// The block name.
        block: String,
        /// The property list as written.
        properties: String,
    },

    /// The text is not of the form `namespace:path[key=value,...]`.
    #[error("malformed block state: {0}")]
    Malformed(String),
}

/// Why a vein type, indicator or rule failed validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidReason {
    /// No ore to place.
    #[error("ore list is empty")]
    EmptyOre,

    /// No stone to replace.
    #[error("stone list is empty")]
    EmptyStone,

    /// An indicator list was given but holds no variants.
    #[error("indicator list is empty")]
    EmptyIndicatorList,

    /// `min_y` below zero.
    #[error("min_y {0} is negative")]
    NegativeMinY(i32),

    /// Empty origin range.
    #[error("max_y {max_y} must exceed min_y {min_y}")]
    EmptyYRange {
        /// Lower bound.
        min_y: i32,
        /// Upper bound.
        max_y: i32,
    },

    /// `max_y` above the supported world height.
    #[error("max_y {max_y} exceeds {limit}")]
    YTooHigh {
        /// Upper bound as configured.
        max_y: i32,
        /// Largest accepted value.
        limit: i32,
    },

    /// `count` is zero.
    #[error("count must be positive")]
    ZeroCount,

    /// `rarity` is zero.
    #[error("rarity must be positive")]
    ZeroRarity,

    /// A size is not in `1..=limit`.
    #[error("size {horizontal} / {vertical} must be in 1..={limit}")]
    SizeOutOfRange {
        /// Horizontal radius.
        horizontal: i32,
        /// Vertical half-height.
        vertical: i32,
        /// Largest accepted size.
        limit: i32,
    },

    /// `density` is zero, negative or NaN.
    #[error("density {0} must be positive")]
    NonPositiveDensity(f32),

    /// An indicator has nothing to place.
    #[error("indicator has no blocks")]
    IndicatorWithoutBlocks,

    /// An indicator has rarity zero.
    #[error("indicator rarity must be positive")]
    IndicatorZeroRarity,

    /// An indicator depth limit is not positive.
    #[error("indicator max_depth {0} must be positive")]
    IndicatorDepth(i32),

    /// Depth rule with `min_y > max_y`.
    #[error("depth rule min_y {min_y} > max_y {max_y}")]
    InvertedDepthRule {
        /// Lower bound.
        min_y: i32,
        /// Upper bound.
        max_y: i32,
    },

    /// Touching rule without blocks to count.
    #[error("touching rule has no blocks")]
    TouchingWithoutBlocks,

    /// Touching rule whose neighbour range can never be met.
    #[error("touching rule range {min}..={max} is unsatisfiable")]
    UnsatisfiableTouching {
        /// Minimum neighbours.
        min: u32,
        /// Maximum neighbours.
        max: u32,
    },

    /// Noise rule scale is zero, negative or NaN.
    #[error("noise rule scale {0} must be positive")]
    NoiseScale(f64),
}

/// Errors that can occur in the vein system.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VeinError {
    /// Attempted to draw from a weighted list with no entries.
    #[error("cannot draw from an empty weighted list")]
    EmptyList,

    /// A weighted entry had weight zero, or the weights overflowed.
    #[error("invalid weight {weight}: weights must be positive and sum below 2^32")]
    InvalidWeight {
        /// The offending weight.
        weight: u32,
    },

    /// A vein type with this name is already registered.
    #[error("vein type already registered: {0}")]
    DuplicateName(String),

    /// No vein type with this name is registered.
    #[error("vein type not found: {0}")]
    NotFound(String),

    /// The vein type failed validation.
    #[error("invalid vein type {name}: {reason}")]
    InvalidVeinType {
        /// Name of the rejected vein type.
        name: String,
        /// First constraint that failed.
        #[source]
        reason: InvalidReason,
    },

    /// A block state in the configuration could not be parsed.
    #[error("bad block state {text:?}: {source}")]
    BlockState {
        /// The text as written in the configuration.
        text: String,
        /// Parser error.
        #[source]
        source: BlockParseError,
    },

    /// The configuration document or one of its entries is malformed.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The configuration file could not be read.
    #[error("cannot read {path}: {reason}")]
    Io {
        /// File path.
        path: String,
        /// OS error message.
        reason: String,
    },
}

/// Result type for vein operations.
pub type VeinResult<T> = Result<T, VeinError>;
