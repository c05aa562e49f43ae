//! Command-line options shared by the binaries.

use std::path::PathBuf;

use thiserror::Error;

use oreveins_shared::DEFAULT_DIMENSION;

/// Configuration file read when `--config` is not given.
pub const DEFAULT_CONFIG: &str = "data/veins.toml";

/// Bad command line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptionsError {
    /// A flag that needs a value was last on the line.
    #[error("missing value for {0}")]
    MissingValue(String),

    /// A flag value did not parse.
    #[error("invalid value {value:?} for {flag}")]
    InvalidValue {
        /// The flag.
        flag: String,
        /// The value as given.
        value: String,
    },
}

/// Parsed options. Anything that is not a flag ends up in `args`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    /// Configuration files, in load order.
    pub configs: Vec<PathBuf>,
    /// World seed.
    pub seed: u64,
    /// Dimension to generate.
    pub dimension: String,
    /// Chunk radius around the origin.
    pub radius: i32,
    /// Positional arguments.
    pub args: Vec<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            configs: Vec::new(),
            seed: 0,
            dimension: DEFAULT_DIMENSION.to_string(),
            radius: 2,
            args: Vec::new(),
        }
    }
}

impl Options {
    /// Parses arguments (without the program name).
    ///
    /// `--config` may repeat; with none given, [`DEFAULT_CONFIG`] is used.
    ///
    /// # Errors
    ///
    /// Returns an [`OptionsError`] on a missing or malformed flag value.
    pub fn parse<I, S>(args: I) -> Result<Self, OptionsError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut options = Self::default();
        let mut args = args.into_iter().map(Into::into);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" | "--seed" | "--dimension" | "--radius" => {
                    let value = args.next().ok_or_else(|| OptionsError::MissingValue(arg.clone()))?;
                    options.apply(&arg, value)?;
                }
                _ => options.args.push(arg),
            }
        }

        if options.configs.is_empty() {
            options.configs.push(PathBuf::from(DEFAULT_CONFIG));
        }
        Ok(options)
    }

    fn apply(&mut self, flag: &str, value: String) -> Result<(), OptionsError> {
        let invalid = |value: String| OptionsError::InvalidValue {
            flag: flag.to_string(),
            value,
        };
        match flag {
            "--config" => self.configs.push(PathBuf::from(value)),
            "--seed" => self.seed = value.parse().map_err(|_| invalid(value))?,
            "--radius" => match value.parse() {
                Ok(radius) if radius >= 0 => self.radius = radius,
                _ => return Err(invalid(value)),
            },
            _ => self.dimension = value,
        }
        Ok(())
    }
}
