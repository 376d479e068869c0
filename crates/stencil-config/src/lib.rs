// crates/stencil-config/src/lib.rs
// ============================================================================
// Module: Stencil Configuration
// Description: TOML-backed generator run configuration and validation.
// Purpose: Fix the stack edition and decorator set before generation starts.
// Dependencies: stencil-core, serde, toml, thiserror
// ============================================================================

//! ## Overview
//! This crate loads and validates the generator's run configuration. The
//! single load-bearing setting is the stack edition: validation maps the
//! configured string onto the closed [`StackEdition`] set and rejects unknown
//! values before any generation begins, so an unknown discriminant is a
//! configuration error, never a dispatch-time failure. The validated
//! [`RunSettings`] value is immutable and threaded into run construction.
//!
//! Configuration files are treated as untrusted input: loads enforce a hard
//! size limit and fail closed on parse errors.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::fs;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use serde::Serialize;
use stencil_core::EditionParseError;
use stencil_core::StackEdition;
use thiserror::Error;

// ============================================================================
// CONSTANTS: Configuration input limits
// ============================================================================

/// Maximum configuration file size accepted by the loader.
pub const MAX_CONFIG_BYTES: u64 = 1024 * 1024;

// ============================================================================
// SECTION: Configuration Errors
// ============================================================================

/// Errors raised while loading or validating generator configuration.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error while reading the configuration file.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parse error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// The configured edition names no known stack edition.
    #[error("config edition error: {0}")]
    UnknownEdition(#[from] EditionParseError),
    /// A configuration value failed validation.
    #[error("config invalid: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Configuration Model
// ============================================================================

/// The `[run]` section fixing the generation run's discriminant.
///
/// # Invariants
/// - `edition` is validated against the closed edition set by
///   [`GeneratorConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSection {
    /// Stack edition string (`"http0"` or `"http1"`).
    pub edition: String,
}

/// The `[decorators]` section tuning the registered decorator set.
///
/// # Invariants
/// - Names listed in `disabled` are matched exactly against decorator names;
///   names matching nothing are inert.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecoratorsSection {
    /// Decorator names the host skips at registration time.
    #[serde(default)]
    pub disabled: Vec<String>,
}

/// Generator run configuration as parsed from TOML.
///
/// # Examples
/// ```
/// use stencil_config::GeneratorConfig;
/// use stencil_core::StackEdition;
///
/// let config = GeneratorConfig::from_toml_str(
///     "[run]\nedition = \"http1\"\n\n[decorators]\ndisabled = [\"Checksum\"]\n",
/// )?;
/// let settings = config.validate()?;
/// assert_eq!(settings.edition, StackEdition::Http1);
/// assert!(!settings.is_enabled("Checksum"));
/// # Ok::<(), stencil_config::ConfigError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Run discriminant settings.
    pub run: RunSection,
    /// Decorator set tuning.
    #[serde(default)]
    pub decorators: DecoratorsSection,
}

impl GeneratorConfig {
    /// Loads configuration from a TOML file with size limits.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read, exceeds
    /// [`MAX_CONFIG_BYTES`], or fails to parse.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = read_config_text(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the TOML is malformed or missing
    /// required sections.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Validates the configuration into immutable run settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownEdition`] when the edition string names
    /// no known stack edition, or [`ConfigError::Invalid`] when a disabled
    /// decorator name is empty.
    pub fn validate(&self) -> Result<RunSettings, ConfigError> {
        let edition: StackEdition = self.run.edition.parse()?;
        let mut disabled = BTreeSet::new();
        for name in &self.decorators.disabled {
            if name.is_empty() {
                return Err(ConfigError::Invalid(
                    "disabled decorator name must not be empty".to_string(),
                ));
            }
            disabled.insert(name.clone());
        }
        Ok(RunSettings {
            edition,
            disabled,
        })
    }
}

/// Reads the configuration file with size limits to avoid memory exhaustion.
fn read_config_text(path: &Path) -> Result<String, ConfigError> {
    let file = fs::File::open(path).map_err(|err| ConfigError::Io(err.to_string()))?;
    let metadata = file.metadata().map_err(|err| ConfigError::Io(err.to_string()))?;
    if metadata.len() > MAX_CONFIG_BYTES {
        return Err(ConfigError::Invalid(format!(
            "config input exceeds {MAX_CONFIG_BYTES} bytes"
        )));
    }
    let mut text = String::new();
    let mut limited = file.take(MAX_CONFIG_BYTES + 1);
    limited.read_to_string(&mut text).map_err(|err| ConfigError::Io(err.to_string()))?;
    let size = u64::try_from(text.len())
        .map_err(|_| ConfigError::Invalid("config input size exceeds addressable memory".to_string()))?;
    if size > MAX_CONFIG_BYTES {
        return Err(ConfigError::Invalid(format!(
            "config input exceeds {MAX_CONFIG_BYTES} bytes"
        )));
    }
    Ok(text)
}

// ============================================================================
// SECTION: Run Settings
// ============================================================================

/// Validated, immutable settings for one generation run.
///
/// # Invariants
/// - `edition` is a member of the closed edition set.
/// - Settings never change once a run has started.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSettings {
    /// Stack edition the run is fixed to.
    pub edition: StackEdition,
    /// Decorator names the host skips at registration time.
    pub disabled: BTreeSet<String>,
}

impl RunSettings {
    /// Returns true when the named decorator should be registered.
    #[must_use]
    pub fn is_enabled(&self, name: &str) -> bool {
        !self.disabled.contains(name)
    }
}
