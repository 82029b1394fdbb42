//! # Configuration
//!
//! Two layers live here:
//!
//! - [`SelectConfig`]: what a single prompt needs (question, options,
//!   pointer, color). Validated when the prompt is built, never later.
//! - [`PromptDefaults`]: user defaults for pointer and color, taken from
//!   env vars and CLI flags. Prompts never touch the filesystem.

use log::debug;
use std::fmt;

use crate::core::options::OptionsInput;

pub const DEFAULT_POINTER: &str = ">";
pub const DEFAULT_COLOR: &str = "blue";

// ============================================================================
// Prompt Config
// ============================================================================

/// Everything needed to show one prompt.
///
/// `pointer` and `color` fall back to `">"` and `"blue"`. The color is kept
/// as a name so an unknown one is reported when the prompt is built.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectConfig {
    pub prompt: String,
    pub options: OptionsInput,
    pub pointer: Option<String>,
    pub color: Option<String>,
}

impl SelectConfig {
    pub fn new(prompt: impl Into<String>, options: impl Into<OptionsInput>) -> Self {
        Self {
            prompt: prompt.into(),
            options: options.into(),
            pointer: None,
            color: None,
        }
    }

    pub fn pointer(mut self, pointer: impl Into<String>) -> Self {
        self.pointer = Some(pointer.into());
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Fill unset pointer/color from resolved user defaults.
    pub fn with_defaults(mut self, defaults: &PromptDefaults) -> Self {
        if self.pointer.is_none() {
            self.pointer = Some(defaults.pointer.clone());
        }
        if self.color.is_none() {
            self.color = Some(defaults.color.clone());
        }
        self
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    /// The question text is empty.
    MissingPrompt,
    /// No options to choose from.
    EmptyOptions,
    DuplicateLabel(String),
    UnknownColor(String),
    InvalidOptionsJson(serde_json::Error),
    /// Options JSON that is neither an array nor an object. Holds the JSON type.
    UnsupportedOptionsJson(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingPrompt => write!(f, "a prompt text is required"),
            ConfigError::EmptyOptions => write!(f, "at least one option is required"),
            ConfigError::DuplicateLabel(label) => write!(f, "duplicate option label: {label:?}"),
            ConfigError::UnknownColor(name) => write!(
                f,
                "unknown color {name:?} (expected yellow, blue, green, cyan, red or magenta)"
            ),
            ConfigError::InvalidOptionsJson(e) => write!(f, "invalid options JSON: {e}"),
            ConfigError::UnsupportedOptionsJson(kind) => write!(
                f,
                "options JSON must be an array of labels or an object, got {kind}"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidOptionsJson(e) => Some(e),
            _ => None,
        }
    }
}

// ============================================================================
// User Defaults (env vars, then CLI flags)
// ============================================================================

pub const POINTER_ENV: &str = "PICK_POINTER";
pub const COLOR_ENV: &str = "PICK_COLOR";

/// Pointer and color to use when a prompt doesn't set its own.
///
/// Override hierarchy: built-in defaults → `PICK_POINTER` / `PICK_COLOR` →
/// CLI flags. Nothing is read from or written to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptDefaults {
    pub pointer: String,
    pub color: String,
}

impl Default for PromptDefaults {
    fn default() -> Self {
        Self {
            pointer: DEFAULT_POINTER.to_string(),
            color: DEFAULT_COLOR.to_string(),
        }
    }
}

impl PromptDefaults {
    /// Collapse the layers using the process environment.
    ///
    /// `cli_pointer` and `cli_color` are from CLI flags (None = not specified).
    pub fn resolve(cli_pointer: Option<&str>, cli_color: Option<&str>) -> Self {
        Self::resolve_with(|key| std::env::var(key).ok(), cli_pointer, cli_color)
    }

    /// Same as [`PromptDefaults::resolve`] with a caller-supplied variable lookup.
    pub fn resolve_with<F>(env: F, cli_pointer: Option<&str>, cli_color: Option<&str>) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base = Self::default();

        let pointer = cli_pointer
            .map(str::to_string)
            .or_else(|| env(POINTER_ENV))
            .unwrap_or(base.pointer);

        let color = cli_color
            .map(str::to_string)
            .or_else(|| env(COLOR_ENV))
            .unwrap_or(base.color);

        debug!("Prompt defaults: pointer={:?} color={:?}", pointer, color);
        Self { pointer, color }
    }
}
