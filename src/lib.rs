//! Arrow-key single-choice prompts for text terminals.
//!
//! ```no_run
//! use pick::SelectConfig;
//!
//! # async fn demo() -> Result<(), pick::SelectError> {
//! let choice = pick::select(SelectConfig::new("Select:", ["One", "Two", "Three"])).await?;
//! match choice {
//!     Some(value) => println!("You selected: {value}"),
//!     None => println!("Cancelled"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod tui;

#[cfg(test)]
pub mod test_support;

pub use crate::core::color::HighlightColor;
pub use crate::core::config::{ConfigError, PromptDefaults, SelectConfig};
pub use crate::core::options::{OptionsInput, OrderedOptions};
pub use crate::tui::{Select, SelectError, select};
