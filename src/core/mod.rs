//! # Core Selection Logic
//!
//! Everything a prompt decides, with no terminal attached.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • OrderedOptions       │
//!                    │  • SelectionState       │
//!                    │  • Action / update()    │
//!                    │                         │
//!                    │  No I/O. No terminal.   │
//!                    └───────────┬─────────────┘
//!                                │ Effect
//!                                ▼
//!                         ┌────────────┐
//!                         │    TUI     │
//!                         │  Adapter   │
//!                         │ (crossterm)│
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`options`]: normalizes labels or label → value maps
//! - [`state`]: the highlighted index and resolution
//! - [`action`]: the `Action` enum and the `update()` reducer
//! - [`color`]: highlight colors and their escape codes
//! - [`config`]: prompt config, user defaults, `ConfigError`

pub mod action;
pub mod color;
pub mod config;
pub mod options;
pub mod state;
