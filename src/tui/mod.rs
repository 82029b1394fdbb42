//! # TUI Adapter
//!
//! The crossterm-specific layer. Draws the prompt, reads raw key chunks,
//! and translates them into `core::action::Action` values.
//!
//! ## Event Loop
//!
//! ```text
//! render_initial ─► highlight row 0 ─► subscribe ─► raw mode + hide cursor
//!        ┌──────────────────────────────────────────────┘
//!        ▼
//!   next chunk ─► decode_chunk ─► update ─► Effect
//!        ▲                                   │ Render  → redraw two rows
//!        └───────────────────────────────────┤ None    → nothing
//!                                            │ Resolve → break
//!                                            ▼
//!   unsubscribe ─► leave raw mode ─► move past block + show cursor ─► return
//! ```
//!
//! Each chunk is handled to completion before the next is read. The input
//! subscription is released before the terminal is restored, and the
//! state machine ignores anything decoded after resolution.

pub mod event;
pub mod input;
pub mod render;
pub mod terminal;

use std::fmt;
use std::io;

use log::{debug, info, warn};
use serde_json::Value;

use crate::core::action::{Effect, update};
use crate::core::color::HighlightColor;
use crate::core::config::{ConfigError, DEFAULT_POINTER, SelectConfig};
use crate::core::options::{OrderedOptions, normalize};
use crate::core::state::{Resolution, SelectionState};
use crate::tui::event::decode_chunk;
use crate::tui::input::{InputSource, StdinInput, Subscription};
use crate::tui::render::{RenderStyle, Renderer};
use crate::tui::terminal::{AnsiTerminal, Terminal};

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum SelectError {
    /// The prompt could not be built. Nothing was drawn.
    Config(ConfigError),
    /// Writing to the terminal or subscribing to input failed.
    Io(io::Error),
}

impl fmt::Display for SelectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectError::Config(e) => write!(f, "{e}"),
            SelectError::Io(e) => write!(f, "terminal I/O error: {e}"),
        }
    }
}

impl std::error::Error for SelectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SelectError::Config(e) => Some(e),
            SelectError::Io(e) => Some(e),
        }
    }
}

impl From<ConfigError> for SelectError {
    fn from(e: ConfigError) -> Self {
        SelectError::Config(e)
    }
}

impl From<io::Error> for SelectError {
    fn from(e: io::Error) -> Self {
        SelectError::Io(e)
    }
}

// ============================================================================
// Engine
// ============================================================================

/// A validated, ready-to-run single-choice prompt.
#[derive(Debug, Clone)]
pub struct Select<V> {
    prompt: String,
    options: OrderedOptions<V>,
    style: RenderStyle,
}

impl Select<Value> {
    /// Validate a config. Fails before anything touches the terminal.
    pub fn new(config: SelectConfig) -> Result<Self, ConfigError> {
        let options = normalize(config.options)?;
        let color = match config.color.as_deref() {
            Some(name) => name.parse::<HighlightColor>()?,
            None => HighlightColor::default(),
        };
        let pointer = config.pointer.as_deref().unwrap_or(DEFAULT_POINTER);
        Self::with_options(config.prompt, options, RenderStyle::new(pointer, color))
    }
}

impl<V: Clone> Select<V> {
    /// Build from already-normalized options with any value type.
    pub fn with_options(
        prompt: impl Into<String>,
        options: OrderedOptions<V>,
        style: RenderStyle,
    ) -> Result<Self, ConfigError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(ConfigError::MissingPrompt);
        }
        Ok(Self {
            prompt,
            options,
            style,
        })
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn options(&self) -> &OrderedOptions<V> {
        &self.options
    }

    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    /// Run the prompt to completion.
    ///
    /// Resolves to the confirmed option's value, or `None` when the user
    /// cancels or the input stream closes. The terminal is restored on
    /// every path that got as far as drawing.
    pub async fn run<T, I>(&self, term: &mut T, input: &mut I) -> Result<Option<V>, SelectError>
    where
        T: Terminal + ?Sized,
        I: InputSource + ?Sized,
    {
        let len = self.options.len();
        let mut state = SelectionState::new(len);
        let mut renderer = Renderer::new(term, &self.style);

        info!("Showing prompt {:?} with {} options", self.prompt, len);
        renderer.render_initial(&self.prompt, self.options.labels())?;
        let first = self.label(0);
        renderer.render_highlight_change(0, 0, first, first)?;

        let mut subscription = match Subscription::acquire(input) {
            Ok(subscription) => subscription,
            Err(e) => {
                // Leave the drawn block behind us; the prompt never went live
                let _ = renderer.teardown(len);
                return Err(e.into());
            }
        };
        let outcome = match start_input_mode(renderer.terminal()) {
            Ok(()) => self.drive(&mut state, &mut renderer, &mut subscription).await,
            Err(e) => Err(e),
        };

        // Teardown: stop input first, then restore the terminal
        subscription.release();
        let restored = restore_terminal(&mut renderer, len);

        let resolution = outcome?;
        restored?;

        info!("Prompt resolved: {:?}", resolution);
        Ok(match resolution {
            Resolution::Confirmed(index) => self.options.value(index).cloned(),
            Resolution::Cancelled => None,
        })
    }

    async fn drive<T, I>(
        &self,
        state: &mut SelectionState,
        renderer: &mut Renderer<'_, T>,
        subscription: &mut Subscription<'_, I>,
    ) -> io::Result<Resolution>
    where
        T: Terminal + ?Sized,
        I: InputSource + ?Sized,
    {
        while let Some(chunk) = subscription.next_chunk().await {
            debug!("Input chunk: {:?}", chunk);
            for action in decode_chunk(&chunk) {
                match update(state, action) {
                    Effect::None => {}
                    Effect::Render { from, to } => {
                        renderer.render_highlight_change(from, to, self.label(from), self.label(to))?;
                    }
                    Effect::Resolve(resolution) => return Ok(resolution),
                }
            }
        }

        warn!("Input stream closed before a choice was made");
        Ok(Resolution::Cancelled)
    }

    fn label(&self, index: usize) -> &str {
        self.options.label(index).unwrap_or_default()
    }
}

fn start_input_mode<T: Terminal + ?Sized>(term: &mut T) -> io::Result<()> {
    term.enter_raw_mode()?;
    term.hide_cursor()?;
    term.flush()
}

/// Runs every step even if an earlier one fails; reports the first error.
fn restore_terminal<T: Terminal + ?Sized>(renderer: &mut Renderer<'_, T>, len: usize) -> io::Result<()> {
    let raw = renderer.terminal().exit_raw_mode();
    let block = renderer.teardown(len);
    raw.and(block)
}

/// Show a prompt on the process terminal and wait for a choice.
///
/// Draws on stdout and reads stdin. Only one prompt may hold stdin at a
/// time; a second concurrent call fails with `io::ErrorKind::ResourceBusy`.
pub async fn select(config: SelectConfig) -> Result<Option<Value>, SelectError> {
    let prompt = Select::new(config)?;
    let mut term = AnsiTerminal::stdout();
    let mut input = StdinInput::new();
    prompt.run(&mut term, &mut input).await
}
