//! # Selection State
//!
//! The only mutable state of a prompt: which row is highlighted, and
//! whether the prompt has already resolved.
//!
//! ```text
//! SelectionState
//! ├── len: usize       // option count, fixed at construction
//! └── phase: Phase
//!     ├── Active { index }                 // accepting input
//!     └── Resolved { index, resolution }   // terminal, inert
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

/// How a prompt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The user confirmed the option at this index.
    Confirmed(usize),
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Active { index: usize },
    Resolved { index: usize, resolution: Resolution },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    len: usize,
    pub(crate) phase: Phase,
}

impl SelectionState {
    /// Start at the first option. `len` must be non-zero.
    pub fn new(len: usize) -> Self {
        debug_assert!(len > 0, "selection needs at least one option");
        Self {
            len,
            phase: Phase::Active { index: 0 },
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Highlighted row. Still readable after resolution for teardown.
    pub fn index(&self) -> usize {
        match self.phase {
            Phase::Active { index } | Phase::Resolved { index, .. } => index,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn resolution(&self) -> Option<Resolution> {
        match self.phase {
            Phase::Active { .. } => None,
            Phase::Resolved { resolution, .. } => Some(resolution),
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self.phase, Phase::Resolved { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_starts_active_at_zero() {
        let state = SelectionState::new(3);
        assert_eq!(state.phase(), Phase::Active { index: 0 });
        assert_eq!(state.len(), 3);
        assert!(!state.is_resolved());
        assert_eq!(state.resolution(), None);
    }

    #[test]
    fn test_index_survives_resolution() {
        let mut state = SelectionState::new(4);
        state.phase = Phase::Resolved {
            index: 2,
            resolution: Resolution::Cancelled,
        };
        assert_eq!(state.index(), 2);
        assert_eq!(state.resolution(), Some(Resolution::Cancelled));
    }
}
