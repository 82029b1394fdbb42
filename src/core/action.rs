//! # Actions
//!
//! Every key the user presses becomes an `Action`.
//! Arrow down? That's `Action::MoveDown`. Enter? `Action::Confirm`.
//!
//! The `update()` function takes the current state and an action,
//! mutates the state, and returns an `Effect` describing what the
//! terminal side has to do. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Once the state is `Resolved`, every action is a no-op. Late input that
//! arrives while the terminal is being torn down can't move the cursor.

use log::debug;

use crate::core::state::{Phase, Resolution, SelectionState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Confirm,
    Cancel,
    MoveUp,
    MoveDown,
    Ignore,
}

/// What the caller must do after an `update`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Un-highlight `from`, highlight `to`.
    Render { from: usize, to: usize },
    /// Tear down, then hand the resolution to the caller.
    Resolve(Resolution),
}

pub fn update(state: &mut SelectionState, action: Action) -> Effect {
    let Phase::Active { index } = state.phase else {
        debug!("Dropping {:?}: selection already resolved", action);
        return Effect::None;
    };
    let len = state.len();

    let next = match action {
        Action::MoveUp => (index + len - 1) % len,
        Action::MoveDown => (index + 1) % len,
        Action::Confirm => {
            return resolve(state, index, Resolution::Confirmed(index));
        }
        Action::Cancel => {
            return resolve(state, index, Resolution::Cancelled);
        }
        Action::Ignore => return Effect::None,
    };

    if next == index {
        // Single-option list: wrapping lands on the same row
        return Effect::None;
    }

    debug!("{:?}: {} -> {}", action, index, next);
    state.phase = Phase::Active { index: next };
    Effect::Render {
        from: index,
        to: next,
    }
}

fn resolve(state: &mut SelectionState, index: usize, resolution: Resolution) -> Effect {
    debug!("Resolved at {}: {:?}", index, resolution);
    state.phase = Phase::Resolved { index, resolution };
    Effect::Resolve(resolution)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_at(len: usize, index: usize) -> SelectionState {
        let mut state = SelectionState::new(len);
        state.phase = Phase::Active { index };
        state
    }

    #[test]
    fn test_move_down_n_times_is_identity() {
        for len in 1..=6 {
            for start in 0..len {
                let mut state = state_at(len, start);
                for _ in 0..len {
                    update(&mut state, Action::MoveDown);
                }
                assert_eq!(state.index(), start, "len={len} start={start}");
            }
        }
    }

    #[test]
    fn test_move_up_n_times_is_identity() {
        for len in 1..=6 {
            for start in 0..len {
                let mut state = state_at(len, start);
                for _ in 0..len {
                    update(&mut state, Action::MoveUp);
                }
                assert_eq!(state.index(), start, "len={len} start={start}");
            }
        }
    }

    #[test]
    fn test_wrap_around_edges() {
        let mut state = state_at(3, 0);
        assert_eq!(
            update(&mut state, Action::MoveUp),
            Effect::Render { from: 0, to: 2 }
        );
        assert_eq!(
            update(&mut state, Action::MoveDown),
            Effect::Render { from: 2, to: 0 }
        );
    }

    #[test]
    fn test_single_option_never_renders() {
        let mut state = SelectionState::new(1);
        assert_eq!(update(&mut state, Action::MoveDown), Effect::None);
        assert_eq!(update(&mut state, Action::MoveUp), Effect::None);
        assert_eq!(state.index(), 0);
    }

    #[test]
    fn test_confirm_resolves_with_current_index() {
        for index in 0..4 {
            let mut state = state_at(4, index);
            assert_eq!(
                update(&mut state, Action::Confirm),
                Effect::Resolve(Resolution::Confirmed(index))
            );
            assert!(state.is_resolved());
        }
    }

    #[test]
    fn test_cancel_resolves_regardless_of_index() {
        for index in 0..4 {
            let mut state = state_at(4, index);
            assert_eq!(
                update(&mut state, Action::Cancel),
                Effect::Resolve(Resolution::Cancelled)
            );
            assert_eq!(state.index(), index);
        }
    }

    #[test]
    fn test_ignore_changes_nothing() {
        let mut state = state_at(3, 1);
        let before = state.clone();
        assert_eq!(update(&mut state, Action::Ignore), Effect::None);
        assert_eq!(state, before);
    }

    #[test]
    fn test_resolved_is_inert() {
        let mut state = state_at(3, 1);
        update(&mut state, Action::Confirm);
        let before = state.clone();

        for action in [
            Action::MoveUp,
            Action::MoveDown,
            Action::Confirm,
            Action::Cancel,
            Action::Ignore,
        ] {
            assert_eq!(update(&mut state, action), Effect::None);
        }
        assert_eq!(state, before);
        assert_eq!(state.resolution(), Some(Resolution::Confirmed(1)));
    }
}
