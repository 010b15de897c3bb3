//! Validated state transitions.
//!
//! A status enum lists its allowed moves once; callers then advance it with
//! `transition_to`, which refuses anything not on the list. The pingback
//! gates use this to guarantee they run in order.

use super::ValidationError;

/// A status enum with a fixed set of allowed transitions.
///
/// ```ignore
/// let state = PingbackState::Start.transition_to(PingbackState::StructuralCheck)?;
/// assert!(state.transition_to(PingbackState::Valid).is_err());
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Whether `target` is reachable in one step.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Every state reachable in one step.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Moves to `target`, or names both states in the error.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if !self.can_transition_to(&target) {
            return Err(ValidationError::invalid_transition(
                format!("{:?}", self),
                format!("{:?}", target),
            ));
        }
        Ok(target)
    }

    /// A state with no outgoing transitions ends the machine.
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
