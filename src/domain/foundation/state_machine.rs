//! Checked transitions for lifecycle enums.

use super::ValidationError;

/// A status enum whose legal moves are a fixed table.
///
/// Implementors only list `successors`; everything else follows from it.
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug + 'static {
    /// States reachable in one step from `self`.
    fn successors(&self) -> &'static [Self];

    fn can_transition_to(&self, target: &Self) -> bool {
        self.successors().contains(target)
    }

    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            return Ok(target);
        }
        Err(ValidationError::invalid_format(
            "state_transition",
            format!("{:?} cannot move to {:?}", self, target),
        ))
    }

    fn is_terminal(&self) -> bool {
        self.successors().is_empty()
    }
}
