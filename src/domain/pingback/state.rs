//! Pingback validation states.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Progress of a pingback through the validation gates.
///
/// ```text
/// Start -> StructuralCheck -> IpCheck -> SignatureCheck -> Valid
///               |                |              |
///               v                v              v
///            Invalid          Invalid        Invalid
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PingbackState {
    Start,
    StructuralCheck,
    IpCheck,
    SignatureCheck,
    Valid,
    Invalid,
}

impl PingbackState {
    pub fn is_valid(&self) -> bool {
        matches!(self, PingbackState::Valid)
    }
}

impl StateMachine for PingbackState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use PingbackState::*;
        matches!(
            (self, target),
            (Start, StructuralCheck)
                | (StructuralCheck, IpCheck)
                | (StructuralCheck, Invalid)
                | (IpCheck, SignatureCheck)
                | (IpCheck, Invalid)
                | (SignatureCheck, Valid)
                | (SignatureCheck, Invalid)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use PingbackState::*;
        match self {
            Start => vec![StructuralCheck],
            StructuralCheck => vec![IpCheck, Invalid],
            IpCheck => vec![SignatureCheck, Invalid],
            SignatureCheck => vec![Valid, Invalid],
            Valid | Invalid => vec![],
        }
    }
}
