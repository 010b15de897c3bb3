//! Pingback type codes.

use std::fmt;

/// Meaning of a pingback's numeric `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PingbackType {
    /// 0 (regular), 1 (goodwill credit) or 201 (risk review accepted).
    Deliverable(i64),
    /// 2 (chargeback) or 202 (risk review declined).
    Cancelable(i64),
    /// 200 (pending risk review).
    UnderReview,
    /// Any other code.
    Other(i64),
}

impl PingbackType {
    pub fn from_code(code: i64) -> Self {
        match code {
            0 | 1 | 201 => PingbackType::Deliverable(code),
            2 | 202 => PingbackType::Cancelable(code),
            200 => PingbackType::UnderReview,
            other => PingbackType::Other(other),
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            PingbackType::Deliverable(code)
            | PingbackType::Cancelable(code)
            | PingbackType::Other(code) => *code,
            PingbackType::UnderReview => 200,
        }
    }

    pub fn is_deliverable(&self) -> bool {
        matches!(self, PingbackType::Deliverable(_))
    }

    pub fn is_cancelable(&self) -> bool {
        matches!(self, PingbackType::Cancelable(_))
    }

    pub fn is_under_review(&self) -> bool {
        matches!(self, PingbackType::UnderReview)
    }
}

impl fmt::Display for PingbackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PingbackType::Deliverable(_) => "deliverable",
            PingbackType::Cancelable(_) => "cancelable",
            PingbackType::UnderReview => "under_review",
            PingbackType::Other(_) => "other",
        };
        write!(f, "{} ({})", label, self.code())
    }
}
