#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use core::fmt;

/// Result of ticking a node.
///
/// `Running` means "call me again next tick and keep my state"; the other two are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Status {
    Running,
    Success,
    Failure,
}

impl Status {
    pub fn is_running(self) -> bool {
        matches!(self, Status::Running)
    }

    pub fn is_success(self) -> bool {
        matches!(self, Status::Success)
    }

    pub fn is_failure(self) -> bool {
        matches!(self, Status::Failure)
    }

    pub fn is_terminal(self) -> bool {
        !self.is_running()
    }

    /// Swap `Success` and `Failure`; `Running` passes through.
    pub fn invert(self) -> Self {
        match self {
            Status::Running => Status::Running,
            Status::Success => Status::Failure,
            Status::Failure => Status::Success,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::Running => "running",
            Status::Success => "success",
            Status::Failure => "failure",
        };
        f.write_str(s)
    }
}
