use std::fmt;

/// Phase of the approve → deposit workflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum WorkflowPhase {
    /// Nothing submitted yet, or the approval rolled back.
    #[default]
    Idle,
    /// Allowance approval submitted, waiting for its outcome.
    Approving,
    /// Allowance confirmed; deposit may be requested.
    Approved,
    /// Deposit submitted, waiting for its outcome.
    Depositing,
    /// Deposit confirmed. Terminal.
    Done,
}

impl WorkflowPhase {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Approving => "approving",
            Self::Approved => "approved",
            Self::Depositing => "depositing",
            Self::Done => "done",
        }
    }

    /// Whether a transaction is currently in flight.
    pub const fn is_in_flight(&self) -> bool {
        matches!(self, Self::Approving | Self::Depositing)
    }

    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Whether the approve trigger should be enabled.
    pub const fn can_approve(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Whether the deposit trigger should be enabled.
    pub const fn can_deposit(&self) -> bool {
        matches!(self, Self::Approved)
    }

    /// Stable phase to fall back to when the in-flight transaction fails.
    pub const fn rollback(&self) -> Option<Self> {
        match self {
            Self::Approving => Some(Self::Idle),
            Self::Depositing => Some(Self::Approved),
            _ => None,
        }
    }

    /// Phase reached when the in-flight transaction confirms.
    pub const fn advance(&self) -> Option<Self> {
        match self {
            Self::Approving => Some(Self::Approved),
            Self::Depositing => Some(Self::Done),
            _ => None,
        }
    }

    /// Whether `next` is an edge of the workflow graph.
    pub const fn can_transition_to(&self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Approving)
                | (Self::Approving, Self::Approved)
                | (Self::Approving, Self::Idle)
                | (Self::Approved, Self::Depositing)
                | (Self::Depositing, Self::Done)
                | (Self::Depositing, Self::Approved)
        )
    }
}

impl fmt::Display for WorkflowPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [WorkflowPhase; 5] = [
        WorkflowPhase::Idle,
        WorkflowPhase::Approving,
        WorkflowPhase::Approved,
        WorkflowPhase::Depositing,
        WorkflowPhase::Done,
    ];

    #[test]
    fn test_default_is_idle() {
        assert_eq!(WorkflowPhase::default(), WorkflowPhase::Idle);
    }

    #[test]
    fn test_edge_count() {
        let edges = ALL
            .iter()
            .flat_map(|from| ALL.iter().map(move |to| (*from, *to)))
            .filter(|(from, to)| from.can_transition_to(*to))
            .count();

        assert_eq!(edges, 6);
    }

    #[test]
    fn test_done_has_no_exits() {
        for next in ALL {
            assert!(!WorkflowPhase::Done.can_transition_to(next));
        }
    }

    #[test]
    fn test_advance_and_rollback_are_edges() {
        for phase in ALL {
            if let Some(next) = phase.advance() {
                assert!(phase.can_transition_to(next));
            }
            if let Some(prev) = phase.rollback() {
                assert!(phase.can_transition_to(prev));
            }
            assert_eq!(phase.advance().is_some(), phase.is_in_flight());
            assert_eq!(phase.rollback().is_some(), phase.is_in_flight());
        }
    }

    #[test]
    fn test_trigger_enablement() {
        let approvable: Vec<_> = ALL.into_iter().filter(|p| p.can_approve()).collect();
        let depositable: Vec<_> = ALL.into_iter().filter(|p| p.can_deposit()).collect();

        assert_eq!(approvable, vec![WorkflowPhase::Idle]);
        assert_eq!(depositable, vec![WorkflowPhase::Approved]);
    }

    #[test]
    fn test_display() {
        assert_eq!(WorkflowPhase::Depositing.to_string(), "depositing");
    }
}
