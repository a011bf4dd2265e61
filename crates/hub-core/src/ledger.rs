//! Reaction ledger transitions
//!
//! A viewer holds at most one active reaction per item. Applying a kind
//! either adds it, toggles it off, or switches from the previous kind. This
//! module decides the transition and applies it to the counters; storage
//! backends run it inside whatever atomic unit they have.

use serde::Serialize;

use crate::entities::ReactionCounts;
use crate::value_objects::ReactionKind;

/// The decided effect of applying a reaction kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ReactionChange {
    /// No previous reaction; insert a ledger row
    Added { kind: ReactionKind },
    /// Same kind applied again; delete the ledger row
    Removed { kind: ReactionKind },
    /// Different kind; update the ledger row in place
    Switched { from: ReactionKind, to: ReactionKind },
}

impl ReactionChange {
    /// Decide the transition from the viewer's current reaction
    pub fn plan(existing: Option<ReactionKind>, requested: ReactionKind) -> Self {
        match existing {
            None => Self::Added { kind: requested },
            Some(current) if current == requested => Self::Removed { kind: requested },
            Some(current) => Self::Switched {
                from: current,
                to: requested,
            },
        }
    }

    /// Apply the counter side of the transition
    ///
    /// Decrements are floored at zero, so an aggregate that has drifted
    /// below the ledger never goes negative.
    pub fn apply_to(self, counts: &mut ReactionCounts) {
        match self {
            Self::Added { kind } => counts.increment(kind),
            Self::Removed { kind } => counts.decrement(kind),
            Self::Switched { from, to } => {
                counts.decrement(from);
                counts.increment(to);
            }
        }
    }

    /// The viewer's reaction after the transition
    pub const fn resulting(self) -> Option<ReactionKind> {
        match self {
            Self::Added { kind } => Some(kind),
            Self::Removed { .. } => None,
            Self::Switched { to, .. } => Some(to),
        }
    }
}

/// Result of applying a reaction: what happened and the stored aggregate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedReaction {
    pub change: ReactionChange,
    pub reactions: ReactionCounts,
}

impl AppliedReaction {
    /// The viewer's reaction after this application
    #[inline]
    pub const fn current(&self) -> Option<ReactionKind> {
        self.change.resulting()
    }
}

/// Plan and apply in one step, returning the new aggregate
pub fn transition(
    existing: Option<ReactionKind>,
    requested: ReactionKind,
    counts: ReactionCounts,
) -> AppliedReaction {
    let change = ReactionChange::plan(existing, requested);
    let mut reactions = counts;
    change.apply_to(&mut reactions);
    AppliedReaction { change, reactions }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays a sequence of requests for one viewer from a clean item
    fn replay(requests: &[ReactionKind]) -> (Option<ReactionKind>, ReactionCounts) {
        let mut current = None;
        let mut counts = ReactionCounts::zero();
        for kind in requests {
            let applied = transition(current, *kind, counts);
            current = applied.current();
            counts = applied.reactions;
        }
        (current, counts)
    }

    #[test]
    fn test_plan_add() {
        assert_eq!(
            ReactionChange::plan(None, ReactionKind::Like),
            ReactionChange::Added {
                kind: ReactionKind::Like
            }
        );
    }

    #[test]
    fn test_plan_toggle_off() {
        assert_eq!(
            ReactionChange::plan(Some(ReactionKind::Heart), ReactionKind::Heart),
            ReactionChange::Removed {
                kind: ReactionKind::Heart
            }
        );
    }

    #[test]
    fn test_plan_switch() {
        assert_eq!(
            ReactionChange::plan(Some(ReactionKind::Like), ReactionKind::Smile),
            ReactionChange::Switched {
                from: ReactionKind::Like,
                to: ReactionKind::Smile
            }
        );
    }

    #[test]
    fn test_same_kind_twice_is_identity() {
        for kind in ReactionKind::ALL {
            let (current, counts) = replay(&[kind, kind]);
            assert_eq!(current, None);
            assert_eq!(counts, ReactionCounts::zero());
        }
    }

    #[test]
    fn test_switch_conserves_total() {
        let (current, counts) = replay(&[ReactionKind::Like, ReactionKind::Smile]);
        assert_eq!(current, Some(ReactionKind::Smile));
        assert_eq!(counts.like, 0);
        assert_eq!(counts.smile, 1);
        assert_eq!(counts.total(), 1);
    }

    #[test]
    fn test_any_sequence_leaves_at_most_one() {
        let sequence = [
            ReactionKind::Like,
            ReactionKind::Heart,
            ReactionKind::Celebrate,
            ReactionKind::Celebrate,
            ReactionKind::Smile,
            ReactionKind::Like,
        ];
        let (current, counts) = replay(&sequence);
        assert_eq!(current, Some(ReactionKind::Like));
        assert_eq!(counts.total(), 1);
        assert_eq!(counts.like, 1);
    }

    #[test]
    fn test_drifted_counts_are_floored() {
        // Ledger says the viewer liked it, but the aggregate was already zero
        let applied = transition(
            Some(ReactionKind::Like),
            ReactionKind::Like,
            ReactionCounts::zero(),
        );
        assert_eq!(applied.reactions.like, 0);

        let applied = transition(
            Some(ReactionKind::Like),
            ReactionKind::Heart,
            ReactionCounts::zero(),
        );
        assert_eq!(applied.reactions.like, 0);
        assert_eq!(applied.reactions.heart, 1);
    }

    #[test]
    fn test_change_serializes_with_action_tag() {
        let json = serde_json::to_value(ReactionChange::Switched {
            from: ReactionKind::Like,
            to: ReactionKind::Heart,
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({"action": "switched", "from": "like", "to": "heart"})
        );
    }
}
