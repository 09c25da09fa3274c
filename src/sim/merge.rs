//! Size-merge state transition
//!
//! Consumes merge candidates in detection order. A ball consumed by an earlier
//! candidate is gone from the registry, so later candidates naming it are
//! skipped.

use glam::Vec2;

use super::collision::MergeCandidate;
use super::state::{GameEvent, GameState};
use crate::consts::MAX_SIZE_LABEL;

/// What a single merge produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Both balls replaced by one ball of the next label
    Promoted { id: u32, size_label: u8 },
    /// Both max-size balls removed with no replacement
    Cleared,
}

/// Merge one candidate pair. Returns `None` (and changes nothing) if either
/// ball was already removed or the labels differ.
pub fn merge_pair(state: &mut GameState, candidate: MergeCandidate) -> Option<MergeOutcome> {
    let (label, pos) = {
        let a = state.balls.get(candidate.a)?;
        let b = state.balls.get(candidate.b)?;
        if a.size_label != b.size_label {
            return None;
        }
        (a.size_label, (a.pos + b.pos) * 0.5)
    };

    state.balls.remove(candidate.a);
    state.balls.remove(candidate.b);
    state.score += u64::from(label);
    let consumed = (candidate.a, candidate.b);

    if label >= MAX_SIZE_LABEL {
        state.events.push(GameEvent::Cleared { consumed, pos });
        log::debug!("Cleared max-size pair {:?} at {:?}", consumed, pos);
        return Some(MergeOutcome::Cleared);
    }

    let size_label = label + 1;
    let id = spawn_merged(state, size_label, pos);
    state.events.push(GameEvent::Merged {
        consumed,
        id,
        size_label,
        pos,
    });
    log::debug!("Merged {:?} into ball {} (label {})", consumed, id, size_label);
    Some(MergeOutcome::Promoted { id, size_label })
}

/// Apply every candidate in order, returning how many merges happened
pub fn apply_merges(state: &mut GameState, candidates: &[MergeCandidate]) -> usize {
    candidates
        .iter()
        .filter(|&&candidate| merge_pair(state, candidate).is_some())
        .count()
}

/// Merged balls start at rest and already count as inside the container
fn spawn_merged(state: &mut GameState, size_label: u8, pos: Vec2) -> u32 {
    let id = state.balls.insert(size_label, pos);
    if let Some(ball) = state.balls.get_mut(id) {
        ball.in_play = true;
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_promote_at_midpoint() {
        let mut state = GameState::with_seed(1);
        let a = state.balls.insert(3, Vec2::new(400.0, 300.0));
        let b = state.balls.insert(3, Vec2::new(420.0, 340.0));
        if let Some(ball) = state.balls.get_mut(a) {
            ball.vel = Vec2::new(5.0, 5.0);
        }

        let outcome = merge_pair(&mut state, MergeCandidate { a, b });
        let Some(MergeOutcome::Promoted { id, size_label }) = outcome else {
            panic!("expected promotion, got {outcome:?}");
        };
        assert_eq!(size_label, 4);
        assert_eq!(state.score, 3);
        assert_eq!(state.balls.len(), 1);

        let merged = state.balls.get(id).unwrap();
        assert_eq!(merged.pos, Vec2::new(410.0, 320.0));
        assert_eq!(merged.vel, Vec2::ZERO);
        assert_eq!(merged.radius(), 40.0);
        assert!(merged.in_play);
    }

    #[test]
    fn test_max_size_pair_clears() {
        let mut state = GameState::with_seed(1);
        let a = state.balls.insert(10, Vec2::new(400.0, 300.0));
        let b = state.balls.insert(10, Vec2::new(450.0, 300.0));

        assert_eq!(merge_pair(&mut state, MergeCandidate { a, b }), Some(MergeOutcome::Cleared));
        assert!(state.balls.is_empty());
        assert_eq!(state.score, 10);
        assert!(matches!(state.events[..], [GameEvent::Cleared { .. }]));
    }

    #[test]
    fn test_consumed_ball_not_merged_twice() {
        let mut state = GameState::with_seed(1);
        let a = state.balls.insert(1, Vec2::new(400.0, 300.0));
        let b = state.balls.insert(1, Vec2::new(405.0, 300.0));
        let c = state.balls.insert(1, Vec2::new(410.0, 300.0));

        let candidates = [
            MergeCandidate { a, b },
            MergeCandidate { a, b: c },
            MergeCandidate { a: b, b: c },
        ];
        assert_eq!(apply_merges(&mut state, &candidates), 1);
        assert_eq!(state.score, 1);
        assert!(state.balls.contains(c));
        let labels: Vec<u8> = state.balls.iter().map(|b| b.size_label).collect();
        assert_eq!(labels, vec![1, 2]);
    }

    #[test]
    fn test_mismatched_labels_ignored() {
        let mut state = GameState::with_seed(1);
        let a = state.balls.insert(1, Vec2::new(400.0, 300.0));
        let b = state.balls.insert(2, Vec2::new(405.0, 300.0));
        assert_eq!(merge_pair(&mut state, MergeCandidate { a, b }), None);
        assert_eq!(state.balls.len(), 2);
        assert_eq!(state.score, 0);
    }
}
