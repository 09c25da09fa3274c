//! Ball registry
//!
//! Owns every live ball. Balls are kept sorted by id so iteration order (and
//! therefore pair order) is stable across runs.

use glam::Vec2;

use super::state::Ball;
use crate::consts::{MAX_SIZE_LABEL, MIN_SIZE_LABEL};

#[derive(Debug, Clone)]
pub struct BallRegistry {
    /// Sorted by id; new ids are always larger so pushes keep the order
    balls: Vec<Ball>,
    next_id: u32,
}

impl Default for BallRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl BallRegistry {
    pub fn new() -> Self {
        Self {
            balls: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new ball id
    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Create a ball at rest and return its id. Labels are clamped into
    /// `MIN_SIZE_LABEL..=MAX_SIZE_LABEL`.
    pub fn insert(&mut self, size_label: u8, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        let size_label = size_label.clamp(MIN_SIZE_LABEL, MAX_SIZE_LABEL);
        self.balls.push(Ball::new(id, size_label, pos));
        id
    }

    /// Remove a ball, returning it if it was still live
    pub fn remove(&mut self, id: u32) -> Option<Ball> {
        let idx = self.index_of(id)?;
        Some(self.balls.remove(idx))
    }

    pub fn get(&self, id: u32) -> Option<&Ball> {
        self.index_of(id).map(|idx| &self.balls[idx])
    }

    pub fn get_mut(&mut self, id: u32) -> Option<&mut Ball> {
        self.index_of(id).map(move |idx| &mut self.balls[idx])
    }

    #[inline]
    pub fn contains(&self, id: u32) -> bool {
        self.index_of(id).is_some()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.balls.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.balls.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Ball> {
        self.balls.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Ball> {
        self.balls.iter_mut()
    }

    /// Remove every ball and restart id allocation
    pub fn clear(&mut self) {
        self.balls.clear();
        self.next_id = 1;
    }

    /// First ball whose circle overlaps the given circle
    pub fn find_overlapping(&self, pos: Vec2, radius: f32) -> Option<&Ball> {
        self.balls.iter().find(|b| b.overlaps_circle(pos, radius))
    }

    /// Mutable access to two distinct balls by index (`i < j`)
    pub(crate) fn pair_mut(&mut self, i: usize, j: usize) -> (&mut Ball, &mut Ball) {
        debug_assert!(i < j);
        let (head, tail) = self.balls.split_at_mut(j);
        (&mut head[i], &mut tail[0])
    }

    fn index_of(&self, id: u32) -> Option<usize> {
        self.balls.binary_search_by_key(&id, |b| b.id).ok()
    }
}

impl<'a> IntoIterator for &'a BallRegistry {
    type Item = &'a Ball;
    type IntoIter = std::slice::Iter<'a, Ball>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
