//! Candidate buffers owned by the refiner for the duration of one cycle.
//!
//! The set maps every [`Axis`] to a [`CandidatePair`]. All six slots exist
//! from the moment the cycle is reset; slots whose axis was never evaluated
//! (including the rotational ones) keep the sentinel score and cannot be
//! selected. The set is rebuilt on every reset, so nothing leaks across
//! cycles.
use super::types::{Axis, Candidate, CandidatePair, Direction};
use crate::types::Pose;
use std::collections::BTreeMap;

#[derive(Clone, Debug)]
pub struct CandidateSet {
    origin: Pose,
    slots: BTreeMap<Axis, CandidatePair>,
}

impl CandidateSet {
    /// Every slot initialised to `origin` with the sentinel score.
    pub fn new(origin: &Pose) -> Self {
        let slots = Axis::ALL
            .iter()
            .map(|&axis| (axis, CandidatePair::sentinel(origin)))
            .collect();
        Self {
            origin: origin.clone(),
            slots,
        }
    }

    /// Pose every candidate was perturbed from.
    pub fn origin(&self) -> &Pose {
        &self.origin
    }

    /// Overwrite the slot for `(axis, direction)`.
    pub fn record(&mut self, axis: Axis, direction: Direction, candidate: Candidate) {
        *self.pair_mut(axis).get_mut(direction) = candidate;
    }

    pub fn pair(&self, axis: Axis) -> &CandidatePair {
        &self.slots[&axis]
    }

    pub fn get(&self, axis: Axis, direction: Direction) -> &Candidate {
        self.pair(axis).get(direction)
    }

    fn pair_mut(&mut self, axis: Axis) -> &mut CandidatePair {
        let origin = &self.origin;
        self.slots
            .entry(axis)
            .or_insert_with(|| CandidatePair::sentinel(origin))
    }

    /// Candidates in tie-break order: axis order, positive before negative.
    pub fn iter(&self) -> impl Iterator<Item = (Axis, Direction, &Candidate)> + '_ {
        self.slots.iter().flat_map(|(&axis, pair)| {
            Direction::BOTH
                .into_iter()
                .map(move |direction| (axis, direction, pair.get(direction)))
        })
    }

    pub fn evaluated_axes(&self) -> Vec<Axis> {
        self.slots
            .iter()
            .filter(|(_, pair)| pair.positive.is_evaluated() || pair.negative.is_evaluated())
            .map(|(&axis, _)| axis)
            .collect()
    }
}
