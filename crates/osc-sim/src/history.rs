//! Bounded history of finalized runs.

use crate::recorder::WavePoint;
use osc_core::{PALETTE_SIZE, Parameters, Variant};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// A run that has been finalized but not yet given a color.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRun {
    pub parameters: Parameters,
    pub points: Vec<WavePoint>,
}

/// Finalized run. Immutable once archived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Run {
    variant: Variant,
    parameters: Parameters,
    points: Vec<WavePoint>,
    color_index: usize,
}

impl Run {
    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn points(&self) -> &[WavePoint] {
        &self.points
    }

    /// Index into the fixed run palette.
    pub fn color_index(&self) -> usize {
        self.color_index
    }

    /// Virtual time of the last sample.
    pub fn duration(&self) -> f64 {
        self.points.last().map_or(0.0, |p| p.time)
    }
}

/// FIFO of finalized runs, oldest first.
#[derive(Debug, Clone)]
pub struct RunHistory {
    runs: VecDeque<Run>,
    capacity: usize,
    /// Runs pushed since the last clear; drives palette rotation.
    pushed: usize,
}

impl Default for RunHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl RunHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            runs: VecDeque::new(),
            capacity,
            pushed: 0,
        }
    }

    /// Archive a run, evicting the oldest entry when over capacity.
    ///
    /// The Nth run pushed since the last clear gets color `N mod PALETTE_SIZE`.
    /// Returns the evicted run, if any.
    pub fn push(&mut self, pending: PendingRun) -> Option<Run> {
        let run = Run {
            variant: pending.parameters.variant(),
            parameters: pending.parameters,
            points: pending.points,
            color_index: self.pushed % PALETTE_SIZE,
        };
        self.pushed += 1;
        self.runs.push_back(run);
        if self.runs.len() > self.capacity {
            self.runs.pop_front()
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.runs.clear();
        self.pushed = 0;
    }

    /// Runs of one variant in insertion order.
    ///
    /// The iterator is lazy and cloning it restarts from the same position.
    pub fn filtered_by(&self, variant: Variant) -> impl Iterator<Item = &Run> + Clone {
        self.runs.iter().filter(move |run| run.variant == variant)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Run> + Clone {
        self.runs.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Run> {
        self.runs.get(index)
    }

    pub fn latest(&self) -> Option<&Run> {
        self.runs.back()
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending(params: Parameters, n: usize) -> PendingRun {
        PendingRun {
            parameters: params,
            points: (1..=n)
                .map(|i| WavePoint::new(i as f64 * 0.1, i as f64))
                .collect(),
        }
    }

    fn cyl(length: f64) -> Parameters {
        Parameters::cylinder(0.5, length).unwrap()
    }

    #[test]
    fn push_evicts_exactly_the_oldest() {
        let mut history = RunHistory::new();
        for i in 0..10 {
            assert!(history.push(pending(cyl(10.0 + i as f64), 1)).is_none());
        }
        assert_eq!(history.len(), 10);

        let evicted = history.push(pending(cyl(99.0), 1)).unwrap();
        assert_eq!(evicted.parameters().extent(), 10.0);
        assert_eq!(history.len(), 10);
        assert_eq!(history.get(0).unwrap().parameters().extent(), 11.0);
        assert_eq!(history.latest().unwrap().parameters().extent(), 99.0);
    }

    #[test]
    fn colors_rotate_through_palette() {
        let mut history = RunHistory::new();
        for _ in 0..7 {
            history.push(pending(cyl(10.0), 1));
        }
        let colors: Vec<usize> = history.iter().map(Run::color_index).collect();
        assert_eq!(colors, vec![0, 1, 2, 3, 4, 0, 1]);

        history.clear();
        history.push(pending(cyl(10.0), 1));
        assert_eq!(history.latest().unwrap().color_index(), 0);
    }

    #[test]
    fn colors_keep_rotating_past_capacity() {
        let mut history = RunHistory::new();
        for _ in 0..12 {
            history.push(pending(cyl(10.0), 1));
        }
        // Runs 2..=11 remain
        let colors: Vec<usize> = history.iter().map(Run::color_index).collect();
        assert_eq!(colors, vec![2, 3, 4, 0, 1, 2, 3, 4, 0, 1]);
    }

    #[test]
    fn filtered_by_keeps_order_and_colors() {
        let mut history = RunHistory::new();
        history.push(pending(cyl(10.0), 2));
        history.push(pending(Parameters::cubic_block(5.0).unwrap(), 2));
        history.push(pending(cyl(20.0), 2));

        let cylinders = history.filtered_by(Variant::Cylinder);
        let again = cylinders.clone();
        let extents: Vec<f64> = cylinders.map(|r| r.parameters().extent()).collect();
        assert_eq!(extents, vec![10.0, 20.0]);
        let colors: Vec<usize> = again.map(Run::color_index).collect();
        assert_eq!(colors, vec![0, 2]);

        assert_eq!(history.filtered_by(Variant::CubicBlock).count(), 1);
        // Other-variant runs stay stored
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn huge_capacity_does_not_preallocate() {
        let mut history = RunHistory::with_capacity(usize::MAX);
        history.push(pending(cyl(10.0), 1));
        assert_eq!(history.len(), 1);
        assert_eq!(history.capacity(), usize::MAX);
    }

    #[test]
    fn run_reports_variant_and_duration() {
        let mut history = RunHistory::new();
        history.push(pending(Parameters::cubic_block(5.0).unwrap(), 4));
        let run = history.latest().unwrap();
        assert_eq!(run.variant(), Variant::CubicBlock);
        assert_eq!(run.points().len(), 4);
        assert!((run.duration() - 0.4).abs() < 1e-12);
    }
}
