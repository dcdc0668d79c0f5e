/*
Pattern Grid
============

The sequencer's memory: one boolean per (pad, step).

  rows     pad index, always PAD_COUNT (8)
  columns  global step index, bars * STEPS_PER_BAR (16)

       step  0 1 2 3 4 5 6 7 8 9 ...                    total_steps - 1
  pad 0      x . . . x . . . x . . . x . . .   ...
  pad 1      . . . . x . . . . . . . x . . .   ...
  ...

The shape is fixed at construction. Every mutation is a cell write; nothing
resizes the grid, so a step index the transport holds stays valid across
edits.

Cells are stored row-major in one flat Vec<bool>.
*/

use rand::Rng;

use crate::{PAD_COUNT, STEPS_PER_BAR};

/// Probability that `randomize_bar` turns a cell on.
const RANDOM_DENSITY: f64 = 0.2;

/// Bar a global step belongs to.
pub fn bar_of(step: usize) -> usize {
    step / STEPS_PER_BAR
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternGrid {
    bars: usize,
    cells: Vec<bool>,
}

impl PatternGrid {
    /// Empty grid of `bars` bars (at least one).
    pub fn new(bars: usize) -> Self {
        let bars = bars.max(1);
        Self {
            bars,
            cells: vec![false; PAD_COUNT * bars * STEPS_PER_BAR],
        }
    }

    pub fn bars(&self) -> usize {
        self.bars
    }

    pub fn total_steps(&self) -> usize {
        self.bars * STEPS_PER_BAR
    }

    #[inline]
    fn index(&self, row: usize, step: usize) -> Option<usize> {
        (row < PAD_COUNT && step < self.total_steps()).then(|| row * self.total_steps() + step)
    }

    /// Whether `row` fires on `step`. Out-of-range cells read as off.
    pub fn is_set(&self, row: usize, step: usize) -> bool {
        self.index(row, step).is_some_and(|i| self.cells[i])
    }

    /// Write one cell. Returns `false` if the cell is out of range.
    pub fn set(&mut self, row: usize, step: usize, on: bool) -> bool {
        match self.index(row, step) {
            Some(i) => {
                self.cells[i] = on;
                true
            }
            None => false,
        }
    }

    /// Flip one cell and return its new value.
    pub fn toggle(&mut self, row: usize, step: usize) -> Option<bool> {
        let i = self.index(row, step)?;
        self.cells[i] = !self.cells[i];
        Some(self.cells[i])
    }

    /// Flip a cell addressed as (bar, step within bar).
    pub fn toggle_in_bar(&mut self, row: usize, bar: usize, local_step: usize) -> Option<bool> {
        if local_step >= STEPS_PER_BAR {
            return None;
        }
        self.toggle(row, bar.checked_mul(STEPS_PER_BAR)?.checked_add(local_step)?)
    }

    /// Rows that fire on `step`, in pad order.
    pub fn hits_at(&self, step: usize) -> impl Iterator<Item = usize> + '_ {
        (0..PAD_COUNT).filter(move |&row| self.is_set(row, step))
    }

    /// One row as a slice of steps.
    pub fn row(&self, row: usize) -> Option<&[bool]> {
        let total = self.total_steps();
        (row < PAD_COUNT).then(|| &self.cells[row * total..(row + 1) * total])
    }

    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Fill the whole grid by repeating `rows`: cell `(r, i)` becomes
    /// `rows[r][i % rows[r].len()]`. Missing or empty rows leave that pad
    /// silent.
    pub fn tile(&mut self, rows: &[Vec<bool>]) {
        let total = self.total_steps();
        for row in 0..PAD_COUNT {
            let source = rows.get(row).filter(|r| !r.is_empty());
            for step in 0..total {
                self.cells[row * total + step] = source.is_some_and(|r| r[step % r.len()]);
            }
        }
    }

    /// Re-roll one bar: every cell turns on with probability 0.2, then pad 0
    /// is forced to a four-on-the-floor kick (on for every 4th step, off
    /// elsewhere). Out-of-range bars are ignored.
    pub fn randomize_bar<R: Rng>(&mut self, bar: usize, rng: &mut R) {
        if bar >= self.bars {
            return;
        }
        let start = bar * STEPS_PER_BAR;
        for row in 0..PAD_COUNT {
            for step in start..start + STEPS_PER_BAR {
                let on = if row == 0 {
                    step % 4 == 0
                } else {
                    rng.random_bool(RANDOM_DENSITY)
                };
                self.set(row, step, on);
            }
        }
    }

    /// Number of set cells.
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }
}

impl Default for PatternGrid {
    fn default() -> Self {
        Self::new(crate::DEFAULT_BARS)
    }
}
