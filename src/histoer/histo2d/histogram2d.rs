use fnv::FnvHashMap;

use crate::error::{HistError, Result};
use crate::histoer::axis::{Axis, BinLocation};

#[derive(Debug, Clone, PartialEq)]
pub struct Bins {
    // Keyed by (x, y) slot: 0 is underflow, n + 1 is overflow on either axis
    pub counts: FnvHashMap<(usize, usize), f64>,
    pub sumw2: FnvHashMap<(usize, usize), f64>,
    pub min_count: f64,
    pub max_count: f64,
}

impl Default for Bins {
    fn default() -> Self {
        Self {
            counts: FnvHashMap::default(),
            sumw2: FnvHashMap::default(),
            min_count: f64::MAX,
            max_count: f64::MIN,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Histogram2D {
    pub name: String,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub bins: Bins,
    pub entries: u64,
}

fn slot(axis: &Axis, value: f64) -> usize {
    match axis.locate(value) {
        BinLocation::Underflow => 0,
        BinLocation::Bin(index) => index + 1,
        BinLocation::Overflow => axis.n_bins() + 1,
    }
}

impl Histogram2D {
    pub fn new(name: &str, x_axis: Axis, y_axis: Axis, x_label: &str, y_label: &str) -> Self {
        Self {
            name: name.to_owned(),
            title: name.to_owned(),
            x_label: x_label.to_owned(),
            y_label: y_label.to_owned(),
            x_axis,
            y_axis,
            bins: Bins::default(),
            entries: 0,
        }
    }

    pub fn reset(&mut self) {
        self.bins = Bins::default();
        self.entries = 0;
    }

    pub fn renamed(&self, name: &str) -> Self {
        let mut hist = self.clone();
        hist.name = name.to_owned();
        hist
    }

    pub fn fill(&mut self, x_value: f64, y_value: f64, weight: f64) {
        let key = (slot(&self.x_axis, x_value), slot(&self.y_axis, y_value));

        let count = self.bins.counts.entry(key).or_insert(0.0);
        *count += weight;
        let count = *count;
        *self.bins.sumw2.entry(key).or_insert(0.0) += weight * weight;

        self.bins.min_count = self.bins.min_count.min(count);
        self.bins.max_count = self.bins.max_count.max(count);
        self.entries += 1;
    }

    /// Content of slot `(ix, iy)`, flow slots included.
    pub fn bin_content(&self, ix: usize, iy: usize) -> f64 {
        self.bins.counts.get(&(ix, iy)).copied().unwrap_or(0.0)
    }

    pub fn bin_sumw2(&self, ix: usize, iy: usize) -> f64 {
        self.bins.sumw2.get(&(ix, iy)).copied().unwrap_or(0.0)
    }

    fn is_inner(&self, ix: usize, iy: usize) -> bool {
        (1..=self.x_axis.n_bins()).contains(&ix) && (1..=self.y_axis.n_bins()).contains(&iy)
    }

    /// Sum over the ordinary bins only.
    pub fn integral(&self) -> f64 {
        self.filled_slots()
            .iter()
            .filter(|((ix, iy), _)| self.is_inner(*ix, *iy))
            .map(|(_, count)| count)
            .sum()
    }

    pub fn integral_with_flows(&self) -> f64 {
        self.filled_slots().iter().map(|(_, count)| count).sum()
    }

    /// Non-empty `(ix, iy)` slots with their contents, in slot order.
    pub fn filled_slots(&self) -> Vec<((usize, usize), f64)> {
        let mut slots: Vec<_> = self.bins.counts.iter().map(|(&k, &v)| (k, v)).collect();
        slots.sort_unstable_by_key(|&(key, _)| key);
        slots
    }

    /// Dense `(nx + 2) x (ny + 2)` table of contents, indexed `[ix][iy]`.
    pub fn dense_counts(&self) -> Vec<Vec<f64>> {
        let (nx, ny) = (self.x_axis.n_bins() + 2, self.y_axis.n_bins() + 2);
        let mut table = vec![vec![0.0; ny]; nx];
        for ((ix, iy), count) in self.filled_slots() {
            table[ix][iy] = count;
        }
        table
    }

    // Each slot is updated on its own, so the visiting order is irrelevant
    #[expect(clippy::iter_over_hash_type)]
    pub fn add(&mut self, other: &Self) -> Result<()> {
        if self.x_axis != other.x_axis || self.y_axis != other.y_axis {
            return Err(HistError::config(format!(
                "cannot add histogram {} to {}: binnings differ",
                other.name, self.name
            )));
        }

        for (&key, &count) in &other.bins.counts {
            let bin = self.bins.counts.entry(key).or_insert(0.0);
            *bin += count;
            self.bins.min_count = self.bins.min_count.min(*bin);
            self.bins.max_count = self.bins.max_count.max(*bin);
        }
        for (&key, &w2) in &other.bins.sumw2 {
            *self.bins.sumw2.entry(key).or_insert(0.0) += w2;
        }
        self.entries += other.entries;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hist() -> Histogram2D {
        Histogram2D::new(
            "n2b1_tau21",
            Axis::Uniform {
                bins: 2,
                min: 0.0,
                max: 0.5,
            },
            Axis::Variable {
                edges: vec![0.0, 0.4, 1.0],
            },
            "n2b1",
            "tau21",
        )
    }

    #[test]
    fn test_fill_mixed_binning() {
        let mut h = hist();
        h.fill(0.1, 0.3, 1.0);
        h.fill(0.3, 0.7, 2.0);
        h.fill(0.3, 0.7, 2.0);
        h.fill(0.9, 0.1, 0.5);
        h.fill(-0.1, 2.0, 0.25);

        assert_eq!(h.bin_content(1, 1), 1.0);
        assert_eq!(h.bin_content(2, 2), 4.0);
        assert_eq!(h.bin_sumw2(2, 2), 8.0);
        assert_eq!(h.bin_content(3, 1), 0.5);
        assert_eq!(h.bin_content(0, 3), 0.25);
        assert_eq!(h.integral(), 5.0);
        assert_eq!(h.integral_with_flows(), 5.75);
        assert_eq!(h.entries, 5);
        assert_eq!(h.bins.max_count, 4.0);
    }

    #[test]
    fn test_dense_counts_layout() {
        let mut h = hist();
        h.fill(0.3, 0.7, 2.0);
        let table = h.dense_counts();
        assert_eq!(table.len(), 4);
        assert_eq!(table[0].len(), 4);
        assert_eq!(table[2][2], 2.0);
    }

    #[test]
    fn test_add() {
        let mut a = hist();
        let mut b = hist();
        a.fill(0.1, 0.1, 1.0);
        b.fill(0.1, 0.1, 1.5);
        b.fill(0.4, 0.9, 1.0);
        a.add(&b).unwrap();
        assert_eq!(a.bin_content(1, 1), 2.5);
        assert_eq!(a.bin_content(2, 2), 1.0);
        assert_eq!(a.entries, 3);
    }
}
