use super::histogram1d::Histogram;
use crate::error::{HistError, Result};
use crate::histoer::axis::BinLocation;

impl Histogram {
    pub fn fill(&mut self, value: f64, weight: f64) {
        let w2 = weight * weight;
        match self.axis.locate(value) {
            BinLocation::Underflow => {
                self.underflow += weight;
                self.underflow_sumw2 += w2;
            }
            BinLocation::Overflow => {
                self.overflow += weight;
                self.overflow_sumw2 += w2;
            }
            BinLocation::Bin(index) => {
                self.bins[index] += weight;
                self.sumw2[index] += w2;
            }
        }
        self.entries += 1;
    }

    /// Move the overflow content into the last ordinary bin and clear the overflow slot.
    pub fn fold_overflow_into_last_bin(&mut self) {
        let last = self.bins.len() - 1;
        self.bins[last] += self.overflow;
        self.sumw2[last] += self.overflow_sumw2;
        self.overflow = 0.0;
        self.overflow_sumw2 = 0.0;
    }

    /// Bin-by-bin addition, used to reduce partially filled copies.
    pub fn add(&mut self, other: &Self) -> Result<()> {
        if !self.has_same_binning(other) {
            return Err(HistError::config(format!(
                "cannot add histogram {} to {}: binnings differ",
                other.name, self.name
            )));
        }

        for (bin, value) in self.bins.iter_mut().zip(&other.bins) {
            *bin += value;
        }
        for (bin, value) in self.sumw2.iter_mut().zip(&other.sumw2) {
            *bin += value;
        }
        self.underflow += other.underflow;
        self.overflow += other.overflow;
        self.underflow_sumw2 += other.underflow_sumw2;
        self.overflow_sumw2 += other.overflow_sumw2;
        self.entries += other.entries;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::histoer::axis::Axis;
    use crate::histoer::histo1d::histogram1d::Histogram;

    fn hist() -> Histogram {
        Histogram::new(
            "x",
            Axis::Uniform {
                bins: 4,
                min: 0.0,
                max: 4.0,
            },
            "x",
            "Events/1",
        )
    }

    #[test]
    fn test_fill_tracks_flows_and_sumw2() {
        let mut h = hist();
        h.fill(-1.0, 2.0);
        h.fill(0.5, 0.5);
        h.fill(0.7, 0.5);
        h.fill(4.0, 3.0);

        assert_eq!(h.underflow, 2.0);
        assert_eq!(h.overflow, 3.0);
        assert_eq!(h.bins, vec![1.0, 0.0, 0.0, 0.0]);
        assert_eq!(h.sumw2, vec![0.5, 0.0, 0.0, 0.0]);
        assert_eq!(h.entries, 4);
        assert_eq!(h.bin_content(0), 2.0);
        assert_eq!(h.bin_content(5), 3.0);
    }

    #[test]
    fn test_fold_overflow() {
        let mut h = hist();
        h.fill(3.5, 1.0);
        h.fill(10.0, 2.0);
        h.fold_overflow_into_last_bin();

        assert_eq!(h.bins[3], 3.0);
        assert_eq!(h.sumw2[3], 5.0);
        assert_eq!(h.overflow, 0.0);
        assert_eq!(h.overflow_sumw2, 0.0);
    }

    #[test]
    fn test_add_requires_same_binning() {
        let mut a = hist();
        let mut b = hist();
        a.fill(1.5, 1.0);
        b.fill(1.5, 2.0);
        b.fill(-3.0, 1.0);
        a.add(&b).unwrap();
        assert_eq!(a.bins[1], 3.0);
        assert_eq!(a.underflow, 1.0);
        assert_eq!(a.entries, 3);

        let c = Histogram::new(
            "x",
            Axis::Uniform {
                bins: 8,
                min: 0.0,
                max: 4.0,
            },
            "x",
            "Events/0.5",
        );
        assert!(a.add(&c).is_err());
    }
}
