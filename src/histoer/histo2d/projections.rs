use super::histogram2d::Histogram2D;
use crate::histoer::histo1d::histogram1d::Histogram;

impl Histogram2D {
    /// Project onto the x axis, summing over all y slots (flows included).
    pub fn project_x(&self) -> Histogram {
        let mut projection = Histogram::new(
            &format!("{}_px", self.name),
            self.x_axis.clone(),
            &self.x_label,
            "Events",
        );
        let n = self.x_axis.n_bins();

        for ((ix, iy), count) in self.filled_slots() {
            let w2 = self.bin_sumw2(ix, iy);
            match ix {
                0 => {
                    projection.underflow += count;
                    projection.underflow_sumw2 += w2;
                }
                i if i == n + 1 => {
                    projection.overflow += count;
                    projection.overflow_sumw2 += w2;
                }
                i => {
                    projection.bins[i - 1] += count;
                    projection.sumw2[i - 1] += w2;
                }
            }
        }
        projection.entries = self.entries;

        projection
    }

    /// Project onto the y axis, summing over all x slots (flows included).
    pub fn project_y(&self) -> Histogram {
        let mut projection = Histogram::new(
            &format!("{}_py", self.name),
            self.y_axis.clone(),
            &self.y_label,
            "Events",
        );
        let n = self.y_axis.n_bins();

        for ((ix, iy), count) in self.filled_slots() {
            let w2 = self.bin_sumw2(ix, iy);
            match iy {
                0 => {
                    projection.underflow += count;
                    projection.underflow_sumw2 += w2;
                }
                i if i == n + 1 => {
                    projection.overflow += count;
                    projection.overflow_sumw2 += w2;
                }
                i => {
                    projection.bins[i - 1] += count;
                    projection.sumw2[i - 1] += w2;
                }
            }
        }
        projection.entries = self.entries;

        projection
    }
}

#[cfg(test)]
mod tests {
    use crate::histoer::axis::Axis;
    use crate::histoer::histo2d::histogram2d::Histogram2D;

    #[test]
    fn test_projections() {
        let mut h = Histogram2D::new(
            "a_b",
            Axis::Uniform {
                bins: 2,
                min: 0.0,
                max: 2.0,
            },
            Axis::Uniform {
                bins: 3,
                min: 0.0,
                max: 3.0,
            },
            "a",
            "b",
        );
        h.fill(0.5, 0.5, 1.0);
        h.fill(0.5, 2.5, 2.0);
        h.fill(1.5, 5.0, 4.0);

        let px = h.project_x();
        assert_eq!(px.name, "a_b_px");
        assert_eq!(px.bins, vec![3.0, 4.0]);
        assert_eq!(px.overflow, 0.0);

        let py = h.project_y();
        assert_eq!(py.bins, vec![1.0, 0.0, 2.0]);
        assert_eq!(py.overflow, 4.0);
    }
}
