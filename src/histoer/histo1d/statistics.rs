use super::histogram1d::Histogram;

impl Histogram {
    // Weighted mean and standard deviation over the ordinary bins, using bin centers.
    pub fn get_statistics(&self) -> (f64, f64, f64) {
        let centers = self.get_bin_centers();
        let integral = self.integral();

        if integral == 0.0 {
            return (0.0, 0.0, 0.0);
        }

        let mean = centers
            .iter()
            .zip(&self.bins)
            .map(|(center, content)| center * content)
            .sum::<f64>()
            / integral;

        let variance = centers
            .iter()
            .zip(&self.bins)
            .map(|(center, content)| content * (center - mean).powi(2))
            .sum::<f64>()
            / integral;

        (integral, mean, variance.max(0.0).sqrt())
    }

    pub fn mean(&self) -> f64 {
        self.get_statistics().1
    }

    pub fn stdev(&self) -> f64 {
        self.get_statistics().2
    }
}

#[cfg(test)]
mod tests {
    use crate::histoer::axis::Axis;
    use crate::histoer::histo1d::histogram1d::Histogram;
    use approx::assert_relative_eq;

    #[test]
    fn test_statistics() {
        let mut h = Histogram::new(
            "x",
            Axis::Uniform {
                bins: 4,
                min: 0.0,
                max: 4.0,
            },
            "x",
            "Events/1",
        );
        h.fill(0.5, 1.0);
        h.fill(2.5, 1.0);
        h.fill(100.0, 5.0);

        let (integral, mean, stdev) = h.get_statistics();
        assert_relative_eq!(integral, 2.0);
        assert_relative_eq!(mean, 1.5);
        assert_relative_eq!(stdev, 1.0);
    }

    #[test]
    fn test_empty_statistics() {
        let h = Histogram::new(
            "x",
            Axis::Variable {
                edges: vec![0.0, 1.0, 3.0],
            },
            "x",
            "Events",
        );
        assert_eq!(h.get_statistics(), (0.0, 0.0, 0.0));
    }
}
