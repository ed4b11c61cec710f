use crate::histoer::axis::Axis;

#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Histogram {
    pub name: String,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub axis: Axis,
    pub bins: Vec<f64>,  // Sum of weights per ordinary bin
    pub sumw2: Vec<f64>, // Sum of squared weights per ordinary bin
    pub underflow: f64,
    pub overflow: f64,
    pub underflow_sumw2: f64,
    pub overflow_sumw2: f64,
    pub entries: u64,
}

impl Histogram {
    pub fn new(name: &str, axis: Axis, x_label: &str, y_label: &str) -> Self {
        let number_of_bins = axis.n_bins();
        Self {
            name: name.to_owned(),
            title: name.to_owned(),
            x_label: x_label.to_owned(),
            y_label: y_label.to_owned(),
            axis,
            bins: vec![0.0; number_of_bins],
            sumw2: vec![0.0; number_of_bins],
            underflow: 0.0,
            overflow: 0.0,
            underflow_sumw2: 0.0,
            overflow_sumw2: 0.0,
            entries: 0,
        }
    }

    pub fn reset(&mut self) {
        self.bins = vec![0.0; self.bins.len()];
        self.sumw2 = vec![0.0; self.sumw2.len()];
        self.underflow = 0.0;
        self.overflow = 0.0;
        self.underflow_sumw2 = 0.0;
        self.overflow_sumw2 = 0.0;
        self.entries = 0;
    }

    /// Deep copy under a new name; the title keeps the variable name.
    pub fn renamed(&self, name: &str) -> Self {
        let mut hist = self.clone();
        hist.name = name.to_owned();
        hist
    }

    pub fn n_bins(&self) -> usize {
        self.bins.len()
    }

    pub fn bin_width(&self) -> Option<f64> {
        self.axis.bin_width()
    }

    pub fn get_bin_edges(&self) -> Vec<f64> {
        self.axis.edges()
    }

    pub fn get_bin_centers(&self) -> Vec<f64> {
        self.axis.bin_centers()
    }

    // 0 is the underflow slot, n_bins + 1 the overflow slot
    pub fn bin_content(&self, index: usize) -> f64 {
        match index {
            0 => self.underflow,
            i if i <= self.bins.len() => self.bins[i - 1],
            i if i == self.bins.len() + 1 => self.overflow,
            _ => 0.0,
        }
    }

    pub fn set_bin_content(&mut self, index: usize, content: f64) {
        let n = self.bins.len();
        match index {
            0 => self.underflow = content,
            i if i <= n => self.bins[i - 1] = content,
            i if i == n + 1 => self.overflow = content,
            _ => log::warn!("Bin {index} is out of range for histogram {}", self.name),
        }
    }

    /// Sum over the ordinary bins only.
    pub fn integral(&self) -> f64 {
        self.bins.iter().sum()
    }

    pub fn integral_with_flows(&self) -> f64 {
        self.integral() + self.underflow + self.overflow
    }

    pub fn bin_errors(&self) -> Vec<f64> {
        self.sumw2.iter().map(|w2| w2.sqrt()).collect()
    }

    pub fn has_same_binning(&self, other: &Self) -> bool {
        self.axis == other.axis
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn hist() -> Histogram {
        Histogram::new(
            "w_mt",
            Axis::Variable {
                edges: vec![0.0, 100.0, 300.0],
            },
            "w_mt",
            "Events",
        )
    }

    #[test]
    fn test_set_bin_content_uses_flow_slots() {
        let mut h = hist();
        h.set_bin_content(0, 1.5);
        h.set_bin_content(2, 4.0);
        h.set_bin_content(3, 0.5);
        h.set_bin_content(7, 9.0);

        assert_eq!(h.underflow, 1.5);
        assert_eq!(h.bins, vec![0.0, 4.0]);
        assert_eq!(h.overflow, 0.5);
        assert_eq!(h.bin_content(2), 4.0);
        assert_eq!(h.bin_content(7), 0.0);
        assert_relative_eq!(h.integral(), 4.0);
        assert_relative_eq!(h.integral_with_flows(), 6.0);
    }

    #[test]
    fn test_bin_errors_from_sumw2() {
        let mut h = hist();
        h.fill(50.0, 3.0);
        h.fill(60.0, 4.0);
        h.fill(150.0, 1.0);

        let errors = h.bin_errors();
        assert_relative_eq!(errors[0], 5.0);
        assert_relative_eq!(errors[1], 1.0);
    }

    #[test]
    fn test_reset_and_rename() {
        let mut h = hist();
        h.fill(50.0, 2.0);
        let copy = h.renamed("w_mt_ttbar");
        h.reset();

        assert_eq!(h.integral(), 0.0);
        assert_eq!(h.entries, 0);
        assert_eq!(copy.name, "w_mt_ttbar");
        assert_eq!(copy.title, "w_mt");
        assert_relative_eq!(copy.integral(), 2.0);
        assert!(copy.has_same_binning(&h));
    }
}
