use fnv::FnvHashMap;

/// Label under which every sample whose key mentions data is tallied.
pub const DATA_LABEL: &str = "data";

/// Categorical histogram whose axis grows as new labels are filled.
#[derive(Debug, Clone, Default, serde::Deserialize, serde::Serialize)]
pub struct EntryCounter {
    pub name: String,
    pub labels: Vec<String>,
    pub counts: Vec<u64>,
    #[serde(skip)]
    index: FnvHashMap<String, usize>,
}

// The label index is a lookup cache and takes no part in equality
impl PartialEq for EntryCounter {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.labels == other.labels && self.counts == other.counts
    }
}

impl Eq for EntryCounter {}

impl EntryCounter {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            ..Default::default()
        }
    }

    pub fn fill(&mut self, label: &str, count: u64) {
        if self.index.len() != self.labels.len() {
            self.rebuild_index();
        }

        match self.index.get(label) {
            Some(&i) => self.counts[i] += count,
            None => {
                self.index.insert(label.to_owned(), self.labels.len());
                self.labels.push(label.to_owned());
                self.counts.push(count);
            }
        }
    }

    /// Collapse every key containing "data" into one category.
    pub fn fill_sample(&mut self, sample_key: &str, count: u64) {
        if sample_key.contains(DATA_LABEL) {
            self.fill(DATA_LABEL, count);
        } else {
            self.fill(sample_key, count);
        }
    }

    pub fn count(&self, label: &str) -> Option<u64> {
        self.labels
            .iter()
            .position(|l| l == label)
            .map(|i| self.counts[i])
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn merge(&mut self, other: &Self) {
        for (label, &count) in other.labels.iter().zip(&other.counts) {
            self.fill(label, count);
        }
    }

    // The index is skipped by serde, so deserialized counters start without one
    fn rebuild_index(&mut self) {
        self.index = self
            .labels
            .iter()
            .enumerate()
            .map(|(i, label)| (label.clone(), i))
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_keys_collapse() {
        let mut counter = EntryCounter::new("total_entries");
        counter.fill_sample("ttbar", 5);
        counter.fill_sample("SingleMuon_data_2018A", 2);
        counter.fill_sample("data_2018B", 1);

        assert_eq!(counter.labels(), &["ttbar".to_string(), "data".to_string()]);
        assert_eq!(counter.count("ttbar"), Some(5));
        assert_eq!(counter.count("data"), Some(3));
        assert_eq!(counter.count("wjets"), None);
        assert_eq!(counter.total(), 8);
    }

    #[test]
    fn test_zero_count_still_adds_label() {
        let mut counter = EntryCounter::new("total_entries");
        counter.fill_sample("wjets", 0);
        assert_eq!(counter.count("wjets"), Some(0));
    }

    #[test]
    fn test_merge_after_deserialize() {
        let mut a = EntryCounter::new("total_entries");
        a.fill("ttbar", 2);
        let json = serde_json::to_string(&a).unwrap();
        let mut restored: EntryCounter = serde_json::from_str(&json).unwrap();

        let mut b = EntryCounter::new("total_entries");
        b.fill("ttbar", 3);
        b.fill("data", 4);
        restored.merge(&b);

        assert_eq!(restored.count("ttbar"), Some(5));
        assert_eq!(restored.count("data"), Some(4));
    }

    #[test]
    fn test_equality_ignores_label_index() {
        let mut counter = EntryCounter::new("total_entries");
        counter.fill_sample("ttbar", 5);
        counter.fill_sample("data_mu", 3);

        let json = serde_json::to_string(&counter).unwrap();
        let restored: EntryCounter = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, counter);

        let mut other = restored.clone();
        other.fill("ttbar", 1);
        assert_ne!(other, counter);
    }
}
