use fnv::FnvHashMap;

use super::axis::Axis;
use super::configs::HistogramSpec;
use super::histo1d::histogram1d::Histogram;
use super::histo2d::histogram2d::Histogram2D;
use crate::error::{HistError, Result};

/// A booked histogram instance of either dimensionality.
#[derive(Debug, Clone, PartialEq)]
pub enum Booked {
    Hist1D(Histogram),
    Hist2D(Histogram2D),
}

impl Booked {
    pub fn name(&self) -> &str {
        match self {
            Self::Hist1D(hist) => &hist.name,
            Self::Hist2D(hist) => &hist.name,
        }
    }

    fn renamed(&self, name: &str) -> Self {
        match self {
            Self::Hist1D(hist) => Self::Hist1D(hist.renamed(name)),
            Self::Hist2D(hist) => Self::Hist2D(hist.renamed(name)),
        }
    }

    fn reset(&mut self) {
        match self {
            Self::Hist1D(hist) => hist.reset(),
            Self::Hist2D(hist) => hist.reset(),
        }
    }

    fn add(&mut self, other: &Self) -> Result<()> {
        match (self, other) {
            (Self::Hist1D(a), Self::Hist1D(b)) => a.add(b),
            (Self::Hist2D(a), Self::Hist2D(b)) => a.add(b),
            (a, b) => Err(HistError::config(format!(
                "cannot add {} to {}: dimensions differ",
                b.name(),
                a.name()
            ))),
        }
    }
}

/// Build the base histogram for a spec.
pub fn build(spec: &HistogramSpec) -> Result<Booked> {
    let x_axis = Axis::from_binning(&spec.x.binning)?;

    match &spec.y {
        None => {
            let y_label = match x_axis.bin_width() {
                Some(bw) => format!("Events/{bw}"),
                None => "Events".to_owned(),
            };
            let hist = Histogram::new(&spec.name(), x_axis, spec.x.label(), &y_label);
            Ok(Booked::Hist1D(hist))
        }
        Some(y) => {
            let y_axis = Axis::from_binning(&y.binning)?;
            let hist = Histogram2D::new(&spec.name(), x_axis, y_axis, spec.x.label(), y.label());
            Ok(Booked::Hist2D(hist))
        }
    }
}

/// Identity of one booked instance inside a collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryKey {
    pub sample: String,
    pub sub: Option<String>,
}

impl EntryKey {
    pub fn new(sample: &str, sub: Option<&str>) -> Self {
        Self {
            sample: sample.to_owned(),
            sub: sub.map(str::to_string),
        }
    }
}

impl std::fmt::Display for EntryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.sub {
            Some(sub) => write!(f, "{}_{}", self.sample, sub),
            None => write!(f, "{}", self.sample),
        }
    }
}

/// All copies of one spec, one per sample key and per (key, sub-key).
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramCollection {
    pub name: String,
    pub spec: HistogramSpec,
    entries: Vec<(EntryKey, Booked)>,
    index: FnvHashMap<EntryKey, usize>,
}

impl HistogramCollection {
    pub fn get(&self, key: &EntryKey) -> Option<&Booked> {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    pub fn get_mut(&mut self, key: &EntryKey) -> Option<&mut Booked> {
        let i = *self.index.get(key)?;
        Some(&mut self.entries[i].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in booking order.
    pub fn entries(&self) -> impl Iterator<Item = (&EntryKey, &Booked)> {
        self.entries.iter().map(|(key, hist)| (key, hist))
    }
}

/// Build one base histogram and deep-copy it for every key and sub-key.
pub fn clone_for_keys(
    spec: &HistogramSpec,
    keys: &[String],
    sub_keys: &[String],
) -> Result<HistogramCollection> {
    let base = build(spec)?;
    let name = spec.name();

    let mut entries = Vec::with_capacity(keys.len() * (1 + sub_keys.len()));
    for key in keys {
        let key_name = format!("{name}_{key}");
        entries.push((EntryKey::new(key, None), base.renamed(&key_name)));

        for sub_key in sub_keys {
            entries.push((
                EntryKey::new(key, Some(sub_key)),
                base.renamed(&format!("{key_name}_{sub_key}")),
            ));
        }
    }

    let mut index = FnvHashMap::default();
    for (i, (key, _)) in entries.iter().enumerate() {
        if index.insert(key.clone(), i).is_some() {
            return Err(HistError::config(format!(
                "sample key '{key}' appears twice while booking {name}"
            )));
        }
    }

    Ok(HistogramCollection {
        name,
        spec: spec.clone(),
        entries,
        index,
    })
}

/// Registry of every booked histogram, addressed by `(name, key[, sub_key])`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Histogrammer {
    pub keys: Vec<String>,
    pub sub_keys: Vec<String>,
    collections: Vec<HistogramCollection>,
    index: FnvHashMap<String, usize>,
}

impl Histogrammer {
    /// Booking phase: every spec for every key, before any event is seen.
    pub fn book(specs: &[HistogramSpec], keys: &[String], sub_keys: &[String]) -> Result<Self> {
        let mut histogrammer = Self {
            keys: keys.to_vec(),
            sub_keys: sub_keys.to_vec(),
            ..Default::default()
        };

        for spec in specs {
            let collection = clone_for_keys(spec, keys, sub_keys)?;
            if histogrammer.index.contains_key(&collection.name) {
                return Err(HistError::DuplicateHistogram(collection.name));
            }
            histogrammer
                .index
                .insert(collection.name.clone(), histogrammer.collections.len());
            histogrammer.collections.push(collection);
        }

        log::debug!(
            "Booked {} histograms ({} specs x {} keys x {} sub-keys)",
            histogrammer.len(),
            specs.len(),
            keys.len(),
            1 + sub_keys.len()
        );

        Ok(histogrammer)
    }

    /// Total number of booked instances.
    pub fn len(&self) -> usize {
        self.collections.iter().map(HistogramCollection::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn collections(&self) -> &[HistogramCollection] {
        &self.collections
    }

    pub fn collection(&self, name: &str) -> Option<&HistogramCollection> {
        self.index.get(name).map(|&i| &self.collections[i])
    }

    pub fn get(&self, name: &str, key: &str, sub: Option<&str>) -> Result<&Booked> {
        let entry = EntryKey::new(key, sub);
        self.collection(name)
            .and_then(|collection| collection.get(&entry))
            .ok_or_else(|| HistError::UnregisteredHistogram {
                name: name.to_owned(),
                key: entry.to_string(),
            })
    }

    pub fn get_mut(&mut self, name: &str, key: &str, sub: Option<&str>) -> Result<&mut Booked> {
        let entry = EntryKey::new(key, sub);
        let found = self
            .index
            .get(name)
            .copied()
            .and_then(|i| self.collections[i].get_mut(&entry));
        found.ok_or_else(|| HistError::UnregisteredHistogram {
            name: name.to_owned(),
            key: entry.to_string(),
        })
    }

    pub fn hist1d(&self, name: &str, key: &str, sub: Option<&str>) -> Result<&Histogram> {
        match self.get(name, key, sub)? {
            Booked::Hist1D(hist) => Ok(hist),
            Booked::Hist2D(_) => Err(HistError::config(format!("{name} is a 2D histogram"))),
        }
    }

    pub fn hist1d_mut(&mut self, name: &str, key: &str, sub: Option<&str>) -> Result<&mut Histogram> {
        match self.get_mut(name, key, sub)? {
            Booked::Hist1D(hist) => Ok(hist),
            Booked::Hist2D(_) => Err(HistError::config(format!("{name} is a 2D histogram"))),
        }
    }

    pub fn hist2d(&self, name: &str, key: &str, sub: Option<&str>) -> Result<&Histogram2D> {
        match self.get(name, key, sub)? {
            Booked::Hist2D(hist) => Ok(hist),
            Booked::Hist1D(_) => Err(HistError::config(format!("{name} is a 1D histogram"))),
        }
    }

    pub fn hist2d_mut(
        &mut self,
        name: &str,
        key: &str,
        sub: Option<&str>,
    ) -> Result<&mut Histogram2D> {
        match self.get_mut(name, key, sub)? {
            Booked::Hist2D(hist) => Ok(hist),
            Booked::Hist1D(_) => Err(HistError::config(format!("{name} is a 1D histogram"))),
        }
    }

    /// Same bookings with every content cleared.
    pub fn empty_clone(&self) -> Self {
        let mut copy = self.clone();
        for collection in &mut copy.collections {
            for (_, hist) in &mut collection.entries {
                hist.reset();
            }
        }
        copy
    }

    /// Add every histogram of `other` into the matching booking here.
    pub fn merge(&mut self, other: &Self) -> Result<()> {
        for collection in &other.collections {
            for (key, hist) in collection.entries() {
                let target = self.get_mut(&collection.name, &key.sample, key.sub.as_deref())?;
                target.add(hist)?;
            }
        }
        Ok(())
    }
}
