use std::collections::HashMap;
use std::hash::Hash;

/// Occurrence counts of distinct values, kept in first-seen order.
///
/// Iteration order is the order in which each value was first recorded.
/// [`FrequencyTable::mode`] relies on it to break ties in favour of the
/// earliest value.
#[derive(Debug, Clone)]
pub struct FrequencyTable<T> {
    slots: HashMap<T, usize>,
    entries: Vec<(T, usize)>,
}

impl<T> Default for FrequencyTable<T> {
    fn default() -> Self {
        Self {
            slots: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<T: Eq + Hash + Clone> FrequencyTable<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one occurrence of `value`. Values are compared exactly,
    /// so `"abc"` and `"ABC"` are different keys.
    pub fn record(&mut self, value: T) {
        if let Some(&slot) = self.slots.get(&value) {
            self.entries[slot].1 += 1;
            return;
        }
        self.slots.insert(value.clone(), self.entries.len());
        self.entries.push((value, 1));
    }

    pub fn count(&self, value: &T) -> usize {
        self.slots
            .get(value)
            .map_or(0, |&slot| self.entries[slot].1)
    }

    pub fn distinct_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&T, usize)> + '_ {
        self.entries.iter().map(|(value, count)| (value, *count))
    }

    /// Most frequent value, or `None` for an empty table.
    ///
    /// Only a strictly greater count replaces the current best, so on a tie
    /// the value recorded first wins.
    pub fn mode(&self) -> Option<&T> {
        let mut best: Option<(&T, usize)> = None;
        for (value, count) in self.iter() {
            match best {
                Some((_, max)) if count <= max => {}
                _ => best = Some((value, count)),
            }
        }
        best.map(|(value, _)| value)
    }
}

impl<T: Eq + Hash + Clone> FromIterator<T> for FrequencyTable<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut table = Self::new();
        for value in iter {
            table.record(value);
        }
        table
    }
}
