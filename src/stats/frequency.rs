//! Frequency Table Module
//! Value counts over a categorical column.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrequencyEntry {
    pub value: String,
    pub count: usize,
}

/// Distinct values of a column with their occurrence counts, most frequent first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrequencyTable {
    pub column: String,
    pub entries: Vec<FrequencyEntry>,
}

impl FrequencyTable {
    /// Count non-null values. Ties keep first-seen order.
    pub fn from_values<'a, I>(column: &str, values: I) -> Self
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let mut index: HashMap<&'a str, usize> = HashMap::new();
        let mut entries: Vec<FrequencyEntry> = Vec::new();

        for value in values.into_iter().flatten() {
            match index.get(value) {
                Some(&pos) => entries[pos].count += 1,
                None => {
                    index.insert(value, entries.len());
                    entries.push(FrequencyEntry {
                        value: value.to_string(),
                        count: 1,
                    });
                }
            }
        }

        // Stable sort: equal counts stay in first-seen order
        entries.sort_by(|a, b| b.count.cmp(&a.count));

        Self {
            column: column.to_string(),
            entries,
        }
    }

    /// Keep only the `n` most frequent values.
    pub fn top(mut self, n: usize) -> Self {
        self.entries.truncate(n);
        self
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, value: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|e| e.value == value)
            .map(|e| e.count)
    }
}

impl fmt::Display for FrequencyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value_width = self
            .entries
            .iter()
            .map(|e| e.value.chars().count())
            .max()
            .unwrap_or(0)
            .max(self.column.chars().count());
        let count_width = self
            .entries
            .iter()
            .map(|e| e.count.to_string().len())
            .max()
            .unwrap_or(1);

        writeln!(f, "{}", self.column)?;
        for entry in &self.entries {
            writeln!(
                f,
                "{:<vw$}    {:>cw$}",
                entry.value,
                entry.count,
                vw = value_width,
                cw = count_width
            )?;
        }
        write!(f, "Name: count, Length: {}", self.entries.len())
    }
}
