use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use std::fmt;

/// Number of distinct count levels kept in a snapshot.
pub const DEFAULT_MAX_LEVELS: usize = 100;

/// A distinct query count and every name that was queried exactly that often.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyLevel {
    pub count: u64,
    /// Sorted ascending.
    pub names: Vec<String>,
}

impl FrequencyLevel {
    /// Groups `counts` by identical value and returns the `max_levels` highest
    /// levels, highest first.
    ///
    /// Truncation is by level, not by name: a level shared by thousands of
    /// names still occupies a single slot, and every name on a retained level
    /// is kept.
    pub fn rank(counts: &FxHashMap<String, u64>, max_levels: usize) -> Vec<FrequencyLevel> {
        let mut by_count: BTreeMap<u64, Vec<String>> = BTreeMap::new();
        for (name, &count) in counts {
            by_count.entry(count).or_default().push(name.clone());
        }

        by_count
            .into_iter()
            .rev()
            .take(max_levels)
            .map(|(count, mut names)| {
                names.sort_unstable();
                FrequencyLevel { count, names }
            })
            .collect()
    }

    /// Renders levels as newline-terminated artifact lines.
    pub fn render(levels: &[FrequencyLevel]) -> String {
        let mut out = String::new();
        for level in levels {
            out.push_str(&level.to_string());
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for FrequencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Count: {} Name(s): [{}].",
            self.count,
            self.names.join(" ")
        )
    }
}
