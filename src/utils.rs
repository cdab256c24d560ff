// src/utils.rs

//! Utility helpers shared by dataset assembly, aggregation and the CLI

pub mod time;

pub use time::Time;

/// Timing utilities
pub mod timing {
    use std::time::{Duration, Instant};

    /// Stopwatch for timing the steps of a dataset build
    #[derive(Debug, Clone)]
    pub struct Stopwatch {
        start_time: Instant,
        laps: Vec<(&'static str, Instant)>,
    }

    impl Stopwatch {
        /// Create and start a new stopwatch
        pub fn start() -> Self {
            Self {
                start_time: Instant::now(),
                laps: Vec::new(),
            }
        }

        /// Record a named lap and return the time since the previous one
        pub fn lap(&mut self, name: &'static str) -> Duration {
            let now = Instant::now();
            let previous = self.laps.last().map_or(self.start_time, |(_, t)| *t);
            self.laps.push((name, now));
            now.duration_since(previous)
        }

        /// Get elapsed time since start
        pub fn elapsed(&self) -> Duration {
            self.start_time.elapsed()
        }

        /// Duration of each lap, in recording order
        pub fn lap_times(&self) -> Vec<(&'static str, Duration)> {
            let mut previous = self.start_time;
            self.laps
                .iter()
                .map(|(name, time)| {
                    let span = time.duration_since(previous);
                    previous = *time;
                    (*name, span)
                })
                .collect()
        }
    }

    /// Convert duration to human-readable string
    pub fn duration_to_human(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;
        let millis = duration.subsec_millis();

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else if seconds > 0 {
            format!("{}.{:03}s", seconds, millis)
        } else if millis > 0 {
            format!("{}ms", millis)
        } else {
            format!("{}µs", duration.subsec_micros())
        }
    }
}

/// Collection utilities
pub mod collections {
    use std::collections::{BTreeMap, HashSet};
    use std::hash::Hash;

    /// Group borrowed items by a key function; groups come back in key order
    pub fn group_by<'a, T, K, F>(items: &'a [T], key_fn: F) -> BTreeMap<K, Vec<&'a T>>
    where
        K: Ord,
        F: Fn(&T) -> K,
    {
        let mut groups = BTreeMap::new();
        for item in items {
            groups.entry(key_fn(item)).or_insert_with(Vec::new).push(item);
        }
        groups
    }

    /// Keys that occur more than once, each reported once in first-repeat order
    pub fn find_duplicates<'a, T, K, F>(items: &'a [T], key_fn: F) -> Vec<K>
    where
        K: Hash + Eq + Clone + 'a,
        F: Fn(&'a T) -> K,
    {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        let mut duplicates = Vec::new();

        for item in items {
            let key = key_fn(item);
            if !seen.insert(key.clone()) && reported.insert(key.clone()) {
                duplicates.push(key);
            }
        }

        duplicates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_stopwatch_laps() {
        let mut stopwatch = timing::Stopwatch::start();
        stopwatch.lap("first");
        stopwatch.lap("second");

        let laps = stopwatch.lap_times();
        assert_eq!(laps.len(), 2);
        assert_eq!(laps[0].0, "first");
        assert_eq!(laps[1].0, "second");
        let total: Duration = laps.iter().map(|(_, d)| *d).sum();
        assert!(total <= stopwatch.elapsed());
    }

    #[test]
    fn test_duration_to_human() {
        assert_eq!(timing::duration_to_human(Duration::from_micros(250)), "250µs");
        assert_eq!(timing::duration_to_human(Duration::from_millis(500)), "500ms");
        assert_eq!(timing::duration_to_human(Duration::from_secs(1)), "1.000s");
        assert_eq!(timing::duration_to_human(Duration::from_secs(61)), "1m 1s");
        assert_eq!(timing::duration_to_human(Duration::from_secs(3661)), "1h 1m 1s");
    }

    #[test]
    fn test_collections() {
        let items = ["apple", "banana", "apricot", "berry", "cherry"];
        let groups = collections::group_by(&items, |item| item.chars().next().unwrap());

        assert_eq!(groups[&'a'].len(), 2);
        assert_eq!(groups[&'b'].len(), 2);
        assert_eq!(groups.keys().copied().collect::<Vec<_>>(), vec!['a', 'b', 'c']);

        let keys = ["A", "B", "A", "C", "B", "A"];
        assert_eq!(collections::find_duplicates(&keys, |k| *k), vec!["A", "B"]);
        assert!(collections::find_duplicates(&items, |k| *k).is_empty());
    }
}
