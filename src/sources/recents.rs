use crate::config::project_dirs;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// How often each company entry was picked, keyed by entry ID. Used to order
/// the empty-query listing; never mixed into match scores.
#[derive(Serialize, Deserialize, Default)]
pub struct Recents {
    pub pick_counts: HashMap<String, u32>,
}

impl Recents {
    pub fn count(&self, id: &str) -> u32 {
        self.pick_counts.get(id).copied().unwrap_or(0)
    }

    pub fn record(&mut self, id: &str) {
        *self.pick_counts.entry(id.to_string()).or_insert(0) += 1;
    }

    /// Keep only the `max` most-picked entries.
    pub fn truncate(&mut self, max: usize) {
        if self.pick_counts.len() <= max {
            return;
        }
        let mut counts: Vec<(String, u32)> = self.pick_counts.drain().collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        counts.truncate(max);
        self.pick_counts = counts.into_iter().collect();
    }
}

pub fn get_recents_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| {
        let data_dir = dirs.data_dir();
        let _ = fs::create_dir_all(data_dir);
        data_dir.join("recents.json")
    })
}

pub fn load_recents() -> Recents {
    if let Some(path) = get_recents_path() {
        if let Ok(content) = fs::read_to_string(path) {
            if let Ok(recents) = serde_json::from_str(&content) {
                return recents;
            }
        }
    }
    Recents::default()
}

pub fn save_recents(recents: &Recents) -> Result<()> {
    if let Some(path) = get_recents_path() {
        let content = serde_json::to_string_pretty(recents)?;
        fs::write(path, content)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_accumulates_counts() {
        let mut recents = Recents::default();
        recents.record("contacts:삼성전자");
        recents.record("contacts:삼성전자");
        recents.record("contacts:네이버");
        assert_eq!(recents.count("contacts:삼성전자"), 2);
        assert_eq!(recents.count("contacts:네이버"), 1);
        assert_eq!(recents.count("unknown"), 0);
    }

    #[test]
    fn truncate_keeps_the_most_picked() {
        let mut recents = Recents::default();
        for (id, n) in [("a", 5), ("b", 3), ("c", 1), ("d", 4)] {
            for _ in 0..n {
                recents.record(id);
            }
        }
        recents.truncate(2);
        assert_eq!(recents.pick_counts.len(), 2);
        assert_eq!(recents.count("a"), 5);
        assert_eq!(recents.count("d"), 4);
        assert_eq!(recents.count("b"), 0);
    }

    #[test]
    fn roundtrips_through_json() {
        let mut recents = Recents::default();
        recents.record("contacts:카카오");
        let json = serde_json::to_string(&recents).unwrap();
        let back: Recents = serde_json::from_str(&json).unwrap();
        assert_eq!(back.count("contacts:카카오"), 1);
    }
}
