use crate::model::{Entry, EntryOrigin};
use crate::sources::Source;
use crate::sources::contacts::ContactRecord;
use anyhow::Result;
use log::{debug, info, warn};
use std::fs;
use std::path::PathBuf;
use walkdir::WalkDir;

/// Walks a directory of captured cards, one JSON contact record per file.
pub struct CardsSource {
    pub dir: PathBuf,
}

impl CardsSource {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }
}

impl Source for CardsSource {
    fn scan(&self) -> Result<Vec<Entry>> {
        if !self.dir.exists() {
            debug!("Cards directory {:?} does not exist, skipping", self.dir);
            return Ok(vec![]);
        }

        let mut entries = Vec::new();
        for file in WalkDir::new(&self.dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let path = file.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            let content = match fs::read_to_string(path) {
                Ok(content) => content,
                Err(err) => {
                    warn!("Skipping unreadable card {:?}: {}", path, err);
                    continue;
                }
            };
            let record: ContactRecord = match serde_json::from_str(&content) {
                Ok(record) => record,
                Err(err) => {
                    warn!("Skipping malformed card {:?}: {}", path, err);
                    continue;
                }
            };
            if record.company.trim().is_empty() {
                continue;
            }
            let mut entry = Entry::new(
                path.to_string_lossy().to_string(),
                record.company.clone(),
                EntryOrigin::Cards,
            );
            entry.contact = Some(record.name);
            entries.push(entry);
        }

        // Directory walk order is platform-dependent; keep the listing stable.
        entries.sort_by(|a, b| a.id.cmp(&b.id));

        info!("CardsSource: found {} entries", entries.len());
        Ok(entries)
    }
}
