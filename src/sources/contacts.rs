use crate::model::{Entry, EntryOrigin};
use crate::sources::Source;
use anyhow::Result;
use log::{debug, info};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// One stored contact as captured from a business card.
#[allow(dead_code)]
#[derive(Deserialize, Debug, Clone)]
pub struct ContactRecord {
    pub name: String,
    #[serde(default)]
    pub company: String,
    pub title: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Reads a JSON export of contact records (a single array) and yields one
/// entry per record that carries a company name.
pub struct ContactsSource {
    pub path: PathBuf,
}

impl ContactsSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl Source for ContactsSource {
    fn scan(&self) -> Result<Vec<Entry>> {
        if !self.path.exists() {
            debug!("Contacts file {:?} does not exist, skipping", self.path);
            return Ok(vec![]);
        }

        let content = fs::read_to_string(&self.path)?;
        let records: Vec<ContactRecord> = serde_json::from_str(&content)?;

        let mut entries = Vec::new();
        for record in records {
            if record.company.trim().is_empty() {
                debug!("Skipping contact {:?} without a company", record.name);
                continue;
            }
            let mut entry = Entry::new(
                format!("contacts:{}", record.company),
                record.company.clone(),
                EntryOrigin::Contacts,
            );
            entry.contact = Some(record.name);
            entries.push(entry);
        }

        info!("ContactsSource: found {} entries", entries.len());
        Ok(entries)
    }
}
