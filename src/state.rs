use crate::config::Config;
use crate::matcher::{self, CompanyMatcher};
use crate::model::Entry;
use crate::sources::recents::{self, Recents};
use regex::Regex;
use std::collections::HashMap;

pub struct PickerState {
    pub config: Config,
    pub entries: Vec<Entry>,
    pub filtered_indices: Vec<usize>,
    pub query: String,
    pub matcher: CompanyMatcher,
    pub active_book: String,
    pub recents: Recents,
}

impl PickerState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            entries: Vec::new(),
            filtered_indices: Vec::new(),
            query: String::new(),
            matcher: CompanyMatcher::new(),
            active_book: "default".to_string(),
            recents: recents::load_recents(),
        }
    }

    /// Install the scanned entries, folding duplicate companies together.
    /// Two entries are the same company when their normalized names agree;
    /// the first occurrence wins and keeps the count of folded contacts.
    pub fn set_entries(&mut self, entries: Vec<Entry>) {
        let mut seen: HashMap<String, usize> = HashMap::new();
        let mut deduped: Vec<Entry> = Vec::with_capacity(entries.len());

        for entry in entries {
            let key = matcher::normalize(&entry.company);
            match seen.get(&key) {
                Some(&idx) => deduped[idx].contact_count += entry.contact_count,
                None => {
                    seen.insert(key, deduped.len());
                    deduped.push(entry);
                }
            }
        }

        self.entries = deduped;
        self.update_filter();
    }

    pub fn update_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.update_filter();
    }

    pub fn update_filter(&mut self) {
        if self.query.is_empty() {
            // Everything matches an empty query but scores 0, so order the
            // full listing by pick count instead.
            let mut indices: Vec<usize> = (0..self.entries.len()).collect();
            indices.sort_by(|&a, &b| {
                let a_entry = &self.entries[a];
                let b_entry = &self.entries[b];
                let a_count = self.recents.count(&a_entry.id);
                let b_count = self.recents.count(&b_entry.id);
                b_count.cmp(&a_count).then_with(|| a_entry.company.cmp(&b_entry.company))
            });
            self.filtered_indices = indices;
        } else {
            self.matcher.match_entries(&self.query, &mut self.entries);

            let mut indices: Vec<usize> = self
                .entries
                .iter()
                .enumerate()
                .filter(|(_, e)| e.matched)
                .map(|(i, _)| i)
                .collect();

            // Stable sort: equal scores keep their source order.
            indices.sort_by_key(|&i| std::cmp::Reverse(self.entries[i].score));

            self.filtered_indices = indices;
        }

        self.apply_book_filters();

        log::info!(
            "PickerState: query='{}', filtered_count={}",
            self.query,
            self.filtered_indices.len()
        );
    }

    /// Apply the active book's whitelist/blacklist to the visible entries.
    fn apply_book_filters(&mut self) {
        let Some(book) = self.config.books.get(&self.active_book) else {
            return;
        };

        let blacklist: Vec<Regex> = book
            .blacklist
            .as_ref()
            .map(|bl| bl.iter().filter_map(|s| Regex::new(s).ok()).collect())
            .unwrap_or_default();

        let entries = &self.entries;
        self.filtered_indices.retain(|&idx| {
            let e = &entries[idx];

            if let Some(whitelist) = &book.whitelist {
                if !whitelist.iter().any(|w| e.company.contains(w) || e.id.contains(w)) {
                    return false;
                }
            }

            !blacklist.iter().any(|re| re.is_match(&e.company) || re.is_match(&e.id))
        });
    }

    pub fn results(&self) -> impl Iterator<Item = &Entry> {
        self.filtered_indices.iter().map(|&idx| &self.entries[idx])
    }

    /// Resolve the n-th visible entry (1-based, as displayed) and record the
    /// pick. The caller persists the recents afterwards.
    pub fn pick(&mut self, display_index: usize) -> Option<&Entry> {
        let idx = *self.filtered_indices.get(display_index.checked_sub(1)?)?;

        self.recents.record(&self.entries[idx].id);
        self.recents.truncate(self.config.general.recents_size);

        Some(&self.entries[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Book;
    use crate::model::EntryOrigin;

    fn entry(id: &str, company: &str) -> Entry {
        Entry::new(id, company, EntryOrigin::Contacts)
    }

    fn state_with(entries: Vec<Entry>) -> PickerState {
        let mut state = PickerState::new(Config::default());
        state.recents = Recents::default();
        state.set_entries(entries);
        state
    }

    fn visible<'a>(state: &'a PickerState) -> Vec<&'a str> {
        state.results().map(|e| e.company.as_str()).collect()
    }

    #[test]
    fn duplicate_companies_are_folded() {
        let state = state_with(vec![
            entry("1", "삼성전자"),
            entry("2", "삼성전자"),
            entry("3", "주식회사 네이버"),
            entry("4", "네이버"),
        ]);

        assert_eq!(state.entries.len(), 2);
        assert_eq!(state.entries[0].contact_count, 2);
        // Normalized dedupe keeps the first spelling.
        assert_eq!(state.entries[1].company, "주식회사 네이버");
    }

    #[test]
    fn query_filters_and_ranks_by_score() {
        let mut state = state_with(vec![
            entry("1", "네이버"),
            entry("2", "삼성전자"),
            entry("3", "삼성SDS"),
        ]);
        state.update_query("삼성");

        // Both matches score 90 (raw prefix); the tie keeps source order.
        assert_eq!(visible(&state), vec!["삼성전자", "삼성SDS"]);
    }

    #[test]
    fn higher_tiers_rank_first() {
        let mut state = state_with(vec![
            entry("1", "데이터카카오랩"),
            entry("2", "(주)카카오모빌리티"),
            entry("3", "카카오"),
        ]);
        state.update_query("카카오");

        // 100 (exact), 85 (normalized prefix), 80 (raw substring).
        assert_eq!(visible(&state), vec!["카카오", "(주)카카오모빌리티", "데이터카카오랩"]);
    }

    #[test]
    fn empty_query_lists_everything_by_pick_count() {
        let mut state = state_with(vec![
            entry("1", "네이버"),
            entry("2", "삼성전자"),
            entry("3", "카카오"),
        ]);
        state.recents.record("3");
        state.recents.record("3");
        state.recents.record("2");
        state.update_query("");

        assert_eq!(visible(&state), vec!["카카오", "삼성전자", "네이버"]);
    }

    #[test]
    fn initial_consonant_query_reaches_the_picker() {
        let mut state = state_with(vec![entry("1", "네이버"), entry("2", "삼성전자")]);
        state.update_query("ㅅㅅ");

        assert_eq!(visible(&state), vec!["삼성전자"]);
    }

    #[test]
    fn book_blacklist_removes_matches() {
        let mut state = state_with(vec![entry("1", "삼성전자"), entry("2", "삼성SDS")]);
        state.config.books.insert(
            "default".to_string(),
            Book {
                blacklist: Some(vec!["SDS$".to_string()]),
                ..Book::default()
            },
        );
        state.update_query("삼성");

        assert_eq!(visible(&state), vec!["삼성전자"]);
    }

    #[test]
    fn book_whitelist_keeps_only_listed() {
        let mut state = state_with(vec![entry("1", "삼성전자"), entry("2", "삼성SDS")]);
        state.config.books.insert(
            "default".to_string(),
            Book {
                whitelist: Some(vec!["SDS".to_string()]),
                ..Book::default()
            },
        );
        state.update_query("삼성");

        assert_eq!(visible(&state), vec!["삼성SDS"]);
    }

    #[test]
    fn pick_records_the_visible_entry() {
        let mut state = state_with(vec![entry("1", "네이버"), entry("2", "삼성전자")]);
        state.update_query("삼성");

        let picked = state.pick(1).map(|e| e.id.clone());
        assert_eq!(picked.as_deref(), Some("2"));
        assert_eq!(state.recents.count("2"), 1);

        assert!(state.pick(5).is_none());
        assert!(state.pick(0).is_none());
    }
}
