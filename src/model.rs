#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryOrigin {
    Contacts,
    Cards,
    Static,
}

/// One company candidate in the picker. Built from a stored contact record;
/// duplicates from multiple contacts at the same company are folded together
/// by the picker state before matching.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct Entry {
    pub id: String,              // Stable ID (file path or "static:<name>")
    pub company: String,         // Company name as captured from the card
    pub contact: Option<String>, // Primary contact person at this company
    pub contact_count: u32,      // Contacts folded into this entry
    pub score: u32,              // Relevance score for the current query
    pub matched: bool,           // Predicate result for the current query
    pub origin: EntryOrigin,
}

impl Entry {
    pub fn new(id: impl Into<String>, company: impl Into<String>, origin: EntryOrigin) -> Self {
        Self {
            id: id.into(),
            company: company.into(),
            contact: None,
            contact_count: 1,
            score: 0,
            matched: false,
            origin,
        }
    }
}
