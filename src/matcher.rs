use crate::model::Entry;

/// Leading consonants of the modern Hangul syllable blocks, in code point order.
const CHOSUNG: [char; 19] = [
    'ㄱ', 'ㄲ', 'ㄴ', 'ㄷ', 'ㄸ', 'ㄹ', 'ㅁ', 'ㅂ', 'ㅃ', 'ㅅ', 'ㅆ', 'ㅇ', 'ㅈ', 'ㅉ', 'ㅊ',
    'ㅋ', 'ㅌ', 'ㅍ', 'ㅎ',
];

const HANGUL_BASE: u32 = 0xAC00;
const HANGUL_SYLLABLES: u32 = 11172;
// 21 medial vowels x 28 (optional) final consonants per leading consonant.
const BLOCKS_PER_CHOSUNG: u32 = 588;

/// Corporate-entity markers stripped during normalization. Removed as whole
/// tokens, not as a character class, so the individual syllables survive in
/// unrelated words.
const CORP_MARKERS: [&str; 3] = ["주식회사", "(주)", "㈜"];

/// Replace every precomposed Hangul syllable with its leading consonant jamo;
/// all other characters pass through unchanged. The output always has the
/// same `char` count as the input.
pub fn decompose_initials(text: &str) -> String {
    text.chars()
        .map(|c| {
            let code = c as u32;
            if (HANGUL_BASE..HANGUL_BASE + HANGUL_SYLLABLES).contains(&code) {
                CHOSUNG[((code - HANGUL_BASE) / BLOCKS_PER_CHOSUNG) as usize]
            } else {
                c
            }
        })
        .collect()
}

/// Canonical comparison form of a company name: lowercased, corporate-entity
/// markers removed, parentheses / periods / commas / whitespace stripped.
///
/// Removing a marker (or a stripped space) can splice a new marker together,
/// so the pass repeats until the string is stable. That makes the result a
/// fixpoint: normalizing a normalized name is a no-op.
pub fn normalize(name: &str) -> String {
    let mut s = normalize_pass(name);
    loop {
        let next = normalize_pass(&s);
        if next == s {
            return s;
        }
        s = next;
    }
}

fn normalize_pass(name: &str) -> String {
    let mut s = name.trim().to_lowercase();
    for marker in CORP_MARKERS {
        s = s.replace(marker, "");
    }
    s.chars()
        .filter(|c| !matches!(c, '(' | ')' | '（' | '）' | '.' | ',') && !c.is_whitespace())
        .collect()
}

/// Filter predicate: should `candidate` appear in the result set for `query`?
///
/// An empty query matches everything. Otherwise the checks run in order and
/// short-circuit: symmetric normalized substring, symmetric initial-consonant
/// substring, case-insensitive raw substring, and word-level overlap between
/// the whitespace-delimited words of both sides.
pub fn matches(candidate: &str, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    let norm_c = normalize(candidate);
    let norm_q = normalize(query);
    if norm_c.contains(&norm_q) || norm_q.contains(&norm_c) {
        return true;
    }

    let init_c = decompose_initials(candidate).to_lowercase();
    let init_q = decompose_initials(query).to_lowercase();
    if init_c.contains(&init_q) || init_q.contains(&init_c) {
        return true;
    }

    let low_c = candidate.to_lowercase();
    let low_q = query.to_lowercase();
    if low_c.contains(&low_q) {
        return true;
    }

    low_c
        .split_whitespace()
        .any(|cw| low_q.split_whitespace().any(|qw| cw.contains(qw) || qw.contains(cw)))
}

/// Relevance score for ranking, first matching tier wins. Scores are only
/// comparable within a single query's result set.
///
/// An empty query scores 0 even though the predicate accepts it; callers that
/// filter with [`matches`] and then sort by score keep original order for
/// ties, so the empty-query listing stays in source order.
pub fn score(candidate: &str, query: &str) -> u32 {
    if query.is_empty() {
        return 0;
    }

    let low_c = candidate.to_lowercase();
    let low_q = query.to_lowercase();
    if low_c == low_q {
        return 100;
    }

    let norm_c = normalize(candidate);
    let norm_q = normalize(query);
    if norm_c == norm_q {
        return 95;
    }
    if low_c.starts_with(&low_q) {
        return 90;
    }
    if norm_c.starts_with(&norm_q) {
        return 85;
    }
    if low_c.contains(&low_q) {
        return 80;
    }
    if norm_c.contains(&norm_q) {
        return 75;
    }

    let init_c = decompose_initials(candidate).to_lowercase();
    let init_q = decompose_initials(query).to_lowercase();
    if init_c.contains(&init_q) {
        return 60;
    }

    let word_hit = low_c
        .split_whitespace()
        .any(|cw| low_q.split_whitespace().any(|qw| cw.contains(qw)));
    if word_hit {
        return 50;
    }

    0
}

pub struct CompanyMatcher;

impl Default for CompanyMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl CompanyMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Stamp `matched` and `score` onto every entry in place. The caller
    /// filters on `matched` and sorts on `score`.
    pub fn match_entries(&self, query: &str, entries: &mut [Entry]) {
        for entry in entries.iter_mut() {
            entry.matched = matches(&entry.company, query);
            entry.score = score(&entry.company, query);
        }
    }
}
