// crates/worldmap-core/src/text.rs

/// Convert a string into a folded key suitable for comparison.
///
/// This performs:
/// 1\) Transliterate Unicode → ASCII (e.g. `Curaçao` -> `Curacao`)
/// 2\) Normalize to lowercase
///
/// Only apply this to Latin-script text; CJK input would be transliterated
/// into pinyin-like syllables that then match unrelated English names.
///
/// ```rust
/// use worldmap_core::text::fold_key;
///
/// assert_eq!(fold_key("Curaçao"), "curacao");
/// assert_eq!(fold_key("FRANCE"), "france");
/// ```
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s).to_lowercase()
}

/// `true` when every character belongs to a Latin block (ASCII, Latin-1,
/// Latin Extended-A/B) or is a combining diacritic.
pub fn is_latin(s: &str) -> bool {
    s.chars().all(|c| {
        c.is_ascii()
            || ('\u{00C0}'..='\u{024F}').contains(&c)
            || ('\u{0300}'..='\u{036F}').contains(&c)
    })
}

/// A search string prepared once and matched against many names.
#[derive(Debug, Clone)]
pub struct Query {
    raw: String,
    english_key: String,
}

impl Query {
    pub fn new(raw: &str) -> Self {
        let raw = raw.trim().to_string();
        let english_key = if is_latin(&raw) {
            fold_key(&raw)
        } else {
            raw.to_lowercase()
        };
        Self { raw, english_key }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Case-insensitive substring test against an English name. Accents are
    /// ignored when the query itself is Latin-script.
    pub fn matches_english(&self, english: &str) -> bool {
        if self.english_key.is_empty() {
            return false;
        }
        if is_latin(&self.raw) {
            fold_key(english).contains(&self.english_key)
        } else {
            english.to_lowercase().contains(&self.english_key)
        }
    }

    /// Exact, case-sensitive substring test against a localized name.
    pub fn matches_localized(&self, localized: &str) -> bool {
        !self.raw.is_empty() && localized.contains(self.raw.as_str())
    }
}

/// Name-based matching for anything that carries a bilingual label.
pub trait BilingualName {
    /// The canonical English name, the join key across all tables.
    fn english_name(&self) -> &str;

    /// The localized name, if one is known.
    fn localized_name(&self) -> Option<&str>;

    /// `"<localized> (<English>)"`, or just the English name.
    fn bilingual_label(&self) -> String {
        bilingual(self.english_name(), self.localized_name())
    }

    #[inline]
    fn matches_query(&self, q: &Query) -> bool {
        q.matches_english(self.english_name())
            || self.localized_name().is_some_and(|l| q.matches_localized(l))
    }
}

/// Formats the label shown in tooltips, the status line and the search input.
pub fn bilingual(english: &str, localized: Option<&str>) -> String {
    match localized {
        Some(l) if !l.is_empty() => format!("{l} ({english})"),
        _ => english.to_string(),
    }
}
