/// A row that can be matched against free text by one or more keys.
pub trait Keyed {
    fn keys(&self) -> Vec<&str>;
}

#[derive(Debug, Clone)]
struct Entry<R> {
    keys: Vec<String>,
    row: R,
}

/// A read-only reference table. Keys are lower-cased once at construction;
/// blank keys are dropped so they never match.
#[derive(Debug, Clone)]
pub struct Table<R> {
    name: &'static str,
    entries: Vec<Entry<R>>,
}

impl<R: Keyed> Table<R> {
    pub fn new(name: &'static str, rows: Vec<R>) -> Self {
        let entries = rows
            .into_iter()
            .map(|row| {
                let keys = row
                    .keys()
                    .into_iter()
                    .map(|k| k.trim().to_lowercase())
                    .filter(|k| !k.is_empty())
                    .collect();
                Entry { keys, row }
            })
            .collect();
        Self { name, entries }
    }

    pub fn empty(name: &'static str) -> Self {
        Self {
            name,
            entries: Vec::new(),
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First row, in file order, with a key occurring inside `text`.
    pub fn find_in(&self, text: &str) -> Option<&R> {
        let haystack = text.to_lowercase();
        if haystack.trim().is_empty() {
            return None;
        }
        self.entries
            .iter()
            .find(|e| e.keys.iter().any(|k| haystack.contains(k.as_str())))
            .map(|e| &e.row)
    }

    pub fn mentioned_in(&self, text: &str) -> bool {
        self.find_in(text).is_some()
    }

    /// Case-insensitive whole-value match.
    pub fn contains(&self, value: &str) -> bool {
        let needle = value.trim().to_lowercase();
        !needle.is_empty()
            && self
                .entries
                .iter()
                .any(|e| e.keys.iter().any(|k| *k == needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row(&'static str, &'static str);

    impl Keyed for Row {
        fn keys(&self) -> Vec<&str> {
            vec![self.0, self.1]
        }
    }

    #[test]
    fn substring_match_is_case_insensitive_and_ordered() {
        let table = Table::new("rows", vec![Row("MIT", ""), Row("Stanford", "Stanford University")]);
        assert_eq!(
            table.find_in("PhD, stanford university"),
            Some(&Row("Stanford", "Stanford University"))
        );
        assert!(table.mentioned_in("BSc at mit"));
        assert!(!table.mentioned_in("Community College"));
    }

    #[test]
    fn blank_keys_never_match() {
        let table = Table::new("rows", vec![Row("  ", "")]);
        assert_eq!(table.len(), 1);
        assert!(!table.mentioned_in("anything at all"));
        assert!(!table.contains(""));
    }

    #[test]
    fn blank_text_never_matches() {
        let table = Table::new("rows", vec![Row("a", "")]);
        assert!(table.find_in("   ").is_none());
    }

    #[test]
    fn contains_requires_whole_value() {
        let table = Table::new("rows", vec![Row("Google", "")]);
        assert!(table.contains(" google "));
        assert!(!table.contains("Google Cloud"));
    }

    #[test]
    fn empty_table_behaves_like_no_match() {
        let table: Table<Row> = Table::empty("rows");
        assert_eq!(table.name(), "rows");
        assert!(table.is_empty());
        assert!(table.find_in("Stanford").is_none());
        assert!(!table.contains("Stanford"));
    }
}
