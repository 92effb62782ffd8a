/// Insertion-ordered string map where the first value stored under a key is kept.
///
/// Providers collect raw, source-specific keys (`og:title`, `thumbnail_url`, ...) here before
/// they are renamed into the canonical [`Media`](crate::core::Media) attribute set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, String)>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Stores `value` unless `key` is already present. Returns whether it was stored.
    pub fn insert_if_absent(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        let key = key.into();
        if self.contains_key(&key) {
            return false;
        }
        self.entries.push((key, value.into()));
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attributes = Attributes::new();
        for (key, value) in iter {
            attributes.insert_if_absent(key, value);
        }
        attributes
    }
}

/// Renames the keys of `source` through `renames`, dropping every key the table does not know.
///
/// When several source keys share a canonical name, the one met first while iterating
/// `source` wins.
pub fn reindex(source: &Attributes, renames: &[(&str, &str)]) -> Attributes {
    let mut normalized = Attributes::new();

    for (key, value) in source.iter() {
        if let Some((_, canonical)) = renames.iter().find(|(from, _)| *from == key) {
            normalized.insert_if_absent(*canonical, value);
        }
    }

    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    const RENAMES: &[(&str, &str)] = &[
        ("og:image", "thumbnailUrl"),
        ("og:image:url", "thumbnailUrl"),
        ("og:title", "title"),
    ];

    #[test]
    fn test_first_value_per_key_is_kept() {
        let mut attributes = Attributes::new();
        assert!(attributes.insert_if_absent("og:title", "first"));
        assert!(!attributes.insert_if_absent("og:title", "second"));

        assert_eq!(attributes.get("og:title"), Some("first"));
        assert_eq!(attributes.len(), 1);
    }

    #[test]
    fn test_reindex_drops_unknown_keys() {
        let source: Attributes = vec![("og:title", "Title"), ("og:locale", "en_US")]
            .into_iter()
            .collect();

        let normalized = reindex(&source, RENAMES);

        assert_eq!(normalized.get("title"), Some("Title"));
        assert_eq!(normalized.len(), 1);
        assert!(!normalized.contains_key("og:locale"));
    }

    #[test]
    fn test_reindex_first_synonym_wins() {
        let image_first: Attributes = vec![("og:image", "a.png"), ("og:image:url", "b.png")]
            .into_iter()
            .collect();
        let url_first: Attributes = vec![("og:image:url", "b.png"), ("og:image", "a.png")]
            .into_iter()
            .collect();

        assert_eq!(reindex(&image_first, RENAMES).get("thumbnailUrl"), Some("a.png"));
        assert_eq!(reindex(&url_first, RENAMES).get("thumbnailUrl"), Some("b.png"));
    }

    #[test]
    fn test_reindex_preserves_source_order() {
        let source: Attributes = vec![("og:title", "T"), ("og:image", "i.png")]
            .into_iter()
            .collect();

        let normalized = reindex(&source, RENAMES);
        let keys: Vec<&str> = normalized.keys().collect();
        assert_eq!(keys, vec!["title", "thumbnailUrl"]);
    }
}
