use crate::core::Media;
use crate::crawler::UrlFinder;
use std::collections::HashMap;

/// Rewrites the URLs of a text using the Media extracted for them.
#[derive(Debug, Clone, Default)]
pub struct Replacer {
    finder: UrlFinder,
}

impl Replacer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_finder(finder: UrlFinder) -> Self {
        Self { finder }
    }

    /// Replaces every occurrence of a URL present in `medias` with `template(media)`.
    ///
    /// URLs without an entry, and all surrounding text, are left untouched.
    pub fn replace<F>(&self, text: &str, medias: &HashMap<String, Media>, template: F) -> String
    where
        F: Fn(&Media) -> String,
    {
        let mut replaced = String::with_capacity(text.len());
        let mut last = 0;

        for span in self.finder.spans(text) {
            let Some(media) = medias.get(&text[span.clone()]) else {
                continue;
            };
            replaced.push_str(&text[last..span.start]);
            replaced.push_str(&template(media));
            last = span.end;
        }

        replaced.push_str(&text[last..]);
        replaced
    }

    /// Template used when callers do not supply one: the Media's HTML, else its URL.
    pub fn default_template(media: &Media) -> String {
        media
            .html()
            .or_else(|| media.url())
            .unwrap_or_default()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Attributes;

    fn media(url: &str) -> Media {
        Media::from_attributes_for(&Attributes::new(), url)
    }

    #[test]
    fn test_replace_known_urls_only() {
        let mut medias = HashMap::new();
        medias.insert("http://x".to_string(), media("http://x"));

        let replaced = Replacer::new().replace(
            "see http://x and http://y, or http://x.",
            &medias,
            |_| "[embed]".to_string(),
        );

        assert_eq!(replaced, "see [embed] and http://y, or [embed].");
    }

    #[test]
    fn test_replace_without_urls_is_identity() {
        let replaced = Replacer::new().replace("plain text", &HashMap::new(), |_| "!".to_string());
        assert_eq!(replaced, "plain text");
    }

    #[test]
    fn test_default_template() {
        let with_html: Attributes = vec![("html", "<b>x</b>")].into_iter().collect();

        assert_eq!(
            Replacer::default_template(&Media::from_attributes_for(&with_html, "http://x")),
            "<b>x</b>"
        );
        assert_eq!(Replacer::default_template(&media("http://x")), "http://x");
    }
}
