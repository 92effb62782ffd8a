use regex::Regex;
use std::ops::Range;

const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?'];

/// Locates URLs in free text.
#[derive(Debug, Clone)]
pub struct UrlFinder {
    pattern: Regex,
}

impl Default for UrlFinder {
    fn default() -> Self {
        Self::new()
    }
}

impl UrlFinder {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(r#"(?i)\bhttps?://[^\s<>"']+"#).expect("valid URL pattern"),
        }
    }

    /// Byte ranges of every standalone URL in `text`, in order of appearance.
    ///
    /// URLs used as HTML attribute values (`href="..."`, `src=...`) are not standalone.
    pub fn spans(&self, text: &str) -> Vec<Range<usize>> {
        self.pattern
            .find_iter(text)
            .filter(|m| !is_attribute_value(&text[..m.start()]))
            .filter_map(|m| {
                let end = m.start() + trimmed_len(m.as_str());
                (end > m.start()).then_some(m.start()..end)
            })
            .collect()
    }
}

fn is_attribute_value(before: &str) -> bool {
    let before = before.trim_end_matches(['"', '\'']);
    before.ends_with('=')
}

fn trimmed_len(url: &str) -> usize {
    let mut url = url;
    loop {
        let Some(last) = url.chars().last() else {
            break;
        };
        let unbalanced = match last {
            ')' => url.matches('(').count() < url.matches(')').count(),
            ']' => url.matches('[').count() < url.matches(']').count(),
            c => TRAILING_PUNCTUATION.contains(&c),
        };
        if !unbalanced {
            break;
        }
        url = &url[..url.len() - last.len_utf8()];
    }
    url.len()
}

/// Discovers the URLs worth embedding in a piece of text.
#[derive(Debug, Clone, Default)]
pub struct Crawler {
    finder: UrlFinder,
}

impl Crawler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finder(&self) -> &UrlFinder {
        &self.finder
    }

    /// Unique URLs of `text` in first-seen order.
    pub fn crawl(&self, text: &str) -> Vec<String> {
        let mut urls: Vec<String> = Vec::new();
        for span in self.finder.spans(text) {
            let url = &text[span];
            if !urls.iter().any(|u| u == url) {
                urls.push(url.to_string());
            }
        }
        urls
    }
}
