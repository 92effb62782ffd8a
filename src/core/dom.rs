use crate::core::{EssenceError, Result};
use regex::Regex;
use scraper::{Html, Selector};
use std::collections::HashMap;

/// Requires an attribute on a matched element, optionally constraining its value.
#[derive(Debug, Clone)]
pub struct AttributeFilter {
    pub name: String,
    pub pattern: Option<Regex>,
}

impl AttributeFilter {
    pub fn present(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: None,
        }
    }

    pub fn matching(name: impl Into<String>, pattern: Regex) -> Self {
        Self {
            name: name.into(),
            pattern: Some(pattern),
        }
    }

    fn accepts(&self, value: &str) -> bool {
        self.pattern.as_ref().map_or(true, |p| p.is_match(value))
    }
}

/// Which tags to look for, and which attributes each of them must carry.
#[derive(Debug, Clone, Default)]
pub struct SelectorSpec {
    tags: Vec<(String, Vec<AttributeFilter>)>,
}

impl SelectorSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tag(mut self, name: impl Into<String>, filters: Vec<AttributeFilter>) -> Self {
        self.tags.push((name.into(), filters));
        self
    }
}

/// A matched element with the attributes its filters asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attributes: HashMap<String, String>,
}

/// Pulls attribute maps out of structured documents.
pub trait DomParser: Send + Sync {
    /// Returns matches grouped by the order of tags in `spec`, each group in document order.
    fn extract_attributes(&self, document: &str, spec: &SelectorSpec) -> Result<Vec<Element>>;
}

/// HTML parser backed by `scraper`.
#[derive(Debug, Clone, Default)]
pub struct HtmlParser;

impl HtmlParser {
    pub fn new() -> Self {
        Self
    }
}

impl DomParser for HtmlParser {
    fn extract_attributes(&self, document: &str, spec: &SelectorSpec) -> Result<Vec<Element>> {
        let html = Html::parse_document(document);
        let mut elements = Vec::new();

        for (tag, filters) in &spec.tags {
            let selector = Selector::parse(tag).map_err(|e| EssenceError::InvalidSelector {
                selector: tag.clone(),
                reason: format!("{:?}", e),
            })?;

            'matches: for node in html.select(&selector) {
                let mut attributes = HashMap::with_capacity(filters.len());

                for filter in filters {
                    match node.value().attr(&filter.name) {
                        Some(value) if filter.accepts(value) => {
                            attributes.insert(filter.name.clone(), value.to_string());
                        }
                        _ => continue 'matches,
                    }
                }

                elements.push(Element {
                    tag: tag.clone(),
                    attributes,
                });
            }
        }

        Ok(elements)
    }
}
