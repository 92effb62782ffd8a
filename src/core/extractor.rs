use crate::core::{EssenceError, Media, Options, Result};
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use regex::Regex;
use tracing::{debug, warn};
use url::Url;

/// Extracts [`Media`] from one class of URLs.
#[async_trait]
pub trait Provider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Whether this provider claims `url`. Must not touch the network.
    fn suitable(&self, url: &Url) -> bool;

    /// Options applied when a call leaves them unset.
    fn default_options(&self) -> Options {
        Options::default()
    }

    async fn embed(&self, url: &Url, options: &Options) -> Result<Media>;
}

/// A provider together with how it is matched and the defaults it runs with.
pub struct Registration {
    provider: Box<dyn Provider>,
    pattern: Option<Regex>,
    defaults: Options,
}

impl Registration {
    pub fn new(provider: Box<dyn Provider>) -> Self {
        let defaults = provider.default_options();
        Self {
            provider,
            pattern: None,
            defaults,
        }
    }

    /// Matches URLs against `pattern` instead of the provider's own predicate.
    pub fn with_pattern(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub fn with_defaults(mut self, defaults: Options) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn name(&self) -> &'static str {
        self.provider.name()
    }

    pub fn matches(&self, url: &Url) -> bool {
        match &self.pattern {
            Some(pattern) => pattern.is_match(url.as_str()),
            None => self.provider.suitable(url),
        }
    }
}

/// Dispatches URLs to the first registered provider that claims them.
pub struct Extractor {
    pub providers: Vec<Registration>,
    concurrency: usize,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor {
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
            concurrency: 1,
        }
    }

    /// How many URLs `extract_all` works on at once. Zero is treated as one.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn register_provider(&mut self, provider: Box<dyn Provider>) {
        self.providers.push(Registration::new(provider));
    }

    pub fn register(&mut self, registration: Registration) {
        self.providers.push(registration);
    }

    pub fn find(&self, url: &Url) -> Option<&Registration> {
        self.providers.iter().find(|entry| entry.matches(url))
    }

    /// Prepares `url`, then hands it to the first provider that claims it.
    ///
    /// The call's `prepare` (or the trimming default) runs before dispatch. When the call sets
    /// none and the matched registration has its own, that one is applied on top before fetching.
    pub async fn extract(&self, url: &str, options: &Options) -> Result<Media> {
        let prepared = options.prepare(url);
        let parsed_url = parse_url(&prepared)?;

        let entry = self
            .find(&parsed_url)
            .ok_or_else(|| EssenceError::NoProvider {
                url: prepared.clone(),
            })?;

        let parsed_url = match (&options.prepare, &entry.defaults.prepare) {
            (None, Some(prepare)) => parse_url(&prepare(&prepared))?,
            _ => parsed_url,
        };

        debug!("Dispatching {} to {}", parsed_url, entry.name());
        let options = options.or(&entry.defaults);
        entry.provider.embed(&parsed_url, &options).await
    }

    /// Extracts every URL independently, keeping each outcome next to its URL.
    pub async fn extract_each(
        &self,
        urls: &[String],
        options: &Options,
    ) -> Vec<(String, Result<Media>)> {
        stream::iter(urls)
            .map(|url| async move { (url.clone(), self.extract(url, options).await) })
            .buffered(self.concurrency)
            .collect()
            .await
    }

    /// Extracts every URL independently. URLs that fail are logged and left out.
    pub async fn extract_all(&self, urls: &[String], options: &Options) -> Vec<Media> {
        self.extract_each(urls, options)
            .await
            .into_iter()
            .filter_map(|(url, result)| match result {
                Ok(media) => Some(media),
                Err(e) => {
                    warn!("Skipping {}: {}", url, e);
                    None
                }
            })
            .collect()
    }
}

fn parse_url(url: &str) -> Result<Url> {
    Url::parse(url).map_err(|e| EssenceError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })
}
