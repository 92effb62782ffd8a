use crate::config::Config;
use crate::core::{Extractor, HtmlParser, Media, Options, ReqwestClient, Result};
use crate::crawler::Crawler;
use crate::providers;
use crate::replacer::Replacer;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// Entry point tying URL discovery, extraction and replacement together.
pub struct Essence {
    crawler: Crawler,
    extractor: Extractor,
    replacer: Replacer,
}

impl Essence {
    /// Builds an instance with the built-in providers, fetching through `reqwest`.
    pub fn new(config: &Config) -> Result<Self> {
        let http = Arc::new(ReqwestClient::new(config)?);
        let dom = Arc::new(HtmlParser::new());

        let mut extractor = Extractor::new().with_concurrency(config.concurrency);
        providers::register_defaults(&mut extractor, http, dom);

        let crawler = Crawler::new();
        let replacer = Replacer::with_finder(crawler.finder().clone());

        Ok(Self::from_parts(crawler, extractor, replacer))
    }

    pub fn from_parts(crawler: Crawler, extractor: Extractor, replacer: Replacer) -> Self {
        Self {
            crawler,
            extractor,
            replacer,
        }
    }

    pub fn extractor(&self) -> &Extractor {
        &self.extractor
    }

    /// URLs found in `text`.
    pub fn extract(&self, text: &str) -> Vec<String> {
        self.crawler.crawl(text)
    }

    pub async fn embed(&self, url: &str, options: &Options) -> Result<Media> {
        self.extractor.extract(url, options).await
    }

    /// Embeds every URL, leaving out the ones that fail.
    pub async fn embed_all(&self, urls: &[String], options: &Options) -> Vec<Media> {
        self.extractor.extract_all(urls, options).await
    }

    /// Replaces each URL of `text` that can be embedded with `template(media)`.
    pub async fn replace<F>(&self, text: &str, template: F, options: &Options) -> String
    where
        F: Fn(&Media) -> String,
    {
        let urls = self.crawler.crawl(text);
        let medias: HashMap<String, Media> = self
            .extractor
            .extract_each(&urls, options)
            .await
            .into_iter()
            .filter_map(|(url, result)| match result {
                Ok(media) => Some((url, media)),
                Err(e) => {
                    info!("Leaving {} as is: {}", url, e);
                    None
                }
            })
            .collect();

        self.replacer.replace(text, &medias, template)
    }

    /// [`Essence::replace`] with each URL swapped for its embed HTML.
    pub async fn replace_with_html(&self, text: &str, options: &Options) -> String {
        self.replace(text, Replacer::default_template, options).await
    }
}
