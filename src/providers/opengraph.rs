use crate::core::{
    reindex, AttributeFilter, Attributes, DomParser, EssenceError, HttpClient, Media, Options,
    Provider, Result, SelectorSpec,
};
use crate::utils::escape_html;
use async_trait::async_trait;
use regex::Regex;
use std::sync::Arc;
use tracing::debug;
use url::Url;

const DEFAULT_VIDEO_WIDTH: u32 = 560;
const DEFAULT_VIDEO_HEIGHT: u32 = 315;

const RENAMES: &[(&str, &str)] = &[
    ("og:type", "type"),
    ("og:title", "title"),
    ("og:description", "description"),
    ("og:site_name", "providerName"),
    ("og:image", "thumbnailUrl"),
    ("og:image:url", "thumbnailUrl"),
    ("og:image:width", "width"),
    ("og:image:height", "height"),
    ("og:video:width", "width"),
    ("og:video:height", "height"),
    ("og:url", "url"),
    ("html", "html"),
];

/// Generic provider reading `<meta property="og:*">` tags from any web page.
pub struct OpenGraphProvider {
    http: Arc<dyn HttpClient>,
    dom: Arc<dyn DomParser>,
    selector: SelectorSpec,
}

impl OpenGraphProvider {
    pub fn new(http: Arc<dyn HttpClient>, dom: Arc<dyn DomParser>) -> Self {
        let property = Regex::new(r"(?i)^og:.+").expect("valid OpenGraph property pattern");
        let selector = SelectorSpec::new().tag(
            "meta",
            vec![
                AttributeFilter::matching("property", property),
                AttributeFilter::present("content"),
            ],
        );

        Self {
            http,
            dom,
            selector,
        }
    }

    /// Collects OpenGraph properties in document order, keeping the first value of each.
    fn extract_properties(&self, document: &str) -> Result<Attributes> {
        let mut og = Attributes::new();

        for element in self.dom.extract_attributes(document, &self.selector)? {
            if let (Some(property), Some(content)) = (
                element.attributes.get("property"),
                element.attributes.get("content"),
            ) {
                og.insert_if_absent(property.as_str(), content.trim());
            }
        }

        Ok(og)
    }
}

#[async_trait]
impl Provider for OpenGraphProvider {
    fn name(&self) -> &'static str {
        "OpenGraph"
    }

    fn suitable(&self, url: &Url) -> bool {
        matches!(url.scheme(), "http" | "https")
    }

    fn default_options(&self) -> Options {
        Options::new().with_html(build_html)
    }

    async fn embed(&self, url: &Url, options: &Options) -> Result<Media> {
        let body = self.http.get(url.as_str()).await?;
        let document = String::from_utf8_lossy(&body);

        let mut og = self.extract_properties(&document)?;
        debug!("Found {} OpenGraph properties on {}", og.len(), url);

        if og.is_empty() {
            return Err(EssenceError::extraction(
                self.name(),
                url.as_str(),
                "no OpenGraph data found",
            ));
        }

        if !og.contains_key("html") {
            if let Some(builder) = &options.html {
                og.insert_if_absent("og:url", url.as_str());
                let html = builder(&og);
                og.insert_if_absent("html", html);
            }
        }

        Ok(Media::from_attributes_for(
            &reindex(&og, RENAMES),
            url.as_str(),
        ))
    }
}

/// Builds embed HTML from OpenGraph properties: an iframe for videos, a link otherwise.
///
/// Every interpolated value is escaped.
pub fn build_html(og: &Attributes) -> String {
    let url = og.get("og:url").unwrap_or_default();
    let title = og.get("og:title").unwrap_or(url);

    if let Some(video) = og.get("og:video") {
        let width = dimension(og.get("og:video:width"), DEFAULT_VIDEO_WIDTH);
        let height = dimension(og.get("og:video:height"), DEFAULT_VIDEO_HEIGHT);

        format!(
            r#"<iframe src="{}" alt="{}" width="{}" height="{}" frameborder="0" allowfullscreen mozallowfullscreen webkitallowfullscreen></iframe>"#,
            escape_html(video),
            escape_html(title),
            width,
            height
        )
    } else {
        let alt = og.get("og:description").unwrap_or(title);

        format!(
            r#"<a href="{}" alt="{}">{}</a>"#,
            escape_html(url),
            escape_html(alt),
            escape_html(title)
        )
    }
}

fn dimension(value: Option<&str>, default: u32) -> u32 {
    value
        .and_then(|v| v.trim().parse::<u32>().ok())
        .unwrap_or(default)
}
