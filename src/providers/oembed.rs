use crate::core::{reindex, Attributes, EssenceError, HttpClient, Media, Options, Provider, Result};
use crate::utils::escape_html;
use async_trait::async_trait;
use regex::Regex;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;
use url::Url;

const RENAMES: &[(&str, &str)] = &[
    ("type", "type"),
    ("title", "title"),
    ("description", "description"),
    ("provider_name", "providerName"),
    ("thumbnail_url", "thumbnailUrl"),
    ("width", "width"),
    ("height", "height"),
    ("url", "url"),
    ("html", "html"),
];

/// Site-specific provider asking the site's oEmbed endpoint about a URL.
pub struct OEmbedProvider {
    name: &'static str,
    endpoint: String,
    pattern: Regex,
    http: Arc<dyn HttpClient>,
}

impl OEmbedProvider {
    pub fn new(
        name: &'static str,
        endpoint: impl Into<String>,
        pattern: Regex,
        http: Arc<dyn HttpClient>,
    ) -> Self {
        Self {
            name,
            endpoint: endpoint.into(),
            pattern,
            http,
        }
    }

    pub fn youtube(http: Arc<dyn HttpClient>) -> Self {
        let pattern = Regex::new(
            r"(?i)^https?://(?:[a-z0-9-]+\.)?(?:youtube\.com/(?:watch|embed/|shorts/|v/)|youtu\.be/)",
        )
        .expect("valid YouTube pattern");
        Self::new("YouTube", "https://www.youtube.com/oembed", pattern, http)
    }

    pub fn vimeo(http: Arc<dyn HttpClient>) -> Self {
        let pattern = Regex::new(r"(?i)^https?://(?:www\.|player\.)?vimeo\.com/(?:video/)?\d+")
            .expect("valid Vimeo pattern");
        Self::new("Vimeo", "https://vimeo.com/api/oembed.json", pattern, http)
    }

    /// The endpoint URL queried for `url`.
    pub fn request_url(&self, url: &Url, options: &Options) -> String {
        let separator = if self.endpoint.contains('?') { '&' } else { '?' };
        let mut request = format!(
            "{}{}format=json&url={}",
            self.endpoint,
            separator,
            urlencoding::encode(url.as_str())
        );

        if let Some(width) = options.max_width {
            request.push_str(&format!("&maxwidth={}", width));
        }
        if let Some(height) = options.max_height {
            request.push_str(&format!("&maxheight={}", height));
        }

        request
    }

    fn parse_response(&self, url: &Url, body: &[u8]) -> Result<Attributes> {
        let json: Value = serde_json::from_slice(body).map_err(|e| {
            EssenceError::extraction(self.name, url.as_str(), format!("invalid oEmbed JSON: {}", e))
        })?;

        let object = json.as_object().ok_or_else(|| {
            EssenceError::extraction(self.name, url.as_str(), "oEmbed response is not an object")
        })?;

        let mut attributes = Attributes::new();
        for (key, value) in object {
            let value = match value {
                Value::String(s) => s.trim().to_string(),
                Value::Number(n) => number_text(n),
                Value::Bool(b) => b.to_string(),
                _ => continue,
            };
            attributes.insert_if_absent(key.as_str(), value);
        }

        Ok(attributes)
    }
}

#[async_trait]
impl Provider for OEmbedProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    fn suitable(&self, url: &Url) -> bool {
        self.pattern.is_match(url.as_str())
    }

    async fn embed(&self, url: &Url, options: &Options) -> Result<Media> {
        let request = self.request_url(url, options);
        debug!("Querying oEmbed endpoint {}", request);

        let body = self.http.get(&request).await?;
        let mut attributes = self.parse_response(url, &body)?;

        if attributes.is_empty() {
            return Err(EssenceError::extraction(
                self.name,
                url.as_str(),
                "empty oEmbed response",
            ));
        }

        if !attributes.contains_key("html") {
            let html = match &options.html {
                Some(builder) => builder(&attributes),
                None => build_html(&attributes, url.as_str()),
            };
            attributes.insert_if_absent("html", html);
        }

        Ok(Media::from_attributes_for(
            &reindex(&attributes, RENAMES),
            url.as_str(),
        ))
    }
}

/// Renders integral floats (`640.0`) as integers so they read as pixel counts.
fn number_text(n: &serde_json::Number) -> String {
    if let Some(whole) = n.as_u64() {
        return whole.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= 0.0 && f <= u64::MAX as f64 => (f as u64).to_string(),
        _ => n.to_string(),
    }
}

/// Fallback markup for oEmbed responses that carry no `html`.
fn build_html(attributes: &Attributes, requested: &str) -> String {
    let url = attributes.get("url").unwrap_or(requested);
    let title = attributes.get("title").unwrap_or(url);

    if attributes.get("type") == Some("photo") {
        let mut html = format!(
            r#"<img src="{}" alt="{}""#,
            escape_html(url),
            escape_html(title)
        );
        for key in ["width", "height"] {
            if let Some(value) = attributes.get(key).and_then(|v| v.parse::<u32>().ok()) {
                html.push_str(&format!(r#" {}="{}""#, key, value));
            }
        }
        html.push_str(" />");
        html
    } else {
        format!(
            r#"<a href="{}">{}</a>"#,
            escape_html(url),
            escape_html(title)
        )
    }
}
