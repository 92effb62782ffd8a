use crate::core::Attributes;
use std::fmt;
use std::sync::Arc;

/// Builds embeddable HTML out of a provider's raw attributes.
pub type HtmlBuilder = Arc<dyn Fn(&Attributes) -> String + Send + Sync>;

/// Rewrites a URL before it is parsed and dispatched.
pub type UrlPreparer = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Preparation applied when neither the call nor the provider sets one.
pub fn prepare_url(url: &str) -> String {
    url.trim().to_string()
}

/// Per-call extraction options.
///
/// Every field is optional; unset fields fall back to the defaults registered with the
/// provider that handles the URL (see [`Options::or`]).
#[derive(Clone, Default)]
pub struct Options {
    /// Rewrites the URL before fetching. Defaults to [`prepare_url`].
    pub prepare: Option<UrlPreparer>,
    /// Overrides HTML synthesis for providers that build their own markup.
    pub html: Option<HtmlBuilder>,
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_html<F>(mut self, builder: F) -> Self
    where
        F: Fn(&Attributes) -> String + Send + Sync + 'static,
    {
        self.html = Some(Arc::new(builder));
        self
    }

    pub fn with_prepare<F>(mut self, prepare: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.prepare = Some(Arc::new(prepare));
        self
    }

    /// The URL as the configured preparer, or [`prepare_url`], rewrites it.
    pub fn prepare(&self, url: &str) -> String {
        match &self.prepare {
            Some(prepare) => prepare(url),
            None => prepare_url(url),
        }
    }

    pub fn with_max_width(mut self, width: u32) -> Self {
        self.max_width = Some(width);
        self
    }

    pub fn with_max_height(mut self, height: u32) -> Self {
        self.max_height = Some(height);
        self
    }

    /// Layers `self` over `defaults`: fields set here win.
    pub fn or(&self, defaults: &Options) -> Options {
        Options {
            prepare: self.prepare.clone().or_else(|| defaults.prepare.clone()),
            html: self.html.clone().or_else(|| defaults.html.clone()),
            max_width: self.max_width.or(defaults.max_width),
            max_height: self.max_height.or(defaults.max_height),
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("prepare", &self.prepare.as_ref().map(|_| "<preparer>"))
            .field("html", &self.html.as_ref().map(|_| "<builder>"))
            .field("max_width", &self.max_width)
            .field("max_height", &self.max_height)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_options_override_defaults() {
        let defaults = Options::new()
            .with_html(|_| "default".to_string())
            .with_max_width(100)
            .with_max_height(50);
        let call = Options::new()
            .with_html(|_| "call".to_string())
            .with_max_width(300);

        let merged = call.or(&defaults);
        let html = merged.html.expect("builder");

        assert_eq!(html(&Attributes::new()), "call");
        assert_eq!(merged.max_width, Some(300));
        assert_eq!(merged.max_height, Some(50));
    }

    #[test]
    fn test_defaults_fill_unset_fields() {
        let defaults = Options::new().with_html(|_| "default".to_string());
        let merged = Options::new().or(&defaults);

        assert_eq!(merged.html.expect("builder")(&Attributes::new()), "default");
        assert_eq!(merged.max_width, None);
    }

    #[test]
    fn test_prepare_defaults_to_trimming() {
        assert_eq!(Options::new().prepare("  http://x.example/ \n"), "http://x.example/");
    }

    #[test]
    fn test_prepare_layers_like_html() {
        let defaults = Options::new().with_prepare(|url| format!("{}#default", url));
        let call = Options::new().with_prepare(|url| url.replace("http:", "https:"));

        assert_eq!(call.or(&defaults).prepare("http://x"), "https://x");
        assert_eq!(Options::new().or(&defaults).prepare("http://x"), "http://x#default");
    }
}
