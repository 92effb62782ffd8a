pub mod oembed;
pub mod opengraph;

pub use oembed::OEmbedProvider;
pub use opengraph::OpenGraphProvider;

use crate::core::{DomParser, Extractor, HttpClient};
use std::sync::Arc;

/// Registers the built-in providers, site-specific ones first and OpenGraph as the
/// catch-all fallback.
pub fn register_defaults(
    extractor: &mut Extractor,
    http: Arc<dyn HttpClient>,
    dom: Arc<dyn DomParser>,
) {
    extractor.register_provider(Box::new(OEmbedProvider::youtube(http.clone())));
    extractor.register_provider(Box::new(OEmbedProvider::vimeo(http.clone())));
    extractor.register_provider(Box::new(OpenGraphProvider::new(http, dom)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FetchError, HtmlParser, Options};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Answers oEmbed endpoints with JSON and everything else with an OpenGraph page.
    #[derive(Default)]
    struct RecordingClient {
        requests: Mutex<Vec<String>>,
    }

    impl RecordingClient {
        fn last_request(&self) -> String {
            self.requests.lock().unwrap().last().cloned().unwrap_or_default()
        }
    }

    #[async_trait]
    impl HttpClient for RecordingClient {
        async fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
            self.requests.lock().unwrap().push(url.to_string());
            let body = if url.contains("oembed") {
                r#"{"type":"video","title":"From oEmbed","html":"<iframe></iframe>"}"#
            } else {
                r#"<meta property="og:title" content="From OpenGraph">"#
            };
            Ok(body.as_bytes().to_vec())
        }
    }

    fn default_extractor() -> (Extractor, Arc<RecordingClient>) {
        let client = Arc::new(RecordingClient::default());
        let mut extractor = Extractor::new();
        register_defaults(&mut extractor, client.clone(), Arc::new(HtmlParser::new()));
        (extractor, client)
    }

    #[tokio::test]
    async fn test_defaults_dispatch_in_priority_order() {
        let (extractor, client) = default_extractor();

        let youtube = extractor
            .extract("https://www.youtube.com/watch?v=x", &Options::new())
            .await
            .unwrap();
        assert!(client
            .last_request()
            .starts_with("https://www.youtube.com/oembed?"));
        assert_eq!(youtube.title(), Some("From oEmbed"));

        let vimeo = extractor
            .extract("https://vimeo.com/42", &Options::new())
            .await
            .unwrap();
        assert!(client
            .last_request()
            .starts_with("https://vimeo.com/api/oembed.json?"));
        assert_eq!(vimeo.title(), Some("From oEmbed"));

        let page = extractor
            .extract("https://example.com/page", &Options::new())
            .await
            .unwrap();
        assert_eq!(client.last_request(), "https://example.com/page");
        assert_eq!(page.title(), Some("From OpenGraph"));

        assert_eq!(client.requests.lock().unwrap().len(), 3);
    }

    #[test]
    fn test_defaults_registration_order() {
        let (extractor, _) = default_extractor();
        let names: Vec<_> = extractor.providers.iter().map(|p| p.name()).collect();

        assert_eq!(names, vec!["YouTube", "Vimeo", "OpenGraph"]);
    }
}
