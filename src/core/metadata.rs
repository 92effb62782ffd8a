use crate::core::Attributes;
use serde::{Deserialize, Serialize};

/// Canonical attribute names a [`Media`] carries.
pub const TYPE: &str = "type";
pub const TITLE: &str = "title";
pub const DESCRIPTION: &str = "description";
pub const PROVIDER_NAME: &str = "providerName";
pub const THUMBNAIL_URL: &str = "thumbnailUrl";
pub const WIDTH: &str = "width";
pub const HEIGHT: &str = "height";
pub const URL: &str = "url";
pub const HTML: &str = "html";

/// Normalized embed metadata for one URL.
///
/// Fields are private so a `Media` cannot change once a provider has built it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    provider_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thumbnail_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    html: Option<String>,
}

impl Media {
    /// Builds a `Media` from canonical attributes. Non-canonical keys are ignored.
    ///
    /// `width` and `height` keep only whole pixel counts: `"640"` and `"640.0"` are read as
    /// 640, while relative or fractional sizes such as `"100%"` or `"12.5"` are dropped.
    pub fn from_attributes(attributes: &Attributes) -> Self {
        let text = |key: &str| attributes.get(key).map(str::to_string);
        let number = |key: &str| attributes.get(key).and_then(parse_dimension);

        Self {
            kind: text(TYPE),
            title: text(TITLE),
            description: text(DESCRIPTION),
            provider_name: text(PROVIDER_NAME),
            thumbnail_url: text(THUMBNAIL_URL),
            width: number(WIDTH),
            height: number(HEIGHT),
            url: text(URL),
            html: text(HTML),
        }
    }

    /// Like [`Media::from_attributes`], falling back to `url` when the source gave none.
    pub fn from_attributes_for(attributes: &Attributes, url: &str) -> Self {
        let mut media = Self::from_attributes(attributes);
        if media.url.is_none() {
            media.url = Some(url.to_string());
        }
        media
    }

    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn provider_name(&self) -> Option<&str> {
        self.provider_name.as_deref()
    }

    pub fn thumbnail_url(&self) -> Option<&str> {
        self.thumbnail_url.as_deref()
    }

    pub fn width(&self) -> Option<u32> {
        self.width
    }

    pub fn height(&self) -> Option<u32> {
        self.height
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn html(&self) -> Option<&str> {
        self.html.as_deref()
    }

    /// Looks an attribute up by its canonical name.
    pub fn get(&self, name: &str) -> Option<String> {
        match name {
            TYPE => self.kind.clone(),
            TITLE => self.title.clone(),
            DESCRIPTION => self.description.clone(),
            PROVIDER_NAME => self.provider_name.clone(),
            THUMBNAIL_URL => self.thumbnail_url.clone(),
            WIDTH => self.width.map(|w| w.to_string()),
            HEIGHT => self.height.map(|h| h.to_string()),
            URL => self.url.clone(),
            HTML => self.html.clone(),
            _ => None,
        }
    }
}

/// Whole pixel counts, written either as integers or as integral decimals (`"640.0"`).
fn parse_dimension(value: &str) -> Option<u32> {
    let value = value.trim();
    if let Ok(pixels) = value.parse::<u32>() {
        return Some(pixels);
    }

    let pixels = value.parse::<f64>().ok()?;
    (pixels.fract() == 0.0 && (0.0..=u32::MAX as f64).contains(&pixels)).then_some(pixels as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_from_attributes() {
        let attributes: Attributes = vec![
            ("title", "Title"),
            ("width", "640"),
            ("height", "auto"),
            ("og:site_name", "ignored"),
        ]
        .into_iter()
        .collect();

        let media = Media::from_attributes(&attributes);

        assert_eq!(media.title(), Some("Title"));
        assert_eq!(media.width(), Some(640));
        assert_eq!(media.height(), None);
        assert_eq!(media.provider_name(), None);
        assert_eq!(media.url(), None);
    }

    #[test]
    fn test_media_dimensions() {
        let attributes: Attributes = vec![("width", "640.0"), ("height", "100%")]
            .into_iter()
            .collect();
        let media = Media::from_attributes(&attributes);

        assert_eq!(media.width(), Some(640));
        assert_eq!(media.height(), None);

        let fractional: Attributes = vec![("width", "12.5"), ("height", "-3")]
            .into_iter()
            .collect();
        let media = Media::from_attributes(&fractional);

        assert_eq!(media.width(), None);
        assert_eq!(media.height(), None);
    }

    #[test]
    fn test_media_url_fallback() {
        let with_url: Attributes = vec![("url", "http://canonical")].into_iter().collect();

        assert_eq!(
            Media::from_attributes_for(&with_url, "http://requested").url(),
            Some("http://canonical")
        );
        assert_eq!(
            Media::from_attributes_for(&Attributes::new(), "http://requested").url(),
            Some("http://requested")
        );
    }

    #[test]
    fn test_media_serializes_canonical_names() {
        let attributes: Attributes = vec![("type", "video"), ("providerName", "Site")]
            .into_iter()
            .collect();
        let json = serde_json::to_value(Media::from_attributes(&attributes)).unwrap();

        assert_eq!(json["type"], "video");
        assert_eq!(json["providerName"], "Site");
        assert!(json.get("title").is_none());
    }
}
