use crate::core::Media;
use regex::{Captures, Regex};
use std::sync::OnceLock;

/// Escapes text for use inside HTML content or a quoted attribute value.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

fn placeholder() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| Regex::new(r"%\((\w+)\)s").expect("valid placeholder pattern"))
}

/// Fills `%(name)s` placeholders with the Media attribute of that canonical name.
///
/// Missing attributes render as an empty string.
pub fn render_template(template: &str, media: &Media) -> String {
    placeholder()
        .replace_all(template, |caps: &Captures| {
            media.get(&caps[1]).unwrap_or_default()
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Attributes;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("plain"), "plain");
        assert_eq!(
            escape_html(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_render_template() {
        let attributes: Attributes = vec![("title", "Clip"), ("width", "640")]
            .into_iter()
            .collect();
        let media = Media::from_attributes_for(&attributes, "http://x");

        assert_eq!(
            render_template("%(title)s (%(width)s) %(url)s", &media),
            "Clip (640) http://x"
        );
        assert_eq!(render_template("[%(html)s]", &media), "[]");
        assert_eq!(render_template("no placeholders", &media), "no placeholders");
    }
}
