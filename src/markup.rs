use std::collections::HashMap;

use log::warn;
use scraper::{Html, Selector};

/// Owned snapshot of one parsed tag.
pub struct Tag {
    kind: String,
    attrs: HashMap<String, String>,
    html: String,
}

impl Tag {
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn serialize(&self) -> &str {
        &self.html
    }
}

/// Capability interface over a parsed markup body, so the underlying
/// parser stays swappable.
pub trait TagTree {
    fn tags_by_kind(&self, kinds: &[&str]) -> Vec<Tag>;
}

pub struct HtmlTree {
    body: String,
}

impl HtmlTree {
    pub fn new(body: String) -> HtmlTree {
        HtmlTree { body }
    }
}

impl TagTree for HtmlTree {
    fn tags_by_kind(&self, kinds: &[&str]) -> Vec<Tag> {
        if kinds.is_empty() {
            return Vec::new();
        }
        let selector = match Selector::parse(&kinds.join(", ")) {
            Ok(selector) => selector,
            Err(_) => {
                warn!("invalid tag selector: {:?}", kinds);
                return Vec::new();
            }
        };
        let document = Html::parse_document(&self.body);
        document
            .select(&selector)
            .map(|element| Tag {
                kind: element.value().name().to_string(),
                attrs: element
                    .value()
                    .attrs()
                    .map(|(name, value)| (name.to_string(), value.to_string()))
                    .collect(),
                html: element.html(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_tags_with_attributes_and_serialization() {
        let tree = HtmlTree::new(
            r#"<html><body><a href="javascript:alert(1)">Click Me</a><img src="x"></body></html>"#
                .to_string(),
        );
        let tags = tree.tags_by_kind(&["a", "img"]);
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].kind(), "a");
        assert_eq!(tags[0].attribute("href"), Some("javascript:alert(1)"));
        assert!(tags[0].serialize().contains("Click Me"));
        assert_eq!(tags[1].kind(), "img");
        assert_eq!(tags[1].attribute("src"), Some("x"));
        assert_eq!(tags[1].attribute("href"), None);
    }

    #[test]
    fn filters_by_kind() {
        let tree = HtmlTree::new("<div><script>alert(1)</script><p>text</p></div>".to_string());
        let tags = tree.tags_by_kind(&["script"]);
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].kind(), "script");
        assert!(tags[0].serialize().contains("alert(1)"));
    }

    #[test]
    fn malformed_markup_does_not_panic() {
        let tree = HtmlTree::new("<a href='unterminated <img src=".to_string());
        let _ = tree.tags_by_kind(&["a", "img"]);
    }

    #[test]
    fn empty_kinds_yield_no_tags() {
        let tree = HtmlTree::new("<a href='x'>y</a>".to_string());
        assert!(tree.tags_by_kind(&[]).is_empty());
    }

    #[test]
    fn empty_body_yields_no_tags() {
        let tree = HtmlTree::new(String::new());
        assert!(tree.tags_by_kind(&["a", "img", "script", "iframe"]).is_empty());
    }
}
