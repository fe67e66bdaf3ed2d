use std::sync::Arc;
use std::time::Duration;

use log::{info, warn};
use reqwest::Client;

use crate::error::ScanError;
use crate::markup::{HtmlTree, TagTree};
use crate::payloads::{Catalog, Category};
use crate::resolver::Origin;

const STORED_TAG_KINDS: &[&str] = &["input", "a", "img", "script", "iframe"];
const STORED_ATTRIBUTES: &[&str] = &["href", "src", "value"];
const DOM_TAG_KINDS: &[&str] = &["script", "a", "img", "iframe"];

pub const ACCEPTANCE_FIELD: &str = "input";

/// Matched payloads per category, in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Findings {
    pub reflected: Vec<String>,
    pub stored: Vec<String>,
    pub blind: Vec<String>,
    pub dom: Vec<String>,
}

impl Findings {
    pub fn get(&self, category: Category) -> &[String] {
        match category {
            Category::Reflected => &self.reflected,
            Category::Stored => &self.stored,
            Category::Blind => &self.blind,
            Category::Dom => &self.dom,
        }
    }

    pub fn total(&self) -> usize {
        Category::ALL.iter().map(|c| self.get(*c).len()).sum()
    }
}

#[derive(Debug)]
pub struct ProbeOutcome {
    pub origin: Origin,
    pub findings: Findings,
    pub error: Option<String>,
}

pub struct ProbeEngine {
    client: Client,
    catalog: Arc<Catalog>,
    blind: bool,
    post_delay: Duration,
}

impl ProbeEngine {
    pub fn new(
        client: Client,
        catalog: Arc<Catalog>,
        blind: bool,
        post_delay: Duration,
    ) -> ProbeEngine {
        ProbeEngine {
            client,
            catalog,
            blind,
            post_delay,
        }
    }

    /// Fetches one origin and runs every classification rule against the full
    /// catalog. A fetch failure yields zero findings and skips every rule,
    /// including the acceptance probe.
    pub async fn probe(&self, origin: Origin) -> ProbeOutcome {
        info!("probing {}", origin);
        let body = match self.fetch(&origin).await {
            Ok(body) => body,
            Err(e) => {
                warn!("skipping {}: {}", origin, e);
                return ProbeOutcome {
                    origin,
                    findings: Findings::default(),
                    error: Some(e.to_string()),
                };
            }
        };

        let mut findings = Findings::default();
        findings.reflected = self.reflected_matches(&body);
        let tree = HtmlTree::new(body);
        findings.stored = self.stored_matches(&tree);
        findings.dom = self.dom_matches(&tree);
        if self.blind {
            findings.blind = self.acceptance_matches(&origin).await;
        }

        ProbeOutcome {
            origin,
            findings,
            error: None,
        }
    }

    async fn fetch(&self, origin: &Origin) -> Result<String, ScanError> {
        let response = self
            .client
            .get(origin.as_str())
            .send()
            .await?
            .error_for_status()?;
        Ok(response.text().await?)
    }

    /// Literal, case-sensitive substring search over the raw body. No
    /// normalization and no encoding awareness, so encoded reflections are
    /// missed and benign echoes match.
    pub fn reflected_matches(&self, body: &str) -> Vec<String> {
        self.catalog
            .iter()
            .filter(|payload| body.contains(payload.as_str()))
            .cloned()
            .collect()
    }

    pub fn stored_matches(&self, tree: &dyn TagTree) -> Vec<String> {
        let tags = tree.tags_by_kind(STORED_TAG_KINDS);
        self.catalog
            .iter()
            .filter(|payload| {
                tags.iter().any(|tag| {
                    STORED_ATTRIBUTES.iter().any(|attr| {
                        tag.attribute(attr)
                            .map_or(false, |value| value.contains(payload.as_str()))
                    })
                })
            })
            .cloned()
            .collect()
    }

    pub fn dom_matches(&self, tree: &dyn TagTree) -> Vec<String> {
        let tags = tree.tags_by_kind(DOM_TAG_KINDS);
        self.catalog
            .iter()
            .filter(|payload| tags.iter().any(|tag| tag.serialize().contains(payload.as_str())))
            .cloned()
            .collect()
    }

    /// Acceptance probe, not true blind-XSS confirmation: a 2xx answer to the
    /// POST only means the payload was accepted, there is no out-of-band
    /// callback listener. POSTs are paced by `post_delay`.
    pub async fn acceptance_matches(&self, origin: &Origin) -> Vec<String> {
        let mut matched = Vec::new();
        for (i, payload) in self.catalog.iter().enumerate() {
            if i > 0 && !self.post_delay.is_zero() {
                tokio::time::sleep(self.post_delay).await;
            }
            let form = [(ACCEPTANCE_FIELD, payload.as_str())];
            match self.client.post(origin.as_str()).form(&form).send().await {
                Ok(response) if response.status().is_success() => matched.push(payload.clone()),
                Ok(response) => {
                    info!("acceptance probe for {} answered {}", origin, response.status())
                }
                Err(e) => warn!("acceptance probe for {} failed: {}", origin, e),
            }
        }
        matched
    }
}
