use std::collections::HashSet;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use hickory_resolver::config::{NameServerConfigGroup, ResolverConfig, ResolverOpts};
use hickory_resolver::TokioAsyncResolver;
use log::{info, warn};
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::error::ScanError;

pub const SCHEMES: &[&str] = &["http", "https"];

const PUBLIC_NAMESERVERS: [IpAddr; 2] = [
    IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8)),
    IpAddr::V4(Ipv4Addr::new(8, 8, 4, 4)),
];

const LOOKUP_CONCURRENCY: usize = 16;

/// One scan target: scheme + host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    url: Url,
}

impl Origin {
    pub fn new(scheme: &str, host: &str) -> Option<Origin> {
        Origin::parse(&format!("{}://{}", scheme, host))
    }

    pub fn parse(input: &str) -> Option<Origin> {
        Url::parse(input).ok().map(|url| Origin { url })
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Resolve `<word>.<apex>` for each wordlist entry.
    Wordlist,
    /// Certificate-transparency lookup via crt.sh.
    CertTransparency,
    /// Apex address records treated as extra hosts. This is what the original
    /// tool did; it does not discover real subdomains and is kept for parity.
    AddressRecords,
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Strategy, Self::Err> {
        match s {
            "wordlist" => Ok(Strategy::Wordlist),
            "crtsh" => Ok(Strategy::CertTransparency),
            "address" => Ok(Strategy::AddressRecords),
            other => Err(format!(
                "unknown strategy: {} (expected wordlist, crtsh or address)",
                other
            )),
        }
    }
}

/// Result of expanding one apex domain. A discovery failure is non-fatal
/// and is carried alongside the origins so the caller can report it.
pub struct Resolution {
    pub origins: Vec<Origin>,
    pub discovery_error: Option<ScanError>,
}

pub struct TargetResolver {
    resolver: TokioAsyncResolver,
    client: Client,
    strategy: Strategy,
    wordlist: Vec<String>,
    crtsh_base: String,
}

impl TargetResolver {
    pub fn new(
        client: Client,
        strategy: Strategy,
        wordlist: Vec<String>,
        timeout: Duration,
    ) -> TargetResolver {
        let mut opts = ResolverOpts::default();
        opts.timeout = timeout;
        let config = ResolverConfig::from_parts(
            None,
            Vec::new(),
            NameServerConfigGroup::from_ips_clear(&PUBLIC_NAMESERVERS, 53, true),
        );
        let resolver = TokioAsyncResolver::tokio(config, opts);
        TargetResolver {
            resolver,
            client,
            strategy,
            wordlist,
            crtsh_base: "https://crt.sh".to_string(),
        }
    }

    pub fn with_crtsh_base(mut self, base: impl Into<String>) -> TargetResolver {
        self.crtsh_base = base.into();
        self
    }

    /// Expands the apex into the ordered origin list. Discovery failures are
    /// non-fatal: the apex itself is always scanned under both schemes, and
    /// the error is returned so the caller can report the failing target.
    pub async fn resolve(&self, apex: &str) -> Resolution {
        let mut hosts = vec![apex.to_string()];
        let mut discovery_error = None;
        match self.discover(apex).await {
            Ok(discovered) => {
                info!("{} additional hosts discovered for {}", discovered.len(), apex);
                hosts.extend(discovered);
            }
            Err(e) => {
                warn!("subdomain discovery failed for {}: {}", apex, e);
                discovery_error = Some(e);
            }
        }
        Resolution {
            origins: origins_for_hosts(&hosts),
            discovery_error,
        }
    }

    async fn discover(&self, apex: &str) -> Result<Vec<String>, ScanError> {
        let mut hosts = match self.strategy {
            Strategy::Wordlist => self.discover_wordlist(apex).await,
            Strategy::CertTransparency => self.discover_crtsh(apex).await?,
            Strategy::AddressRecords => self.discover_addresses(apex).await?,
        };
        hosts.sort();
        hosts.dedup();
        hosts.retain(|host| host != apex);
        Ok(hosts)
    }

    async fn discover_wordlist(&self, apex: &str) -> Vec<String> {
        let candidates: Vec<String> = self
            .wordlist
            .iter()
            .map(|word| format!("{}.{}", word, apex))
            .collect();
        stream::iter(candidates)
            .map(|host| {
                let resolver = self.resolver.clone();
                async move {
                    match resolver.lookup_ip(host.as_str()).await {
                        Ok(_) => Some(host),
                        Err(_) => None,
                    }
                }
            })
            .buffer_unordered(LOOKUP_CONCURRENCY)
            .filter_map(|host| async move { host })
            .collect()
            .await
    }

    async fn discover_crtsh(&self, apex: &str) -> Result<Vec<String>, ScanError> {
        #[derive(Deserialize)]
        struct CrtShEntry {
            name_value: String,
        }

        // crt.sh transport failures are resolution errors, not fetch errors
        let url = format!("{}/?q=%25.{}&output=json", self.crtsh_base, apex);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| ScanError::Resolution(e.to_string()))?;
        let entries: Vec<CrtShEntry> = response
            .json()
            .await
            .map_err(|e| ScanError::Resolution(e.to_string()))?;

        let suffix = format!(".{}", apex);
        let mut unique = HashSet::new();
        for entry in entries {
            for name in entry.name_value.lines() {
                let name = name.trim();
                if name.is_empty() || name.contains('*') || !name.ends_with(&suffix) {
                    continue;
                }
                unique.insert(name.to_string());
            }
        }
        Ok(unique.into_iter().collect())
    }

    async fn discover_addresses(&self, apex: &str) -> Result<Vec<String>, ScanError> {
        let lookup = self.resolver.lookup_ip(apex).await?;
        Ok(lookup.iter().map(|addr| addr.to_string()).collect())
    }
}

/// Pure expansion of hosts into origins: each host under http then https,
/// in input order.
pub fn origins_for_hosts(hosts: &[String]) -> Vec<Origin> {
    hosts
        .iter()
        .flat_map(|host| {
            SCHEMES
                .iter()
                .filter_map(move |scheme| Origin::new(scheme, host))
        })
        .collect()
}
