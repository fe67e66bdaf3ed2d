use std::process;
use std::sync::Arc;
use std::time::Duration;

use colored::*;
use futures::stream::{self, StreamExt};
use reqwest::Client;
use structopt::StructOpt;

use xsshound::opt::Opt;
use xsshound::payloads::Catalog;
use xsshound::probe::ProbeEngine;
use xsshound::report;
use xsshound::resolver::TargetResolver;
use xsshound::utils::is_valid_hostname;
use xsshound::wordlist;

// Exit codes: 0 = no findings, 1 = findings present, 2 = usage error.
#[tokio::main]
async fn main() {
    let opt = Opt::from_args();
    if opt.verbose {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Info)
            .init();
    } else {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Error)
            .init();
    }

    let domain = opt.domain.trim().to_string();
    if !is_valid_hostname(&domain) {
        eprintln!(
            "{}: {} (expected a bare hostname like example.com)",
            "invalid domain".red().bold(),
            domain
        );
        process::exit(2);
    }

    if !opt.jsonl {
        println!("{}", "XSS HOUND - starting scan...".green().bold());
    }

    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::limited(10))
        .timeout(Duration::from_secs(opt.timeout))
        .build()
        .expect("Failed to build HTTP client");

    let words = match &opt.wordlist {
        Some(path) => match wordlist::load(path) {
            Ok(words) => words,
            Err(e) => {
                eprintln!(
                    "{}: {}: {}",
                    "error reading wordlist".red().bold(),
                    path,
                    e
                );
                process::exit(2);
            }
        },
        None => wordlist::default(),
    };

    let resolver = TargetResolver::new(
        client.clone(),
        opt.strategy,
        words,
        Duration::from_secs(opt.timeout),
    );
    let resolution = resolver.resolve(&domain).await;
    if let Some(err) = &resolution.discovery_error {
        report::print_discovery_failure(&domain, &err.to_string(), opt.jsonl);
    }
    let origins = resolution.origins;
    if !opt.jsonl {
        println!("{} origins queued for probing", origins.len());
    }

    let catalog = Arc::new(Catalog::default());
    let engine = Arc::new(ProbeEngine::new(
        client,
        catalog,
        opt.blind,
        Duration::from_millis(opt.delay_ms),
    ));

    let concurrency = opt.concurrency.max(1);
    let mut outcomes = stream::iter(origins)
        .map(|origin| {
            let engine = Arc::clone(&engine);
            async move { engine.probe(origin).await }
        })
        .buffered(concurrency);

    let mut total = 0;
    while let Some(outcome) = outcomes.next().await {
        total += outcome.findings.total();
        if opt.jsonl {
            report::print_jsonl(&outcome);
        } else {
            report::print_human(&outcome, opt.blind);
        }
    }

    if total > 0 {
        process::exit(1);
    }
}
