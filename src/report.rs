use colored::*;
use log::error;
use serde::Serialize;

use crate::payloads::Category;
use crate::probe::ProbeOutcome;

#[derive(Serialize)]
struct FindingRecord<'a> {
    origin: &'a str,
    category: Category,
    payload: &'a str,
}

#[derive(Serialize)]
struct ErrorRecord<'a> {
    target: &'a str,
    error: &'a str,
}

pub fn print_human(outcome: &ProbeOutcome, blind_enabled: bool) {
    println!();
    println!("{} {}", "Checked".bold(), outcome.origin.as_str().bold());
    if let Some(err) = &outcome.error {
        println!("  {}: {}", "fetch failed".red(), err);
        return;
    }
    for category in Category::ALL {
        if category == Category::Blind && !blind_enabled {
            println!(
                "  {}: {}",
                category.label(),
                "skipped (enable with --blind)".yellow()
            );
            continue;
        }
        let matches = outcome.findings.get(category);
        if matches.is_empty() {
            println!("  {}: {}", category.label(), "none found".green());
        } else {
            println!(
                "  {}: {}",
                category.label().red().bold(),
                matches.join(", ")
            );
        }
    }
}

/// JSON lines for one outcome: one record per finding, or a single error
/// record when the fetch failed, so CI consumers can tell an unreachable
/// origin apart from a clean one.
pub fn jsonl_records(outcome: &ProbeOutcome) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(err) = &outcome.error {
        push_record(
            &mut lines,
            &ErrorRecord {
                target: outcome.origin.as_str(),
                error: err,
            },
        );
        return lines;
    }
    for category in Category::ALL {
        for payload in outcome.findings.get(category) {
            push_record(
                &mut lines,
                &FindingRecord {
                    origin: outcome.origin.as_str(),
                    category,
                    payload,
                },
            );
        }
    }
    lines
}

pub fn print_jsonl(outcome: &ProbeOutcome) {
    for line in jsonl_records(outcome) {
        println!("{}", line);
    }
}

pub fn discovery_failure_record(apex: &str, err: &str) -> Option<String> {
    let record = ErrorRecord {
        target: apex,
        error: err,
    };
    match serde_json::to_string(&record) {
        Ok(line) => Some(line),
        Err(e) => {
            error!("failed to serialize discovery failure: {}", e);
            None
        }
    }
}

/// Reported unconditionally: a resolution failure must reach the operator
/// even though it is non-fatal to the scan.
pub fn print_discovery_failure(apex: &str, err: &str, jsonl: bool) {
    if jsonl {
        if let Some(line) = discovery_failure_record(apex, err) {
            println!("{}", line);
        }
    } else {
        eprintln!(
            "{}: {}: {}",
            "subdomain discovery failed".red().bold(),
            apex,
            err
        );
    }
}

fn push_record<T: Serialize>(lines: &mut Vec<String>, record: &T) {
    match serde_json::to_string(record) {
        Ok(line) => lines.push(line),
        Err(e) => error!("failed to serialize finding: {}", e),
    }
}
