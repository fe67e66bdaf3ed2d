use std::io;

use crate::utils::read_lines;

pub const COMMON_SUBDOMAINS: &[&str] = &[
    "www", "mail", "ftp", "webmail", "smtp", "pop", "imap", "api", "dev",
    "staging", "test", "admin", "portal", "blog", "shop", "m", "app", "beta",
    "docs", "cdn", "static", "img", "vpn", "ns1", "ns2",
];

pub fn default() -> Vec<String> {
    COMMON_SUBDOMAINS.iter().map(|word| word.to_string()).collect()
}

pub fn load(path: &str) -> io::Result<Vec<String>> {
    let mut words = Vec::new();
    for line in read_lines(path)? {
        let line = line?;
        let word = line.trim();
        if !word.is_empty() {
            words.push(word.to_string());
        }
    }
    Ok(words)
}
