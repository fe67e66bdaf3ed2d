use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;

use regex::Regex;

pub fn read_lines<P>(filename: P) -> io::Result<io::Lines<io::BufReader<File>>>
where
    P: AsRef<Path>,
{
    let file = File::open(filename)?;
    Ok(io::BufReader::new(file).lines())
}

/// Accepts bare multi-label hostnames only; URLs and single labels are
/// rejected up front with a usage error.
pub fn is_valid_hostname(input: &str) -> bool {
    if input.is_empty() || input.len() > 253 {
        return false;
    }
    let pattern = Regex::new(
        r"^[A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?(\.[A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
    )
    .unwrap();
    pattern.is_match(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bare_hostnames() {
        assert!(is_valid_hostname("example.com"));
        assert!(is_valid_hostname("sub.example.co.uk"));
        assert!(is_valid_hostname("a1-b2.example.com"));
    }

    #[test]
    fn rejects_urls_and_junk() {
        assert!(!is_valid_hostname("http://example.com"));
        assert!(!is_valid_hostname("example.com/path"));
        assert!(!is_valid_hostname("example"));
        assert!(!is_valid_hostname("-bad.example.com"));
        assert!(!is_valid_hostname("exa mple.com"));
        assert!(!is_valid_hostname(""));
    }
}
