use structopt::StructOpt;

use crate::resolver::Strategy;

#[derive(StructOpt, Debug)]
#[structopt(
    name = "xsshound",
    about = "Probes a domain and its subdomains for naive XSS indicators"
)]
pub struct Opt {
    #[structopt(help = "Apex domain to scan (bare hostname, e.g. example.com)")]
    pub domain: String,

    #[structopt(
        short,
        long,
        default_value = "4",
        help = "Number of origins probed in parallel"
    )]
    pub concurrency: usize,

    #[structopt(short, long, help = "Activates verbose mode")]
    pub verbose: bool,

    #[structopt(
        long,
        default_value = "10",
        help = "Request and DNS timeout in seconds"
    )]
    pub timeout: u64,

    #[structopt(
        short,
        long,
        default_value = "wordlist",
        help = "Subdomain discovery strategy: wordlist, crtsh or address"
    )]
    pub strategy: Strategy,

    #[structopt(short, long, help = "Path to a custom subdomain wordlist")]
    pub wordlist: Option<String>,

    #[structopt(
        long,
        help = "Enable the blind-XSS acceptance probe (one POST per payload per origin)"
    )]
    pub blind: bool,

    #[structopt(
        long,
        default_value = "250",
        help = "Delay between acceptance-probe POSTs in milliseconds"
    )]
    pub delay_ms: u64,

    #[structopt(
        long,
        help = "Emit findings as line-delimited JSON instead of human-readable text"
    )]
    pub jsonl: bool,
}
