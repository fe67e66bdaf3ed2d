pub mod error;
pub mod markup;
pub mod opt;
pub mod payloads;
pub mod probe;
pub mod report;
pub mod resolver;
pub mod utils;
pub mod wordlist;
