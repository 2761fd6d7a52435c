//! Application constants and configuration

pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// User agent sent with every page fetch.
pub const USER_AGENT: &str = concat!("SiteDeck/", env!("CARGO_PKG_VERSION"));

/// Cap on fetched document size. Anything larger is truncated at this
/// boundary rather than failed.
pub const MAX_DOCUMENT_BYTES: usize = 2 * 1024 * 1024;

/// Built-in destinations shown on the home screen, in display order.
pub const DESTINATIONS: &[(&str, &str)] = &[
    ("Wikipedia", "https://www.wikipedia.org"),
    ("PDF Drive", "https://www.pdfdrive.com"),
    ("Hacker News", "https://news.ycombinator.com"),
    ("DDNet", "https://ddnet.org"),
    ("Rust", "https://www.rust-lang.org"),
];
