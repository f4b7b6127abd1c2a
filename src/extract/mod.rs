// src/extract/mod.rs

pub mod abilities;
pub mod changelog;
pub mod listing;

use std::{
    error::Error,
    fmt, thread,
    sync::{
        mpsc, Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use crate::config::consts::{JITTER_MS, REQUEST_PAUSE_MS, WORKERS};
use crate::core::net;
use crate::dom::Document;
use crate::model::HeroProfile;
use crate::progress::Progress;

/// The one extraction failure that is fatal for a page. Everything else
/// recovers locally with a documented fallback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExtractError {
    /// No page title: the hero cannot be identified.
    MissingTitle,
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractError::MissingTitle => {
                write!(f, "page has no title; hero cannot be identified")
            }
        }
    }
}

impl Error for ExtractError {}

/// Raw page markup into a full hero profile.
pub fn extract_hero(html: &str) -> Result<HeroProfile, Box<dyn Error>> {
    let doc = Document::parse(html);
    let name = abilities::extract_hero_name(&doc)?;
    let abilities = abilities::extract_abilities(&doc);
    let changelog = changelog::extract_changelog(&doc);
    logd!(
        "{name}: {} abilities, {} changelog entries",
        abilities.len(),
        changelog.len()
    );
    Ok(HeroProfile { name, abilities, changelog })
}

/// Fetch one hero page and extract it.
pub fn fetch_and_extract(page: &str) -> Result<HeroProfile, Box<dyn Error>> {
    let html = net::http_get(page)?;
    extract_hero(&html)
}

/// Fetch and extract a batch of hero pages, one hero per worker.
/// A failed hero is logged and dropped; the rest of the batch carries
/// on. Results come back in input order.
pub fn collect_heroes(
    pages: &[String],
    mut progress: Option<&mut (dyn Progress + '_)>,
) -> Vec<(String, HeroProfile)> {
    if pages.is_empty() {
        return Vec::new();
    }
    if let Some(p) = progress.as_deref_mut() {
        p.begin(pages.len());
    }

    type FetchOk = (usize, HeroProfile);
    type FetchErr = (usize, String);

    let pages_arc = Arc::new(pages.to_vec());
    let counter = Arc::new(AtomicUsize::new(0));
    let (res_tx, res_rx) = mpsc::channel::<Result<FetchOk, FetchErr>>();

    let workers = WORKERS.min(pages.len()).max(1);

    for _ in 0..workers {
        let pages = Arc::clone(&pages_arc);
        let idx = Arc::clone(&counter);
        let tx = res_tx.clone();

        thread::spawn(move || {
            loop {
                let i = idx.fetch_add(1, Ordering::Relaxed);
                if i >= pages.len() {
                    break;
                }
                let result = match fetch_and_extract(&pages[i]) {
                    Ok(profile) => Ok((i, profile)),
                    Err(e) => Err((i, e.to_string())),
                };
                let _ = tx.send(result);
                let jitter = (i as u64) % JITTER_MS;
                thread::sleep(Duration::from_millis(REQUEST_PAUSE_MS + jitter)); // be polite
            }
        });
    }
    drop(res_tx); // main thread is sole receiver now

    let mut collected: Vec<(usize, String, HeroProfile)> = Vec::new();
    for _ in 0..pages_arc.len() {
        match res_rx.recv() {
            Ok(Ok((i, profile))) => {
                if let Some(p) = progress.as_deref_mut() {
                    p.item_done(&pages_arc[i]);
                }
                collected.push((i, pages_arc[i].clone(), profile));
            }
            Ok(Err((i, msg))) => {
                loge!("{}: {msg}", pages_arc[i]);
                if let Some(p) = progress.as_deref_mut() {
                    p.item_failed(&pages_arc[i]);
                }
            }
            Err(_) => break, // workers ended early; bail gracefully
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }

    collected.sort_by_key(|(i, _, _)| *i);
    collected.into_iter().map(|(_, page, profile)| (page, profile)).collect()
}
