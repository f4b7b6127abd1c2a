// src/runner.rs
// Batch driver: scrape phase, assess phase, or both. No single hero's
// failure is batch-fatal; errors that bubble out of here are
// driver-level (bad options, unusable output directory).

use std::{error::Error, path::PathBuf};

use crate::{
    assess::{service::AssessorReply, Assessor, RuleAssessor},
    config::options::{HeroSelector, RunMode, RunOptions},
    extract::{self, listing},
    progress::Progress,
    store,
};

/// Summary of what a run produced.
pub struct RunSummary {
    pub profiles_written: Vec<PathBuf>,
    pub judgements_written: Vec<PathBuf>,
}

/// Top-level runner: dispatch on the run mode.
/// `progress` can be None (no UI updates) or Some(&mut impl Progress).
pub fn run(
    opts: &RunOptions,
    mut progress: Option<&mut (dyn Progress + '_)>,
) -> Result<RunSummary, Box<dyn Error>> {
    let mut summary = RunSummary {
        profiles_written: Vec::new(),
        judgements_written: Vec::new(),
    };
    if matches!(opts.mode, RunMode::Full | RunMode::ScrapeOnly) {
        summary.profiles_written = scrape_phase(opts, progress.as_deref_mut())?;
    }
    if matches!(opts.mode, RunMode::Full | RunMode::AssessOnly) {
        summary.judgements_written = assess_phase(opts, progress.as_deref_mut())?;
    }
    Ok(summary)
}

/// Hero pages into stored profiles.
fn scrape_phase(
    opts: &RunOptions,
    mut progress: Option<&mut (dyn Progress + '_)>,
) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    let pages = match &opts.heroes {
        HeroSelector::All => listing::load()?,
        HeroSelector::Names(names) => names.clone(),
    };
    if let Some(p) = progress.as_deref_mut() {
        p.log(&format!("Scraping {} hero pages…", pages.len()));
    }

    let collected = extract::collect_heroes(&pages, progress.as_deref_mut());

    store::ensure_directory(&opts.heroes_dir)?;
    let mut written = Vec::with_capacity(collected.len());
    for (ix, (_, profile)) in collected.iter().enumerate() {
        let path = store::save_profile(&opts.heroes_dir, ix, profile)?;
        logf!("Saved {}", path.display());
        written.push(path);
    }
    Ok(written)
}

/// Stored profiles into judgements. The reply variant decides the
/// artifact; an unstructured reply is the documented degraded path,
/// not a failure.
fn assess_phase(
    opts: &RunOptions,
    mut progress: Option<&mut (dyn Progress + '_)>,
) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    let profiles = store::load_profiles(&opts.heroes_dir)?;
    if let Some(p) = progress.as_deref_mut() {
        p.log(&format!("Assessing {} stored profiles…", profiles.len()));
        p.begin(profiles.len());
    }

    let assessor = RuleAssessor;
    let mut written = Vec::with_capacity(profiles.len());
    for (stem, profile) in &profiles {
        match assessor.assess(profile) {
            Ok(reply) => {
                if matches!(reply, AssessorReply::Unstructured(_)) {
                    logw!("{stem}: assessment not structured");
                }
                let path = store::save_judgement(&opts.judgements_dir, stem, &reply)?;
                written.push(path);
                if let Some(p) = progress.as_deref_mut() {
                    p.item_done(&profile.name);
                }
            }
            Err(e) => {
                loge!("{stem}: {e}");
                if let Some(p) = progress.as_deref_mut() {
                    p.item_failed(&profile.name);
                }
            }
        }
    }
    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    Ok(written)
}

/// Hero page list for the CLI. Failure degrades to an empty list with
/// a warning rather than aborting.
pub fn list_heroes() -> Vec<String> {
    match listing::load() {
        Ok(names) => names,
        Err(e) => {
            eprintln!("Warning: could not load hero list: {e}");
            Vec::new()
        }
    }
}
