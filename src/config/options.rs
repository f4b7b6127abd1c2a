// src/config/options.rs
use std::path::PathBuf;

use super::consts::{DEFAULT_HEROES_DIR, DEFAULT_JUDGEMENTS_DIR};

/// Which heroes a run covers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HeroSelector {
    All,
    Names(Vec<String>),
}

/// What the run does. The default pipeline scrapes pages into hero
/// profiles, then assesses every stored profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunMode {
    Full,
    ScrapeOnly,
    AssessOnly,
}

/// Everything the batch driver needs, carried explicitly.
/// Input source and output sinks live here rather than as process-wide
/// assumptions about the working directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOptions {
    pub mode: RunMode,
    pub heroes: HeroSelector,
    /// Where extracted hero profiles are written (and read back from
    /// during the assess phase).
    pub heroes_dir: PathBuf,
    /// Where judgements land: `<stem>.json` when structured,
    /// `<stem>.txt` when the assessor reply was not.
    pub judgements_dir: PathBuf,
    pub list_heroes: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            mode: RunMode::Full,
            heroes: HeroSelector::All,
            heroes_dir: PathBuf::from(DEFAULT_HEROES_DIR),
            judgements_dir: PathBuf::from(DEFAULT_JUDGEMENTS_DIR),
            list_heroes: false,
        }
    }
}
