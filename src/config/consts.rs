// src/config/consts.rs

// Net config
pub const HOST: &str = "overwatch.fandom.com";
pub const WIKI_PREFIX: &str = "/wiki/";
pub const HEROES_PAGE: &str = "Heroes";

// Hero links on the index page still point at the legacy domain.
pub const HERO_LINK_NEEDLE: &str = r#"href="http://overwatch.gamepedia.com/"#;

// Local cache
pub const STORE_DIR: &str = ".store";
pub const HERO_LIST_FILE: &str = "hero_names.txt";

// Output
pub const DEFAULT_HEROES_DIR: &str = "heroes";
pub const DEFAULT_JUDGEMENTS_DIR: &str = "judgements";

// Concurrency
pub const WORKERS: usize = 4;
pub const REQUEST_PAUSE_MS: u64 = 75; // be polite
pub const JITTER_MS: u64 = 50; // extra 0..50 ms
