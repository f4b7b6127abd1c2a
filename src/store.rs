// src/store.rs
// On-disk persistence: hero profiles under the heroes dir, judgements
// under the judgements dir. JSON artifacts use a 4-space indent,
// matching the original artifacts' format.

use std::{
    error::Error,
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use serde::Serialize;

use crate::assess::service::AssessorReply;
use crate::core::sanitize::sanitize_hero_filename;
use crate::model::HeroProfile;

pub fn ensure_directory(dir: &Path) -> Result<(), Box<dyn Error>> {
    if dir.exists() && !dir.is_dir() {
        return Err(format!("Path exists but is not a directory: {}", dir.display()).into());
    }
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

fn write_pretty_json<T: Serialize>(path: &Path, value: &T) -> Result<(), Box<dyn Error>> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);
    let fmt = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut out, fmt);
    value.serialize(&mut ser)?;
    out.flush()?;
    Ok(())
}

/// Write one profile as `<dir>/<stem>.json`. The stem comes from the
/// hero's display name, sanitized; `ix` disambiguates the fallback
/// when nothing of the name survives.
pub fn save_profile(
    dir: &Path,
    ix: usize,
    profile: &HeroProfile,
) -> Result<PathBuf, Box<dyn Error>> {
    ensure_directory(dir)?;
    let stem = sanitize_hero_filename(&profile.name, ix);
    let path = dir.join(format!("{stem}.json"));
    write_pretty_json(&path, profile)?;
    Ok(path)
}

/// Reload every stored profile, sorted by filename for a predictable
/// batch order. An unreadable file is skipped with a warning; a
/// missing directory is simply an empty batch.
pub fn load_profiles(dir: &Path) -> Result<Vec<(String, HeroProfile)>, Box<dyn Error>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some("json") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut out = Vec::with_capacity(paths.len());
    for path in paths {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("hero")
            .to_string();
        let text = fs::read_to_string(&path)?;
        match serde_json::from_str::<HeroProfile>(&text) {
            Ok(profile) => out.push((stem, profile)),
            Err(e) => logw!("{}: unreadable profile skipped: {e}", path.display()),
        }
    }
    Ok(out)
}

/// Persist a judgement next to its profile stem. The reply variant
/// picks the target: structured data as `<stem>.json`, anything else
/// verbatim as `<stem>.txt`.
pub fn save_judgement(
    dir: &Path,
    stem: &str,
    reply: &AssessorReply,
) -> Result<PathBuf, Box<dyn Error>> {
    ensure_directory(dir)?;
    match reply {
        AssessorReply::Parsed(assessment) => {
            let path = dir.join(format!("{stem}.json"));
            write_pretty_json(&path, assessment)?;
            Ok(path)
        }
        AssessorReply::Unstructured(raw) => {
            let path = dir.join(format!("{stem}.txt"));
            fs::write(&path, raw)?;
            Ok(path)
        }
    }
}
