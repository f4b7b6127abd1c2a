// tests/assess_e2e.rs
// Scoring, aggregation and persistence through the public API.

use std::fs;
use std::path::PathBuf;

use ow_scrape::assess::aggregate;
use ow_scrape::assess::score::score_changelog;
use ow_scrape::assess::service::{parse_reply, AssessorReply};
use ow_scrape::config::options::{HeroSelector, RunMode, RunOptions};
use ow_scrape::extract::extract_hero;
use ow_scrape::model::{ChangeGroup, ChangelogEntry, HeroProfile};
use ow_scrape::progress::Progress;
use ow_scrape::runner;
use ow_scrape::store;

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("ow_e2e_{}", name));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

/// Newest patch first, matching wiki order.
fn patch(date: &str, groups: &[(&str, &[&str])]) -> ChangelogEntry {
    ChangelogEntry {
        date: date.into(),
        dev_comments: String::new(),
        ability_changes: groups
            .iter()
            .map(|(ability, changes)| ChangeGroup {
                ability: (*ability).into(),
                changes: changes.iter().map(|c| (*c).into()).collect(),
            })
            .collect(),
    }
}

fn profile(name: &str, changelog: Vec<ChangelogEntry>) -> HeroProfile {
    HeroProfile { name: name.into(), abilities: Vec::new(), changelog }
}

#[test]
fn cooldown_revert_scores_and_reports_nerfed() {
    let hero = profile(
        "Brigitte",
        vec![
            patch("Patch 3", &[("Shield Bash", &["Cooldown increased from 6 to 8 seconds"])]),
            patch("Patch 1", &[("Shield Bash", &["Cooldown reduced from 8 to 6 seconds"])]),
        ],
    );

    let records = score_changelog(&hero.changelog);
    assert_eq!(records[1].score, 1);
    assert_eq!(records[0].score, -records[1].score);
    assert_eq!(records[0].is_revert_of, Some(1));

    let assessment = aggregate::assess(&hero);
    let newest = &assessment.historical_changes[0];
    assert_eq!(newest.patch_date, "Patch 3");
    assert_eq!(newest.overall_judgement, "nerfed (net -1)");
    assert_eq!(
        newest.ability_changes_judgements["Shield Bash"][0].changes,
        vec!["Cooldown increased from 6 to 8 seconds (-1)"]
    );
    assert_eq!(
        assessment.historical_changes[1].overall_judgement,
        "buffed (net +1)"
    );
}

#[test]
fn score_counts_match_the_historical_changes() {
    let hero = profile(
        "Brigitte",
        vec![
            patch(
                "Patch 3",
                &[
                    ("Shield Bash", &["Cooldown increased from 6 to 8 seconds"]),
                    ("Unknown", &["Armor reduced by 25", "Updated icon"]),
                ],
            ),
            patch("Patch 1", &[("Shield Bash", &["Cooldown reduced from 8 to 6 seconds"])]),
        ],
    );
    let records = score_changelog(&hero.changelog);
    let assessment = aggregate::assess(&hero);
    let labels: usize = assessment
        .historical_changes
        .iter()
        .flat_map(|p| p.ability_changes_judgements.values())
        .flat_map(|groups| groups.iter())
        .map(|g| g.changes.len())
        .sum();
    assert_eq!(labels, records.len());
    assert_eq!(labels, 4);
}

#[test]
fn full_pipeline_from_markup_to_assessment() {
    let html = r#"
        <h1>Test Hero</h1>
        <div class="wds-tab__content wds-is-current">
          <td id="patch">Patch</td><td id="description">Desc</td>
          <td id="patch">2023-05-09</td>
          <td id="description">
            <p><a>Shield Bash</a></p>
            <ul><li>Cooldown increased from 6 to 8 seconds</li></ul>
          </td>
          <td id="patch">2023-01-01</td>
          <td id="description">
            <p><a>Shield Bash</a></p>
            <ul><li>Cooldown reduced from 8 to 6 seconds</li></ul>
          </td>
        </div>
    "#;
    let hero = extract_hero(html).unwrap();
    let assessment = aggregate::assess(&hero);
    assert_eq!(assessment.hero_name, "Test Hero");
    assert_eq!(assessment.historical_changes.len(), 2);
    assert_eq!(assessment.historical_changes[0].overall_judgement, "nerfed (net -1)");
    // one buff, one nerf, net zero: baseline 5
    assert!(assessment.hero_assessment.contains("1 positive and 1 negative"));
    assert!(assessment.hero_assessment.contains("5/10"));
}

#[test]
fn profiles_persist_and_reload_equal() {
    let dir = tmp_dir("profiles");
    let hero = profile(
        "Soldier: 76",
        vec![patch("2023-01-01", &[("Biotic Field", &["Healing increased from 35 to 40"])])],
    );
    let path = store::save_profile(&dir, 0, &hero).unwrap();
    assert!(path.to_string_lossy().ends_with("Soldier_76.json"));

    let loaded = store::load_profiles(&dir).unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].0, "Soldier_76");
    assert_eq!(loaded[0].1, hero);
}

#[test]
fn judgement_artifacts_follow_the_reply_variant() {
    let dir = tmp_dir("judgements");
    let hero = profile(
        "Ana",
        vec![patch("2023-01-01", &[("Sleep Dart", &["Cooldown reduced from 14 to 12 seconds"])])],
    );
    let parsed = AssessorReply::Parsed(aggregate::assess(&hero));
    let json_path = store::save_judgement(&dir, "Ana", &parsed).unwrap();
    assert!(json_path.to_string_lossy().ends_with("Ana.json"));
    let text = fs::read_to_string(&json_path).unwrap();
    // 4-space pretty output that parses back into the schema
    assert!(text.contains("    \"hero_name\""));
    assert!(matches!(parse_reply(&text), AssessorReply::Parsed(_)));

    let raw = "The hero seems fine to me, no JSON today.";
    let unstructured = AssessorReply::Unstructured(raw.into());
    let txt_path = store::save_judgement(&dir, "Ana", &unstructured).unwrap();
    assert!(txt_path.to_string_lossy().ends_with("Ana.txt"));
    assert_eq!(fs::read_to_string(&txt_path).unwrap(), raw);
}

#[derive(Default)]
struct CountingProgress {
    begun: usize,
    done: usize,
    finished: usize,
}

impl Progress for CountingProgress {
    fn begin(&mut self, _total: usize) {
        self.begun += 1;
    }
    fn item_done(&mut self, _name: &str) {
        self.done += 1;
    }
    fn finish(&mut self) {
        self.finished += 1;
    }
}

#[test]
fn one_progress_sink_drives_both_phases() {
    let heroes_dir = tmp_dir("run_heroes");
    let judgements_dir = tmp_dir("run_judgements");
    let hero = profile(
        "Ana",
        vec![patch("2023-01-01", &[("Sleep Dart", &["Cooldown reduced from 14 to 12 seconds"])])],
    );
    store::save_profile(&heroes_dir, 0, &hero).unwrap();

    // empty hero list: the scrape phase runs without touching the network
    let opts = RunOptions {
        mode: RunMode::Full,
        heroes: HeroSelector::Names(Vec::new()),
        heroes_dir,
        judgements_dir,
        ..RunOptions::default()
    };
    let mut sink = CountingProgress::default();
    let summary = runner::run(&opts, Some(&mut sink)).unwrap();

    assert!(summary.profiles_written.is_empty());
    assert_eq!(summary.judgements_written.len(), 1);
    assert_eq!(sink.begun, 1);
    assert_eq!(sink.done, 1);
    assert_eq!(sink.finished, 1);
}

#[test]
fn unparseable_profiles_are_skipped_not_fatal() {
    let dir = tmp_dir("bad_profile");
    fs::write(dir.join("broken.json"), "{ not json").unwrap();
    let hero = profile("Ana", Vec::new());
    store::save_profile(&dir, 0, &hero).unwrap();

    let loaded = store::load_profiles(&dir).unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].1.name, "Ana");
}
