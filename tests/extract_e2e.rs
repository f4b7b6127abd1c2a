// tests/extract_e2e.rs
// Whole-page extraction through the public API.

use ow_scrape::extract::extract_hero;
use ow_scrape::model::{Keybind, StatValue};

const HERO_PAGE: &str = r##"
<!DOCTYPE html>
<html><body>
<h1> Test Hero </h1>

<div class="ability_details_main">
  <div class="abilityHeader">Shield BashE</div>
  <div class="summaryInfoAndImage">img</div>
  <div>
    <div>
      <div><span title="Time between uses">Cooldown:</span></div>
      <div>7 seconds</div>
    </div>
    <div><div>Damage:</div><div>5–55</div></div>
    <div><div>Pierces barriers:</div><div>✓</div></div>
  </div>
</div>

<div class="ability_details_main">
  <div class="abilityHeader">FireballAlt Fire</div>
  <div class="summaryInfoAndImage">img</div>
  <div>
    <div><div>Ammo:</div><div>∞</div></div>
    <div><div>Reload required:</div><div>✕</div></div>
  </div>
</div>

<div class="ability_details_main">
  <div class="abilityHeader">Staff Strike</div>
  <div class="summaryInfoAndImage">img</div>
  <div></div>
</div>

<div class="wds-tab__content">
  <td id="patch">Patch</td><td id="description">stale inactive tab</td>
</div>
<div class="wds-tab__content wds-is-current">
  <td id="patch">Patch</td><td id="description">Description</td>

  <td id="patch">2023-05-09</td>
  <td id="description">
    <p><a href="#bash">Shield Bash</a></p>
    <ul><li>Cooldown increased from 6 to 8 seconds</li></ul>
  </td>

  <td id="patch">2023-01-01</td>
  <td id="description">
    <div>Developer Comment: a broad tuning pass.</div>
    <p>We want her to feel better to play.</p>
    <p><a href="#bash">Shield Bash</a></p>
    <ul><li>Cooldown reduced from 8 to 6 seconds</li></ul>
    <p>Health</p>
    <ul><li>Base health increased from 200 to 250</li></ul>
  </td>
</div>
</body></html>
"##;

#[test]
fn full_page_extracts_identity_abilities_and_changelog() {
    let profile = extract_hero(HERO_PAGE).unwrap();
    assert_eq!(profile.name, "Test Hero");

    assert_eq!(profile.abilities.len(), 3);
    let bash = &profile.abilities[0];
    assert_eq!(bash.name, "Shield Bash");
    assert_eq!(bash.keybind, Keybind::Key("E".into()));
    assert_eq!(bash.stats["Cooldown"].value, StatValue::Text("7 seconds".into()));
    assert_eq!(
        bash.stats["Cooldown"].info.as_deref(),
        Some("Time between uses")
    );
    assert_eq!(bash.stats["Damage"].value, StatValue::Text("5-55".into()));
    assert_eq!(bash.stats["Pierces barriers"].value, StatValue::Flag(true));

    let fireball = &profile.abilities[1];
    assert_eq!(fireball.name, "Fireball");
    assert_eq!(fireball.keybind, Keybind::RClick);
    assert_eq!(fireball.stats["Ammo"].value, StatValue::Text("inf".into()));
    assert_eq!(fireball.stats["Reload required"].value, StatValue::Flag(false));

    let strike = &profile.abilities[2];
    assert_eq!(strike.keybind, Keybind::LClick);
    assert!(strike.stats.is_empty());
}

#[test]
fn changelog_walks_the_active_tab_in_source_order() {
    let profile = extract_hero(HERO_PAGE).unwrap();
    assert_eq!(profile.changelog.len(), 2);

    let newest = &profile.changelog[0];
    assert_eq!(newest.date, "2023-05-09");
    assert!(newest.dev_comments.is_empty());
    assert_eq!(newest.ability_changes.len(), 1);
    assert_eq!(newest.ability_changes[0].ability, "Shield Bash");

    let older = &profile.changelog[1];
    assert_eq!(older.date, "2023-01-01");
    // container commentary kept, paragraph commentary appended, then
    // the link-less header's note of last resort
    assert_eq!(
        older.dev_comments,
        "Developer Comment: a broad tuning pass.\nWe want her to feel better to play.\nHealth"
    );
    assert_eq!(older.ability_changes.len(), 2);
    assert_eq!(older.ability_changes[0].ability, "Shield Bash");
    assert_eq!(
        older.ability_changes[0].changes,
        vec!["Cooldown reduced from 8 to 6 seconds"]
    );
    assert_eq!(older.ability_changes[1].ability, "Unknown");
    assert_eq!(
        older.ability_changes[1].changes,
        vec!["Base health increased from 200 to 250"]
    );
}

#[test]
fn extraction_is_idempotent_byte_for_byte() {
    let a = serde_json::to_string(&extract_hero(HERO_PAGE).unwrap()).unwrap();
    let b = serde_json::to_string(&extract_hero(HERO_PAGE).unwrap()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn profiles_round_trip_through_json() {
    let profile = extract_hero(HERO_PAGE).unwrap();
    let text = serde_json::to_string(&profile).unwrap();
    let back: ow_scrape::model::HeroProfile = serde_json::from_str(&text).unwrap();
    assert_eq!(back, profile);
}

#[test]
fn page_without_changelog_extracts_with_empty_history() {
    let profile = extract_hero("<h1>Newcomer</h1>").unwrap();
    assert_eq!(profile.name, "Newcomer");
    assert!(profile.abilities.is_empty());
    assert!(profile.changelog.is_empty());
}

#[test]
fn page_without_title_is_rejected() {
    let err = extract_hero("<p>just a fragment</p>").unwrap_err();
    assert!(err.to_string().contains("title"));
}
