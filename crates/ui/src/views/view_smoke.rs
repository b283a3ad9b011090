use clicker_core::leveling::{LevelingRules, Stimulus, apply_stimulus};
use clicker_core::model::{Amount, Player, PlayerId};
use clicker_core::time::fixed_now;

use super::{render_error, render_index};
use crate::vm::ProgressionVm;

fn player_after(amounts: &[f64]) -> Player {
    let mut player = Player::new(PlayerId::DEFAULT, "Player", fixed_now()).unwrap();
    for amount in amounts {
        let outcome = apply_stimulus(
            player.progression(),
            Stimulus::new(Amount::new(*amount).unwrap(), fixed_now()),
            &LevelingRules::default(),
        )
        .unwrap();
        player = player.with_progression(outcome.progression);
    }
    player
}

#[test]
fn index_renders_stats_and_form() {
    let html = render_index(ProgressionVm::from(&player_after(&[])));

    assert!(html.starts_with("<!DOCTYPE html>"), "missing doctype in {html}");
    assert!(html.contains("Level"), "missing level label in {html}");
    assert!(html.contains("Total XP"), "missing total label in {html}");
    assert!(html.contains("action=\"/add_xp\""), "missing form action in {html}");
    assert!(html.contains("name=\"amount\""), "missing amount field in {html}");
    assert!(html.contains("+1000"), "missing preset button in {html}");
    assert!(!html.contains("Combo x"), "unexpected combo in {html}");
}

#[test]
fn index_shows_combo_after_repeated_fast_clicks() {
    let html = render_index(ProgressionVm::from(&player_after(&[5.0, 5.0])));
    assert!(html.contains("Combo x"), "missing combo in {html}");
}

#[test]
fn index_abbreviates_large_totals() {
    let vm = ProgressionVm::from(&player_after(&[1_000_000.0]));
    let expected = vm.total_xp_str.clone();
    assert!(expected.ends_with('M'), "unexpected total {expected}");

    let html = render_index(vm);
    assert!(html.contains(&expected), "missing {expected} in {html}");
}

#[test]
fn error_page_renders_status_and_message() {
    let html = render_error(400, "amount must be >= 0");
    assert!(html.contains("Error 400"), "missing status in {html}");
    assert!(html.contains("amount must be"), "missing message in {html}");
}
