//! QA tests for combat, progression and survival.
//!
//! Run with: `cargo test -p rpg-core --test qa_combat`

use rpg_core::items::get_item;
use rpg_core::spells::{get_ability, get_spell};
use rpg_core::testing::{
    assert_hp, assert_in_combat, assert_not_in_combat, assert_output, assert_state, TestHarness,
};
use rpg_core::world::{StatusEffect, StatusKind};
use rpg_core::GameState;

// =============================================================================
// TEST 1: The forest goblin
// =============================================================================

#[test]
fn test_forest_goblin_fight() {
    let mut harness = TestHarness::started();
    harness.input("go forest");
    assert_in_combat(&harness);

    let goblin = harness.game.current_location().unwrap().enemies[0].clone();
    assert_eq!(goblin.name, "Goblin");
    let (xp, gold) = (harness.player().xp, harness.player().gold);

    let mut rounds = 0;
    while harness.state() == GameState::Combat {
        harness.input("attack");
        rounds += 1;
        assert!(rounds < 20, "goblin never fell");
    }

    assert_state(&harness, GameState::Playing);
    assert_eq!(harness.player().xp, xp + goblin.xp);
    assert_eq!(harness.player().gold, gold + goblin.gold);
    assert!(harness.game.current_location().unwrap().enemies.is_empty());
    assert!(harness.saw("The area is now clear. You can continue exploring."));
    assert!(harness.player().find_item("health potion").is_some());
}

#[test]
fn test_counter_attack_reports_hp() {
    let mut harness = TestHarness::started();
    harness.input("go forest");
    let lines = harness.input("attack");
    assert_output(&lines, "💥 The Goblin attacks you for 1 damage!");
    assert_output(&lines, "Goblin HP: 17/25");
    assert_output(&lines, "Your HP: 99/100");
}

// =============================================================================
// TEST 2: Damage floor
// =============================================================================

#[test]
fn test_heavy_armor_still_takes_one() {
    let mut harness = TestHarness::started();
    harness.player_mut().defense = 500;
    harness.input("go forest");
    harness.input("attack");
    assert_hp(&harness, 99, 100);
}

#[test]
fn test_weak_hero_still_deals_one() {
    let mut harness = TestHarness::started();
    harness.player_mut().strength = 0;
    harness.input("go forest");
    let lines = harness.input("attack");
    assert_output(&lines, "You attack the Goblin for 1 damage!");
}

// =============================================================================
// TEST 3: Level up
// =============================================================================

#[test]
fn test_level_up_on_kill() {
    let mut harness = TestHarness::started();
    harness.player_mut().xp = 95;
    harness.input("go forest");
    while harness.state() == GameState::Combat {
        harness.input("attack");
    }

    let player = harness.player();
    assert_eq!(player.level, 2);
    assert_eq!(player.xp, 10);
    assert_eq!(player.xp_to_next, 150);
    assert_eq!((player.hp, player.max_hp), (120, 120));
    assert_eq!(player.skill_points, 1);
    assert!(harness.saw("LEVEL UP!"));
}

#[test]
fn test_level_up_at_exact_threshold() {
    let mut harness = TestHarness::started();
    harness.player_mut().xp = 85;
    harness.input("go forest");
    while harness.state() == GameState::Combat {
        harness.input("attack");
    }

    let player = harness.player();
    assert_eq!(player.level, 2);
    assert_eq!(player.xp, 0);
    assert_eq!((player.hp, player.max_hp), (120, 120));
    assert_eq!((player.mp, player.max_mp), (60, 60));
}

// =============================================================================
// TEST 4: Spells and abilities
// =============================================================================

#[test]
fn test_cast_fireball_spends_mana() {
    let mut harness = TestHarness::started();
    let fireball = get_spell("fireball").unwrap();
    harness.player_mut().spells.push(fireball);
    harness.input("go forest");

    let lines = harness.input("cast fire");
    assert_output(&lines, "🔮 You cast Fireball!");
    assert_output(&lines, "💥 Fireball deals 27 damage to Goblin!");
    assert_eq!(harness.player().mp, 40);
    assert_not_in_combat(&harness);
}

#[test]
fn test_cast_heal_adds_magic() {
    let mut harness = TestHarness::started();
    harness.player_mut().spells.push(get_spell("heal").unwrap());
    harness.player_mut().hp = 40;
    harness.input("go forest");

    let lines = harness.input("cast heal");
    assert_output(&lines, "✨ Heal heals you for 38 HP!");
    assert_output(&lines, "💥 The Goblin attacks you for 1 damage!");
    assert_hp(&harness, 77, 100);
    assert_eq!(harness.player().mp, 35);
    assert_in_combat(&harness);
}

#[test]
fn test_cast_heal_stops_at_max_hp() {
    let mut harness = TestHarness::started();
    harness.player_mut().spells.push(get_spell("heal").unwrap());
    harness.player_mut().hp = 95;
    harness.input("go forest");

    // Full heal to 100, then the goblin's 1 damage counter.
    let lines = harness.input("cast heal");
    assert_output(&lines, "Your HP: 99/100");
    assert_hp(&harness, 99, 100);
}

#[test]
fn test_cast_unknown_and_starved_of_mana() {
    let mut harness = TestHarness::started();
    harness.player_mut().spells.push(get_spell("fireball").unwrap());
    harness.input("go forest");

    let lines = harness.input("cast frost");
    assert_output(&lines, "You don't know the spell \"frost\".");

    harness.player_mut().mp = 3;
    let lines = harness.input("cast fireball");
    assert_output(&lines, "Not enough MP to cast Fireball. You need 10 MP.");
    assert_in_combat(&harness);
}

#[test]
fn test_berserker_trades_defense() {
    let mut harness = TestHarness::started();
    harness
        .player_mut()
        .abilities
        .push(get_ability("berserker_rage").unwrap());

    let lines = harness.input("ability berserker");
    assert_output(&lines, "🔥 You enter berserker rage!");
    assert_eq!(harness.player().strength, 20);
    assert_eq!(harness.player().defense, 0);
}

#[test]
fn test_unknown_ability() {
    let mut harness = TestHarness::started();
    let lines = harness.input("ability fly");
    assert_output(&lines, "You don't have the ability \"fly\".");
}

// =============================================================================
// TEST 5: Survival
// =============================================================================

#[test]
fn test_starvation_ends_run() {
    let mut harness = TestHarness::started();
    harness.player_mut().hunger = 5;

    let mut waits = 0;
    while harness.state() != GameState::Dead {
        harness.input("wait");
        waits += 1;
        assert!(waits < 10, "never starved");
    }

    assert!(harness.saw("💀 You starve to death!"));
    let (title, _) = harness.game.display().game_over_notice().unwrap();
    assert_eq!(title, "Game Over");

    for verb in ["look", "attack", "start", "load"] {
        let lines = harness.input(verb);
        assert_output(
            &lines,
            "You have died. Type 'restart' to begin a new adventure.",
        );
    }
    assert_state(&harness, GameState::Dead);
}

#[test]
fn test_restart_after_death() {
    let mut harness = TestHarness::started();
    harness.player_mut().hunger = 1;
    harness.input("wait");
    assert_state(&harness, GameState::Dead);

    harness.input("restart");
    assert_state(&harness, GameState::Menu);
    assert_hp(&harness, 100, 100);
    assert_eq!(harness.player().hunger, 100);

    harness.input("start");
    assert_state(&harness, GameState::Playing);
}

#[test]
fn test_poison_ticks_on_wait() {
    let mut harness = TestHarness::started();
    harness
        .player_mut()
        .status_effects
        .push(StatusEffect::new(StatusKind::Poison, 2, 4));

    let lines = harness.input("wait");
    assert_output(&lines, "☠️ You take 4 poison damage!");
    assert_hp(&harness, 96, 100);

    let lines = harness.input("wait");
    assert_output(&lines, "Poison wears off.");
    assert!(harness.player().status_effects.is_empty());
}

#[test]
fn test_cursed_potion_poisons() {
    let mut harness = TestHarness::started();
    let potion = get_item("health_potion").unwrap().cursed(true);
    harness.player_mut().inventory.push(potion);

    let lines = harness.input("use health");
    assert_output(&lines, "is cursed!");
    let player = harness.player();
    assert!(player.cursed_items.contains("health_potion"));
    assert!(player
        .status_effects
        .iter()
        .any(|e| e.kind == StatusKind::Poison));
}

#[test]
fn test_hunger_drops_every_third_turn() {
    let mut harness = TestHarness::started();
    harness.input("go forest");
    harness.input("attack");
    assert_eq!(harness.player().hunger, 100);
    harness.input("attack");
    assert_eq!(harness.player().turns, 3);
    assert_eq!(harness.player().hunger, 99);
}
