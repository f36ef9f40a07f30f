//! Combat and progression formulas.
//!
//! These are pure functions over numbers and the player record. The state
//! machine decides *when* they apply; this module decides *how much*.

use crate::world::{Player, StatusKind};

/// Minimum damage any successful hit deals.
pub const MIN_DAMAGE: i32 = 1;

/// Max HP gained per level.
pub const HP_PER_LEVEL: i32 = 20;
/// Max MP gained per level.
pub const MP_PER_LEVEL: i32 = 10;
/// Factor applied to the XP threshold after each level.
pub const XP_GROWTH: f64 = 1.5;

/// Player melee hit: `max(1, strength + weapon - defense)`.
pub fn physical_damage(strength: i32, weapon_damage: i32, defense: i32) -> i32 {
    (strength + weapon_damage - defense).max(MIN_DAMAGE)
}

/// Enemy counter-attack: `max(1, damage - defense - armor)`.
pub fn enemy_attack_damage(enemy_damage: i32, defense: i32, armor_defense: i32) -> i32 {
    (enemy_damage - defense - armor_defense).max(MIN_DAMAGE)
}

/// Offensive spell: `max(1, damage + magic - magic_resist)`.
pub fn spell_damage(damage: i32, magic: i32, magic_resist: i32) -> i32 {
    (damage + magic - magic_resist).max(MIN_DAMAGE)
}

/// Healing spell before clamping to max HP.
pub fn spell_healing(healing: i32, magic: i32) -> i32 {
    healing + magic
}

/// Power Strike: double strength, same floor as a normal hit.
pub fn power_strike_damage(strength: i32, weapon_damage: i32, defense: i32) -> i32 {
    (strength * 2 + weapon_damage - defense).max(MIN_DAMAGE)
}

/// Stats gained by a level-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUp {
    pub new_level: u32,
    pub max_hp: i32,
    pub max_mp: i32,
}

/// Apply at most one level-up if the player has enough XP.
///
/// Surplus XP carries over, but a single check never grants two levels.
pub fn check_level_up(player: &mut Player) -> Option<LevelUp> {
    if player.xp < player.xp_to_next {
        return None;
    }

    player.level += 1;
    player.xp -= player.xp_to_next;
    player.xp_to_next = (f64::from(player.xp_to_next) * XP_GROWTH).floor() as i32;

    player.max_hp += HP_PER_LEVEL;
    player.hp = player.max_hp;
    player.max_mp += MP_PER_LEVEL;
    player.mp = player.max_mp;

    player.strength += 2;
    player.defense += 1;
    player.magic += 1;

    Some(LevelUp {
        new_level: player.level,
        max_hp: player.max_hp,
        max_mp: player.max_mp,
    })
}

/// One status effect's contribution to a turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTick {
    pub name: String,
    pub kind: StatusKind,
    /// Negative for damage, positive for healing.
    pub hp_change: i32,
    pub expired: bool,
}

/// Advance every status effect by one turn and apply its HP change.
///
/// Freeze, paralyze, blessed and cursed only count down.
pub fn tick_status_effects(player: &mut Player) -> Vec<StatusTick> {
    let mut ticks = Vec::with_capacity(player.status_effects.len());

    for effect in &mut player.status_effects {
        effect.duration = effect.duration.saturating_sub(1);
        let hp_change = match effect.kind {
            StatusKind::Poison | StatusKind::Burn => -effect.magnitude,
            StatusKind::Regeneration => effect.magnitude,
            _ => 0,
        };
        ticks.push(StatusTick {
            name: effect.name.clone(),
            kind: effect.kind,
            hp_change,
            expired: effect.duration == 0,
        });
    }

    for tick in &ticks {
        if tick.hp_change < 0 {
            player.hp += tick.hp_change;
        } else if tick.hp_change > 0 {
            player.heal(tick.hp_change);
        }
    }

    player.status_effects.retain(|e| e.duration > 0);
    ticks
}
