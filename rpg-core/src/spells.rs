//! Spell and ability database.

use crate::world::{Ability, AbilityEffect, Element, Spell, SpellKind};

/// Look up a known spell by id.
pub fn get_spell(id: &str) -> Option<Spell> {
    SPELLS.iter().find(|s| s.id == id).cloned()
}

/// Look up an ability by id.
pub fn get_ability(id: &str) -> Option<Ability> {
    ABILITIES.iter().find(|a| a.id == id).cloned()
}

/// Abilities a player of `level` may learn, in table order.
pub fn abilities_for_level(level: u32) -> impl Iterator<Item = &'static Ability> {
    ABILITIES.iter().filter(move |a| a.level <= level)
}

/// `"dark_blast"` -> `"Dark Blast"`.
pub fn title_case(id: &str) -> String {
    id.split('_')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn attack_spell(id: &str, name: &str, cost: i32, damage: i32, element: Element) -> Spell {
    Spell {
        id: id.to_string(),
        name: name.to_string(),
        description: format!("Deals {damage} {} damage.", element.name()),
        cost,
        damage: Some(damage),
        healing: None,
        kind: SpellKind::Offensive,
        element,
    }
}

fn ability(
    id: &str,
    name: &str,
    description: &str,
    cost: i32,
    cooldown: u32,
    effect: AbilityEffect,
    level: u32,
) -> Ability {
    Ability {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        cost,
        cooldown,
        current_cooldown: 0,
        effect,
        level,
    }
}

lazy_static::lazy_static! {
    pub static ref SPELLS: Vec<Spell> = vec![
        attack_spell("fireball", "Fireball", 10, 20, Element::Fire),
        Spell {
            id: "heal".to_string(),
            name: "Heal".to_string(),
            description: "Restores 30 HP.".to_string(),
            cost: 15,
            damage: None,
            healing: Some(30),
            kind: SpellKind::Defensive,
            element: Element::Holy,
        },
        attack_spell("lightning_bolt", "Lightning Bolt", 12, 25, Element::Lightning),
        attack_spell("ice_shard", "Ice Shard", 8, 15, Element::Ice),
        attack_spell("earth_spike", "Earth Spike", 14, 22, Element::Earth),
        attack_spell("dark_blast", "Dark Blast", 16, 28, Element::Dark),
    ];

    pub static ref ABILITIES: Vec<Ability> = vec![
        ability(
            "power_strike",
            "Power Strike",
            "A devastating blow dealing double strength damage.",
            0,
            3,
            AbilityEffect::DamageMultiplier,
            1,
        ),
        ability(
            "magic_boost",
            "Magic Boost",
            "Permanently sharpens your magic by 5.",
            0,
            5,
            AbilityEffect::MagicBuff,
            1,
        ),
        ability(
            "dodge",
            "Dodge",
            "Prepare to evade the next attack.",
            0,
            4,
            AbilityEffect::EvasionBoost,
            1,
        ),
        ability(
            "berserker_rage",
            "Berserker Rage",
            "Trade 5 defense for 10 strength.",
            0,
            8,
            AbilityEffect::BerserkerMode,
            2,
        ),
    ];
}
