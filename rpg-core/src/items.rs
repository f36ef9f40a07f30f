//! Standard item database.
//!
//! Fixed weapons, armor, potions, food, scrolls and rings that are placed
//! in the static world. Generated loot is built by the generator instead.

use crate::world::{Item, ItemKind, PotionEffect, RingEffect};

/// Get a standard item by id (`"iron_sword"`) or name (`"Iron Sword"`).
pub fn get_item(key: &str) -> Option<Item> {
    let key_lower = key.to_lowercase();
    all_items()
        .find(|item| item.id == key_lower || item.name.to_lowercase() == key_lower)
        .cloned()
}

/// Get a standard item by id, panicking on a typo in the tables.
///
/// Only used to assemble the fixed world, whose ids are constants.
pub(crate) fn standard(id: &str) -> Item {
    match get_item(id) {
        Some(item) => item,
        None => panic!("unknown standard item id: {id}"),
    }
}

fn all_items() -> impl Iterator<Item = &'static Item> {
    WEAPONS
        .iter()
        .chain(ARMORS.iter())
        .chain(POTIONS.iter())
        .chain(FOODS.iter())
        .chain(SCROLLS.iter())
        .chain(RINGS.iter())
}

fn weapon(id: &str, name: &str, damage: i32, magic_damage: Option<i32>, value: i32) -> Item {
    let description = match magic_damage {
        Some(magic) => format!(
            "A {} dealing {damage} damage and {magic} magic damage.",
            name.to_lowercase()
        ),
        None => format!("A {} dealing {damage} damage.", name.to_lowercase()),
    };
    Item::new(id, name, description, ItemKind::Weapon { damage, magic_damage }).with_value(value)
}

fn armor(id: &str, name: &str, defense: i32, value: i32) -> Item {
    Item::new(
        id,
        name,
        format!("{name} granting {defense} defense."),
        ItemKind::Armor {
            defense,
            magic_defense: None,
        },
    )
    .with_value(value)
}

fn ring(id: &str, name: &str, effect: RingEffect, magnitude: i32, value: i32) -> Item {
    Item::new(
        id,
        name,
        "A plain band humming with unknown magic.",
        ItemKind::Ring { effect, magnitude },
    )
    .with_value(value)
    .unidentified()
}

// ============================================================================
// Tables
// ============================================================================

lazy_static::lazy_static! {
    pub static ref WEAPONS: Vec<Item> = vec![
        weapon("rusty_sword", "Rusty Sword", 8, None, 50),
        weapon("iron_sword", "Iron Sword", 15, None, 150),
        weapon("magic_staff", "Magic Staff", 10, Some(15), 200),
    ];

    pub static ref ARMORS: Vec<Item> = vec![
        armor("leather_armor", "Leather Armor", 5, 100),
        armor("chain_mail", "Chain Mail", 12, 300),
    ];

    pub static ref POTIONS: Vec<Item> = vec![
        Item::new(
            "health_potion",
            "Health Potion",
            "Restores 50 HP.",
            ItemKind::Potion { effect: PotionEffect::Heal, amount: 50 },
        )
        .with_value(25)
        .stack(1),
        Item::new(
            "mana_potion",
            "Mana Potion",
            "Restores 30 MP.",
            ItemKind::Potion { effect: PotionEffect::Mana, amount: 30 },
        )
        .with_value(20)
        .stack(1),
    ];

    pub static ref FOODS: Vec<Item> = vec![
        Item::new(
            "bread",
            "Bread",
            "A crusty loaf. Restores 20 hunger.",
            ItemKind::Food { hunger_restore: 20, hp_restore: None },
        )
        .with_value(5)
        .stack(1),
        Item::new(
            "apple",
            "Apple",
            "A crisp apple. Restores 10 hunger and 5 HP.",
            ItemKind::Food { hunger_restore: 10, hp_restore: Some(5) },
        )
        .with_value(3)
        .stack(1),
        Item::new(
            "ration",
            "Ration",
            "Dried travel food. Restores 40 hunger.",
            ItemKind::Food { hunger_restore: 40, hp_restore: None },
        )
        .with_value(10)
        .stack(1),
    ];

    pub static ref SCROLLS: Vec<Item> = vec![
        Item::new(
            "scroll_identify",
            "Scroll of Identify",
            "Reveals the true nature of an item.",
            ItemKind::Scroll { spell: None },
        )
        .with_value(50)
        .unidentified(),
        Item::new(
            "scroll_enchant",
            "Scroll of Enchant Weapon",
            "Strengthens a weapon.",
            ItemKind::Scroll { spell: None },
        )
        .with_value(100)
        .unidentified(),
    ];

    pub static ref RINGS: Vec<Item> = vec![
        ring("ring_strength", "Ring of Strength", RingEffect::Strength, 3, 200),
        ring("ring_defense", "Ring of Protection", RingEffect::Defense, 3, 200),
        ring("ring_hunger", "Ring of Sustenance", RingEffect::Hunger, 2, 150),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_item_by_id_and_name() {
        let by_id = get_item("iron_sword").unwrap();
        let by_name = get_item("iron sword").unwrap();
        assert_eq!(by_id, by_name);
        assert_eq!(by_id.damage(), 15);
    }

    #[test]
    fn test_magic_staff_has_magic_damage() {
        let staff = get_item("magic_staff").unwrap();
        assert_eq!(
            staff.kind,
            ItemKind::Weapon {
                damage: 10,
                magic_damage: Some(15)
            }
        );
    }

    #[test]
    fn test_rings_start_unidentified() {
        assert!(RINGS.iter().all(|r| !r.identified));
    }

    #[test]
    fn test_unknown_item() {
        assert!(get_item("vorpal_blade").is_none());
    }
}
