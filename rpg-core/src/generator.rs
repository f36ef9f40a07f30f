//! Procedural dungeon generation.
//!
//! Every level is a pure function of the generator state: the same seed and
//! the same sequence of requests produce identical locations, enemies and
//! loot. The draw order below is part of that contract, so reordering any
//! `rng` call changes every world built from an existing seed.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::art::DUNGEON_PATTERNS;
use crate::rng::SeededRng;
use crate::spells::title_case;
use crate::world::{
    Element, Enemy, GameLocation, Item, ItemKind, PotionEffect, Spell, SpellKind,
};

/// Deepest level that still links to a level below it.
pub const MAX_LINKED_LEVEL: u32 = 10;

/// Every third level hosts a boss.
pub const BOSS_INTERVAL: u32 = 3;

// ============================================================================
// Tables
// ============================================================================

const DUNGEON_NAMES: [&str; 12] = [
    "Ancient Crypt",
    "Shadow Lair",
    "Crystal Caverns",
    "Bone Chamber",
    "Fire Pit",
    "Ice Cave",
    "Thunder Hall",
    "Earth Depths",
    "Dark Sanctum",
    "Mystic Vault",
    "Demon Den",
    "Spirit Tomb",
];

const DUNGEON_DESCRIPTIONS: [&str; 8] = [
    "A dark and foreboding dungeon filled with ancient magic.",
    "Echoes of forgotten battles resonate through these halls.",
    "Strange crystals glow with otherworldly light.",
    "The air is thick with the stench of death and decay.",
    "Flaming torches cast dancing shadows on the walls.",
    "Ice formations create a beautiful but deadly maze.",
    "Lightning crackles through the air in this chamber.",
    "The very earth seems to pulse with power here.",
];

struct EnemyTemplate {
    name: &'static str,
    hp: i32,
    damage: i32,
    defense: i32,
    magic_resist: i32,
    speed: i32,
    glyph: &'static str,
    spells: &'static [&'static str],
}

const ENEMY_TEMPLATES: [EnemyTemplate; 5] = [
    EnemyTemplate {
        name: "Goblin",
        hp: 20,
        damage: 5,
        defense: 2,
        magic_resist: 1,
        speed: 12,
        glyph: "👹",
        spells: &[],
    },
    EnemyTemplate {
        name: "Orc",
        hp: 35,
        damage: 10,
        defense: 4,
        magic_resist: 2,
        speed: 8,
        glyph: "🧌",
        spells: &[],
    },
    EnemyTemplate {
        name: "Skeleton",
        hp: 25,
        damage: 8,
        defense: 3,
        magic_resist: 3,
        speed: 10,
        glyph: "💀",
        spells: &[],
    },
    EnemyTemplate {
        name: "Dark Wizard",
        hp: 30,
        damage: 6,
        defense: 2,
        magic_resist: 8,
        speed: 9,
        glyph: "🧙",
        spells: &["fireball", "dark_blast"],
    },
    EnemyTemplate {
        name: "Shadow Beast",
        hp: 40,
        damage: 12,
        defense: 5,
        magic_resist: 6,
        speed: 11,
        glyph: "🐺",
        spells: &["dark_blast"],
    },
];

struct BossTemplate {
    name: &'static str,
    hp: i32,
    damage: i32,
    defense: i32,
    magic_resist: i32,
    speed: i32,
    glyph: &'static str,
    mechanics: [&'static str; 3],
}

const BOSS_TEMPLATES: [BossTemplate; 3] = [
    BossTemplate {
        name: "Ancient Dragon",
        hp: 150,
        damage: 25,
        defense: 15,
        magic_resist: 12,
        speed: 6,
        glyph: "🐉",
        mechanics: ["Fire Breath", "Tail Swipe", "Wing Buffet"],
    },
    BossTemplate {
        name: "Lich King",
        hp: 120,
        damage: 20,
        defense: 8,
        magic_resist: 15,
        speed: 7,
        glyph: "👑💀",
        mechanics: ["Necromancy", "Dark Ritual", "Soul Drain"],
    },
    BossTemplate {
        name: "Elemental Titan",
        hp: 200,
        damage: 30,
        defense: 20,
        magic_resist: 10,
        speed: 5,
        glyph: "🗿",
        mechanics: ["Elemental Shift", "Earthquake", "Meteor"],
    },
];

const WEAPON_PREFIXES: [&str; 8] = [
    "Rusty", "Iron", "Steel", "Silver", "Golden", "Mithril", "Dragon", "Enchanted",
];
const WEAPON_NAMES: [&str; 8] = [
    "Sword", "Axe", "Mace", "Dagger", "Staff", "Bow", "Spear", "Hammer",
];
const ARMOR_PREFIXES: [&str; 7] = [
    "Leather", "Chain", "Plate", "Scale", "Dragon", "Mithril", "Enchanted",
];
const ARMOR_NAMES: [&str; 6] = [
    "Helmet", "Chestplate", "Leggings", "Boots", "Gauntlets", "Shield",
];

const POTION_TABLE: [(&str, PotionEffect, i32); 5] = [
    ("Health Potion", PotionEffect::Heal, 30),
    ("Mana Potion", PotionEffect::Mana, 25),
    ("Greater Health Potion", PotionEffect::Heal, 60),
    ("Greater Mana Potion", PotionEffect::Mana, 50),
    ("Elixir of Life", PotionEffect::Both, 40),
];

#[derive(Clone, Copy)]
enum LootKind {
    Weapon,
    Armor,
    Potion,
}

const LOOT_KINDS: [LootKind; 3] = [LootKind::Weapon, LootKind::Armor, LootKind::Potion];

// ============================================================================
// Scaling
// ============================================================================

/// Stat multiplier for a dungeon level: `1 + (level - 1) * 0.3`.
pub fn level_multiplier(level: u32) -> f64 {
    1.0 + (f64::from(level) - 1.0) * 0.3
}

/// Scale a base stat for `level`, rounding down.
pub fn scale_stat(base: i32, level: u32) -> i32 {
    (f64::from(base) * level_multiplier(level)).floor() as i32
}

/// Scale every combat stat except speed.
pub fn scale_enemy(mut enemy: Enemy, level: u32) -> Enemy {
    enemy.hp = scale_stat(enemy.hp, level);
    enemy.max_hp = scale_stat(enemy.max_hp, level);
    enemy.damage = scale_stat(enemy.damage, level);
    enemy.defense = scale_stat(enemy.defense, level);
    enemy.magic_resist = scale_stat(enemy.magic_resist, level);
    enemy.xp = scale_stat(enemy.xp, level);
    enemy.gold = scale_stat(enemy.gold, level);
    enemy
}

/// Whether a level hosts a boss.
pub fn has_boss(level: u32) -> bool {
    level % BOSS_INTERVAL == 0
}

fn slug(name: &str) -> String {
    name.to_lowercase().split_whitespace().collect::<Vec<_>>().join("_")
}

// ============================================================================
// Generator
// ============================================================================

/// Seeded builder for dungeon levels and bosses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProceduralGenerator {
    rng: SeededRng,
}

impl ProceduralGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SeededRng::new(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Build dungeon level `level` without its boss.
    ///
    /// Level 0 is treated as level 1.
    pub fn generate_dungeon(&mut self, level: u32) -> GameLocation {
        let level = level.max(1);

        let ascii = *self.rng.pick(&DUNGEON_PATTERNS);
        let name = *self.rng.pick(&DUNGEON_NAMES);
        let description = *self.rng.pick(&DUNGEON_DESCRIPTIONS);
        let enemies = self.generate_enemies(level);
        let items = self.generate_loot(level);

        let mut exits = vec!["tavern".to_string()];
        if level < MAX_LINKED_LEVEL {
            exits.push(format!("dungeon_{}", level + 1));
        }

        debug!(
            level,
            enemies = enemies.len(),
            loot = items.len(),
            "generated dungeon level"
        );

        GameLocation {
            name: format!("{name} - Level {level}"),
            description: format!("{description} You are on dungeon level {level}."),
            ascii: ascii.to_string(),
            enemies,
            items,
            exits,
            is_dungeon: true,
            dungeon_level: Some(level),
            has_boss: has_boss(level),
            explored: false,
        }
    }

    /// Build a level and, when it is a boss level, append its boss.
    pub fn generate_level(&mut self, level: u32) -> GameLocation {
        let mut location = self.generate_dungeon(level);
        if location.has_boss {
            let boss = self.generate_boss(level);
            debug!(level, boss = %boss.name, "boss placed");
            location.enemies.push(boss);
        }
        location
    }

    /// Build a scaled boss for `level`.
    pub fn generate_boss(&mut self, level: u32) -> Enemy {
        let level = level.max(1);
        let template = self.rng.pick(&BOSS_TEMPLATES);
        let boss = Enemy {
            name: template.name.to_string(),
            hp: template.hp,
            max_hp: template.hp,
            damage: template.damage,
            defense: template.defense,
            magic_resist: template.magic_resist,
            speed: template.speed,
            xp: level as i32 * 50,
            gold: level as i32 * 30,
            ascii: template.glyph.to_string(),
            drops: Vec::new(),
            spells: Vec::new(),
            is_boss: true,
            boss_mechanics: template.mechanics.iter().map(|m| m.to_string()).collect(),
            level,
        };
        scale_enemy(boss, level)
    }

    fn generate_enemies(&mut self, level: u32) -> Vec<Enemy> {
        let max_count = (level as i64 / 2 + 1).min(3);
        let count = self.rng.range(1, max_count);
        (0..count)
            .map(|_| {
                let enemy = self.generate_enemy(level);
                scale_enemy(enemy, level)
            })
            .collect()
    }

    fn generate_enemy(&mut self, level: u32) -> Enemy {
        let template = self.rng.pick(&ENEMY_TEMPLATES);
        let xp = level as i32 * 10 + self.rng.range(5, 15) as i32;
        let gold = level as i32 * 5 + self.rng.range(2, 8) as i32;
        let spells = template
            .spells
            .iter()
            .map(|id| Spell {
                id: id.to_string(),
                name: title_case(id),
                description: format!("A {id} spell"),
                cost: 10,
                damage: Some(15),
                healing: None,
                kind: SpellKind::Offensive,
                element: *self.rng.pick(&Element::ALL),
            })
            .collect();

        Enemy {
            name: template.name.to_string(),
            hp: template.hp,
            max_hp: template.hp,
            damage: template.damage,
            defense: template.defense,
            magic_resist: template.magic_resist,
            speed: template.speed,
            xp,
            gold,
            ascii: template.glyph.to_string(),
            drops: Vec::new(),
            spells,
            is_boss: false,
            boss_mechanics: Vec::new(),
            level,
        }
    }

    fn generate_loot(&mut self, level: u32) -> Vec<Item> {
        let count = self.rng.range(0, 2);
        (0..count)
            .map(|_| match *self.rng.pick(&LOOT_KINDS) {
                LootKind::Weapon => self.generate_weapon(level),
                LootKind::Armor => self.generate_armor(level),
                LootKind::Potion => self.generate_potion(),
            })
            .collect()
    }

    fn generate_weapon(&mut self, level: u32) -> Item {
        let prefix = *self.rng.pick(&WEAPON_PREFIXES);
        let base = *self.rng.pick(&WEAPON_NAMES);
        let name = format!("{prefix} {base}");
        let damage = 8 + level as i32 * 3 + self.rng.range(-2, 4) as i32;
        let cursed = self.rng.chance(10);

        Item::new(
            slug(&name),
            name.clone(),
            format!("A {} that deals {damage} damage.", name.to_lowercase()),
            ItemKind::Weapon {
                damage,
                magic_damage: None,
            },
        )
        .with_value(damage * 5)
        .unidentified()
        .cursed(cursed)
    }

    fn generate_armor(&mut self, level: u32) -> Item {
        let prefix = *self.rng.pick(&ARMOR_PREFIXES);
        let base = *self.rng.pick(&ARMOR_NAMES);
        let name = format!("{prefix} {base}");
        let defense = 3 + level as i32 * 2 + self.rng.range(-1, 3) as i32;
        let cursed = self.rng.chance(10);

        Item::new(
            slug(&name),
            name.clone(),
            format!("A {} that provides {defense} defense.", name.to_lowercase()),
            ItemKind::Armor {
                defense,
                magic_defense: None,
            },
        )
        .with_value(defense * 8)
        .unidentified()
        .cursed(cursed)
    }

    fn generate_potion(&mut self) -> Item {
        let (name, effect, amount) = *self.rng.pick(&POTION_TABLE);
        let cursed = self.rng.chance(20);
        let restores = match effect {
            PotionEffect::Both => "HP and MP",
            PotionEffect::Heal => "HP",
            PotionEffect::Mana => "MP",
        };

        Item::new(
            slug(name),
            name,
            format!("A {} that restores {amount} {restores}.", name.to_lowercase()),
            ItemKind::Potion { effect, amount },
        )
        .with_value(amount * 2)
        .unidentified()
        .cursed(cursed)
        .stack(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_level() {
        let mut a = ProceduralGenerator::new(1234);
        let mut b = ProceduralGenerator::new(1234);
        for level in 1..=6 {
            assert_eq!(a.generate_level(level), b.generate_level(level));
        }
    }

    #[test]
    fn test_level_shape() {
        let mut generator = ProceduralGenerator::new(7);
        let loc = generator.generate_dungeon(4);
        assert!(loc.name.ends_with(" - Level 4"));
        assert!(loc.description.ends_with("You are on dungeon level 4."));
        assert_eq!(loc.exits, vec!["tavern", "dungeon_5"]);
        assert!(loc.is_dungeon);
        assert_eq!(loc.dungeon_level, Some(4));
        assert!(!loc.explored);
        assert!((1..=3).contains(&loc.enemies.len()));
        assert!(loc.items.len() <= 2);
    }

    #[test]
    fn test_level_one_has_single_enemy() {
        let mut generator = ProceduralGenerator::new(99);
        for _ in 0..20 {
            assert_eq!(generator.generate_dungeon(1).enemies.len(), 1);
        }
    }

    #[test]
    fn test_level_ten_has_no_deeper_exit() {
        let mut generator = ProceduralGenerator::new(3);
        assert_eq!(generator.generate_dungeon(10).exits, vec!["tavern"]);
        assert_eq!(generator.generate_dungeon(9).exits, vec!["tavern", "dungeon_10"]);
    }

    #[test]
    fn test_level_zero_clamped() {
        let mut generator = ProceduralGenerator::new(3);
        assert_eq!(generator.generate_dungeon(0).dungeon_level, Some(1));
    }

    #[test]
    fn test_boss_only_on_third_levels() {
        let mut generator = ProceduralGenerator::new(11);
        let three = generator.generate_level(3);
        assert!(three.has_boss);
        assert!(three.enemies.last().is_some_and(|e| e.is_boss));

        let four = generator.generate_level(4);
        assert!(!four.has_boss);
        assert!(four.enemies.iter().all(|e| !e.is_boss));
    }

    #[test]
    fn test_scaling() {
        assert_eq!(scale_stat(20, 1), 20);
        assert_eq!(scale_stat(20, 2), 26);
        assert_eq!(scale_stat(35, 3), 56);
        assert_eq!(level_multiplier(1), 1.0);
    }

    #[test]
    fn test_boss_rewards() {
        let mut generator = ProceduralGenerator::new(5);
        let boss = generator.generate_boss(3);
        assert!(boss.is_boss);
        assert_eq!(boss.xp, scale_stat(150, 3));
        assert_eq!(boss.gold, scale_stat(90, 3));
        assert_eq!(boss.boss_mechanics.len(), 3);
    }

    #[test]
    fn test_speed_not_scaled() {
        let mut generator = ProceduralGenerator::new(5);
        let loc = generator.generate_dungeon(8);
        for enemy in &loc.enemies {
            let template = ENEMY_TEMPLATES.iter().find(|t| t.name == enemy.name).unwrap();
            assert_eq!(enemy.speed, template.speed);
        }
    }

    #[test]
    fn test_generated_items_unidentified() {
        let mut generator = ProceduralGenerator::new(21);
        for level in 1..30 {
            for item in generator.generate_dungeon(level).items {
                assert!(!item.identified);
                assert!(item.value > 0);
            }
        }
    }
}
