//! Core game world types.
//!
//! Everything the state machine mutates lives here: the player, the
//! location arena, enemies, items, spells and abilities.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

// ============================================================================
// Spells and Abilities
// ============================================================================

/// Magical element of a spell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Fire,
    Ice,
    Lightning,
    Earth,
    Holy,
    Dark,
}

impl Element {
    pub const ALL: [Element; 6] = [
        Element::Fire,
        Element::Ice,
        Element::Lightning,
        Element::Earth,
        Element::Holy,
        Element::Dark,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Element::Fire => "fire",
            Element::Ice => "ice",
            Element::Lightning => "lightning",
            Element::Earth => "earth",
            Element::Holy => "holy",
            Element::Dark => "dark",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpellKind {
    Offensive,
    Defensive,
    Utility,
}

/// A spell the player can cast, or an enemy can teach.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spell {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Mana cost.
    pub cost: i32,
    pub damage: Option<i32>,
    pub healing: Option<i32>,
    pub kind: SpellKind,
    pub element: Element,
}

/// What an ability does when activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbilityEffect {
    DamageMultiplier,
    MagicBuff,
    EvasionBoost,
    BerserkerMode,
}

/// A cooldown-gated special action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ability {
    pub id: String,
    pub name: String,
    pub description: String,
    pub cost: i32,
    pub cooldown: u32,
    pub current_cooldown: u32,
    pub effect: AbilityEffect,
    /// Minimum player level to learn it.
    pub level: u32,
}

// ============================================================================
// Status Effects
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Poison,
    Burn,
    Freeze,
    Paralyze,
    Regeneration,
    Blessed,
    Cursed,
}

/// A timed condition on the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Remaining turns.
    pub duration: u32,
    pub kind: StatusKind,
    pub magnitude: i32,
}

impl StatusEffect {
    pub fn new(kind: StatusKind, duration: u32, magnitude: i32) -> Self {
        let (id, name, description) = match kind {
            StatusKind::Poison => ("poison", "Poison", "Venom saps your health each turn."),
            StatusKind::Burn => ("burn", "Burn", "Flames sear you each turn."),
            StatusKind::Freeze => ("freeze", "Freeze", "Your limbs are stiff with frost."),
            StatusKind::Paralyze => ("paralyze", "Paralyze", "You can barely move."),
            StatusKind::Regeneration => {
                ("regeneration", "Regeneration", "Your wounds close on their own.")
            }
            StatusKind::Blessed => ("blessed", "Blessed", "A holy light watches over you."),
            StatusKind::Cursed => ("cursed", "Cursed", "A dark presence clings to you."),
        };
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            duration,
            kind,
            magnitude,
        }
    }
}

// ============================================================================
// Items
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PotionEffect {
    Heal,
    Mana,
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RingEffect {
    Strength,
    Defense,
    Magic,
    Speed,
    Hunger,
}

/// Type-specific item data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ItemKind {
    Weapon {
        damage: i32,
        magic_damage: Option<i32>,
    },
    Armor {
        defense: i32,
        magic_defense: Option<i32>,
    },
    Potion {
        effect: PotionEffect,
        amount: i32,
    },
    Food {
        hunger_restore: i32,
        hp_restore: Option<i32>,
    },
    Scroll {
        spell: Option<Spell>,
    },
    Ring {
        effect: RingEffect,
        magnitude: i32,
    },
    Misc,
}

impl ItemKind {
    pub fn label(&self) -> &'static str {
        match self {
            ItemKind::Weapon { .. } => "weapon",
            ItemKind::Armor { .. } => "armor",
            ItemKind::Potion { .. } => "potion",
            ItemKind::Food { .. } => "food",
            ItemKind::Scroll { .. } => "scroll",
            ItemKind::Ring { .. } => "ring",
            ItemKind::Misc => "misc",
        }
    }
}

/// Anything the player can carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub description: String,
    pub value: i32,
    pub identified: bool,
    pub cursed: bool,
    pub stackable: bool,
    pub quantity: Option<u32>,
    pub kind: ItemKind,
}

impl Item {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        kind: ItemKind,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            value: 0,
            identified: true,
            cursed: false,
            stackable: false,
            quantity: None,
            kind,
        }
    }

    pub fn with_value(mut self, value: i32) -> Self {
        self.value = value;
        self
    }

    pub fn unidentified(mut self) -> Self {
        self.identified = false;
        self
    }

    pub fn cursed(mut self, cursed: bool) -> Self {
        self.cursed = cursed;
        self
    }

    pub fn stack(mut self, quantity: u32) -> Self {
        self.stackable = true;
        self.quantity = Some(quantity);
        self
    }

    /// Case-insensitive substring match against the item name.
    pub fn matches(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.to_lowercase())
    }

    /// Weapon damage, zero for anything else.
    pub fn damage(&self) -> i32 {
        match self.kind {
            ItemKind::Weapon { damage, .. } => damage,
            _ => 0,
        }
    }

    /// Armor defense, zero for anything else.
    pub fn defense(&self) -> i32 {
        match self.kind {
            ItemKind::Armor { defense, .. } => defense,
            _ => 0,
        }
    }

    /// Display name with quantity suffix for stacks.
    pub fn display_name(&self) -> String {
        match self.quantity {
            Some(q) if self.stackable && q > 1 => format!("{} x{}", self.name, q),
            _ => self.name.clone(),
        }
    }
}

// ============================================================================
// Enemies and Locations
// ============================================================================

/// A hostile creature, regular or boss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub name: String,
    pub hp: i32,
    pub max_hp: i32,
    pub damage: i32,
    pub defense: i32,
    pub magic_resist: i32,
    pub speed: i32,
    pub xp: i32,
    pub gold: i32,
    /// Short glyph shown next to the name.
    pub ascii: String,
    pub drops: Vec<Item>,
    pub spells: Vec<Spell>,
    pub is_boss: bool,
    pub boss_mechanics: Vec<String>,
    pub level: u32,
}

impl Enemy {
    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }
}

/// A node in the world graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameLocation {
    pub name: String,
    pub description: String,
    pub ascii: String,
    pub enemies: Vec<Enemy>,
    pub items: Vec<Item>,
    /// Keys of reachable locations.
    pub exits: Vec<String>,
    pub is_dungeon: bool,
    pub dungeon_level: Option<u32>,
    pub has_boss: bool,
    pub explored: bool,
}

/// Key under which a generated dungeon level is stored.
pub fn dungeon_key(level: u32) -> String {
    format!("dungeon_{level}")
}

/// Inverse of [`dungeon_key`]. The static `dungeon` location is not a level.
pub fn parse_dungeon_key(key: &str) -> Option<u32> {
    key.strip_prefix("dungeon_")?.parse().ok()
}

// ============================================================================
// Player
// ============================================================================

/// The player character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub level: u32,
    pub hp: i32,
    pub max_hp: i32,
    pub mp: i32,
    pub max_mp: i32,
    pub xp: i32,
    pub xp_to_next: i32,
    pub strength: i32,
    pub defense: i32,
    pub magic: i32,
    pub speed: i32,
    pub gold: i32,
    pub inventory: Vec<Item>,
    pub weapon: Option<Item>,
    pub armor: Option<Item>,
    pub spells: Vec<Spell>,
    pub abilities: Vec<Ability>,
    pub skill_points: u32,
    pub dungeon_level: u32,
    pub boss_defeated: bool,
    pub hunger: i32,
    pub max_hunger: i32,
    pub turns: u32,
    pub floor: u32,
    pub status_effects: Vec<StatusEffect>,
    pub identified_items: BTreeSet<String>,
    pub cursed_items: BTreeSet<String>,
    pub game_seed: u64,
}

impl Player {
    pub fn new(name: impl Into<String>, game_seed: u64) -> Self {
        Self {
            name: name.into(),
            level: 1,
            hp: 100,
            max_hp: 100,
            mp: 50,
            max_mp: 50,
            xp: 0,
            xp_to_next: 100,
            strength: 10,
            defense: 5,
            magic: 8,
            speed: 10,
            gold: 0,
            inventory: Vec::new(),
            weapon: None,
            armor: None,
            spells: Vec::new(),
            abilities: Vec::new(),
            skill_points: 0,
            dungeon_level: 0,
            boss_defeated: false,
            hunger: 100,
            max_hunger: 100,
            turns: 0,
            floor: 1,
            status_effects: Vec::new(),
            identified_items: BTreeSet::new(),
            cursed_items: BTreeSet::new(),
            game_seed,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }

    pub fn weapon_damage(&self) -> i32 {
        self.weapon.as_ref().map_or(0, Item::damage)
    }

    pub fn armor_defense(&self) -> i32 {
        self.armor.as_ref().map_or(0, Item::defense)
    }

    /// Heal up to max HP. Returns the amount actually restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.hp;
        self.hp = (self.hp + amount).min(self.max_hp);
        self.hp - before
    }

    /// Restore mana up to max MP. Returns the amount actually restored.
    pub fn restore_mana(&mut self, amount: i32) -> i32 {
        let before = self.mp;
        self.mp = (self.mp + amount).min(self.max_mp);
        self.mp - before
    }

    /// Index of the first inventory item whose name contains `query`.
    pub fn find_item(&self, query: &str) -> Option<usize> {
        self.inventory.iter().position(|item| item.matches(query))
    }

    /// Remove one unit of the item at `index`, dropping the slot when empty.
    pub fn consume_one(&mut self, index: usize) -> Option<Item> {
        let item = self.inventory.get_mut(index)?;
        match item.quantity {
            Some(q) if q > 1 => {
                item.quantity = Some(q - 1);
                let mut taken = item.clone();
                taken.quantity = Some(1);
                Some(taken)
            }
            _ => Some(self.inventory.remove(index)),
        }
    }

    pub fn knows_spell(&self, id: &str) -> bool {
        self.spells.iter().any(|s| s.id == id)
    }

    /// Learn a spell unless it is already known.
    pub fn learn_spell(&mut self, spell: Spell) -> bool {
        if self.knows_spell(&spell.id) {
            return false;
        }
        self.spells.push(spell);
        true
    }

    pub fn knows_ability(&self, id: &str) -> bool {
        self.abilities.iter().any(|a| a.id == id)
    }

    /// Learn an ability unless it is already known.
    pub fn learn_ability(&mut self, ability: Ability) -> bool {
        if self.knows_ability(&ability.id) {
            return false;
        }
        self.abilities.push(ability);
        true
    }
}

// ============================================================================
// Game State
// ============================================================================

/// Top-level mode of the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameState {
    #[default]
    Menu,
    Playing,
    Combat,
    Dead,
}

impl GameState {
    pub fn label(&self) -> &'static str {
        match self {
            GameState::Menu => "menu",
            GameState::Playing => "playing",
            GameState::Combat => "combat",
            GameState::Dead => "dead",
        }
    }
}

/// Everything that changes during play.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub player: Player,
    pub current_location: String,
    #[serde(rename = "game_state")]
    pub state: GameState,
    pub locations: BTreeMap<String, GameLocation>,
}

impl World {
    pub fn location(&self) -> Option<&GameLocation> {
        self.locations.get(&self.current_location)
    }

    pub fn location_mut(&mut self) -> Option<&mut GameLocation> {
        self.locations.get_mut(&self.current_location)
    }

    /// The enemy the player is fighting, if in combat.
    pub fn combat_target(&self) -> Option<&Enemy> {
        if self.state != GameState::Combat {
            return None;
        }
        self.location()?.enemies.first()
    }

    pub fn combat_target_mut(&mut self) -> Option<&mut Enemy> {
        if self.state != GameState::Combat {
            return None;
        }
        self.location_mut()?.enemies.first_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn potion(qty: u32) -> Item {
        Item::new(
            "health_potion",
            "Health Potion",
            "Restores 50 HP",
            ItemKind::Potion {
                effect: PotionEffect::Heal,
                amount: 50,
            },
        )
        .stack(qty)
    }

    #[test]
    fn test_new_player_defaults() {
        let player = Player::new("Adventurer", 7);
        assert_eq!(player.level, 1);
        assert_eq!((player.hp, player.max_hp), (100, 100));
        assert_eq!((player.mp, player.max_mp), (50, 50));
        assert_eq!(player.xp_to_next, 100);
        assert_eq!(player.hunger, 100);
        assert_eq!(player.dungeon_level, 0);
        assert!(player.inventory.is_empty());
    }

    #[test]
    fn test_heal_clamps() {
        let mut player = Player::new("A", 0);
        player.hp = 90;
        assert_eq!(player.heal(50), 10);
        assert_eq!(player.hp, 100);
    }

    #[test]
    fn test_item_matches_substring_case_insensitive() {
        let item = potion(1);
        assert!(item.matches("HEALTH"));
        assert!(item.matches("pot"));
        assert!(!item.matches("mana"));
    }

    #[test]
    fn test_consume_one_from_stack() {
        let mut player = Player::new("A", 0);
        player.inventory.push(potion(2));
        player.consume_one(0);
        assert_eq!(player.inventory[0].quantity, Some(1));
        player.consume_one(0);
        assert!(player.inventory.is_empty());
    }

    #[test]
    fn test_dungeon_keys() {
        assert_eq!(dungeon_key(4), "dungeon_4");
        assert_eq!(parse_dungeon_key("dungeon_12"), Some(12));
        assert_eq!(parse_dungeon_key("dungeon"), None);
        assert_eq!(parse_dungeon_key("forest"), None);
    }

    #[test]
    fn test_item_kind_serializes_with_tag() {
        let json = serde_json::to_value(potion(1)).unwrap();
        assert_eq!(json["kind"]["type"], "potion");
        assert_eq!(json["kind"]["effect"], "heal");
    }
}
