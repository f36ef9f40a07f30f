//! Text blocks shown to the player.
//!
//! Pure formatting over world data; the state machine decides when to
//! show them.

use crate::display::meter;
use crate::rules::{LevelUp, HP_PER_LEVEL, MP_PER_LEVEL};
use crate::world::{GameLocation, Player};

pub const SEPARATOR: &str = "══════════════════════════════════════════════════════════════";

pub const WELCOME: &str = r"
╔══════════════════════════════════════════════════════════════╗
║                  PROCEDURAL ROGUELIKE RPG                    ║
╠══════════════════════════════════════════════════════════════╣
║                                                              ║
║  Welcome to the ultimate roguelike RPG experience!           ║
║                                                              ║
║  Roguelike Features:                                         ║
║  • PERMADEATH - Death is permanent!                          ║
║  • Procedurally generated dungeons                           ║
║  • Hunger system - Eat or starve!                            ║
║  • Unknown items - Identify before using!                    ║
║  • Cursed items with negative effects                        ║
║  • Save/Load system                                          ║
║  • Status effects and magic                                  ║
║                                                              ║
║  Quick Start:                                                ║
║  • Type 'start' to begin                                     ║
║  • Type 'dive' to enter the dungeon                          ║
║  • Type 'help' for all commands                              ║
║                                                              ║
║  Your adventure awaits! Type 'start' to begin!               ║
║                                                              ║
╚══════════════════════════════════════════════════════════════╝";

pub const HELP: &str = "
📖 ROGUELIKE COMMANDS:
══════════════════════════════════════════════════════════════
Basic Commands:
• help - Show this help message
• start - Begin your adventure
• stats - View character statistics
• inventory - View your inventory
• look - Examine current location
• name <name> - Set your character's name
• wait - Wait and pass time (restores MP, applies hunger)

Movement & Exploration:
• go <location> - Travel to another location
• dive - Enter the procedural dungeon
• take <item> - Pick up an item from the ground

Combat:
• attack - Attack enemy (during combat)
• cast <spell> - Cast a spell during combat
• ability <ability> - Use a special ability

Magic & Abilities:
• spells - View your known spells
• abilities - View your abilities
• skills - View your progression

Items & Equipment:
• use <item> - Use a potion or item
• equip <item> - Equip weapon or armor
• identify <item> - Identify an unknown item
• eat <food> - Eat food to restore hunger
• wear <ring> - Wear a magical ring

Roguelike Features:
• save - Save your game
• load - Load a saved game
• quit - Quit and lose all progress
• restart - Start over after death
══════════════════════════════════════════════════════════════";

/// Full character sheet.
pub fn stats_sheet(player: &Player, location_name: &str) -> String {
    let effects = if player.status_effects.is_empty() {
        "None".to_string()
    } else {
        player
            .status_effects
            .iter()
            .map(|e| e.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!(
        "
📊 Character Statistics:
{SEPARATOR}
Name: {name}
Level: {level}
HP: {hp}/{max_hp} {hp_bar}
MP: {mp}/{max_mp} {mp_bar}
Hunger: {hunger}/{max_hunger} {hunger_bar}
XP: {xp}/{xp_to_next} {xp_bar}
Gold: {gold}
{SEPARATOR}
Strength: {strength}
Defense: {defense}
Magic: {magic}
Speed: {speed}
{SEPARATOR}
Floor: {floor}
Turns: {turns}
Dungeon Level: {dungeon_level}
{SEPARATOR}
Current Location: {location_name}
Current Weapon: {weapon}
Current Armor: {armor}
Status Effects: {effects}",
        name = player.name,
        level = player.level,
        hp = player.hp,
        max_hp = player.max_hp,
        hp_bar = meter(player.hp, player.max_hp),
        mp = player.mp,
        max_mp = player.max_mp,
        mp_bar = meter(player.mp, player.max_mp),
        hunger = player.hunger,
        max_hunger = player.max_hunger,
        hunger_bar = meter(player.hunger, player.max_hunger),
        xp = player.xp,
        xp_to_next = player.xp_to_next,
        xp_bar = meter(player.xp, player.xp_to_next),
        gold = player.gold,
        strength = player.strength,
        defense = player.defense,
        magic = player.magic,
        speed = player.speed,
        floor = player.floor,
        turns = player.turns,
        dungeon_level = player.dungeon_level,
        weapon = player.weapon.as_ref().map_or("None", |w| w.name.as_str()),
        armor = player.armor.as_ref().map_or("None", |a| a.name.as_str()),
    )
}

pub fn inventory_lines(player: &Player) -> Vec<String> {
    let mut lines = vec![format!(
        "\n🎒 Inventory:\n{SEPARATOR}\nGold: {}\n{SEPARATOR}",
        player.gold
    )];

    if player.inventory.is_empty() {
        lines.push("Your inventory is empty.".to_string());
    } else {
        for (index, item) in player.inventory.iter().enumerate() {
            let tag = if item.identified { "" } else { " [unidentified]" };
            lines.push(format!(
                "{}. {}{} - {} (Value: {} gold)",
                index + 1,
                item.display_name(),
                tag,
                item.description,
                item.value
            ));
        }
    }
    lines
}

const NO_SPELLS: &str =
    "You don't know any spells yet. Learn them from defeating enemies or finding spell books!";

pub fn spell_lines(player: &Player) -> Vec<String> {
    let mut lines = vec![format!("\n🔮 Known Spells:\n{SEPARATOR}")];
    if player.spells.is_empty() {
        lines.push(NO_SPELLS.to_string());
    } else {
        lines.extend(
            player
                .spells
                .iter()
                .map(|s| format!("{} ({} MP) - {}", s.name, s.cost, s.description)),
        );
    }
    lines
}

pub fn ability_lines(player: &Player) -> Vec<String> {
    let mut lines = vec![format!("\n⚡ Abilities:\n{SEPARATOR}")];
    if player.abilities.is_empty() {
        lines.push(
            "You don't have any abilities yet. Learn them from defeating bosses!".to_string(),
        );
    } else {
        for ability in &player.abilities {
            let cooldown = if ability.current_cooldown > 0 {
                format!(" (Cooldown: {})", ability.current_cooldown)
            } else {
                String::new()
            };
            lines.push(format!("{}{} - {}", ability.name, cooldown, ability.description));
        }
    }
    lines
}

pub fn skills_sheet(player: &Player) -> String {
    format!(
        "
🎯 Skills & Progression:
{SEPARATOR}
Skill Points: {}
Level: {}
Dungeon Level: {}
Bosses Defeated: {}

Available Skills:
• Power Strike - Devastating physical attack
• Magic Boost - Increase magical power
• Dodge - Increase evasion
• Berserker Rage - Enter rage mode (Level 2+)

Defeat bosses to learn new abilities.",
        player.skill_points,
        player.level,
        player.dungeon_level,
        if player.boss_defeated { "yes" } else { "none yet" },
    )
}

/// The blocks printed by `look`.
pub fn describe_location(location: &GameLocation) -> Vec<String> {
    let mut lines = vec![format!(
        "{}\n📍 {}\n{SEPARATOR}\n{}",
        location.ascii, location.name, location.description
    )];

    if !location.enemies.is_empty() {
        lines.push("\n⚠️  DANGER! Enemies detected:".to_string());
        for enemy in &location.enemies {
            let boss = if enemy.is_boss { " [BOSS]" } else { "" };
            lines.push(format!(
                "{} {}{} (HP: {}/{})",
                enemy.ascii, enemy.name, boss, enemy.hp, enemy.max_hp
            ));
        }
        lines.push("Type 'attack' to engage in combat!".to_string());
    }

    if !location.items.is_empty() {
        lines.push("\n🎒 Items found:".to_string());
        for item in &location.items {
            lines.push(format!("• {} - {}", item.name, item.description));
        }
        lines.push("Type 'take <item>' to pick up items!".to_string());
    }

    lines.push(format!(
        "\n🚪 Available exits: {}\nType 'go <location>' to travel.",
        location.exits.join(", ")
    ));
    lines
}

pub fn level_up_text(up: &LevelUp) -> String {
    format!(
        "
🎊 LEVEL UP! 🎊
You are now level {}!
+{HP_PER_LEVEL} HP, +{MP_PER_LEVEL} MP
+2 Strength, +1 Defense, +1 Magic
You feel stronger and more powerful!",
        up.new_level
    )
}

pub fn game_over_message(player: &Player) -> String {
    format!(
        "Your adventure has ended at level {}. You had {} gold and {} XP.",
        player.level, player.gold, player.xp
    )
}
