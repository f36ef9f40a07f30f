//! The fixed overworld: tavern, forest, dungeon and cave.

use std::collections::BTreeMap;

use crate::art;
use crate::items::standard;
use crate::world::{Enemy, GameLocation, Item};

/// Key of the location a new game starts in.
pub const START_LOCATION: &str = "tavern";

/// Build the four static locations with their resident enemies.
pub fn starting_locations() -> BTreeMap<String, GameLocation> {
    let mut locations = BTreeMap::new();

    locations.insert(
        "tavern".to_string(),
        location(
            "The Rusty Anchor Tavern",
            "A cozy tavern with a warm fire. The bartender nods at you from behind the counter.",
            art::TAVERN,
            vec![
                standard("health_potion"),
                standard("bread"),
                standard("scroll_identify"),
            ],
            &["forest", "dungeon"],
        ),
    );

    let mut forest = location(
        "Dark Forest",
        "A mysterious forest filled with shadows and danger. Strange sounds echo from within.",
        art::FOREST,
        vec![standard("rusty_sword")],
        &["tavern", "cave"],
    );
    forest.enemies.push(goblin());
    locations.insert("forest".to_string(), forest);

    let mut dungeon = location(
        "Ancient Dungeon",
        "A dark, foreboding dungeon. The air is thick with ancient magic and danger.",
        art::DUNGEON_HALL,
        vec![standard("chain_mail")],
        &["tavern"],
    );
    dungeon.enemies.push(orc_warrior());
    locations.insert("dungeon".to_string(), dungeon);

    let mut cave = location(
        "Mysterious Cave",
        "A natural cave formation. Stalactites hang from the ceiling like fangs.",
        art::CAVE,
        vec![standard("magic_staff"), standard("ring_strength")],
        &["forest"],
    );
    cave.enemies.push(ancient_dragon());
    locations.insert("cave".to_string(), cave);

    locations
}

fn location(
    name: &str,
    description: &str,
    ascii: &str,
    items: Vec<Item>,
    exits: &[&str],
) -> GameLocation {
    GameLocation {
        name: name.to_string(),
        description: description.to_string(),
        ascii: ascii.to_string(),
        enemies: Vec::new(),
        items,
        exits: exits.iter().map(|e| e.to_string()).collect(),
        is_dungeon: false,
        dungeon_level: None,
        has_boss: false,
        explored: true,
    }
}

#[allow(clippy::too_many_arguments)]
fn resident(
    name: &str,
    hp: i32,
    damage: i32,
    defense: i32,
    magic_resist: i32,
    speed: i32,
    xp: i32,
    gold: i32,
    ascii: &str,
    level: u32,
) -> Enemy {
    Enemy {
        name: name.to_string(),
        hp,
        max_hp: hp,
        damage,
        defense,
        magic_resist,
        speed,
        xp,
        gold,
        ascii: ascii.to_string(),
        drops: Vec::new(),
        spells: Vec::new(),
        is_boss: false,
        boss_mechanics: Vec::new(),
        level,
    }
}

fn goblin() -> Enemy {
    let mut goblin = resident("Goblin", 25, 6, 2, 1, 12, 15, 10, "👹", 1);
    goblin.drops.push(standard("health_potion"));
    goblin
}

fn orc_warrior() -> Enemy {
    let mut orc = resident("Orc Warrior", 40, 12, 5, 3, 8, 25, 20, "🧌", 2);
    orc.drops.push(standard("iron_sword"));
    orc
}

fn ancient_dragon() -> Enemy {
    let mut dragon = resident("Ancient Dragon", 100, 20, 10, 12, 6, 100, 100, "🐉", 5);
    dragon.drops = vec![standard("chain_mail"), standard("mana_potion")];
    dragon.is_boss = true;
    dragon.boss_mechanics = vec![
        "Fire Breath".to_string(),
        "Tail Swipe".to_string(),
        "Wing Buffet".to_string(),
    ];
    dragon
}
