//! The game state machine.
//!
//! [`Game`] owns the world, the dungeon generator and the save store, and
//! turns each line of player input into state changes plus text for the
//! display. Input never fails: every problem becomes a message.

use tracing::{debug, info, warn};

use crate::command::{Command, CommandError};
use crate::config::GameConfig;
use crate::display::{GameDisplay, StatusLine};
use crate::generator::ProceduralGenerator;
use crate::locations::{starting_locations, START_LOCATION};
use crate::narration;
use crate::persist::{SaveData, SaveStore};
use crate::rng::SeededRng;
use crate::rules::{
    check_level_up, enemy_attack_damage, physical_damage, power_strike_damage, spell_damage,
    spell_healing, tick_status_effects,
};
use crate::spells::abilities_for_level;
use crate::world::{
    dungeon_key, parse_dungeon_key, AbilityEffect, GameLocation, GameState, Item, ItemKind,
    Player, PotionEffect, RingEffect, StatusEffect, StatusKind, World,
};

/// Offset separating the in-play random stream from the dungeon stream.
const PLAY_RNG_OFFSET: u64 = 7919;

/// Hunger drops by one on every turn divisible by this.
const HUNGER_INTERVAL: u32 = 3;

const WAIT_MANA: i32 = 5;
const WAIT_HUNGER: i32 = 2;

const CURSE_TURNS: u32 = 10;
const TAINT_TURNS: u32 = 5;
const TAINT_DAMAGE: i32 = 3;

const NOT_STARTED: &str = "The game hasn't started yet. Type 'start' to begin.";
const YOU_ARE_DEAD: &str = "You have died. Type 'restart' to begin a new adventure.";
const NO_SAVE: &str = "No save file found. Start a new game with 'start'.";
const CORRUPT_SAVE: &str = "❌ Failed to load save file. It may be corrupted.";

fn fresh_world(config: &GameConfig, seed: u64) -> World {
    World {
        player: Player::new(config.player_name.clone(), seed),
        current_location: START_LOCATION.to_string(),
        state: GameState::Menu,
        locations: starting_locations(),
    }
}

/// A running game bound to a display and a save store.
pub struct Game<D: GameDisplay> {
    config: GameConfig,
    seed: u64,
    world: World,
    generator: ProceduralGenerator,
    rng: SeededRng,
    display: D,
    store: Box<dyn SaveStore>,
}

impl<D: GameDisplay> Game<D> {
    /// Create a game in the menu state and show the welcome banner.
    pub fn new(config: GameConfig, display: D, store: Box<dyn SaveStore>) -> Self {
        let seed = config.resolve_seed();
        info!(seed, "new game");

        let mut game = Self {
            world: fresh_world(&config, seed),
            generator: ProceduralGenerator::new(seed),
            rng: SeededRng::new(seed.wrapping_add(PLAY_RNG_OFFSET)),
            config,
            seed,
            display,
            store,
        };
        game.say(narration::WELCOME);
        game.refresh_status();
        game
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// World seed; a restart replays the same dungeons.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn player(&self) -> &Player {
        &self.world.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.world.player
    }

    pub fn state(&self) -> GameState {
        self.world.state
    }

    pub fn current_location_key(&self) -> &str {
        &self.world.current_location
    }

    pub fn current_location(&self) -> Option<&GameLocation> {
        self.world.location()
    }

    pub fn location(&self, key: &str) -> Option<&GameLocation> {
        self.world.locations.get(key)
    }

    pub fn generator(&self) -> &ProceduralGenerator {
        &self.generator
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn store_mut(&mut self) -> &mut dyn SaveStore {
        self.store.as_mut()
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Handle one line of player input.
    pub fn execute(&mut self, input: &str) {
        let input = input.trim();
        if input.is_empty() {
            return;
        }

        self.say(format!("> {input}"));
        match Command::parse(input) {
            Ok(command) => self.run(command),
            Err(CommandError::Empty) => {}
            Err(err) => self.say(err.to_string()),
        }
        self.refresh_status();
    }

    /// Dispatch an already-parsed command.
    pub fn run(&mut self, command: Command) {
        match self.world.state {
            GameState::Dead if command != Command::Restart => {
                self.say(YOU_ARE_DEAD);
                return;
            }
            GameState::Menu if !command.allowed_in_menu() => {
                self.say(NOT_STARTED);
                return;
            }
            _ => {}
        }

        match command {
            Command::Help => self.say(narration::HELP),
            Command::Start => self.start(),
            Command::Stats => self.show_stats(),
            Command::Inventory => self.say_all(narration::inventory_lines(&self.world.player)),
            Command::Look => self.look(),
            Command::Go(destination) => self.travel(&destination),
            Command::Attack => self.attack(),
            Command::Use(item) => self.use_item(&item),
            Command::Equip(item) => self.equip(&item),
            Command::Name(name) => self.set_name(name),
            Command::Cast(spell) => self.cast(&spell),
            Command::Ability(ability) => self.use_ability(&ability),
            Command::Dive => self.dive(),
            Command::Spells => self.say_all(narration::spell_lines(&self.world.player)),
            Command::Abilities => self.say_all(narration::ability_lines(&self.world.player)),
            Command::Skills => self.say(narration::skills_sheet(&self.world.player)),
            Command::Take(item) => self.take(&item),
            Command::Identify(item) => self.identify(&item),
            Command::Eat(food) => self.eat(&food),
            Command::Wear(ring) => self.wear(&ring),
            Command::Wait => self.wait(),
            Command::Save => self.save(),
            Command::Load => self.load(),
            Command::Quit => self.quit(),
            Command::Restart => self.restart(),
        }
    }

    // =========================================================================
    // Output helpers
    // =========================================================================

    fn say(&mut self, text: impl AsRef<str>) {
        self.display.append(text.as_ref());
    }

    fn say_all(&mut self, lines: Vec<String>) {
        for line in lines {
            self.display.append(&line);
        }
    }

    fn refresh_status(&mut self) {
        let location = self
            .world
            .location()
            .map_or_else(|| self.world.current_location.clone(), |l| l.name.clone());
        let status = StatusLine::new(&self.world.player, location);
        self.display.set_status(&status);
    }

    fn set_state(&mut self, state: GameState) {
        if self.world.state != state {
            debug!(from = self.world.state.label(), to = state.label(), "state change");
            self.world.state = state;
        }
    }

    fn game_over(&mut self) {
        self.set_state(GameState::Dead);
        let message = narration::game_over_message(&self.world.player);
        info!(level = self.world.player.level, "game over");
        self.display.game_over("Game Over", &message);
        self.say("💀 Game Over. Type 'restart' to play again.");
    }

    // =========================================================================
    // World navigation
    // =========================================================================

    /// Return dungeon level `level`, generating and caching it on first use.
    pub fn ensure_dungeon(&mut self, level: u32) -> &GameLocation {
        let level = level.max(1);
        let key = dungeon_key(level);
        if !self.world.locations.contains_key(&key) {
            let location = self.generator.generate_level(level);
            self.world.locations.insert(key.clone(), location);
        }
        &self.world.locations[&key]
    }

    fn start(&mut self) {
        if self.world.state != GameState::Menu {
            self.say("Game is already running!");
            return;
        }
        self.set_state(GameState::Playing);
        self.refresh_status();
        self.look();
        self.say("\n🎮 Game started! You are now ready for adventure!");
    }

    fn show_stats(&mut self) {
        let location = self
            .world
            .location()
            .map_or("Unknown", |l| l.name.as_str());
        let sheet = narration::stats_sheet(&self.world.player, location);
        self.say(sheet);
    }

    fn look(&mut self) {
        let Some(location) = self.world.location_mut() else {
            let key = self.world.current_location.clone();
            self.say(format!("Unknown location: {key}"));
            return;
        };
        location.explored = true;
        let has_enemies = !location.enemies.is_empty();
        let lines = narration::describe_location(location);

        self.say_all(lines);
        if has_enemies {
            self.set_state(GameState::Combat);
        }
    }

    fn travel(&mut self, destination: &str) {
        let destination = destination.to_lowercase();
        let Some(here) = self.world.location() else {
            self.say(format!("Unknown location: {}", self.world.current_location));
            return;
        };

        if !here.exits.contains(&destination) {
            let exits = here.exits.join(", ");
            self.say(format!(
                "You can't go to {destination} from here. Available exits: {exits}"
            ));
            return;
        }

        if let Some(level) = parse_dungeon_key(&destination) {
            self.ensure_dungeon(level);
        }
        if !self.world.locations.contains_key(&destination) {
            self.say(format!("Unknown location: {destination}"));
            return;
        }

        self.world.current_location = destination.clone();
        self.set_state(GameState::Playing);
        self.refresh_status();
        self.say(format!("🚶 You travel to {destination}..."));
        self.look();
        self.end_turn();
    }

    fn dive(&mut self) {
        self.world.player.dungeon_level += 1;
        let level = self.world.player.dungeon_level;
        self.ensure_dungeon(level);

        self.world.current_location = dungeon_key(level);
        self.set_state(GameState::Playing);
        self.refresh_status();
        self.say(format!("🏰 You dive into dungeon level {level}!"));
        self.look();
        self.end_turn();
    }

    fn take(&mut self, query: &str) {
        let Some(location) = self.world.location_mut() else {
            return;
        };
        let Some(index) = location.items.iter().position(|i| i.matches(query)) else {
            self.say(format!("There's no {query} here."));
            return;
        };

        let item = location.items.remove(index);
        self.say(format!("📦 You pick up the {}.", item.name));
        self.world.player.inventory.push(item);
    }

    // =========================================================================
    // Combat
    // =========================================================================

    fn attack(&mut self) {
        let strength = self.world.player.strength;
        let weapon = self.world.player.weapon_damage();
        let Some(enemy) = self.world.combat_target_mut() else {
            self.say("There's nothing to attack here!");
            return;
        };

        let damage = physical_damage(strength, weapon, enemy.defense);
        enemy.hp -= damage;
        let name = enemy.name.clone();
        let defeated = enemy.is_dead();

        self.say(format!("⚔️  You attack the {name} for {damage} damage!"));
        self.resolve_exchange(defeated);
        self.end_turn();
    }

    fn cast(&mut self, query: &str) {
        if self.world.combat_target().is_none() {
            self.say("You can only cast spells during combat!");
            return;
        }

        let query_lower = query.to_lowercase();
        let Some(spell) = self
            .world
            .player
            .spells
            .iter()
            .find(|s| s.name.to_lowercase().contains(&query_lower))
            .cloned()
        else {
            self.say(format!("You don't know the spell \"{query}\"."));
            return;
        };

        if self.world.player.mp < spell.cost {
            self.say(format!(
                "Not enough MP to cast {}. You need {} MP.",
                spell.name, spell.cost
            ));
            return;
        }

        self.world.player.mp -= spell.cost;
        self.say(format!("🔮 You cast {}!", spell.name));

        let magic = self.world.player.magic;
        let mut defeated = false;
        if let Some(base) = spell.damage {
            if let Some(enemy) = self.world.combat_target_mut() {
                let damage = spell_damage(base, magic, enemy.magic_resist);
                enemy.hp -= damage;
                defeated = enemy.is_dead();
                let name = enemy.name.clone();
                self.say(format!("💥 {} deals {damage} damage to {name}!", spell.name));
            }
        }
        if let Some(base) = spell.healing {
            let healing = spell_healing(base, magic);
            self.world.player.heal(healing);
            self.say(format!("✨ {} heals you for {healing} HP!", spell.name));
        }

        self.resolve_exchange(defeated);
        self.end_turn();
    }

    fn use_ability(&mut self, query: &str) {
        let query_lower = query.to_lowercase();
        let Some(index) = self
            .world
            .player
            .abilities
            .iter()
            .position(|a| a.name.to_lowercase().contains(&query_lower))
        else {
            self.say(format!("You don't have the ability \"{query}\"."));
            return;
        };

        let player = &mut self.world.player;
        let ability = &player.abilities[index];
        if ability.current_cooldown > 0 {
            let message = format!(
                "{} is on cooldown for {} more turns.",
                ability.name, ability.current_cooldown
            );
            self.say(message);
            return;
        }
        if player.mp < ability.cost {
            let message = format!(
                "Not enough MP to use {}. You need {} MP.",
                ability.name, ability.cost
            );
            self.say(message);
            return;
        }

        player.mp -= ability.cost;
        let ability = &mut player.abilities[index];
        ability.current_cooldown = ability.cooldown;
        let (name, effect) = (ability.name.clone(), ability.effect);
        self.say(format!("⚡ You use {name}!"));

        match effect {
            AbilityEffect::DamageMultiplier => self.power_strike(),
            AbilityEffect::MagicBuff => {
                self.world.player.magic += 5;
                self.say("✨ Your magical power increases temporarily!");
            }
            AbilityEffect::EvasionBoost => self.say("💨 Your evasion increases!"),
            AbilityEffect::BerserkerMode => {
                self.world.player.strength += 10;
                self.world.player.defense -= 5;
                self.say("🔥 You enter berserker rage! Damage increased, defense decreased!");
            }
        }
    }

    fn power_strike(&mut self) {
        let strength = self.world.player.strength;
        let weapon = self.world.player.weapon_damage();
        let Some(enemy) = self.world.combat_target_mut() else {
            self.say("There is nothing here to strike.");
            return;
        };

        let damage = power_strike_damage(strength, weapon, enemy.defense);
        enemy.hp -= damage;
        let name = enemy.name.clone();
        let defeated = enemy.is_dead();

        self.say(format!("💥 Power Strike deals {damage} damage to {name}!"));
        if defeated {
            self.defeat_enemy();
        }
    }

    /// After the player's blow: either the target falls or it strikes back.
    fn resolve_exchange(&mut self, defeated: bool) {
        if defeated {
            self.defeat_enemy();
        } else {
            self.enemy_counter_attack();
        }
    }

    fn enemy_counter_attack(&mut self) {
        let defense = self.world.player.defense;
        let armor = self.world.player.armor_defense();
        let Some(enemy) = self.world.combat_target() else {
            return;
        };

        let damage = enemy_attack_damage(enemy.damage, defense, armor);
        let summary = format!("{} {} HP: {}/{}", enemy.ascii, enemy.name, enemy.hp, enemy.max_hp);
        let name = enemy.name.clone();

        self.world.player.hp -= damage;
        self.say(format!("💥 The {name} attacks you for {damage} damage!"));

        if self.world.player.is_dead() {
            self.game_over();
            return;
        }

        let player = &self.world.player;
        let status = format!("{summary}\nYour HP: {}/{}", player.hp, player.max_hp);
        self.say(status);
    }

    fn defeat_enemy(&mut self) {
        let Some(location) = self.world.location_mut() else {
            return;
        };
        if location.enemies.is_empty() {
            return;
        }
        let enemy = location.enemies.remove(0);
        let remaining = location.enemies.len();
        debug!(enemy = %enemy.name, remaining, "enemy defeated");

        self.say(format!("🎉 You defeated the {}!", enemy.name));

        let player = &mut self.world.player;
        player.xp += enemy.xp;
        player.gold += enemy.gold;
        self.say(format!("+{} XP, +{} gold", enemy.xp, enemy.gold));

        if let Some(up) = check_level_up(&mut self.world.player) {
            self.world.player.skill_points += 1;
            self.say(narration::level_up_text(&up));
        }

        for item in enemy.drops {
            self.say(format!("💎 {} dropped!", item.name));
            self.world.player.inventory.push(item);
        }

        if !enemy.spells.is_empty() {
            let spell = self.rng.pick(&enemy.spells).clone();
            let name = spell.name.clone();
            if self.world.player.learn_spell(spell) {
                self.say(format!("🔮 You learn the spell: {name}!"));
            }
        }

        if enemy.is_boss {
            self.world.player.boss_defeated = true;
            self.grant_boss_ability();
        }

        self.set_state(GameState::Playing);
        if remaining > 0 {
            self.say("More enemies lurk here. Type 'look' to face them.");
        } else {
            self.say("The area is now clear. You can continue exploring.");
        }
    }

    fn grant_boss_ability(&mut self) {
        let player = &self.world.player;
        let next = abilities_for_level(player.level)
            .find(|a| !player.knows_ability(&a.id))
            .cloned();
        if let Some(ability) = next {
            let name = ability.name.clone();
            self.world.player.learn_ability(ability);
            self.say(format!("⚡ You learn the ability: {name}!"));
        }
    }

    // =========================================================================
    // Items
    // =========================================================================

    fn use_item(&mut self, query: &str) {
        let player = &mut self.world.player;
        let Some(index) = player.find_item(query) else {
            self.say(format!("You don't have a {query}."));
            return;
        };

        let ItemKind::Potion { effect, amount } = player.inventory[index].kind else {
            let name = player.inventory[index].name.clone();
            self.say(format!("You can't use the {name} right now."));
            return;
        };

        let Some(potion) = player.consume_one(index) else {
            return;
        };
        let message = match effect {
            PotionEffect::Heal => {
                let healed = player.heal(amount);
                format!("🧪 You drink the {} and restore {healed} HP!", potion.name)
            }
            PotionEffect::Mana => {
                let restored = player.restore_mana(amount);
                format!("🧪 You drink the {} and restore {restored} MP!", potion.name)
            }
            PotionEffect::Both => {
                let healed = player.heal(amount);
                let restored = player.restore_mana(amount);
                format!(
                    "🧪 You drink the {} and restore {healed} HP and {restored} MP!",
                    potion.name
                )
            }
        };
        self.say(message);

        if potion.cursed {
            self.afflict_curse(&potion);
            self.world
                .player
                .status_effects
                .push(StatusEffect::new(StatusKind::Poison, TAINT_TURNS, TAINT_DAMAGE));
            self.say(format!("☠️ The {} was tainted. You are poisoned!", potion.name));
        }
    }

    fn equip(&mut self, query: &str) {
        let player = &mut self.world.player;
        let Some(index) = player.find_item(query) else {
            self.say(format!("You don't have a {query}."));
            return;
        };

        let is_weapon = match player.inventory[index].kind {
            ItemKind::Weapon { .. } => true,
            ItemKind::Armor { .. } => false,
            _ => {
                let name = player.inventory[index].name.clone();
                self.say(format!("You can't equip the {name}."));
                return;
            }
        };

        let item = player.inventory.remove(index);
        let cursed = item.cursed.then(|| item.clone());
        let (icon, slot) = if is_weapon {
            ("⚔️", &mut player.weapon)
        } else {
            ("🛡️", &mut player.armor)
        };
        let message = format!("{icon}  You equip the {}!", item.name);
        if let Some(old) = slot.replace(item) {
            player.inventory.push(old);
        }
        self.say(message);

        if let Some(item) = cursed {
            self.afflict_curse(&item);
        }
    }

    fn identify(&mut self, query: &str) {
        let player = &mut self.world.player;
        let Some(target) = player.find_item(query) else {
            self.say(format!("You don't have a {query}."));
            return;
        };
        if player.inventory[target].identified {
            let name = player.inventory[target].name.clone();
            self.say(format!("{name} is already identified."));
            return;
        }

        let scroll = player.inventory.iter().enumerate().position(|(i, item)| {
            i != target
                && matches!(item.kind, ItemKind::Scroll { .. })
                && item.name.to_lowercase().contains("identify")
        });
        let Some(scroll) = scroll else {
            self.say("You need a Scroll of Identify to identify unknown items.");
            return;
        };

        let item = &mut player.inventory[target];
        item.identified = true;
        let mut message = format!("🔍 You identify the {}: {}", item.name, item.description);
        if item.cursed {
            message.push_str(" ⚠️ It is cursed!");
        }
        let id = item.id.clone();
        player.identified_items.insert(id);
        player.consume_one(scroll);
        self.say(message);
    }

    fn eat(&mut self, query: &str) {
        let player = &mut self.world.player;
        let found = player.inventory.iter().enumerate().find_map(|(i, item)| match item.kind {
            ItemKind::Food {
                hunger_restore,
                hp_restore,
            } if item.matches(query) => Some((i, hunger_restore, hp_restore)),
            _ => None,
        });
        let Some((index, hunger_restore, hp_restore)) = found else {
            self.say(format!("You don't have {query} to eat."));
            return;
        };

        player.hunger = (player.hunger + hunger_restore).min(player.max_hunger);
        let name = player.inventory[index].name.clone();
        let message = match hp_restore {
            Some(hp) => {
                player.heal(hp);
                format!("🍎 You eat the {name} and restore {hunger_restore} hunger and {hp} HP!")
            }
            None => format!("🍎 You eat the {name} and restore {hunger_restore} hunger!"),
        };
        player.consume_one(index);
        self.say(message);
    }

    fn wear(&mut self, query: &str) {
        let player = &mut self.world.player;
        let found = player.inventory.iter().position(|item| {
            matches!(item.kind, ItemKind::Ring { .. }) && item.matches(query)
        });
        let Some(index) = found else {
            self.say(format!("You don't have a {query} to wear."));
            return;
        };
        if !player.inventory[index].identified {
            self.say("You can't wear an unidentified ring. Identify it first!");
            return;
        }

        let ring = player.inventory.remove(index);
        let ItemKind::Ring { effect, magnitude } = ring.kind else {
            return;
        };
        let message = match effect {
            RingEffect::Strength => {
                player.strength += magnitude;
                format!("💪 You wear the {}! Strength increased by {magnitude}.", ring.name)
            }
            RingEffect::Defense => {
                player.defense += magnitude;
                format!("🛡️ You wear the {}! Defense increased by {magnitude}.", ring.name)
            }
            RingEffect::Magic => {
                player.magic += magnitude;
                format!("✨ You wear the {}! Magic increased by {magnitude}.", ring.name)
            }
            RingEffect::Speed => {
                player.speed += magnitude;
                format!("💨 You wear the {}! Speed increased by {magnitude}.", ring.name)
            }
            RingEffect::Hunger => {
                player.max_hunger += magnitude * 10;
                format!("🍞 You wear the {}! Hunger capacity increased.", ring.name)
            }
        };
        self.say(message);

        if ring.cursed {
            self.afflict_curse(&ring);
        }
    }

    /// Record a cursed item and mark the player.
    fn afflict_curse(&mut self, item: &Item) {
        let player = &mut self.world.player;
        player.cursed_items.insert(item.id.clone());
        player.identified_items.insert(item.id.clone());
        match player
            .status_effects
            .iter_mut()
            .find(|e| e.kind == StatusKind::Cursed)
        {
            Some(existing) => existing.duration = existing.duration.max(CURSE_TURNS),
            None => player
                .status_effects
                .push(StatusEffect::new(StatusKind::Cursed, CURSE_TURNS, 1)),
        }
        self.say(format!(
            "😈 The {} is cursed! A dark presence clings to you.",
            item.name
        ));
    }

    fn set_name(&mut self, name: String) {
        self.say(format!("Your name is now {name}."));
        self.world.player.name = name;
    }

    // =========================================================================
    // Time
    // =========================================================================

    fn tick_cooldowns(&mut self) {
        for ability in &mut self.world.player.abilities {
            ability.current_cooldown = ability.current_cooldown.saturating_sub(1);
        }
    }

    /// Advance one turn after a travel or combat action.
    fn end_turn(&mut self) {
        if self.world.state == GameState::Dead {
            return;
        }

        self.world.player.turns += 1;
        self.tick_cooldowns();

        if self.world.player.turns % HUNGER_INTERVAL == 0 {
            let player = &mut self.world.player;
            player.hunger = (player.hunger - 1).max(0);
            if player.hunger == 0 {
                self.starve();
                return;
            }
        }

        self.process_status_effects();
    }

    fn wait(&mut self) {
        let player = &mut self.world.player;
        player.turns += 1;
        player.restore_mana(WAIT_MANA);
        player.hunger = (player.hunger - WAIT_HUNGER).max(0);
        self.tick_cooldowns();

        self.process_status_effects();
        if self.world.state == GameState::Dead {
            return;
        }

        self.say("⏰ You wait... MP restored, hunger decreases.");
        if self.world.player.hunger <= 0 {
            self.starve();
        }
    }

    fn starve(&mut self) {
        self.say("💀 You starve to death!");
        self.game_over();
    }

    fn process_status_effects(&mut self) {
        let ticks = tick_status_effects(&mut self.world.player);
        for tick in ticks {
            match tick.kind {
                StatusKind::Poison => {
                    self.say(format!("☠️ You take {} poison damage!", -tick.hp_change))
                }
                StatusKind::Burn => {
                    self.say(format!("🔥 You take {} burn damage!", -tick.hp_change))
                }
                StatusKind::Regeneration => {
                    self.say(format!("✨ You regenerate {} HP!", tick.hp_change))
                }
                _ => {}
            }
            if tick.expired {
                self.say(format!("{} wears off.", tick.name));
            }
        }

        if self.world.player.is_dead() {
            self.game_over();
        }
    }

    // =========================================================================
    // Persistence and lifecycle
    // =========================================================================

    fn save(&mut self) {
        let data = SaveData::new(self.world.clone(), self.generator.clone(), self.rng.clone());
        let slot = self.config.save_slot.clone();
        let result = data
            .to_json()
            .and_then(|json| self.store.write(&slot, &json));

        match result {
            Ok(()) => {
                info!(slot = %slot, "game saved");
                self.say("💾 Game saved! Use 'load' to continue later.");
            }
            Err(e) => {
                warn!(slot = %slot, error = %e, "save failed");
                self.say(format!("❌ Failed to save game: {e}"));
            }
        }
    }

    fn load(&mut self) {
        let slot = self.config.save_slot.clone();
        let content = match self.store.read(&slot) {
            Ok(Some(content)) => content,
            Ok(None) => {
                self.say(NO_SAVE);
                return;
            }
            Err(e) => {
                warn!(slot = %slot, error = %e, "could not read save");
                self.say(CORRUPT_SAVE);
                return;
            }
        };

        let data = match SaveData::from_json(&content) {
            Ok(data) if data.world.locations.contains_key(&data.world.current_location) => data,
            Ok(_) => {
                warn!(slot = %slot, "save points at a missing location");
                self.say(CORRUPT_SAVE);
                return;
            }
            Err(e) => {
                warn!(slot = %slot, error = %e, "could not parse save");
                self.say(CORRUPT_SAVE);
                return;
            }
        };

        info!(slot = %slot, saved_at = data.timestamp, "game loaded");
        // The save may come from another seed; restarts replay the loaded world.
        self.seed = data.generator.seed();
        self.world = data.world;
        self.generator = data.generator;
        self.rng = data.rng;

        self.say("📂 Game loaded successfully!");
        self.refresh_status();
        self.look();
    }

    fn reset_world(&mut self) {
        self.world = fresh_world(&self.config, self.seed);
        self.generator = ProceduralGenerator::new(self.seed);
        self.rng = SeededRng::new(self.seed.wrapping_add(PLAY_RNG_OFFSET));
    }

    fn quit(&mut self) {
        self.say("🚪 You quit the game. All progress is lost!");
        self.say("Type 'start' to begin a new adventure.");
        self.reset_world();
    }

    fn restart(&mut self) {
        self.display.clear();
        self.reset_world();
        self.say(narration::WELCOME);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::Transcript;
    use crate::items::get_item;
    use crate::persist::MemoryStore;

    fn game() -> Game<Transcript> {
        Game::new(
            GameConfig::seeded(42),
            Transcript::new(),
            Box::new(MemoryStore::new()),
        )
    }

    fn started() -> Game<Transcript> {
        let mut game = game();
        game.execute("start");
        game
    }

    #[test]
    fn test_new_game_shows_welcome_in_menu() {
        let game = game();
        assert_eq!(game.state(), GameState::Menu);
        assert!(game.display().contains("PROCEDURAL ROGUELIKE RPG"));
        assert_eq!(game.current_location_key(), "tavern");
        assert!(game.display().status().is_some());
    }

    #[test]
    fn test_menu_rejects_play_commands() {
        let mut game = game();
        game.execute("attack");
        assert_eq!(game.display().last(), Some(NOT_STARTED));
        assert_eq!(game.state(), GameState::Menu);
    }

    #[test]
    fn test_start_twice() {
        let mut game = started();
        assert_eq!(game.state(), GameState::Playing);
        game.execute("start");
        assert_eq!(game.display().last(), Some("Game is already running!"));
    }

    #[test]
    fn test_input_is_echoed() {
        let mut game = started();
        game.execute("  stats  ");
        assert!(game.display().contains("> stats"));
    }

    #[test]
    fn test_blank_input_is_ignored() {
        let mut game = started();
        let before = game.display().len();
        game.execute("   ");
        assert_eq!(game.display().len(), before);
    }

    #[test]
    fn test_travel_to_forest_enters_combat() {
        let mut game = started();
        game.execute("go forest");
        assert_eq!(game.current_location_key(), "forest");
        assert_eq!(game.state(), GameState::Combat);
        assert_eq!(game.player().turns, 1);
    }

    #[test]
    fn test_travel_rejects_missing_exit() {
        let mut game = started();
        game.execute("go cave");
        assert_eq!(
            game.display().last(),
            Some("You can't go to cave from here. Available exits: forest, dungeon")
        );
        assert_eq!(game.current_location_key(), "tavern");
    }

    #[test]
    fn test_attack_without_enemy() {
        let mut game = started();
        game.execute("attack");
        assert_eq!(game.display().last(), Some("There's nothing to attack here!"));
    }

    #[test]
    fn test_attack_goblin_counter() {
        let mut game = started();
        game.execute("go forest");
        game.execute("attack");
        let goblin = &game.current_location().unwrap().enemies[0];
        assert_eq!(goblin.hp, 25 - 8);
        assert_eq!(game.player().hp, 99);
        assert!(game.display().contains("⚔️  You attack the Goblin for 8 damage!"));
        assert!(game.display().contains("💥 The Goblin attacks you for 1 damage!"));
    }

    #[test]
    fn test_defeat_clears_combat() {
        let mut game = started();
        game.execute("go forest");
        for _ in 0..4 {
            game.execute("attack");
        }
        assert_eq!(game.state(), GameState::Playing);
        assert!(game.current_location().unwrap().enemies.is_empty());
        assert_eq!(game.player().xp, 15);
        assert_eq!(game.player().gold, 10);
        assert!(game.display().contains("🎉 You defeated the Goblin!"));
    }

    #[test]
    fn test_cast_outside_combat() {
        let mut game = started();
        game.execute("cast fireball");
        assert_eq!(
            game.display().last(),
            Some("You can only cast spells during combat!")
        );
    }

    #[test]
    fn test_use_potion_clamps_and_consumes() {
        let mut game = started();
        game.player_mut().hp = 80;
        game.player_mut()
            .inventory
            .push(get_item("health_potion").unwrap().stack(2));
        game.execute("use health");
        assert_eq!(game.player().hp, 100);
        assert_eq!(game.player().inventory[0].quantity, Some(1));
        assert!(game
            .display()
            .contains("🧪 You drink the Health Potion and restore 20 HP!"));
    }

    #[test]
    fn test_equip_swaps_weapon() {
        let mut game = started();
        let player = game.player_mut();
        player.inventory.push(get_item("rusty_sword").unwrap());
        player.inventory.push(get_item("iron_sword").unwrap());
        game.execute("equip rusty");
        game.execute("equip iron");
        let player = game.player();
        assert_eq!(player.weapon.as_ref().unwrap().id, "iron_sword");
        assert_eq!(player.inventory.len(), 1);
        assert_eq!(player.inventory[0].id, "rusty_sword");
    }

    #[test]
    fn test_equip_cursed_marks_player() {
        let mut game = started();
        let sword = get_item("rusty_sword").unwrap().cursed(true);
        game.player_mut().inventory.push(sword);
        game.execute("equip rusty");
        let player = game.player();
        assert!(player.cursed_items.contains("rusty_sword"));
        assert!(player
            .status_effects
            .iter()
            .any(|e| e.kind == StatusKind::Cursed));
    }

    #[test]
    fn test_ability_cooldown() {
        let mut game = started();
        let strike = crate::spells::get_ability("power_strike").unwrap();
        game.player_mut().abilities.push(strike);
        game.execute("go forest");
        game.execute("ability power");
        assert_eq!(game.player().abilities[0].current_cooldown, 3);
        game.execute("ability power");
        assert_eq!(
            game.display().last(),
            Some("Power Strike is on cooldown for 3 more turns.")
        );
        game.execute("wait");
        assert_eq!(game.player().abilities[0].current_cooldown, 2);
    }

    #[test]
    fn test_dive_generates_once() {
        let mut game = started();
        game.execute("dive");
        assert_eq!(game.current_location_key(), "dungeon_1");
        let first = game.location("dungeon_1").cloned();
        game.ensure_dungeon(1);
        assert_eq!(game.location("dungeon_1").cloned(), first);
    }

    #[test]
    fn test_ensure_dungeon_clamps_zero() {
        let mut game = started();
        let name = game.ensure_dungeon(0).name.clone();
        assert_eq!(game.location("dungeon_1").unwrap().name, name);
        assert!(game.location("dungeon_0").is_none());
    }

    #[test]
    fn test_wait_restores_mana_and_hunger_cost() {
        let mut game = started();
        game.player_mut().mp = 10;
        game.execute("wait");
        assert_eq!(game.player().mp, 15);
        assert_eq!(game.player().hunger, 98);
        assert_eq!(game.player().turns, 1);
    }

    #[test]
    fn test_starvation_kills() {
        let mut game = started();
        game.player_mut().hunger = 2;
        game.execute("wait");
        assert_eq!(game.state(), GameState::Dead);
        assert!(game.display().contains("💀 You starve to death!"));
        assert!(game.display().game_over_notice().is_some());

        game.execute("look");
        assert_eq!(game.display().last(), Some(YOU_ARE_DEAD));
    }

    #[test]
    fn test_restart_resets_world() {
        let mut game = started();
        game.execute("go forest");
        game.player_mut().hp = 0;
        game.execute("wait");
        assert_eq!(game.state(), GameState::Dead);

        game.execute("restart");
        assert_eq!(game.state(), GameState::Menu);
        assert_eq!(game.player().hp, 100);
        assert_eq!(game.current_location_key(), "tavern");
        assert!(game.display().game_over_notice().is_none());
        assert!(game.display().contains("PROCEDURAL ROGUELIKE RPG"));
    }

    #[test]
    fn test_quit_returns_to_menu() {
        let mut game = started();
        game.execute("name Ayla");
        game.execute("quit");
        assert_eq!(game.state(), GameState::Menu);
        assert_eq!(game.player().name, "Adventurer");
    }

    #[test]
    fn test_save_then_load_restores_world() {
        let mut game = started();
        game.execute("go forest");
        game.execute("attack");
        game.execute("save");
        let saved = game.world().clone();

        game.execute("go tavern");
        game.player_mut().gold = 999;
        game.execute("load");
        assert_eq!(game.player().gold, saved.player.gold);
        assert_eq!(game.current_location_key(), "forest");
        assert!(game.display().contains("📂 Game loaded successfully!"));
    }

    #[test]
    fn test_load_without_save() {
        let mut game = game();
        game.execute("load");
        assert_eq!(game.display().last(), Some(NO_SAVE));
    }

    #[test]
    fn test_corrupt_save_leaves_state() {
        let mut game = started();
        let slot = game.config().save_slot.clone();
        game.store_mut().write(&slot, "{ not json").unwrap();
        let before = game.world().clone();
        game.execute("load");
        assert_eq!(game.display().last(), Some(CORRUPT_SAVE));
        assert_eq!(game.world(), &before);
    }
}
