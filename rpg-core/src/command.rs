//! Command parsing.
//!
//! A line of input is a verb followed by an optional free-text argument.
//! The verb is matched case-insensitively; the argument keeps its case so
//! `name Thorin` stays `Thorin`.

use thiserror::Error;

/// A parsed player command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Start,
    Stats,
    Inventory,
    Look,
    Go(String),
    Attack,
    Use(String),
    Equip(String),
    Name(String),
    Cast(String),
    Ability(String),
    Dive,
    Spells,
    Abilities,
    Skills,
    Take(String),
    Identify(String),
    Eat(String),
    Wear(String),
    Wait,
    Save,
    Load,
    Quit,
    Restart,
}

/// Why a line could not be turned into a [`Command`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Please enter a command.")]
    Empty,

    #[error("Unknown command: {0}. Type 'help' for available commands.")]
    Unknown(String),

    #[error("{}", usage(.0))]
    MissingArgument(&'static str),
}

fn usage(verb: &str) -> &'static str {
    match verb {
        "go" => "Go where? Type 'go <location>' to travel.",
        "use" => "Use what? Type 'use <item>' to use an item.",
        "equip" => "Equip what? Type 'equip <item>' to equip an item.",
        "name" => "What name? Type 'name <your name>' to set your name.",
        "cast" => "Cast what? Type 'cast <spell>' to cast a spell.",
        "ability" => "Use which ability? Type 'ability <name>' to use an ability.",
        "take" => "Take what? Type 'take <item>' to pick up an item.",
        "identify" => "Identify what? Type 'identify <item>' to identify an item.",
        "eat" => "Eat what? Type 'eat <food>' to eat something.",
        "wear" => "Wear what? Type 'wear <ring>' to put on a ring.",
        _ => "That command needs an argument.",
    }
}

impl Command {
    /// Parse one line of player input.
    pub fn parse(input: &str) -> Result<Command, CommandError> {
        let mut words = input.split_whitespace();
        let verb = words.next().ok_or(CommandError::Empty)?.to_lowercase();
        let argument = words.collect::<Vec<_>>().join(" ");

        let needs = |verb: &'static str, build: fn(String) -> Command| {
            if argument.is_empty() {
                Err(CommandError::MissingArgument(verb))
            } else {
                Ok(build(argument.clone()))
            }
        };

        match verb.as_str() {
            "help" => Ok(Command::Help),
            "start" => Ok(Command::Start),
            "stats" => Ok(Command::Stats),
            "inventory" => Ok(Command::Inventory),
            "look" => Ok(Command::Look),
            "go" => needs("go", Command::Go),
            "attack" => Ok(Command::Attack),
            "use" => needs("use", Command::Use),
            "equip" => needs("equip", Command::Equip),
            "name" => needs("name", Command::Name),
            "cast" => needs("cast", Command::Cast),
            "ability" => needs("ability", Command::Ability),
            "dive" => Ok(Command::Dive),
            "spells" => Ok(Command::Spells),
            "abilities" => Ok(Command::Abilities),
            "skills" => Ok(Command::Skills),
            "take" => needs("take", Command::Take),
            "identify" => needs("identify", Command::Identify),
            "eat" => needs("eat", Command::Eat),
            "wear" => needs("wear", Command::Wear),
            "wait" => Ok(Command::Wait),
            "save" => Ok(Command::Save),
            "load" => Ok(Command::Load),
            "quit" => Ok(Command::Quit),
            "restart" => Ok(Command::Restart),
            _ => Err(CommandError::Unknown(verb)),
        }
    }

    /// Verbs that may run before the game has started.
    pub fn allowed_in_menu(&self) -> bool {
        matches!(
            self,
            Command::Help
                | Command::Start
                | Command::Name(_)
                | Command::Load
                | Command::Quit
                | Command::Restart
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_verbs() {
        assert_eq!(Command::parse("look"), Ok(Command::Look));
        assert_eq!(Command::parse("  ATTACK  "), Ok(Command::Attack));
        assert_eq!(Command::parse("Wait"), Ok(Command::Wait));
    }

    #[test]
    fn test_argument_rejoined() {
        assert_eq!(
            Command::parse("use   health    potion"),
            Ok(Command::Use("health potion".to_string()))
        );
        assert_eq!(
            Command::parse("cast fireball"),
            Ok(Command::Cast("fireball".to_string()))
        );
    }

    #[test]
    fn test_argument_keeps_case() {
        assert_eq!(
            Command::parse("NAME Thorin Oakenshield"),
            Ok(Command::Name("Thorin Oakenshield".to_string()))
        );
    }

    #[test]
    fn test_missing_argument() {
        let err = Command::parse("go").unwrap_err();
        assert_eq!(err, CommandError::MissingArgument("go"));
        assert_eq!(err.to_string(), "Go where? Type 'go <location>' to travel.");
    }

    #[test]
    fn test_unknown_verb() {
        let err = Command::parse("dance wildly").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unknown command: dance. Type 'help' for available commands."
        );
    }

    #[test]
    fn test_empty() {
        assert_eq!(Command::parse("   "), Err(CommandError::Empty));
    }

    #[test]
    fn test_menu_gate() {
        assert!(Command::Start.allowed_in_menu());
        assert!(Command::Name("x".into()).allowed_in_menu());
        assert!(!Command::Attack.allowed_in_menu());
        assert!(!Command::Go("forest".into()).allowed_in_menu());
    }
}
