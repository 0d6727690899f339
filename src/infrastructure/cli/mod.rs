//! Command line surface
//!
//! Usage errors are reported by clap (exit code 2). Command-level failures
//! come back as a message for stdout; they never change the exit code.

mod presenter;

use std::collections::BTreeMap;

use clap::{ArgGroup, Parser, Subcommand};

use crate::application::dto::{CharacterSheetDto, CharacterSummaryDto};
use crate::application::services::{CharacterService, CreateCharacterRequest};
use crate::domain::value_objects::AbilityKey;

pub use presenter::{format_list, format_sheet};

#[derive(Debug, Parser)]
#[command(
    name = "dnd-chargen",
    about = "Fifth-edition character generator",
    version,
    propagate_version = true
)]
pub struct Cli {
    /// Skip SRD API enrichment for this run
    #[arg(long, global = true)]
    pub offline: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create and save a new character
    Create(CreateArgs),

    /// Print a character sheet
    View {
        #[arg(long)]
        name: String,
    },

    /// List saved characters
    List,

    /// Set a character's level and recompute its sheet
    UpdateLevel {
        #[arg(long)]
        name: String,

        /// New level (1-20)
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=20))]
        level: u8,
    },

    /// Equip a weapon, armor or shield
    Equip(EquipArgs),

    /// Learn a spell (learned casters)
    LearnSpell {
        #[arg(long)]
        name: String,

        #[arg(long)]
        spell: String,
    },

    /// Prepare a spell (prepared casters)
    PrepareSpell {
        #[arg(long)]
        name: String,

        #[arg(long)]
        spell: String,
    },

    /// Delete a character
    Delete {
        #[arg(long)]
        name: String,
    },

    /// Serve read-only HTML character sheets
    Serve {
        /// Port to listen on (defaults to the configured port)
        #[arg(long)]
        port: Option<u16>,
    },
}

#[derive(Debug, clap::Args)]
pub struct CreateArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long, default_value = "Human")]
    pub race: String,

    #[arg(long, default_value = "Wizard")]
    pub class: String,

    #[arg(long, default_value = "Acolyte")]
    pub background: String,

    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=20))]
    pub level: u8,

    #[arg(long = "str", default_value_t = 10)]
    pub strength: i32,
    #[arg(long = "dex", default_value_t = 10)]
    pub dexterity: i32,
    #[arg(long = "con", default_value_t = 10)]
    pub constitution: i32,
    #[arg(long = "int", default_value_t = 10)]
    pub intelligence: i32,
    #[arg(long = "wis", default_value_t = 10)]
    pub wisdom: i32,
    #[arg(long = "cha", default_value_t = 10)]
    pub charisma: i32,

    /// Comma-separated skill proficiencies (e.g. Arcana,History)
    #[arg(long, value_delimiter = ',')]
    pub skills: Vec<String>,
}

impl From<CreateArgs> for CreateCharacterRequest {
    fn from(args: CreateArgs) -> Self {
        let scores = BTreeMap::from([
            (AbilityKey::Strength, args.strength),
            (AbilityKey::Dexterity, args.dexterity),
            (AbilityKey::Constitution, args.constitution),
            (AbilityKey::Intelligence, args.intelligence),
            (AbilityKey::Wisdom, args.wisdom),
            (AbilityKey::Charisma, args.charisma),
        ]);

        Self {
            name: args.name,
            race: args.race,
            class: args.class,
            background: args.background,
            level: args.level,
            scores,
            initial_skills: args
                .skills
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }
}

#[derive(Debug, clap::Args)]
#[command(group(ArgGroup::new("item").required(true).args(["weapon", "armor", "shield"])))]
pub struct EquipArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long, requires = "slot")]
    pub weapon: Option<String>,

    #[arg(long)]
    pub armor: Option<String>,

    #[arg(long)]
    pub shield: Option<String>,

    /// "main hand" or "off hand"; required with --weapon
    #[arg(long)]
    pub slot: Option<String>,
}

/// Run a character command and return what should be printed
pub async fn execute(service: &dyn CharacterService, command: Command) -> String {
    match command {
        Command::Create(args) => {
            let request = CreateCharacterRequest::from(args);
            match service.create_character(request).await {
                Ok(character) => format!("saved character {}", character.name),
                Err(e) => format!("Error creating character: {}", e),
            }
        }
        Command::View { name } => match service.get_character(&name).await {
            Ok(character) => format_sheet(&CharacterSheetDto::from(&character)),
            Err(e) if e.is_not_found() => format!("character \"{}\" not found", name),
            Err(e) => format!("Error loading character '{}': {}", name, e),
        },
        Command::List => match service.list_characters().await {
            Ok(characters) => {
                let summaries: Vec<CharacterSummaryDto> =
                    characters.iter().map(CharacterSummaryDto::from).collect();
                format_list(&summaries)
            }
            Err(e) => format!("Error listing characters: {}", e),
        },
        Command::UpdateLevel { name, level } => {
            match service.update_character_level(&name, level).await {
                Ok(_) => format!("Success! Character '{}' updated to Level {}.", name, level),
                Err(e) => format!("Error updating character '{}': {}", name, e),
            }
        }
        Command::Equip(args) => equip(service, args).await,
        Command::LearnSpell { name, spell } => match service.learn_spell(&name, &spell).await {
            Ok(_) => format!("Learned spell {}", spell),
            Err(e) => e.to_string(),
        },
        Command::PrepareSpell { name, spell } => {
            match service.prepare_spell(&name, &spell).await {
                Ok(_) => format!("Prepared spell {}", spell),
                Err(e) => e.to_string(),
            }
        }
        Command::Delete { name } => match service.delete_character(&name).await {
            Ok(()) => format!("deleted {}", name),
            Err(e) => format!("Error deleting character '{}': {}", name, e),
        },
        Command::Serve { .. } => "The serve command is handled by the binary".to_string(),
    }
}

async fn equip(service: &dyn CharacterService, args: EquipArgs) -> String {
    let (item_name, item_type, slot) = match (args.weapon, args.armor, args.shield) {
        (Some(weapon), _, _) => (weapon, "weapon", args.slot.unwrap_or_default().to_lowercase()),
        (None, Some(armor), _) => (armor, "armor", String::new()),
        (None, None, Some(shield)) => (shield, "shield", String::new()),
        (None, None, None) => {
            return "Error: Must specify one item type (--weapon, --armor or --shield).".to_string()
        }
    };

    match service.equip_item(&args.name, &item_name, item_type, &slot).await {
        Ok(_) if item_type == "weapon" => format!("Equipped weapon {} to {}", item_name, slot),
        Ok(_) => format!("Equipped {} {}", item_type, item_name),
        Err(e) => e.to_string(),
    }
}
