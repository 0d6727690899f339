//! Character Service - Application service for character management
//!
//! This service implements the use cases for creating, viewing, levelling,
//! equipping and spell management. Every mutation loads the character,
//! mutates it, runs the full derivation pass, enriches whatever it touched
//! and only then persists.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::application::ports::outbound::{
    CharacterRepositoryPort, EnrichmentPort, RepositoryError,
};
use crate::domain::catalog::SrdCatalog;
use crate::domain::entities::Character;
use crate::domain::error::DomainError;
use crate::domain::rules;
use crate::domain::value_objects::{
    normalize_spell_name, AbilityKey, CasterKind, Skill, WeaponSlot,
};

/// Request to create a new character
#[derive(Debug, Clone)]
pub struct CreateCharacterRequest {
    pub name: String,
    pub race: String,
    pub class: String,
    pub background: String,
    pub level: u8,
    pub scores: BTreeMap<AbilityKey, i32>,
    /// Class skill picks; the class defaults are used when empty
    pub initial_skills: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum CharacterServiceError {
    #[error("character name cannot be empty")]
    EmptyName,
    #[error("level must be between 1 and 20, got {0}")]
    InvalidLevel(u8),
    #[error("{ability} score must be between 1 and 30, got {score}")]
    InvalidScore { ability: AbilityKey, score: i32 },
    #[error("invalid item type: {0}. Must be 'weapon', 'armor', or 'shield'")]
    InvalidItemType(String),
    #[error("{kind} '{name}' not found in SRD data")]
    NotInCatalog { kind: &'static str, name: String },
    #[error("this class can't cast spells")]
    NotACaster,
    #[error("this class prepares spells and can't learn them")]
    CannotLearnPreparedCaster,
    #[error("this class learns spells and can't prepare them")]
    CannotPrepareLearnedCaster,
    #[error("character class '{class}' is not listed as a caster for spell '{spell}'")]
    SpellNotForClass { class: String, spell: String },
    #[error("character '{character}' already knows the spell '{spell}'")]
    AlreadyKnown { character: String, spell: String },
    #[error("spell '{0}' is already prepared")]
    AlreadyPrepared(String),
    #[error("the spell has higher level ({0}) than the available spell slots")]
    SpellLevelTooHigh(u8),
    #[error(
        "character '{character}' has reached the limit of {limit} prepared spells (Lvl {level} + {ability} Mod {modifier:+})"
    )]
    PreparationLimitReached {
        character: String,
        limit: i32,
        level: u8,
        ability: AbilityKey,
        modifier: i32,
    },
    #[error("class requires spellcasting ability {0}, but score is missing")]
    MissingCastingAbility(AbilityKey),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("operation cancelled")]
    Cancelled,
}

impl CharacterServiceError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Repository(RepositoryError::NotFound(_)) | Self::NotInCatalog { .. }
        )
    }
}

pub type ServiceResult<T> = Result<T, CharacterServiceError>;

/// Character service trait defining the application use cases
#[async_trait]
pub trait CharacterService: Send + Sync {
    /// Create and persist a new character
    async fn create_character(&self, request: CreateCharacterRequest) -> ServiceResult<Character>;

    /// Get a character by name with freshly derived statistics
    async fn get_character(&self, name: &str) -> ServiceResult<Character>;

    /// List all characters, sorted by name
    async fn list_characters(&self) -> ServiceResult<Vec<Character>>;

    /// Delete a character
    async fn delete_character(&self, name: &str) -> ServiceResult<()>;

    /// Set a new level and cascade it through every derived statistic
    async fn update_character_level(&self, name: &str, level: u8) -> ServiceResult<Character>;

    /// Equip a weapon, armor or shield from the SRD catalog
    async fn equip_item(
        &self,
        name: &str,
        item_name: &str,
        item_type: &str,
        slot: &str,
    ) -> ServiceResult<Character>;

    /// Add a spell to a learned caster's known spells
    async fn learn_spell(&self, name: &str, spell_name: &str) -> ServiceResult<Character>;

    /// Add a spell to a prepared caster's prepared spells
    async fn prepare_spell(&self, name: &str, spell_name: &str) -> ServiceResult<Character>;
}

/// Default implementation of CharacterService over the outbound ports
pub struct CharacterServiceImpl {
    repository: Arc<dyn CharacterRepositoryPort>,
    enrichment: Arc<dyn EnrichmentPort>,
    catalog: Arc<SrdCatalog>,
    cancel: CancellationToken,
}

impl CharacterServiceImpl {
    pub fn new(
        repository: Arc<dyn CharacterRepositoryPort>,
        enrichment: Arc<dyn EnrichmentPort>,
        catalog: Arc<SrdCatalog>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            repository,
            enrichment,
            catalog,
            cancel,
        }
    }

    fn validate_create_request(request: &CreateCharacterRequest) -> ServiceResult<()> {
        if request.name.trim().is_empty() {
            return Err(CharacterServiceError::EmptyName);
        }
        Self::validate_level(request.level)?;

        let allowed = rules::MIN_ABILITY_SCORE..=rules::MAX_ABILITY_SCORE;
        if let Some((&ability, &score)) = request
            .scores
            .iter()
            .find(|(_, score)| !allowed.contains(*score))
        {
            return Err(CharacterServiceError::InvalidScore { ability, score });
        }
        Ok(())
    }

    fn validate_level(level: u8) -> ServiceResult<()> {
        if !(rules::MIN_LEVEL..=rules::MAX_LEVEL).contains(&level) {
            return Err(CharacterServiceError::InvalidLevel(level));
        }
        Ok(())
    }

    /// Class picks (or class defaults), then background, then race. A skill
    /// granted by more than one source ends up with expertise.
    fn apply_starting_skills(character: &mut Character, initial_skills: &[String]) {
        let mut class_skills: Vec<Skill> = Vec::new();
        for name in initial_skills {
            match name.trim().parse::<Skill>() {
                Ok(skill) if !class_skills.contains(&skill) => class_skills.push(skill),
                Ok(_) => {}
                Err(_) => debug!(skill = %name, "Ignoring unknown skill"),
            }
        }
        if class_skills.is_empty() {
            class_skills.extend_from_slice(rules::default_skills(&character.class));
        }

        character.set_skill_proficiencies(class_skills);
        character.set_skill_proficiencies(
            rules::background_skills(&character.background).iter().copied(),
        );
        if let Some(skill) = rules::race(&character.race).and_then(|race| race.skill) {
            character.set_skill_proficiencies([skill]);
        }
    }

    /// Race a repository call against cancellation
    async fn guarded<T, F>(&self, operation: F) -> ServiceResult<T>
    where
        F: Future<Output = Result<T, RepositoryError>>,
    {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(CharacterServiceError::Cancelled),
            result = operation => result.map_err(Into::into),
        }
    }

    async fn load(&self, name: &str) -> ServiceResult<Character> {
        let mut character = self.guarded(self.repository.find_by_id(name)).await?;
        character.recompute();
        Ok(character)
    }

    async fn persist(&self, character: &Character) -> ServiceResult<()> {
        self.guarded(self.repository.save(character)).await
    }

    async fn equip_weapon(
        &self,
        character: &mut Character,
        item_name: &str,
        slot: &str,
    ) -> ServiceResult<()> {
        let slot: WeaponSlot = slot.parse().map_err(DomainError::InvalidSlot)?;
        let weapon = self.catalog.weapon(item_name).cloned().ok_or_else(|| {
            CharacterServiceError::NotInCatalog {
                kind: "weapon",
                name: item_name.to_string(),
            }
        })?;

        character.equip_weapon_slot(weapon, slot)?;

        let equipped = match slot {
            WeaponSlot::MainHand => character.main_hand.as_mut(),
            WeaponSlot::OffHand => character.off_hand.as_mut(),
        };
        if let Some(weapon) = equipped {
            self.enrichment.enrich_weapon(weapon).await;
        }

        // Enrichment is the first time we learn whether a weapon is two-handed
        let main_hand_two_handed = character
            .main_hand
            .as_ref()
            .filter(|weapon| weapon.two_handed)
            .map(|weapon| weapon.name.clone());

        if let Some(main_hand) = main_hand_two_handed {
            character.off_hand = None;
            if slot == WeaponSlot::OffHand {
                return Err(DomainError::MainHandTwoHanded(main_hand).into());
            }
        }
        Ok(())
    }
}

#[async_trait]
impl CharacterService for CharacterServiceImpl {
    #[instrument(skip(self, request), fields(name = %request.name, class = %request.class))]
    async fn create_character(&self, request: CreateCharacterRequest) -> ServiceResult<Character> {
        Self::validate_create_request(&request)?;

        let mut character = Character::new(
            request.name.trim(),
            &request.race,
            &request.class,
            &request.background,
            &request.scores,
        )?;
        character.level = request.level;

        Self::apply_starting_skills(&mut character, &request.initial_skills);
        character.recompute();

        self.persist(&character).await?;

        info!(
            level = character.level,
            race = %character.race,
            "Created character: {}",
            character.name
        );
        Ok(character)
    }

    #[instrument(skip(self))]
    async fn get_character(&self, name: &str) -> ServiceResult<Character> {
        debug!("Fetching character");
        self.load(name).await
    }

    #[instrument(skip(self))]
    async fn list_characters(&self) -> ServiceResult<Vec<Character>> {
        let mut characters = self.guarded(self.repository.find_all()).await?;
        for character in &mut characters {
            character.recompute();
        }
        characters.sort_by(|a, b| a.name.cmp(&b.name));
        debug!(count = characters.len(), "Listed characters");
        Ok(characters)
    }

    #[instrument(skip(self))]
    async fn delete_character(&self, name: &str) -> ServiceResult<()> {
        self.guarded(self.repository.delete(name)).await?;
        info!("Deleted character: {}", name);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_character_level(&self, name: &str, level: u8) -> ServiceResult<Character> {
        Self::validate_level(level)?;

        let mut character = self.load(name).await?;
        character.update_proficiency_bonus(level);
        character.recompute();

        self.persist(&character).await?;
        info!(
            max_hit_points = character.max_hit_points,
            "Character {} is now level {}",
            character.name,
            level
        );
        Ok(character)
    }

    #[instrument(skip(self))]
    async fn equip_item(
        &self,
        name: &str,
        item_name: &str,
        item_type: &str,
        slot: &str,
    ) -> ServiceResult<Character> {
        let mut character = self.load(name).await?;

        match item_type.trim().to_lowercase().as_str() {
            "weapon" => self.equip_weapon(&mut character, item_name, slot).await?,
            "armor" => {
                let mut armor = self.catalog.armor(item_name).cloned().ok_or_else(|| {
                    CharacterServiceError::NotInCatalog {
                        kind: "armor",
                        name: item_name.to_string(),
                    }
                })?;
                self.enrichment.enrich_armor(&mut armor).await;
                character.armor = Some(armor);
            }
            "shield" => {
                let shield = self.catalog.shield(item_name).cloned().ok_or_else(|| {
                    CharacterServiceError::NotInCatalog {
                        kind: "shield",
                        name: item_name.to_string(),
                    }
                })?;
                character.shield = Some(shield);
            }
            _ => return Err(CharacterServiceError::InvalidItemType(item_type.to_string())),
        }

        character.recompute();
        self.persist(&character).await?;

        info!(armor_class = character.armor_class, "Equipped {} {}", item_type, item_name);
        Ok(character)
    }

    #[instrument(skip(self))]
    async fn learn_spell(&self, name: &str, spell_name: &str) -> ServiceResult<Character> {
        let mut character = self.load(name).await?;

        match character.caster_kind {
            CasterKind::None => return Err(CharacterServiceError::NotACaster),
            CasterKind::Prepared => return Err(CharacterServiceError::CannotLearnPreparedCaster),
            CasterKind::Learned => {}
        }

        let mut spell = self.catalog.find_spell(spell_name).cloned().ok_or_else(|| {
            CharacterServiceError::NotInCatalog {
                kind: "spell",
                name: spell_name.to_string(),
            }
        })?;

        if !spell.is_available_to(&character.class) {
            return Err(CharacterServiceError::SpellNotForClass {
                class: character.class.clone(),
                spell: spell_name.to_string(),
            });
        }

        let key = normalize_spell_name(spell_name);
        if character.known_spells.contains_key(&key) {
            return Err(CharacterServiceError::AlreadyKnown {
                character: character.name.clone(),
                spell: spell_name.to_string(),
            });
        }

        self.enrichment.enrich_spell(&mut spell).await;
        character.known_spells.insert(key, spell);

        character.recompute();
        self.persist(&character).await?;

        info!(known = character.known_spells.len(), "Learned spell {}", spell_name);
        Ok(character)
    }

    #[instrument(skip(self))]
    async fn prepare_spell(&self, name: &str, spell_name: &str) -> ServiceResult<Character> {
        let mut character = self.load(name).await?;

        match character.caster_kind {
            CasterKind::None => return Err(CharacterServiceError::NotACaster),
            CasterKind::Learned => return Err(CharacterServiceError::CannotPrepareLearnedCaster),
            CasterKind::Prepared => {}
        }

        let mut spell = self.catalog.find_spell(spell_name).cloned().ok_or_else(|| {
            CharacterServiceError::NotInCatalog {
                kind: "spell",
                name: spell_name.to_string(),
            }
        })?;

        let max_slot_level = character.max_slot_level();
        if (spell.level > max_slot_level && max_slot_level > 0)
            || character.slots_at(spell.level) == 0
        {
            return Err(CharacterServiceError::SpellLevelTooHigh(spell.level));
        }

        let ability = rules::casting_ability(&character.class)
            .ok_or(CharacterServiceError::NotACaster)?;
        let limit = character
            .preparation_limit()
            .ok_or(CharacterServiceError::MissingCastingAbility(ability))?;

        if character.prepared_spells.len() >= usize::try_from(limit).unwrap_or(0) {
            warn!(limit, "Preparation limit reached");
            return Err(CharacterServiceError::PreparationLimitReached {
                character: character.name.clone(),
                limit,
                level: character.level,
                ability,
                modifier: character.ability_modifier(ability),
            });
        }

        let key = normalize_spell_name(spell_name);
        if character.prepared_spells.contains_key(&key) {
            return Err(CharacterServiceError::AlreadyPrepared(spell_name.to_string()));
        }

        self.enrichment.enrich_spell(&mut spell).await;
        character.prepared_spells.insert(key, spell);

        self.persist(&character).await?;

        info!(prepared = character.prepared_spells.len(), "Prepared spell {}", spell_name);
        Ok(character)
    }
}
