//! Background skill grants

use crate::domain::value_objects::Skill;
use crate::domain::value_objects::Skill::*;

use super::normalize_key;

static BACKGROUNDS: &[(&str, &[Skill])] = &[
    ("acolyte", &[Insight, Religion]),
    ("sage", &[Arcana, History]),
    ("soldier", &[Athletics, Intimidation]),
    ("outlander", &[Athletics, Survival]),
    ("criminal", &[Deception, Stealth]),
    ("folk hero", &[AnimalHandling, Survival]),
    ("noble", &[History, Persuasion]),
    ("charlatan", &[Deception, SleightOfHand]),
    ("entertainer", &[Acrobatics, Performance]),
    ("hermit", &[Medicine, Religion]),
    ("urchin", &[SleightOfHand, Stealth]),
];

/// Skills granted by a background; unknown backgrounds grant none
pub fn background_skills(name: &str) -> &'static [Skill] {
    let key = normalize_key(name);
    BACKGROUNDS
        .iter()
        .find(|(background, _)| *background == key)
        .map(|(_, skills)| *skills)
        .unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_lookup() {
        assert_eq!(background_skills("Acolyte"), &[Insight, Religion]);
        assert_eq!(background_skills("folk-hero"), &[AnimalHandling, Survival]);
        assert!(background_skills("pirate").is_empty());
    }
}
