//! Character sheet pages

use std::fmt::Write;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
};

use crate::application::dto::{CharacterSheetDto, CharacterSummaryDto};
use crate::application::services::CharacterService;
use crate::infrastructure::state::AppState;

/// List every character
pub async fn list_characters(
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, (StatusCode, String)> {
    let characters = state
        .character_service
        .list_characters()
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch characters: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to retrieve character list.".to_string(),
            )
        })?;

    let summaries: Vec<CharacterSummaryDto> =
        characters.iter().map(CharacterSummaryDto::from).collect();
    Ok(Html(render_list(&summaries)))
}

/// Full sheet for one character
pub async fn view_character(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Html<String>, (StatusCode, String)> {
    let character = state
        .character_service
        .get_character(&name)
        .await
        .map_err(|e| {
            if e.is_not_found() {
                (StatusCode::NOT_FOUND, format!("Character '{}' not found.", name))
            } else {
                tracing::error!("Failed to fetch character '{}': {}", name, e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to retrieve character sheet.".to_string(),
                )
            }
        })?;

    Ok(Html(render_sheet(&CharacterSheetDto::from(&character))))
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Percent-encode a path segment
fn encode_segment(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for byte in text.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
            out.push(char::from(byte));
        } else {
            let _ = write!(out, "%{:02X}", byte);
        }
    }
    out
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n<body>\n{}</body>\n</html>\n",
        escape(title),
        body
    )
}

fn render_list(characters: &[CharacterSummaryDto]) -> String {
    let mut body = String::from("<h1>D&amp;D Character List</h1>\n<ul>\n");
    for c in characters {
        let _ = writeln!(
            body,
            "<li><a href=\"/characters/{}\">{} (Lvl {} {} {})</a></li>",
            encode_segment(&c.name),
            escape(&c.name),
            c.level,
            escape(&c.race),
            escape(&c.class)
        );
    }
    body.push_str("</ul>\n");
    page("Character List", &body)
}

fn render_sheet(sheet: &CharacterSheetDto) -> String {
    let mut body = String::new();

    let _ = writeln!(body, "<h1>{}</h1>", escape(&sheet.name));
    let _ = writeln!(
        body,
        "<p>Level {} {} {} ({})</p>",
        sheet.level,
        escape(&sheet.race),
        escape(&sheet.class),
        escape(&sheet.background)
    );
    let _ = writeln!(body, "<p>Proficiency bonus: {:+}</p>", sheet.proficiency_bonus);

    body.push_str("<h2>Abilities</h2>\n<table>\n");
    for ability in &sheet.abilities {
        let _ = writeln!(
            body,
            "<tr><th>{}</th><td>{}</td><td>{:+}</td></tr>",
            ability.abbreviation, ability.score, ability.modifier
        );
    }
    body.push_str("</table>\n");

    body.push_str("<h2>Combat</h2>\n<ul>\n");
    let _ = writeln!(
        body,
        "<li>Hit points: {} / {}</li>",
        sheet.current_hit_points, sheet.max_hit_points
    );
    let _ = writeln!(body, "<li>Armor class: {}</li>", sheet.armor_class);
    let _ = writeln!(body, "<li>Initiative: {:+}</li>", sheet.initiative);
    let _ = writeln!(body, "<li>Passive perception: {}</li>", sheet.passive_perception);
    body.push_str("</ul>\n");

    body.push_str("<h2>Skills</h2>\n<table>\n");
    for skill in &sheet.skills {
        let mark = match (skill.proficient, skill.expertise) {
            (_, true) => "&#9679;&#9679;",
            (true, false) => "&#9679;",
            _ => "",
        };
        let _ = writeln!(
            body,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{:+}</td></tr>",
            mark, skill.name, skill.ability, skill.modifier
        );
    }
    body.push_str("</table>\n");

    if !sheet.equipment.is_empty() {
        body.push_str("<h2>Equipment</h2>\n<ul>\n");
        for item in &sheet.equipment {
            let _ = write!(body, "<li>{}: {}", item.slot, escape(&item.name));
            if !item.detail.is_empty() {
                let _ = write!(body, " ({})", escape(&item.detail));
            }
            body.push_str("</li>\n");
        }
        body.push_str("</ul>\n");
    }

    if let Some(casting) = &sheet.spellcasting {
        body.push_str("<h2>Spellcasting</h2>\n<ul>\n");
        let _ = writeln!(body, "<li>Ability: {}</li>", casting.ability);
        let _ = writeln!(body, "<li>Spell save DC: {}</li>", casting.save_dc);
        let _ = writeln!(body, "<li>Spell attack bonus: {:+}</li>", casting.attack_bonus);
        body.push_str("</ul>\n<table>\n");
        for slot in &casting.slots {
            let _ = writeln!(
                body,
                "<tr><th>Level {}</th><td>{}</td></tr>",
                slot.level, slot.count
            );
        }
        body.push_str("</table>\n");

        if !casting.spells.is_empty() {
            let _ = writeln!(body, "<h3>{}</h3>\n<ul>", casting.spells_label);
            for spell in &casting.spells {
                let _ = write!(body, "<li>{} (level {})", escape(&spell.name), spell.level);
                if !spell.school.is_empty() {
                    let _ = write!(body, " {}", escape(&spell.school));
                }
                body.push_str("</li>\n");
            }
            body.push_str("</ul>\n");
        }
    }

    page(&sheet.name, &body)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    use axum::{
        body::Body,
        http::{header, Request as HttpRequest},
        Router,
    };
    use tokio_util::sync::CancellationToken;
    use tower::ServiceExt;

    use super::*;
    use crate::application::services::{
        CharacterService, CharacterServiceImpl, CreateCharacterRequest,
    };
    use crate::domain::catalog::SrdCatalog;
    use crate::domain::value_objects::AbilityKey;
    use crate::infrastructure::config::AppConfig;
    use crate::infrastructure::dnd_api::OfflineEnricher;
    use crate::infrastructure::http::create_routes;
    use crate::infrastructure::persistence::InMemoryCharacterRepository;

    fn config() -> AppConfig {
        AppConfig {
            equipment_path: PathBuf::from("unused.csv"),
            spells_path: PathBuf::from("unused.csv"),
            characters_path: PathBuf::from("unused.json"),
            api_base_url: String::new(),
            api_requests_per_second: 8,
            api_burst: 8,
            api_timeout_secs: 5,
            enrichment_enabled: false,
            server_port: 0,
        }
    }

    async fn app() -> Router {
        let service = CharacterServiceImpl::new(
            Arc::new(InMemoryCharacterRepository::new()),
            Arc::new(OfflineEnricher),
            Arc::new(SrdCatalog::new()),
            CancellationToken::new(),
        );

        for (name, class) in [("Tasha <The Witch>", "wizard"), ("Bruenor", "fighter")] {
            service
                .create_character(CreateCharacterRequest {
                    name: name.to_string(),
                    race: "mountain dwarf".to_string(),
                    class: class.to_string(),
                    background: "soldier".to_string(),
                    level: 3,
                    scores: AbilityKey::ALL.into_iter().map(|k| (k, 12)).collect::<BTreeMap<_, _>>(),
                    initial_skills: vec![],
                })
                .await
                .unwrap();
        }

        let state = AppState {
            config: config(),
            character_service: Arc::new(service),
        };
        create_routes().with_state(Arc::new(state))
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Option<String>, String) {
        let request = HttpRequest::builder().uri(uri).body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_string());
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, content_type, String::from_utf8(body.to_vec()).unwrap())
    }

    #[test]
    fn test_escape_and_encode() {
        assert_eq!(escape("<a href='x'>&</a>"), "&lt;a href=&#39;x&#39;&gt;&amp;&lt;/a&gt;");
        assert_eq!(encode_segment("Tasha the Witch"), "Tasha%20the%20Witch");
    }

    #[tokio::test]
    async fn test_list_page() {
        let (status, content_type, body) = get(app().await, "/characters").await;
        assert_eq!(status, StatusCode::OK);
        assert!(content_type.unwrap().starts_with("text/html"));
        assert!(body.contains("Bruenor (Lvl 3 mountain dwarf fighter)"));
        assert!(body.contains("Tasha &lt;The Witch&gt;"));
        assert!(body.find("Bruenor").unwrap() < body.find("Tasha").unwrap());
    }

    #[tokio::test]
    async fn test_sheet_page() {
        let (status, content_type, body) =
            get(app().await, "/characters/Tasha%20%3CThe%20Witch%3E").await;
        assert_eq!(status, StatusCode::OK);
        assert!(content_type.unwrap().starts_with("text/html"));
        assert!(body.contains("<h1>Tasha &lt;The Witch&gt;</h1>"));
        assert!(body.contains("Spell save DC"));
        assert!(body.contains("Athletics"));
    }

    #[tokio::test]
    async fn test_non_caster_sheet_has_no_spellcasting() {
        let (status, _, body) = get(app().await, "/characters/Bruenor").await;
        assert_eq!(status, StatusCode::OK);
        assert!(!body.contains("Spellcasting"));
    }

    #[tokio::test]
    async fn test_unknown_character_is_404() {
        let (status, _, body) = get(app().await, "/characters/Nobody").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("Nobody"));
    }

    #[tokio::test]
    async fn test_health() {
        let (status, _, body) = get(app().await, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "OK");
    }
}
