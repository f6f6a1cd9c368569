//! Command parsing and execution

use gallery_core::{is_allowed_items_per_row, GalleryState, ITEMS_PER_ROW_OPTIONS};
use gallery_domain::{Continent, Country, TagSet};

/// Presentation-side state that the stores do not own.
#[derive(Debug, Default)]
pub struct Session {
    /// Code of the card under the pointer
    pub hovered: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    Success(String),
    Error(String),
    Show,
    Quit,
}

pub const HELP: &str = "\
commands:
  show                     redraw the gallery
  colors on|off            toggle color images
  per-row N                flags per row
  continent NAME|all       filter by continent
  hover CODE|none          point at a flag
  hide CODE                hide a flag
  tag CODE TAG             add a tag
  untag CODE TAG           remove a tag
  tags CODE a,b,c          replace all tags
  rename CODE NAME         rename a flag
  options                  list grid densities
  help                     this text
  quit                     exit";

/// Parse and execute a command string
pub fn execute_command(input: &str, state: &mut GalleryState, session: &mut Session) -> CommandResult {
    let parts: Vec<&str> = input.split_whitespace().collect();
    if parts.is_empty() {
        return CommandResult::Error("Empty command".to_string());
    }

    match parts[0] {
        "show" => CommandResult::Show,

        "colors" => match parts.get(1).copied() {
            Some("on") => {
                state.preferences_mut().set_show_colors(true);
                CommandResult::Success("Colors on".to_string())
            }
            Some("off") => {
                state.preferences_mut().set_show_colors(false);
                CommandResult::Success("Colors off".to_string())
            }
            _ => CommandResult::Error("Usage: colors on|off".to_string()),
        },

        "per-row" => match parts.get(1).map(|n| n.parse::<u32>()) {
            Some(Ok(n)) => {
                state.preferences_mut().set_items_per_row(n);
                if is_allowed_items_per_row(n) {
                    CommandResult::Success(format!("{} flags per row", n))
                } else {
                    CommandResult::Success(format!(
                        "{} flags per row (not a standard density; layout may be uneven)",
                        n
                    ))
                }
            }
            Some(Err(e)) => CommandResult::Error(format!("Invalid number: {}", e)),
            None => CommandResult::Error("Usage: per-row N".to_string()),
        },

        "continent" => {
            let name = parts[1..].join(" ");
            if name.is_empty() {
                return CommandResult::Error("Usage: continent NAME|all".to_string());
            }
            if name.eq_ignore_ascii_case("all") {
                state.preferences_mut().set_active_continent(None);
                return CommandResult::Success("Showing all continents".to_string());
            }
            match name.parse::<Continent>() {
                Ok(continent) => {
                    state.preferences_mut().set_active_continent(Some(continent));
                    CommandResult::Success(format!("Showing {}", continent))
                }
                Err(e) => CommandResult::Error(e.to_string()),
            }
        }

        "hover" => match parts.get(1).copied() {
            Some("none") => {
                session.hovered = None;
                CommandResult::Success("Pointer cleared".to_string())
            }
            Some(raw) => {
                let Some(code) = resolve_code(state, raw) else {
                    return unknown(raw);
                };
                session.hovered = Some(code.clone());
                CommandResult::Success(format!("Pointing at {}", code))
            }
            None => CommandResult::Error("Usage: hover CODE|none".to_string()),
        },

        "hide" => match parts.get(1) {
            Some(raw) => match resolve_code(state, raw) {
                Some(code) => report(state.countries_mut().hide(&code), &code, "Hidden"),
                None => unknown(raw),
            },
            None => CommandResult::Error("Usage: hide CODE".to_string()),
        },

        "tag" | "untag" => {
            if parts.len() < 3 {
                return CommandResult::Error(format!("Usage: {} CODE TAG", parts[0]));
            }
            let Some(code) = resolve_code(state, parts[1]) else {
                return unknown(parts[1]);
            };
            let tag = parts[2..].join(" ");
            let mut handle = state.countries_mut().handle(code.clone());
            if parts[0] == "tag" {
                report(handle.add_tag(tag), &code, "Tagged")
            } else {
                report(handle.remove_tag(tag), &code, "Untagged")
            }
        }

        "tags" => {
            if parts.len() < 2 {
                return CommandResult::Error("Usage: tags CODE a,b,c".to_string());
            }
            let Some(code) = resolve_code(state, parts[1]) else {
                return unknown(parts[1]);
            };
            let tags = parse_tag_list(&parts[2..].join(" "));
            report(state.countries_mut().set_tags(&code, tags), &code, "Retagged")
        }

        "rename" => {
            if parts.len() < 3 {
                return CommandResult::Error("Usage: rename CODE NAME".to_string());
            }
            let Some(code) = resolve_code(state, parts[1]) else {
                return unknown(parts[1]);
            };
            let Some(current) = state.countries().get(&code) else {
                return unknown(&code);
            };
            let renamed = Country {
                name: parts[2..].join(" "),
                ..(*current).clone()
            };
            report(state.countries_mut().replace(&code, renamed), &code, "Renamed")
        }

        "options" => {
            let options: Vec<String> = ITEMS_PER_ROW_OPTIONS.iter().map(u32::to_string).collect();
            CommandResult::Success(format!("Flags per row: {}", options.join(", ")))
        }

        "help" | "?" => CommandResult::Success(HELP.to_string()),

        "quit" | "exit" | "q" => CommandResult::Quit,

        other => CommandResult::Error(format!("Unknown command: {} (try help)", other)),
    }
}

/// Split `a, b ,c` into a tag set; blanks are dropped.
fn parse_tag_list(input: &str) -> TagSet {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Match `raw` against the stored codes as typed, then uppercased.
fn resolve_code(state: &GalleryState, raw: &str) -> Option<String> {
    if state.countries().get(raw).is_some() {
        return Some(raw.to_string());
    }
    let upper = raw.to_uppercase();
    state.countries().get(&upper).map(|_| upper)
}

fn unknown(code: &str) -> CommandResult {
    CommandResult::Error(format!("Unknown country: {}", code))
}

fn report(matched: bool, code: &str, verb: &str) -> CommandResult {
    if matched {
        CommandResult::Success(format!("{} {}", verb, code))
    } else {
        unknown(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gallery_core::MemoryBackend;
    use gallery_domain::Catalog;
    use rstest::rstest;
    use std::sync::Arc;

    fn setup() -> (GalleryState, Session) {
        let state = GalleryState::new(Catalog::builtin().unwrap(), Arc::new(MemoryBackend::new()));
        (state, Session::default())
    }

    #[test]
    fn toggles_colors() {
        let (mut state, mut session) = setup();
        let result = execute_command("colors off", &mut state, &mut session);
        assert_eq!(result, CommandResult::Success("Colors off".to_string()));
        assert!(!state.preferences().show_colors());
    }

    #[rstest]
    #[case("per-row 6", 6)]
    #[case("per-row 7", 7)]
    fn sets_items_per_row(#[case] input: &str, #[case] expected: u32) {
        let (mut state, mut session) = setup();
        assert!(matches!(
            execute_command(input, &mut state, &mut session),
            CommandResult::Success(_)
        ));
        assert_eq!(state.preferences().items_per_row(), expected);
    }

    #[rstest]
    #[case("per-row")]
    #[case("per-row many")]
    #[case("colors maybe")]
    #[case("continent Atlantis")]
    #[case("hide")]
    #[case("tag FR")]
    #[case("frobnicate")]
    fn rejects_bad_input(#[case] input: &str) {
        let (mut state, mut session) = setup();
        assert!(matches!(
            execute_command(input, &mut state, &mut session),
            CommandResult::Error(_)
        ));
    }

    #[test]
    fn continent_filter() {
        let (mut state, mut session) = setup();
        execute_command("continent north america", &mut state, &mut session);
        assert_eq!(state.preferences().active_continent(), Some(Continent::NorthAmerica));
        execute_command("continent all", &mut state, &mut session);
        assert_eq!(state.preferences().active_continent(), None);
    }

    #[test]
    fn tagging_round_trip() {
        let (mut state, mut session) = setup();
        execute_command("tag fr visited", &mut state, &mut session);
        execute_command("tag FR wine country", &mut state, &mut session);
        let fr = state.countries().get("FR").unwrap();
        assert!(fr.tags.contains("visited"));
        assert!(fr.tags.contains("wine country"));

        execute_command("untag FR visited", &mut state, &mut session);
        assert!(!state.countries().get("FR").unwrap().tags.contains("visited"));
    }

    #[test]
    fn replace_all_tags() {
        let (mut state, mut session) = setup();
        execute_command("tags JP a, b ,, c", &mut state, &mut session);
        let tags: Vec<String> = state
            .countries()
            .get("JP")
            .unwrap()
            .tags
            .iter()
            .map(str::to_string)
            .collect();
        assert_eq!(tags, vec!["a", "b", "c"]);
    }

    #[test]
    fn unknown_country_is_reported() {
        let (mut state, mut session) = setup();
        assert_eq!(
            execute_command("hide XX", &mut state, &mut session),
            CommandResult::Error("Unknown country: XX".to_string())
        );
        assert!(matches!(
            execute_command("hover XX", &mut state, &mut session),
            CommandResult::Error(_)
        ));
        assert_eq!(session.hovered, None);
    }

    #[test]
    fn rename_keeps_everything_else() {
        let (mut state, mut session) = setup();
        execute_command("tag DE beer", &mut state, &mut session);
        execute_command("rename DE Federal Republic of Germany", &mut state, &mut session);
        let de = state.countries().get("DE").unwrap();
        assert_eq!(de.name, "Federal Republic of Germany");
        assert!(de.tags.contains("beer"));
    }

    #[test]
    fn hover_updates_session() {
        let (mut state, mut session) = setup();
        execute_command("hover jp", &mut state, &mut session);
        assert_eq!(session.hovered.as_deref(), Some("JP"));
        execute_command("hover none", &mut state, &mut session);
        assert_eq!(session.hovered, None);
    }

    #[test]
    fn lowercase_codes_in_custom_catalog() {
        let catalog = Catalog::new(vec![
            Country::new("fr", "France", Continent::Europe, "fr.png", "fr-o.png"),
            Country::new("JP", "Japan", Continent::Asia, "jp.png", "jp-o.png"),
        ])
        .unwrap();
        let mut state = GalleryState::new(catalog, Arc::new(MemoryBackend::new()));
        let mut session = Session::default();

        assert_eq!(
            execute_command("hide fr", &mut state, &mut session),
            CommandResult::Success("Hidden fr".to_string())
        );
        execute_command("tag fr visited", &mut state, &mut session);
        execute_command("hover fr", &mut state, &mut session);
        execute_command("rename fr French Republic", &mut state, &mut session);

        let fr = state.countries().get("fr").unwrap();
        assert!(fr.hidden);
        assert!(fr.tags.contains("visited"));
        assert_eq!(fr.name, "French Republic");
        assert_eq!(session.hovered.as_deref(), Some("fr"));

        execute_command("tag jp sushi", &mut state, &mut session);
        assert!(state.countries().get("JP").unwrap().tags.contains("sushi"));
    }

    #[test]
    fn quit_and_show() {
        let (mut state, mut session) = setup();
        assert_eq!(execute_command("quit", &mut state, &mut session), CommandResult::Quit);
        assert_eq!(execute_command("show", &mut state, &mut session), CommandResult::Show);
    }
}
