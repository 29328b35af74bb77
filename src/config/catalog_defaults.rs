use serde::Serialize;

/// Cities and games the calendar offers as filter choices.
///
/// Listings for other values are still accepted and shown; these only seed
/// the choices presented to users.
#[derive(Debug, Clone, Serialize)]
pub struct FilterChoice {
    pub value: &'static str,
    pub label: &'static str,
}

impl FilterChoice {
    pub fn new(value: &'static str, label: &'static str) -> Self {
        Self { value, label }
    }
}

/// Cities with participating stores
pub fn get_cities() -> Vec<FilterChoice> {
    vec![
        FilterChoice::new("Puebla", "Puebla"),
        FilterChoice::new("Ciudad de Mexico", "Ciudad de México"),
    ]
}

/// Supported trading card games
pub fn get_games() -> Vec<FilterChoice> {
    vec![
        FilterChoice::new("Pokemon TCG", "Pokémon TCG"),
        FilterChoice::new("Magic: The Gathering", "Magic: The Gathering"),
        FilterChoice::new("Yu-Gi-Oh!", "Yu-Gi-Oh!"),
    ]
}

/// Game shown when the caller names none
pub const DEFAULT_GAME: &str = "Pokemon TCG";

/// Game filter value that lifts the default and shows every game
pub const ALL_GAMES: &str = "all";

/// Game filter for a request: absent means [`DEFAULT_GAME`], blank or
/// [`ALL_GAMES`] means no game filter at all
pub fn resolve_game(game: Option<String>) -> Option<String> {
    match game {
        None => Some(DEFAULT_GAME.to_string()),
        Some(game) if game.trim().is_empty() || game.trim().eq_ignore_ascii_case(ALL_GAMES) => None,
        Some(game) => Some(game),
    }
}

pub fn is_known_city(city: &str) -> bool {
    get_cities().iter().any(|c| c.value == city)
}

pub fn is_known_game(game: &str) -> bool {
    get_games().iter().any(|g| g.value == game)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values() {
        assert!(is_known_city("Puebla"));
        assert!(is_known_game("Yu-Gi-Oh!"));
        assert!(!is_known_game("Pokémon TCG"));
        assert!(is_known_game(DEFAULT_GAME));
    }

    #[test]
    fn test_resolve_game() {
        assert_eq!(resolve_game(None), Some("Pokemon TCG".to_string()));
        assert_eq!(resolve_game(Some("Yu-Gi-Oh!".to_string())), Some("Yu-Gi-Oh!".to_string()));
        assert_eq!(resolve_game(Some("all".to_string())), None);
        assert_eq!(resolve_game(Some("ALL".to_string())), None);
        assert_eq!(resolve_game(Some("".to_string())), None);
    }
}
