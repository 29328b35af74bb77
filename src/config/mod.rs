pub mod catalog_defaults;
pub mod settings;

pub use catalog_defaults::{
    get_cities, get_games, is_known_city, is_known_game, resolve_game, ALL_GAMES, DEFAULT_GAME,
};
pub use settings::AppConfig;
