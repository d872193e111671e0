//! Game lookup by name.
//!
//! The `GameRegistry` maps every game name and alias, compared without
//! regard to case, to a factory that builds a fresh rule-set from
//! `GridSettings`.

use rustc_hash::FxHashMap;

use crate::core::{ConfigError, GridSettings, RegistryError};
use crate::rules::RuleSet;

use super::amazons::{Amazons, AmazonsBuilder};
use super::connect_four::{ConnectFour, ConnectFourBuilder};
use super::ultimate_tic_tac_toe::{UltimateTicTacToe, UltimateTicTacToeBuilder};

/// A rule-set picked at runtime.
pub type BoxedRuleSet = Box<dyn RuleSet + Send>;

/// Builds a rule-set from caller settings.
pub type GameFactory = fn(&GridSettings) -> Result<BoxedRuleSet, ConfigError>;

/// Registry of playable games.
///
/// ## Example
///
/// ```
/// use rust_supergrid::games::GameRegistry;
///
/// let registry = GameRegistry::with_builtin_games();
/// let game = registry.create("megaminerai-##-connectfour").unwrap();
/// assert_eq!(game.config().name, "ConnectFour");
/// ```
#[derive(Clone, Debug, Default)]
pub struct GameRegistry {
    /// Lowercased name or alias to index into `games`.
    keys: FxHashMap<String, usize>,
    games: Vec<(String, GameFactory)>,
}

impl GameRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every bundled game.
    #[must_use]
    pub fn with_builtin_games() -> Self {
        let mut registry = Self::new();
        registry.register(Amazons::NAME, &["MegaMinerAI-##-Amazons"], |settings| {
            Ok(Box::new(AmazonsBuilder::new().settings(*settings).build()?))
        });
        registry.register(ConnectFour::NAME, &["MegaMinerAI-##-ConnectFour"], |settings| {
            Ok(Box::new(ConnectFourBuilder::new().settings(*settings).build()?))
        });
        registry.register(
            UltimateTicTacToe::NAME,
            &["MegaMinerAI-##-UltimateTicTacToe"],
            |settings| Ok(Box::new(UltimateTicTacToeBuilder::new().settings(*settings).build()?)),
        );
        registry
    }

    /// Register a game under its name and aliases.
    ///
    /// Panics if any of the names is already taken.
    pub fn register(&mut self, name: &str, aliases: &[&str], factory: GameFactory) {
        let index = self.games.len();
        for key in std::iter::once(name).chain(aliases.iter().copied()) {
            let key = key.to_lowercase();
            if self.keys.contains_key(&key) {
                panic!("Game name {:?} already registered", key);
            }
            self.keys.insert(key, index);
        }
        self.games.push((name.to_string(), factory));
    }

    /// Build a game with its default settings.
    pub fn create(&self, name: &str) -> Result<BoxedRuleSet, RegistryError> {
        self.create_with(name, &GridSettings::default())
    }

    /// Build a game with caller-supplied settings.
    pub fn create_with(&self, name: &str, settings: &GridSettings) -> Result<BoxedRuleSet, RegistryError> {
        let &index = self
            .keys
            .get(&name.to_lowercase())
            .ok_or_else(|| RegistryError::UnknownGame(name.to_string()))?;
        let (_, factory) = &self.games[index];
        Ok(factory(settings)?)
    }

    /// Canonical name a name or alias resolves to.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&str> {
        let &index = self.keys.get(&name.to_lowercase())?;
        Some(self.games[index].0.as_str())
    }

    /// Canonical names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.games.iter().map(|(name, _)| name.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.games.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_games() {
        let registry = GameRegistry::with_builtin_games();

        assert_eq!(registry.len(), 3);
        assert_eq!(
            registry.names().collect::<Vec<_>>(),
            vec!["Amazons", "ConnectFour", "UltimateTicTacToe"]
        );
    }

    #[test]
    fn test_lookup_is_case_insensitive_and_alias_aware() {
        let registry = GameRegistry::with_builtin_games();

        assert_eq!(registry.resolve("amazons"), Some("Amazons"));
        assert_eq!(registry.resolve("MEGAMINERAI-##-AMAZONS"), Some("Amazons"));
        assert_eq!(registry.resolve("MegaMinerAI-##-UltimateTicTacToe"), Some("UltimateTicTacToe"));
        assert_eq!(registry.resolve("Chess"), None);
    }

    #[test]
    fn test_create_builds_configured_game() {
        let registry = GameRegistry::with_builtin_games();

        let game = registry.create("ultimatetictactoe").unwrap();
        assert_eq!(game.config().rows, 9);
        assert_eq!(game.auxiliary(), vec!["0"]);

        let settings = GridSettings::new().with_rows(8).with_cols(8);
        let game = registry.create_with("ConnectFour", &settings).unwrap();
        assert_eq!((game.config().rows, game.config().cols), (8, 8));
    }

    #[test]
    fn test_create_errors() {
        let registry = GameRegistry::with_builtin_games();

        assert_eq!(
            registry.create("Chess").err(),
            Some(RegistryError::UnknownGame("Chess".into()))
        );

        let settings = GridSettings::new().with_rows(4);
        let err = registry.create_with("connectfour", &settings).err();
        assert!(matches!(
            err,
            Some(RegistryError::Config(ConfigError::BoardTooSmall { rows: 4, .. }))
        ));
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_duplicate_name_panics() {
        let mut registry = GameRegistry::with_builtin_games();
        registry.register("AMAZONS", &[], |_| Ok(Box::new(Amazons::new())));
    }
}
