//! Loading the exported game library

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use game_shelf_core::{FriendInfo, GameRow};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Games of an export plus the friend table their `friends` ids refer to
#[derive(Debug, Clone, Default)]
pub struct Library {
    pub games: Vec<GameRow>,
    pub friends: BTreeMap<String, FriendInfo>,
}

impl Library {
    pub fn has_friends(&self) -> bool {
        self.games.iter().any(|g| !g.friends.is_empty())
    }

    /// Display name of a friend id; the id itself when the table lacks it
    pub fn friend_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.friends.get(id).map_or(id, |f| f.name.as_str())
    }

    /// Names of the friends owning a game, in export order
    pub fn friend_names<'a>(&'a self, game: &'a GameRow) -> Vec<&'a str> {
        game.friends.iter().map(|id| self.friend_name(id)).collect()
    }
}

/// Either a bare array of games, or the games with a friend table
#[derive(Deserialize)]
#[serde(untagged)]
enum Export {
    Games(Vec<Value>),
    WithFriends {
        games: Vec<Value>,
        #[serde(default)]
        friends: BTreeMap<String, Value>,
    },
}

/// Read a library export
pub fn load_library(path: &Path) -> Result<Library, LibraryError> {
    let content = fs::read_to_string(path).map_err(|source| LibraryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let library = parse_library(&content).map_err(|source| LibraryError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(
        "Loaded {} games and {} friends from {}",
        library.games.len(),
        library.friends.len(),
        path.display()
    );
    Ok(library)
}

/// Parse an export. Only a document that is not an export at all is an error;
/// games and friends that do not parse are skipped with a warning.
pub fn parse_library(content: &str) -> Result<Library, serde_json::Error> {
    let (games, friends) = match serde_json::from_str(content)? {
        Export::Games(games) => (games, BTreeMap::new()),
        Export::WithFriends { games, friends } => (games, friends),
    };

    let games = games
        .into_iter()
        .enumerate()
        .filter_map(|(idx, value)| match serde_json::from_value::<GameRow>(value) {
            Ok(game) => Some(game),
            Err(e) => {
                tracing::warn!(row = idx, "Skipping game: {}", e);
                None
            }
        })
        .collect();

    let friends = friends
        .into_iter()
        .filter_map(|(id, value)| match serde_json::from_value::<FriendInfo>(value) {
            Ok(info) => Some((id, info)),
            Err(e) => {
                tracing::warn!(friend = %id, "Skipping friend: {}", e);
                None
            }
        })
        .collect();

    Ok(Library { games, friends })
}
