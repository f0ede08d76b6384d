use include_dir::{include_dir, Dir};
use itertools::Itertools;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

static DECKS_DIR: Dir = include_dir!("src/decks");

/// A single word/translation pair. Loaded once from a deck file and never
/// mutated; duplicate words are treated as independent entries.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Card {
    #[serde(rename = "Word")]
    pub word: String,
    #[serde(rename = "Translation")]
    pub translation: String,
}

/// Named, ordered collection of cards. Cards keep their source order;
/// shuffling happens in the session, not here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deck {
    pub name: String,
    pub cards: Vec<Card>,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("deck file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("could not read deck file {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed deck data in {}: {reason}", .path.display())]
    Malformed { path: PathBuf, reason: String },
}

impl Deck {
    /// Load a deck from a JSON file: an array of `{"Word": .., "Translation": ..}`
    /// records. Records with a missing or blank field are rejected outright.
    pub fn load(name: impl Into<String>, path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
            _ => LoadError::Unreadable {
                path: path.to_path_buf(),
                source: e,
            },
        })?;

        let cards = parse_cards(path, &data)?;

        Ok(Self {
            name: name.into(),
            cards,
        })
    }

    pub fn from_cards(name: impl Into<String>, cards: Vec<Card>) -> Self {
        Self {
            name: name.into(),
            cards,
        }
    }

    /// The deck embedded in the binary, available before the user adds any files.
    pub fn starter() -> Self {
        let file = DECKS_DIR
            .get_file("starter.json")
            .expect("starter deck not embedded");

        let data = file
            .contents_utf8()
            .expect("unable to interpret starter deck as a string");

        let cards =
            parse_cards(Path::new("starter.json"), data).expect("starter deck is malformed");

        Self {
            name: "starter".to_string(),
            cards,
        }
    }
}

fn parse_cards(path: &Path, data: &str) -> Result<Vec<Card>, LoadError> {
    let cards: Vec<Card> = serde_json::from_str(data).map_err(|e| LoadError::Malformed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    for (idx, card) in cards.iter().enumerate() {
        if card.word.trim().is_empty() || card.translation.trim().is_empty() {
            return Err(LoadError::Malformed {
                path: path.to_path_buf(),
                reason: format!("card {} has an empty word or translation", idx + 1),
            });
        }
    }

    Ok(cards)
}

/// Recursively collect `.json` files under `dir`, sorted for a stable menu.
pub fn find_deck_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    collect_json_files(dir, &mut files)?;
    Ok(files.into_iter().sorted().collect())
}

fn collect_json_files(dir: &Path, out: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_json_files(&path, out)?;
        } else if path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
        {
            out.push(path);
        }
    }
    Ok(())
}

/// Display name for a deck file: the file stem without the `.json` extension.
pub fn deck_name_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_deck(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_valid_deck() {
        let dir = tempdir().unwrap();
        let path = write_deck(
            dir.path(),
            "animals.json",
            r#"[{"Word":"cat","Translation":"кот"},{"Word":"dog","Translation":"собака"}]"#,
        );

        let deck = Deck::load("animals", &path).unwrap();

        assert_eq!(deck.name, "animals");
        assert_eq!(deck.cards.len(), 2);
        assert_eq!(deck.cards[0].word, "cat");
        assert_eq!(deck.cards[0].translation, "кот");
    }

    #[test]
    fn test_load_preserves_source_order() {
        let dir = tempdir().unwrap();
        let path = write_deck(
            dir.path(),
            "ordered.json",
            r#"[{"Word":"b","Translation":"2"},{"Word":"a","Translation":"1"},{"Word":"c","Translation":"3"}]"#,
        );

        let deck = Deck::load("ordered", &path).unwrap();

        let words: Vec<&str> = deck.cards.iter().map(|c| c.word.as_str()).collect();
        assert_eq!(words, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_load_allows_duplicate_words() {
        let dir = tempdir().unwrap();
        let path = write_deck(
            dir.path(),
            "dupes.json",
            r#"[{"Word":"bank","Translation":"банк"},{"Word":"bank","Translation":"берег"}]"#,
        );

        let deck = Deck::load("dupes", &path).unwrap();
        assert_eq!(deck.cards.len(), 2);
    }

    #[test]
    fn test_load_nonexistent_path() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.json");

        let err = Deck::load("nope", &missing).unwrap_err();
        assert_matches!(err, LoadError::NotFound(p) if p == missing);
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempdir().unwrap();
        let path = write_deck(dir.path(), "broken.json", "{not json");

        let err = Deck::load("broken", &path).unwrap_err();
        assert_matches!(err, LoadError::Malformed { .. });
    }

    #[test]
    fn test_load_rejects_missing_field() {
        let dir = tempdir().unwrap();
        let path = write_deck(dir.path(), "missing.json", r#"[{"Word":"cat"}]"#);

        let err = Deck::load("missing", &path).unwrap_err();
        assert_matches!(err, LoadError::Malformed { .. });
    }

    #[test]
    fn test_load_rejects_blank_field_with_card_index() {
        let dir = tempdir().unwrap();
        let path = write_deck(
            dir.path(),
            "blank.json",
            r#"[{"Word":"cat","Translation":"кот"},{"Word":"  ","Translation":"собака"}]"#,
        );

        let err = Deck::load("blank", &path).unwrap_err();
        assert_matches!(err, LoadError::Malformed { reason, .. } if reason.contains("card 2"));
    }

    #[test]
    fn test_load_empty_array_yields_empty_deck() {
        let dir = tempdir().unwrap();
        let path = write_deck(dir.path(), "empty.json", "[]");

        let deck = Deck::load("empty", &path).unwrap();
        assert!(deck.cards.is_empty());
    }

    #[test]
    fn test_starter_deck_loads() {
        let deck = Deck::starter();

        assert_eq!(deck.name, "starter");
        assert!(!deck.cards.is_empty());
        for card in &deck.cards {
            assert!(!card.word.trim().is_empty());
            assert!(!card.translation.trim().is_empty());
        }
    }

    #[test]
    fn test_find_deck_files_recursive_and_sorted() {
        let dir = tempdir().unwrap();
        write_deck(dir.path(), "b.json", "[]");
        write_deck(dir.path(), "a.json", "[]");
        write_deck(dir.path(), "notes.txt", "not a deck");
        let nested = dir.path().join("nested");
        fs::create_dir(&nested).unwrap();
        write_deck(&nested, "c.JSON", "[]");

        let files = find_deck_files(dir.path()).unwrap();

        assert_eq!(files.len(), 3);
        assert_eq!(files[0], dir.path().join("a.json"));
        assert_eq!(files[1], dir.path().join("b.json"));
        assert_eq!(files[2], nested.join("c.JSON"));
    }

    #[test]
    fn test_find_deck_files_missing_dir() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("no_such_dir");

        let result = find_deck_files(&missing);
        assert!(result.is_err());
    }

    #[test]
    fn test_deck_name_from_path() {
        assert_eq!(deck_name_from_path(Path::new("decks/animals.json")), "animals");
        assert_eq!(deck_name_from_path(Path::new("verbs.json")), "verbs");
    }
}
