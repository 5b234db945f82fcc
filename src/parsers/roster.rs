use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::Value;
use tracing::{info, warn};

use crate::models::CharacterRecord;
use crate::utils::open_roster_file;

const MAX_CONSECUTIVE_ERRORS: usize = 100;

/// Parse a roster file, choosing the format from its extension
///
/// `.jsonl` files hold one character per line; anything else is treated as a JSON document.
pub fn parse_roster_file(path: &Path) -> Result<Vec<CharacterRecord>> {
    let is_lines = path
        .extension()
        .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case("jsonl"))
        .unwrap_or(false);

    if is_lines { parse_roster_lines(path) } else { parse_roster_document(path) }
}

/// Parse a JSON roster document (an array of characters, or `{"characters": [...]}`)
pub fn parse_roster_document(path: &Path) -> Result<Vec<CharacterRecord>> {
    let mut file = open_roster_file(path)?;
    let mut content = String::new();
    file.read_to_string(&mut content)
        .with_context(|| format!("Failed to read roster file: {}", path.display()))?;

    parse_roster_json(&content, &path.display().to_string())
}

/// Parse roster JSON text. `source` only labels log and error messages.
///
/// Characters that fail to deserialize are logged and skipped. Returns an error if the text
/// is not JSON, has no character list, or more than 50% of the characters fail to parse.
pub fn parse_roster_json(content: &str, source: &str) -> Result<Vec<CharacterRecord>> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    let document: Value = serde_json::from_str(content)
        .with_context(|| format!("Roster is not valid JSON: {}", source))?;

    let items = match document {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("characters") {
            Some(Value::Array(items)) => items,
            Some(Value::Null) => Vec::new(),
            Some(_) => bail!("Roster 'characters' must be a list: {}", source),
            // A lone character object
            None => vec![Value::Object(map)],
        },
        _ => bail!("Roster must be a list or an object with 'characters': {}", source),
    };

    let total = items.len();
    let mut characters = Vec::with_capacity(total);
    let mut skipped_count = 0;

    for (idx, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<CharacterRecord>(item) {
            Ok(character) => characters.push(character),
            Err(e) => {
                warn!("Skipping character {} in {}: {}", idx + 1, source, e);
                skipped_count += 1;
            }
        }
    }

    check_failure_rate(skipped_count, total, source)?;

    if skipped_count > 0 {
        info!(
            "Parsed roster {}: {} characters ({} skipped)",
            source,
            characters.len(),
            skipped_count
        );
    }

    Ok(characters)
}

/// Parse a JSON Lines roster, one character per line
/// Gracefully handles malformed lines by logging and skipping them
/// Returns an error if more than 50% of lines fail to parse or >100 consecutive errors
pub fn parse_roster_lines(path: &Path) -> Result<Vec<CharacterRecord>> {
    let file = open_roster_file(path)?;
    let reader = BufReader::new(file);
    let source = path.display().to_string();

    let mut characters = Vec::new();
    let mut skipped_count = 0;
    let mut total_lines = 0;
    let mut consecutive_errors = 0;

    for (line_num, line) in reader.lines().enumerate() {
        let line = line.context("Failed to read line from roster file")?;

        if line.trim().is_empty() {
            continue;
        }

        total_lines += 1;

        match serde_json::from_str::<CharacterRecord>(&line) {
            Ok(character) => {
                characters.push(character);
                consecutive_errors = 0;
            }
            Err(e) => {
                warn!("Failed to parse line {} in {}: {}", line_num + 1, source, e);
                skipped_count += 1;
                consecutive_errors += 1;

                if consecutive_errors >= MAX_CONSECUTIVE_ERRORS {
                    bail!(
                        "Too many consecutive parse errors ({}) in {} - file may be corrupted",
                        consecutive_errors,
                        source
                    );
                }
            }
        }
    }

    check_failure_rate(skipped_count, total_lines, &source)?;

    if skipped_count > 0 {
        info!(
            "Parsed roster {}: {} characters ({} skipped)",
            source,
            characters.len(),
            skipped_count
        );
    }

    Ok(characters)
}

/// Parse a file holding exactly one character object
pub fn parse_character_file(path: &Path) -> Result<CharacterRecord> {
    let mut file = open_roster_file(path)?;
    let mut content = String::new();
    file.read_to_string(&mut content)
        .with_context(|| format!("Failed to read character file: {}", path.display()))?;

    serde_json::from_str(&content)
        .with_context(|| format!("Invalid character file: {}", path.display()))
}

fn check_failure_rate(failed: usize, total: usize, source: &str) -> Result<()> {
    if total > 0 {
        let failure_rate = failed as f64 / total as f64;
        if failure_rate > 0.5 {
            bail!(
                "Too many parse failures in {}: {} of {} characters failed ({:.1}%)",
                source,
                failed,
                total,
                failure_rate * 100.0
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_parse_roster_json_array() {
        let content = r#"[{"id": "c1", "name": "Aria"}, {"id": "c2", "name": "Bram"}]"#;
        let characters = parse_roster_json(content, "test").unwrap();
        assert_eq!(characters.len(), 2);
        assert_eq!(characters[0].name, "Aria");
        assert_eq!(characters[1].name, "Bram");
    }

    #[test]
    fn test_parse_roster_json_wrapped() {
        let content = r#"{"version": 2, "characters": [{"id": "c1", "name": "Aria"}]}"#;
        let characters = parse_roster_json(content, "test").unwrap();
        assert_eq!(characters.len(), 1);
    }

    #[test]
    fn test_parse_roster_json_single_object() {
        let content = r#"{"id": "c1", "name": "Aria"}"#;
        let characters = parse_roster_json(content, "test").unwrap();
        assert_eq!(characters.len(), 1);
        assert_eq!(characters[0].id, "c1");
    }

    #[test]
    fn test_parse_roster_json_empty() {
        assert!(parse_roster_json("", "test").unwrap().is_empty());
        assert!(parse_roster_json("[]", "test").unwrap().is_empty());
        assert!(parse_roster_json(r#"{"characters": null}"#, "test").unwrap().is_empty());
    }

    #[test]
    fn test_parse_roster_json_skips_bad_characters() {
        let content = r#"[{"id": "c1"}, {"id": "c2"}, {"name": "no id"}]"#;
        let characters = parse_roster_json(content, "test").unwrap();
        assert_eq!(characters.len(), 2);
    }

    #[test]
    fn test_parse_roster_json_too_many_failures() {
        let content = r#"[{"id": "c1"}, {"name": "x"}, {"name": "y"}]"#;
        let err = parse_roster_json(content, "test").unwrap_err();
        assert!(err.to_string().contains("Too many parse failures"));
    }

    #[test]
    fn test_parse_roster_json_invalid() {
        assert!(parse_roster_json("{not json", "test").is_err());
        assert!(parse_roster_json("42", "test").is_err());
        assert!(parse_roster_json(r#"{"characters": "Aria"}"#, "test").is_err());
    }

    #[test]
    fn test_parse_roster_lines() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "roster.jsonl",
            "{\"id\": \"c1\", \"name\": \"Aria\"}\n\n{\"id\": \"c2\", \"name\": \"Bram\"}\n",
        );

        let characters = parse_roster_file(&path).unwrap();
        assert_eq!(characters.len(), 2);
        assert_eq!(characters[1].name, "Bram");
    }

    #[test]
    fn test_parse_roster_lines_skips_malformed() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "roster.jsonl",
            "{\"id\": \"c1\"}\n{broken\n{\"id\": \"c2\"}\n{\"id\": \"c3\"}\n",
        );

        let characters = parse_roster_lines(&path).unwrap();
        assert_eq!(characters.len(), 3);
    }

    #[test]
    fn test_parse_roster_lines_consecutive_errors() {
        let dir = TempDir::new().unwrap();
        let mut content = String::from("{\"id\": \"c1\"}\n");
        for _ in 0..MAX_CONSECUTIVE_ERRORS {
            content.push_str("garbage\n");
        }
        let path = write(&dir, "roster.jsonl", &content);

        let err = parse_roster_lines(&path).unwrap_err();
        assert!(err.to_string().contains("consecutive parse errors"));
    }

    #[test]
    fn test_parse_roster_file_uses_document_for_json() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "roster.json", r#"[{"id": "c1"}]"#);
        assert_eq!(parse_roster_file(&path).unwrap().len(), 1);
    }

    #[test]
    fn test_parse_character_file() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "aria.json", r#"{"id": "c1", "name": "Aria"}"#);
        assert_eq!(parse_character_file(&path).unwrap().name, "Aria");

        let bad = write(&dir, "bad.json", r#"{"name": "Aria"}"#);
        assert!(parse_character_file(&bad).is_err());
    }
}
