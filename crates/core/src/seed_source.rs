//! Extraction of exported array literals from a TypeScript seed source.
//!
//! The seed file is treated strictly as data with a small grammar
//! (object / array / string / number / bool / null). Nothing is evaluated.
//! Extraction runs in three steps:
//!
//! 1. Locate `export const <name>` and the first `[` after its `=` sign.
//! 2. Scan forward tracking bracket depth to the matching `]`, skipping
//!    string literals and comments.
//! 3. Normalize the loose literal syntax into JSON and parse it.

use regex::Regex;
use serde_json::{Map, Value};

/// One raw entity record from the seed source, keyed by field name.
pub type Payload = Map<String, Value>;

/// Failures while extracting an export from the seed source.
#[derive(Debug, thiserror::Error)]
pub enum SeedSourceError {
    #[error("Seed export not found: {0}")]
    ExportNotFound(String),

    #[error("Unmatched bracket in seed data for export {0}")]
    UnmatchedBracket(String),

    #[error("Invalid literal syntax in seed export {export}: {source}")]
    Parse {
        export: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Seed export {export} item {index} is not an object")]
    NotAnObject { export: String, index: usize },
}

/// Extract the array exported as `export_name` as a list of payloads.
pub fn parse_exported_array(
    source: &str,
    export_name: &str,
) -> Result<Vec<Payload>, SeedSourceError> {
    let not_found = || SeedSourceError::ExportNotFound(export_name.to_string());

    let declaration_end = find_export(source, export_name).ok_or_else(not_found)?;

    // Skip any type annotation (`: Vibe[]`) by starting after the `=`.
    let assign = source[declaration_end..]
        .find('=')
        .map(|offset| declaration_end + offset + 1)
        .ok_or_else(not_found)?;
    let bracket_start = source[assign..]
        .find('[')
        .map(|offset| assign + offset)
        .ok_or_else(not_found)?;

    let bracket_end = find_matching_bracket(source, bracket_start)
        .ok_or_else(|| SeedSourceError::UnmatchedBracket(export_name.to_string()))?;

    let normalized = normalize_literal(&source[bracket_start..=bracket_end]);
    let items: Vec<Value> =
        serde_json::from_str(&normalized).map_err(|source| SeedSourceError::Parse {
            export: export_name.to_string(),
            source,
        })?;

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(payload) => Ok(payload),
            _ => Err(SeedSourceError::NotAnObject {
                export: export_name.to_string(),
                index,
            }),
        })
        .collect()
}

/// Byte offset just past `export const <name>`, matching the name as a
/// whole word so `vibes` does not match `vibesByOccasion`.
fn find_export(source: &str, export_name: &str) -> Option<usize> {
    let pattern = format!(r"export\s+const\s+{}\b", regex::escape(export_name));
    let re = Regex::new(&pattern).ok()?;
    re.find(source).map(|m| m.end())
}

/// Byte index of the `]` closing the `[` at `start`, or `None` if the
/// brackets never balance. Brackets inside strings and comments are ignored.
pub fn find_matching_bracket(source: &str, start: usize) -> Option<usize> {
    let chars: Vec<char> = source[start..].chars().collect();
    let mut skipped = String::new();
    let mut depth: usize = 0;
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '"' | '\'' | '`' => {
                i = copy_string(&chars, i, &mut skipped);
                continue;
            }
            '/' if matches!(chars.get(i + 1), Some('/') | Some('*')) => {
                i = skip_comment(&chars, i);
                continue;
            }
            '[' => depth += 1,
            ']' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    let offset: usize = chars[..i].iter().map(|c| c.len_utf8()).sum();
                    return Some(start + offset);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Rewrite a TypeScript array/object literal into JSON text.
///
/// - bare object keys are quoted
/// - single-quoted and backtick strings become double-quoted
/// - `undefined` becomes `null` (`true`/`false`/`null` are already JSON)
/// - trailing commas before `}` or `]` are dropped
/// - `//` and `/* */` comments are removed
///
/// Anything else is copied through untouched and left for the JSON parser
/// to reject.
pub fn normalize_literal(literal: &str) -> String {
    let chars: Vec<char> = literal.chars().collect();
    let mut out = String::with_capacity(literal.len());
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        match ch {
            '"' | '\'' | '`' => i = copy_string(&chars, i, &mut out),
            '/' if matches!(chars.get(i + 1), Some('/') | Some('*')) => {
                i = skip_comment(&chars, i);
            }
            ',' => {
                let next = skip_trivia(&chars, i + 1);
                if !matches!(chars.get(next), Some('}') | Some(']')) {
                    out.push(',');
                }
                i += 1;
            }
            c if is_ident_start(c) => {
                let start = i;
                while i < chars.len() && is_ident_continue(chars[i]) {
                    i += 1;
                }
                let word: String = chars[start..i].iter().collect();
                let next = skip_trivia(&chars, i);
                if chars.get(next) == Some(&':') {
                    out.push('"');
                    out.push_str(&word);
                    out.push('"');
                } else {
                    out.push_str(literal_spelling(&word));
                }
            }
            _ => {
                out.push(ch);
                i += 1;
            }
        }
    }

    out
}

fn literal_spelling(word: &str) -> &str {
    match word {
        "undefined" => "null",
        other => other,
    }
}

/// Copy the string literal opening at `start` as a JSON string and return
/// the index just past its closing quote.
fn copy_string(chars: &[char], start: usize, out: &mut String) -> usize {
    let quote = chars[start];
    let mut i = start + 1;
    out.push('"');

    while i < chars.len() {
        let ch = chars[i];
        if ch == '\\' {
            match chars.get(i + 1) {
                // JSON has no `\'` escape.
                Some('\'') => out.push('\''),
                Some(&escaped) => {
                    out.push('\\');
                    out.push(escaped);
                }
                None => out.push('\\'),
            }
            i += 2;
            continue;
        }
        if ch == quote {
            out.push('"');
            return i + 1;
        }
        match ch {
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            _ => out.push(ch),
        }
        i += 1;
    }

    // Unterminated: leave it open so the JSON parser reports it.
    i
}

/// Return the index just past the comment starting at `start`.
fn skip_comment(chars: &[char], start: usize) -> usize {
    let mut i = start + 2;
    if chars[start + 1] == '/' {
        while i < chars.len() && chars[i] != '\n' {
            i += 1;
        }
        return i;
    }
    while i + 1 < chars.len() {
        if chars[i] == '*' && chars[i + 1] == '/' {
            return i + 2;
        }
        i += 1;
    }
    chars.len()
}

/// Skip whitespace and comments starting at `i`.
fn skip_trivia(chars: &[char], mut i: usize) -> usize {
    loop {
        while i < chars.len() && chars[i].is_whitespace() {
            i += 1;
        }
        if chars.get(i) == Some(&'/') && matches!(chars.get(i + 1), Some('/') | Some('*')) {
            i = skip_comment(chars, i);
        } else {
            return i;
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    const SOURCE: &str = r#"
import type { Cocktail, Vibe } from "../models";

export const vibes: Vibe[] = [
  {
    id: "vibe-chill",
    name: 'Chill Night',
    description: "Low-key drinks.",
    icon: undefined, // no artwork yet
  },
];

export const cocktails: Cocktail[] = [
  {
    id: "cocktail-spritz",
    ingredients: ["aperitivo", "soda"],
    steps: [
      "Build over ice.",
      "Stir.",
    ],
    featured: true,
    /* retired: false */
    vibeIds: ["vibe-chill"],
  },
];
"#;

    #[test]
    fn outer_bracket_found_past_nested_arrays() {
        let start = SOURCE.find("export const cocktails").unwrap();
        let open = start + SOURCE[start..].find("= [").unwrap() + 2;
        let close = find_matching_bracket(SOURCE, open).unwrap();
        assert_eq!(&SOURCE[close..close + 2], "];");
        assert!(SOURCE[open..=close].contains("vibeIds"));
    }

    #[test]
    fn parses_nested_arrays_inside_objects() {
        let cocktails = parse_exported_array(SOURCE, "cocktails").unwrap();
        assert_eq!(cocktails.len(), 1);
        let cocktail = &cocktails[0];
        assert_eq!(cocktail["id"], "cocktail-spritz");
        assert_eq!(cocktail["ingredients"], json!(["aperitivo", "soda"]));
        assert_eq!(cocktail["steps"], json!(["Build over ice.", "Stir."]));
        assert_eq!(cocktail["featured"], json!(true));
        assert!(!cocktail.contains_key("retired"));
    }

    #[test]
    fn type_annotation_brackets_are_skipped() {
        let vibes = parse_exported_array(SOURCE, "vibes").unwrap();
        assert_eq!(vibes.len(), 1);
        assert_eq!(vibes[0]["name"], "Chill Night");
        assert_eq!(vibes[0]["icon"], Value::Null);
    }

    #[test]
    fn brackets_in_comments_and_strings_do_not_count() {
        let source = "export const vibes = [\n  // see [docs\n  { id: 'a' },\n];";
        assert_eq!(parse_exported_array(source, "vibes").unwrap().len(), 1);

        let source = "export const vibes = [\n  /* ]] */ { id: 'a', note: \"x]\" },\n];";
        let vibes = parse_exported_array(source, "vibes").unwrap();
        assert_eq!(vibes.len(), 1);
        assert_eq!(vibes[0]["note"], "x]");
    }

    #[test]
    fn raw_control_characters_in_strings_are_escaped() {
        let vibes = parse_exported_array("export const vibes = [{ id: `a\tb` }];", "vibes").unwrap();
        assert_eq!(vibes[0]["id"], "a\tb");

        let normalized = normalize_literal("['line\u{1}end']");
        assert_eq!(normalized, r#"["line\u0001end"]"#);
    }

    #[test]
    fn missing_export_is_not_found() {
        assert_matches!(
            parse_exported_array(SOURCE, "occasions"),
            Err(SeedSourceError::ExportNotFound(name)) if name == "occasions"
        );
    }

    #[test]
    fn export_name_must_match_whole_word() {
        let source = "export const vibesExtra = [{ id: 'x' }];";
        assert_matches!(
            parse_exported_array(source, "vibes"),
            Err(SeedSourceError::ExportNotFound(_))
        );
    }

    #[test]
    fn unbalanced_brackets_are_reported() {
        let source = "export const vibes = [{ id: 'x', tags: ['a' }";
        assert_matches!(
            parse_exported_array(source, "vibes"),
            Err(SeedSourceError::UnmatchedBracket(name)) if name == "vibes"
        );
    }

    #[test]
    fn expressions_are_rejected_not_evaluated() {
        let source = "export const vibes = [{ id: makeId() }];";
        assert_matches!(
            parse_exported_array(source, "vibes"),
            Err(SeedSourceError::Parse { .. })
        );
    }

    #[test]
    fn non_object_items_are_rejected() {
        let source = "export const vibes = [{ id: 'a' }, 'b'];";
        assert_matches!(
            parse_exported_array(source, "vibes"),
            Err(SeedSourceError::NotAnObject { index: 1, .. })
        );
    }

    #[test]
    fn normalizes_quotes_keys_and_trailing_commas() {
        let normalized = normalize_literal(r#"[{ name: 'Say "hi"', note: 'it\'s', n: -1.5, ok: false, }, ]"#);
        let value: Value = serde_json::from_str(&normalized).unwrap();
        assert_eq!(
            value,
            json!([{ "name": "Say \"hi\"", "note": "it's", "n": -1.5, "ok": false }])
        );
    }

    #[test]
    fn keys_inside_strings_are_left_alone() {
        let normalized = normalize_literal(r#"[{ step: "Stir, garnish: lime" }]"#);
        let value: Value = serde_json::from_str(&normalized).unwrap();
        assert_eq!(value, json!([{ "step": "Stir, garnish: lime" }]));
    }

    #[test]
    fn parses_repository_seed_file() {
        let source = include_str!("../../../data/seedData.ts");
        assert_eq!(parse_exported_array(source, "vibes").unwrap().len(), 5);
        assert_eq!(parse_exported_array(source, "occasions").unwrap().len(), 3);
        assert_eq!(parse_exported_array(source, "difficulties").unwrap().len(), 3);
        assert_eq!(parse_exported_array(source, "alcoholLevels").unwrap().len(), 3);
        assert_eq!(parse_exported_array(source, "cocktails").unwrap().len(), 5);
    }
}
