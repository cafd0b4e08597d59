//! Column token resolution.
//!
//! A template may reference other columns as `/columnId`. Resolution
//! substitutes the row's stringified value for every token whose id matches
//! a column and which is not immediately followed by a word character.
//!
//! Substituted text never becomes a token itself: the template is split into
//! literal and resolved segments, and each column's pass only scans segments
//! that are still literal. There is no recursive expansion, so circular
//! formulas cannot loop.

use cellforge_model::{ColumnDef, Row};

enum Segment {
    Literal(String),
    Resolved(String),
}

fn is_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Resolve every `/columnId` token in `template` against `row`.
///
/// Columns are processed longest-id-first so a short id never matches inside
/// a longer one (`/email` must not fire inside `/email_2`). Null and absent
/// cells substitute as the empty string. Tokens naming no column are left
/// verbatim.
#[must_use]
pub fn resolve(template: &str, row: &Row, columns: &[ColumnDef]) -> String {
    let mut segments = vec![Segment::Literal(template.to_string())];

    for col in by_id_length(columns) {
        let value = row.text(&col.id);
        let mut next = Vec::with_capacity(segments.len());
        for seg in segments {
            match seg {
                Segment::Resolved(s) => next.push(Segment::Resolved(s)),
                Segment::Literal(s) => split_on_token(&s, &col.id, &value, &mut next),
            }
        }
        segments = next;
    }

    segments
        .into_iter()
        .map(|seg| match seg {
            Segment::Literal(s) | Segment::Resolved(s) => s,
        })
        .collect()
}

/// Report which columns a template references, in template order.
#[must_use]
pub fn referenced_column_ids(template: &str, columns: &[ColumnDef]) -> Vec<String> {
    let mut found: Vec<(usize, &str)> = Vec::new();
    for col in by_id_length(columns) {
        for pos in token_positions(template, &col.id) {
            // Longer ids scanned first; skip hits inside an already-claimed span.
            let end = pos + 1 + col.id.len();
            let claimed = found
                .iter()
                .any(|(p, id)| pos >= *p && pos < p + 1 + id.len() || (*p >= pos && *p < end));
            if !claimed {
                found.push((pos, &col.id));
            }
        }
    }
    found.sort_by_key(|(pos, _)| *pos);
    let mut ids: Vec<String> = Vec::new();
    for (_, id) in found {
        if !ids.iter().any(|existing| existing == id) {
            ids.push(id.to_string());
        }
    }
    ids
}

/// Columns sorted by id length descending, ties broken lexicographically so
/// resolution order is deterministic.
fn by_id_length(columns: &[ColumnDef]) -> Vec<&ColumnDef> {
    let mut order: Vec<&ColumnDef> = columns.iter().collect();
    order.sort_by(|a, b| b.id.len().cmp(&a.id.len()).then_with(|| a.id.cmp(&b.id)));
    order
}

/// Byte offsets of every `/{id}` occurrence in `text` that respects the
/// trailing word boundary.
fn token_positions(text: &str, id: &str) -> Vec<usize> {
    let token = format!("/{id}");
    let mut positions = Vec::new();
    let mut from = 0;
    while let Some(found) = text[from..].find(&token) {
        let pos = from + found;
        let end = pos + token.len();
        let boundary_ok = text[end..].chars().next().map_or(true, |c| !is_word(c));
        if boundary_ok {
            positions.push(pos);
            from = end;
        } else {
            from = pos + 1;
        }
    }
    positions
}

/// Split one literal segment on every token occurrence, pushing alternating
/// literal and resolved segments.
fn split_on_token(text: &str, id: &str, value: &str, out: &mut Vec<Segment>) {
    let positions = token_positions(text, id);
    if positions.is_empty() {
        out.push(Segment::Literal(text.to_string()));
        return;
    }

    let token_len = 1 + id.len();
    let mut cursor = 0;
    for pos in positions {
        if pos > cursor {
            out.push(Segment::Literal(text[cursor..pos].to_string()));
        }
        out.push(Segment::Resolved(value.to_string()));
        cursor = pos + token_len;
    }
    if cursor < text.len() {
        out.push(Segment::Literal(text[cursor..].to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellforge_model::ColumnType;

    fn col(id: &str) -> ColumnDef {
        ColumnDef::new(id, id.to_uppercase(), ColumnType::Text)
    }

    fn row(pairs: &[(&str, &str)]) -> Row {
        let mut r = Row::with_id("r1");
        for (k, v) in pairs {
            r.set((*k).to_string(), *v);
        }
        r
    }

    #[test]
    fn test_basic_substitution() {
        let columns = vec![col("name"), col("city")];
        let r = row(&[("name", "Ada"), ("city", "London")]);
        assert_eq!(
            resolve("/name lives in /city", &r, &columns),
            "Ada lives in London"
        );
    }

    #[test]
    fn test_order_independent_for_disjoint_ids() {
        let r = row(&[("a1", "x"), ("b2", "y")]);
        let forward = vec![col("a1"), col("b2")];
        let reverse = vec![col("b2"), col("a1")];
        assert_eq!(resolve("/a1+/b2", &r, &forward), "x+y");
        assert_eq!(resolve("/a1+/b2", &r, &reverse), "x+y");
    }

    #[test]
    fn test_longer_id_wins_over_prefix() {
        let columns = vec![col("email"), col("email_2")];
        let r = row(&[("email", "a@x.com"), ("email_2", "b@x.com")]);
        assert_eq!(
            resolve("/email and /email_2", &r, &columns),
            "a@x.com and b@x.com"
        );
    }

    #[test]
    fn test_word_boundary_blocks_partial_match() {
        let columns = vec![col("id")];
        let r = row(&[("id", "7")]);
        // /id_2 names no known column, so nothing fires.
        assert_eq!(resolve("/id_2", &r, &columns), "/id_2");
        assert_eq!(resolve("/id.", &r, &columns), "7.");
        assert_eq!(resolve("/id", &r, &columns), "7");
    }

    #[test]
    fn test_unmatched_token_left_verbatim() {
        let columns = vec![col("name")];
        let r = row(&[("name", "Ada")]);
        assert_eq!(resolve("/name /ghost", &r, &columns), "Ada /ghost");
    }

    #[test]
    fn test_null_substitutes_empty() {
        let columns = vec![col("name")];
        let r = Row::with_id("r1");
        assert_eq!(resolve("name=/name!", &r, &columns), "name=!");
    }

    #[test]
    fn test_substituted_value_not_rescanned() {
        // The value of /a contains what looks like a /b token; it must not
        // be expanded by the later /b pass.
        let columns = vec![col("a"), col("b")];
        let r = row(&[("a", "see /b here"), ("b", "B")]);
        assert_eq!(resolve("/a", &r, &columns), "see /b here");
    }

    #[test]
    fn test_circular_references_terminate() {
        let columns = vec![col("a"), col("b")];
        let r = row(&[("a", "/b"), ("b", "/a")]);
        // Single-pass semantics: each token resolves once to the raw stored
        // text of the other cell.
        assert_eq!(resolve("/a", &r, &columns), "/b");
    }

    #[test]
    fn test_multiple_occurrences() {
        let columns = vec![col("x")];
        let r = row(&[("x", "9")]);
        assert_eq!(resolve("/x,/x,/x", &r, &columns), "9,9,9");
    }

    #[test]
    fn test_referenced_column_ids() {
        let columns = vec![col("email"), col("email_2"), col("name")];
        let ids = referenced_column_ids("hi /name, cc /email_2 and /email", &columns);
        assert_eq!(ids, vec!["name", "email_2", "email"]);
    }
}
