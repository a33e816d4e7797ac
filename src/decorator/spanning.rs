//! Spanning notations
//!
//! Slurs, ties, wedges and the like span several notes and appear as
//! multiple elements that share a role discriminator (`type="start"`,
//! `"stop"`, `"continue"`, ...). Only the start endpoint gets an id; a
//! renderer pairs it with the next unmatched stop of the same tag. Counters
//! run per tag name, because one tag can serve several semantic categories
//! at different structural locations.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

use crate::decorator::DecorateError;
use crate::decorator::resolve::resolve;
use crate::dom::ScoreTree;

/// Discriminator values that open a spanning notation. Wedges use
/// `crescendo`/`diminuendo`, pedals `let-ring`/`sostenuto`, octave shifts
/// `up`/`down` instead of a plain `start`.
static START_MARKERS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "start",
        "crescendo",
        "diminuendo",
        "let-ring",
        "up",
        "down",
        "sostenuto",
    ]
    .into_iter()
    .collect()
});

/// Resolve `patterns` and assign `tag1..tagN` ids to the start endpoints.
///
/// One counter per distinct terminal tag of the supplied patterns, seeded
/// before matching so zero-match tags still start at 1. An element without
/// a `type` attribute aborts the whole pass; ids assigned before the
/// failure stay in place.
pub fn decorate_spanning(tree: &mut ScoreTree, patterns: &[&str]) -> Result<(), DecorateError> {
    let matches = resolve(tree, patterns);

    let mut counters: HashMap<String, usize> = HashMap::new();
    for pattern in patterns {
        let terminal = pattern.rsplit('/').next().unwrap_or(pattern);
        counters.insert(terminal.to_string(), 1);
    }

    for id in matches {
        let tag = tree.tag(id).to_string();
        let role = tree
            .attribute(id, "type")
            .ok_or_else(|| DecorateError::MissingDiscriminator { tag: tag.clone() })?;

        if START_MARKERS.contains(role) {
            let counter = counters.entry(tag.clone()).or_insert(1);
            tree.set_attribute(id, "id", &format!("{}{}", tag, counter));
            *counter += 1;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::load_musicxml;

    #[test]
    fn numbers_only_start_endpoints() {
        let mut tree = load_musicxml(
            r#"<score-partwise>
  <part id="P1">
    <measure number="1">
      <note><notations><slur number="1" type="start"/></notations></note>
      <note><notations><slur number="1" type="continue"/></notations></note>
      <note><notations><slur number="1" type="stop"/></notations></note>
      <note><notations><slur number="2" type="start"/></notations></note>
    </measure>
  </part>
</score-partwise>"#,
        )
        .expect("failed to load");

        decorate_spanning(&mut tree, &["note/notations/slur"]).expect("failed to decorate");
        let ids: Vec<Option<&str>> = tree
            .descendants(tree.root())
            .filter(|id| tree.tag(*id) == "slur")
            .map(|id| tree.attribute(id, "id"))
            .collect();
        assert_eq!(ids, vec![Some("slur1"), None, None, Some("slur2")]);
    }

    #[test]
    fn wedge_roles_count_as_starts() {
        let mut tree = load_musicxml(
            r#"<score-partwise>
  <part id="P1">
    <measure number="1">
      <direction><direction-type><wedge type="crescendo"/></direction-type></direction>
      <direction><direction-type><wedge type="stop"/></direction-type></direction>
      <direction><direction-type><wedge type="diminuendo"/></direction-type></direction>
    </measure>
  </part>
</score-partwise>"#,
        )
        .expect("failed to load");

        decorate_spanning(&mut tree, &["direction/direction-type/wedge"])
            .expect("failed to decorate");
        let ids: Vec<Option<&str>> = tree
            .descendants(tree.root())
            .filter(|id| tree.tag(*id) == "wedge")
            .map(|id| tree.attribute(id, "id"))
            .collect();
        assert_eq!(ids, vec![Some("wedge1"), None, Some("wedge2")]);
    }

    #[test]
    fn counters_run_per_tag_across_patterns() {
        let mut tree = load_musicxml(
            r#"<score-partwise>
  <part id="P1">
    <measure number="1">
      <note><notations><slur type="start"/></notations></note>
      <note><notations><tied type="start"/></notations></note>
      <note><notations><slur type="start"/></notations></note>
    </measure>
  </part>
</score-partwise>"#,
        )
        .expect("failed to load");

        decorate_spanning(&mut tree, &["note/notations/slur", "note/notations/tied"])
            .expect("failed to decorate");
        let slur_ids: Vec<Option<&str>> = tree
            .descendants(tree.root())
            .filter(|id| tree.tag(*id) == "slur")
            .map(|id| tree.attribute(id, "id"))
            .collect();
        let tied = tree
            .descendants(tree.root())
            .find(|id| tree.tag(*id) == "tied")
            .unwrap();
        assert_eq!(slur_ids, vec![Some("slur1"), Some("slur2")]);
        assert_eq!(tree.attribute(tied, "id"), Some("tied1"));
    }

    #[test]
    fn missing_discriminator_aborts_but_keeps_earlier_ids() {
        let mut tree = load_musicxml(
            r#"<score-partwise>
  <part id="P1">
    <measure number="1">
      <note><notations><slur type="start"/></notations></note>
      <note><notations><slur/></notations></note>
    </measure>
  </part>
</score-partwise>"#,
        )
        .expect("failed to load");

        let err = decorate_spanning(&mut tree, &["note/notations/slur"]).unwrap_err();
        assert_eq!(
            err,
            DecorateError::MissingDiscriminator {
                tag: "slur".to_string()
            }
        );
        // partial mutation is visible, not rolled back
        let first = tree
            .descendants(tree.root())
            .find(|id| tree.tag(*id) == "slur")
            .unwrap();
        assert_eq!(tree.attribute(first, "id"), Some("slur1"));
    }
}
