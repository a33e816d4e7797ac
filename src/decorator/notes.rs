//! Note/rest classification and beam starts
//!
//! MusicXML represents rests as `note` elements with a `rest` child, and
//! beams as per-note `beam` elements whose text says whether a beam group
//! starts, continues or ends at that note.

use crate::decorator::naming::decorate_nodes;
use crate::decorator::resolve::resolve;
use crate::dom::{NodeId, ScoreTree};

/// Beam texts that open a beam group. `continue` and `end` never do.
const BEAM_START_TEXTS: &[&str] = &["begin", "backward hook", "forward hook"];

/// Partition every `note` element into notes and rests and number the two
/// lists as `note1..n` / `rest1..m`.
///
/// A note with a direct `rest` child is a rest; everything else is a note,
/// so each note element ends up with exactly one of the two ids.
pub fn decorate_notes(tree: &mut ScoreTree) {
    let all_notes: Vec<NodeId> = tree
        .descendants(tree.root())
        .filter(|id| tree.tag(*id) == "note")
        .collect();
    let (rests, notes): (Vec<NodeId>, Vec<NodeId>) = all_notes
        .into_iter()
        .partition(|id| tree.has_child_with_tag(*id, "rest"));

    decorate_nodes(tree, &notes, "note");
    decorate_nodes(tree, &rests, "rest");
}

/// Number beam elements that open a beam group as `beam1..n`.
///
/// Non-start beams are left untouched.
pub fn decorate_beams(tree: &mut ScoreTree) {
    let beams = resolve(tree, &["note/beam"]);
    let starts: Vec<NodeId> = beams
        .into_iter()
        .filter(|id| match tree.text(*id) {
            Some(text) => BEAM_START_TEXTS.contains(&text),
            None => false,
        })
        .collect();
    log::debug!("found {} beam start(s)", starts.len());
    decorate_nodes(tree, &starts, "beam");
}
