//! Score decoration
//!
//! Assigns stable, deterministic, human-readable ids to the elements of a
//! loaded score so renderers and highlighters can address them: `note1`,
//! `rest2`, `beam1`, `slur3`, `pP1_m4`, ... Decoration mutates id
//! attributes only; it never restructures the tree.

pub mod naming;
pub mod notes;
pub mod resolve;
pub mod spanning;

pub use naming::{decorate_measures, decorate_nodes};
pub use notes::{decorate_beams, decorate_notes};
pub use resolve::resolve;
pub use spanning::decorate_spanning;

use thiserror::Error;

use crate::dom::ScoreTree;

/// Decoration failures. The pass is fail-fast: the first error stops all
/// remaining categories, and ids assigned before it stay in place.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecorateError {
    /// A spanning-notation element has no role discriminator.
    #[error("spanning element <{tag}> has no type attribute")]
    MissingDiscriminator { tag: String },

    /// A part reached measure identification without an id.
    #[error("part at index {index} has no id; part ids must be assigned before measures")]
    MissingPartId { index: usize },
}

/// Categories that live at a single location under a measure.
const SINGLE_LOCATION_CATEGORIES: &[(&str, &[&str])] = &[
    ("clef", &["attributes/clef"]),
    ("key", &["attributes/key"]),
    ("time", &["attributes/time"]),
    ("barline", &["barline"]),
    ("rehearsal", &["direction/direction-type/rehearsal"]),
    ("pedal", &["direction/direction-type/pedal"]),
];

/// Categories that may appear at several locations under a measure.
const MULTI_LOCATION_CATEGORIES: &[(&str, &[&str])] = &[
    ("coda", &["barline/coda", "direction/direction-type/coda"]),
    ("fermata", &["barline/fermata", "note/notations/fermata"]),
    ("segno", &["barline/segno", "direction/direction-type/segno"]),
    (
        "dynamics",
        &["note/notations/dynamics", "direction/direction-type/dynamics"],
    ),
];

/// Spanning categories, one per-tag counter space each.
const SPANNING_CATEGORIES: &[&[&str]] = &[
    &["note/notations/glissando"],
    &["note/notations/slide"],
    &["note/notations/slur"],
    &["note/notations/tied"],
    &["note/notations/tuplet"],
    &["direction/direction-type/wedge"],
    &["direction/direction-type/octave-shift"],
    &["direction/direction-type/bracket"],
    &["direction/direction-type/dashes"],
];

/// Resolve `patterns` and number the matches as `name1..nameN`.
pub fn find_and_decorate(tree: &mut ScoreTree, name: &str, patterns: &[&str]) {
    let nodes = resolve(tree, patterns);
    decorate_nodes(tree, &nodes, name);
}

/// Run the full decoration pipeline over one score.
///
/// Fixed order, single pass: notes/rests, simple categories, beam starts,
/// spanning categories, then measures. Measures must come after part ids
/// exist; the other steps own disjoint id namespaces and have no ordering
/// dependency on each other. Re-running on an already decorated score
/// renumbers everything from 1.
pub fn decorate(tree: &mut ScoreTree) -> Result<(), DecorateError> {
    decorate_notes(tree);

    for (name, patterns) in SINGLE_LOCATION_CATEGORIES {
        find_and_decorate(tree, name, patterns);
    }
    for (name, patterns) in MULTI_LOCATION_CATEGORIES {
        find_and_decorate(tree, name, patterns);
    }

    decorate_beams(tree);

    for patterns in SPANNING_CATEGORIES {
        decorate_spanning(tree, patterns)?;
    }

    decorate_measures(tree)?;
    let parts = tree.children_with_tag(tree.root(), "part").count();
    log::info!("decorated score with {} part(s)", parts);
    Ok(())
}
