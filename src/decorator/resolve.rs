//! Measure-scoped path resolution
//!
//! Patterns are slash-separated tag paths evaluated under every measure of
//! every part, e.g. `direction/direction-type/wedge`. Matches come back in
//! part order, then measure order, then document order within the measure,
//! concatenated across patterns in the order the patterns were supplied.

use crate::dom::{NodeId, ScoreTree};

/// Resolve a set of measure-scoped patterns against the whole score.
///
/// Matches from different patterns are concatenated, not deduplicated by
/// node identity; a node matched by two patterns appears twice. Zero
/// matches is an empty list, never an error.
pub fn resolve(tree: &ScoreTree, patterns: &[&str]) -> Vec<NodeId> {
    let mut matches = Vec::new();
    for pattern in patterns {
        let before = matches.len();
        resolve_pattern(tree, pattern, &mut matches);
        log::debug!(
            "pattern {:?} matched {} element(s)",
            pattern,
            matches.len() - before
        );
    }
    matches
}

fn resolve_pattern(tree: &ScoreTree, pattern: &str, out: &mut Vec<NodeId>) {
    let segments: Vec<&str> = pattern.split('/').collect();
    for part in tree.children_with_tag(tree.root(), "part") {
        for measure in tree.children_with_tag(part, "measure") {
            collect_matches(tree, measure, &segments, out);
        }
    }
}

fn collect_matches(tree: &ScoreTree, scope: NodeId, segments: &[&str], out: &mut Vec<NodeId>) {
    let Some((first, rest)) = segments.split_first() else {
        return;
    };
    for child in tree.children_with_tag(scope, first) {
        if rest.is_empty() {
            out.push(child);
        } else {
            collect_matches(tree, child, rest, out);
        }
    }
}
