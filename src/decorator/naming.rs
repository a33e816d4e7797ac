//! Sequential naming
//!
//! The namer turns an ordered list of resolved nodes into `base1..baseN`
//! identifiers; measure identification derives composite ids from the
//! enclosing part's id and the measure's declared number.

use crate::decorator::DecorateError;
use crate::dom::{NodeId, ScoreTree};

/// Assign `base1..baseN` ids to `nodes` in list order.
///
/// Any previous id is overwritten unconditionally, so re-decorating simply
/// renumbers from 1.
pub fn decorate_nodes(tree: &mut ScoreTree, nodes: &[NodeId], base: &str) {
    for (index, id) in nodes.iter().enumerate() {
        tree.set_attribute(*id, "id", &format!("{}{}", base, index + 1));
    }
}

/// Assign `p<partId>_m<number>` ids to every direct measure of every part.
///
/// Part ids are assigned upstream (they arrive in the score's `part`
/// elements); a part without one is a checked precondition failure.
pub fn decorate_measures(tree: &mut ScoreTree) -> Result<(), DecorateError> {
    let parts: Vec<NodeId> = tree.children_with_tag(tree.root(), "part").collect();
    for (index, part) in parts.into_iter().enumerate() {
        let part_id = tree
            .attribute(part, "id")
            .ok_or(DecorateError::MissingPartId { index })?
            .to_string();
        let measures: Vec<NodeId> = tree.children_with_tag(part, "measure").collect();
        for measure in measures {
            let number = tree.attribute(measure, "number").unwrap_or("").to_string();
            tree.set_attribute(measure, "id", &format!("p{}_m{}", part_id, number));
        }
    }
    Ok(())
}
