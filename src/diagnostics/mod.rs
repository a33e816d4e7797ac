//! Identifier audits
//!
//! Downstream tooling aligns annotations against the ids the decorator
//! produced, so a decorated score can be audited before it ships: every
//! counter category must cover exactly `1..=N` in document order, and every
//! measure id must match its part id and declared number. The report
//! serializes to JSON for offline inspection.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::dom::{NodeId, ScoreTree};

/// One identifier that does not match what decoration should have produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdError {
    pub category: String,
    pub produced: String,
    pub expected: String,
}

/// Audit result: per-category id counts plus every violation found.
#[derive(Debug, Default, Serialize)]
pub struct IdReport {
    pub counts: BTreeMap<String, usize>,
    pub errors: Vec<IdError>,
}

impl IdReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Audit every id attribute in a decorated score.
pub fn verify(tree: &ScoreTree) -> IdReport {
    let mut report = IdReport::default();
    verify_measures(tree, &mut report);
    verify_counters(tree, &mut report);
    report
}

fn verify_measures(tree: &ScoreTree, report: &mut IdReport) {
    for part in tree.children_with_tag(tree.root(), "part") {
        let part_id = tree.attribute(part, "id").unwrap_or("");
        for measure in tree.children_with_tag(part, "measure") {
            let Some(produced) = tree.attribute(measure, "id") else {
                continue;
            };
            *report.counts.entry("measure".to_string()).or_insert(0) += 1;
            let number = tree.attribute(measure, "number").unwrap_or("");
            let expected = format!("p{}_m{}", part_id, number);
            if produced != expected {
                report.errors.push(IdError {
                    category: "measure".to_string(),
                    produced: produced.to_string(),
                    expected,
                });
            }
        }
    }
}

fn verify_counters(tree: &ScoreTree, report: &mut IdReport) {
    // category name -> (produced id, parsed counter) in document order
    let mut sequences: BTreeMap<String, Vec<(String, Option<usize>)>> = BTreeMap::new();

    for id in tree.descendants(tree.root()) {
        if !is_counter_element(tree, id) {
            continue;
        }
        let Some(ident) = tree.attribute(id, "id") else {
            continue;
        };
        let (category, counter) = split_counter_id(ident);
        sequences
            .entry(category)
            .or_default()
            .push((ident.to_string(), counter));
    }

    for (category, entries) in sequences {
        report.counts.insert(category.clone(), entries.len());
        for (position, (produced, counter)) in entries.iter().enumerate() {
            let expected = format!("{}{}", category, position + 1);
            if *counter != Some(position + 1) {
                report.errors.push(IdError {
                    category: category.clone(),
                    produced: produced.clone(),
                    expected,
                });
            }
        }
    }
}

/// Counter-shaped ids live on everything except parts and their part-list
/// entries (external ids like `P1`) and measures (composite ids, checked
/// separately).
fn is_counter_element(tree: &ScoreTree, id: NodeId) -> bool {
    !matches!(tree.tag(id), "part" | "score-part" | "measure") && id != tree.root()
}

/// Split `slur12` into `("slur", Some(12))`; an id without a trailing
/// counter comes back with `None`.
fn split_counter_id(ident: &str) -> (String, Option<usize>) {
    let digits = ident
        .chars()
        .rev()
        .take_while(|c| c.is_ascii_digit())
        .count();
    if digits == 0 {
        return (ident.to_string(), None);
    }
    let split = ident.len() - digits;
    let counter = ident[split..].parse().ok();
    (ident[..split].to_string(), counter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decorator::decorate;
    use crate::dom::load_musicxml;

    fn decorated_fixture() -> ScoreTree {
        let mut tree = load_musicxml(
            r#"<score-partwise>
  <part id="P1">
    <measure number="1">
      <note><pitch><step>C</step></pitch></note>
      <note><rest/></note>
      <note><notations><slur type="start"/></notations></note>
      <note><notations><slur type="stop"/></notations></note>
    </measure>
  </part>
</score-partwise>"#,
        )
        .expect("failed to load");
        decorate(&mut tree).expect("failed to decorate");
        tree
    }

    #[test]
    fn decorated_score_passes_the_audit() {
        let report = verify(&decorated_fixture());
        assert!(report.is_clean(), "unexpected errors: {:?}", report.errors);
        assert_eq!(report.counts.get("note"), Some(&3));
        assert_eq!(report.counts.get("rest"), Some(&1));
        assert_eq!(report.counts.get("slur"), Some(&1));
        assert_eq!(report.counts.get("measure"), Some(&1));
    }

    #[test]
    fn tampered_counter_is_reported() {
        let mut tree = decorated_fixture();
        let second_note = tree
            .descendants(tree.root())
            .filter(|id| tree.tag(*id) == "note")
            .nth(2)
            .unwrap();
        tree.set_attribute(second_note, "id", "note7");

        let report = verify(&tree);
        assert_eq!(
            report.errors,
            vec![IdError {
                category: "note".to_string(),
                produced: "note7".to_string(),
                expected: "note2".to_string(),
            }]
        );
    }

    #[test]
    fn wrong_measure_id_is_reported() {
        let mut tree = decorated_fixture();
        let part = tree.children(tree.root())[0];
        let measure = tree.children(part)[0];
        tree.set_attribute(measure, "id", "pP9_m1");

        let report = verify(&tree);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].category, "measure");
        assert_eq!(report.errors[0].expected, "pP1_m1");
    }

    #[test]
    fn report_serializes_to_json() {
        let report = verify(&decorated_fixture());
        let json = report.to_json().expect("failed to serialize");
        assert!(json.contains("\"counts\""));
        assert!(json.contains("\"note\": 3"));
    }
}
