//! MusicXML serialization layer
//!
//! Writes a [`ScoreTree`] back out as MusicXML text with the standard 3.1
//! partwise header, so decorated documents can be handed to renderers that
//! expect a regular MusicXML file.

use crate::dom::{NodeId, ScoreTree};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

const PARTWISE_DOCTYPE: &str = "score-partwise PUBLIC \
\"-//Recordare//DTD MusicXML 3.1 Partwise//EN\" \
\"http://www.musicxml.org/dtds/partwise.dtd\"";

/// Serialize a score tree to MusicXML text.
pub fn write_musicxml(tree: &ScoreTree) -> Result<String, quick_xml::Error> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::DocType(BytesText::from_escaped(PARTWISE_DOCTYPE)))?;
    write_element(&mut writer, tree, tree.root())?;

    let bytes = writer.into_inner();
    // The writer only ever receives UTF-8 input.
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn write_element(
    writer: &mut Writer<Vec<u8>>,
    tree: &ScoreTree,
    id: NodeId,
) -> Result<(), quick_xml::Error> {
    let mut start = BytesStart::new(tree.tag(id));
    for (name, value) in tree.attributes(id) {
        start.push_attribute((name, value));
    }

    let children = tree.children(id);
    let text = tree.text(id);
    if children.is_empty() && text.is_none() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    if let Some(text) = text {
        writer.write_event(Event::Text(BytesText::new(text)))?;
    }
    for child in children {
        write_element(writer, tree, *child)?;
    }
    writer.write_event(Event::End(BytesEnd::new(tree.tag(id))))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::load_musicxml;

    #[test]
    fn writes_header_and_attributes() {
        let mut tree = ScoreTree::with_root("score-partwise");
        tree.set_attribute(tree.root(), "version", "3.1");
        let part = tree.add_child(tree.root(), "part");
        tree.set_attribute(part, "id", "P1");

        let xml = write_musicxml(&tree).expect("failed to write");
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<!DOCTYPE score-partwise PUBLIC"));
        assert!(xml.contains("<part id=\"P1\"/>"));
    }

    #[test]
    fn round_trips_through_the_loader() {
        let xml = r#"<score-partwise version="3.1">
  <part id="P1">
    <measure number="1">
      <note><beam number="1">begin</beam></note>
      <note><rest/></note>
    </measure>
  </part>
</score-partwise>"#;

        let tree = load_musicxml(xml).expect("failed to load");
        let written = write_musicxml(&tree).expect("failed to write");
        let reloaded = load_musicxml(&written).expect("failed to reload");

        let beams: Vec<_> = reloaded
            .descendants(reloaded.root())
            .filter(|id| reloaded.tag(*id) == "beam")
            .collect();
        assert_eq!(beams.len(), 1);
        assert_eq!(reloaded.text(beams[0]), Some("begin"));
        assert!(reloaded
            .descendants(reloaded.root())
            .any(|id| reloaded.tag(id) == "rest"));
    }

    #[test]
    fn escapes_text_content() {
        let mut tree = ScoreTree::with_root("score-partwise");
        let part = tree.add_child(tree.root(), "part");
        let measure = tree.add_child(part, "measure");
        let words = tree.add_child(measure, "words");
        tree.set_text(words, "D.C. al Coda <fine>");

        let xml = write_musicxml(&tree).expect("failed to write");
        assert!(xml.contains("D.C. al Coda &lt;fine&gt;"));
    }
}
