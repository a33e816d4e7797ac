//! MusicXML element identifiers
//!
//! Loads a partwise MusicXML score, assigns stable, deterministic,
//! human-readable ids to its elements (`note1`, `rest2`, `beam1`, `slur1`,
//! `pP1_m4`, ...) and writes the decorated score back out. Renderers,
//! highlighters and alignment tools address musical objects by these ids.
//!
//! ```
//! let xml = r#"<score-partwise>
//!   <part id="P1">
//!     <measure number="1">
//!       <note><pitch><step>C</step></pitch></note>
//!       <note><rest/></note>
//!     </measure>
//!   </part>
//! </score-partwise>"#;
//!
//! let decorated = mxml_decorator::decorate_musicxml(xml).unwrap();
//! assert!(decorated.contains("id=\"note1\""));
//! assert!(decorated.contains("id=\"rest1\""));
//! assert!(decorated.contains("id=\"pP1_m1\""));
//! ```

pub mod decorator;
pub mod diagnostics;
pub mod dom;

pub use decorator::{decorate, DecorateError};
pub use dom::{load_musicxml, write_musicxml, NodeId, ParseError, ScoreTree};

use thiserror::Error;

/// Top-level error for the load → decorate → write pipeline.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to load score: {0}")]
    Parse(#[from] ParseError),

    #[error("failed to decorate score: {0}")]
    Decorate(#[from] DecorateError),

    #[error("failed to serialize score: {0}")]
    Write(#[from] quick_xml::Error),
}

/// Decorate a MusicXML document in one call.
///
/// Parses `xml`, runs the full decoration pipeline and returns the
/// decorated document as MusicXML text.
pub fn decorate_musicxml(xml: &str) -> Result<String, Error> {
    let mut tree = load_musicxml(xml)?;
    decorate(&mut tree)?;
    Ok(write_musicxml(&tree)?)
}
