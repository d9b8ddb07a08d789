//! Streaming reader for Eagle `.brd` board files.
//!
//! Uses quick-xml to stream through the document without building a DOM.
//! Only two things are extracted: boundary wires nested inside `<plain>`
//! (the board outline) and `<element>` placements nested inside `<elements>`.
//!
//! A document-level XML error is fatal. A single wire or element with a
//! malformed numeric attribute is skipped with a recorded warning so the
//! rest of the board still converts — the outline is never silently
//! fabricated from bad coordinates.

use crate::geometry::Segment;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BrdError {
    #[error("XML parse error at position {position}: {source}")]
    Xml {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },
}

/// One placed component, as declared in the board file.
///
/// `x`/`y` are the anchor position in source units; `rot` is the raw
/// orientation code (`R0` when the attribute is absent).
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub name: String,
    pub package: String,
    pub x: f64,
    pub y: f64,
    pub rot: String,
}

/// Everything extracted from a board file.
#[derive(Debug, Clone, Default)]
pub struct Board {
    /// Boundary wires found under `<plain>`, in document order.
    pub segments: Vec<Segment>,
    /// Component placements found under `<elements>`, in document order.
    pub components: Vec<Component>,
    /// Wires dropped because of missing/malformed coordinates.
    pub skipped_wires: usize,
    /// Warnings recorded while reading (one per skipped wire/element).
    pub warnings: Vec<String>,
}

/// Parse a `.brd` document from a string.
pub fn parse_board(content: &str) -> Result<Board, BrdError> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut board = Board::default();
    let mut in_plain = false;
    let mut in_elements = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                b"plain" => in_plain = true,
                b"elements" => in_elements = true,
                b"wire" if in_plain => process_wire(e, &mut board),
                b"element" if in_elements => process_element(e, &mut board),
                _ => {}
            },
            // A self-closed section has no children; it must not leave its
            // flag set, or later signal wires would be read as the outline.
            Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                b"wire" if in_plain => process_wire(e, &mut board),
                b"element" if in_elements => process_element(e, &mut board),
                _ => {}
            },
            Ok(Event::End(ref e)) => match e.name().as_ref() {
                b"plain" => in_plain = false,
                b"elements" => in_elements = false,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(source) => {
                return Err(BrdError::Xml { position: reader.error_position(), source });
            }
            _ => {}
        }
    }

    Ok(board)
}

/// Read one attribute as a string, if present.
fn get_attr(e: &BytesStart, key: &[u8]) -> Option<String> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == key {
            return Some(String::from_utf8_lossy(&attr.value).into_owned());
        }
    }
    None
}

/// Read one attribute as f64; `Err` carries the reason for the warning text.
fn get_f64_attr(e: &BytesStart, key: &[u8]) -> Result<f64, String> {
    let name = String::from_utf8_lossy(key).into_owned();
    match get_attr(e, key) {
        None => Err(format!("missing attribute '{}'", name)),
        Some(value) => value
            .parse::<f64>()
            .map_err(|_| format!("invalid number '{}' for attribute '{}'", value, name)),
    }
}

fn process_wire(e: &BytesStart, board: &mut Board) {
    let coords = (|| -> Result<Segment, String> {
        Ok(Segment::new(
            get_f64_attr(e, b"x1")?,
            get_f64_attr(e, b"y1")?,
            get_f64_attr(e, b"x2")?,
            get_f64_attr(e, b"y2")?,
        ))
    })();

    match coords {
        Ok(segment) => board.segments.push(segment),
        Err(reason) => {
            let warning = format!("Skipping outline wire: {}", reason);
            log::warn!("{}", warning);
            board.warnings.push(warning);
            board.skipped_wires += 1;
        }
    }
}

fn process_element(e: &BytesStart, board: &mut Board) {
    // Elements without a name or package cannot be placed; drop them the way
    // the source format expects (they carry nothing we can render).
    let (Some(name), Some(package)) = (get_attr(e, b"name"), get_attr(e, b"package")) else {
        return;
    };

    let parse_coord = |key: &[u8]| -> Result<f64, String> {
        match get_attr(e, key) {
            None => Ok(0.0),
            Some(value) => value.parse::<f64>().map_err(|_| {
                format!(
                    "invalid number '{}' for attribute '{}'",
                    value,
                    String::from_utf8_lossy(key)
                )
            }),
        }
    };

    match (parse_coord(b"x"), parse_coord(b"y")) {
        (Ok(x), Ok(y)) => {
            let rot = get_attr(e, b"rot").unwrap_or_else(|| "R0".to_string());
            board.components.push(Component { name, package, x, y, rot });
        }
        (Err(reason), _) | (_, Err(reason)) => {
            let warning = format!("Skipping element '{}': {}", name, reason);
            log::warn!("{}", warning);
            board.warnings.push(warning);
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
