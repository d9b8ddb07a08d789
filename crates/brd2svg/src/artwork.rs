//! Subpart artwork handling: validation and embedding of per-package SVGs.
//!
//! An artwork asset is kept as its original markup string; embedding streams
//! it through quick-xml into the output writer, dropping the root `<svg>`
//! element (and with it the asset's own `width`/`height`/`viewBox`, so the
//! enclosing canvas governs rendering) and re-emitting all children. The
//! source string is never modified, so one cached asset can back any number
//! of placements.
//!
//! When a translation offset is supplied, coordinate-bearing attributes are
//! rewritten in place: single coordinates (`x`, `y`, `x1`, ..., `cx`, `cy`),
//! `points` pair lists, and `d` path data (via the path-data rewriter).

use crate::pathdata::translate_path_data;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use quick_xml::writer::Writer;
use std::io::Cursor;
use svgtypes::PointsParser;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArtworkError {
    #[error("SVG parse error at position {position}: {source}")]
    Xml {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },
    #[error("I/O error while writing SVG: {0}")]
    Io(#[from] std::io::Error),
}

/// Attributes holding a single X coordinate.
const X_ATTRS: [&[u8]; 3] = [b"x", b"x1", b"x2"];
/// Attributes holding a single Y coordinate.
const Y_ATTRS: [&[u8]; 3] = [b"y", b"y1", b"y2"];

/// One package's vector artwork, validated but otherwise untouched.
#[derive(Debug, Clone)]
pub struct Artwork {
    content: String,
}

impl Artwork {
    /// Validate an SVG document and wrap it for later embedding.
    ///
    /// The full event stream is walked once up front so a malformed asset is
    /// rejected here — before anything has been written to the output — and
    /// the owning component can be skipped cleanly.
    pub fn parse(content: &str) -> Result<Artwork, ArtworkError> {
        let mut reader = Reader::from_str(content);
        loop {
            match reader.read_event() {
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(source) => {
                    return Err(ArtworkError::Xml { position: reader.error_position(), source });
                }
            }
        }
        Ok(Artwork { content: content.to_string() })
    }

    /// Stream the artwork's child elements into `writer`.
    ///
    /// The root element is skipped entirely; everything inside it is copied
    /// verbatim unless `offset` is set, in which case coordinate-bearing
    /// attributes are shifted by `(dx, dy)`.
    pub fn write_children(
        &self,
        writer: &mut Writer<Cursor<Vec<u8>>>,
        offset: Option<(f64, f64)>,
    ) -> Result<(), ArtworkError> {
        let mut reader = Reader::from_str(&self.content);
        let mut depth = 0usize;

        loop {
            match reader.read_event() {
                Ok(Event::Eof) => break,
                Ok(Event::Start(ref e)) => {
                    if depth > 0 {
                        match offset {
                            Some((dx, dy)) => {
                                writer.write_event(Event::Start(shift_element(e, dx, dy)))?
                            }
                            None => writer.write_event(Event::Start(e.to_owned()))?,
                        }
                    }
                    depth += 1;
                }
                Ok(Event::Empty(ref e)) => {
                    if depth > 0 {
                        match offset {
                            Some((dx, dy)) => {
                                writer.write_event(Event::Empty(shift_element(e, dx, dy)))?
                            }
                            None => writer.write_event(Event::Empty(e.to_owned()))?,
                        }
                    }
                }
                Ok(Event::End(ref e)) => {
                    depth = depth.saturating_sub(1);
                    if depth > 0 {
                        writer.write_event(Event::End(e.to_owned()))?;
                    }
                }
                // The asset's own prolog has no place inside the composite.
                Ok(Event::Decl(_)) | Ok(Event::DocType(_)) | Ok(Event::PI(_)) => {}
                Ok(e) => {
                    if depth > 0 {
                        writer.write_event(e)?;
                    }
                }
                Err(source) => {
                    return Err(ArtworkError::Xml { position: reader.error_position(), source });
                }
            }
        }

        Ok(())
    }
}

/// Rebuild a start tag with coordinate-bearing attributes shifted.
fn shift_element(e: &BytesStart, dx: f64, dy: f64) -> BytesStart<'static> {
    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let mut elem = BytesStart::new(name);

    for attr in e.attributes().flatten() {
        let delta = coordinate_delta(attr.key.as_ref(), dx, dy);
        let is_points = attr.key.as_ref() == b"points";
        let is_d = attr.key.as_ref() == b"d";

        if delta.is_none() && !is_points && !is_d {
            // Copied through with its raw (still-escaped) value intact.
            elem.push_attribute(attr);
            continue;
        }

        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = String::from_utf8_lossy(&attr.value).into_owned();

        if let Some(delta) = delta {
            match value.parse::<f64>() {
                Ok(n) => {
                    elem.push_attribute((key.as_str(), format!("{:.3}", n + delta).as_str()))
                }
                // Percentages and the like pass through untouched.
                Err(_) => elem.push_attribute((key.as_str(), value.as_str())),
            }
        } else if is_points {
            elem.push_attribute(("points", shift_points(&value, dx, dy).as_str()));
        } else {
            elem.push_attribute(("d", translate_path_data(&value, dx, dy).as_str()));
        }
    }

    elem
}

fn coordinate_delta(key: &[u8], dx: f64, dy: f64) -> Option<f64> {
    if X_ATTRS.contains(&key) || key == b"cx" {
        Some(dx)
    } else if Y_ATTRS.contains(&key) || key == b"cy" {
        Some(dy)
    } else {
        None
    }
}

/// Shift a `points` pair list, re-emitting canonical `x,y x,y` syntax.
fn shift_points(points: &str, dx: f64, dy: f64) -> String {
    PointsParser::from(points)
        .map(|(x, y)| format!("{:.3},{:.3}", x + dx, y + dy))
        .collect::<Vec<_>>()
        .join(" ")
}

// ============================================================================
// TESTS
// ============================================================================
