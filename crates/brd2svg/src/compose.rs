//! Canvas composition: extents, outline rendering, component placement.
//!
//! Takes the reconstructed outline and the resolved components and assembles
//! the final SVG document. Extents come from the outline's bounding box
//! (plus an optional margin) or a fixed default when the board has no
//! outline; either way they are expanded to cover every placed component so
//! content is never clipped. All content lives inside a single top-level
//! `<g id="breadboard">` container so downstream tools can transform the
//! composite as one unit.

use crate::artwork::{Artwork, ArtworkError};
use crate::brd::Component;
use crate::geometry::{BBox, Point};
use crate::outline::BoardOutline;
use crate::transform::{Orientation, Placement};
use crate::units::{
    CoordinateMap, DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, IDENTITY_SCALE,
    OUTPUT_UNITS_PER_INCH,
};
use quick_xml::events::{BytesDecl, BytesStart, Event};
use quick_xml::writer::Writer;
use std::io::Cursor;
use thiserror::Error;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Stroke styling for rendered outline wires, in output units.
const OUTLINE_STYLE: &str = "stroke:#000000;stroke-width:10";

#[derive(Debug, Error)]
pub enum ComposeError {
    #[error(transparent)]
    Artwork(#[from] ArtworkError),
    #[error("I/O error while assembling SVG: {0}")]
    Io(#[from] std::io::Error),
    #[error("assembled SVG is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// How a component's placement is realized in the output.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PlacementStrategy {
    /// Wrap the artwork in a `transform` attribute (the default).
    #[default]
    TransformAttr,
    /// Bake the anchor translation into the artwork's coordinates.
    ///
    /// Only exact for unmirrored, unrotated components — a translation-only
    /// rewrite cannot express mirror or rotation, so those components fall
    /// back to the transform attribute.
    RewriteCoords,
}

/// Tunable composition parameters.
#[derive(Debug, Clone, Copy)]
pub struct ComposeConfig {
    /// Source-unit to output-unit scale factor.
    pub scale: f64,
    /// Canvas padding around the computed extents, in output units.
    pub margin: f64,
    pub strategy: PlacementStrategy,
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self { scale: IDENTITY_SCALE, margin: 0.0, strategy: PlacementStrategy::default() }
    }
}

/// A component paired with its resolved artwork (`None` when the package
/// lookup failed).
#[derive(Debug, Clone)]
pub struct Part {
    pub component: Component,
    pub artwork: Option<Artwork>,
}

/// The assembled output document plus everything a caller reports on.
#[derive(Debug)]
pub struct Composite {
    pub svg: String,
    /// Final canvas extents in output units.
    pub extents: BBox,
    /// Names of components that produced a placement group.
    pub placed: Vec<String>,
    /// Names of components skipped with a warning.
    pub skipped: Vec<String>,
    pub warnings: Vec<String>,
}

/// Assemble the composite SVG.
pub fn compose(
    outline: Option<&BoardOutline>,
    parts: &[Part],
    config: &ComposeConfig,
) -> Result<Composite, ComposeError> {
    // The flip height is fixed before extent expansion so the outline and
    // every component anchor flip about the same reference.
    let scaled_outline_bbox = outline.map(|o| {
        let mut bbox = o.bounding_box();
        bbox.min_x *= config.scale;
        bbox.min_y *= config.scale;
        bbox.max_x *= config.scale;
        bbox.max_y *= config.scale;
        bbox
    });
    let flip_height = scaled_outline_bbox.map_or(DEFAULT_CANVAS_HEIGHT, |b| b.max_y);
    let map = CoordinateMap { scale: config.scale, flip_height };

    let mut warnings = Vec::new();
    let mut placed = Vec::new();
    let mut skipped = Vec::new();

    // Resolve orientations and anchors up front: extents must cover every
    // component that will actually be placed.
    let mut placements: Vec<(&Component, &Artwork, Placement)> = Vec::new();
    for part in parts {
        let component = &part.component;
        let Some(artwork) = part.artwork.as_ref() else {
            let warning = format!(
                "No SVG for package '{}' (component {})",
                component.package, component.name
            );
            log::warn!("{}", warning);
            warnings.push(warning);
            skipped.push(component.name.clone());
            continue;
        };

        let orientation = match Orientation::parse(&component.rot) {
            Ok(orientation) => orientation,
            Err(err) => {
                let warning = format!("Skipping component {}: {}", component.name, err);
                log::warn!("{}", warning);
                warnings.push(warning);
                skipped.push(component.name.clone());
                continue;
            }
        };

        let anchor = map.to_output(Point::new(component.x, component.y));
        placements.push((component, artwork, Placement::new(anchor.x, anchor.y, orientation)));
    }

    let mut extents = match outline {
        Some(o) => {
            let flipped: Vec<Point> =
                o.points().iter().map(|&p| map.to_output(p)).collect();
            // Construction guarantees at least one point.
            BBox::from_points(&flipped).unwrap_or_else(default_extents)
        }
        None => default_extents(),
    };
    for (_, _, placement) in &placements {
        extents.expand_to(Point::new(placement.x, placement.y));
    }
    extents.pad(config.margin);

    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut svg = BytesStart::new("svg");
    svg.push_attribute(("xmlns", SVG_NS));
    svg.push_attribute((
        "width",
        format!("{}in", extents.width() / OUTPUT_UNITS_PER_INCH).as_str(),
    ));
    svg.push_attribute((
        "height",
        format!("{}in", extents.height() / OUTPUT_UNITS_PER_INCH).as_str(),
    ));
    svg.push_attribute((
        "viewBox",
        format!("{} {} {} {}", extents.min_x, extents.min_y, extents.width(), extents.height())
            .as_str(),
    ));
    svg.push_attribute(("version", "1.1"));
    writer.write_event(Event::Start(svg))?;

    let mut container = BytesStart::new("g");
    container.push_attribute(("id", "breadboard"));
    writer.write_event(Event::Start(container))?;

    if let Some(o) = outline {
        for seg in o.segments() {
            let p1 = map.to_output(seg.start());
            let p2 = map.to_output(seg.end());
            let mut line = BytesStart::new("line");
            line.push_attribute(("x1", p1.x.to_string().as_str()));
            line.push_attribute(("y1", p1.y.to_string().as_str()));
            line.push_attribute(("x2", p2.x.to_string().as_str()));
            line.push_attribute(("y2", p2.y.to_string().as_str()));
            line.push_attribute(("style", OUTLINE_STYLE));
            writer.write_event(Event::Empty(line))?;
        }
    }

    for (component, artwork, placement) in &placements {
        let bake_translation = config.strategy == PlacementStrategy::RewriteCoords
            && !placement.orientation.mirrored
            && placement.orientation.angle == 0;

        let mut group = BytesStart::new("g");
        group.push_attribute(("id", component.name.as_str()));
        if !bake_translation {
            group.push_attribute(("transform", placement.to_svg_transform().as_str()));
        }
        writer.write_event(Event::Start(group))?;

        let offset = bake_translation.then_some((placement.x, placement.y));
        artwork.write_children(&mut writer, offset)?;

        writer.write_event(Event::End(BytesStart::new("g").to_end()))?;
        placed.push(component.name.clone());
    }

    writer.write_event(Event::End(BytesStart::new("g").to_end()))?;
    writer.write_event(Event::End(BytesStart::new("svg").to_end()))?;

    let svg = String::from_utf8(writer.into_inner().into_inner())?;
    Ok(Composite { svg, extents, placed, skipped, warnings })
}

fn default_extents() -> BBox {
    BBox { min_x: 0.0, min_y: 0.0, max_x: DEFAULT_CANVAS_WIDTH, max_y: DEFAULT_CANVAS_HEIGHT }
}

// ============================================================================
// TESTS
// ============================================================================
