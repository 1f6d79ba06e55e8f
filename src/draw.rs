//! Turns a [`VectorDocument`] into draw calls on a [`Canvas`]

use kurbo::{Affine, BezPath, Point, Size};
use log::debug;

use crate::canvas::{Canvas, Drawing};
use crate::color::{parse_color, ColorTable, Rgba};
use crate::dimension::parse_dimension;
use crate::document::VectorDocument;
use crate::error::Error;

/// Canvas size overrides in dp, replacing the document's own `width` and
/// `height` when set.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SizeOverride {
    /// Replacement width in dp
    pub width: Option<f64>,
    /// Replacement height in dp
    pub height: Option<f64>,
}

/// Canvas size in dp for `doc`.
pub fn canvas_size(doc: &VectorDocument, size: &SizeOverride) -> Result<Size, Error> {
    let width = match size.width {
        Some(w) => w,
        None => parse_dimension(&doc.width, "width")?,
    };
    let height = match size.height {
        Some(h) => h,
        None => parse_dimension(&doc.height, "height")?,
    };

    Ok(Size::new(width, height))
}

/// Maps the viewport rectangle onto a canvas of `size`, scaling each axis
/// independently. Origin stays top-left with y pointing down.
pub fn view_transform(size: Size, viewport: Size) -> Affine {
    Affine::scale_non_uniform(size.width / viewport.width, size.height / viewport.height)
}

/// Render `doc` at its own size.
pub fn render(doc: &VectorDocument, colors: &ColorTable) -> Result<Drawing, Error> {
    render_with(doc, colors, &SizeOverride::default())
}

/// Render `doc`, honouring size overrides.
pub fn render_with(
    doc: &VectorDocument,
    colors: &ColorTable,
    size: &SizeOverride,
) -> Result<Drawing, Error> {
    let size = canvas_size(doc, size)?;
    let view = view_transform(size, doc.viewport);
    debug!("canvas {}x{} dp, view {:?}", size.width, size.height, view);

    let mut drawing = Drawing::new(size, view);
    draw(doc, colors, &mut drawing)?;

    Ok(drawing)
}

/// Issue every path of `doc` in order. The first color or path data error
/// stops drawing.
pub fn draw(
    doc: &VectorDocument,
    colors: &ColorTable,
    canvas: &mut impl Canvas,
) -> Result<(), Error> {
    for element in &doc.paths {
        canvas.set_fill(Rgba::TRANSPARENT);
        canvas.set_stroke(Rgba::TRANSPARENT);
        canvas.set_stroke_width(element.stroke_width);
        canvas.set_fill_type(element.fill_type);
        canvas.set_stroke_style(element.line_cap, element.line_join, element.miter_limit);

        if let Some(token) = &element.fill_color {
            let color = parse_color(token, colors)?;
            canvas.set_fill(color.multiply_alpha(element.fill_alpha));
        }
        if let Some(token) = &element.stroke_color {
            let color = parse_color(token, colors)?;
            canvas.set_stroke(color.multiply_alpha(element.stroke_alpha));
        }

        let path = BezPath::from_svg(&element.path_data).map_err(|source| Error::PathParse {
            data: element.path_data.clone(),
            source,
        })?;

        canvas.draw_path(Point::ORIGIN, &path);
    }

    Ok(())
}
