//! Drawing surface abstraction and the retained drawing produced by a render

use kurbo::{Affine, BezPath, Point, Size};

use crate::color::Rgba;
use crate::document::{FillType, LineCap, LineJoin};

/// The handful of drawing operations a vector drawable needs. Paint state
/// set here applies to every following [`Canvas::draw_path`] call.
pub trait Canvas {
    /// Fill color; transparent disables filling.
    fn set_fill(&mut self, color: Rgba);
    /// Stroke color; transparent disables stroking.
    fn set_stroke(&mut self, color: Rgba);
    /// Stroke width in viewport units.
    fn set_stroke_width(&mut self, width: f64);
    /// Winding rule used by following fills.
    fn set_fill_type(&mut self, fill_type: FillType);
    /// Cap, join and miter limit used by following strokes.
    fn set_stroke_style(&mut self, cap: LineCap, join: LineJoin, miter_limit: f64);

    /// Draw `path`, given in viewport coordinates, offset by `origin`.
    fn draw_path(&mut self, origin: Point, path: &BezPath);
}

/// Paint state captured for one path
#[derive(Debug, Clone, PartialEq)]
pub struct Paint {
    /// Fill color, transparent for no fill
    pub fill: Rgba,
    /// Stroke color, transparent for no stroke
    pub stroke: Rgba,
    /// Stroke width in viewport units
    pub stroke_width: f64,
    /// Winding rule for the fill
    pub fill_type: FillType,
    /// Stroke end shape
    pub line_cap: LineCap,
    /// Stroke corner shape
    pub line_join: LineJoin,
    /// Miter length limit, relative to the stroke width
    pub miter_limit: f64,
}

impl Default for Paint {
    fn default() -> Self {
        Self {
            fill: Rgba::TRANSPARENT,
            stroke: Rgba::TRANSPARENT,
            stroke_width: 0.0,
            fill_type: FillType::NonZero,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
            miter_limit: 4.0,
        }
    }
}

/// A path together with the paint it was drawn with
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    /// Paint state at the time of the draw call
    pub paint: Paint,
    /// Outline in viewport coordinates
    pub path: BezPath,
}

/// Retained result of rendering a document. Sized in dp; the view transform
/// maps viewport coordinates onto that size. It is rasterized separately
/// for each output density.
#[derive(Debug, Clone, PartialEq)]
pub struct Drawing {
    size: Size,
    view: Affine,
    paint: Paint,
    shapes: Vec<Shape>,
}

impl Drawing {
    /// An empty drawing of `size` dp, with default paint.
    pub fn new(size: Size, view: Affine) -> Self {
        Self {
            size,
            view,
            paint: Paint::default(),
            shapes: Vec::new(),
        }
    }

    /// Size in dp.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Viewport to dp transform.
    pub fn view(&self) -> Affine {
        self.view
    }

    /// Recorded shapes, in drawing order.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }
}

impl Canvas for Drawing {
    fn set_fill(&mut self, color: Rgba) {
        self.paint.fill = color;
    }

    fn set_stroke(&mut self, color: Rgba) {
        self.paint.stroke = color;
    }

    fn set_stroke_width(&mut self, width: f64) {
        self.paint.stroke_width = width;
    }

    fn set_fill_type(&mut self, fill_type: FillType) {
        self.paint.fill_type = fill_type;
    }

    fn set_stroke_style(&mut self, cap: LineCap, join: LineJoin, miter_limit: f64) {
        self.paint.line_cap = cap;
        self.paint.line_join = join;
        self.paint.miter_limit = miter_limit;
    }

    fn draw_path(&mut self, origin: Point, path: &BezPath) {
        let path = Affine::translate(origin.to_vec2()) * path.clone();

        self.shapes.push(Shape {
            paint: self.paint.clone(),
            path,
        });
    }
}
