use cairo::{Format, ImageSurface};
use eyre::{Context, Result};
use kurbo::Affine;
use piet::{RenderContext, StrokeStyle};
use piet_cairo::CairoRenderContext;

use crate::canvas::{Drawing, Shape};
use crate::document::{FillType, LineCap, LineJoin};

impl Drawing {
    /// Pixel dimensions of the drawing rasterized at `scale`, never below 1x1.
    pub fn pixel_size(&self, scale: f64) -> (i32, i32) {
        let size = self.size() * scale;

        (
            size.width.round().max(1.0) as i32,
            size.height.round().max(1.0) as i32,
        )
    }

    /// Rasterize onto a new transparent ARGB surface, `scale` pixels per dp.
    pub fn rasterize(&self, scale: f64) -> Result<ImageSurface> {
        let (width, height) = self.pixel_size(scale);

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .wrap_err("failed to create cairo surface")?;

        {
            let cr = cairo::Context::new(&surface).wrap_err("failed to create cairo context")?;
            let mut piet_context = CairoRenderContext::new(&cr);

            self.paint(&mut piet_context, Affine::scale(scale));

            piet_context
                .finish()
                .map_err(|e| eyre::eyre!("{}", e))
                .wrap_err("failed to finalize piet context")?;
        }

        surface.flush();

        Ok(surface)
    }

    /// Rasterize at `scale` and encode the result as PNG.
    pub fn render_png(&self, writer: &mut impl std::io::Write, scale: f64) -> Result<()> {
        let surface = self.rasterize(scale)?;
        surface.write_to_png(writer)?;

        Ok(())
    }

    /// Replay every shape onto `rc`. `device` maps dp onto the target's
    /// coordinates and is applied on top of the view transform.
    pub fn paint<R>(&self, rc: &mut R, device: Affine)
    where
        R: RenderContext,
    {
        rc.transform(device * self.view());

        for shape in self.shapes() {
            draw_shape(rc, shape);
        }
    }
}

fn stroke_style(shape: &Shape) -> StrokeStyle {
    let paint = &shape.paint;

    let join = match paint.line_join {
        LineJoin::Miter => piet::LineJoin::Miter {
            limit: paint.miter_limit,
        },
        LineJoin::Round => piet::LineJoin::Round,
        LineJoin::Bevel => piet::LineJoin::Bevel,
    };
    let cap = match paint.line_cap {
        LineCap::Butt => piet::LineCap::Butt,
        LineCap::Round => piet::LineCap::Round,
        LineCap::Square => piet::LineCap::Square,
    };

    StrokeStyle::new().line_join(join).line_cap(cap)
}

fn draw_shape<R>(rc: &mut R, shape: &Shape)
where
    R: RenderContext,
{
    let paint = &shape.paint;

    if !paint.fill.is_transparent() {
        let fill = rc.solid_brush(paint.fill.into());

        match paint.fill_type {
            FillType::NonZero => rc.fill(&shape.path, &fill),
            FillType::EvenOdd => rc.fill_even_odd(&shape.path, &fill),
        }
    }

    if !paint.stroke.is_transparent() && paint.stroke_width > 0.0 {
        let line = rc.solid_brush(paint.stroke.into());

        rc.stroke_styled(&shape.path, &line, paint.stroke_width, &stroke_style(shape));
    }
}
