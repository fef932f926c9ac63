use crate::{
    foundation::core::{Affine, Point, Rect, Rgba8, Viewport},
    foundation::error::{ChoreoError, ChoreoResult},
    scene::entity::EntityId,
    scene::state::{PanelState, SampledFrame},
};

/// Output settings of the preview rasteriser.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PreviewOpts {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Opaque clear colour.
    pub background: Rgba8,
}

impl Default for PreviewOpts {
    fn default() -> Self {
        Self {
            width: 600,
            height: 400,
            background: Rgba8::opaque(18, 20, 28),
        }
    }
}

/// Draw every panel of `frame` into an RGBA image.
///
/// Panel coordinates are viewport pixels; the viewport is stretched over the whole image.
/// Primary panels are painted first, secondary panels on top.
pub fn render_panels(
    frame: &SampledFrame,
    viewport: Viewport,
    panel_count: u32,
    opts: &PreviewOpts,
) -> ChoreoResult<image::RgbaImage> {
    if opts.width == 0 || opts.height == 0 {
        return Err(ChoreoError::validation("preview size must be non-zero"));
    }
    let w: u16 = opts
        .width
        .try_into()
        .map_err(|_| ChoreoError::validation("preview width exceeds u16"))?;
    let h: u16 = opts
        .height
        .try_into()
        .map_err(|_| ChoreoError::validation("preview height exceeds u16"))?;

    let mut ctx = vello_cpu::RenderContext::new(w, h);
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(to_cpu_color(opts.background));
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
        0.0,
        0.0,
        f64::from(opts.width),
        f64::from(opts.height),
    ));

    if !viewport.is_degenerate() {
        let view = Affine::scale_non_uniform(
            f64::from(opts.width) / viewport.width,
            f64::from(opts.height) / viewport.height,
        );
        let panels = (0..panel_count)
            .map(EntityId::Primary)
            .chain((0..panel_count).map(EntityId::Secondary));
        for id in panels {
            if let Some(p) = frame.panel(id) {
                fill_panel(&mut ctx, view, &p);
            }
        }
    }

    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    ctx.flush();
    ctx.render_to_pixmap(&mut pixmap);

    let mut data = pixmap.data_as_u8_slice().to_vec();
    unpremultiply_in_place(&mut data);
    image::RgbaImage::from_raw(opts.width, opts.height, data)
        .ok_or_else(|| ChoreoError::evaluation("preview buffer size mismatch"))
}

fn fill_panel(ctx: &mut vello_cpu::RenderContext, view: Affine, p: &PanelState) {
    let size = p.size;
    if size.width <= 0.0 || size.height <= 0.0 || p.opacity <= 0.0 {
        return;
    }
    let local = Rect::from_origin_size(Point::ORIGIN, size);
    let center = local.center();
    let xf = view
        * Affine::translate(p.position.to_vec2())
        * Affine::rotate_about(p.rotation_deg.to_radians(), center);

    // CSS gradient line: through the centre, long enough to reach the far corners
    let theta = p.gradient.angle_deg.to_radians();
    let (dx, dy) = (theta.sin(), -theta.cos());
    let half = ((size.width * dx).abs() + (size.height * dy).abs()) / 2.0;
    let start = vello_cpu::kurbo::Point::new(center.x - dx * half, center.y - dy * half);
    let end = vello_cpu::kurbo::Point::new(center.x + dx * half, center.y + dy * half);

    let stops = p.gradient.stops().map(|s| {
        let offset = (s.pos_pct / 100.0).clamp(0.0, 1.0) as f32;
        (offset, to_cpu_color(s.color))
    });
    let paint = vello_cpu::peniko::Gradient::new_linear(start, end).with_stops(stops);

    let opacity = p.opacity.clamp(0.0, 1.0) as f32;
    ctx.set_transform(affine_to_cpu(xf));
    ctx.set_paint(paint);
    if opacity < 1.0 {
        ctx.push_opacity_layer(opacity);
    }
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, size.width, size.height));
    if opacity < 1.0 {
        ctx.pop_layer();
    }
}

fn to_cpu_color(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn unpremultiply_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 {
            px[..3].fill(0);
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/preview/raster.rs"]
mod tests;
