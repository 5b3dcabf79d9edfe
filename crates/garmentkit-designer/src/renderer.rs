//! Raster renderer for one side of a design.
//!
//! Both modes draw onto a tiny-skia surface laid out in garment canvas pixels:
//! - `render_preview`: native template size, garment color fill, text and
//!   shapes only. Image and sticker elements are skipped so thumbnails never
//!   wait on asset fetches.
//! - `render_export`: supersampled, garment template image composited first
//!   (inverted on dark garments), every element kind drawn. Assets that fail
//!   to fetch or decode are skipped and the export still completes.
//!
//! Elements are positioned by offsetting their design-area-local box with the
//! design area origin, then rotated about their own center.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use garmentkit_core::Side;
use image::{imageops, ImageFormat, RgbaImage};
use rusttype::{point as rt_point, Font, PositionedGlyph, Scale};
use std::io::Cursor;
use std::path::Path;
use tiny_skia::{ColorU8, FillRule, Paint, PathBuilder, Pixmap, PixmapPaint, Rect, Transform};

use crate::collaborators::AssetSource;
use crate::coordinates::{element_canvas_rect, CanvasRect};
use crate::error::{DesignerError, DesignerResult};
use crate::font_manager;
use crate::model::{DesignElement, ElementKind, GarmentTemplate, Rgba, ShapeKind, TextAlign};

const DEFAULT_SHAPE_COLOR: Rgba = Rgba::rgb(59, 130, 246);
const TEXT_PADDING: f32 = 4.0;
const OUTLINE_STEPS: usize = 16;

struct Surface<'a> {
    pixmap: Pixmap,
    template: &'a GarmentTemplate,
    side: Side,
    scale: f64,
}

impl<'a> Surface<'a> {
    fn new(template: &'a GarmentTemplate, side: Side, scale: u32) -> DesignerResult<Self> {
        let scale = scale.max(1);
        let width = template.pixel_width.saturating_mul(scale);
        let height = template.pixel_height.saturating_mul(scale);
        let pixmap = Pixmap::new(width, height).ok_or_else(|| {
            DesignerError::render(format!("cannot allocate a {}x{} surface", width, height))
        })?;

        Ok(Self {
            pixmap,
            template,
            side,
            scale: scale as f64,
        })
    }

    fn element_rect(&self, element: &DesignElement) -> CanvasRect {
        element_canvas_rect(self.template, self.side, element).scaled(self.scale)
    }

    fn element_transform(element: &DesignElement, rect: &CanvasRect) -> Transform {
        let (cx, cy) = rect.center();
        Transform::from_rotate_at(element.rotation as f32, cx as f32, cy as f32)
    }

    fn fill(&mut self, color: Rgba) {
        self.pixmap.fill(color.to_skia());
    }

    /// Stretch the garment image over the whole surface.
    fn draw_background(&mut self, garment: &RgbaImage) {
        let resized = imageops::resize(
            garment,
            self.pixmap.width(),
            self.pixmap.height(),
            imageops::FilterType::Triangle,
        );
        if let Some(layer) = image_to_pixmap(&resized) {
            self.pixmap.draw_pixmap(
                0,
                0,
                layer.as_ref(),
                &PixmapPaint::default(),
                Transform::identity(),
                None,
            );
        }
    }

    fn draw_shape(&mut self, element: &DesignElement) {
        let rect = self.element_rect(element);
        let Some(bounds) = Rect::from_xywh(
            rect.x as f32,
            rect.y as f32,
            rect.width as f32,
            rect.height as f32,
        ) else {
            return;
        };

        let path = match element.shape_kind().unwrap_or(ShapeKind::Rect) {
            ShapeKind::Rect => Some(PathBuilder::from_rect(bounds)),
            ShapeKind::Circle => PathBuilder::from_oval(bounds),
            ShapeKind::Triangle => {
                let mut pb = PathBuilder::new();
                pb.move_to(bounds.left() + bounds.width() / 2.0, bounds.top());
                pb.line_to(bounds.left(), bounds.bottom());
                pb.line_to(bounds.right(), bounds.bottom());
                pb.close();
                pb.finish()
            }
        };
        let Some(path) = path else {
            return;
        };

        let color =
            Rgba::parse_or(&element.color, DEFAULT_SHAPE_COLOR).with_opacity(element.opacity);
        let mut paint = Paint::default();
        paint.set_color(color.to_skia());
        paint.anti_alias = true;

        let transform = Self::element_transform(element, &rect);
        self.pixmap
            .fill_path(&path, &paint, FillRule::Winding, transform, None);
    }

    fn draw_text(&mut self, element: &DesignElement) {
        let font = font_manager::get_font_for(&element.font_family, element.is_bold(), false);
        let rect = self.element_rect(element);
        if let Some(layer) = render_text_layer(font, element, &rect, self.scale as f32) {
            self.composite(&layer, element, &rect);
        }
    }

    /// Text and shapes; raster kinds are drawn by the caller once fetched.
    fn draw_vector(&mut self, element: &DesignElement) {
        match element.kind {
            ElementKind::Text => self.draw_text(element),
            ElementKind::Shape => self.draw_shape(element),
            ElementKind::Image | ElementKind::Sticker => {}
        }
    }

    fn draw_raster(&mut self, element: &DesignElement, image: &RgbaImage) {
        let rect = self.element_rect(element);
        let width = rect.width.round().max(1.0) as u32;
        let height = rect.height.round().max(1.0) as u32;
        let resized = imageops::resize(image, width, height, imageops::FilterType::Triangle);
        if let Some(layer) = image_to_pixmap(&resized) {
            self.composite(&layer, element, &rect);
        }
    }

    fn composite(&mut self, layer: &Pixmap, element: &DesignElement, rect: &CanvasRect) {
        let paint = PixmapPaint {
            opacity: (element.opacity / 100.0).clamp(0.0, 1.0) as f32,
            ..PixmapPaint::default()
        };
        let transform = Self::element_transform(element, rect);
        self.pixmap.draw_pixmap(
            rect.x.round() as i32,
            rect.y.round() as i32,
            layer.as_ref(),
            &paint,
            transform,
            None,
        );
    }

    fn finish(self) -> RgbaImage {
        pixmap_to_image(&self.pixmap)
    }
}

/// Render the fast preview of one side at the template's native size.
pub fn render_preview(
    template: &GarmentTemplate,
    side: Side,
    elements: &[DesignElement],
    garment_color: &str,
) -> DesignerResult<RgbaImage> {
    let mut surface = Surface::new(template, side, 1)?;
    surface.fill(Rgba::parse_or(garment_color, Rgba::WHITE));

    for element in elements.iter().filter(|e| !e.kind.is_raster()) {
        surface.draw_vector(element);
    }

    tracing::debug!("Rendered {} preview ({} elements)", side, elements.len());
    Ok(surface.finish())
}

/// Render the full-fidelity export of one side at `supersample` times the template size.
pub async fn render_export(
    template: &GarmentTemplate,
    side: Side,
    elements: &[DesignElement],
    garment_color: &str,
    supersample: u32,
    assets: &dyn AssetSource,
) -> DesignerResult<RgbaImage> {
    let mut surface = Surface::new(template, side, supersample)?;
    let base = Rgba::parse_or(garment_color, Rgba::WHITE);
    surface.fill(base);

    if let Some(reference) = template.image(side) {
        match fetch_image(assets, reference).await {
            Ok(mut garment) => {
                if base.is_dark() {
                    imageops::invert(&mut garment);
                }
                surface.draw_background(&garment);
            }
            Err(e) => {
                tracing::warn!("Garment image '{}' unavailable, using flat color: {}", reference, e)
            }
        }
    }

    let mut skipped = 0;
    for element in elements {
        if !element.kind.is_raster() {
            surface.draw_vector(element);
            continue;
        }
        match fetch_image(assets, &element.content).await {
            Ok(image) => surface.draw_raster(element, &image),
            Err(e) => {
                tracing::warn!("Skipping {} element {}: {}", element.kind, element.id, e);
                skipped += 1;
            }
        }
    }

    tracing::info!(
        "Rendered {} export at {}x ({} elements, {} skipped)",
        side,
        supersample.max(1),
        elements.len(),
        skipped
    );
    Ok(surface.finish())
}

async fn fetch_image(assets: &dyn AssetSource, reference: &str) -> DesignerResult<RgbaImage> {
    let bytes = assets
        .fetch(reference)
        .await
        .map_err(|e| DesignerError::Decode {
            reason: format!("fetch of '{}' failed: {}", reference, e),
        })?;
    decode_image(&bytes)
}

/// Decode image bytes of any supported format into RGBA.
pub fn decode_image(bytes: &[u8]) -> DesignerResult<RgbaImage> {
    Ok(image::load_from_memory(bytes)?.to_rgba8())
}

/// Natural dimensions of an encoded image, without decoding pixels.
pub fn image_dimensions(bytes: &[u8]) -> DesignerResult<(u32, u32)> {
    let reader = image::ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
    Ok(reader.into_dimensions()?)
}

pub fn encode_png(image: &RgbaImage) -> DesignerResult<Vec<u8>> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| DesignerError::render(format!("PNG encoding failed: {}", e)))?;
    Ok(bytes)
}

/// Encode as a `data:image/png;base64,...` URL.
pub fn to_data_url(image: &RgbaImage) -> DesignerResult<String> {
    Ok(format!(
        "data:image/png;base64,{}",
        STANDARD.encode(encode_png(image)?)
    ))
}

pub fn save_png(image: &RgbaImage, path: &Path) -> DesignerResult<()> {
    std::fs::write(path, encode_png(image)?)?;
    tracing::info!("Wrote {}x{} PNG to {}", image.width(), image.height(), path.display());
    Ok(())
}

fn pixmap_to_image(pixmap: &Pixmap) -> RgbaImage {
    let mut out = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in out.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = image::Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    out
}

fn image_to_pixmap(image: &RgbaImage) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(image.width(), image.height())?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(image.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Some(pixmap)
}

/// Draw a text element into its own layer sized to the element box.
///
/// Layer order: background, shadow, outline ring, fill. Shadow blur is not
/// applied; the shadow is a hard offset copy.
fn render_text_layer(
    font: &Font<'static>,
    element: &DesignElement,
    rect: &CanvasRect,
    scale: f32,
) -> Option<Pixmap> {
    let mut layer = Pixmap::new(
        rect.width.round().max(1.0) as u32,
        rect.height.round().max(1.0) as u32,
    )?;

    if let Some(background) = &element.text_background_color {
        layer.fill(Rgba::parse_or(background, Rgba::WHITE).to_skia());
    }

    let glyphs = layout_text(
        font,
        element,
        layer.width() as f32,
        layer.height() as f32,
        scale,
    );

    if let Some(shadow) = &element.text_shadow {
        let color = Rgba::parse_or(&shadow.color, Rgba::BLACK);
        draw_glyphs(
            &mut layer,
            &glyphs,
            shadow.dx as f32 * scale,
            shadow.dy as f32 * scale,
            color,
        );
    }

    if let Some(outline) = &element.text_outline {
        let radius = outline.width as f32 * scale;
        if radius > 0.0 {
            let color = Rgba::parse_or(&outline.color, Rgba::BLACK);
            for step in 0..OUTLINE_STEPS {
                let angle = step as f32 / OUTLINE_STEPS as f32 * std::f32::consts::TAU;
                draw_glyphs(
                    &mut layer,
                    &glyphs,
                    radius * angle.cos(),
                    radius * angle.sin(),
                    color,
                );
            }
        }
    }

    draw_glyphs(
        &mut layer,
        &glyphs,
        0.0,
        0.0,
        Rgba::parse_or(&element.color, Rgba::BLACK),
    );
    Some(layer)
}

/// Lay out the element's lines, vertically centered and horizontally aligned.
fn layout_text(
    font: &Font<'static>,
    element: &DesignElement,
    width: f32,
    height: f32,
    scale: f32,
) -> Vec<PositionedGlyph<'static>> {
    let font_scale = Scale::uniform((element.font_size as f32 * scale).max(1.0));
    let v_metrics = font.v_metrics(font_scale);
    let line_height = v_metrics.ascent - v_metrics.descent + v_metrics.line_gap;
    let padding = TEXT_PADDING * scale;

    let lines: Vec<&str> = element.content.lines().collect();
    let top = (height - line_height * lines.len() as f32) / 2.0;

    let mut glyphs = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        let baseline = top + v_metrics.ascent + i as f32 * line_height;
        let line_width = measure_line(font, line, font_scale);
        let x = match element.text_align {
            TextAlign::Left => padding,
            TextAlign::Center => (width - line_width) / 2.0,
            TextAlign::Right => width - line_width - padding,
        };
        glyphs.extend(font.layout(line, font_scale, rt_point(x, baseline)));
    }
    glyphs
}

fn measure_line(font: &Font<'static>, line: &str, scale: Scale) -> f32 {
    font.layout(line, scale, rt_point(0.0, 0.0))
        .last()
        .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
        .unwrap_or(0.0)
}

fn draw_glyphs(layer: &mut Pixmap, glyphs: &[PositionedGlyph<'_>], dx: f32, dy: f32, color: Rgba) {
    let width = layer.width() as i32;
    let height = layer.height() as i32;
    let (ox, oy) = (dx.round() as i32, dy.round() as i32);
    let data = layer.data_mut();

    for glyph in glyphs {
        let Some(bounding_box) = glyph.pixel_bounding_box() else {
            continue;
        };
        glyph.draw(|gx, gy, coverage| {
            let px = bounding_box.min.x + gx as i32 + ox;
            let py = bounding_box.min.y + gy as i32 + oy;
            if px >= 0 && px < width && py >= 0 && py < height {
                blend_pixel(data, ((py * width + px) * 4) as usize, color, coverage);
            }
        });
    }
}

/// Source-over blend of one premultiplied pixel.
fn blend_pixel(data: &mut [u8], idx: usize, color: Rgba, coverage: f32) {
    let alpha = color.a as f32 / 255.0 * coverage.clamp(0.0, 1.0);
    if alpha <= 0.0 {
        return;
    }
    let pixel = &mut data[idx..idx + 4];
    for (channel, source) in pixel.iter_mut().zip([color.r, color.g, color.b]) {
        *channel = (source as f32 * alpha + *channel as f32 * (1.0 - alpha)).round() as u8;
    }
    pixel[3] = (255.0 * alpha + pixel[3] as f32 * (1.0 - alpha)).round() as u8;
}
