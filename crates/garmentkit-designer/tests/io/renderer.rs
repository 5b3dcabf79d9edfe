use garmentkit_designer::model::{DesignElement, ShapeKind, TextAlign};
use garmentkit_designer::renderer::{self, encode_png, image_dimensions, save_png, to_data_url};
use garmentkit_designer::{GarmentTemplate, LocalAssetSource, Side};
use image::{Rgba, RgbaImage};

fn tee() -> GarmentTemplate {
    // default design area origin is (100, 100)
    GarmentTemplate::new("tee", 400, 500).with_size("M", 30.0, 40.0)
}

fn solid(width: u32, height: u32, color: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba(color))
}

fn red_square() -> DesignElement {
    DesignElement::shape(ShapeKind::Rect, 10.0, 10.0, 50.0, 50.0).with_color("#ff0000")
}

#[test]
fn test_preview_places_shapes_inside_design_area() {
    let image =
        renderer::render_preview(&tee(), Side::Front, &[red_square()], "#00ff00").unwrap();

    assert_eq!(image.dimensions(), (400, 500));
    assert_eq!(image.get_pixel(135, 135).0, [255, 0, 0, 255]);
    assert_eq!(image.get_pixel(105, 105).0, [0, 255, 0, 255]);
    assert_eq!(image.get_pixel(0, 0).0, [0, 255, 0, 255]);
}

#[test]
fn test_preview_draws_in_z_order() {
    let bottom = red_square();
    let top = DesignElement::shape(ShapeKind::Rect, 30.0, 30.0, 50.0, 50.0).with_color("#0000ff");
    let image =
        renderer::render_preview(&tee(), Side::Front, &[bottom, top], "#ffffff").unwrap();

    assert_eq!(image.get_pixel(150, 150).0, [0, 0, 255, 255]);
    assert_eq!(image.get_pixel(115, 115).0, [255, 0, 0, 255]);
}

#[test]
fn test_preview_skips_raster_elements() {
    let sticker = DesignElement::sticker("stickers/star.png", 0.0, 0.0, 200.0, 300.0);
    let image = renderer::render_preview(&tee(), Side::Front, &[sticker], "#ffffff").unwrap();
    assert_eq!(image.get_pixel(200, 250).0, [255, 255, 255, 255]);
}

const WHITE: [u8; 4] = [255, 255, 255, 255];

/// Text box at local (20, 20), 160x60: canvas x 120..280, y 120..180.
fn label(content: &str, align: TextAlign) -> DesignElement {
    let mut element = DesignElement::text(content, 20.0, 20.0, 160.0, 60.0);
    element.font_size = 32.0;
    element.text_align = align;
    element
}

/// Inclusive bounds of every pixel that differs from `background`.
fn ink_bounds(image: &RgbaImage, background: [u8; 4]) -> Option<(u32, u32, u32, u32)> {
    image
        .enumerate_pixels()
        .filter(|(_, _, pixel)| pixel.0 != background)
        .fold(None, |bounds, (x, y, _)| match bounds {
            None => Some((x, y, x, y)),
            Some((x0, y0, x1, y1)) => Some((x0.min(x), y0.min(y), x1.max(x), y1.max(y))),
        })
}

fn assert_within(bounds: (u32, u32, u32, u32), area: (u32, u32, u32, u32)) {
    let (x0, y0, x1, y1) = bounds;
    let (ax0, ay0, ax1, ay1) = area;
    assert!(
        x0 >= ax0 && y0 >= ay0 && x1 <= ax1 && y1 <= ay1,
        "ink {:?} escapes {:?}",
        bounds,
        area
    );
}

#[test]
fn test_preview_draws_text_with_default_family() {
    let element = label("HELLO", TextAlign::Center);
    assert_eq!(element.font_family, "Arial");

    let image = renderer::render_preview(&tee(), Side::Front, &[element], "#ffffff").unwrap();
    let bounds = ink_bounds(&image, WHITE).expect("text left no ink");
    assert_within(bounds, (120, 120, 279, 179));

    let (x0, _, x1, _) = bounds;
    let middle = (x0 + x1) / 2;
    assert!((190..=210).contains(&middle), "centered ink midpoint {}", middle);
    assert!(x1 - x0 > 40);
}

#[test]
fn test_preview_text_alignment() {
    let left = renderer::render_preview(&tee(), Side::Front, &[label("HI", TextAlign::Left)], "#ffffff")
        .unwrap();
    let (x0, _, x1, _) = ink_bounds(&left, WHITE).unwrap();
    assert!(x0 >= 120 && x0 <= 132, "left ink starts at {}", x0);
    assert!(x1 < 200);

    let right =
        renderer::render_preview(&tee(), Side::Front, &[label("HI", TextAlign::Right)], "#ffffff")
            .unwrap();
    let (x0, _, x1, _) = ink_bounds(&right, WHITE).unwrap();
    assert!(x0 > 200);
    assert!(x1 >= 260 && x1 < 280, "right ink ends at {}", x1);
}

#[test]
fn test_preview_rotates_text_about_its_center() {
    let element = label("HELLO", TextAlign::Center).with_rotation(90.0);
    let image = renderer::render_preview(&tee(), Side::Front, &[element], "#ffffff").unwrap();

    // Quarter turn about (200, 150): the box becomes x 170..230, y 70..230.
    let bounds = ink_bounds(&image, WHITE).expect("rotated text left no ink");
    assert_within(bounds, (169, 69, 231, 231));
    let (x0, y0, x1, y1) = bounds;
    assert!(y1 - y0 > x1 - x0, "text should run vertically: {:?}", bounds);
}

#[tokio::test]
async fn test_export_draws_text_supersampled() {
    let dir = tempfile::tempdir().unwrap();
    let assets = LocalAssetSource::new(dir.path());
    let element = label("HELLO", TextAlign::Center);

    let image = renderer::render_export(&tee(), Side::Front, &[element], "#ffffff", 3, &assets)
        .await
        .unwrap();

    let bounds = ink_bounds(&image, WHITE).expect("exported text left no ink");
    assert_within(bounds, (360, 360, 839, 539));
    let (x0, _, x1, _) = bounds;
    assert!(x1 - x0 > 120, "glyphs should scale with the surface");
}

#[tokio::test]
async fn test_export_is_supersampled_and_draws_rasters() {
    let dir = tempfile::tempdir().unwrap();
    let assets = LocalAssetSource::new(dir.path());
    let reference = to_data_url(&solid(4, 4, [0, 0, 255, 255])).unwrap();
    let sticker = DesignElement::sticker(reference, 0.0, 0.0, 100.0, 100.0);

    let image = renderer::render_export(&tee(), Side::Front, &[sticker], "#ffffff", 3, &assets)
        .await
        .unwrap();

    assert_eq!(image.dimensions(), (1200, 1500));
    // design area origin (100, 100) scaled by 3
    assert_eq!(image.get_pixel(450, 450).0, [0, 0, 255, 255]);
    assert_eq!(image.get_pixel(10, 10).0, [255, 255, 255, 255]);
}

#[tokio::test]
async fn test_export_skips_undecodable_images() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("broken.png"), b"not an image").unwrap();
    let assets = LocalAssetSource::new(dir.path());

    let elements = vec![
        DesignElement::image("broken.png", 0.0, 0.0, 100.0, 100.0),
        DesignElement::image("missing.png", 0.0, 0.0, 100.0, 100.0),
        red_square(),
    ];
    let image = renderer::render_export(&tee(), Side::Front, &elements, "#ffffff", 1, &assets)
        .await
        .unwrap();

    assert_eq!(image.get_pixel(135, 135).0, [255, 0, 0, 255]);
    assert_eq!(image.get_pixel(105, 105).0, [255, 255, 255, 255]);
}

#[tokio::test]
async fn test_export_inverts_garment_image_on_dark_colors() {
    let dir = tempfile::tempdir().unwrap();
    let assets = LocalAssetSource::new(dir.path());
    let mut template = tee();
    template.front_image = Some(to_data_url(&solid(8, 8, [255, 255, 255, 255])).unwrap());

    let dark = renderer::render_export(&template, Side::Front, &[], "#111111", 1, &assets)
        .await
        .unwrap();
    assert_eq!(dark.get_pixel(50, 50).0, [0, 0, 0, 255]);

    let light = renderer::render_export(&template, Side::Front, &[], "#eeeeee", 1, &assets)
        .await
        .unwrap();
    assert_eq!(light.get_pixel(50, 50).0, [255, 255, 255, 255]);
}

#[tokio::test]
async fn test_export_without_garment_image_uses_flat_color() {
    let dir = tempfile::tempdir().unwrap();
    let assets = LocalAssetSource::new(dir.path());
    let mut template = tee();
    template.back_image = Some("garments/missing-back.png".to_string());

    let image = renderer::render_export(&template, Side::Back, &[], "#336699", 1, &assets)
        .await
        .unwrap();
    assert_eq!(image.get_pixel(10, 10).0, [0x33, 0x66, 0x99, 255]);
}

#[test]
fn test_png_helpers() {
    let image = solid(6, 3, [1, 2, 3, 255]);
    let bytes = encode_png(&image).unwrap();
    assert_eq!(image_dimensions(&bytes).unwrap(), (6, 3));
    assert!(to_data_url(&image).unwrap().starts_with("data:image/png;base64,"));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("front.png");
    save_png(&image, &path).unwrap();
    let decoded = renderer::decode_image(&std::fs::read(&path).unwrap()).unwrap();
    assert_eq!(decoded.get_pixel(5, 2).0, [1, 2, 3, 255]);
}

#[test]
fn test_image_dimensions_rejects_garbage() {
    assert!(image_dimensions(b"garbage").is_err());
}
