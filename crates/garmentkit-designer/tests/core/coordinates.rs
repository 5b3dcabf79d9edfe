use garmentkit_designer::coordinates::element_canvas_rect;
use garmentkit_designer::model::DesignElement;
use garmentkit_designer::{pixel_to_cm_ratio, CoordinateMapper, DesignArea, GarmentTemplate, Side};
use proptest::prelude::*;

fn template() -> GarmentTemplate {
    GarmentTemplate::new("tee", 400, 500)
        .with_design_area(Side::Front, DesignArea::new(25.0, 20.0, 25.0, 20.0))
        .with_design_area(Side::Back, DesignArea::new(10.0, 10.0, 10.0, 10.0))
        .with_size("M", 30.0, 40.0)
        .with_size("XL", 36.0, 46.0)
}

#[test]
fn test_ratio_from_design_area() {
    let ratio = pixel_to_cm_ratio(Some(30.0), 400.0, &DesignArea::new(25.0, 20.0, 25.0, 20.0));
    assert!((ratio.unwrap() - 0.15).abs() < 1e-12);
}

#[test]
fn test_ratio_missing_inputs() {
    let area = DesignArea::new(25.0, 20.0, 25.0, 20.0);
    assert_eq!(pixel_to_cm_ratio(None, 400.0, &area), None);
    assert_eq!(pixel_to_cm_ratio(Some(0.0), 400.0, &area), None);
    assert_eq!(pixel_to_cm_ratio(Some(30.0), 0.0, &area), None);
}

#[test]
fn test_mapper_per_side_and_size() {
    let template = template();
    let front = CoordinateMapper::new(Some(&template), Side::Front, "M");
    let back = CoordinateMapper::new(Some(&template), Side::Back, "M");
    let front_xl = CoordinateMapper::new(Some(&template), Side::Front, "XL");

    assert!((front.ratio() - 0.15).abs() < 1e-12);
    assert!((back.ratio() - 30.0 / 320.0).abs() < 1e-12);
    assert!((front_xl.ratio() - 0.18).abs() < 1e-12);
}

#[test]
fn test_mapper_falls_back_to_identity() {
    let template = template();
    assert_eq!(CoordinateMapper::new(Some(&template), Side::Front, "XXS").ratio(), 1.0);
    assert_eq!(CoordinateMapper::new(None, Side::Front, "M").ratio(), 1.0);
    assert_eq!(CoordinateMapper::from_ratio(f64::NAN).ratio(), 1.0);
}

#[test]
fn test_font_points() {
    let mapper = CoordinateMapper::from_ratio(0.15);
    assert!((mapper.font_px_to_pt(24.0, 10.0) - 36.0).abs() < 1e-9);
}

#[test]
fn test_canvas_rect_offsets_by_design_area() {
    let template = template();
    let element = DesignElement::text("A", 10.0, 20.0, 100.0, 40.0);

    let front = element_canvas_rect(&template, Side::Front, &element);
    assert_eq!((front.x, front.y), (110.0, 120.0));
    assert_eq!(front.center(), (160.0, 140.0));

    let back = element_canvas_rect(&template, Side::Back, &element).scaled(2.0);
    assert_eq!((back.x, back.y, back.width), (100.0, 140.0, 200.0));
}

proptest! {
    #[test]
    fn prop_cm_round_trip(ratio in 0.001f64..10.0, px in 0.0f64..5000.0) {
        let mapper = CoordinateMapper::from_ratio(ratio);
        let back = mapper.cm_to_px(mapper.px_to_cm(px));
        prop_assert!((back - px).abs() < 1e-6 * px.max(1.0));
    }

    #[test]
    fn prop_ratio_is_positive_and_finite(width_cm in 1.0f64..200.0, canvas in 10u32..4000, inset in 0.0f64..45.0) {
        let area = DesignArea::new(inset, 0.0, inset, 0.0);
        let ratio = pixel_to_cm_ratio(Some(width_cm), canvas as f64, &area).unwrap();
        prop_assert!(ratio.is_finite() && ratio > 0.0);
    }
}
