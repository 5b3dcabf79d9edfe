use garmentkit_core::{parse_measure, PrintUnit};
use garmentkit_designer::model::{DesignElement, ElementKind, ShapeKind, TextOutline};
use garmentkit_designer::{
    build_print_spec, DesignArea, DesignerState, GarmentTemplate, PrintSpecInput,
    PrintSpecOptions, Side,
};

fn tee() -> GarmentTemplate {
    GarmentTemplate::new("tee", 400, 500)
        .with_design_area(Side::Front, DesignArea::new(25.0, 20.0, 25.0, 20.0))
        .with_design_area(Side::Back, DesignArea::new(10.0, 20.0, 10.0, 20.0))
        .with_size("M", 30.0, 40.0)
}

#[test]
fn test_width_exports_in_centimeters() {
    let template = tee();
    let element = DesignElement::shape(ShapeKind::Rect, 20.0, 40.0, 100.0, 50.0).with_id("box");
    let front = [element];
    let input = PrintSpecInput {
        name: "Shirt",
        template: Some(&template),
        garment_template_id: "tee",
        garment_color: "#ffffff",
        garment_size: "M",
        front: &front,
        back: &[],
    };
    let spec = build_print_spec(input, &PrintSpecOptions::default());

    assert!((spec.pixel_to_cm_ratio.front - 0.15).abs() < 1e-12);
    let exported = &spec.side(Side::Front)[0];
    assert_eq!(exported.id, "box");
    assert_eq!(exported.size.width, "15.00 cm");
    assert_eq!(exported.size.height, "7.50 cm");
    assert_eq!(exported.position.x, "3.00 cm");
    assert_eq!(exported.position.y, "6.00 cm");
    assert!(exported.text.is_none());
}

#[test]
fn test_state_print_spec_uses_per_side_ratios() {
    let mut state = DesignerState::default();
    state.set_template(tee()).unwrap();
    state.set_garment_size("M");
    state
        .add_element(DesignElement::text("Front", 0.0, 0.0, 100.0, 40.0))
        .unwrap();
    state.set_side(Side::Back).unwrap();
    state
        .add_element(DesignElement::text("Back", 0.0, 0.0, 100.0, 40.0).with_rotation(-30.0))
        .unwrap();

    let spec = state.print_spec();
    assert_eq!(spec.garment_template_id, "tee");
    assert_eq!(spec.front.len(), 1);
    assert_eq!(spec.back.len(), 1);

    let (front_width, unit) = parse_measure(&spec.front[0].size.width).unwrap();
    assert_eq!(unit, PrintUnit::Centimeter);
    assert!((front_width - 15.0).abs() < 1e-9);

    // back design area is 320px wide
    let (back_width, _) = parse_measure(&spec.back[0].size.width).unwrap();
    assert!((back_width - 100.0 * 30.0 / 320.0).abs() < 0.01);
    assert_eq!(spec.back[0].rotation, 330.0);
}

#[test]
fn test_text_style_in_points() {
    let mut state = DesignerState::default();
    state.set_template(tee()).unwrap();
    let mut text = DesignElement::text("Bold", 0.0, 0.0, 100.0, 40.0);
    text.font_size = 24.0;
    text.font_weight = "bold".to_string();
    text.text_outline = Some(TextOutline {
        width: 2.0,
        color: "#000000".to_string(),
    });
    state.add_element(text).unwrap();

    let spec = state.print_spec();
    let style = spec.front[0].text.as_ref().unwrap();
    assert_eq!(style.font_size, "36.0 pt");
    assert_eq!(style.font_weight, "bold");
    assert!(style.outline.is_some());
    assert!(style.shadow.is_none());
}

#[test]
fn test_images_are_redacted() {
    let mut state = DesignerState::default();
    state.set_template(tee()).unwrap();
    state
        .add_element(DesignElement::image(
            "data:image/png;base64,AAAA",
            0.0,
            0.0,
            50.0,
            50.0,
        ))
        .unwrap();
    state
        .add_element(DesignElement::sticker("stickers/star.png", 0.0, 0.0, 50.0, 50.0))
        .unwrap();

    let spec = state.print_spec();
    assert_eq!(spec.front[0].kind, ElementKind::Image);
    assert_eq!(spec.front[0].content, "[image]");
    assert_eq!(spec.front[1].content, "stickers/star.png");

    let json = spec.to_json().unwrap();
    assert!(!json.contains("AAAA"));
}

#[test]
fn test_missing_measurements_fall_back_to_pixels() {
    let state = DesignerState::default();
    let spec = state.print_spec();
    assert_eq!(spec.pixel_to_cm_ratio.front, 1.0);
    assert_eq!(spec.pixel_to_cm_ratio.back, 1.0);
}

#[test]
fn test_stable_field_names() {
    let mut state = DesignerState::default();
    state.set_template(tee()).unwrap();
    state.add_text(Some("Hello")).unwrap();

    let value: serde_json::Value = serde_json::from_str(&state.print_spec().to_json().unwrap()).unwrap();
    assert!(value.get("garmentTemplateId").is_some());
    assert!(value.get("pixelToCmRatio").is_some());
    let element = &value["front"][0];
    assert_eq!(element["type"], "text");
    assert!(element["position"]["x"].as_str().unwrap().ends_with(" cm"));
    assert!(element["size"]["width"].as_str().unwrap().ends_with(" cm"));
    assert!(element["text"]["fontSize"].as_str().unwrap().ends_with(" pt"));
}

#[test]
fn test_export_writes_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = DesignerState::default();
    state.set_template(tee()).unwrap();
    state.add_shape(ShapeKind::Circle).unwrap();

    let path = state.export_print_spec(dir.path().join("order")).unwrap();
    assert_eq!(path.extension().and_then(|e| e.to_str()), Some("json"));

    let written = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(value["front"].as_array().unwrap().len(), 1);
    assert!(value["generatedAt"].is_string());
    assert!(state.print_spec().generated_at.is_none());
}
