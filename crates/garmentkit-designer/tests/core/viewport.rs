use garmentkit_designer::model::Point;
use garmentkit_designer::Viewport;
use garmentkit_settings::ViewportSettings;

#[test]
fn test_viewport_creation() {
    let vp = Viewport::default();
    assert_eq!(vp.zoom(), 1.0);
    assert_eq!(vp.pan_x(), 0.0);
    assert_eq!(vp.pan_y(), 0.0);
}

#[test]
fn test_local_screen_round_trip() {
    let mut vp = Viewport::default();
    vp.set_zoom(2.0);
    vp.set_pan(40.0, 25.0);

    let screen = vp.local_to_screen(10.0, 20.0);
    assert_eq!(screen, Point::new(60.0, 65.0));

    let local = vp.screen_to_local(screen.x, screen.y);
    assert!((local.x - 10.0).abs() < 1e-9);
    assert!((local.y - 20.0).abs() < 1e-9);
}

#[test]
fn test_custom_zoom_range() {
    let settings = ViewportSettings {
        min_zoom: 0.5,
        max_zoom: 2.0,
        zoom_step: 2.0,
    };
    let mut vp = Viewport::new(&settings);
    vp.zoom_in();
    vp.zoom_in();
    assert_eq!(vp.zoom(), 2.0);
    vp.zoom_out();
    vp.zoom_out();
    vp.zoom_out();
    assert_eq!(vp.zoom(), 0.5);
}

#[test]
fn test_pan_and_reset() {
    let mut vp = Viewport::default();
    vp.pan_by(5.0, -5.0);
    vp.pan_by(5.0, -5.0);
    vp.set_zoom(3.0);
    assert_eq!((vp.pan_x(), vp.pan_y()), (10.0, -10.0));

    vp.reset();
    assert_eq!(vp.zoom(), 1.0);
    assert_eq!((vp.pan_x(), vp.pan_y()), (0.0, 0.0));
}

#[test]
fn test_display() {
    let mut vp = Viewport::default();
    vp.set_zoom(1.5);
    assert_eq!(vp.to_string(), "Zoom: 1.50x | Pan: (0.0, 0.0)");
}
