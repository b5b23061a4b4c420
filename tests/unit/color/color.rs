use super::*;
use serde_json::json;

#[test]
fn hsv_primary_hues() {
    assert_eq!(Hsv::new(0.0, 1.0, 1.0).to_color(), Rgba([65535, 0, 0, 65535]));
    assert_eq!(Hsv::new(120.0, 1.0, 1.0).to_color(), Rgba([0, 65535, 0, 65535]));
    assert_eq!(Hsv::new(240.0, 1.0, 1.0).to_color(), Rgba([0, 0, 65535, 65535]));
}

#[test]
fn hsv_hue_wraps_in_both_directions() {
    let red = Hsv::new(0.0, 1.0, 1.0).to_color();
    assert_eq!(Hsv::new(360.0, 1.0, 1.0).to_color(), red);
    assert_eq!(Hsv::new(-360.0, 1.0, 1.0).to_color(), red);
    assert_eq!(
        Hsv::new(-120.0, 1.0, 1.0).to_color(),
        Hsv::new(240.0, 1.0, 1.0).to_color()
    );
}

#[test]
fn hsv_zero_saturation_is_gray() {
    let c = Hsv::new(200.0, 0.0, 0.5).to_color();
    assert_eq!(c.0[0], c.0[1]);
    assert_eq!(c.0[1], c.0[2]);
    assert_eq!(c.0[3], 65535);
}

#[test]
fn parses_hex_rgb_and_rgba() {
    let c: ColorDef = serde_json::from_value(json!("#ff0000")).unwrap();
    assert_eq!(c.to_color(), Rgba([65535, 0, 0, 65535]));

    let c: ColorDef = serde_json::from_value(json!("#0000ff80")).unwrap();
    assert_eq!(c.to_color(), Rgba([0, 0, 65535, 128 * 257]));
}

#[test]
fn rejects_malformed_hex() {
    assert!(serde_json::from_value::<ColorDef>(json!("#fff")).is_err());
    assert!(serde_json::from_value::<ColorDef>(json!("#gg0000")).is_err());
    assert!(serde_json::from_value::<ColorDef>(json!("+fffff")).is_err());
}

#[test]
fn parses_rgba_object_and_array() {
    let c: ColorDef = serde_json::from_value(json!({"r": 0.25, "g": 0.5, "b": 0.75})).unwrap();
    assert_eq!(c, ColorDef::rgba(0.25, 0.5, 0.75, 1.0));

    let c: ColorDef = serde_json::from_value(json!([0.25, 0.5, 0.75, 0.9])).unwrap();
    assert_eq!(c, ColorDef::rgba(0.25, 0.5, 0.75, 0.9));

    assert!(serde_json::from_value::<ColorDef>(json!([0.1, 0.2])).is_err());
}

#[test]
fn parses_hsv_object() {
    let c: ColorDef = serde_json::from_value(json!({"h": 120.0, "s": 1.0, "v": 1.0})).unwrap();
    assert_eq!(c.to_color(), Rgba([0, 65535, 0, 65535]));
}

#[test]
fn rejects_ambiguous_objects() {
    let mixed = json!({"r": 1.0, "g": 0.0, "b": 0.0, "h": 10.0});
    assert!(serde_json::from_value::<ColorDef>(mixed).is_err());
    let partial = json!({"h": 10.0, "s": 1.0});
    assert!(serde_json::from_value::<ColorDef>(partial).is_err());
    let unknown = json!({"r": 1.0, "g": 0.0, "b": 0.0, "alpha": 1.0});
    assert!(serde_json::from_value::<ColorDef>(unknown).is_err());
}
