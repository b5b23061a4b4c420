use serde_json::json;

use super::*;
use crate::foundation::core::widen8;
use crate::surface::ColorModel;

fn linear_red_blue() -> serde_json::Value {
    json!({
        "kind": "gradient",
        "shape": "linear",
        "bounds": [0, 0, 11, 4],
        "axis": [0, 0, 10, 0],
        "stops": [
            { "color": "#ff0000", "at": 0.0 },
            { "color": "#0000ff", "at": 1.0 }
        ]
    })
}

fn parse(v: serde_json::Value) -> VirtImgResult<Recipe> {
    Recipe::from_json_str(&v.to_string())
}

#[test]
fn builds_a_linear_gradient() {
    let recipe = parse(json!({ "root": linear_red_blue() })).unwrap();
    let img = recipe.build(Path::new(".")).unwrap();
    assert_eq!(img.bounds(), IRect::new(0, 0, 11, 4));
    assert_eq!(img.color_model(), ColorModel::Rgba8);
    assert_eq!(img.color_at(5, 3), widen8(image::Rgba([128, 0, 128, 255])));
}

#[test]
fn builds_nested_transforms() {
    let recipe = parse(json!({
        "root": {
            "kind": "mosaic",
            "block_size": 2,
            "source": {
                "kind": "screen",
                "sources": [
                    { "kind": "rotate", "turns": 1, "source": linear_red_blue() },
                    {
                        "kind": "canvas_resize",
                        "bounds": [0, 0, 4, 11],
                        "fill": [0.0, 1.0, 0.0],
                        "source": {
                            "kind": "gradient",
                            "shape": "radial",
                            "bounds": [0, 0, 2, 2],
                            "axis": [0, 0, 3, 4],
                            "stops": [
                                { "color": { "r": 0.0, "g": 0.0, "b": 0.0 }, "at": 0 },
                                { "color": { "h": 0.0, "s": 0.0, "v": 1.0 }, "at": 5 }
                            ],
                            "scale": "legacy"
                        }
                    }
                ]
            }
        }
    }))
    .unwrap();
    let img = recipe.build(Path::new(".")).unwrap();
    assert_eq!(img.bounds(), IRect::new(0, 0, 4, 11));
    // Bottom rows sit under the green fill; screen keeps green saturated.
    assert_eq!(img.color_at(3, 10).0[1] >> 8, 255);
}

#[test]
fn rejects_unknown_fields() {
    let mut node = linear_red_blue();
    node["colour"] = json!("red");
    let err = parse(json!({ "root": node })).unwrap_err();
    assert!(matches!(err, VirtImgError::Serde(_)));

    assert!(parse(json!({ "root": { "kind": "blur", "radius": 3 } })).is_err());
}

#[test]
fn construction_errors_surface_from_build() {
    let mut node = linear_red_blue();
    node["stops"] = json!([]);
    let Err(err) = parse(json!({ "root": node })).unwrap().build(Path::new(".")) else {
        panic!("empty stop list should not build");
    };
    assert!(matches!(err, VirtImgError::Construction(_)));

    let mosaic = json!({
        "root": { "kind": "mosaic", "block_size": -3, "source": linear_red_blue() }
    });
    assert!(parse(mosaic).unwrap().build(Path::new(".")).is_err());

    let screen = json!({ "root": { "kind": "screen", "sources": [] } });
    assert!(parse(screen).unwrap().build(Path::new(".")).is_err());
}

#[test]
fn missing_image_is_reported_with_path() {
    let recipe = parse(json!({ "root": { "kind": "image", "path": "nope.png" } })).unwrap();
    let Err(err) = recipe.build(Path::new("/definitely/not/here")) else {
        panic!("missing image should not build");
    };
    assert!(matches!(err, VirtImgError::Other(_)));
    assert!(format!("{err:#}").contains("nope.png"));
}
