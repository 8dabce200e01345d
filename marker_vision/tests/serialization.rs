mod common;

use common::synthetic_image::{WHITE, fill_rect, solid_rgba};
use marker_vision::{ColorKey, Marker, MarkerMap, Point, detect_markers};
use serde_json::json;

#[test]
fn marker_map_serializes_with_hex_colors() {
    let mut frame = solid_rgba(8, 5, WHITE);
    fill_rect(&mut frame, 8, 0, 0, 8, 5, [10, 20, 30, 255]);
    let markers = detect_markers(&mut frame, 8, 5).expect("valid frame");

    let value = serde_json::to_value(&markers).expect("serializable");
    let marker = &value["#0A141E"];
    assert_eq!(marker["color"], json!("#0A141E"));
    assert_eq!(marker["cx"], json!(4));
    assert_eq!(marker["cy"], json!(2));
    assert_eq!(marker["points"].as_array().map(Vec::len), Some(40));
    assert_eq!(marker["points"][0], json!({ "x": 0, "y": 0 }));
}

#[test]
fn marker_reads_back_from_json() {
    let text = r##"{
        "#010203": { "color": "#010203", "cx": 1, "cy": 0, "points": [{ "x": 1, "y": 0 }] }
    }"##;
    let markers: MarkerMap = serde_json::from_str(text).expect("valid marker json");
    assert_eq!(
        markers["#010203"],
        Marker {
            color: ColorKey::from_rgb(1, 2, 3),
            cx: 1,
            cy: 0,
            points: vec![Point { x: 1, y: 0 }],
        }
    );
}

#[test]
fn bad_color_in_json_is_an_error() {
    let text = r#"{ "color": "red", "cx": 0, "cy": 0, "points": [] }"#;
    assert!(serde_json::from_str::<Marker>(text).is_err());
}
