#![forbid(unsafe_code)]
#![cfg(feature = "serde")]

//! Config documents.
//!
//!   cargo test -p goey --features serde --test config_serde

use goey::{Dir, Theme, ToastPosition, ToasterConfig};

#[test]
fn partial_document_fills_defaults() {
    let config: ToasterConfig = serde_json::from_str(
        r#"{ "position": "top-center", "theme": "dark", "visibleToasts": 5, "dir": "rtl" }"#,
    )
    .expect("valid config");
    assert_eq!(config.position, ToastPosition::TopCenter);
    assert_eq!(config.theme, Theme::Dark);
    assert_eq!(config.visible_toasts, 5);
    assert_eq!(config.dir, Dir::Rtl);
    assert_eq!(config.gap, 14.0);
    assert!(config.spring);
}

#[test]
fn config_survives_a_round_trip() {
    let config = ToasterConfig::default()
        .position(ToastPosition::BottomLeft)
        .bounce(0.35)
        .spring(false);
    let json = serde_json::to_string(&config).expect("serialize");
    assert!(json.contains("\"bottom-left\""));
    let back: ToasterConfig = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, config);
}

#[test]
fn unknown_position_is_rejected() {
    let err = serde_json::from_str::<ToasterConfig>(r#"{ "position": "middle" }"#);
    assert!(err.is_err());
}
