use haulroad_core::{Catalog, Error};
use std::path::PathBuf;

fn fixture(rel: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../fixtures/catalog")
        .join(rel)
}

#[test]
fn yaml_portfolio_keeps_file_order() {
    let c = Catalog::from_path(&fixture("portfolio.yaml")).unwrap();
    let ids: Vec<&str> = c.ids().collect();
    assert_eq!(
        ids,
        ["About Me", "Projects", "Skills", "Experience", "Contact"]
    );

    let about = c.leaf("About Me", "Background").unwrap();
    assert_eq!(about.descriptions.len(), 1);
    let link = about.primary_link().unwrap();
    assert_eq!(link.before_text.as_deref(), Some("Full history in the "));
    assert_eq!(link.text, "résumé");

    let mail = c.leaf("Contact", "Email").unwrap().primary_link().unwrap();
    assert_eq!(mail.url.scheme(), "mailto");
    assert_eq!(c.leaves("Skills").unwrap().len(), 4);
}

#[test]
fn json_and_json5_fixtures_agree() {
    let json = Catalog::from_path(&fixture("basic.json")).unwrap();
    let json5 = Catalog::from_path(&fixture("basic.json5")).unwrap();
    assert_eq!(json, json5);
    assert_eq!(json.len(), 4);
    assert!(json.leaves("Node2").unwrap().is_empty());
}

#[test]
fn auto_detection_reads_json_and_yaml() {
    let json = std::fs::read_to_string(fixture("basic.json")).unwrap();
    let yaml = std::fs::read_to_string(fixture("portfolio.yaml")).unwrap();
    assert_eq!(Catalog::from_str_auto(&json).unwrap().len(), 4);
    assert_eq!(Catalog::from_str_auto(&yaml).unwrap().len(), 5);
}

#[test]
fn a_single_category_is_not_a_road() {
    let err = Catalog::from_path(&fixture("too_few.json")).unwrap_err();
    assert!(matches!(err, Error::InvalidCatalog { .. }), "{err}");
}

#[test]
fn malformed_catalogs_are_rejected() {
    for text in [
        r#"["not", "a", "map"]"#,
        r#"{ "A": "not a list", "B": [] }"#,
        r#"{ "A": [{ "descriptions": ["missing name"] }], "B": [] }"#,
        r#"{ "A": [""], "B": [] }"#,
        r#"{ "": ["x"], "B": [] }"#,
    ] {
        let err = Catalog::from_json_str(text).unwrap_err();
        assert!(matches!(err, Error::InvalidCatalog { .. }), "{text}: {err}");
    }
    assert!(matches!(
        Catalog::from_json_str("{ not json"),
        Err(Error::Json(_))
    ));
    assert!(matches!(
        Catalog::from_json5_str("{ a: [ }"),
        Err(Error::Json5 { .. })
    ));
}

#[test]
fn unknown_extensions_are_rejected() {
    let err = Catalog::from_path(&fixture("portfolio.toml")).unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormat { .. }), "{err}");
}

#[test]
fn catalogs_serialize_back_to_the_leaf_shape() {
    let c = Catalog::from_path(&fixture("basic.json")).unwrap();
    let v = serde_json::to_value(&c).unwrap();
    assert_eq!(v["First"][0]["name"], "Intro");
    assert!(v["First"][0].get("links").is_none());
    assert_eq!(v["Last"][0]["links"][0]["url"], "mailto:a@example.com");
}
