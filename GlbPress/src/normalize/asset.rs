//! Asset metadata cleanup

use serde_json::{Map, Value};

/// Asset fields the target format does not define.
const NON_STANDARD_ASSET_FIELDS: &[&str] = &["premultipliedAlpha"];

/// Copy the asset record without non-standard fields. An absent record
/// becomes an empty object.
#[must_use]
pub fn sanitize_asset(asset: Option<&Map<String, Value>>) -> Map<String, Value> {
    let mut cleaned = asset.cloned().unwrap_or_default();
    for field in NON_STANDARD_ASSET_FIELDS {
        cleaned.shift_remove(*field);
    }
    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strips_transparency_flag_and_keeps_order() {
        let asset = json!({
            "generator": "exporter",
            "premultipliedAlpha": true,
            "version": "1.0",
            "copyright": "me"
        });

        let cleaned = sanitize_asset(asset.as_object());

        assert_eq!(
            Value::Object(cleaned.clone()),
            json!({"generator": "exporter", "version": "1.0", "copyright": "me"})
        );
        assert_eq!(cleaned.keys().collect::<Vec<_>>(), ["generator", "version", "copyright"]);
    }

    #[test]
    fn test_absent_asset_is_empty_object() {
        assert!(sanitize_asset(None).is_empty());
    }
}
