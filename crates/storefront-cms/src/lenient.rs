//! Forgiving deserializers for editor-authored entry fields.
//!
//! Each helper reads the raw JSON value and maps it to an optional typed
//! value. A field of the wrong shape becomes `None` (or its textual form for
//! scalars) instead of failing deserialization of the entire response.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::types::{AssetLink, ImageField};

/// Strings pass through unchanged; numbers and booleans become their textual
/// form; anything else is absent.
pub(crate) fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}

/// Numbers and numeric strings become a [`Decimal`]; anything else is absent.
pub(crate) fn decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => parse_decimal(&n.to_string()),
        Value::String(s) => parse_decimal(s.trim()),
        _ => None,
    })
}

/// One link object or an array of them; any other shape is absent.
pub(crate) fn image_field<'de, D>(deserializer: D) -> Result<Option<ImageField>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(ImageField::Gallery(items.iter().map(link).collect())),
        value @ Value::Object(_) => Some(ImageField::Single(link(&value))),
        _ => None,
    })
}

/// Objects that parse as `T` are kept; anything else is absent.
pub(crate) fn object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => serde_json::from_value(value).ok(),
        _ => None,
    })
}

fn link(value: &Value) -> AssetLink {
    AssetLink {
        id: value
            .get("sys")
            .and_then(|sys| sys.get("id"))
            .and_then(Value::as_str)
            .map(str::to_owned),
    }
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    if raw.is_empty() {
        return None;
    }
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Fields {
        #[serde(default, deserialize_with = "text")]
        text: Option<String>,
        #[serde(default, deserialize_with = "decimal")]
        price: Option<Decimal>,
        #[serde(default, deserialize_with = "image_field")]
        image: Option<ImageField>,
    }

    fn parse(value: serde_json::Value) -> Fields {
        serde_json::from_value(value).expect("fields should always deserialize")
    }

    #[test]
    fn text_accepts_scalars() {
        assert_eq!(parse(json!({ "text": "hat" })).text.as_deref(), Some("hat"));
        assert_eq!(parse(json!({ "text": 42 })).text.as_deref(), Some("42"));
        assert_eq!(parse(json!({ "text": true })).text.as_deref(), Some("true"));
    }

    #[test]
    fn text_drops_structured_values() {
        assert!(parse(json!({ "text": null })).text.is_none());
        assert!(parse(json!({ "text": ["a"] })).text.is_none());
        assert!(parse(json!({ "text": { "en-US": "a" } })).text.is_none());
        assert!(parse(json!({})).text.is_none());
    }

    #[test]
    fn decimal_keeps_price_exactly() {
        assert_eq!(parse(json!({ "price": 129.99 })).price, Some(Decimal::new(12_999, 2)));
        assert_eq!(parse(json!({ "price": 25 })).price, Some(Decimal::new(25, 0)));
        assert_eq!(parse(json!({ "price": 0 })).price, Some(Decimal::ZERO));
    }

    #[test]
    fn decimal_accepts_numeric_strings() {
        assert_eq!(parse(json!({ "price": " 19.50 " })).price, Some(Decimal::new(1950, 2)));
    }

    #[test]
    fn decimal_drops_non_numeric_values() {
        assert!(parse(json!({ "price": "free" })).price.is_none());
        assert!(parse(json!({ "price": "" })).price.is_none());
        assert!(parse(json!({ "price": [1] })).price.is_none());
        assert!(parse(json!({ "price": null })).price.is_none());
    }

    #[test]
    fn image_field_rejects_scalars() {
        assert!(parse(json!({ "image": "a1" })).image.is_none());
        assert!(parse(json!({ "image": 3 })).image.is_none());
    }

    #[test]
    fn image_field_keeps_gallery_order() {
        let image = parse(json!({ "image": [
            { "sys": { "id": "b" } },
            { "sys": { "id": "a" } }
        ] }))
        .image
        .expect("gallery");
        assert_eq!(image.asset_ids(), vec!["b", "a"]);
    }
}
