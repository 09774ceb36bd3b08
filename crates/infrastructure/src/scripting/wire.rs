//! JSON exchange format between the host and the script engine.
//!
//! Plain JSON loses `undefined`, non-finite numbers and multipart forms, so
//! those travel as single-key marker objects. The engine prelude revives and
//! produces the same markers.

use prestige_domain::value::format_number;
use prestige_domain::{MultipartField, MultipartFile, MultipartForm, Object, Value};
use serde_json::{Map, Number, Value as Json};

pub(crate) const UNDEFINED: &str = "@undefined";
pub(crate) const NUMBER: &str = "@number";
pub(crate) const MULTIPART: &str = "@multipart";

fn marker(key: &str, value: Json) -> Json {
    let mut map = Map::new();
    map.insert(key.to_string(), value);
    Json::Object(map)
}

/// Converts a value to its exchange form.
pub(crate) fn encode(value: &Value) -> Json {
    match value {
        Value::Undefined => marker(UNDEFINED, Json::Bool(true)),
        Value::Null => Json::Null,
        Value::Bool(b) => Json::Bool(*b),
        Value::Number(n) => Number::from_f64(*n)
            .map_or_else(|| marker(NUMBER, Json::String(format_number(*n))), Json::Number),
        Value::String(s) => Json::String(s.clone()),
        Value::Array(items) => Json::Array(items.iter().map(encode).collect()),
        Value::Object(map) => encode_object(map),
        Value::Multipart(form) => marker(
            MULTIPART,
            Json::Array(
                form.iter()
                    .map(|(name, field)| Json::Array(vec![Json::String(name.to_string()), encode_field(field)]))
                    .collect(),
            ),
        ),
    }
}

/// Converts an object to its exchange form.
pub(crate) fn encode_object(map: &Object) -> Json {
    Json::Object(map.iter().map(|(k, v)| (k.clone(), encode(v))).collect())
}

fn encode_field(field: &MultipartField) -> Json {
    match field {
        MultipartField::Text(text) => Json::String(text.clone()),
        MultipartField::File(file) => encode_file(file),
    }
}

/// The object `this.file(name)` returns.
pub(crate) fn encode_file(file: &MultipartFile) -> Json {
    let mut map = Map::new();
    map.insert("body".to_string(), Json::String(file.body.clone()));
    map.insert("name".to_string(), Json::String(file.name.clone()));
    map.insert("type".to_string(), Json::String(file.mime_type.clone()));
    map.insert("size".to_string(), Json::Number(Number::from(file.size)));
    Json::Object(map)
}

/// Converts an exchange form back to a value.
pub(crate) fn decode(json: Json) -> Value {
    match json {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::Bool(b),
        Json::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
        Json::String(s) => Value::String(s),
        Json::Array(items) => Value::Array(items.into_iter().map(decode).collect()),
        Json::Object(map) => decode_object(map),
    }
}

fn decode_object(mut map: Map<String, Json>) -> Value {
    if map.len() == 1 {
        if map.get(UNDEFINED) == Some(&Json::Bool(true)) {
            return Value::Undefined;
        }
        if let Some(Json::String(text)) = map.get(NUMBER) {
            return Value::Number(parse_number(text));
        }
        if map.get(MULTIPART).is_some_and(Json::is_array) {
            if let Some(Json::Array(entries)) = map.remove(MULTIPART) {
                return Value::Multipart(decode_form(entries));
            }
        }
    }
    Value::Object(map.into_iter().map(|(k, v)| (k, decode(v))).collect())
}

fn parse_number(text: &str) -> f64 {
    match text {
        "Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        _ => text.parse().unwrap_or(f64::NAN),
    }
}

fn decode_form(entries: Vec<Json>) -> MultipartForm {
    let mut form = MultipartForm::new();
    for entry in entries {
        let Json::Array(pair) = entry else { continue };
        let mut pair = pair.into_iter();
        let (Some(Json::String(name)), Some(field)) = (pair.next(), pair.next()) else {
            continue;
        };
        let field = decode_file(&field).map_or_else(|| MultipartField::Text(decode(field).to_string()), MultipartField::File);
        form.insert(name, field);
    }
    form
}

/// Recognizes the objects returned by `this.file(name)`.
fn decode_file(json: &Json) -> Option<MultipartFile> {
    let map = json.as_object()?;
    let text = |key: &str| map.get(key).and_then(Json::as_str).map(str::to_string);
    Some(MultipartFile {
        body: text("body")?,
        name: text("name")?,
        mime_type: text("type")?,
        size: map
            .get("size")
            .and_then(Json::as_u64)
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn markers_survive_the_trip() {
        let mut form = MultipartForm::new();
        form.insert("note", MultipartField::Text("hi".into()));
        form.insert(
            "upload",
            MultipartField::File(MultipartFile {
                body: "aGk=".into(),
                name: "a.txt".into(),
                mime_type: "text/plain".into(),
                size: 2,
            }),
        );
        let value = Value::Array(vec![
            Value::Undefined,
            Value::Number(f64::NEG_INFINITY),
            Value::Number(2.5),
            Value::Multipart(form),
        ]);

        let json = encode(&value);
        assert_eq!(json[0], serde_json::json!({"@undefined": true}));
        assert_eq!(json[1], serde_json::json!({"@number": "-Infinity"}));
        assert_eq!(decode(json), value);
    }

    #[test]
    fn multipart_text_fields_are_strings() {
        let json = serde_json::json!({"@multipart": [["count", 3], ["flag", true], ["bad"]]});
        let Value::Multipart(form) = decode(json) else {
            panic!("expected a multipart form");
        };
        assert_eq!(form.get("count"), Some(&MultipartField::Text("3".into())));
        assert_eq!(form.get("flag"), Some(&MultipartField::Text("true".into())));
        assert_eq!(form.len(), 2);
    }

    #[test]
    fn ordinary_objects_with_marker_like_keys() {
        let json = serde_json::json!({"@undefined": true, "other": 1});
        assert_eq!(decode(json).property("other"), Value::Number(1.0));
    }
}
