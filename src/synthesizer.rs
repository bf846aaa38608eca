//! Value Synthesizer
//!
//! Produces one representative value per DTDL primitive schema, recursing
//! into object schemas. Values simulate realistic payloads without real
//! sensor data: numbers are pseudo-random, dates land in a bounded
//! near-future window, strings are fixed placeholders.
//!
//! The generator is passed explicitly through the call chain; the engine
//! holds no global random state.

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::Rng;
use serde_json::{Map, Value};

use crate::content;

/// Placeholder for string schemas.
pub const STRING_PLACEHOLDER: &str = "string to be randomized";

/// Placeholder for schemas the synthesizer does not recognize. Degrading to
/// this value is deliberate: an exotic schema must never abort resolution.
pub const UNSUPPORTED_SCHEMA_PLACEHOLDER: &str = "complex or unidentified schema";

/// Upper bound (exclusive) for the random hour offset applied to date, time
/// and datetime values.
const MAX_OFFSET_HOURS: i64 = 148;

/// One synthesized name/value pair.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SynthesizedEntry {
    pub name: String,
    pub value: Value,
}

/// Synthesize a value for one named schema.
///
/// `schema` is either a primitive type name, an object-schema description
/// (`{"@type": "Object", "fields": [...]}`), or absent. A missing or
/// unrecognized schema degrades to [`UNSUPPORTED_SCHEMA_PLACEHOLDER`].
pub fn synthesize(name: &str, schema: Option<&Value>, rng: &mut StdRng) -> SynthesizedEntry {
    let value = match schema {
        Some(Value::String(kind)) => primitive_value(kind, rng),
        Some(schema @ Value::Object(_)) => object_value(schema, rng),
        _ => Value::from(UNSUPPORTED_SCHEMA_PLACEHOLDER),
    };

    SynthesizedEntry {
        name: name.to_string(),
        value,
    }
}

fn primitive_value(kind: &str, rng: &mut StdRng) -> Value {
    match kind.to_ascii_lowercase().as_str() {
        "double" | "float" => Value::from(rng.gen::<f64>()),
        "integer" | "long" | "duration" => Value::from(rng.gen_range(0..=i64::from(i32::MAX))),
        "boolean" => Value::from(rng.gen_bool(0.5)),
        "string" => Value::from(STRING_PLACEHOLDER),
        "date" => Value::from(offset_now(rng).date_naive().to_string()),
        "time" => Value::from(offset_now(rng).time().format("%H:%M:%S").to_string()),
        "datetime" => Value::from(offset_now(rng).to_rfc3339()),
        _ => Value::from(UNSUPPORTED_SCHEMA_PLACEHOLDER),
    }
}

/// Recurse into an object schema, synthesizing each declared field.
fn object_value(schema: &Value, rng: &mut StdRng) -> Value {
    if !content::has_type(schema, "Object") {
        return Value::from(UNSUPPORTED_SCHEMA_PLACEHOLDER);
    }

    let Some(fields) = schema.get("fields").and_then(Value::as_array) else {
        return Value::Object(Map::new());
    };

    let mut object = Map::new();
    for field in fields {
        let Some(field_name) = content::name_of(field) else {
            continue;
        };
        let entry = synthesize(field_name, field.get("schema"), rng);
        object.insert(entry.name, entry.value);
    }

    Value::Object(object)
}

fn offset_now(rng: &mut StdRng) -> DateTime<Utc> {
    Utc::now() + Duration::hours(rng.gen_range(0..MAX_OFFSET_HOURS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use serde_json::json;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn double_and_float_yield_numbers() {
        let mut rng = rng();
        for kind in ["double", "float", "Double", "FLOAT"] {
            let entry = synthesize("value", Some(&json!(kind)), &mut rng);
            assert!(entry.value.is_f64(), "{kind} should synthesize a float");
        }
    }

    #[test]
    fn integer_kinds_yield_non_negative_integers() {
        let mut rng = rng();
        for kind in ["integer", "long", "duration"] {
            let entry = synthesize("value", Some(&json!(kind)), &mut rng);
            let n = entry.value.as_i64().expect("integer value");
            assert!(n >= 0);
        }
    }

    #[test]
    fn boolean_yields_bool() {
        let mut rng = rng();
        let entry = synthesize("flag", Some(&json!("boolean")), &mut rng);
        assert!(entry.value.is_boolean());
    }

    #[test]
    fn string_yields_placeholder() {
        let mut rng = rng();
        let entry = synthesize("label", Some(&json!("string")), &mut rng);
        assert_eq!(entry.value, json!(STRING_PLACEHOLDER));
    }

    #[test]
    fn temporal_kinds_yield_parseable_values() {
        let mut rng = rng();

        let date = synthesize("d", Some(&json!("date")), &mut rng);
        let date = date.value.as_str().expect("date string");
        assert!(chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok());

        let time = synthesize("t", Some(&json!("time")), &mut rng);
        let time = time.value.as_str().expect("time string");
        assert!(chrono::NaiveTime::parse_from_str(time, "%H:%M:%S").is_ok());

        let datetime = synthesize("dt", Some(&json!("dateTime")), &mut rng);
        let datetime = datetime.value.as_str().expect("datetime string");
        assert!(DateTime::parse_from_rfc3339(datetime).is_ok());
    }

    #[test]
    fn unknown_schema_degrades_to_placeholder() {
        let mut rng = rng();
        let entry = synthesize("geo", Some(&json!("geopoint")), &mut rng);
        assert_eq!(entry.value, json!(UNSUPPORTED_SCHEMA_PLACEHOLDER));
    }

    #[test]
    fn missing_schema_does_not_panic() {
        let mut rng = rng();
        let entry = synthesize("mystery", None, &mut rng);
        assert_eq!(entry.value, json!(UNSUPPORTED_SCHEMA_PLACEHOLDER));
    }

    #[test]
    fn object_schema_recurses_into_fields() {
        let mut rng = rng();
        let schema = json!({
            "@type": "Object",
            "fields": [
                { "name": "latitude", "schema": "double" },
                { "name": "longitude", "schema": "double" },
                { "name": "label", "schema": "string" }
            ]
        });

        let entry = synthesize("location", Some(&schema), &mut rng);
        let object = entry.value.as_object().expect("object value");
        assert_eq!(object.len(), 3);
        assert!(object["latitude"].is_f64());
        assert!(object["longitude"].is_f64());
        assert_eq!(object["label"], json!(STRING_PLACEHOLDER));
    }

    #[test]
    fn nested_object_schema_recurses() {
        let mut rng = rng();
        let schema = json!({
            "@type": "Object",
            "fields": [
                {
                    "name": "inner",
                    "schema": {
                        "@type": "Object",
                        "fields": [{ "name": "depth", "schema": "integer" }]
                    }
                }
            ]
        });

        let entry = synthesize("outer", Some(&schema), &mut rng);
        assert!(entry.value["inner"]["depth"].is_i64());
    }

    #[test]
    fn non_object_complex_schema_degrades_to_placeholder() {
        let mut rng = rng();
        let schema = json!({ "@type": "Enum", "valueSchema": "integer", "enumValues": [] });
        let entry = synthesize("mode", Some(&schema), &mut rng);
        assert_eq!(entry.value, json!(UNSUPPORTED_SCHEMA_PLACEHOLDER));
    }
}
