//! Schema Classifier
//!
//! Partitions one interface's `contents` array into telemetries, readable
//! properties, writable properties, commands and components. Pure function;
//! both `@type` encodings (bare string and annotated array) classify
//! identically.

use serde_json::Value;

use crate::content;

/// The five DTDL content categories, each borrowing the matching raw
/// elements from the input slice.
#[derive(Debug, Default)]
pub struct ClassifiedContents<'a> {
    pub telemetries: Vec<&'a Value>,
    pub readable_properties: Vec<&'a Value>,
    pub writable_properties: Vec<&'a Value>,
    pub commands: Vec<&'a Value>,
    pub components: Vec<&'a Value>,
}

/// Classify every content element into exactly one category.
///
/// A property belongs to the writable partition iff it carries
/// `writable == true`; a property without the field is readable. Elements
/// with an unrecognized or missing primary type are ignored (the grammar
/// validator reports them separately).
pub fn classify(contents: &[Value]) -> ClassifiedContents<'_> {
    let mut classified = ClassifiedContents::default();

    for element in contents {
        let Some(kind) = content::primary_type(element) else {
            continue;
        };

        if kind.eq_ignore_ascii_case("telemetry") {
            classified.telemetries.push(element);
        } else if kind.eq_ignore_ascii_case("property") {
            if content::is_writable(element) {
                classified.writable_properties.push(element);
            } else {
                classified.readable_properties.push(element);
            }
        } else if kind.eq_ignore_ascii_case("command") {
            classified.commands.push(element);
        } else if kind.eq_ignore_ascii_case("component") {
            classified.components.push(element);
        }
    }

    classified
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn names(elements: &[&Value]) -> Vec<String> {
        elements
            .iter()
            .filter_map(|e| content::name_of(e).map(str::to_string))
            .collect()
    }

    #[test]
    fn classifies_all_five_categories() {
        let contents = vec![
            json!({ "@type": "Telemetry", "name": "temperature", "schema": "double" }),
            json!({ "@type": "Property", "name": "serial", "schema": "string" }),
            json!({ "@type": "Property", "name": "target", "schema": "double", "writable": true }),
            json!({ "@type": "Command", "name": "reboot" }),
            json!({ "@type": "Component", "name": "sensor", "schema": "dtmi:com:example:sensor;1" }),
        ];

        let classified = classify(&contents);
        assert_eq!(names(&classified.telemetries), ["temperature"]);
        assert_eq!(names(&classified.readable_properties), ["serial"]);
        assert_eq!(names(&classified.writable_properties), ["target"]);
        assert_eq!(names(&classified.commands), ["reboot"]);
        assert_eq!(names(&classified.components), ["sensor"]);
    }

    #[test]
    fn both_type_encodings_classify_identically() {
        let bare = vec![
            json!({ "@type": "Telemetry", "name": "temperature", "schema": "double" }),
            json!({ "@type": "Property", "name": "target", "schema": "double", "writable": true }),
            json!({ "@type": "Component", "name": "sensor", "schema": "dtmi:com:example:sensor;1" }),
        ];
        let annotated = vec![
            json!({ "@type": ["Telemetry", "Temperature"], "name": "temperature", "schema": "double", "unit": "degreeCelsius" }),
            json!({ "@type": ["Property", "Temperature"], "name": "target", "schema": "double", "writable": true }),
            json!({ "@type": ["Component"], "name": "sensor", "schema": "dtmi:com:example:sensor;1" }),
        ];

        let from_bare = classify(&bare);
        let from_annotated = classify(&annotated);

        assert_eq!(
            names(&from_bare.telemetries),
            names(&from_annotated.telemetries)
        );
        assert_eq!(
            names(&from_bare.writable_properties),
            names(&from_annotated.writable_properties)
        );
        assert_eq!(
            names(&from_bare.components),
            names(&from_annotated.components)
        );
    }

    #[test]
    fn property_never_lands_in_both_partitions() {
        let contents = vec![
            json!({ "@type": "Property", "name": "implicit", "schema": "string" }),
            json!({ "@type": "Property", "name": "explicit_off", "schema": "string", "writable": false }),
            json!({ "@type": "Property", "name": "on", "schema": "string", "writable": true }),
        ];

        let classified = classify(&contents);
        assert_eq!(names(&classified.readable_properties), ["implicit", "explicit_off"]);
        assert_eq!(names(&classified.writable_properties), ["on"]);
    }

    #[test]
    fn unknown_or_missing_type_is_skipped() {
        let contents = vec![
            json!({ "@type": "Relationship", "name": "parent" }),
            json!({ "name": "untyped" }),
        ];

        let classified = classify(&contents);
        assert!(classified.telemetries.is_empty());
        assert!(classified.readable_properties.is_empty());
        assert!(classified.writable_properties.is_empty());
        assert!(classified.commands.is_empty());
        assert!(classified.components.is_empty());
    }
}
