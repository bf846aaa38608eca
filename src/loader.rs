//! Document source loading.
//!
//! A model source is either a local file path or an HTTP(S) URL, selected by
//! an `http` prefix check. Loading is the only suspending operation in the
//! engine; everything downstream is synchronous CPU work.

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::DtdlError;

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Load one raw DTDL document (or document array) from `source`.
///
/// Any failure here — unreachable source, non-2xx response, unparsable JSON —
/// is a [`DtdlError::Load`], fatal for the whole resolution call.
pub async fn load_model(source: &str) -> Result<Value, DtdlError> {
    let text = if source.starts_with("http") {
        fetch_remote(source).await?
    } else {
        std::fs::read_to_string(source).map_err(|error| DtdlError::Load {
            location: source.to_string(),
            reason: error.to_string(),
        })?
    };

    serde_json::from_str(&text).map_err(|error| DtdlError::Load {
        location: source.to_string(),
        reason: format!("invalid JSON: {error}"),
    })
}

/// Try each location in order and return the first document that loads.
///
/// Model repositories are commonly probed across a local cache directory and
/// one or more remote endpoints; only when every location fails is the load
/// fatal.
pub async fn load_model_from_locations(locations: &[String]) -> Result<Value, DtdlError> {
    for location in locations {
        match load_model(location).await {
            Ok(document) => {
                debug!(location = %location, "model document loaded");
                return Ok(document);
            }
            Err(error) => warn!(location = %location, %error, "location skipped"),
        }
    }

    Err(DtdlError::Load {
        location: locations.join(", "),
        reason: "no location yielded a loadable DTDL document".to_string(),
    })
}

/// Normalize one-or-many input into a uniform batch: a single interface
/// object becomes a one-element array, an array is passed through.
pub fn normalize_batch(raw: Value) -> Vec<Value> {
    match raw {
        Value::Array(documents) => documents,
        document => vec![document],
    }
}

async fn fetch_remote(source: &str) -> Result<String, DtdlError> {
    let client = reqwest::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .map_err(|error| DtdlError::Load {
            location: source.to_string(),
            reason: error.to_string(),
        })?;

    let response = client
        .get(source)
        .send()
        .await
        .map_err(|error| DtdlError::Load {
            location: source.to_string(),
            reason: error.to_string(),
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(DtdlError::Load {
            location: source.to_string(),
            reason: format!("HTTP {status}"),
        });
    }

    response.text().await.map_err(|error| DtdlError::Load {
        location: source.to_string(),
        reason: error.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn normalize_wraps_single_document() {
        let batch = normalize_batch(json!({ "@id": "dtmi:a;1" }));
        assert_eq!(batch.len(), 1);
    }

    #[test]
    fn normalize_passes_arrays_through() {
        let batch = normalize_batch(json!([{ "@id": "dtmi:a;1" }, { "@id": "dtmi:b;1" }]));
        assert_eq!(batch.len(), 2);
    }

    #[tokio::test]
    async fn loads_local_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{ "@id": "dtmi:com:example:x;1", "@type": "Interface" }}"#)
            .expect("write");

        let document = load_model(file.path().to_str().expect("utf-8 path"))
            .await
            .expect("load");
        assert_eq!(document["@id"], json!("dtmi:com:example:x;1"));
    }

    #[tokio::test]
    async fn missing_file_is_a_load_error() {
        let error = load_model("/nonexistent/model.json").await.expect_err("load error");
        assert!(matches!(error, DtdlError::Load { .. }));
    }

    #[tokio::test]
    async fn invalid_json_is_a_load_error() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "not json").expect("write");

        let error = load_model(file.path().to_str().expect("utf-8 path"))
            .await
            .expect_err("load error");
        assert!(matches!(error, DtdlError::Load { reason, .. } if reason.contains("invalid JSON")));
    }

    #[tokio::test]
    async fn location_fallback_returns_first_loadable() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{ "@id": "dtmi:com:example:x;1" }}"#).expect("write");

        let locations = vec![
            "/nonexistent/a.json".to_string(),
            file.path().to_str().expect("utf-8 path").to_string(),
        ];

        let document = load_model_from_locations(&locations).await.expect("fallback");
        assert_eq!(document["@id"], json!("dtmi:com:example:x;1"));
    }

    #[tokio::test]
    async fn exhausted_locations_are_a_load_error() {
        let locations = vec!["/nope/a.json".to_string(), "/nope/b.json".to_string()];
        let error = load_model_from_locations(&locations)
            .await
            .expect_err("load error");
        assert!(matches!(error, DtdlError::Load { .. }));
    }
}
