//! Assertion macros for ais harnesses.
//!
//! These wrap `pretty_assertions` and add failure messages that name the
//! document and the keys involved.

// ---------------------------------------------------------------------------
// Document shape
// ---------------------------------------------------------------------------

/// Assert that a JSON object's keys appear in exactly this order.
///
/// ```rust
/// assert_keys_in_order!(doc, ["type", "properties", "geometry"]);
/// ```
#[macro_export]
macro_rules! assert_keys_in_order {
    ($doc:expr, [$($key:expr),* $(,)?]) => {{
        let doc: &serde_json::Value = &$doc;
        let actual: Vec<&str> = match doc.as_object() {
            Some(map) => map.keys().map(String::as_str).collect(),
            None => panic!("assert_keys_in_order! failed: not an object:\n  {}", doc),
        };
        let expected: Vec<&str> = vec![$($key),*];
        pretty_assertions::assert_eq!(actual, expected, "key order of document");
    }};
}

/// Assert the error document of a failed lookup: status and message.
#[macro_export]
macro_rules! assert_error_doc {
    ($result:expr, $status:expr, $message:expr) => {{
        match $result {
            Ok(doc) => panic!("assert_error_doc! failed: lookup succeeded:\n  {}", doc),
            Err(err) => {
                let doc = err.to_document();
                pretty_assertions::assert_eq!(doc["status"], serde_json::json!($status));
                pretty_assertions::assert_eq!(doc["message"], serde_json::json!($message));
                doc
            }
        }
    }};
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// `street_address` of every feature in a collection document.
pub fn street_addresses(doc: &serde_json::Value) -> Vec<String> {
    doc["features"]
        .as_array()
        .map(|features| {
            features
                .iter()
                .filter_map(|f| f["properties"]["street_address"].as_str())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
