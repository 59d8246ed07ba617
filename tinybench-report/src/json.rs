//! JSON Output

use serde::Serialize;

/// Serialize any report node to JSON.
///
/// `formatted` selects indented output; absent optional fields are omitted
/// either way.
pub fn generate_json_report<T: Serialize + ?Sized>(
    report: &T,
    formatted: bool,
) -> Result<String, serde_json::Error> {
    if formatted {
        serde_json::to_string_pretty(report)
    } else {
        serde_json::to_string(report)
    }
}
