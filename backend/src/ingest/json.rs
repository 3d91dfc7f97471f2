//! JSON document intake.

use crate::ingest::{all_rows, IngestError};
use serde_json::Value;

/// Accepts an array of row objects, an object holding such an array, or a
/// single object; the document is kept as sent.
pub fn parse(bytes: &[u8]) -> Result<Value, IngestError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(IngestError::Empty);
    }
    let payload: Value = serde_json::from_slice(bytes)?;
    if all_rows(&payload).is_empty() {
        return Err(IngestError::NotTabular);
    }
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keeps_documents_with_rows() {
        let doc = br#"{"source": "api", "results": [{"id": 1}]}"#;
        assert_eq!(
            parse(doc).unwrap(),
            json!({"source": "api", "results": [{"id": 1}]})
        );
    }

    #[test]
    fn rejects_documents_without_rows() {
        assert!(matches!(parse(b"[1, 2, 3]"), Err(IngestError::NotTabular)));
        assert!(matches!(parse(b"42"), Err(IngestError::NotTabular)));
        assert!(matches!(parse(b"  "), Err(IngestError::Empty)));
        assert!(matches!(parse(b"{oops"), Err(IngestError::Json(_))));
    }
}
