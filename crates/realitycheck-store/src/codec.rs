//! Column codecs for values SQLite has no native type for
//!
//! ID lists are JSON arrays in TEXT columns. Embeddings are packed
//! little-endian `f32` values in a BLOB column.

use crate::StoreError;

/// Encode an ID list as a JSON array
pub fn encode_id_list(ids: &[String]) -> Result<String, StoreError> {
    Ok(serde_json::to_string(ids)?)
}

/// Decode a stored ID list; NULL and blank text are the empty list
pub fn decode_id_list(raw: Option<&str>) -> Result<Vec<String>, StoreError> {
    match raw {
        None => Ok(Vec::new()),
        Some(s) if s.trim().is_empty() => Ok(Vec::new()),
        Some(s) => Ok(serde_json::from_str(s)?),
    }
}

/// Pack an embedding into bytes
pub fn encode_embedding(embedding: &[f32]) -> Vec<u8> {
    embedding.iter().flat_map(|v| v.to_le_bytes()).collect()
}

/// Unpack an embedding blob
pub fn decode_embedding(bytes: &[u8]) -> Result<Vec<f32>, StoreError> {
    if bytes.len() % 4 != 0 {
        return Err(StoreError::InvalidData(format!(
            "Embedding blob length {} is not a multiple of 4",
            bytes.len()
        )));
    }

    Ok(bytes
        .chunks_exact(4)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_list_absent_is_empty() {
        assert!(decode_id_list(None).unwrap().is_empty());
        assert!(decode_id_list(Some("  ")).unwrap().is_empty());
        assert!(decode_id_list(Some("[]")).unwrap().is_empty());
    }

    #[test]
    fn test_id_list_decodes_json() {
        let ids = decode_id_list(Some(r#"["TECH-2026-001","TECH-2026-002"]"#)).unwrap();
        assert_eq!(ids, ["TECH-2026-001", "TECH-2026-002"]);
        assert!(decode_id_list(Some("TECH-2026-001")).is_err());
    }

    #[test]
    fn test_embedding_blob() {
        let bytes = encode_embedding(&[0.5, -1.0]);
        assert_eq!(bytes.len(), 8);
        assert_eq!(decode_embedding(&bytes).unwrap(), vec![0.5, -1.0]);
        assert!(decode_embedding(&[0, 1, 2]).is_err());
    }
}
