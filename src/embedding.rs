//! Face embedding vector and its storage encodings

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Feature vector produced by one inference call.
///
/// Values are kept exactly as the model emitted them; no normalization is
/// applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Embedding(Vec<f32>);

impl Embedding {
    pub fn new(vector: Vec<f32>) -> Self {
        Self(vector)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.0
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.0
    }

    /// Convert to little-endian bytes for storage
    pub fn to_bytes(&self) -> Vec<u8> {
        self.0.iter().flat_map(|f| f.to_le_bytes()).collect()
    }

    /// Create from bytes written by [`to_bytes`](Self::to_bytes)
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() % 4 != 0 {
            return Err(Error::EmbeddingFormat(format!(
                "byte length {} is not a multiple of 4",
                bytes.len()
            )));
        }

        let vector = bytes
            .chunks_exact(4)
            .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect();

        Ok(Self(vector))
    }

    /// Render as a single-row nested list: `[[v0, v1, ...]]`
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.0.len() * 12 + 4);
        out.push_str("[[");
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            let _ = write!(out, "{:?}", v);
        }
        out.push_str("]]");
        out
    }

    /// Parse the nested-list form. Only the first row is kept.
    pub fn from_text(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let inner = trimmed
            .strip_prefix("[[")
            .and_then(|s| s.strip_suffix("]]"))
            .ok_or_else(|| Error::EmbeddingFormat("expected [[...]]".to_string()))?;

        let first_row = inner.split("], [").next().unwrap_or_default();
        if first_row.trim().is_empty() {
            return Ok(Self(Vec::new()));
        }

        let vector = first_row
            .split(',')
            .map(|s| {
                s.trim()
                    .parse::<f32>()
                    .map_err(|e| Error::EmbeddingFormat(format!("{:?}: {}", s.trim(), e)))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self(vector))
    }
}

impl From<Vec<f32>> for Embedding {
    fn from(vector: Vec<f32>) -> Self {
        Self(vector)
    }
}

impl AsRef<[f32]> for Embedding {
    fn as_ref(&self) -> &[f32] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedding_serialization() {
        let original = Embedding::new(vec![1.0, -2.5, 3.25, 0.0]);
        let restored = Embedding::from_bytes(&original.to_bytes()).unwrap();
        assert_eq!(original, restored);
    }

    #[test]
    fn test_from_bytes_rejects_partial_float() {
        let err = Embedding::from_bytes(&[0, 0, 0]).unwrap_err();
        assert!(matches!(err, Error::EmbeddingFormat(_)));
    }

    #[test]
    fn test_text_form() {
        let embedding = Embedding::new(vec![0.5, -1.0, 0.125]);
        assert_eq!(embedding.to_text(), "[[0.5, -1.0, 0.125]]");

        let parsed = Embedding::from_text(" [[0.5, -1.0, 0.125]] ").unwrap();
        assert_eq!(parsed, embedding);
    }

    #[test]
    fn test_text_keeps_first_row_only() {
        let parsed = Embedding::from_text("[[1.0, 2.0], [3.0, 4.0]]").unwrap();
        assert_eq!(parsed.as_slice(), &[1.0, 2.0]);
    }

    #[test]
    fn test_text_rejects_malformed() {
        assert!(Embedding::from_text("1.0, 2.0").is_err());
        assert!(Embedding::from_text("[[1.0, abc]]").is_err());
    }

    #[test]
    fn test_text_preserves_precision() {
        let embedding = Embedding::new(vec![0.1f32, 1.0e-7, -123.456]);
        let parsed = Embedding::from_text(&embedding.to_text()).unwrap();
        assert_eq!(parsed, embedding);
    }

    #[test]
    fn test_serde_is_plain_array() {
        let embedding = Embedding::new(vec![1.0, 2.0]);
        assert_eq!(serde_json::to_string(&embedding).unwrap(), "[1.0,2.0]");
    }
}
