//! Result records returned to callers

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::embedding::Embedding;

/// Axis-aligned rectangle in source-image coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl BoundingBox {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// True when the rectangle encloses no area
    pub fn is_empty(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:.1}, {:.1}, {:.1}, {:.1}]",
            self.left, self.top, self.right, self.bottom
        )
    }
}

/// Immutable outcome of one recognition call.
///
/// `distance` is lower-is-better; `f32::INFINITY` means no match was computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognitionResult {
    id: String,
    title: String,
    distance: f32,
    location: BoundingBox,
    extra: Option<Embedding>,
}

impl RecognitionResult {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        distance: f32,
        location: BoundingBox,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            distance,
            location,
            extra: None,
        }
    }

    /// Result carrying only an embedding: id `"0"`, title `"?"`, infinite
    /// distance and an empty location.
    pub fn unmatched(embedding: Option<Embedding>) -> Self {
        Self {
            extra: embedding,
            ..Self::new("0", "?", f32::INFINITY, BoundingBox::default())
        }
    }

    pub fn with_embedding(mut self, embedding: Embedding) -> Self {
        self.extra = Some(embedding);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn location(&self) -> &BoundingBox {
        &self.location
    }

    pub fn embedding(&self) -> Option<&Embedding> {
        self.extra.as_ref()
    }

    pub fn into_embedding(self) -> Option<Embedding> {
        self.extra
    }
}

impl fmt::Display for RecognitionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::with_capacity(4);
        if !self.id.is_empty() {
            parts.push(format!("[{}]", self.id));
        }
        if !self.title.is_empty() {
            parts.push(self.title.clone());
        }
        parts.push(format!("({:.1}%)", self.distance * 100.0));
        if !self.location.is_empty() {
            parts.push(self.location.to_string());
        }
        f.write_str(&parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmatched_placeholders() {
        let result = RecognitionResult::unmatched(None);
        assert_eq!(result.id(), "0");
        assert_eq!(result.title(), "?");
        assert!(result.distance().is_infinite() && result.distance() > 0.0);
        assert!(result.location().is_empty());
        assert!(result.embedding().is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(RecognitionResult::unmatched(None).to_string(), "[0] ? (inf%)");

        let located = RecognitionResult::new("7", "alice", 0.25, BoundingBox::new(1.0, 2.0, 11.0, 22.0));
        assert_eq!(located.to_string(), "[7] alice (25.0%) [1.0, 2.0, 11.0, 22.0]");
    }

    #[test]
    fn test_bounding_box_geometry() {
        let b = BoundingBox::new(10.0, 20.0, 40.0, 60.0);
        assert_eq!(b.width(), 30.0);
        assert_eq!(b.height(), 40.0);
        assert!(!b.is_empty());
        assert!(BoundingBox::default().is_empty());
    }

    #[test]
    fn test_with_embedding() {
        let result = RecognitionResult::unmatched(None).with_embedding(Embedding::new(vec![1.0]));
        assert_eq!(result.embedding().map(|e| e.len()), Some(1));
        assert_eq!(result.into_embedding().unwrap().into_vec(), vec![1.0]);
    }
}
