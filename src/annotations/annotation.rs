use crate::core::geo::Point;
use serde::{Deserialize, Serialize};

/// Stable, caller-assigned identity of an annotation
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AnnotationId(String);

impl AnnotationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AnnotationId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for AnnotationId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for AnnotationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A marker placed at a content-space position.
///
/// Two annotations are the same annotation when their identifiers match,
/// whatever their positions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Annotation {
    identifier: AnnotationId,
    content_position: Point,
}

impl Annotation {
    pub fn new(identifier: impl Into<AnnotationId>, content_position: Point) -> Self {
        Self {
            identifier: identifier.into(),
            content_position,
        }
    }

    pub fn identifier(&self) -> &AnnotationId {
        &self.identifier
    }

    pub fn content_position(&self) -> Point {
        self.content_position
    }

    pub fn set_content_position(&mut self, position: Point) {
        self.content_position = position;
    }
}

impl PartialEq for Annotation {
    fn eq(&self, other: &Self) -> bool {
        self.identifier == other.identifier
    }
}

impl Eq for Annotation {}

impl std::hash::Hash for Annotation {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.identifier.hash(state);
    }
}
