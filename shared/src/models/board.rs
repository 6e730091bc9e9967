//! Session-scoped list of recommendations

use serde::Serialize;

use super::Recommendation;

/// Ordered list of recommendations, most recent first, one entry per input id
#[derive(Debug, Clone, Default, Serialize)]
pub struct RecommendationBoard {
    entries: Vec<Recommendation>,
}

impl RecommendationBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a recommendation at the front, replacing any entry with the same id
    pub fn upsert(&mut self, recommendation: Recommendation) {
        self.entries.retain(|r| r.id != recommendation.id);
        self.entries.insert(0, recommendation);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn list(&self) -> &[Recommendation] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
