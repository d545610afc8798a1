//! Retrieval re-ranking

use super::store::RetrievedChunk;

/// Default distance multiplier for critical chunks
pub const DEFAULT_CRITICAL_BOOST: f32 = 0.7;

/// Scale critical chunks' distance by `factor`, re-sort nearest first, and
/// keep at most `limit` hits.
///
/// The sort is stable, so equal distances keep their incoming order.
pub fn apply_critical_boost(
    mut hits: Vec<RetrievedChunk>,
    factor: f32,
    limit: usize,
) -> Vec<RetrievedChunk> {
    for hit in hits.iter_mut().filter(|h| h.chunk.is_critical) {
        hit.distance *= factor;
    }

    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits.truncate(limit);
    hits
}

/// Number of candidates to fetch before re-ranking
pub fn candidate_limit(limit: usize, boost: bool) -> usize {
    if boost { limit.saturating_mul(2) } else { limit }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::document::DocType;
    use crate::domain::ingestion::{ChunkMetadata, DocumentChunk};

    fn hit(id: &str, critical: bool, distance: f32) -> RetrievedChunk {
        RetrievedChunk::new(
            DocumentChunk {
                id: id.to_string(),
                content: format!("content {}", id),
                section_title: String::new(),
                doc_type: DocType::HouseManual,
                language: "en".to_string(),
                is_critical: critical,
                source_url: String::new(),
                source_filename: "manual.md".to_string(),
                property_id: "prop".to_string(),
                chunk_index: 0,
                total_chunks: 1,
                metadata: ChunkMetadata::new("ing", "Manual", 1),
            },
            distance,
        )
    }

    #[test]
    fn test_critical_hit_moves_ahead() {
        let hits = vec![hit("a", false, 0.5), hit("b", true, 0.6)];
        let ranked = apply_critical_boost(hits, DEFAULT_CRITICAL_BOOST, 10);

        assert_eq!(ranked[0].chunk.id, "b");
        assert!((ranked[0].distance - 0.42).abs() < 1e-6);
        assert_eq!(ranked[1].chunk.id, "a");
    }

    #[test]
    fn test_boost_truncates() {
        let hits = vec![hit("a", false, 0.1), hit("b", false, 0.2), hit("c", false, 0.3)];
        let ranked = apply_critical_boost(hits, DEFAULT_CRITICAL_BOOST, 2);

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[1].chunk.id, "b");
    }

    #[test]
    fn test_candidate_limit() {
        assert_eq!(candidate_limit(5, true), 10);
        assert_eq!(candidate_limit(5, false), 5);
    }

    #[test]
    fn test_candidate_limit_saturates() {
        assert_eq!(candidate_limit(usize::MAX, true), usize::MAX);
    }

    #[test]
    fn test_display_content_highlights_critical() {
        assert!(hit("a", true, 0.1).display_content().starts_with("⚠️ IMPORTANT: "));
        assert_eq!(hit("b", false, 0.1).display_content(), "content b");
    }
}
