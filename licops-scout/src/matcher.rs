//! Redundancy matching
//!
//! Scores a vendor proposal against the knowledge catalog. The scoring
//! strategy sits behind [`SimilarityScorer`] so an embedding-backed scorer
//! can replace the keyword heuristic without touching call sites.

use crate::catalog::KnowledgeAsset;
use serde::Serialize;

/// Minimum top score that counts as a redundancy conflict
///
/// Below this threshold the result is "no conflict" no matter how many
/// candidates scored above zero.
pub const CONFLICT_THRESHOLD: f32 = 0.5;

/// Pluggable similarity scoring strategy
pub trait SimilarityScorer: Send + Sync {
    /// Score a query against one asset, in [0, 1]
    fn score(&self, query: &str, asset: &KnowledgeAsset) -> f32;
}

/// Keyword/tag-overlap heuristic standing in for semantic similarity
///
/// Base score 0.3 when any asset tag appears in the lower-cased query, then
/// scenario overrides by direct reassignment (not accumulation). Checked in
/// order; a later override replaces an earlier score outright.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeywordOverlapScorer;

impl SimilarityScorer for KeywordOverlapScorer {
    fn score(&self, query: &str, asset: &KnowledgeAsset) -> f32 {
        let query = query.to_lowercase();
        let mut score = 0.0;

        if asset.tags.iter().any(|tag| query.contains(tag.as_str())) {
            score = 0.3;
        }

        let tagged = |tag: &str| asset.tags.iter().any(|t| t == tag);
        if query.contains("news") && tagged("journalism") {
            score = 0.92;
        } else if query.contains("python") && tagged("code") {
            score = 0.85;
        } else if query.contains("french") && query.contains("book") {
            score = 0.75;
        }

        score
    }
}

/// One ranked match
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedMatch {
    pub asset: KnowledgeAsset,
    pub score: f32,
}

/// Score the query against every catalog asset and rank the hits
///
/// Zero-scoring assets are excluded. The sort is stable and descending, so
/// ties keep catalog order.
pub fn search(
    query_text: &str,
    catalog: &[KnowledgeAsset],
    scorer: &dyn SimilarityScorer,
) -> Vec<RankedMatch> {
    let mut matches: Vec<RankedMatch> = catalog
        .iter()
        .map(|asset| RankedMatch {
            asset: asset.clone(),
            score: scorer.score(query_text, asset),
        })
        .filter(|m| m.score > 0.0)
        .collect();

    matches.sort_by(|a, b| b.score.total_cmp(&a.score));
    matches
}

/// Conflict decision over ranked matches
pub fn is_conflict(matches: &[RankedMatch]) -> bool {
    matches.first().map_or(false, |top| top.score >= CONFLICT_THRESHOLD)
}
