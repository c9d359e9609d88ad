//! Semantic relevance ranking of sections against a persona/task query.
//!
//! The embedding model is an external collaborator behind the [`Embedder`]
//! trait; ranking itself is a pure function returning new score-augmented
//! records, never mutating shared section state.

pub mod hash;

pub use hash::HashEmbedder;

use crate::error::Result;
use crate::model::{RankedSection, Section};

/// Abstract interface to the embedding model.
///
/// Implementations must be deterministic: identical input text yields an
/// identical vector.
pub trait Embedder: Send + Sync {
    /// Embed each input string into one fixed-length vector.
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}

/// Build the query string from a persona role and task description.
pub fn build_query(persona: &str, task: &str) -> String {
    format!("User Persona: {persona}. Task: {task}")
}

/// Cosine similarity between two vectors.
///
/// Zero for mismatched lengths or empty input. For l2-normalized vectors
/// this is the plain dot product.
pub fn cosine_similarity(left: &[f32], right: &[f32]) -> f64 {
    if left.len() != right.len() || left.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0_f64;
    let mut left_norm = 0.0_f64;
    let mut right_norm = 0.0_f64;
    for (l, r) in left.iter().zip(right.iter()) {
        let (l, r) = (f64::from(*l), f64::from(*r));
        dot += l * r;
        left_norm += l * l;
        right_norm += r * r;
    }

    if left_norm <= 0.0 || right_norm <= 0.0 {
        return 0.0;
    }
    dot / (left_norm.sqrt() * right_norm.sqrt())
}

/// Score every section against the persona/task query and order by
/// descending relevance.
///
/// The sort is stable: equal scores keep their input order, so re-running
/// on identical inputs and embeddings reproduces the same order exactly.
pub fn rank_sections(
    embedder: &dyn Embedder,
    persona: &str,
    task: &str,
    sections: Vec<Section>,
) -> Result<Vec<RankedSection>> {
    if sections.is_empty() {
        return Ok(Vec::new());
    }

    let query = build_query(persona, task);
    let query_embedding = embedder
        .embed(std::slice::from_ref(&query))?
        .into_iter()
        .next()
        .unwrap_or_default();

    let contents: Vec<String> = sections.iter().map(|s| s.content.clone()).collect();
    let section_embeddings = embedder.embed(&contents)?;

    let mut ranked: Vec<RankedSection> = sections
        .into_iter()
        .zip(section_embeddings)
        .map(|(section, embedding)| RankedSection {
            score: cosine_similarity(&query_embedding, &embedding),
            section,
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    Ok(ranked)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(title: &str, content: &str) -> Section {
        Section {
            document: "doc.pdf".to_string(),
            title: title.to_string(),
            page: 1,
            content: format!("{title}\n{content}"),
        }
    }

    #[test]
    fn test_cosine_similarity_basics() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-9);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-9);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 0.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }

    #[test]
    fn test_build_query() {
        assert_eq!(
            build_query("Travel Planner", "Plan a 3-day trip"),
            "User Persona: Travel Planner. Task: Plan a 3-day trip"
        );
    }

    #[test]
    fn test_ranking_is_descending_and_idempotent() {
        let embedder = HashEmbedder::default();
        let sections = vec![
            section("Tax law", "Deductions, filings and tax law compliance."),
            section("Hiking", "Day hiking trails, scenic trip planning for travel."),
        ];

        let first = rank_sections(&embedder, "Travel Planner", "Plan a 3-day trip", sections.clone())
            .unwrap();
        for window in first.windows(2) {
            assert!(window[0].score >= window[1].score);
        }

        let second = rank_sections(&embedder, "Travel Planner", "Plan a 3-day trip", sections)
            .unwrap();
        let order_a: Vec<&str> = first.iter().map(|r| r.section.title.as_str()).collect();
        let order_b: Vec<&str> = second.iter().map(|r| r.section.title.as_str()).collect();
        assert_eq!(order_a, order_b);
    }

    #[test]
    fn test_equal_scores_keep_input_order() {
        struct ConstantEmbedder;
        impl Embedder for ConstantEmbedder {
            fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
                Ok(texts.iter().map(|_| vec![1.0, 0.0]).collect())
            }
        }

        let sections = vec![section("First", "a"), section("Second", "b")];
        let ranked = rank_sections(&ConstantEmbedder, "p", "t", sections).unwrap();
        assert_eq!(ranked[0].section.title, "First");
        assert_eq!(ranked[1].section.title, "Second");
    }

    #[test]
    fn test_empty_sections_rank_to_empty() {
        let embedder = HashEmbedder::default();
        assert!(rank_sections(&embedder, "p", "t", Vec::new())
            .unwrap()
            .is_empty());
    }
}
