use serde::Serialize;

use crate::canonicalizer::Canonicalizer;
use crate::recipe_source::CandidateRecipe;

/// Minimum share of the user's canonical tokens a candidate must cover.
/// Strict minority matches are not worth showing.
pub const MATCH_RATIO_THRESHOLD: f64 = 0.5;

/// Provenance tag stamped on every ranked result.
pub const SOURCE_TAG: &str = "spoonacular";

/// A candidate that survived the overlap filter, ready for display.
///
/// `matched` holds canonical tokens present in both the candidate and the
/// user's set, sorted lexicographically. `missing` is the source's own
/// missed-ingredient list passed through untouched, so the user sees the
/// source's ingredient names rather than canonical forms.
#[derive(Debug, Serialize, Clone)]
pub struct ScoredRecipe {
    pub id: u64,
    pub title: String,
    pub image: Option<String>,
    pub score: u32,
    pub missing: Vec<String>,
    pub matched: Vec<String>,
    pub source: String,
}

/// Score candidates by canonical-token overlap with the user's ingredients,
/// drop weak matches, and order the survivors.
///
/// The score is `floor(match_ratio * 100)`, so survivors land in [50, 100].
/// Ordering is highest score first, then fewest missing ingredients; beyond
/// that, source order is preserved (the sort is stable). The full filtered
/// list is returned; any result-count cap is the caller's decision.
pub fn score_and_rank(
    canon: &Canonicalizer,
    user_ingredients: &[String],
    candidates: &[CandidateRecipe],
) -> Vec<ScoredRecipe> {
    let user_tokens = canon.normalize_tokens(user_ingredients);

    let mut scored = Vec::new();
    for candidate in candidates {
        let used_tokens = canon.normalize_tokens(&candidate.used_ingredient_names());

        let mut matched: Vec<String> = used_tokens.intersection(&user_tokens).cloned().collect();
        matched.sort();

        // Guard the denominator: no usable user tokens means nothing can match.
        let match_ratio = matched.len() as f64 / user_tokens.len().max(1) as f64;
        if match_ratio < MATCH_RATIO_THRESHOLD {
            continue;
        }

        scored.push(ScoredRecipe {
            id: candidate.id,
            title: candidate.title.clone(),
            image: candidate.image.clone(),
            score: (match_ratio * 100.0).floor() as u32,
            missing: candidate.missed_ingredient_names(),
            matched,
            source: SOURCE_TAG.to_string(),
        });
    }

    scored.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then(a.missing.len().cmp(&b.missing.len()))
    });
    scored
}
