use crate::core::{Recipe, RecipeName};
use crate::query::Query;
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult<'a> {
    pub recipe: &'a Recipe,
    pub match_count: usize,
    pub match_percentage: f64,
    pub missing_terms: Vec<&'a str>,
    pub total_ingredients: usize,
}

impl<'a> MatchResult<'a> {
    fn ranking(a: &Self, b: &Self) -> Ordering {
        b.match_percentage
            .total_cmp(&a.match_percentage)
            .then(a.total_ingredients.cmp(&b.total_ingredients))
    }
}

pub struct SearchEngine;

impl SearchEngine {
    pub fn rank<'a>(catalog: &'a [Recipe], query: &'a Query) -> Vec<MatchResult<'a>> {
        let mut results: Vec<MatchResult<'a>> = catalog
            .iter()
            .filter_map(|recipe| Self::score(recipe, query))
            .collect();

        // Stable: equal keys keep catalog order.
        results.sort_by(MatchResult::ranking);

        let mut seen: HashSet<&RecipeName> = HashSet::new();
        results.retain(|r| seen.insert(&r.recipe.name));

        debug!(
            catalog = catalog.len(),
            matched = results.len(),
            terms = query.len(),
            "ranked catalog"
        );
        results
    }

    fn score<'a>(recipe: &'a Recipe, query: &'a Query) -> Option<MatchResult<'a>> {
        let total_ingredients = recipe.total_ingredients();
        if total_ingredients == 0 {
            return None;
        }

        let mut counted: HashSet<&str> = HashSet::new();
        let mut match_count = 0;
        let mut missing_terms = Vec::new();

        for term in query.terms() {
            if !counted.insert(term.as_str()) {
                continue;
            }
            if recipe.has_ingredient(term) {
                match_count += 1;
            } else {
                missing_terms.push(term.as_str());
            }
        }

        if match_count == 0 {
            return None;
        }

        Some(MatchResult {
            recipe,
            match_count,
            match_percentage: match_count as f64 / total_ingredients as f64 * 100.0,
            missing_terms,
            total_ingredients,
        })
    }
}
