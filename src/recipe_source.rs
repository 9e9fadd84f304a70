use dotenv::dotenv;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;

use crate::api_connection::connection::ApiConnectionError;
use crate::dish_intent::infer_dish_intent;

const SPOONACULAR_SEARCH: &str = "https://api.spoonacular.com/recipes/complexSearch";
const SPOONACULAR_INFORMATION: &str = "https://api.spoonacular.com/recipes";

/// Ingredient entry as reported inside a candidate record. Only the name is
/// meaningful for ranking.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct IngredientRef {
    #[serde(default)]
    pub name: String,
}

/// Candidate recipe as returned by complexSearch with `fillIngredients`.
/// The source's "used"/"missed" split is its own opinion of overlap; the
/// ranker recomputes matches from canonical tokens. Missing fields
/// deserialize to empty defaults rather than failing the request.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct CandidateRecipe {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(rename = "usedIngredients", default)]
    pub used_ingredients: Vec<IngredientRef>,
    #[serde(rename = "missedIngredients", default)]
    pub missed_ingredients: Vec<IngredientRef>,
}

impl CandidateRecipe {
    pub fn used_ingredient_names(&self) -> Vec<String> {
        self.used_ingredients.iter().map(|i| i.name.clone()).collect()
    }

    pub fn missed_ingredient_names(&self) -> Vec<String> {
        self.missed_ingredients.iter().map(|i| i.name.clone()).collect()
    }
}

#[derive(Debug, Deserialize, Default)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<CandidateRecipe>,
}

/// Full recipe record from the information endpoint.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RecipeDetail {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(rename = "readyInMinutes", default)]
    pub ready_in_minutes: Option<u32>,
    #[serde(default)]
    pub servings: Option<u32>,
    #[serde(rename = "sourceUrl", default)]
    pub source_url: Option<String>,
}

/// Query string sent to the candidate source.
///
/// Usually the inferred dish intent, with one same-request override applied
/// here at the call site: when the ingredients contain "tortilla" together
/// with "steak" or "beef", the query is forced to "steak taco" so retrieval
/// does not drift off topic.
pub fn retrieval_query(ingredients: &[String]) -> String {
    let lower: Vec<String> = ingredients.iter().map(|i| i.to_lowercase()).collect();
    let has_tortilla = lower.iter().any(|i| i.contains("tortilla"));
    let has_steak = lower
        .iter()
        .any(|i| i.contains("steak") || i.contains("beef"));

    if has_tortilla && has_steak {
        return "steak taco".to_string();
    }
    infer_dish_intent(ingredients)
}

/// Spoonacular client. Holds the API key environment variable *name*; the
/// key itself is resolved per call, after dotenv has had a chance to load.
pub struct RecipeSource {
    client: Client,
    api_key_env_var: String,
}

impl RecipeSource {
    pub fn spoonacular(api_key_env_var_name: &str) -> Self {
        dotenv().ok();
        Self {
            client: Client::new(),
            api_key_env_var: api_key_env_var_name.to_string(),
        }
    }

    fn api_key(&self) -> Result<String, ApiConnectionError> {
        env::var(&self.api_key_env_var)
            .map_err(|_| ApiConnectionError::MissingApiKey(self.api_key_env_var.clone()))
    }

    /// Fetch candidate recipes via complexSearch, biased to maximize
    /// ingredient overlap.
    pub async fn fetch_candidates(
        &self,
        ingredients: &[String],
        limit: u32,
    ) -> Result<Vec<CandidateRecipe>, ApiConnectionError> {
        let api_key = self.api_key()?;

        let has_tortilla = ingredients
            .iter()
            .any(|i| i.to_lowercase().contains("tortilla"));
        let query = retrieval_query(ingredients);

        let limit_str = limit.to_string();
        let include_ingredients = ingredients.join(",");
        let mut params: Vec<(&str, &str)> = vec![
            ("apiKey", api_key.as_str()),
            ("query", query.as_str()),
            // complexSearch treats includeIngredients as a soft filter; the
            // ranker downstream does the real ordering.
            ("includeIngredients", include_ingredients.as_str()),
            ("number", limit_str.as_str()),
            ("addRecipeInformation", "true"),
            ("fillIngredients", "true"),
            ("instructionsRequired", "false"),
            ("sort", "max-used-ingredients"),
            ("sortDirection", "desc"),
            ("ranking", "2"),
            ("type", "main course"),
        ];
        if has_tortilla {
            params.push(("cuisine", "mexican"));
        }

        let response = self
            .client
            .get(SPOONACULAR_SEARCH)
            .query(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(ApiConnectionError::ApiError { status, error_body });
        }

        let data = response.json::<SearchResponse>().await?;
        Ok(data.results)
    }

    /// Fetch the full recipe record, instructions included.
    pub async fn fetch_recipe_details(
        &self,
        recipe_id: u64,
    ) -> Result<RecipeDetail, ApiConnectionError> {
        let api_key = self.api_key()?;
        let url = format!("{}/{}/information", SPOONACULAR_INFORMATION, recipe_id);

        let response = self
            .client
            .get(&url)
            .query(&[("apiKey", api_key.as_str()), ("includeNutrition", "false")])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(ApiConnectionError::ApiError { status, error_body });
        }

        Ok(response.json::<RecipeDetail>().await?)
    }
}
