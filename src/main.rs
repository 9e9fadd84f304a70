use anyhow::{bail, Context, Result};
use std::path::Path;

use recipe_scout::api_connection::endpoints::Provider;
use recipe_scout::canonicalizer::Canonicalizer;
use recipe_scout::cli::parse_args;
use recipe_scout::label_normalizer::{normalize_labels, refine_labels};
use recipe_scout::recipe_ranker::score_and_rank;
use recipe_scout::recipe_source::RecipeSource;
use recipe_scout::vision_labeler::{extract_labels, ImageSource};

const OPENROUTER_KEY_ENV_VAR: &str = "OPENROUTER_API_KEY";
const SPOONACULAR_KEY_ENV_VAR: &str = "SPOONACULAR_API_KEY";

// Ask the candidate source for more than we display; the ranker filters and
// reorders independently of the source's own relevance ordering.
const CANDIDATE_FETCH_LIMIT: u32 = 15;

async fn gather_raw_labels(provider: &Provider, cli: &recipe_scout::cli::Cli) -> Result<Vec<String>> {
    if let Some(list) = &cli.ingredients {
        return Ok(list.split(',').map(|s| s.trim().to_string()).collect());
    }

    let Some(image_path) = &cli.image else {
        bail!("Provide either --image or --ingredients");
    };

    println!("Reading image file: {}", image_path);
    let bytes = tokio::fs::read(image_path)
        .await
        .with_context(|| format!("Failed to read image file '{}'", image_path))?;
    let extension = Path::new(image_path)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("");
    let image = ImageSource::from_bytes(&bytes, extension)?;

    println!("Asking the vision model for ingredient labels...");
    let labels = extract_labels(provider, &image)
        .await
        .map_err(|e| anyhow::anyhow!("Image labeling failed: {}", e))?;
    println!("Vision model returned {} labels: {:?}", labels.len(), labels);
    Ok(labels)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli_args = parse_args();
    let provider = Provider::openrouter(OPENROUTER_KEY_ENV_VAR);
    let canonicalizer = Canonicalizer::default();

    let raw_labels = gather_raw_labels(&provider, &cli_args).await?;

    let deterministic = normalize_labels(&canonicalizer, &raw_labels);
    if deterministic.is_empty() {
        println!("No usable ingredients after normalization.");
        return Ok(());
    }
    println!("Normalized ingredients: {:?}", deterministic);

    let ingredients = if cli_args.no_refine || std::env::var(OPENROUTER_KEY_ENV_VAR).is_err() {
        deterministic
    } else {
        match refine_labels(&provider, &deterministic).await {
            // Refined output goes back through the deterministic pass so the
            // canonical/dedup invariants hold on both paths.
            Ok(refined) => {
                let refined = normalize_labels(&canonicalizer, &refined);
                println!("Refined ingredients: {:?}", refined);
                refined
            }
            Err(e) => {
                eprintln!("Label refinement failed ({}); keeping deterministic list.", e);
                deterministic
            }
        }
    };

    println!("\nFetching recipe candidates...");
    let source = RecipeSource::spoonacular(SPOONACULAR_KEY_ENV_VAR);
    let candidates = source
        .fetch_candidates(&ingredients, CANDIDATE_FETCH_LIMIT)
        .await
        .map_err(|e| anyhow::anyhow!("Candidate fetch failed: {}", e))?;
    println!("Candidate source returned {} recipes.", candidates.len());

    let ranked = score_and_rank(&canonicalizer, &ingredients, &candidates);
    if ranked.is_empty() {
        println!("No recipes matched at least half of your ingredients.");
        return Ok(());
    }

    println!("\nTop matches:");
    for recipe in ranked.iter().take(cli_args.top) {
        println!(
            "  [{:>3}%] {} (id {})\n         matched: {} | missing: {}",
            recipe.score,
            recipe.title,
            recipe.id,
            recipe.matched.join(", "),
            if recipe.missing.is_empty() {
                "none".to_string()
            } else {
                recipe.missing.join(", ")
            }
        );
    }

    if cli_args.details {
        if let Some(best) = ranked.first() {
            println!("\nFetching details for '{}'...", best.title);
            match source.fetch_recipe_details(best.id).await {
                Ok(detail) => {
                    println!("{:#?}", detail);
                }
                Err(e) => {
                    eprintln!("Detail fetch failed: {}", e);
                }
            }
        }
    }

    Ok(())
}
