use recipe_scout::api_connection::{
    connection::ApiConnectionError,
    endpoints::{ChatCompletionRequest, ChatMessage, Provider, OPENROUTER_MODELS},
};
use recipe_scout::label_normalizer::refine_labels;
use recipe_scout::recipe_source::RecipeSource;
use recipe_scout::vision_labeler::{extract_labels, ImageSource};

use dotenv::dotenv;
use std::env;

const TEST_API_KEY_ENV_VAR: &str = "OPENROUTER_API_KEY";
const TEST_SPOONACULAR_KEY_ENV_VAR: &str = "SPOONACULAR_API_KEY";

fn setup_test_environment() {
    dotenv().ok();
}

fn get_vision_test_model() -> String {
    OPENROUTER_MODELS
        .iter()
        .find(|m| m.model_role == "vision")
        .map(|m| m.model_name.to_string())
        .expect("No vision model registered in OPENROUTER_MODELS for testing")
}

#[tokio::test]
async fn test_missing_api_key_error() {
    setup_test_environment();
    let provider = Provider::openrouter("THIS_KEY_SHOULD_NOT_EXIST_IN_ENV_ABXYZ");
    let request = ChatCompletionRequest {
        model: get_vision_test_model(),
        messages: vec![ChatMessage::text("user", "Hello")],
        response_format: None,
        temperature: None,
        max_tokens: None,
    };
    let result = provider.call_chat_completion(request).await;
    assert!(matches!(result, Err(ApiConnectionError::MissingApiKey(_))));
    if let Err(ApiConnectionError::MissingApiKey(key_name)) = result {
        assert_eq!(key_name, "THIS_KEY_SHOULD_NOT_EXIST_IN_ENV_ABXYZ");
    }
}

#[tokio::test]
async fn test_recipe_source_missing_api_key() {
    setup_test_environment();
    let source = RecipeSource::spoonacular("THIS_KEY_SHOULD_NOT_EXIST_IN_ENV_ABXYZ");
    let result = source
        .fetch_candidates(&["beef".to_string(), "onion".to_string()], 5)
        .await;
    assert!(matches!(result, Err(ApiConnectionError::MissingApiKey(_))));

    let result = source.fetch_recipe_details(716429).await;
    assert!(matches!(result, Err(ApiConnectionError::MissingApiKey(_))));
}

#[test]
fn test_image_source_rejects_unknown_extensions() {
    let result = ImageSource::from_bytes(&[0u8; 4], "gif");
    assert!(result.is_err());

    let source = ImageSource::from_bytes(&[0u8; 4], "JPG").expect("jpg should be accepted");
    match source {
        ImageSource::DataUrl(url) => assert!(url.starts_with("data:image/jpeg;base64,")),
        ImageSource::Url(_) => panic!("expected a data URL"),
    }
}

#[tokio::test]
#[ignore]
async fn test_vision_labeling_live() {
    setup_test_environment();
    if env::var(TEST_API_KEY_ENV_VAR).is_err() {
        println!(
            "Skipping test_vision_labeling_live: {} not set.",
            TEST_API_KEY_ENV_VAR
        );
        return;
    }

    let provider = Provider::openrouter(TEST_API_KEY_ENV_VAR);
    let image = ImageSource::Url(
        "https://upload.wikimedia.org/wikipedia/commons/8/89/Tomato_je.jpg".to_string(),
    );
    let result = extract_labels(&provider, &image).await;
    assert!(result.is_ok(), "Vision labeling failed: {:?}", result.err());
    let labels = result.unwrap();
    assert!(!labels.is_empty());
    assert!(
        labels.iter().any(|l| l.to_lowercase().contains("tomato")),
        "Expected a tomato label, got: {:?}",
        labels
    );
}

#[tokio::test]
#[ignore]
async fn test_refine_labels_live() {
    setup_test_environment();
    if env::var(TEST_API_KEY_ENV_VAR).is_err() {
        println!(
            "Skipping test_refine_labels_live: {} not set.",
            TEST_API_KEY_ENV_VAR
        );
        return;
    }

    let provider = Provider::openrouter(TEST_API_KEY_ENV_VAR);
    let labels = vec![
        "Tomatoes".to_string(),
        "tomato".to_string(),
        "Red Onions".to_string(),
    ];
    let result = refine_labels(&provider, &labels).await;
    assert!(result.is_ok(), "Refinement failed: {:?}", result.err());
    let refined = result.unwrap();
    assert!(!refined.is_empty());
}

#[tokio::test]
#[ignore]
async fn test_spoonacular_search_live() {
    setup_test_environment();
    if env::var(TEST_SPOONACULAR_KEY_ENV_VAR).is_err() {
        println!(
            "Skipping test_spoonacular_search_live: {} not set.",
            TEST_SPOONACULAR_KEY_ENV_VAR
        );
        return;
    }

    let source = RecipeSource::spoonacular(TEST_SPOONACULAR_KEY_ENV_VAR);
    let ingredients = vec![
        "steak".to_string(),
        "tortilla".to_string(),
        "onion".to_string(),
    ];
    let result = source.fetch_candidates(&ingredients, 5).await;
    assert!(result.is_ok(), "Candidate fetch failed: {:?}", result.err());
    let candidates = result.unwrap();
    assert!(!candidates.is_empty());
    assert!(candidates.iter().all(|c| c.id != 0));
}

#[tokio::test]
#[ignore]
async fn test_spoonacular_details_live() {
    setup_test_environment();
    if env::var(TEST_SPOONACULAR_KEY_ENV_VAR).is_err() {
        println!(
            "Skipping test_spoonacular_details_live: {} not set.",
            TEST_SPOONACULAR_KEY_ENV_VAR
        );
        return;
    }

    let source = RecipeSource::spoonacular(TEST_SPOONACULAR_KEY_ENV_VAR);
    let result = source.fetch_recipe_details(716429).await;
    assert!(result.is_ok(), "Detail fetch failed: {:?}", result.err());
    let detail = result.unwrap();
    assert_eq!(detail.id, 716429);
    assert!(!detail.title.is_empty());
}
