pub mod api_connection;
pub mod canonicalizer;
pub mod cli;
pub mod dish_intent;
pub mod label_normalizer;
pub mod recipe_ranker;
pub mod recipe_source;
pub mod vision_labeler;
