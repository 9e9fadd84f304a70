/// Keywords that mark an ingredient as a protein, matched by substring so
/// that phrases like "chicken breast" or "smoked salmon" qualify.
pub const PROTEIN_KEYWORDS: &[&str] = &[
    "chicken", "beef", "pork", "steak", "shrimp", "salmon", "tofu", "egg", "turkey", "chorizo",
    "fish",
];

fn first_protein_keyword(ingredients: &[String]) -> Option<&'static str> {
    for ingredient in ingredients {
        let lower = ingredient.to_lowercase();
        if let Some(keyword) = PROTEIN_KEYWORDS.iter().copied().find(|k| lower.contains(k)) {
            return Some(keyword);
        }
    }
    None
}

/// Guess a short dish phrase from the ingredient list, used only to bias
/// candidate retrieval. First match wins:
/// protein + tortilla -> "taco"; protein present -> protein keyword plus the
/// second ingredient; otherwise the first two ingredients joined.
pub fn infer_dish_intent(ingredients: &[String]) -> String {
    let lower: Vec<String> = ingredients.iter().map(|i| i.to_lowercase()).collect();
    let protein = first_protein_keyword(ingredients);
    let has_tortilla = lower.iter().any(|i| i.contains("tortilla"));

    if protein.is_some() && has_tortilla {
        return "taco".to_string();
    }
    if let (Some(keyword), Some(second)) = (protein, lower.get(1)) {
        return format!("{} {}", keyword, second);
    }
    lower
        .iter()
        .take(2)
        .cloned()
        .collect::<Vec<_>>()
        .join(" ")
}
