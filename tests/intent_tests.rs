use recipe_scout::dish_intent::infer_dish_intent;
use recipe_scout::recipe_source::retrieval_query;

fn ingredients(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn protein_plus_tortilla_means_taco() {
    assert_eq!(
        infer_dish_intent(&ingredients(&["steak", "tortilla", "onion"])),
        "taco"
    );
    // Substring matching: phrases qualify, not just bare keywords.
    assert_eq!(
        infer_dish_intent(&ingredients(&["flour tortillas", "chicken breast"])),
        "taco"
    );
}

#[test]
fn protein_without_tortilla_pairs_keyword_with_second_ingredient() {
    assert_eq!(
        infer_dish_intent(&ingredients(&["chicken thighs", "rice", "broccoli"])),
        "chicken rice"
    );
    // The matched keyword is used, not the full ingredient phrase.
    assert_eq!(
        infer_dish_intent(&ingredients(&["smoked salmon", "dill"])),
        "salmon dill"
    );
}

#[test]
fn fallback_joins_the_first_two_ingredients() {
    assert_eq!(
        infer_dish_intent(&ingredients(&["flour", "sugar"])),
        "flour sugar"
    );
    assert_eq!(
        infer_dish_intent(&ingredients(&["flour", "sugar", "butter"])),
        "flour sugar"
    );
}

#[test]
fn intent_is_lower_cased() {
    assert_eq!(
        infer_dish_intent(&ingredients(&["Flour", "Sugar"])),
        "flour sugar"
    );
}

#[test]
fn single_ingredient_falls_through_to_join() {
    assert_eq!(infer_dish_intent(&ingredients(&["beef"])), "beef");
}

#[test]
fn empty_input_yields_empty_intent() {
    assert_eq!(infer_dish_intent(&[]), "");
}

#[test]
fn retrieval_query_forces_steak_taco_when_both_cues_present() {
    assert_eq!(
        retrieval_query(&ingredients(&["steak", "tortilla", "onion"])),
        "steak taco"
    );
    // Canonicalized lists say "beef" rather than "steak"; the override
    // still has to fire.
    assert_eq!(
        retrieval_query(&ingredients(&["beef", "tortilla", "onion"])),
        "steak taco"
    );
}

#[test]
fn retrieval_query_otherwise_uses_the_inferred_intent() {
    let list = ingredients(&["chicken thighs", "rice"]);
    assert_eq!(retrieval_query(&list), infer_dish_intent(&list));
    assert_eq!(retrieval_query(&list), "chicken rice");
}
