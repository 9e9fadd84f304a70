use std::collections::{HashMap, HashSet};

// Surface form -> canonical term. Keys are lower-case and trimmed; canonical
// terms never appear as keys, so resolving twice is a no-op.
const DEFAULT_ALIASES: &[(&str, &str)] = &[
    ("steak", "beef"),
    ("beef steak", "beef"),
    ("ground beef", "beef"),
    ("minced beef", "beef"),
    ("flour tortilla", "tortilla"),
    ("corn tortilla", "tortilla"),
    ("tortilla wrap", "tortilla"),
    ("scallion", "onion"),
    ("spring onion", "onion"),
    ("green onion", "onion"),
    ("coriander", "cilantro"),
    ("prawn", "shrimp"),
    ("bell pepper", "pepper"),
    ("capsicum", "pepper"),
    ("chilli", "chili"),
    ("chile", "chili"),
    ("garbanzo", "chickpea"),
    ("garbanzo bean", "chickpea"),
    ("roma tomato", "tomato"),
    ("cherry tomato", "tomato"),
    ("plum tomato", "tomato"),
    ("aubergine", "eggplant"),
    ("courgette", "zucchini"),
];

// Non-food scene objects that image labelers routinely report.
const DEFAULT_NOISE: &[&str] = &[
    "plate",
    "bowl",
    "table",
    "tabletop",
    "counter",
    "countertop",
    "cutting board",
    "knife",
    "fork",
    "spoon",
    "napkin",
    "tablecloth",
    "glass",
    "jar",
    "bottle",
    "pan",
    "pot",
    "hand",
    "finger",
    "kitchen",
    "utensil",
    "tableware",
    "dishware",
    "wood",
    "background",
    "food",
    "ingredient",
    "produce",
];

/// Read-only alias and noise configuration, built once at startup and shared
/// by every request. Substituting a custom table keeps unit tests
/// deterministic.
pub struct Canonicalizer {
    aliases: HashMap<String, String>,
    canonical: HashSet<String>,
    noise: HashSet<String>,
}

impl Canonicalizer {
    pub fn new(aliases: &[(&str, &str)], noise: &[&str]) -> Self {
        let aliases: HashMap<String, String> = aliases
            .iter()
            .map(|(from, to)| (from.to_string(), to.to_string()))
            .collect();
        let canonical = aliases.values().cloned().collect();
        let noise = noise.iter().map(|n| n.to_string()).collect();
        Self {
            aliases,
            canonical,
            noise,
        }
    }

    /// Map a single word token to its canonical term.
    ///
    /// Strips one trailing `s`, then resolves the stripped or original form
    /// by exact membership; unknown tokens come back singularized but
    /// otherwise untouched. The caller is expected to lower-case first.
    pub fn canonicalize(&self, token: &str) -> String {
        let singular = token.strip_suffix('s').unwrap_or(token);
        for form in [singular, token] {
            if let Some(canon) = self.aliases.get(form) {
                return canon.clone();
            }
            if self.canonical.contains(form) {
                return form.to_string();
            }
        }
        singular.to_string()
    }

    /// Whole-phrase alias lookup, used before any token splitting so that
    /// multi-word surface forms like "ground beef" resolve as a unit.
    pub fn phrase_alias(&self, phrase: &str) -> Option<&str> {
        self.aliases.get(phrase).map(String::as_str)
    }

    pub fn is_noise(&self, phrase: &str) -> bool {
        self.noise.contains(phrase)
    }

    /// Union of canonical tokens across all input phrases: lower-case,
    /// hyphens to spaces, whitespace split, canonicalize each surviving
    /// token. Duplicates across phrases collapse into the set.
    pub fn normalize_tokens(&self, phrases: &[String]) -> HashSet<String> {
        let mut tokens = HashSet::new();
        for phrase in phrases {
            for token in phrase.to_lowercase().replace('-', " ").split_whitespace() {
                tokens.insert(self.canonicalize(token));
            }
        }
        tokens
    }
}

impl Default for Canonicalizer {
    fn default() -> Self {
        Self::new(DEFAULT_ALIASES, DEFAULT_NOISE)
    }
}
