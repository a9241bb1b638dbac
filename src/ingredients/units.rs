/// Unit spellings and the canonical short form each maps to
const UNITS: &[(&str, &str)] = &[
    ("tablespoons", "tbsp"),
    ("tablespoon", "tbsp"),
    ("tbsp", "tbsp"),
    ("tbs", "tbsp"),
    ("teaspoons", "tsp"),
    ("teaspoon", "tsp"),
    ("tsp", "tsp"),
    ("ounces", "oz"),
    ("ounce", "oz"),
    ("oz", "oz"),
    ("cups", "cup"),
    ("cup", "cup"),
    ("pounds", "pound"),
    ("pound", "pound"),
    ("lbs", "pound"),
    ("lb", "pound"),
    ("kilograms", "kg"),
    ("kilogram", "kg"),
    ("kg", "kg"),
    ("grams", "g"),
    ("gram", "g"),
    ("g", "g"),
    ("milliliters", "ml"),
    ("millilitres", "ml"),
    ("ml", "ml"),
];

/// Map a unit token to its canonical form, ignoring case and a trailing
/// period or comma ("Tbsp." -> "tbsp").
pub fn canonical_unit(token: &str) -> Option<&'static str> {
    let token = token.trim_end_matches(['.', ',']).to_lowercase();
    UNITS
        .iter()
        .find(|(spelling, _)| *spelling == token)
        .map(|(_, canonical)| *canonical)
}
