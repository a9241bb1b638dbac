mod parser;
mod units;

pub use parser::IngredientParser;
pub use units::canonical_unit;
