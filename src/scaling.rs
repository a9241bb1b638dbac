use serde::{Deserialize, Serialize};

use crate::error::InvariantViolation;
use crate::model::Recipe;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServingsDirection {
    Increase,
    Decrease,
}

/// Rescales a recipe's ingredient quantities one serving at a time.
pub struct ServingsScaler;

impl ServingsScaler {
    /// Step `recipe.servings` by one and scale every known ingredient count
    /// by `new / old`. Unknown counts stay unknown.
    ///
    /// Returns the new serving count. Decreasing from a single serving is
    /// rejected and leaves the recipe untouched.
    pub fn rescale(
        recipe: &mut Recipe,
        direction: ServingsDirection,
    ) -> Result<u32, InvariantViolation> {
        let old = recipe.servings;
        let new = match direction {
            ServingsDirection::Increase => old + 1,
            ServingsDirection::Decrease if old <= 1 => {
                return Err(InvariantViolation::ServingsAtMinimum)
            }
            ServingsDirection::Decrease => old - 1,
        };

        for line in recipe.ingredients.iter_mut() {
            if let Some(count) = line.count {
                line.count = Some(count * f64::from(new) / f64::from(old));
            }
        }
        recipe.servings = new;
        Ok(new)
    }
}
