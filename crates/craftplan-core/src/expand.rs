use tracing::debug;

use crate::error::PlanError;
use crate::model::{Ingredient, IngredientSpec, Recipe, RecipeDefinition};

/// Turn one recipe definition into one recipe per ingredient alternative.
///
/// All results share the definition's name and priority. Repeated ingredient
/// names within one list are summed at the position of their first use.
pub fn expand(definition: &RecipeDefinition) -> Result<Vec<Recipe>, PlanError> {
    if definition.name.trim().is_empty() {
        return Err(PlanError::Domain("recipe name is empty".to_string()));
    }

    let lists: Vec<&[(String, i64)]> = match &definition.ingredients {
        IngredientSpec::Single(list) => vec![list.as_slice()],
        IngredientSpec::Alternatives(lists) => lists.iter().map(Vec::as_slice).collect(),
    };

    let recipes = lists
        .into_iter()
        .map(|list| -> Result<Recipe, PlanError> {
            let ingredients = build_ingredients(&definition.name, list)?;
            Recipe::new(definition.name.clone(), definition.priority, ingredients)
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(recipe = %definition.name, instances = recipes.len(), "expanded recipe");
    Ok(recipes)
}

/// Expand every definition, keeping input order.
pub fn expand_all(definitions: &[RecipeDefinition]) -> Result<Vec<Recipe>, PlanError> {
    let mut recipes = Vec::new();
    for definition in definitions {
        recipes.extend(expand(definition)?);
    }
    Ok(recipes)
}

fn build_ingredients(recipe: &str, list: &[(String, i64)]) -> Result<Vec<Ingredient>, PlanError> {
    let mut merged: Vec<(String, i64)> = Vec::with_capacity(list.len());

    for (name, count) in list {
        if *count <= 0 {
            return Err(PlanError::Domain(format!(
                "recipe {} needs a positive count of {}, got {}",
                recipe, name, count
            )));
        }
        match merged.iter_mut().find(|(existing, _)| existing == name) {
            Some((_, total)) => {
                *total = total
                    .checked_add(*count)
                    .ok_or_else(|| PlanError::Domain(format!("recipe {} overflows the count of {}", recipe, name)))?;
            }
            None => merged.push((name.clone(), *count)),
        }
    }

    merged
        .into_iter()
        .map(|(name, count)| Ingredient::new(name, count))
        .collect()
}
