//! Validated value types for resources, ingredients and recipes, plus the
//! raw recipe definition handed over by a loader.

use std::collections::HashSet;

use crate::error::PlanError;

/// A named stock of some material
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    name: String,
    count: u64,
}

/// A quantity of a resource consumed by one unit of a recipe
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    name: String,
    count: u64,
}

/// One way of producing one unit of `name`.
///
/// Several recipes may share a name when a definition lists alternative
/// ingredient sets; each is planned independently.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    name: String,
    priority: i64,
    ingredients: Vec<Ingredient>,
}

/// Ingredients of a recipe definition as a loader reads them
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum IngredientSpec {
    /// One fixed ingredient list
    Single(Vec<(String, i64)>),
    /// Any of several ingredient lists
    Alternatives(Vec<Vec<(String, i64)>>),
}

/// An unvalidated recipe as it appears in configuration
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeDefinition {
    pub name: String,
    pub priority: i64,
    pub ingredients: IngredientSpec,
}

impl Resource {
    pub fn new(name: impl Into<String>, count: i64) -> Result<Self, PlanError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(PlanError::Domain("resource name is empty".to_string()));
        }
        let count = u64::try_from(count)
            .map_err(|_| PlanError::Domain(format!("resource {} has negative count {}", name, count)))?;
        Ok(Self { name, count })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn count(&self) -> u64 {
        self.count
    }
}

impl Ingredient {
    pub fn new(name: impl Into<String>, count: i64) -> Result<Self, PlanError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(PlanError::Domain("ingredient name is empty".to_string()));
        }
        if count <= 0 {
            return Err(PlanError::Domain(format!(
                "ingredient {} must have a positive count, got {}",
                name, count
            )));
        }
        Ok(Self {
            name,
            count: count as u64,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn count(&self) -> u64 {
        self.count
    }
}

impl Recipe {
    pub fn new(name: impl Into<String>, priority: i64, ingredients: Vec<Ingredient>) -> Result<Self, PlanError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(PlanError::Domain("recipe name is empty".to_string()));
        }
        Ok(Self {
            name,
            priority,
            ingredients,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn priority(&self) -> i64 {
        self.priority
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }
}

impl RecipeDefinition {
    pub fn new(name: impl Into<String>, priority: i64, ingredients: IngredientSpec) -> Self {
        Self {
            name: name.into(),
            priority,
            ingredients,
        }
    }
}

/// Reject resource lists that name the same resource twice.
pub fn validate_resources(resources: &[Resource]) -> Result<(), PlanError> {
    let mut seen = HashSet::new();
    for resource in resources {
        if !seen.insert(resource.name()) {
            return Err(PlanError::Domain(format!("duplicate resource: {}", resource.name())));
        }
    }
    Ok(())
}
