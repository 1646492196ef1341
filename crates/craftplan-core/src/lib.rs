pub mod error;
pub mod expand;
pub mod model;
pub mod planner;
pub mod program;
pub mod summary;

pub use error::PlanError;
pub use expand::{expand, expand_all};
pub use model::{Ingredient, IngredientSpec, Recipe, RecipeDefinition, Resource, validate_resources};
pub use planner::{PlanOutcome, Planner};
pub use program::Program;
pub use summary::Summary;
