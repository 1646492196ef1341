//! YAML input files.
//!
//! `resources.yaml` maps resource names to counts. `recipes.yaml` maps recipe
//! names to `{priority, ingredients}` where `ingredients` is either a mapping
//! of resource name to count or a list of such mappings (alternatives).
//! Document order is kept: it decides row and column order of the program.

use std::path::Path;

use craftplan_core::{IngredientSpec, PlanError, RecipeDefinition, Resource};
use serde_yaml::{Mapping, Value};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Cannot read {path}: {message}")]
    Io { path: String, message: String },
    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("{0}")]
    Format(String),
    #[error(transparent)]
    Plan(#[from] PlanError),
}

pub fn read_resources_file(path: &Path) -> Result<Vec<Resource>, LoadError> {
    let resources = parse_resources(&read(path)?)?;
    debug!(path = %path.display(), count = resources.len(), "loaded resources");
    Ok(resources)
}

pub fn read_recipes_file(path: &Path) -> Result<Vec<RecipeDefinition>, LoadError> {
    let recipes = parse_recipes(&read(path)?)?;
    debug!(path = %path.display(), count = recipes.len(), "loaded recipes");
    Ok(recipes)
}

fn read(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|e| LoadError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

pub fn parse_resources(source: &str) -> Result<Vec<Resource>, LoadError> {
    let root = top_level_mapping(source, "resources")?;

    root.iter()
        .map(|(key, value)| -> Result<Resource, LoadError> {
            let name = key_name(key)?;
            let count = value
                .as_i64()
                .ok_or_else(|| LoadError::Format(format!("resource {} must have an integer count", name)))?;
            Ok(Resource::new(name, count)?)
        })
        .collect()
}

pub fn parse_recipes(source: &str) -> Result<Vec<RecipeDefinition>, LoadError> {
    let root = top_level_mapping(source, "recipes")?;

    root.iter()
        .map(|(key, value)| -> Result<RecipeDefinition, LoadError> {
            let name = key_name(key)?;
            let body = value
                .as_mapping()
                .ok_or_else(|| LoadError::Format(format!("recipe {} must be a mapping", name)))?;

            let priority = body
                .get("priority")
                .and_then(Value::as_i64)
                .ok_or_else(|| LoadError::Format(format!("recipe {} needs an integer priority", name)))?;

            let ingredients = match body.get("ingredients") {
                Some(Value::Mapping(m)) => IngredientSpec::Single(ingredient_list(&name, m)?),
                Some(Value::Sequence(items)) => IngredientSpec::Alternatives(
                    items
                        .iter()
                        .map(|item| -> Result<Vec<(String, i64)>, LoadError> {
                            let m = item.as_mapping().ok_or_else(|| {
                                LoadError::Format(format!("recipe {} alternatives must be mappings", name))
                            })?;
                            ingredient_list(&name, m)
                        })
                        .collect::<Result<Vec<_>, _>>()?,
                ),
                Some(Value::Null) | None => IngredientSpec::Single(Vec::new()),
                Some(_) => {
                    return Err(LoadError::Format(format!(
                        "recipe {} ingredients must be a mapping or a list of mappings",
                        name
                    )));
                }
            };

            Ok(RecipeDefinition::new(name, priority, ingredients))
        })
        .collect()
}

fn top_level_mapping(source: &str, what: &str) -> Result<Mapping, LoadError> {
    match serde_yaml::from_str::<Value>(source)? {
        Value::Mapping(m) => Ok(m),
        Value::Null => Ok(Mapping::new()),
        _ => Err(LoadError::Format(format!("{} file must be a mapping", what))),
    }
}

fn key_name(key: &Value) -> Result<String, LoadError> {
    match key {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(LoadError::Format(format!("unsupported name: {:?}", other))),
    }
}

fn ingredient_list(recipe: &str, mapping: &Mapping) -> Result<Vec<(String, i64)>, LoadError> {
    mapping
        .iter()
        .map(|(key, value)| -> Result<(String, i64), LoadError> {
            let name = key_name(key)?;
            let count = value.as_i64().ok_or_else(|| {
                LoadError::Format(format!("recipe {} needs an integer count of {}", recipe, name))
            })?;
            Ok((name, count))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_resources_keeps_order() {
        let resources = parse_resources("wood: 10\nstone: 4\nclay: 0\n").unwrap();
        let names: Vec<_> = resources.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["wood", "stone", "clay"]);
        assert_eq!(resources[0].count(), 10);
    }

    #[test]
    fn test_parse_resources_rejects_negative() {
        let err = parse_resources("wood: -3\n").unwrap_err();
        assert!(matches!(err, LoadError::Plan(PlanError::Domain(_))));

        let err = parse_resources("wood: lots\n").unwrap_err();
        assert!(matches!(err, LoadError::Format(_)));
    }

    #[test]
    fn test_parse_empty_file() {
        assert!(parse_resources("").unwrap().is_empty());
        assert!(parse_recipes("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_recipes() {
        let source = r#"
axe:
  priority: 5
  ingredients:
    wood: 2
    stone: 1
torch:
  priority: 2
  ingredients:
    - wood: 1
      coal: 1
    - wood: 1
      resin: 3
"#;
        let recipes = parse_recipes(source).unwrap();

        assert_eq!(recipes.len(), 2);
        assert_eq!(recipes[0].name, "axe");
        assert_eq!(
            recipes[0].ingredients,
            IngredientSpec::Single(vec![("wood".to_string(), 2), ("stone".to_string(), 1)])
        );
        match &recipes[1].ingredients {
            IngredientSpec::Alternatives(lists) => {
                assert_eq!(lists.len(), 2);
                assert_eq!(lists[1][1], ("resin".to_string(), 3));
            }
            other => panic!("expected alternatives, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_recipes_requires_priority() {
        let err = parse_recipes("axe:\n  ingredients:\n    wood: 2\n").unwrap_err();
        assert_eq!(err.to_string(), "recipe axe needs an integer priority");
    }
}
