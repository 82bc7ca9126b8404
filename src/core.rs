use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecipeName(pub String);

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Recipe {
    pub name: RecipeName,
    pub ingredients: Vec<String>,
    pub preparation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Recipe {
    pub fn total_ingredients(&self) -> usize {
        self.ingredients.len()
    }

    /// Case-insensitive substring containment over every ingredient phrase.
    /// `term` is expected to be lower-cased already.
    pub fn has_ingredient(&self, term: &str) -> bool {
        self.ingredients
            .iter()
            .any(|ing| ing.to_lowercase().contains(term))
    }
}

/// The catalog document: `{ "rezepte": [ ... ] }`.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Catalog {
    #[serde(rename = "rezepte", alias = "recipes")]
    pub recipes: Vec<Recipe>,
}

impl Catalog {
    pub fn from_json(content: &str) -> Result<Self, PantryError> {
        serde_json::from_str(content).map_err(PantryError::CatalogParse)
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

#[derive(Error, Debug)]
pub enum PantryError {
    #[error("Please enter valid ingredients to search for recipes")]
    InvalidQuery,

    #[error("Catalog could not be loaded: {0}")]
    CatalogLoad(String),

    #[error("Catalog is malformed: {0}")]
    CatalogParse(#[from] serde_json::Error),

    #[error("File system error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Network connection failed: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Config parsing error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config serialization error: {0}")]
    ConfigWrite(#[from] toml::ser::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_reads_rezepte_field() {
        let json = r#"{
            "rezepte": [
                { "name": "Pancakes", "ingredients": ["2 Eggs", "Milk"], "preparation": "Mix. Fry." },
                { "name": "Toast", "ingredients": ["Bread"], "preparation": "Toast.", "image": "toast.jpg" }
            ]
        }"#;

        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.recipes[0].name, RecipeName("Pancakes".into()));
        assert_eq!(catalog.recipes[0].image, None);
        assert_eq!(catalog.recipes[1].image.as_deref(), Some("toast.jpg"));
    }

    #[test]
    fn catalog_accepts_recipes_alias() {
        let json = r#"{ "recipes": [] }"#;
        assert!(Catalog::from_json(json).unwrap().is_empty());
    }

    #[test]
    fn recipe_without_ingredients_is_rejected_at_load() {
        let json = r#"{ "rezepte": [ { "name": "Broken", "preparation": "?" } ] }"#;
        assert!(matches!(
            Catalog::from_json(json),
            Err(PantryError::CatalogParse(_))
        ));
    }

    #[test]
    fn ingredient_match_is_case_insensitive_substring() {
        let recipe = Recipe {
            name: RecipeName("Omelette".into()),
            ingredients: vec!["2 Eggs, beaten".into(), "Peanut Butter".into()],
            preparation: String::new(),
            image: None,
        };
        assert!(recipe.has_ingredient("egg"));
        assert!(recipe.has_ingredient("pea"));
        assert!(!recipe.has_ingredient("milk"));
        assert_eq!(recipe.total_ingredients(), 2);
    }
}
