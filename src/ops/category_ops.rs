use tracing::info;

use crate::model::category::Category;

/// Error type for category and project management
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("name must not be empty")]
    EmptyName,
    #[error("not found: {0}")]
    NotFound(String),
}

/// Categories seeded into an empty collection on first use.
const DEFAULT_CATEGORIES: [(&str, &str); 5] = [
    ("Work", "#4285F4"),
    ("Personal", "#EA4335"),
    ("Shopping", "#FBBC05"),
    ("Health", "#34A853"),
    ("Finance", "#8E44AD"),
];

pub fn add_category(
    categories: &mut Vec<Category>,
    name: &str,
    color: &str,
) -> Result<Category, CatalogError> {
    if name.trim().is_empty() {
        return Err(CatalogError::EmptyName);
    }
    let category = Category::new(name, color);
    categories.push(category.clone());
    Ok(category)
}

pub fn update_category(
    categories: &mut [Category],
    id: &str,
    name: Option<&str>,
    color: Option<&str>,
) -> Result<Category, CatalogError> {
    if let Some(name) = name {
        if name.trim().is_empty() {
            return Err(CatalogError::EmptyName);
        }
    }
    let category = categories
        .iter_mut()
        .find(|c| c.id == id)
        .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;
    if let Some(name) = name {
        category.name = name.to_string();
    }
    if let Some(color) = color {
        category.color = color.to_string();
    }
    Ok(category.clone())
}

/// Delete by id. Tasks referencing the category keep their (now dangling)
/// reference; the relation is lookup-only.
pub fn delete_category(categories: &mut Vec<Category>, id: &str) -> Result<(), CatalogError> {
    let before = categories.len();
    categories.retain(|c| c.id != id);
    if categories.len() == before {
        return Err(CatalogError::NotFound(id.to_string()));
    }
    Ok(())
}

pub fn find_category<'a>(categories: &'a [Category], id: &str) -> Option<&'a Category> {
    categories.iter().find(|c| c.id == id)
}

/// Look a category up by name, case-insensitively. Convenience for CLI
/// input, where names are friendlier than ids.
pub fn find_category_by_name<'a>(categories: &'a [Category], name: &str) -> Option<&'a Category> {
    categories
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(name))
}

/// Seed the default categories into an empty collection. Returns true if
/// anything was added (the caller should persist).
pub fn ensure_default_categories(categories: &mut Vec<Category>) -> bool {
    if !categories.is_empty() {
        return false;
    }
    for (name, color) in DEFAULT_CATEGORIES {
        categories.push(Category::new_default(name, color));
    }
    info!("seeded {} default categories", categories.len());
    true
}
