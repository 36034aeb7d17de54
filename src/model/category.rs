use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A task category: a named, colored grouping used for filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    /// Hex color like `#2d6cdf`.
    #[serde(default)]
    pub color: String,
    #[serde(rename = "isDefault", default)]
    pub is_default: bool,
}

impl Category {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Category {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            color: color.into(),
            is_default: false,
        }
    }

    /// A category seeded by the application rather than the user.
    pub fn new_default(name: impl Into<String>, color: impl Into<String>) -> Self {
        Category {
            is_default: true,
            ..Category::new(name, color)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_category() {
        let cat = Category::new("Work", "#2d6cdf");
        assert!(!cat.id.is_empty());
        assert_eq!(cat.name, "Work");
        assert!(!cat.is_default);
        assert!(Category::new_default("Personal", "#1faa59").is_default);
    }
}
