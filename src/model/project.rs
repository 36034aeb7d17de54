use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A project that time entries are booked against. Projects are independent
/// of tasks and categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub description: String,
    /// Inactive projects are hidden from pickers but keep their entries.
    #[serde(rename = "isActive", default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Project {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Project {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            color: color.into(),
            description: String::new(),
            is_active: true,
        }
    }

    pub fn with_description(
        name: impl Into<String>,
        color: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Project {
            description: description.into(),
            ..Project::new(name, color)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_project_is_active() {
        let p = Project::new("Client A", "#aa3355");
        assert!(p.is_active);
        assert!(p.description.is_empty());
    }

    #[test]
    fn test_is_active_defaults_on_when_absent() {
        let p: Project = serde_json::from_str(r#"{"id":"x","name":"n"}"#).unwrap();
        assert!(p.is_active);
    }
}
