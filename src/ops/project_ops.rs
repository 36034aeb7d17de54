use tracing::info;

use crate::model::project::Project;

use super::category_ops::CatalogError;

/// Projects seeded into an empty collection on first use.
const DEFAULT_PROJECTS: [(&str, &str, &str); 4] = [
    ("Personal", "#3498DB", "Personal activities and tasks"),
    ("Work", "#E74C3C", "Work-related activities and tasks"),
    ("Learning", "#2ECC71", "Educational activities and learning"),
    ("Health", "#9B59B6", "Health and fitness activities"),
];

pub fn add_project(
    projects: &mut Vec<Project>,
    name: &str,
    color: &str,
    description: &str,
) -> Result<Project, CatalogError> {
    if name.trim().is_empty() {
        return Err(CatalogError::EmptyName);
    }
    let project = Project::with_description(name, color, description);
    projects.push(project.clone());
    Ok(project)
}

pub fn update_project(
    projects: &mut [Project],
    id: &str,
    name: Option<&str>,
    color: Option<&str>,
    description: Option<&str>,
    is_active: Option<bool>,
) -> Result<Project, CatalogError> {
    if let Some(name) = name {
        if name.trim().is_empty() {
            return Err(CatalogError::EmptyName);
        }
    }
    let project = projects
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;
    if let Some(name) = name {
        project.name = name.to_string();
    }
    if let Some(color) = color {
        project.color = color.to_string();
    }
    if let Some(description) = description {
        project.description = description.to_string();
    }
    if let Some(active) = is_active {
        project.is_active = active;
    }
    Ok(project.clone())
}

pub fn delete_project(projects: &mut Vec<Project>, id: &str) -> Result<(), CatalogError> {
    let before = projects.len();
    projects.retain(|p| p.id != id);
    if projects.len() == before {
        return Err(CatalogError::NotFound(id.to_string()));
    }
    Ok(())
}

pub fn find_project<'a>(projects: &'a [Project], id: &str) -> Option<&'a Project> {
    projects.iter().find(|p| p.id == id)
}

pub fn find_project_by_name<'a>(projects: &'a [Project], name: &str) -> Option<&'a Project> {
    projects.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

pub fn active_projects(projects: &[Project]) -> Vec<&Project> {
    projects.iter().filter(|p| p.is_active).collect()
}

/// Seed the default projects into an empty collection. Returns true if
/// anything was added.
pub fn ensure_default_projects(projects: &mut Vec<Project>) -> bool {
    if !projects.is_empty() {
        return false;
    }
    for (name, color, description) in DEFAULT_PROJECTS {
        projects.push(Project::with_description(name, color, description));
    }
    info!("seeded {} default projects", projects.len());
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_update_delete() {
        let mut projects = Vec::new();
        let p = add_project(&mut projects, "Client A", "#123456", "billable").unwrap();

        let updated =
            update_project(&mut projects, &p.id, None, None, None, Some(false)).unwrap();
        assert!(!updated.is_active);
        assert_eq!(active_projects(&projects).len(), 0);

        delete_project(&mut projects, &p.id).unwrap();
        assert!(projects.is_empty());
    }

    #[test]
    fn test_find_by_name_ignores_case() {
        let mut projects = Vec::new();
        add_project(&mut projects, "Deep Work", "#000", "").unwrap();
        assert!(find_project_by_name(&projects, "deep work").is_some());
        assert!(find_project_by_name(&projects, "unknown").is_none());
    }

    #[test]
    fn test_ensure_defaults_only_seeds_empty() {
        let mut projects = Vec::new();
        assert!(ensure_default_projects(&mut projects));
        assert_eq!(projects.len(), 4);
        assert!(!ensure_default_projects(&mut projects));
    }
}
