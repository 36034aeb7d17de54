use serde::{Deserialize, Serialize};

/// User preferences, stored as TOML next to the database.
///
/// Every field has a default so a missing or partial file loads cleanly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Master switch for reminder output.
    #[serde(default = "default_true")]
    pub enable_notifications: bool,
    /// Remind about tasks coming due within the next hour.
    #[serde(default = "default_true")]
    pub notify_due_soon: bool,
    /// Remind about tasks already past due.
    #[serde(default = "default_true")]
    pub notify_overdue: bool,
    /// Category assigned to new tasks when none is given.
    #[serde(default)]
    pub default_category_id: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            enable_notifications: true,
            notify_due_soon: true,
            notify_overdue: true,
            default_category_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert!(s.enable_notifications);
        assert!(s.notify_due_soon);
        assert!(s.notify_overdue);
        assert!(s.default_category_id.is_none());
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let s: Settings = toml::from_str("enable_notifications = false\n").unwrap();
        assert!(!s.enable_notifications);
        assert!(s.notify_due_soon);
    }

    #[test]
    fn test_toml_round_trip() {
        let mut s = Settings::default();
        s.default_category_id = Some("cat-7".to_string());
        s.notify_overdue = false;
        let text = toml::to_string(&s).unwrap();
        let back: Settings = toml::from_str(&text).unwrap();
        assert_eq!(back, s);
    }
}
