//! User account model.

use serde::{Deserialize, Serialize};

/// Authenticated user profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,

    pub email: String,

    #[serde(default)]
    pub first_name: String,

    #[serde(default)]
    pub last_name: String,

    /// Avatar path chosen in the profile editor
    #[serde(default)]
    pub profile_icon: String,
}

impl User {
    /// Full display name, falling back to the email when names are empty.
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.email.clone()
        } else {
            full.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_falls_back_to_email() {
        let user = User {
            id: 1,
            email: "coach@example.com".to_string(),
            first_name: String::new(),
            last_name: String::new(),
            profile_icon: String::new(),
        };
        assert_eq!(user.display_name(), "coach@example.com");
    }
}
