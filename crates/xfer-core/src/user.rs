//! Identity of the person using the client.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::ids::UserId;

/// Placeholder the authentication cookie uses in place of spaces.
const SPACE_PLACEHOLDER: char = '+';

/// A submitter or administrator.
/// 提交者或管理员。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub id: Option<UserId>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub title: String,
    pub affiliation: String,
    pub verified: bool,
    /// Set only when the user came out of the authentication exchange.
    pub authenticated: bool,
}

impl User {
    /// Minimal partial user for flows that only know an email address
    /// (for example, before registration).
    pub fn email_only(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..Self::default()
        }
    }

    /// Replace placeholder characters in the free-text fields with spaces.
    pub fn normalized(mut self) -> Self {
        self.title = self.title.replace(SPACE_PLACEHOLDER, " ");
        self.affiliation = self.affiliation.replace(SPACE_PLACEHOLDER, " ");
        self
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// `"First (email)"`, as shown in the admin header.
    pub fn login_name(&self) -> String {
        format!("{} ({})", self.first_name, self.email)
    }
}

/// Registration form for a new submitter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub affiliation: String,
    pub email: String,
    pub phone: String,
}

impl NewUser {
    /// Every field is required. Phone numbers are stored without spaces.
    pub fn validated(mut self) -> Result<Self, ValidationError> {
        let required = [
            ("firstName", &self.first_name),
            ("lastName", &self.last_name),
            ("title", &self.title),
            ("affiliation", &self.affiliation),
            ("email", &self.email),
            ("phone", &self.phone),
        ];
        if let Some((name, _)) = required.into_iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(ValidationError::MissingField(name));
        }
        self.phone.retain(|c| c != ' ');
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_replaces_placeholders_in_title_and_affiliation_only() {
        let user = User {
            first_name: "Ann+Marie".into(),
            title: "Senior+Archivist".into(),
            affiliation: "Special+Collections+Library".into(),
            ..User::default()
        }
        .normalized();

        assert_eq!(user.title, "Senior Archivist");
        assert_eq!(user.affiliation, "Special Collections Library");
        assert_eq!(user.first_name, "Ann+Marie");
    }

    #[test]
    fn deserializes_cookie_payload_with_missing_fields() {
        let raw = r#"{"id":12,"firstName":"Lou","lastName":"Reed","email":"lr@example.edu",
            "title":"Curator","affiliation":"Library","token":"ignored"}"#;
        let user: User = serde_json::from_str(raw).unwrap();

        assert_eq!(user.id, Some(UserId::new(12)));
        assert_eq!(user.phone, "");
        assert!(!user.authenticated);
    }

    #[test]
    fn login_name_format() {
        let user = User {
            first_name: "Lou".into(),
            email: "lr@example.edu".into(),
            ..User::default()
        };
        assert_eq!(user.login_name(), "Lou (lr@example.edu)");
    }

    #[test]
    fn new_user_requires_every_field() {
        let form = NewUser {
            first_name: "Lou".into(),
            last_name: "Reed".into(),
            title: "Curator".into(),
            affiliation: "Library".into(),
            email: "lr@example.edu".into(),
            phone: "".into(),
        };
        assert_eq!(form.validated(), Err(ValidationError::MissingField("phone")));
    }

    #[test]
    fn new_user_strips_spaces_from_phone() {
        let form = NewUser {
            first_name: "Lou".into(),
            last_name: "Reed".into(),
            title: "Curator".into(),
            affiliation: "Library".into(),
            email: "lr@example.edu".into(),
            phone: "434 555 0100".into(),
        };
        assert_eq!(form.validated().unwrap().phone, "4345550100");
    }
}
