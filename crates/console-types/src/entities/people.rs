//! Users, staff members and mentors

use super::STATUS_CHOICES;
use crate::id::RecordId;
use crate::record::{Column, Facet, FieldKind, FormField, Record, number_cell};
use crate::schema::{Check, Schema};
use serde::{Deserialize, Serialize};

const ROLES: &[&str] = &["student", "parent", "patient", "vendor", "admin"];

/// Platform user account
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Identity key
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    /// Full name
    #[serde(default)]
    pub name: String,
    /// Login e-mail
    #[serde(default)]
    pub email: String,
    /// Contact number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Account role
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// `active` or `inactive`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Password, only sent when creating or resetting
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Password confirmation, only checked client-side
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirm_password: Option<String>,
}

impl Record for User {
    const ENTITY: &'static str = "user";
    const LABEL: &'static str = "Users";

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.email.as_str()]
    }

    fn facets() -> &'static [Facet] {
        const FACETS: &[Facet] = &[Facet::new("role", "Role"), Facet::new("status", "Status")];
        FACETS
    }

    fn facet(&self, dimension: &str) -> Option<String> {
        match dimension {
            "role" => self.role.clone(),
            "status" => self.status.clone(),
            _ => None,
        }
    }

    fn columns() -> Vec<Column<Self>> {
        let column = Column::<Self>::new;
        vec![
            column("Name", |u| Some(u.name.clone())),
            column("Email", |u| Some(u.email.clone())),
            column("Phone", |u| u.phone.clone()),
            column("Role", |u| u.role.clone()),
            column("Status", |u| u.status.clone()),
        ]
    }

    fn form_fields() -> &'static [FormField] {
        const FIELDS: &[FormField] = &[
            FormField::required("name", "Name", FieldKind::Text),
            FormField::required("email", "Email", FieldKind::Email),
            FormField::optional("phone", "Phone", FieldKind::Text),
            FormField::optional("role", "Role", FieldKind::Select(ROLES)),
            FormField::optional("status", "Status", FieldKind::Select(STATUS_CHOICES)),
            FormField::optional("password", "Password", FieldKind::Password),
            FormField::optional("confirmPassword", "Confirm password", FieldKind::Password),
        ];
        FIELDS
    }

    fn schema() -> Schema {
        Schema::new()
            .field("name", "Name", [Check::Required])
            .field("email", "Email", [Check::Required, Check::Email])
            .field("role", "Role", [Check::OneOf(ROLES)])
            .field("password", "Password", [Check::MinLength(6)])
            .field(
                "confirmPassword",
                "Password confirmation",
                [Check::MatchesField("password")],
            )
    }
}

/// Back-office staff member
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Staff {
    /// Identity key
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    /// Full name
    #[serde(default)]
    pub name: String,
    /// Work e-mail
    #[serde(default)]
    pub email: String,
    /// Department
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// Job title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    /// Contact number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// `active` or `inactive`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl Record for Staff {
    const ENTITY: &'static str = "staff";
    const LABEL: &'static str = "Staff";

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.email.as_str()];
        fields.extend(self.department.as_deref());
        fields
    }

    fn facets() -> &'static [Facet] {
        const FACETS: &[Facet] = &[
            Facet::new("department", "Department"),
            Facet::new("status", "Status"),
        ];
        FACETS
    }

    fn facet(&self, dimension: &str) -> Option<String> {
        match dimension {
            "department" => self.department.clone(),
            "status" => self.status.clone(),
            _ => None,
        }
    }

    fn columns() -> Vec<Column<Self>> {
        let column = Column::<Self>::new;
        vec![
            column("Name", |s| Some(s.name.clone())),
            column("Email", |s| Some(s.email.clone())),
            column("Department", |s| s.department.clone()),
            column("Designation", |s| s.designation.clone()),
            column("Phone", |s| s.phone.clone()),
            column("Status", |s| s.status.clone()),
        ]
    }

    fn form_fields() -> &'static [FormField] {
        const FIELDS: &[FormField] = &[
            FormField::required("name", "Name", FieldKind::Text),
            FormField::required("email", "Email", FieldKind::Email),
            FormField::optional("department", "Department", FieldKind::Text),
            FormField::optional("designation", "Designation", FieldKind::Text),
            FormField::optional("phone", "Phone", FieldKind::Text),
            FormField::optional("status", "Status", FieldKind::Select(STATUS_CHOICES)),
        ];
        FIELDS
    }

    fn schema() -> Schema {
        Schema::new()
            .field("name", "Name", [Check::Required])
            .field("email", "Email", [Check::Required, Check::Email])
    }
}

/// Course mentor
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mentor {
    /// Identity key
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    /// Full name
    #[serde(default)]
    pub name: String,
    /// Contact e-mail
    #[serde(default)]
    pub email: String,
    /// Subject area
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expertise: Option<String>,
    /// Years of teaching experience
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_years: Option<f64>,
    /// `active` or `inactive`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl Record for Mentor {
    const ENTITY: &'static str = "mentor";
    const LABEL: &'static str = "Mentors";

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.email.as_str()];
        fields.extend(self.expertise.as_deref());
        fields
    }

    fn facets() -> &'static [Facet] {
        const FACETS: &[Facet] = &[
            Facet::new("expertise", "Expertise"),
            Facet::new("status", "Status"),
        ];
        FACETS
    }

    fn facet(&self, dimension: &str) -> Option<String> {
        match dimension {
            "expertise" => self.expertise.clone(),
            "status" => self.status.clone(),
            _ => None,
        }
    }

    fn columns() -> Vec<Column<Self>> {
        let column = Column::<Self>::new;
        vec![
            column("Name", |m| Some(m.name.clone())),
            column("Email", |m| Some(m.email.clone())),
            column("Expertise", |m| m.expertise.clone()),
            column("Experience (years)", |m| number_cell(m.experience_years)),
            column("Status", |m| m.status.clone()),
        ]
    }

    fn form_fields() -> &'static [FormField] {
        const FIELDS: &[FormField] = &[
            FormField::required("name", "Name", FieldKind::Text),
            FormField::required("email", "Email", FieldKind::Email),
            FormField::optional("expertise", "Expertise", FieldKind::Text),
            FormField::optional("experienceYears", "Experience (years)", FieldKind::Number),
            FormField::optional("status", "Status", FieldKind::Select(STATUS_CHOICES)),
        ];
        FIELDS
    }

    fn schema() -> Schema {
        Schema::new()
            .field("name", "Name", [Check::Required])
            .field("email", "Email", [Check::Required, Check::Email])
            .field(
                "experienceYears",
                "Experience",
                [Check::Range {
                    min: Some(0.0),
                    max: Some(60.0),
                }],
            )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_user_accepts_underscore_and_plain_id() {
        let a: User = serde_json::from_str(r#"{"_id": "u1", "name": "Ada"}"#).unwrap();
        let b: User = serde_json::from_str(r#"{"id": 7, "name": "Bo"}"#).unwrap();
        assert_eq!(a.id, Some(RecordId::new("u1")));
        assert_eq!(b.id, Some(RecordId::new("7")));
    }

    #[test]
    fn test_blank_user_serializes_without_id() {
        let json = serde_json::to_value(User::blank()).unwrap();
        assert!(json.get("_id").is_none());
        assert_eq!(json["name"], "");
    }

    #[test]
    fn test_user_schema_rejects_mismatched_passwords() {
        let draft = User {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password: Some("secret1".into()),
            confirm_password: Some("secret2".into()),
            ..User::default()
        };
        let errors = User::schema().validate(&draft).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first().unwrap().field, "confirmPassword");
    }

    #[test]
    fn test_staff_search_includes_department() {
        let staff = Staff {
            name: "Cy".into(),
            email: "cy@example.com".into(),
            department: Some("Finance".into()),
            ..Staff::default()
        };
        assert_eq!(staff.search_fields(), vec!["Cy", "cy@example.com", "Finance"]);
    }

    #[test]
    fn test_mentor_columns_format_experience() {
        let mentor = Mentor {
            experience_years: Some(4.0),
            ..Mentor::default()
        };
        let cells: Vec<String> = Mentor::columns().iter().map(|c| c.cell(&mentor)).collect();
        assert_eq!(cells, vec!["N/A", "N/A", "N/A", "4", "N/A"]);
    }
}
