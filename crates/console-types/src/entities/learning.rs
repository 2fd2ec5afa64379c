//! Enrollments, quizzes and course categories

use super::STATUS_CHOICES;
use crate::id::RecordId;
use crate::record::{Column, Facet, FieldKind, FormField, Record, number_cell};
use crate::schema::{Check, Schema};
use serde::{Deserialize, Serialize};

const ENROLLMENT_STATUSES: &[&str] = &["enrolled", "in_progress", "completed", "dropped"];
const DIFFICULTIES: &[&str] = &["easy", "medium", "hard"];

/// A student enrolled in a course batch
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    /// Identity key
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    /// Enrolled student
    #[serde(default)]
    pub student_name: String,
    /// Student e-mail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_email: Option<String>,
    /// Course title
    #[serde(default)]
    pub course: String,
    /// Batch within the course
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_name: Option<String>,
    /// Assigned mentor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mentor_id: Option<RecordId>,
    /// Mentor display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mentor_name: Option<String>,
    /// Progress status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Enrollment date (`YYYY-MM-DD`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enrolled_on: Option<String>,
}

impl Record for Enrollment {
    const ENTITY: &'static str = "enrollment";
    const LABEL: &'static str = "Enrollments";

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.student_name.as_str(), self.course.as_str()];
        fields.extend(self.student_email.as_deref());
        fields.extend(self.batch_name.as_deref());
        fields
    }

    fn facets() -> &'static [Facet] {
        const FACETS: &[Facet] = &[
            Facet::new("course", "Course"),
            Facet::new("status", "Status"),
            Facet::new("mentor", "Mentor"),
        ];
        FACETS
    }

    fn facet(&self, dimension: &str) -> Option<String> {
        match dimension {
            "course" => Some(self.course.clone()).filter(|c| !c.is_empty()),
            "status" => self.status.clone(),
            "mentor" => self.mentor_name.clone(),
            _ => None,
        }
    }

    fn columns() -> Vec<Column<Self>> {
        let column = Column::<Self>::new;
        vec![
            column("Student", |e| Some(e.student_name.clone())),
            column("Email", |e| e.student_email.clone()),
            column("Course", |e| Some(e.course.clone())),
            column("Batch", |e| e.batch_name.clone()),
            column("Mentor", |e| e.mentor_name.clone()),
            column("Status", |e| e.status.clone()),
            column("Enrolled On", |e| e.enrolled_on.clone()),
        ]
    }

    fn form_fields() -> &'static [FormField] {
        const FIELDS: &[FormField] = &[
            FormField::required("studentName", "Student", FieldKind::Text),
            FormField::optional("studentEmail", "Student email", FieldKind::Email),
            FormField::required("course", "Course", FieldKind::Text),
            FormField::optional("batchName", "Batch", FieldKind::Text),
            FormField::optional(
                "status",
                "Status",
                FieldKind::Select(ENROLLMENT_STATUSES),
            ),
            FormField::optional("enrolledOn", "Enrolled on", FieldKind::Date),
        ];
        FIELDS
    }

    fn schema() -> Schema {
        Schema::new()
            .field("studentName", "Student", [Check::Required])
            .field("studentEmail", "Student email", [Check::Email])
            .field("course", "Course", [Check::Required])
            .field("status", "Status", [Check::OneOf(ENROLLMENT_STATUSES)])
    }
}

/// Course quiz
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    /// Identity key
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    /// Quiz title
    #[serde(default)]
    pub title: String,
    /// Course the quiz belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,
    /// `easy`, `medium` or `hard`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    /// Number of questions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_count: Option<f64>,
    /// Time limit in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<f64>,
    /// `active` or `inactive`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl Record for Quiz {
    const ENTITY: &'static str = "quiz";
    const LABEL: &'static str = "Quizzes";

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str()];
        fields.extend(self.course.as_deref());
        fields
    }

    fn facets() -> &'static [Facet] {
        const FACETS: &[Facet] = &[
            Facet::new("difficulty", "Difficulty"),
            Facet::new("status", "Status"),
        ];
        FACETS
    }

    fn facet(&self, dimension: &str) -> Option<String> {
        match dimension {
            "difficulty" => self.difficulty.clone(),
            "status" => self.status.clone(),
            _ => None,
        }
    }

    fn columns() -> Vec<Column<Self>> {
        let column = Column::<Self>::new;
        vec![
            column("Title", |q| Some(q.title.clone())),
            column("Course", |q| q.course.clone()),
            column("Difficulty", |q| q.difficulty.clone()),
            column("Questions", |q| number_cell(q.question_count)),
            column("Duration (min)", |q| number_cell(q.duration_minutes)),
            column("Status", |q| q.status.clone()),
        ]
    }

    fn form_fields() -> &'static [FormField] {
        const FIELDS: &[FormField] = &[
            FormField::required("title", "Title", FieldKind::Text),
            FormField::optional("course", "Course", FieldKind::Text),
            FormField::optional("difficulty", "Difficulty", FieldKind::Select(DIFFICULTIES)),
            FormField::optional("questionCount", "Questions", FieldKind::Number),
            FormField::optional("durationMinutes", "Duration (min)", FieldKind::Number),
            FormField::optional("status", "Status", FieldKind::Select(STATUS_CHOICES)),
        ];
        FIELDS
    }

    fn schema() -> Schema {
        Schema::new()
            .field("title", "Title", [Check::Required, Check::MinLength(3)])
            .field("difficulty", "Difficulty", [Check::OneOf(DIFFICULTIES)])
            .field(
                "questionCount",
                "Questions",
                [Check::Range {
                    min: Some(1.0),
                    max: Some(200.0),
                }],
            )
            .field(
                "durationMinutes",
                "Duration",
                [Check::Range {
                    min: Some(1.0),
                    max: None,
                }],
            )
    }
}

/// Course category
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Identity key
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    /// Category name
    #[serde(default)]
    pub name: String,
    /// Free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// `active` or `inactive`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl Record for Category {
    const ENTITY: &'static str = "category";
    const LABEL: &'static str = "Categories";

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        fields.extend(self.description.as_deref());
        fields
    }

    fn facets() -> &'static [Facet] {
        const FACETS: &[Facet] = &[Facet::new("status", "Status")];
        FACETS
    }

    fn facet(&self, dimension: &str) -> Option<String> {
        (dimension == "status").then(|| self.status.clone()).flatten()
    }

    fn columns() -> Vec<Column<Self>> {
        let column = Column::<Self>::new;
        vec![
            column("Name", |c| Some(c.name.clone())),
            column("Description", |c| c.description.clone()),
            column("Status", |c| c.status.clone()),
        ]
    }

    fn form_fields() -> &'static [FormField] {
        const FIELDS: &[FormField] = &[
            FormField::required("name", "Name", FieldKind::Text),
            FormField::optional("description", "Description", FieldKind::TextArea),
            FormField::optional("status", "Status", FieldKind::Select(STATUS_CHOICES)),
        ];
        FIELDS
    }

    fn schema() -> Schema {
        Schema::new().field("name", "Name", [Check::Required, Check::MinLength(2)])
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_enrollment_facets() {
        let enrollment = Enrollment {
            course: "Rust 101".into(),
            mentor_name: Some("Grace".into()),
            status: Some("enrolled".into()),
            ..Enrollment::default()
        };
        assert_eq!(enrollment.facet("course").as_deref(), Some("Rust 101"));
        assert_eq!(enrollment.facet("mentor").as_deref(), Some("Grace"));
        assert_eq!(enrollment.facet("status").as_deref(), Some("enrolled"));
        assert_eq!(enrollment.facet("batch"), None);
        assert_eq!(Enrollment::default().facet("course"), None);
    }

    #[test]
    fn test_enrollment_mentor_id_accepts_numbers() {
        let enrollment: Enrollment =
            serde_json::from_str(r#"{"_id": "e1", "studentName": "Lin", "mentorId": 42}"#)
                .unwrap();
        assert_eq!(enrollment.mentor_id, Some(RecordId::new("42")));
    }

    #[test]
    fn test_quiz_schema_bounds_questions() {
        let draft = Quiz {
            title: "Ownership".into(),
            question_count: Some(0.0),
            ..Quiz::default()
        };
        let errors = Quiz::schema().validate(&draft).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first().unwrap().message, "Questions must be between 1 and 200");
    }

    #[test]
    fn test_category_columns_fill_missing() {
        let category = Category {
            name: "Systems".into(),
            ..Category::default()
        };
        let cells: Vec<String> = Category::columns()
            .iter()
            .map(|c| c.cell(&category))
            .collect();
        assert_eq!(cells, vec!["Systems", "N/A", "N/A"]);
    }
}
