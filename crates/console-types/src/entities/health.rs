//! Doctors listed on the health marketplace

use super::STATUS_CHOICES;
use crate::id::RecordId;
use crate::record::{Column, Facet, FieldKind, FormField, Record, number_cell};
use crate::schema::{Check, Schema};
use serde::{Deserialize, Serialize};

/// Doctor profile
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    /// Identity key
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    /// Full name
    #[serde(default)]
    pub name: String,
    /// Medical specialization
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
    /// Practising hospital or clinic
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hospital: Option<String>,
    /// Consultation fee
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee: Option<f64>,
    /// Profile photo
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// `active` or `inactive`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl Record for Doctor {
    const ENTITY: &'static str = "doctor";
    const LABEL: &'static str = "Doctors";

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        fields.extend(self.specialization.as_deref());
        fields.extend(self.hospital.as_deref());
        fields
    }

    fn facets() -> &'static [Facet] {
        const FACETS: &[Facet] = &[
            Facet::new("specialization", "Specialization"),
            Facet::new("status", "Status"),
        ];
        FACETS
    }

    fn facet(&self, dimension: &str) -> Option<String> {
        match dimension {
            "specialization" => self.specialization.clone(),
            "status" => self.status.clone(),
            _ => None,
        }
    }

    fn columns() -> Vec<Column<Self>> {
        let column = Column::<Self>::new;
        vec![
            column("Name", |d| Some(d.name.clone())),
            column("Specialization", |d| d.specialization.clone()),
            column("Hospital", |d| d.hospital.clone()),
            column("Fee", |d| number_cell(d.fee)),
            column("Status", |d| d.status.clone()),
        ]
    }

    fn form_fields() -> &'static [FormField] {
        const FIELDS: &[FormField] = &[
            FormField::required("name", "Name", FieldKind::Text),
            FormField::required("specialization", "Specialization", FieldKind::Text),
            FormField::optional("hospital", "Hospital", FieldKind::Text),
            FormField::optional("fee", "Fee", FieldKind::Number),
            FormField::optional("status", "Status", FieldKind::Select(STATUS_CHOICES)),
        ];
        FIELDS
    }

    fn schema() -> Schema {
        Schema::new()
            .field("name", "Name", [Check::Required])
            .field("specialization", "Specialization", [Check::Required])
            .field(
                "fee",
                "Fee",
                [Check::Range {
                    min: Some(0.0),
                    max: None,
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
    fn test_doctor_round_trips_camel_case() {
        let doctor: Doctor = serde_json::from_str(
            r#"{"id": "d1", "name": "Dr. Rao", "specialization": "Cardiology", "imageUrl": "/img/rao.png", "fee": 500}"#,
        )
        .unwrap();
        assert_eq!(doctor.image_url.as_deref(), Some("/img/rao.png"));
        let json = serde_json::to_value(&doctor).unwrap();
        assert_eq!(json["_id"], "d1");
        assert_eq!(json["imageUrl"], "/img/rao.png");
    }

    #[test]
    fn test_doctor_requires_specialization() {
        let draft = Doctor {
            name: "Dr. Rao".into(),
            ..Doctor::default()
        };
        let errors = Doctor::schema().validate(&draft).unwrap_err();
        assert_eq!(errors.first().unwrap().field, "specialization");
    }
}
