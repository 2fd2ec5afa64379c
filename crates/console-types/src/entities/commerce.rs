//! Coupons, invoices, bookings and payments

use super::STATUS_CHOICES;
use crate::id::RecordId;
use crate::record::{Column, Facet, FieldKind, FormField, Record, number_cell};
use crate::schema::{Check, Schema};
use serde::{Deserialize, Serialize};

const DISCOUNT_TYPES: &[&str] = &["percent", "flat"];
const BOOKING_STATUSES: &[&str] = &["pending", "confirmed", "cancelled", "completed"];
const PAYMENT_METHODS: &[&str] = &["card", "upi", "netbanking", "cash"];
const INVOICE_STATUSES: &[&str] = &["draft", "sent", "paid", "overdue"];

/// Vendor coupon
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    /// Identity key
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    /// Redeemable code
    #[serde(default)]
    pub code: String,
    /// Issuing vendor
    #[serde(default)]
    pub vendor: String,
    /// Coupon category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Discount amount
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
    /// `percent` or `flat`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_type: Option<String>,
    /// Expiry date (`YYYY-MM-DD`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_till: Option<String>,
    /// `active` or `inactive`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Uploaded coupon artwork
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Record for Coupon {
    const ENTITY: &'static str = "coupon";
    const LABEL: &'static str = "Coupons";

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.code.as_str(), self.vendor.as_str()]
    }

    fn facets() -> &'static [Facet] {
        const FACETS: &[Facet] = &[
            Facet::new("category", "Category"),
            Facet::new("status", "Status"),
        ];
        FACETS
    }

    fn facet(&self, dimension: &str) -> Option<String> {
        match dimension {
            "category" => self.category.clone(),
            "status" => self.status.clone(),
            _ => None,
        }
    }

    fn columns() -> Vec<Column<Self>> {
        let column = Column::<Self>::new;
        vec![
            column("Code", |c| Some(c.code.clone())),
            column("Vendor", |c| Some(c.vendor.clone())),
            column("Category", |c| c.category.clone()),
            column("Discount", |c| {
                number_cell(c.discount).map(|amount| match c.discount_type.as_deref() {
                    Some("percent") => format!("{amount}%"),
                    _ => amount,
                })
            }),
            column("Valid Till", |c| c.valid_till.clone()),
            column("Status", |c| c.status.clone()),
        ]
    }

    fn form_fields() -> &'static [FormField] {
        const FIELDS: &[FormField] = &[
            FormField::required("code", "Code", FieldKind::Text),
            FormField::required("vendor", "Vendor", FieldKind::Text),
            FormField::optional("category", "Category", FieldKind::Text),
            FormField::required("discount", "Discount", FieldKind::Number),
            FormField::optional(
                "discountType",
                "Discount type",
                FieldKind::Select(DISCOUNT_TYPES),
            ),
            FormField::optional("validTill", "Valid till", FieldKind::Date),
            FormField::optional("status", "Status", FieldKind::Select(STATUS_CHOICES)),
        ];
        FIELDS
    }

    fn schema() -> Schema {
        Schema::new()
            .field("code", "Code", [Check::Required, Check::MinLength(3)])
            .field("vendor", "Vendor", [Check::Required])
            .field(
                "discount",
                "Discount",
                [
                    Check::Required,
                    Check::Range {
                        min: Some(0.0),
                        max: None,
                    },
                ],
            )
            .field("discountType", "Discount type", [Check::OneOf(DISCOUNT_TYPES)])
    }
}

/// One billed line of an invoice
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItem {
    /// Line description
    #[serde(default)]
    pub description: String,
    /// Units billed
    #[serde(default)]
    pub quantity: f64,
    /// Price per unit
    #[serde(default)]
    pub unit_price: f64,
}

impl InvoiceItem {
    /// Quantity times unit price
    #[must_use]
    pub fn amount(&self) -> f64 {
        self.quantity * self.unit_price
    }
}

/// Customer invoice
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    /// Identity key
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    /// Printed invoice number
    #[serde(default)]
    pub invoice_number: String,
    /// Billed customer
    #[serde(default)]
    pub customer_name: String,
    /// Customer e-mail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    /// Issue date (`YYYY-MM-DD`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issued_on: Option<String>,
    /// Billed lines
    #[serde(default)]
    pub items: Vec<InvoiceItem>,
    /// Total as reported by the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    /// Invoice status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl Invoice {
    /// Backend total, or the sum of the lines when the backend sent none
    #[must_use]
    pub fn grand_total(&self) -> f64 {
        self.total
            .unwrap_or_else(|| self.items.iter().map(InvoiceItem::amount).sum())
    }
}

impl Record for Invoice {
    const ENTITY: &'static str = "invoice";
    const LABEL: &'static str = "Invoices";

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.invoice_number.as_str(), self.customer_name.as_str()]
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
            column("Invoice #", |i| Some(i.invoice_number.clone())),
            column("Customer", |i| Some(i.customer_name.clone())),
            column("Email", |i| i.customer_email.clone()),
            column("Issued On", |i| i.issued_on.clone()),
            column("Total", |i| Some(format!("{:.2}", i.grand_total()))),
            column("Status", |i| i.status.clone()),
        ]
    }

    fn form_fields() -> &'static [FormField] {
        const FIELDS: &[FormField] = &[
            FormField::required("invoiceNumber", "Invoice number", FieldKind::Text),
            FormField::required("customerName", "Customer", FieldKind::Text),
            FormField::optional("customerEmail", "Customer email", FieldKind::Email),
            FormField::optional("issuedOn", "Issued on", FieldKind::Date),
            FormField::optional("total", "Total", FieldKind::Number),
            FormField::optional("status", "Status", FieldKind::Select(INVOICE_STATUSES)),
        ];
        FIELDS
    }

    fn schema() -> Schema {
        Schema::new()
            .field("invoiceNumber", "Invoice number", [Check::Required])
            .field("customerName", "Customer", [Check::Required])
            .field("customerEmail", "Customer email", [Check::Email])
            .field(
                "total",
                "Total",
                [Check::Range {
                    min: Some(0.0),
                    max: None,
                }],
            )
    }
}

/// Service booking (served from demo fixtures)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Identity key
    #[serde(alias = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    /// Customer who booked
    #[serde(default)]
    pub customer_name: String,
    /// Booked service
    #[serde(default)]
    pub service: String,
    /// Slot start (`YYYY-MM-DD HH:MM`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot: Option<String>,
    /// Charged amount
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    /// Booking status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl Record for Booking {
    const ENTITY: &'static str = "booking";
    const LABEL: &'static str = "Bookings";

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.customer_name.as_str(), self.service.as_str()]
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
            column("Customer", |b| Some(b.customer_name.clone())),
            column("Service", |b| Some(b.service.clone())),
            column("Slot", |b| b.slot.clone()),
            column("Amount", |b| number_cell(b.amount)),
            column("Status", |b| b.status.clone()),
        ]
    }

    fn form_fields() -> &'static [FormField] {
        const FIELDS: &[FormField] = &[
            FormField::required("customerName", "Customer", FieldKind::Text),
            FormField::required("service", "Service", FieldKind::Text),
            FormField::optional("slot", "Slot", FieldKind::Text),
            FormField::optional("amount", "Amount", FieldKind::Number),
            FormField::optional("status", "Status", FieldKind::Select(BOOKING_STATUSES)),
        ];
        FIELDS
    }

    fn schema() -> Schema {
        Schema::new()
            .field("customerName", "Customer", [Check::Required])
            .field("service", "Service", [Check::Required])
            .field("status", "Status", [Check::OneOf(BOOKING_STATUSES)])
    }
}

/// Payment received (served from demo fixtures)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// Identity key
    #[serde(alias = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    /// Paying customer
    #[serde(default)]
    pub payer: String,
    /// Amount paid
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    /// Payment method
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Settlement status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Payment date (`YYYY-MM-DD`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_on: Option<String>,
}

impl Record for Payment {
    const ENTITY: &'static str = "payment";
    const LABEL: &'static str = "Payments";

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.payer.as_str()]
    }

    fn facets() -> &'static [Facet] {
        const FACETS: &[Facet] = &[Facet::new("method", "Method"), Facet::new("status", "Status")];
        FACETS
    }

    fn facet(&self, dimension: &str) -> Option<String> {
        match dimension {
            "method" => self.method.clone(),
            "status" => self.status.clone(),
            _ => None,
        }
    }

    fn columns() -> Vec<Column<Self>> {
        let column = Column::<Self>::new;
        vec![
            column("Payer", |p| Some(p.payer.clone())),
            column("Amount", |p| number_cell(p.amount)),
            column("Method", |p| p.method.clone()),
            column("Status", |p| p.status.clone()),
            column("Paid On", |p| p.paid_on.clone()),
        ]
    }

    fn form_fields() -> &'static [FormField] {
        const FIELDS: &[FormField] = &[
            FormField::required("payer", "Payer", FieldKind::Text),
            FormField::required("amount", "Amount", FieldKind::Number),
            FormField::optional("method", "Method", FieldKind::Select(PAYMENT_METHODS)),
            FormField::optional("paidOn", "Paid on", FieldKind::Date),
        ];
        FIELDS
    }

    fn schema() -> Schema {
        Schema::new().field("payer", "Payer", [Check::Required]).field(
            "amount",
            "Amount",
            [
                Check::Required,
                Check::Range {
                    min: Some(0.01),
                    max: None,
                },
            ],
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_percent_discount_column() {
        let coupon = Coupon {
            code: "SAVE10".into(),
            discount: Some(10.0),
            discount_type: Some("percent".into()),
            ..Coupon::default()
        };
        let discount = Coupon::columns()
            .into_iter()
            .find(|c| c.header == "Discount")
            .unwrap();
        assert_eq!(discount.cell(&coupon), "10%");
    }

    #[test]
    fn test_coupon_schema_requires_positive_discount() {
        let draft = Coupon {
            code: "SAVE10".into(),
            vendor: "Acme".into(),
            discount: Some(-5.0),
            ..Coupon::default()
        };
        let errors = Coupon::schema().validate(&draft).unwrap_err();
        assert_eq!(errors.first().unwrap().message, "Discount must be at least 0");
    }

    #[test]
    fn test_invoice_total_falls_back_to_lines() {
        let invoice = Invoice {
            items: vec![
                InvoiceItem {
                    description: "Consultation".into(),
                    quantity: 2.0,
                    unit_price: 150.0,
                },
                InvoiceItem {
                    description: "Report".into(),
                    quantity: 1.0,
                    unit_price: 49.5,
                },
            ],
            ..Invoice::default()
        };
        assert_eq!(invoice.grand_total(), 349.5);

        let reported = Invoice {
            total: Some(400.0),
            ..invoice
        };
        assert_eq!(reported.grand_total(), 400.0);
    }

    #[test]
    fn test_booking_uses_plain_id_key() {
        let booking = Booking {
            id: Some(RecordId::new("12")),
            ..Booking::default()
        };
        let json = serde_json::to_value(&booking).unwrap();
        assert_eq!(json["id"], "12");
    }
}
