//! Entity records served by the platform backends

mod commerce;
mod health;
mod learning;
mod people;

pub use commerce::{Booking, Coupon, Invoice, InvoiceItem, Payment};
pub use health::Doctor;
pub use learning::{Category, Enrollment, Quiz};
pub use people::{Mentor, Staff, User};

pub(crate) const STATUS_CHOICES: &[&str] = &["active", "inactive"];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    fn assert_tables<T: Record>() {
        let facets = T::facets();
        assert!(facets.iter().all(|f| !f.dimension.is_empty() && !f.label.is_empty()));

        let fields = T::form_fields();
        let keys: HashSet<_> = fields.iter().map(|f| f.key).collect();
        assert_eq!(keys.len(), fields.len(), "duplicate form key in {}", T::ENTITY);
        assert_eq!(T::form_fields().len(), fields.len());
    }

    #[test]
    fn test_every_entity_serves_its_facets_and_form_fields() {
        assert_tables::<User>();
        assert_tables::<Staff>();
        assert_tables::<Mentor>();
        assert_tables::<Coupon>();
        assert_tables::<Invoice>();
        assert_tables::<Booking>();
        assert_tables::<Payment>();
        assert_tables::<Enrollment>();
        assert_tables::<Quiz>();
        assert_tables::<Category>();
        assert_tables::<Doctor>();
    }
}
