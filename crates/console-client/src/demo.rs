//! In-memory data source for placeholder entities and tests

use crate::error::{ClientError, ClientResult};
use crate::source::DataSource;
use async_trait::async_trait;
use console_protocol::BulkOutcome;
use console_types::{FileUpload, Record, RecordId, SourceKind};
use parking_lot::Mutex;
use std::fmt;
use tracing::debug;

/// Data source holding its records in memory
pub struct DemoDataSource<T> {
    records: Mutex<Vec<T>>,
    next_id: Mutex<u64>,
    failure: Option<String>,
}

impl<T: Record> fmt::Debug for DemoDataSource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DemoDataSource")
            .field("entity", &T::ENTITY)
            .field("records", &self.records.lock().len())
            .field("failure", &self.failure)
            .finish()
    }
}

impl<T: Record> Default for DemoDataSource<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T: Record> DemoDataSource<T> {
    /// Seed the source; records without an id get one
    #[must_use]
    pub fn new(seed: Vec<T>) -> Self {
        let source = Self {
            records: Mutex::new(Vec::with_capacity(seed.len())),
            next_id: Mutex::new(1),
            failure: None,
        };
        let seeded: Vec<T> = seed
            .into_iter()
            .map(|mut record| {
                if record.id().is_none() {
                    record.set_id(source.allocate_id());
                }
                record
            })
            .collect();
        *source.records.lock() = seeded;
        source
    }

    /// Make every operation fail with `message`
    #[must_use]
    pub fn with_failure(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    /// Current records, in insertion order
    #[must_use]
    pub fn snapshot(&self) -> Vec<T> {
        self.records.lock().clone()
    }

    fn allocate_id(&self) -> RecordId {
        let mut next = self.next_id.lock();
        let id = RecordId::new(format!("demo-{next}"));
        *next += 1;
        id
    }

    fn check(&self) -> ClientResult<()> {
        match &self.failure {
            Some(message) => Err(ClientError::Status {
                code: 503,
                body: message.clone(),
            }),
            None => Ok(()),
        }
    }

    fn not_found(id: &RecordId) -> ClientError {
        ClientError::NotFound(format!("{} {id}", T::LABEL))
    }

    fn insert(&self, draft: &T) -> T {
        let mut record = draft.clone();
        record.set_id(self.allocate_id());
        self.records.lock().push(record.clone());
        record
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl<T: Record> DataSource<T> for DemoDataSource<T> {
    fn kind(&self) -> SourceKind {
        SourceKind::Demo
    }

    async fn list(&self) -> ClientResult<Vec<T>> {
        self.check()?;
        Ok(self.snapshot())
    }

    async fn get(&self, id: &RecordId) -> ClientResult<T> {
        self.check()?;
        self.records
            .lock()
            .iter()
            .find(|record| record.id() == Some(id))
            .cloned()
            .ok_or_else(|| Self::not_found(id))
    }

    async fn create(&self, draft: &T) -> ClientResult<T> {
        self.check()?;
        let record = self.insert(draft);
        debug!(entity = T::ENTITY, id = ?record.id(), "Demo record created");
        Ok(record)
    }

    async fn update(&self, id: &RecordId, draft: &T) -> ClientResult<T> {
        self.check()?;
        let mut records = self.records.lock();
        let slot = records
            .iter_mut()
            .find(|record| record.id() == Some(id))
            .ok_or_else(|| Self::not_found(id))?;
        let mut saved = draft.clone();
        saved.set_id(id.clone());
        *slot = saved.clone();
        Ok(saved)
    }

    async fn delete(&self, id: &RecordId) -> ClientResult<()> {
        self.check()?;
        let mut records = self.records.lock();
        let before = records.len();
        records.retain(|record| record.id() != Some(id));
        if records.len() == before {
            return Err(Self::not_found(id));
        }
        Ok(())
    }

    async fn bulk_create(&self, drafts: &[T]) -> ClientResult<BulkOutcome> {
        self.check()?;
        for draft in drafts {
            self.insert(draft);
        }
        Ok(BulkOutcome {
            created: drafts.len(),
            ..BulkOutcome::default()
        })
    }

    async fn create_with_image(&self, draft: &T, image: FileUpload) -> ClientResult<T> {
        debug!(entity = T::ENTITY, file = %image.file_name, "Demo source ignores uploaded image");
        self.create(draft).await
    }
}

/// Placeholder data for the entities that have no backend yet
pub mod fixtures {
    use console_types::entities::{Booking, Payment};

    /// Sample bookings
    #[must_use]
    pub fn bookings() -> Vec<Booking> {
        [
            ("Ravi Kumar", "Dental check-up", "2024-06-03 10:00", 800.0, "confirmed"),
            ("Meera Nair", "Physiotherapy", "2024-06-03 11:30", 1200.0, "pending"),
            ("Arjun Das", "General consultation", "2024-06-04 09:15", 500.0, "confirmed"),
            ("Sara Khan", "Eye examination", "2024-06-04 15:00", 650.0, "cancelled"),
            ("Tom Joseph", "Dermatology", "2024-06-05 12:45", 900.0, "pending"),
            ("Anita Roy", "Pediatrics", "2024-06-06 16:30", 700.0, "confirmed"),
        ]
        .into_iter()
        .map(|(customer, service, slot, amount, status)| Booking {
            id: None,
            customer_name: customer.to_string(),
            service: service.to_string(),
            slot: Some(slot.to_string()),
            amount: Some(amount),
            status: Some(status.to_string()),
        })
        .collect()
    }

    /// Sample payments
    #[must_use]
    pub fn payments() -> Vec<Payment> {
        [
            ("Ravi Kumar", 800.0, "card", "paid", "2024-05-28"),
            ("Meera Nair", 1200.0, "upi", "pending", "2024-05-29"),
            ("Arjun Das", 500.0, "cash", "paid", "2024-05-30"),
            ("Sara Khan", 650.0, "card", "refunded", "2024-05-30"),
            ("Coupon Hub", 4999.0, "bank transfer", "paid", "2024-06-01"),
        ]
        .into_iter()
        .map(|(payer, amount, method, status, paid_on)| Payment {
            id: None,
            payer: payer.to_string(),
            amount: Some(amount),
            method: Some(method.to_string()),
            status: Some(status.to_string()),
            paid_on: Some(paid_on.to_string()),
        })
        .collect()
    }
}
