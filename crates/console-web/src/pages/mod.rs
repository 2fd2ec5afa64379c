//! One page per entity, each a thin instantiation of the resource page

pub mod commerce;
pub mod health;
pub mod home;
pub mod learning;
pub mod not_found;
pub mod people;
pub mod staff_import;

pub use commerce::{BookingsPage, CouponsPage, InvoicesPage, PaymentsPage};
pub use health::DoctorsPage;
pub use home::HomePage;
pub use learning::{CategoriesPage, EnrollmentsPage, MentorDashboard, QuizzesPage};
pub use not_found::NotFound;
pub use people::{MentorsPage, StaffPage, UsersPage};
pub use staff_import::StaffImportPage;

use crate::components::ErrorBanner;
use crate::context::{ResourceHandle, use_console};
use console_types::Record;
use leptos::prelude::*;
use tracing::warn;

/// Build the handle for an endpoint and render the page with it
///
/// An endpoint that cannot be resolved (unknown key, missing mentor id)
/// renders as an error banner instead.
pub(crate) fn resource_view<T: Record>(
    key: &str,
    demo_seed: fn() -> Vec<T>,
    page: impl FnOnce(ResourceHandle<T>) -> AnyView,
) -> AnyView {
    match use_console().handle::<T>(key, demo_seed) {
        Ok(handle) => page(handle),
        Err(error) => {
            warn!(endpoint = key, %error, "Page unavailable");
            let message = Signal::stored(Some(error.to_string()));
            view! {
                <section class="resource-page">
                    <h1>{T::LABEL}</h1>
                    <ErrorBanner message=message />
                </section>
            }
            .into_any()
        }
    }
}
