//! Main Leptos application component with routing

use crate::components::{ErrorBanner, Loading};
use crate::context::ConsoleContext;
use crate::pages::{
    BookingsPage, CategoriesPage, CouponsPage, DoctorsPage, EnrollmentsPage, HomePage,
    InvoicesPage, MentorDashboard, MentorsPage, NotFound, PaymentsPage, QuizzesPage,
    StaffImportPage, StaffPage, UsersPage,
};
use crate::storage;
use console_types::ConsoleSettings;
use leptos::prelude::*;
use leptos_router::components::{A, Route, Router, Routes};
use leptos_router::path;
use tracing::{info, warn};

/// Path of the settings document served by the host
pub const SETTINGS_PATH: &str = "/config.json";

/// One entry of the header navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    /// Route
    pub href: &'static str,
    /// Text shown
    pub label: &'static str,
    /// Endpoint key backing the page
    pub endpoint: Option<&'static str>,
}

const fn nav(href: &'static str, label: &'static str, endpoint: &'static str) -> NavLink {
    NavLink {
        href,
        label,
        endpoint: Some(endpoint),
    }
}

/// Header navigation, in display order
pub const NAV_LINKS: &[NavLink] = &[
    NavLink {
        href: "/",
        label: "Home",
        endpoint: None,
    },
    nav("/users", "Users", "users"),
    nav("/staff", "Staff", "staff"),
    nav("/mentors", "Mentors", "mentors"),
    nav("/coupons", "Coupons", "coupons"),
    nav("/invoices", "Invoices", "invoices"),
    nav("/bookings", "Bookings", "bookings"),
    nav("/payments", "Payments", "payments"),
    nav("/enrollments", "Enrollments", "enrollments"),
    nav("/quizzes", "Quizzes", "quizzes"),
    nav("/categories", "Categories", "categories"),
    nav("/doctors", "Doctors", "doctors"),
    nav("/mentor/dashboard", "My students", "mentor-enrollments"),
];

/// Main application component
///
/// Fetches the settings from the host first; pages only render once they
/// are known.
#[component]
pub fn App() -> impl IntoView {
    let settings = LocalResource::new(fetch_settings);

    view! {
        <Router>
            <main class="app">
                <Header />
                <div class="content">
                    {move || match settings.get() {
                        None => view! { <Loading label="Loading settings..." /> }.into_any(),
                        Some(Err(message)) => {
                            let message = Signal::stored(Some(message));
                            view! { <ErrorBanner message=message /> }.into_any()
                        }
                        Some(Ok(settings)) => view! { <Console settings=settings /> }.into_any(),
                    }}
                </div>
            </main>
        </Router>
    }
}

/// Provides the console context and the routes below it
#[component]
fn Console(settings: ConsoleSettings) -> impl IntoView {
    provide_context(ConsoleContext {
        settings,
        session: storage::session(),
    });

    view! {
        <Routes fallback=|| view! { <NotFound /> }>
            <Route path=path!("/") view=HomePage />
            <Route path=path!("/users") view=UsersPage />
            <Route path=path!("/staff") view=StaffPage />
            <Route path=path!("/staff/import") view=StaffImportPage />
            <Route path=path!("/mentors") view=MentorsPage />
            <Route path=path!("/coupons") view=CouponsPage />
            <Route path=path!("/invoices") view=InvoicesPage />
            <Route path=path!("/bookings") view=BookingsPage />
            <Route path=path!("/payments") view=PaymentsPage />
            <Route path=path!("/enrollments") view=EnrollmentsPage />
            <Route path=path!("/quizzes") view=QuizzesPage />
            <Route path=path!("/categories") view=CategoriesPage />
            <Route path=path!("/doctors") view=DoctorsPage />
            <Route path=path!("/mentor/dashboard") view=MentorDashboard />
        </Routes>
    }
}

/// Application header with navigation
#[component]
fn Header() -> impl IntoView {
    let links = NAV_LINKS
        .iter()
        .map(|link| view! { <A href=link.href attr:class="nav-link">{link.label}</A> })
        .collect_view();

    view! {
        <header class="header">
            <div class="header-content">
                <h1 class="logo">
                    <A href="/">"Admin Console"</A>
                </h1>
                <nav class="nav">{links}</nav>
            </div>
        </header>
    }
}

async fn fetch_settings() -> Result<ConsoleSettings, String> {
    let origin = window().location().origin().unwrap_or_default();
    let url = format!("{origin}{SETTINGS_PATH}");

    let result = async {
        reqwest::get(&url)
            .await?
            .error_for_status()?
            .json::<ConsoleSettings>()
            .await
    }
    .await;

    match result {
        Ok(settings) => {
            info!(
                backends = settings.backends.len(),
                endpoints = settings.endpoints.len(),
                "Settings loaded"
            );
            Ok(settings)
        }
        Err(error) => {
            warn!(%url, %error, "Settings unavailable");
            Err(format!("Could not load console settings: {error}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_nav_links_are_unique() {
        let hrefs: HashSet<_> = NAV_LINKS.iter().map(|l| l.href).collect();
        assert_eq!(hrefs.len(), NAV_LINKS.len());
    }

    #[test]
    fn test_nav_endpoints_exist_in_default_settings() {
        let settings = ConsoleSettings::default();
        for endpoint in NAV_LINKS.iter().filter_map(|l| l.endpoint) {
            assert!(settings.endpoints.contains_key(endpoint), "{endpoint} missing");
        }
    }
}
