//! Users, staff and mentors

use super::resource_view;
use crate::components::ResourcePage;
use console_types::entities::{Mentor, Staff, User};
use leptos::prelude::*;
use leptos_router::components::A;

/// Platform users
#[component]
pub fn UsersPage() -> impl IntoView {
    resource_view::<User>("users", Vec::new, |handle| {
        view! { <ResourcePage handle=handle /> }.into_any()
    })
}

/// Staff members, with a link to the spreadsheet import
#[component]
pub fn StaffPage() -> impl IntoView {
    resource_view::<Staff>("staff", Vec::new, |handle| {
        view! {
            <ResourcePage handle=handle>
                <A href="/staff/import" attr:class="button">
                    "Import spreadsheet"
                </A>
            </ResourcePage>
        }
        .into_any()
    })
}

/// Mentors
#[component]
pub fn MentorsPage() -> impl IntoView {
    resource_view::<Mentor>("mentors", Vec::new, |handle| {
        view! { <ResourcePage handle=handle /> }.into_any()
    })
}
