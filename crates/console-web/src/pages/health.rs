//! Doctors

use super::resource_view;
use crate::components::ResourcePage;
use console_types::entities::Doctor;
use leptos::prelude::*;

/// Doctors, created with a profile photo
#[component]
pub fn DoctorsPage() -> impl IntoView {
    resource_view::<Doctor>("doctors", Vec::new, |handle| {
        view! { <ResourcePage handle=handle with_image=true /> }.into_any()
    })
}
