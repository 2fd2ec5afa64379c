//! Enrollments, quizzes, categories and the mentor's own view

use super::resource_view;
use crate::components::ResourcePage;
use crate::context::{ResourceHandle, use_console};
use console_client::load_secondary;
use console_types::entities::{Category, Enrollment, Quiz};
use leptos::prelude::*;
use std::collections::BTreeSet;

/// Course enrollments across all mentors
#[component]
pub fn EnrollmentsPage() -> impl IntoView {
    resource_view::<Enrollment>("enrollments", Vec::new, |handle| {
        view! { <ResourcePage handle=handle /> }.into_any()
    })
}

/// Quizzes, with the category list as quick searches
#[component]
pub fn QuizzesPage() -> impl IntoView {
    resource_view::<Quiz>("quizzes", Vec::new, |handle| {
        let chips = handle.clone();
        view! {
            <ResourcePage handle=handle>
                <CategoryChips handle=chips />
            </ResourcePage>
        }
        .into_any()
    })
}

#[component]
fn CategoryChips(handle: ResourceHandle<Quiz>) -> impl IntoView {
    let source = use_console().source::<Category>("categories", Vec::new).ok();
    let categories = LocalResource::new(move || {
        let source = source.clone();
        async move {
            match source {
                Some(source) => load_secondary(source.as_ref()).await,
                None => Vec::new(),
            }
        }
    });

    let names = move || {
        categories
            .get()
            .map(|list| list.into_iter().map(|c| c.name).collect::<Vec<_>>())
            .unwrap_or_default()
    };

    view! {
        <div class="chips">
            <For
                each=names
                key=|name| name.clone()
                children=move |name: String| {
                    let h = handle.clone();
                    let term = name.clone();
                    view! {
                        <button class="chip" on:click=move |_| h.update(|v| v.apply_search(&*term))>
                            {name}
                        </button>
                    }
                }
            />
        </div>
    }
}

/// Quiz categories
#[component]
pub fn CategoriesPage() -> impl IntoView {
    resource_view::<Category>("categories", Vec::new, |handle| {
        view! { <ResourcePage handle=handle /> }.into_any()
    })
}

/// Headline numbers for the mentor dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrollmentStats {
    /// All enrollments
    pub total: usize,
    /// Enrollments whose status is `active`
    pub active: usize,
    /// Distinct course names
    pub courses: usize,
}

impl EnrollmentStats {
    /// Count over a mentor's enrollments
    #[must_use]
    pub fn from_enrollments(enrollments: &[Enrollment]) -> Self {
        let active = enrollments
            .iter()
            .filter(|e| e.status.as_deref().is_some_and(|s| s.eq_ignore_ascii_case("active")))
            .count();
        let courses: BTreeSet<&str> = enrollments
            .iter()
            .map(|e| e.course.trim())
            .filter(|c| !c.is_empty())
            .collect();
        Self {
            total: enrollments.len(),
            active,
            courses: courses.len(),
        }
    }
}

/// The signed-in mentor's students, read only
#[component]
pub fn MentorDashboard() -> impl IntoView {
    resource_view::<Enrollment>("mentor-enrollments", Vec::new, |handle| {
        let stats = {
            let h = handle.clone();
            Signal::derive(move || h.read(|v| EnrollmentStats::from_enrollments(v.collection())))
        };
        view! {
            <div class="stat-cards">
                <div class="stat-card">
                    <span class="stat-label">"Students"</span>
                    <span class="stat-value">{move || stats.get().total}</span>
                </div>
                <div class="stat-card">
                    <span class="stat-label">"Active"</span>
                    <span class="stat-value">{move || stats.get().active}</span>
                </div>
                <div class="stat-card">
                    <span class="stat-label">"Courses"</span>
                    <span class="stat-value">{move || stats.get().courses}</span>
                </div>
            </div>
            <ResourcePage handle=handle read_only=true />
        }
        .into_any()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn enrollment(course: &str, status: Option<&str>) -> Enrollment {
        Enrollment {
            student_name: "Asha".to_string(),
            course: course.to_string(),
            status: status.map(str::to_string),
            ..Enrollment::default()
        }
    }

    #[test]
    fn test_stats_count_active_and_distinct_courses() {
        let enrollments = vec![
            enrollment("Physics", Some("active")),
            enrollment("Physics", Some("Active")),
            enrollment("Chemistry", Some("dropped")),
            enrollment(" ", None),
        ];
        assert_eq!(
            EnrollmentStats::from_enrollments(&enrollments),
            EnrollmentStats {
                total: 4,
                active: 2,
                courses: 2,
            }
        );
    }

    #[test]
    fn test_stats_of_nothing() {
        assert_eq!(EnrollmentStats::from_enrollments(&[]), EnrollmentStats::default());
    }
}
