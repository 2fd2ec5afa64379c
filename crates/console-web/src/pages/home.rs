//! Landing page with one card per section

use crate::app::{NAV_LINKS, NavLink};
use crate::context::use_console;
use console_types::{ConsoleSettings, SourceKind};
use leptos::prelude::*;
use leptos_router::components::A;

/// Badge text for a section's data source
#[must_use]
pub fn source_badge(settings: &ConsoleSettings, link: &NavLink) -> Option<&'static str> {
    let key = link.endpoint?;
    Some(match settings.endpoints.get(key).map(|e| e.source) {
        Some(SourceKind::Live) => "Live",
        Some(SourceKind::Demo) => "Demo data",
        None => "Not configured",
    })
}

/// Section overview
#[component]
pub fn HomePage() -> impl IntoView {
    let console = use_console();
    let mentor = console.session.mentor_id.clone();

    let cards = NAV_LINKS
        .iter()
        .filter(|link| link.href != "/")
        .map(|link| {
            let badge = source_badge(&console.settings, link);
            let class = match badge {
                Some("Demo data") => "badge badge-demo",
                Some("Not configured") => "badge badge-missing",
                _ => "badge",
            };
            view! {
                <A href=link.href attr:class="card">
                    <h2>{link.label}</h2>
                    {badge.map(|text| view! { <span class=class>{text}</span> })}
                </A>
            }
        })
        .collect_view();

    view! {
        <section class="home">
            <h1>"Admin console"</h1>
            {mentor.map(|id| {
                view! { <p class="session">"Signed in as mentor " {id.to_string()}</p> }
            })}
            <div class="cards">{cards}</div>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn link(endpoint: Option<&'static str>) -> NavLink {
        NavLink {
            href: "/x",
            label: "X",
            endpoint,
        }
    }

    #[test]
    fn test_badges_follow_endpoint_source() {
        let settings = ConsoleSettings::default();

        assert_eq!(source_badge(&settings, &link(Some("users"))), Some("Live"));
        assert_eq!(source_badge(&settings, &link(Some("bookings"))), Some("Demo data"));
        assert_eq!(source_badge(&settings, &link(Some("payroll"))), Some("Not configured"));
        assert_eq!(source_badge(&settings, &link(None)), None);
    }
}
