//! Coupons, invoices, bookings and payments

use super::resource_view;
use crate::components::ResourcePage;
use crate::context::{Notice, ResourceHandle};
use crate::download::{describe, download, today};
use console_client::demo::fixtures;
use console_protocol::BulkOutcome;
use console_protocol::export::invoice_pdf;
use console_types::entities::{Booking, Coupon, Invoice, Payment};
use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::warn;

/// Vendor coupons, with bulk creation and artwork upload
#[component]
pub fn CouponsPage() -> impl IntoView {
    resource_view::<Coupon>("coupons", Vec::new, |handle| {
        let bulk = handle.clone();
        view! {
            <ResourcePage handle=handle with_image=true>
                <BulkCouponForm handle=bulk />
            </ResourcePage>
        }
        .into_any()
    })
}

/// One draft per non-blank line, each a copy of the template with that code
#[must_use]
pub fn coupon_drafts(codes: &str, template: &Coupon) -> Vec<Coupon> {
    codes
        .lines()
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(|code| Coupon {
            id: None,
            code: code.to_string(),
            ..template.clone()
        })
        .collect()
}

/// Text of the notice after a bulk request
///
/// Partial success is reported with both counts, not as a failure.
#[must_use]
pub fn bulk_notice(outcome: &BulkOutcome) -> Notice {
    let mut text = outcome.summary();
    if !outcome.errors.is_empty() {
        text = format!("{text}: {}", outcome.errors.join("; "));
    }
    if outcome.created == 0 && outcome.has_failures() {
        Notice::Error(text)
    } else {
        Notice::Info(text)
    }
}

#[component]
fn BulkCouponForm(handle: ResourceHandle<Coupon>) -> impl IntoView {
    let open = RwSignal::new(false);
    let busy = RwSignal::new(false);
    let vendor = RwSignal::new(String::new());
    let discount = RwSignal::new(String::new());
    let valid_till = RwSignal::new(String::new());
    let codes = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let template = Coupon {
            vendor: vendor.get_untracked().trim().to_string(),
            discount: discount.get_untracked().trim().parse().ok(),
            discount_type: Some("percent".to_string()),
            valid_till: Some(valid_till.get_untracked()).filter(|d| !d.is_empty()),
            status: Some("active".to_string()),
            ..Coupon::default()
        };
        let drafts = coupon_drafts(&codes.get_untracked(), &template);
        if drafts.is_empty() {
            handle.notify(Notice::Error("Enter at least one coupon code".to_string()));
            return;
        }

        busy.set(true);
        let h = handle.clone();
        spawn_local(async move {
            match h.controller.bulk_create(&drafts).await {
                Ok(outcome) => {
                    h.notify(bulk_notice(&outcome));
                    codes.try_set(String::new());
                    open.try_set(false);
                }
                Err(error) => h.notify(Notice::Error(format!("Bulk creation failed: {error}"))),
            }
            busy.try_set(false);
            h.touch();
        });
    };

    view! {
        <button class="bulk-btn" on:click=move |_| open.update(|o| *o = !*o)>
            "Bulk create"
        </button>
        <Show when=move || open.get()>
            <form class="panel bulk-form" on:submit=on_submit.clone()>
                <h3>"Bulk create coupons"</h3>
                <label>
                    "Vendor"
                    <input
                        required=true
                        prop:value=move || vendor.get()
                        on:input=move |ev| vendor.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Discount (%)"
                    <input
                        type="number"
                        prop:value=move || discount.get()
                        on:input=move |ev| discount.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Valid till"
                    <input
                        type="date"
                        prop:value=move || valid_till.get()
                        on:input=move |ev| valid_till.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Codes, one per line"
                    <textarea
                        rows=6
                        prop:value=move || codes.get()
                        on:input=move |ev| codes.set(event_target_value(&ev))
                    ></textarea>
                </label>
                <button type="submit" class="primary" disabled=move || busy.get()>
                    {move || if busy.get() { "Creating..." } else { "Create all" }}
                </button>
            </form>
        </Show>
    }
}

/// Invoices, each downloadable as a PDF
#[component]
pub fn InvoicesPage() -> impl IntoView {
    resource_view::<Invoice>("invoices", Vec::new, |handle| {
        view! { <ResourcePage handle=handle row_actions=invoice_pdf_button /> }.into_any()
    })
}

fn invoice_pdf_button(invoice: &Invoice, handle: &ResourceHandle<Invoice>) -> AnyView {
    let invoice = invoice.clone();
    let h = handle.clone();
    view! {
        <button
            class="pdf-btn"
            on:click=move |_| {
                let result = invoice_pdf(&invoice, Some(&today()))
                    .map_err(|e| e.to_string())
                    .and_then(|file| download(&file).map_err(|e| describe(&e)));
                if let Err(error) = result {
                    warn!(invoice = %invoice.invoice_number, %error, "Invoice PDF failed");
                    h.notify(pdf_failure_notice(&invoice.invoice_number, &error));
                }
            }
        >
            "PDF"
        </button>
    }
    .into_any()
}

/// Error shown when an invoice PDF cannot be produced or saved
#[must_use]
pub fn pdf_failure_notice(invoice_number: &str, error: &str) -> Notice {
    Notice::Error(format!("PDF for invoice {invoice_number} failed: {error}"))
}

/// Bookings (placeholder data)
#[component]
pub fn BookingsPage() -> impl IntoView {
    resource_view::<Booking>("bookings", fixtures::bookings, |handle| {
        view! { <ResourcePage handle=handle /> }.into_any()
    })
}

/// Payments (placeholder data)
#[component]
pub fn PaymentsPage() -> impl IntoView {
    resource_view::<Payment>("payments", fixtures::payments, |handle| {
        view! { <ResourcePage handle=handle /> }.into_any()
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_coupon_drafts_skip_blank_lines() {
        let template = Coupon {
            vendor: "Acme".to_string(),
            discount: Some(10.0),
            ..Coupon::default()
        };
        let drafts = coupon_drafts("SAVE10\n\n  FLAT50  \n", &template);

        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].code, "SAVE10");
        assert_eq!(drafts[1].code, "FLAT50");
        assert!(drafts.iter().all(|d| d.vendor == "Acme" && d.id.is_none()));
    }

    #[test]
    fn test_partial_bulk_success_is_info() {
        let outcome = BulkOutcome {
            created: 1,
            failed: 1,
            errors: vec!["Duplicate code A1".to_string()],
        };
        assert_eq!(
            bulk_notice(&outcome),
            Notice::Info("Created 1, failed 1: Duplicate code A1".to_string())
        );
    }

    #[test]
    fn test_total_bulk_failure_is_error() {
        let outcome = BulkOutcome {
            created: 0,
            failed: 2,
            errors: Vec::new(),
        };
        assert!(matches!(bulk_notice(&outcome), Notice::Error(_)));
    }

    #[test]
    fn test_pdf_failure_is_error_notice() {
        assert_eq!(
            pdf_failure_notice("INV-7", "popup blocked"),
            Notice::Error("PDF for invoice INV-7 failed: popup blocked".to_string())
        );
    }
}
