//! Toast Notifications
//!
//! Shown only when the host page has no message area.

use leptos::prelude::*;

use crate::notify::Severity;
use crate::store::{dismiss_toast, use_dashboard_store, DashboardStateStoreFields};

fn alert_class(severity: Severity) -> &'static str {
    match severity {
        Severity::Failure => "alert alert-danger",
    }
}

#[component]
pub fn Notifications() -> impl IntoView {
    let store = use_dashboard_store();

    view! {
        <div class="dashboard-notifications">
            <For
                each=move || store.toasts().get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    let notification = toast.notification;
                    view! {
                        <div class=alert_class(notification.severity) role="alert">
                            <strong>{notification.title}</strong>
                            " "
                            <span>{notification.content}</span>
                            <button class="close" on:click=move |_| dismiss_toast(store, id)>"×"</button>
                        </div>
                    }
                }
            />
        </div>
    }
}
