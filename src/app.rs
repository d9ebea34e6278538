//! MES Dashboard App
//!
//! Root component: provides the store and config, then mounts the enabled
//! boards and the toast area.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::api::HttpMesApi;
use crate::components::{Notifications, OperationalTaskBoard, OrderBoard};
use crate::config::DashboardConfig;
use crate::store::DashboardState;

#[component]
pub fn App(config: DashboardConfig) -> impl IntoView {
    // Provide store to all children
    let store = Store::new(DashboardState::default());
    provide_context(store);
    provide_context(config.clone());

    let api = HttpMesApi::new(&config);
    let orders = config.orders_enabled.then(|| view! { <OrderBoard api=api.clone()/> });
    let operational_tasks = config
        .operational_tasks_enabled
        .then(|| view! { <OperationalTaskBoard api=api.clone()/> });

    view! {
        <div id="dashboardKanban" class="dashboard-kanban">
            {orders}
            {operational_tasks}
            <Notifications/>
        </div>
    }
}
