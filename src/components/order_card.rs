//! Order Card Component

use leptos::prelude::*;

use super::card_parts::with_unit;
use super::{CardField, ProgressBar};
use crate::models::Order;
use crate::notify::{HostTranslator, Translator};

/// Card body for one production order. Pure view over the record.
#[component]
pub fn OrderCard(order: Order) -> impl IntoView {
    let t = HostTranslator;
    let unit = order.product_unit.as_deref();

    let planned = order
        .planned_quantity
        .filter(|_| unit.is_some())
        .map(|planned| with_unit(planned, unit));
    let done = order
        .shows_done_quantity()
        .then(|| with_unit(order.done_quantity_or_zero(), unit));
    let terminal = order
        .shows_terminal_link()
        .then(|| view! { <span class="badge badge-success float-right">{t.translate("basic.dashboard.orders.showTerminal.label")}</span> });

    view! {
        <div class="card-header bg-secondary py-2">
            <span class="card-title text-white">{order.number.clone()}</span>
        </div>
        <div class="card-body py-2">
            <CardField label=t.translate("basic.dashboard.orders.productionLineNumber.label") value=order.production_line_number.clone()/>
            <CardField label=t.translate("basic.dashboard.orders.productNumber.label") value=order.product_number.clone()/>
            {planned.map(|planned| view! {
                <span class="float-left">
                    <span class="font-weight-bold">{t.translate("basic.dashboard.orders.plannedQuantity.label")}":"</span>
                    " "{planned}
                </span>
            })}
            {done.map(|done| view! {
                <span class="float-right">
                    <span class="font-weight-bold">{t.translate("basic.dashboard.orders.doneQuantity.label")}":"</span>
                    " "{done}
                </span>
            })}
            {order.planned_quantity.is_some().then(|| view! { <br/> })}
            <CardField label=t.translate("basic.dashboard.orders.companyName.label") value=order.company_name.clone()/>
            <CardField label=t.translate("basic.dashboard.orders.masterOrderNumber.label") value=order.master_order_number.clone()/>
            {terminal}
        </div>
        <ProgressBar percent=order.done_in_percent()/>
    }
}
