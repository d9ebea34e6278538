//! Operational Task Card Component

use leptos::prelude::*;

use super::card_parts::with_unit;
use super::{CardField, ProgressBar};
use crate::models::{Column, OperationalTask};
use crate::notify::{HostTranslator, Translator};

/// Card body for one operational task.
///
/// Quantities, order references and the progress bar only apply to tasks
/// executed within an order; used quantity is hidden while pending.
#[component]
pub fn OperationalTaskCard(task: OperationalTask, column: Column) -> impl IntoView {
    let t = HostTranslator;
    let in_order = task.is_execution_in_order();
    let unit = task.product_unit.as_deref();
    let only_in_order = |value: Option<String>| value.filter(|_| in_order);

    let planned = task
        .planned_quantity
        .filter(|_| in_order && unit.is_some())
        .map(|planned| with_unit(planned, unit));
    let used = (in_order && column != Column::Pending).then(|| with_unit(task.used_quantity_or_zero(), unit));
    let terminal = task
        .shows_terminal_link()
        .then(|| view! { <span class="badge badge-success float-right">{t.translate("basic.dashboard.operationalTasks.showTerminal.label")}</span> });
    let progress = in_order.then(|| view! { <ProgressBar percent=task.done_in_percent()/> });

    view! {
        <div class="card-header bg-secondary py-2">
            <span class="card-title text-white">{task.number.clone()}</span>
        </div>
        <div class="card-body py-2">
            <CardField label=t.translate("basic.dashboard.operationalTasks.name.label") value=task.name.clone()/>
            <CardField label=t.translate("basic.dashboard.operationalTasks.orderNumber.label") value=only_in_order(task.order_number.clone())/>
            <CardField label=t.translate("basic.dashboard.operationalTasks.workstationNumber.label") value=task.workstation_number.clone()/>
            <CardField label=t.translate("basic.dashboard.operationalTasks.orderProductNumber.label") value=only_in_order(task.order_product_number.clone())/>
            <CardField label=t.translate("basic.dashboard.operationalTasks.productNumber.label") value=only_in_order(task.product_number.clone())/>
            {planned.map(|planned| view! {
                <span class="float-left">
                    <span class="font-weight-bold">{t.translate("basic.dashboard.operationalTasks.plannedQuantity.label")}":"</span>
                    " "{planned}
                </span>
            })}
            {used.map(|used| view! {
                <span class="float-right">
                    <span class="font-weight-bold">{t.translate("basic.dashboard.operationalTasks.usedQuantity.label")}":"</span>
                    " "{used}
                </span>
            })}
            {(in_order && task.planned_quantity.is_some()).then(|| view! { <br/> })}
            <CardField label=t.translate("basic.dashboard.operationalTasks.staffName.label") value=task.staff_name.clone()/>
            {terminal}
        </div>
        {progress}
    }
}
