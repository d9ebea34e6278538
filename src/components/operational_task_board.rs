//! Operational Task Board Component
//!
//! Read-only kanban; tasks change state elsewhere in the MES.

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{column_header_key, OperationalTaskCard};
use crate::api::HttpMesApi;
use crate::events::{bind_created_listener, OPERATIONAL_TASK_CREATED_EVENT};
use crate::models::{CardRecord, Column, EntityKind, OperationalTask};
use crate::notify::{HostTranslator, Translator};
use crate::store::{use_dashboard_store, DashboardStateStoreFields, TasksCell};
use crate::transition::load_board;

#[component]
pub fn OperationalTaskBoard(api: HttpMesApi) -> impl IntoView {
    let store = use_dashboard_store();
    let cell = TasksCell(store);

    spawn_local(async move {
        let failed = load_board::<OperationalTask, _, _>(&api, &cell).await;
        if failed > 0 {
            log::warn!("[TASKS] {} column(s) failed to load", failed);
        }
    });
    bind_created_listener::<OperationalTask, _>(OPERATIONAL_TASK_CREATED_EVENT, cell);

    view! {
        <div class="row kanban" id="operationalTasksKanban">
            {Column::ALL
                .into_iter()
                .map(|column| view! { <TaskColumn column=column/> })
                .collect_view()}
        </div>
    }
}

#[component]
fn TaskColumn(column: Column) -> impl IntoView {
    let store = use_dashboard_store();
    let ids = move || {
        store
            .operational_tasks()
            .read()
            .board()
            .cards(column)
            .iter()
            .map(CardRecord::card_id)
            .collect::<Vec<_>>()
    };

    view! {
        <div class="col kanban-column">
            <h5 class="kanban-header">{HostTranslator.translate(&column_header_key(EntityKind::OperationalTask, column))}</h5>
            <div class="items" id=EntityKind::OperationalTask.column_path(column)>
                <For
                    each=ids
                    key=|id| *id
                    children=move |id| {
                        let task = move || store.operational_tasks().read().board().get(id).cloned();
                        view! {
                            <div class="card" id=format!("operationalTask{}", id)>
                                {move || task().map(|task| view! { <OperationalTaskCard task=task column=column/> })}
                            </div>
                        }
                    }
                />
            </div>
        </div>
    }
}
