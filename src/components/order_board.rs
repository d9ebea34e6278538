//! Order Board Component
//!
//! Three order columns with drag-and-drop between them.
//! Uses leptos-dragdrop with explicit DropZones after every order.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::*;

use super::{column_header_key, DropZone, OrderCard};
use crate::api::HttpMesApi;
use crate::config::DashboardConfig;
use crate::dropzone::Slot;
use crate::events::{bind_created_listener, ORDER_CREATED_EVENT};
use crate::models::{CardId, Column, EntityKind, Order};
use crate::notify::{HostNotifier, HostTranslator, Translator};
use crate::store::{use_dashboard_store, DashboardStateStoreFields, OrdersCell};
use crate::transition::{load_board, TransitionExecutor, TransitionState};

/// Order kanban with DnD support
#[component]
pub fn OrderBoard(api: HttpMesApi) -> impl IntoView {
    let store = use_dashboard_store();
    let config = expect_context::<DashboardConfig>();
    let cell = OrdersCell(store);

    let loader = api.clone();
    spawn_local(async move {
        let failed = load_board::<Order, _, _>(&loader, &cell).await;
        if failed > 0 {
            log::warn!("[ORDERS] {} column(s) failed to load", failed);
        }
    });
    bind_created_listener::<Order, _>(ORDER_CREATED_EVENT, cell);

    let dnd = create_dnd_signals::<CardId, Slot>();

    let executor = Rc::new(TransitionExecutor::new(
        api,
        HostNotifier::new(store),
        HostTranslator,
        config.notification_auto_dismiss,
    ));
    bind_global_mouseup(dnd, move |card_id, slot| {
        let executor = Rc::clone(&executor);
        spawn_local(async move {
            let state = executor.execute(&cell, card_id, slot.surface()).await;
            log::debug!("[DND] drop of order {} on {:?} ended {:?}", card_id, slot, state);
        });
    });

    view! {
        <div class="row kanban" id="ordersKanban">
            {Column::ALL
                .into_iter()
                .map(|column| view! { <OrderColumn column=column dnd=dnd/> })
                .collect_view()}
        </div>
    }
}

#[component]
fn OrderColumn(column: Column, dnd: DndSignals<CardId, Slot>) -> impl IntoView {
    let store = use_dashboard_store();
    let slots = move || store.orders().read().dropzones().column(column).to_vec();

    view! {
        <div class="col kanban-column">
            <h5 class="kanban-header">{HostTranslator.translate(&column_header_key(EntityKind::Order, column))}</h5>
            <div class="items" id=EntityKind::Order.column_path(column)>
                <For
                    each=slots
                    key=|slot| *slot
                    children=move |slot| match slot {
                        Slot::Card(id) => view! { <DraggableOrder id=id dnd=dnd/> }.into_any(),
                        Slot::Dropzone { .. } => view! { <DropZone dnd=dnd zone=slot/> }.into_any(),
                    }
                />
            </div>
        </div>
    }
}

/// Wrapper carrying the drag handlers; the card itself is a pure view
#[component]
fn DraggableOrder(id: CardId, dnd: DndSignals<CardId, Slot>) -> impl IntoView {
    let store = use_dashboard_store();
    let on_mousedown = make_on_mousedown(dnd, id);

    let order = move || store.orders().read().board().get(id).cloned();
    let is_requested = move || store.orders().read().transition_state(id) == TransitionState::Requested;
    let is_dragging = move || dnd.dragging_id_read.get() == Some(id);

    let card_class = move || {
        let mut c = String::from("card draggable");
        if is_dragging() { c.push_str(" dragging"); }
        if is_requested() { c.push_str(" requested"); }
        c
    };

    view! {
        <div
            class=card_class
            id=format!("order{}", id)
            on:mousedown=move |ev| {
                // no second drag while the first awaits the server
                if !store.orders().read_untracked().is_in_flight(id) {
                    on_mousedown(ev);
                }
            }
        >
            {move || order().map(|order| view! { <OrderCard order=order/> })}
        </div>
    }
}
