//! Drop Zone Component
//!
//! A horizontal drop target after each order and in each empty column.

use leptos::prelude::*;
use leptos_dragdrop::*;

use crate::dropzone::Slot;
use crate::gesture;
use crate::models::CardId;
use crate::store::{use_dashboard_store, DashboardStateStoreFields};

/// Drop zone shown between orders
#[component]
pub fn DropZone(
    dnd: DndSignals<CardId, Slot>,
    /// The `Slot::Dropzone` this element renders
    zone: Slot,
) -> impl IntoView {
    let store = use_dashboard_store();

    // hover check; the drop handler validates again
    let accepts = move |card_id: CardId, hovered: Slot| {
        gesture::accepts(&*store.orders().read_untracked(), card_id, hovered.surface())
    };
    let on_mouseenter = make_on_zone_mouseenter(dnd, zone, accepts);
    let on_mouseleave = make_on_mouseleave(dnd);

    let is_target = move || dnd.drop_target_read.get() == Some(zone);
    // stays marked until the server answers for the order dropped here
    let is_awaiting = move || match zone {
        Slot::Dropzone { column, after } => store.orders().read().is_awaiting(column, after),
        Slot::Card(_) => false,
    };
    let is_dragging = move || dnd.dragging_id_read.get().is_some();

    let zone_class = move || {
        let mut c = String::from("dropzone rounded");
        if is_dragging() { c.push_str(" active"); }
        if is_target() || is_awaiting() { c.push_str(" droppable"); }
        c
    };

    view! {
        <div
            class=zone_class
            on:mouseenter=on_mouseenter
            on:mouseleave=on_mouseleave
        >
            " "
        </div>
    }
}
