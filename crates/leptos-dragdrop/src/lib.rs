//! Leptos DragDrop Utilities
//!
//! Simple drag-and-drop for Leptos using mouse events.
//! Uses movement threshold to distinguish click from drag.
//! Generic over the dragged id and the drop zone type; zones decide on
//! hover whether they accept the dragged id, and the drop callback gets the
//! last accepted zone.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// DnD state signals
#[derive(Clone, Copy)]
pub struct DndSignals<Id: 'static, Zone: 'static> {
    pub dragging_id_read: ReadSignal<Option<Id>>,
    pub dragging_id_write: WriteSignal<Option<Id>>,
    /// Zone under the pointer that accepted the dragged id
    pub drop_target_read: ReadSignal<Option<Zone>>,
    pub drop_target_write: WriteSignal<Option<Zone>>,
    pub drag_just_ended_read: ReadSignal<bool>,
    pub drag_just_ended_write: WriteSignal<bool>,
    /// Pending id (mousedown but not yet dragging)
    pub pending_id_read: ReadSignal<Option<Id>>,
    pub pending_id_write: WriteSignal<Option<Id>>,
    /// Start position for movement detection
    pub start_x_read: ReadSignal<i32>,
    pub start_x_write: WriteSignal<i32>,
    pub start_y_read: ReadSignal<i32>,
    pub start_y_write: WriteSignal<i32>,
}

/// Movement threshold in pixels to start dragging
pub const DRAG_THRESHOLD_PX: i32 = 5;

/// True once the pointer moved far enough from the mousedown point
pub fn exceeds_threshold(start: (i32, i32), current: (i32, i32)) -> bool {
    let dx = (current.0 - start.0).abs();
    let dy = (current.1 - start.1).abs();
    dx > DRAG_THRESHOLD_PX || dy > DRAG_THRESHOLD_PX
}

pub fn create_dnd_signals<Id, Zone>() -> DndSignals<Id, Zone>
where
    Id: Copy + Send + Sync + 'static,
    Zone: Copy + Send + Sync + 'static,
{
    let (dragging_id_read, dragging_id_write) = signal(None::<Id>);
    let (drop_target_read, drop_target_write) = signal(None::<Zone>);
    let (drag_just_ended_read, drag_just_ended_write) = signal(false);
    let (pending_id_read, pending_id_write) = signal(None::<Id>);
    let (start_x_read, start_x_write) = signal(0i32);
    let (start_y_read, start_y_write) = signal(0i32);
    DndSignals {
        dragging_id_read,
        dragging_id_write,
        drop_target_read,
        drop_target_write,
        drag_just_ended_read,
        drag_just_ended_write,
        pending_id_read,
        pending_id_write,
        start_x_read,
        start_x_write,
        start_y_read,
        start_y_write,
    }
}

/// End drag operation
pub fn end_drag<Id, Zone>(dnd: &DndSignals<Id, Zone>)
where
    Id: Copy + Send + Sync + 'static,
    Zone: Copy + Send + Sync + 'static,
{
    dnd.dragging_id_write.set(None);
    dnd.drop_target_write.set(None);
    dnd.pending_id_write.set(None);
    dnd.drag_just_ended_write.set(true);

    if let Some(win) = web_sys::window() {
        let clear = dnd.drag_just_ended_write;
        let cb = wasm_bindgen::closure::Closure::<dyn FnMut()>::new(move || {
            clear.set(false);
        });
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(cb.as_ref().unchecked_ref(), 100);
        cb.forget();
    }
}

/// Create mousedown handler for draggable items
/// Records pending drag with start position
pub fn make_on_mousedown<Id, Zone>(dnd: DndSignals<Id, Zone>, item_id: Id) -> impl Fn(web_sys::MouseEvent) + Copy + 'static
where
    Id: Copy + Send + Sync + 'static,
    Zone: Copy + Send + Sync + 'static,
{
    move |ev: web_sys::MouseEvent| {
        if ev.button() == 0 {
            // Links and buttons inside a card keep their click
            if let Some(target) = ev.target() {
                if target.dyn_ref::<web_sys::HtmlAnchorElement>().is_some() { return; }
                if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() { return; }
            }
            dnd.pending_id_write.set(Some(item_id));
            dnd.start_x_write.set(ev.client_x());
            dnd.start_y_write.set(ev.client_y());
        }
    }
}

/// Bind mousemove on document - starts drag if moved enough
pub fn bind_global_mousemove<Id, Zone>(dnd: DndSignals<Id, Zone>)
where
    Id: Copy + Send + Sync + 'static,
    Zone: Copy + Send + Sync + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_mousemove = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        let pending = dnd.pending_id_read.get_untracked();

        if pending.is_some() && dnd.dragging_id_read.get_untracked().is_none() {
            let start = (dnd.start_x_read.get_untracked(), dnd.start_y_read.get_untracked());
            if exceeds_threshold(start, (ev.client_x(), ev.client_y())) {
                dnd.dragging_id_write.set(pending);
            }
        }
    });

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc.add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());
        }
    }
    on_mousemove.forget();
}

/// Create mouseenter handler for zones.
///
/// `accepts` runs on every hover; a zone that rejects the dragged id clears
/// the current target instead of becoming it.
pub fn make_on_zone_mouseenter<Id, Zone, F>(dnd: DndSignals<Id, Zone>, zone: Zone, accepts: F) -> impl Fn(web_sys::MouseEvent) + Copy + 'static
where
    Id: Copy + Send + Sync + 'static,
    Zone: Copy + Send + Sync + 'static,
    F: Fn(Id, Zone) -> bool + Copy + 'static,
{
    move |_ev: web_sys::MouseEvent| {
        if let Some(dragging) = dnd.dragging_id_read.get_untracked() {
            if accepts(dragging, zone) {
                dnd.drop_target_write.set(Some(zone));
            } else {
                dnd.drop_target_write.set(None);
            }
        }
    }
}

/// Create mouseleave handler
pub fn make_on_mouseleave<Id, Zone>(dnd: DndSignals<Id, Zone>) -> impl Fn(web_sys::MouseEvent) + Copy + 'static
where
    Id: Copy + Send + Sync + 'static,
    Zone: Copy + Send + Sync + 'static,
{
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_id_read.get_untracked().is_some() {
            dnd.drop_target_write.set(None);
        }
    }
}

/// Bind global mouseup handler for drop detection.
///
/// The hover decision is only visual; `on_drop` must validate again.
pub fn bind_global_mouseup<Id, Zone, F>(dnd: DndSignals<Id, Zone>, on_drop: F)
where
    Id: Copy + Send + Sync + 'static,
    Zone: Copy + Send + Sync + 'static,
    F: Fn(Id, Zone) + Clone + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_mouseup = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_ev: web_sys::MouseEvent| {
        let dragging_id = dnd.dragging_id_read.get_untracked();
        let drop_target = dnd.drop_target_read.get_untracked();

        dnd.pending_id_write.set(None);
        end_drag(&dnd);

        // Plain clicks and drops outside any accepting zone end here
        if let (Some(dragged), Some(target)) = (dragging_id, drop_target) {
            on_drop(dragged, target);
        }
    });

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc.add_event_listener_with_callback("mouseup", on_mouseup.as_ref().unchecked_ref());
        }
    }
    on_mouseup.forget();

    // Also bind global mousemove
    bind_global_mousemove(dnd);
}
