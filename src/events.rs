//! Page Events
//!
//! Order and task wizards on the host page announce new records with a
//! `CustomEvent` on `window`; the record is prepended to Pending.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::models::CardRecord;
use crate::transition::BoardCell;

pub const ORDER_CREATED_EVENT: &str = "mes-dashboard:order-created";
pub const OPERATIONAL_TASK_CREATED_EVENT: &str = "mes-dashboard:operational-task-created";

/// Listen for `event_name` and prepend its `detail` record to `cell`
pub fn bind_created_listener<C, B>(event_name: &'static str, cell: B)
where
    C: CardRecord,
    B: BoardCell<C> + 'static,
{
    let on_created = Closure::<dyn FnMut(web_sys::CustomEvent)>::new(move |ev: web_sys::CustomEvent| {
        match serde_wasm_bindgen::from_value::<C>(ev.detail()) {
            Ok(card) => {
                log::info!("{}: card {}", event_name, card.card_id());
                cell.with_board(|board| board.prepend_created(card));
            }
            Err(e) => log::warn!("{} with unreadable detail: {}", event_name, e),
        }
    });

    if let Some(win) = web_sys::window() {
        if let Err(e) = win.add_event_listener_with_callback(event_name, on_created.as_ref().unchecked_ref()) {
            log::error!("cannot listen for {}: {:?}", event_name, e);
        }
    }
    on_created.forget();
}
