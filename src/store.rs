//! Global Dashboard State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::board::KanbanBoard;
use crate::models::{OperationalTask, Order};
use crate::notify::Notification;
use crate::transition::BoardCell;

/// How long an auto-closing toast stays up
const TOAST_AUTO_CLOSE_MS: u32 = 5_000;

/// In-page fallback for notifications
#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub notification: Notification,
}

/// Dashboard state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct DashboardState {
    pub orders: KanbanBoard<Order>,
    pub operational_tasks: KanbanBoard<OperationalTask>,
    pub toasts: Vec<Toast>,
    pub next_toast_id: u64,
}

/// Type alias for the store
pub type DashboardStore = Store<DashboardState>;

/// Get the dashboard store from context
pub fn use_dashboard_store() -> DashboardStore {
    expect_context::<DashboardStore>()
}

/// Order board inside the store
#[derive(Clone, Copy)]
pub struct OrdersCell(pub DashboardStore);

impl BoardCell<Order> for OrdersCell {
    fn with_board<R>(&self, f: impl FnOnce(&mut KanbanBoard<Order>) -> R) -> R {
        let field = self.0.orders();
        let mut board = field.write();
        f(&mut *board)
    }
}

/// Operational task board inside the store
#[derive(Clone, Copy)]
pub struct TasksCell(pub DashboardStore);

impl BoardCell<OperationalTask> for TasksCell {
    fn with_board<R>(&self, f: impl FnOnce(&mut KanbanBoard<OperationalTask>) -> R) -> R {
        let field = self.0.operational_tasks();
        let mut board = field.write();
        f(&mut *board)
    }
}

// ========================
// Toast Helpers
// ========================

pub fn show_toast(store: DashboardStore, notification: Notification) {
    let id = {
        let field = store.next_toast_id();
        let mut next = field.write();
        *next += 1;
        *next
    };
    let auto_close = notification.auto_close;
    store.toasts().write().push(Toast { id, notification });

    if auto_close {
        gloo_timers::callback::Timeout::new(TOAST_AUTO_CLOSE_MS, move || dismiss_toast(store, id)).forget();
    }
}

pub fn dismiss_toast(store: DashboardStore, id: u64) {
    store.toasts().write().retain(|toast| toast.id != id);
}
