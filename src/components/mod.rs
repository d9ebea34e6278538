//! UI Components
//!
//! Leptos components for the two kanban boards and the toast area.

mod card_parts;
mod drop_zone;
mod notifications;
mod operational_task_board;
mod operational_task_card;
mod order_board;
mod order_card;

pub use card_parts::{CardField, ProgressBar};
pub use drop_zone::DropZone;
pub use notifications::Notifications;
pub use operational_task_board::OperationalTaskBoard;
pub use operational_task_card::OperationalTaskCard;
pub use order_board::OrderBoard;
pub use order_card::OrderCard;

use crate::models::{Column, EntityKind};

/// Label key of a column header, e.g. `basic.dashboard.ordersPending.header`
pub fn column_header_key(kind: EntityKind, column: Column) -> String {
    format!("basic.dashboard.{}.header", kind.column_path(column))
}
