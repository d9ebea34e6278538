//! Frontend Models
//!
//! Board columns, entity kinds and the card records served by the MES.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Identifier of an order or operational task
pub type CardId = u64;

/// Kanban column, in workflow order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Pending,
    InProgress,
    Completed,
}

impl Column {
    pub const ALL: [Column; 3] = [Column::Pending, Column::InProgress, Column::Completed];

    pub fn index(self) -> usize {
        match self {
            Column::Pending => 0,
            Column::InProgress => 1,
            Column::Completed => 2,
        }
    }

    /// Column a card has to come from to be dropped here
    pub fn predecessor(self) -> Option<Column> {
        match self {
            Column::Pending => None,
            Column::InProgress => Some(Column::Pending),
            Column::Completed => Some(Column::InProgress),
        }
    }

    #[cfg(test)]
    pub fn successor(self) -> Option<Column> {
        match self {
            Column::Pending => Some(Column::InProgress),
            Column::InProgress => Some(Column::Completed),
            Column::Completed => None,
        }
    }

    /// Suffix used in endpoint paths and element ids
    pub fn suffix(self) -> &'static str {
        match self {
            Column::Pending => "Pending",
            Column::InProgress => "InProgress",
            Column::Completed => "Completed",
        }
    }
}

/// The two boards on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Order,
    OperationalTask,
}

impl EntityKind {
    /// Only orders can be moved between columns
    pub fn supports_drag(self) -> bool {
        matches!(self, EntityKind::Order)
    }

    pub fn resource(self) -> &'static str {
        match self {
            EntityKind::Order => "orders",
            EntityKind::OperationalTask => "operationalTasks",
        }
    }

    /// e.g. `ordersInProgress`
    pub fn column_path(self, column: Column) -> String {
        format!("{}{}", self.resource(), column.suffix())
    }
}

/// A record that can sit on a kanban board
pub trait CardRecord: Clone + PartialEq + std::fmt::Debug + DeserializeOwned + Send + Sync + 'static {
    const KIND: EntityKind;

    fn card_id(&self) -> CardId;
}

pub const ORDER_STATE_IN_PROGRESS: &str = "03inProgress";
pub const ORDER_STATE_COMPLETED: &str = "04completed";
pub const RECORDING_CUMULATED: &str = "02cumulated";
pub const TASK_TYPE_EXECUTION_IN_ORDER: &str = "02executionOperationInOrder";
pub const TASK_STATE_STARTED: &str = "02started";

/// Production order (matches backend DTO)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: CardId,
    pub number: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub production_line_number: Option<String>,
    #[serde(default)]
    pub product_number: Option<String>,
    #[serde(default)]
    pub planned_quantity: Option<f64>,
    #[serde(default)]
    pub done_quantity: Option<f64>,
    #[serde(default)]
    pub product_unit: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub master_order_number: Option<String>,
    #[serde(default)]
    pub type_of_production_recording: Option<String>,
}

impl Order {
    pub fn done_quantity_or_zero(&self) -> f64 {
        self.done_quantity.unwrap_or(0.0)
    }

    pub fn done_in_percent(&self) -> u32 {
        done_in_percent(self.done_quantity, self.planned_quantity)
    }

    /// Done quantity is only meaningful once production started
    pub fn shows_done_quantity(&self) -> bool {
        matches!(self.state.as_deref(), Some(ORDER_STATE_IN_PROGRESS) | Some(ORDER_STATE_COMPLETED))
    }

    pub fn shows_terminal_link(&self) -> bool {
        self.state.as_deref() == Some(ORDER_STATE_IN_PROGRESS)
            && self.type_of_production_recording.as_deref() == Some(RECORDING_CUMULATED)
    }
}

impl CardRecord for Order {
    const KIND: EntityKind = EntityKind::Order;

    fn card_id(&self) -> CardId {
        self.id
    }
}

/// Operational task (matches backend DTO)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationalTask {
    pub id: CardId,
    pub number: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub task_type: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub order_id: Option<CardId>,
    #[serde(default)]
    pub order_number: Option<String>,
    #[serde(default)]
    pub workstation_number: Option<String>,
    #[serde(default)]
    pub order_product_number: Option<String>,
    #[serde(default)]
    pub product_number: Option<String>,
    #[serde(default)]
    pub planned_quantity: Option<f64>,
    #[serde(default)]
    pub used_quantity: Option<f64>,
    #[serde(default)]
    pub product_unit: Option<String>,
    #[serde(default)]
    pub staff_name: Option<String>,
}

impl OperationalTask {
    /// Execution tasks belong to an order and carry quantities
    pub fn is_execution_in_order(&self) -> bool {
        self.task_type.as_deref() == Some(TASK_TYPE_EXECUTION_IN_ORDER)
    }

    pub fn used_quantity_or_zero(&self) -> f64 {
        self.used_quantity.unwrap_or(0.0)
    }

    pub fn done_in_percent(&self) -> u32 {
        done_in_percent(self.used_quantity, self.planned_quantity)
    }

    pub fn shows_terminal_link(&self) -> bool {
        self.is_execution_in_order() && self.state.as_deref() == Some(TASK_STATE_STARTED)
    }
}

impl CardRecord for OperationalTask {
    const KIND: EntityKind = EntityKind::OperationalTask;

    fn card_id(&self) -> CardId {
        self.id
    }
}

fn done_in_percent(done: Option<f64>, planned: Option<f64>) -> u32 {
    match planned {
        Some(planned) if planned > 0.0 => {
            let percent = (done.unwrap_or(0.0) * 100.0 / planned).round();
            if percent.is_finite() && percent > 0.0 { percent as u32 } else { 0 }
        }
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_form_a_single_chain() {
        assert_eq!(Column::Pending.successor(), Some(Column::InProgress));
        assert_eq!(Column::InProgress.successor(), Some(Column::Completed));
        assert_eq!(Column::Completed.successor(), None);
        for column in Column::ALL {
            if let Some(next) = column.successor() {
                assert_eq!(next.predecessor(), Some(column));
            }
        }
        assert_eq!(Column::Pending.predecessor(), None);
    }

    #[test]
    fn test_column_paths() {
        assert_eq!(EntityKind::Order.column_path(Column::Pending), "ordersPending");
        assert_eq!(
            EntityKind::OperationalTask.column_path(Column::InProgress),
            "operationalTasksInProgress"
        );
    }

    #[test]
    fn test_order_from_backend_json() {
        let order: Order = serde_json::from_value(serde_json::json!({
            "id": 42,
            "number": "ORD-42",
            "state": "03inProgress",
            "plannedQuantity": 200.0,
            "doneQuantity": 50.0,
            "productUnit": "szt",
            "typeOfProductionRecording": "02cumulated"
        }))
        .unwrap();

        assert_eq!(order.card_id(), 42);
        assert_eq!(order.done_in_percent(), 25);
        assert!(order.shows_done_quantity());
        assert!(order.shows_terminal_link());
        assert_eq!(order.company_name, None);
    }

    #[test]
    fn test_done_percent_without_plan_is_zero() {
        assert_eq!(done_in_percent(Some(5.0), None), 0);
        assert_eq!(done_in_percent(Some(5.0), Some(0.0)), 0);
        assert_eq!(done_in_percent(None, Some(10.0)), 0);
        assert_eq!(done_in_percent(Some(1.0), Some(3.0)), 33);
    }

    #[test]
    fn test_operational_task_type_field() {
        let task: OperationalTask = serde_json::from_value(serde_json::json!({
            "id": 7,
            "number": "OT-7",
            "type": "02executionOperationInOrder",
            "state": "02started",
            "plannedQuantity": 10.0
        }))
        .unwrap();

        assert!(task.is_execution_in_order());
        assert!(task.shows_terminal_link());
        assert_eq!(task.used_quantity_or_zero(), 0.0);
    }
}
