//! Test doubles for the MES backend and the host page.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use async_trait::async_trait;

use crate::api::{ApiError, ApiResult, MesApi, TransitionResponse};
use crate::models::{CardId, CardRecord, Column, EntityKind, OperationalTask, Order};
use crate::notify::{Notification, Notifier, Translator};

pub fn order(id: CardId) -> Order {
    Order {
        id,
        number: format!("ORD-{}", id),
        state: Some("01pending".to_string()),
        production_line_number: None,
        product_number: Some("P-100".to_string()),
        planned_quantity: Some(10.0),
        done_quantity: None,
        product_unit: Some("szt".to_string()),
        company_name: None,
        master_order_number: None,
        type_of_production_recording: None,
    }
}

pub fn task(id: CardId) -> OperationalTask {
    OperationalTask {
        id,
        number: format!("OT-{}", id),
        name: None,
        task_type: None,
        state: None,
        order_id: None,
        order_number: None,
        workstation_number: None,
        order_product_number: None,
        product_number: None,
        planned_quantity: None,
        used_quantity: None,
        product_unit: None,
        staff_name: None,
    }
}

/// Canned backend answers. Columns without an answer fail with 404.
#[derive(Clone, Default)]
pub struct FakeApi {
    columns: Rc<HashMap<(EntityKind, Column), ApiResult<serde_json::Value>>>,
    transition: Rc<RefCell<Option<ApiResult<TransitionResponse>>>>,
    transition_calls: Rc<Cell<usize>>,
}

impl FakeApi {
    pub fn with_column(mut self, kind: EntityKind, column: Column, answer: ApiResult<serde_json::Value>) -> Self {
        let mut columns = (*self.columns).clone();
        columns.insert((kind, column), answer);
        self.columns = Rc::new(columns);
        self
    }

    pub fn with_transition(self, answer: ApiResult<TransitionResponse>) -> Self {
        *self.transition.borrow_mut() = Some(answer);
        self
    }

    pub fn transition_calls(&self) -> usize {
        self.transition_calls.get()
    }
}

#[async_trait(?Send)]
impl MesApi for FakeApi {
    async fn fetch_column<C: CardRecord>(&self, column: Column) -> ApiResult<Vec<C>> {
        match self.columns.get(&(C::KIND, column)) {
            Some(Ok(value)) => serde_json::from_value(value.clone()).map_err(|e| ApiError::Decode(e.to_string())),
            Some(Err(e)) => Err(e.clone()),
            None => Err(ApiError::Status(404)),
        }
    }

    async fn update_order_state(&self, _id: CardId) -> ApiResult<TransitionResponse> {
        self.transition_calls.set(self.transition_calls.get() + 1);
        self.transition
            .borrow()
            .clone()
            .unwrap_or_else(|| Err(ApiError::Network("no canned answer".to_string())))
    }
}

/// Keeps every notification for inspection
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    recorded: Rc<RefCell<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn recorded(&self) -> Vec<Notification> {
        self.recorded.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.recorded.borrow_mut().push(notification);
    }
}

/// Returns keys untranslated
#[derive(Clone, Copy)]
pub struct KeyTranslator;

impl Translator for KeyTranslator {
    fn translate(&self, key: &str) -> String {
        key.to_string()
    }
}
