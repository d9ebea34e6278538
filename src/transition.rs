//! Kanban Transitions
//!
//! Loads boards from the MES and executes order state changes:
//! validate at drop time, mark the card in flight, await the server,
//! then reconcile or roll back.

use std::cell::RefCell;
use std::rc::Rc;

use crate::api::{ApiError, MesApi, TransitionResponse};
use crate::board::KanbanBoard;
use crate::gesture::{self, DropSurface};
use crate::models::{CardId, CardRecord, Column, Order};
use crate::notify::{Notification, Notifier, Translator};

pub const STATE_CHANGE_ERROR_KEY: &str = "basic.dashboard.orderStateChange.error";
pub const STATE_CHANGE_FAILED_KEY: &str = "basic.dashboard.orderStateChange.requestFailed";

/// A validated move of one card, one column forward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionRequest {
    pub card_id: CardId,
    pub source: Column,
    pub target: Column,
    /// Card the hit dropzone followed; `None` for an empty column
    pub after: Option<CardId>,
}

/// Lifecycle of one card's transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionState {
    /// Nothing sent; also the result of a discarded gesture
    Idle,
    Requested,
    Reconciled,
    RolledBack,
}

/// Mutable access to a board that may live in a reactive store
pub trait BoardCell<C> {
    fn with_board<R>(&self, f: impl FnOnce(&mut KanbanBoard<C>) -> R) -> R;
}

impl<C> BoardCell<C> for Rc<RefCell<KanbanBoard<C>>> {
    fn with_board<R>(&self, f: impl FnOnce(&mut KanbanBoard<C>) -> R) -> R {
        f(&mut self.borrow_mut())
    }
}

/// Fetch all three columns concurrently; each column is loaded as soon as
/// its own fetch completes. Returns how many columns failed.
pub async fn load_board<C, A, B>(api: &A, cell: &B) -> usize
where
    C: CardRecord,
    A: MesApi,
    B: BoardCell<C>,
{
    let loads = Column::ALL.map(|column| async move {
        match api.fetch_column::<C>(column).await {
            Ok(cards) => {
                log::info!("loaded {} {} cards", cards.len(), C::KIND.column_path(column));
                cell.with_board(|board| board.load_column(column, cards));
                true
            }
            Err(e) => {
                log::error!("failed to load {}: {}", C::KIND.column_path(column), e);
                false
            }
        }
    });
    futures::future::join_all(loads).await.into_iter().filter(|loaded| !loaded).count()
}

/// Runs order transitions against the MES
pub struct TransitionExecutor<A, N, T> {
    api: A,
    notifier: N,
    translator: T,
    auto_dismiss: bool,
}

impl<A, N, T> TransitionExecutor<A, N, T>
where
    A: MesApi,
    N: Notifier,
    T: Translator,
{
    pub fn new(api: A, notifier: N, translator: T, auto_dismiss: bool) -> Self {
        Self {
            api,
            notifier,
            translator,
            auto_dismiss,
        }
    }

    /// Handle a drop of `card_id` onto `surface`.
    ///
    /// Returns `Idle` when the gesture is discarded without a request.
    pub async fn execute<B: BoardCell<Order>>(&self, cell: &B, card_id: CardId, surface: DropSurface) -> TransitionState {
        let request = cell.with_board(|board| {
            let request = gesture::validate(board, card_id, surface)?;
            board.begin_transition(&request);
            Ok::<_, gesture::GestureRejection>(request)
        });
        let request = match request {
            Ok(request) => request,
            Err(rejection) => {
                log::debug!("drop of card {} discarded: {}", card_id, rejection);
                return TransitionState::Idle;
            }
        };
        log::info!("card {}: {:?} -> {:?} requested", card_id, request.source, request.target);

        let response = self.api.update_order_state(card_id).await;
        self.settle(cell, &request, response)
    }

    fn settle<B: BoardCell<Order>>(
        &self,
        cell: &B,
        request: &TransitionRequest,
        response: Result<TransitionResponse, ApiError>,
    ) -> TransitionState {
        match response {
            Ok(TransitionResponse::Updated(order)) => {
                cell.with_board(|board| {
                    board.finish_transition(request.card_id);
                    if let Err(mismatch) = board.apply_transition(request, order) {
                        log::warn!("reconciled despite board change: {}", mismatch);
                    }
                });
                log::info!("card {} now in {:?}", request.card_id, request.target);
                TransitionState::Reconciled
            }
            Ok(TransitionResponse::Rejected(message)) => {
                cell.with_board(|board| board.finish_transition(request.card_id));
                log::warn!("card {} transition rejected: {}", request.card_id, message);
                self.notify_failure(message);
                TransitionState::RolledBack
            }
            Err(e) => {
                cell.with_board(|board| board.finish_transition(request.card_id));
                log::error!("card {} transition failed: {}", request.card_id, e);
                self.notify_failure(self.translator.translate(STATE_CHANGE_FAILED_KEY));
                TransitionState::RolledBack
            }
        }
    }

    fn notify_failure(&self, content: String) {
        let title = self.translator.translate(STATE_CHANGE_ERROR_KEY);
        self.notifier.notify(Notification::failure(title, content, self.auto_dismiss));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntityKind, OperationalTask};
    use crate::notify::Severity;
    use crate::testing::{order, task, FakeApi, KeyTranslator, RecordingNotifier};
    use serde_json::json;

    fn zone(column: Column) -> DropSurface {
        DropSurface::Dropzone { column, after: None }
    }

    type Executor = TransitionExecutor<FakeApi, RecordingNotifier, KeyTranslator>;

    fn order_board(pending: Vec<Order>) -> Rc<RefCell<KanbanBoard<Order>>> {
        let mut board = KanbanBoard::new();
        board.load_column(Column::Pending, pending);
        Rc::new(RefCell::new(board))
    }

    fn executor(api: FakeApi) -> (Executor, RecordingNotifier) {
        let notifier = RecordingNotifier::default();
        (TransitionExecutor::new(api, notifier.clone(), KeyTranslator, true), notifier)
    }

    fn in_progress(id: CardId) -> Order {
        let mut order = order(id);
        order.state = Some("03inProgress".to_string());
        order.done_quantity = Some(3.0);
        order
    }

    #[tokio::test]
    async fn test_accepted_transition_moves_card() {
        let api = FakeApi::default().with_transition(Ok(TransitionResponse::Updated(in_progress(1))));
        let (executor, notifier) = executor(api);
        let cell = order_board(vec![order(1), order(2)]);

        let state = executor.execute(&cell, 1, zone(Column::InProgress)).await;

        assert_eq!(state, TransitionState::Reconciled);
        let board = cell.borrow();
        assert_eq!(board.board().column_of(1), Some(Column::InProgress));
        assert_eq!(board.board().get(1), Some(&in_progress(1)));
        assert_eq!(board.board().cards(Column::Pending), &[order(2)]);
        assert_eq!(board.board().len(), 2);
        assert!(!board.is_in_flight(1));
        assert!(notifier.recorded().is_empty());
    }

    #[tokio::test]
    async fn test_accepted_transition_lands_where_dropped() {
        let api = FakeApi::default().with_transition(Ok(TransitionResponse::Updated(in_progress(1))));
        let (executor, _notifier) = executor(api);
        let cell = order_board(vec![order(1)]);
        cell.borrow_mut().load_column(Column::InProgress, vec![in_progress(2), in_progress(3)]);

        let surface = DropSurface::Dropzone { column: Column::InProgress, after: Some(2) };
        let state = executor.execute(&cell, 1, surface).await;

        assert_eq!(state, TransitionState::Reconciled);
        let ids: Vec<_> = cell.borrow().board().cards(Column::InProgress).iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[tokio::test]
    async fn test_rejected_transition_leaves_board_unchanged() {
        let api = FakeApi::default().with_transition(Ok(TransitionResponse::Rejected("cannot transition".to_string())));
        let (executor, notifier) = executor(api);
        let cell = order_board(vec![order(1)]);
        let before = cell.borrow().clone();

        let state = executor.execute(&cell, 1, zone(Column::InProgress)).await;

        assert_eq!(state, TransitionState::RolledBack);
        assert_eq!(*cell.borrow(), before);
        let recorded = notifier.recorded();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].severity, Severity::Failure);
        assert_eq!(recorded[0].title, STATE_CHANGE_ERROR_KEY);
        assert_eq!(recorded[0].content, "cannot transition");
        assert!(recorded[0].auto_close);
    }

    #[tokio::test]
    async fn test_transport_failure_uses_generic_message() {
        let api = FakeApi::default().with_transition(Err(ApiError::Network("connection reset".to_string())));
        let (executor, notifier) = executor(api);
        let cell = order_board(vec![order(1)]);
        let before = cell.borrow().clone();

        let state = executor.execute(&cell, 1, zone(Column::InProgress)).await;

        assert_eq!(state, TransitionState::RolledBack);
        assert_eq!(*cell.borrow(), before);
        let recorded = notifier.recorded();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].content, STATE_CHANGE_FAILED_KEY);
    }

    #[tokio::test]
    async fn test_timeout_rolls_back() {
        let api = FakeApi::default().with_transition(Err(ApiError::Timeout(std::time::Duration::from_secs(30))));
        let (executor, _notifier) = executor(api);
        let cell = order_board(vec![order(1)]);

        let state = executor.execute(&cell, 1, zone(Column::InProgress)).await;

        assert_eq!(state, TransitionState::RolledBack);
        assert_eq!(cell.borrow().board().column_of(1), Some(Column::Pending));
        assert!(!cell.borrow().is_in_flight(1));
    }

    #[tokio::test]
    async fn test_illegal_drop_sends_nothing() {
        let api = FakeApi::default();
        let (executor, notifier) = executor(api.clone());
        let cell = order_board(vec![order(1)]);

        let skip = executor.execute(&cell, 1, zone(Column::Completed)).await;
        let outside = executor.execute(&cell, 1, DropSurface::Elsewhere).await;

        assert_eq!(skip, TransitionState::Idle);
        assert_eq!(outside, TransitionState::Idle);
        assert_eq!(api.transition_calls(), 0);
        assert!(notifier.recorded().is_empty());
    }

    #[test]
    fn test_duplicate_response_keeps_one_copy() {
        let api = FakeApi::default();
        let (executor, _notifier) = executor(api);
        let cell = order_board(vec![order(1)]);
        let request = TransitionRequest { card_id: 1, source: Column::Pending, target: Column::InProgress, after: None };

        executor.settle(&cell, &request, Ok(TransitionResponse::Updated(in_progress(1))));
        let once = cell.borrow().clone();
        executor.settle(&cell, &request, Ok(TransitionResponse::Updated(in_progress(1))));

        assert_eq!(*cell.borrow(), once);
        assert_eq!(cell.borrow().board().len(), 1);
    }

    #[tokio::test]
    async fn test_load_board_fills_each_column() {
        let api = FakeApi::default()
            .with_column(EntityKind::Order, Column::Pending, Ok(json!([{"id": 1, "number": "A"}, {"id": 2, "number": "B"}])))
            .with_column(EntityKind::Order, Column::InProgress, Ok(json!([])))
            .with_column(EntityKind::Order, Column::Completed, Ok(json!([{"id": 3, "number": "C"}])));
        let cell: Rc<RefCell<KanbanBoard<Order>>> = Rc::new(RefCell::new(KanbanBoard::new()));

        let failed = load_board(&api, &cell).await;

        assert_eq!(failed, 0);
        let board = cell.borrow();
        assert_eq!(board.board().cards(Column::Pending).len(), 2);
        assert!(board.board().cards(Column::InProgress).is_empty());
        assert_eq!(board.dropzones().dropzones_in(Column::InProgress), 1);
        assert_eq!(board.board().column_of(3), Some(Column::Completed));
        assert_eq!(board.dropzones().dropzone_count(), 4);
    }

    #[tokio::test]
    async fn test_failed_column_stays_empty() {
        let api = FakeApi::default()
            .with_column(EntityKind::OperationalTask, Column::Pending, Ok(json!([{"id": 1, "number": "OT-1"}])))
            .with_column(EntityKind::OperationalTask, Column::InProgress, Err(ApiError::Status(500)));
        let cell: Rc<RefCell<KanbanBoard<OperationalTask>>> = Rc::new(RefCell::new(KanbanBoard::new()));

        let failed = load_board(&api, &cell).await;

        // Completed has no canned answer either
        assert_eq!(failed, 2);
        assert_eq!(cell.borrow().board().cards(Column::Pending), &[task(1)]);
        assert!(cell.borrow().board().cards(Column::InProgress).is_empty());
    }
}
