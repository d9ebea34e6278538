//! Board State
//!
//! `Board` holds the three-column partition of cards for one entity kind.
//! `KanbanBoard` wraps it with the derived dropzone layout and the set of
//! cards whose transition is still awaiting the server.

use std::collections::HashMap;
use std::fmt;

use crate::dropzone::DropzoneLayout;
use crate::models::{CardId, CardRecord, Column};
use crate::transition::{TransitionRequest, TransitionState};

/// Three ordered, disjoint columns of cards
#[derive(Debug, Clone, PartialEq)]
pub struct Board<C> {
    columns: [Vec<C>; 3],
}

impl<C> Default for Board<C> {
    fn default() -> Self {
        Self {
            columns: [Vec::new(), Vec::new(), Vec::new()],
        }
    }
}

impl<C: CardRecord> Board<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole column with what the server returned
    pub fn load(&mut self, column: Column, cards: Vec<C>) {
        self.columns[column.index()] = cards;
    }

    /// Caller removes any existing copy first
    pub fn append(&mut self, column: Column, card: C) {
        self.columns[column.index()].push(card);
    }

    /// Caller removes any existing copy first
    pub fn prepend(&mut self, column: Column, card: C) {
        self.columns[column.index()].insert(0, card);
    }

    /// Insert right behind `after`; appends when `after` is not in `column`
    pub fn insert_after(&mut self, column: Column, after: Option<CardId>, card: C) {
        let pos = after.and_then(|after| self.cards(column).iter().position(|c| c.card_id() == after));
        match pos {
            Some(pos) => self.columns[column.index()].insert(pos + 1, card),
            None => self.append(column, card),
        }
    }

    /// Remove a card wherever it is. Absent ids are not an error.
    pub fn remove(&mut self, id: CardId) -> Option<(Column, C)> {
        for column in Column::ALL {
            let cards = &mut self.columns[column.index()];
            if let Some(pos) = cards.iter().position(|card| card.card_id() == id) {
                return Some((column, cards.remove(pos)));
            }
        }
        None
    }

    pub fn column_of(&self, id: CardId) -> Option<Column> {
        Column::ALL
            .into_iter()
            .find(|column| self.cards(*column).iter().any(|card| card.card_id() == id))
    }

    pub fn get(&self, id: CardId) -> Option<&C> {
        self.columns.iter().flatten().find(|card| card.card_id() == id)
    }

    pub fn cards(&self, column: Column) -> &[C] {
        &self.columns[column.index()]
    }

    pub fn len(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The card was not where the transition request left it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationMismatch {
    pub card_id: CardId,
    pub expected: Column,
    pub found: Option<Column>,
}

impl fmt::Display for LocationMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.found {
            Some(found) => write!(
                f,
                "card {} expected in {:?} but found in {:?}",
                self.card_id, self.expected, found
            ),
            None => write!(f, "card {} expected in {:?} but no longer on the board", self.card_id, self.expected),
        }
    }
}

impl std::error::Error for LocationMismatch {}

/// Board plus everything derived from it for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct KanbanBoard<C> {
    board: Board<C>,
    dropzones: DropzoneLayout,
    /// Cards with a request in flight, keyed by card
    in_flight: HashMap<CardId, TransitionRequest>,
}

impl<C: CardRecord> Default for KanbanBoard<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: CardRecord> KanbanBoard<C> {
    pub fn new() -> Self {
        let board = Board::new();
        let dropzones = DropzoneLayout::rebuild(&board);
        Self {
            board,
            dropzones,
            in_flight: HashMap::new(),
        }
    }

    pub fn board(&self) -> &Board<C> {
        &self.board
    }

    pub fn dropzones(&self) -> &DropzoneLayout {
        &self.dropzones
    }

    pub fn load_column(&mut self, column: Column, cards: Vec<C>) {
        self.board.load(column, cards);
        self.refresh_dropzones();
    }

    /// A card created elsewhere on the page goes to the top of Pending
    pub fn prepend_created(&mut self, card: C) {
        if let Some((column, _)) = self.board.remove(card.card_id()) {
            log::warn!("created card {} was already on the board in {:?}", card.card_id(), column);
        }
        self.board.prepend(Column::Pending, card);
        self.refresh_dropzones();
    }

    pub fn is_in_flight(&self, id: CardId) -> bool {
        self.in_flight.contains_key(&id)
    }

    /// `Requested` while the server has not answered, `Idle` otherwise
    pub fn transition_state(&self, id: CardId) -> TransitionState {
        if self.is_in_flight(id) {
            TransitionState::Requested
        } else {
            TransitionState::Idle
        }
    }

    /// True while a card dropped on the zone `(column, after)` awaits the server
    pub fn is_awaiting(&self, column: Column, after: Option<CardId>) -> bool {
        self.in_flight
            .values()
            .any(|request| request.target == column && request.after == after)
    }

    pub fn begin_transition(&mut self, request: &TransitionRequest) {
        self.in_flight.insert(request.card_id, *request);
    }

    pub fn finish_transition(&mut self, id: CardId) {
        self.in_flight.remove(&id);
    }

    /// Replace the stale card with the server's version at the hit dropzone.
    ///
    /// Always completes; a card that moved or vanished while the request was
    /// in flight is reported so the caller can log it.
    pub fn apply_transition(&mut self, request: &TransitionRequest, updated: C) -> Result<(), LocationMismatch> {
        let found = self.board.column_of(request.card_id);
        self.board.remove(request.card_id);
        if updated.card_id() != request.card_id {
            // server answered for a different card; keep its copy unique too
            self.board.remove(updated.card_id());
        }
        self.board.insert_after(request.target, request.after, updated);
        self.refresh_dropzones();

        if found == Some(request.source) {
            Ok(())
        } else {
            Err(LocationMismatch {
                card_id: request.card_id,
                expected: request.source,
                found,
            })
        }
    }

    fn refresh_dropzones(&mut self) {
        self.dropzones = DropzoneLayout::rebuild(&self.board);
    }
}
