//! Drag Gesture Rules
//!
//! Decides from the board model alone whether a drop is a legal transition.
//! Runs on hover for the droppable marking and again at drop time.

use std::fmt;

use crate::board::KanbanBoard;
use crate::models::{CardId, CardRecord, Column};
use crate::transition::TransitionRequest;

/// Where the pointer was released
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropSurface {
    /// The zone after card `after`, or the placeholder of an empty column
    Dropzone { column: Column, after: Option<CardId> },
    Elsewhere,
}

/// Why a gesture was discarded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureRejection {
    NotDraggable,
    NotADropSurface,
    UnknownCard(CardId),
    InFlight(CardId),
    NotNextColumn { from: Column, to: Column },
}

impl fmt::Display for GestureRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GestureRejection::NotDraggable => write!(f, "board does not support dragging"),
            GestureRejection::NotADropSurface => write!(f, "not a drop surface"),
            GestureRejection::UnknownCard(id) => write!(f, "card {} is not on the board", id),
            GestureRejection::InFlight(id) => write!(f, "card {} is awaiting the server", id),
            GestureRejection::NotNextColumn { from, to } => write!(f, "{:?} -> {:?} is not a single step forward", from, to),
        }
    }
}

/// Forward-only, single step
pub fn is_legal_transition(source: Column, target: Column) -> bool {
    target.predecessor() == Some(source)
}

pub fn validate<C: CardRecord>(
    board: &KanbanBoard<C>,
    card_id: CardId,
    surface: DropSurface,
) -> Result<TransitionRequest, GestureRejection> {
    if !C::KIND.supports_drag() {
        return Err(GestureRejection::NotDraggable);
    }
    let DropSurface::Dropzone { column: target, after } = surface else {
        return Err(GestureRejection::NotADropSurface);
    };
    let source = board
        .board()
        .column_of(card_id)
        .ok_or(GestureRejection::UnknownCard(card_id))?;
    if board.is_in_flight(card_id) {
        return Err(GestureRejection::InFlight(card_id));
    }
    if !is_legal_transition(source, target) {
        return Err(GestureRejection::NotNextColumn { from: source, to: target });
    }
    Ok(TransitionRequest { card_id, source, target, after })
}

/// Hover check for the droppable marking
pub fn accepts<C: CardRecord>(board: &KanbanBoard<C>, card_id: CardId, surface: DropSurface) -> bool {
    validate(board, card_id, surface).is_ok()
}
