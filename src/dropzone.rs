//! Dropzone Layout
//!
//! Drop targets are derived from the board and rebuilt from scratch after
//! every mutation: one zone after each draggable card, one in each column
//! without cards.

use crate::board::Board;
use crate::gesture::DropSurface;
use crate::models::{CardId, CardRecord, Column};

/// One rendered position inside a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Card(CardId),
    /// Drop target, placed after `after` or alone in an empty column
    Dropzone { column: Column, after: Option<CardId> },
}

impl Slot {
    pub fn is_dropzone(&self) -> bool {
        matches!(self, Slot::Dropzone { .. })
    }

    /// What releasing the pointer over this slot means
    pub fn surface(&self) -> DropSurface {
        match self {
            Slot::Dropzone { column, after } => DropSurface::Dropzone { column: *column, after: *after },
            Slot::Card(_) => DropSurface::Elsewhere,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DropzoneLayout {
    columns: [Vec<Slot>; 3],
}

impl DropzoneLayout {
    pub fn rebuild<C: CardRecord>(board: &Board<C>) -> Self {
        let draggable = C::KIND.supports_drag();
        let mut layout = Self::default();

        for column in Column::ALL {
            let slots = &mut layout.columns[column.index()];
            for card in board.cards(column) {
                let id = card.card_id();
                slots.push(Slot::Card(id));
                if draggable {
                    slots.push(Slot::Dropzone { column, after: Some(id) });
                }
            }
            if draggable && slots.is_empty() {
                slots.push(Slot::Dropzone { column, after: None });
            }
        }
        layout
    }

    pub fn column(&self, column: Column) -> &[Slot] {
        &self.columns[column.index()]
    }

    pub fn dropzones_in(&self, column: Column) -> usize {
        self.column(column).iter().filter(|slot| slot.is_dropzone()).count()
    }

    pub fn dropzone_count(&self) -> usize {
        Column::ALL.iter().map(|column| self.dropzones_in(*column)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{order, task};

    #[test]
    fn test_empty_order_board_has_one_zone_per_column() {
        let board = Board::<crate::models::Order>::new();
        let layout = DropzoneLayout::rebuild(&board);

        assert_eq!(layout.dropzone_count(), 3);
        for column in Column::ALL {
            assert_eq!(layout.column(column), &[Slot::Dropzone { column, after: None }]);
        }
    }

    #[test]
    fn test_zone_follows_every_order() {
        let mut board = Board::new();
        board.load(Column::Pending, vec![order(1), order(2)]);
        board.load(Column::Completed, vec![order(3)]);
        let layout = DropzoneLayout::rebuild(&board);

        assert_eq!(
            layout.column(Column::Pending),
            &[
                Slot::Card(1),
                Slot::Dropzone { column: Column::Pending, after: Some(1) },
                Slot::Card(2),
                Slot::Dropzone { column: Column::Pending, after: Some(2) },
            ]
        );
        assert_eq!(layout.dropzones_in(Column::InProgress), 1);
        assert_eq!(layout.dropzones_in(Column::Completed), 1);
        assert_eq!(layout.dropzone_count(), 4);
    }

    #[test]
    fn test_no_adjacent_zones() {
        let mut board = Board::new();
        board.load(Column::InProgress, vec![order(4), order(5), order(6)]);
        let layout = DropzoneLayout::rebuild(&board);

        for column in Column::ALL {
            let slots = layout.column(column);
            assert!(slots.windows(2).all(|pair| !(pair[0].is_dropzone() && pair[1].is_dropzone())));
            assert!(slots.last().is_some_and(Slot::is_dropzone));
        }
    }

    #[test]
    fn test_only_zones_are_drop_surfaces() {
        let zone = Slot::Dropzone { column: Column::Completed, after: Some(2) };
        assert_eq!(zone.surface(), DropSurface::Dropzone { column: Column::Completed, after: Some(2) });
        assert_eq!(Slot::Card(2).surface(), DropSurface::Elsewhere);
    }

    #[test]
    fn test_task_board_has_no_zones() {
        let mut board = Board::new();
        board.load(Column::Pending, vec![task(1)]);
        let layout = DropzoneLayout::rebuild(&board);

        assert_eq!(layout.dropzone_count(), 0);
        assert_eq!(layout.column(Column::Pending), &[Slot::Card(1)]);
        assert!(layout.column(Column::Completed).is_empty());
    }
}
