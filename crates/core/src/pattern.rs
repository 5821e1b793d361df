//! The drum-pattern grid and its share-code encoding.
//!
//! Each occupied cell remembers the cost that was paid for it so a later
//! removal refunds exactly that amount, even if card discounts changed the
//! row's price in between.
//!
//! Share codes encode each row as four lowercase hex digits, bit `c` set
//! when step `c` is active, rows joined by `-` in [`RowKind::ALL`] order.

use std::fmt::Write as _;

use crate::types::{Cell, ROWS, RowKind, STEPS};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Placement {
    pub paid: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Pattern {
    cells: [[Option<Placement>; STEPS]; ROWS],
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PatternCodeError {
    #[error("expected {ROWS} rows, found {0}")]
    RowCount(usize),
    #[error("row {row} must be 4 hex digits")]
    RowLength { row: usize },
    #[error("row {row} contains a non-hex digit")]
    InvalidDigit { row: usize },
}

impl Pattern {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, cell: Cell) -> Option<Placement> {
        self.cells[cell.row.index()].get(cell.step as usize).copied().flatten()
    }

    pub fn is_active(&self, cell: Cell) -> bool {
        self.get(cell).is_some()
    }

    /// Marks `cell` as occupied. Callers validate range and occupancy first.
    pub(crate) fn place(&mut self, cell: Cell, paid: u32) {
        if let Some(slot) = self.cells[cell.row.index()].get_mut(cell.step as usize) {
            *slot = Some(Placement { paid });
        }
    }

    /// Clears `cell`, returning what was paid for it.
    pub(crate) fn remove(&mut self, cell: Cell) -> Option<Placement> {
        self.cells[cell.row.index()].get_mut(cell.step as usize).and_then(Option::take)
    }

    pub(crate) fn clear(&mut self) {
        self.cells = [[None; STEPS]; ROWS];
    }

    pub fn active_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        RowKind::ALL.into_iter().flat_map(move |row| {
            (0..STEPS as u8)
                .map(move |step| Cell::new(row, step))
                .filter(move |cell| self.is_active(*cell))
        })
    }

    pub fn active_count(&self) -> usize {
        self.active_cells().count()
    }

    pub fn total_paid(&self) -> u32 {
        self.cells.iter().flatten().flatten().map(|placement| placement.paid).sum()
    }

    pub fn row_mask(&self, row: RowKind) -> u16 {
        self.cells[row.index()]
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .fold(0u16, |mask, (step, _)| mask | (1 << step))
    }

    pub fn share_code(&self) -> String {
        let mut code = String::with_capacity(ROWS * 5);
        for (index, row) in RowKind::ALL.into_iter().enumerate() {
            if index > 0 {
                code.push('-');
            }
            let _ = write!(code, "{:04x}", self.row_mask(row));
        }
        code
    }
}

/// Parses a share code into its active cells.
///
/// Costs are not part of the code, so the caller replays the cells through
/// the budget economy rather than building a [`Pattern`] directly.
pub fn decode_share_code(code: &str) -> Result<Vec<Cell>, PatternCodeError> {
    let parts: Vec<&str> = code.trim().split('-').collect();
    if parts.len() != ROWS {
        return Err(PatternCodeError::RowCount(parts.len()));
    }
    let mut cells = Vec::new();
    for (index, part) in parts.iter().enumerate() {
        if part.len() != 4 {
            return Err(PatternCodeError::RowLength { row: index });
        }
        if !part.bytes().all(|byte| byte.is_ascii_hexdigit()) {
            return Err(PatternCodeError::InvalidDigit { row: index });
        }
        let mask = u16::from_str_radix(part, 16)
            .map_err(|_| PatternCodeError::InvalidDigit { row: index })?;
        let row = RowKind::ALL[index];
        for step in 0..STEPS as u8 {
            if mask & (1 << step) != 0 {
                cells.push(Cell::new(row, step));
            }
        }
    }
    Ok(cells)
}
