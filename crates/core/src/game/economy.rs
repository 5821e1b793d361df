//! Pattern editing against the per-wave budget.
//! Every placement records what it cost so a removal refunds exactly that,
//! even if card discounts changed in between.

use super::*;

impl Game {
    /// Activates `cell` and charges its row cost. Returns the amount paid.
    ///
    /// Placing while a wave is playing takes effect on the next loop.
    pub fn place_alien(&mut self, cell: Cell) -> Result<u32, GameError> {
        self.ensure_editable(cell)?;
        if self.state.pattern.is_active(cell) {
            return Err(GameError::CellOccupied(cell));
        }
        let cost = self.placement_cost(cell.row);
        let remaining = self.state.budget.remaining();
        if cost > remaining {
            return Err(GameError::InsufficientBudget { cost, remaining });
        }
        self.state.pattern.place(cell, cost);
        self.state.budget.spent += cost;
        self.log.push(LogEvent::AlienPlaced { cell, cost });
        Ok(cost)
    }

    /// Clears `cell`, refunds what was paid for it and despawns its alien.
    pub fn remove_alien(&mut self, cell: Cell) -> Result<u32, GameError> {
        self.ensure_editable(cell)?;
        let Some(placement) = self.state.pattern.remove(cell) else {
            return Err(GameError::CellEmpty(cell));
        };
        self.state.budget.spent = self.state.budget.spent.saturating_sub(placement.paid);
        self.state.aliens.retain(|_, alien| alien.cell != cell);
        self.log.push(LogEvent::AlienRemoved { cell, refund: placement.paid });
        Ok(placement.paid)
    }

    /// Cost of placing an alien in `row` with the current card discounts.
    pub fn placement_cost(&self, row: RowKind) -> u32 {
        self.state.modifiers.effective_cost(row, self.content.row(row).base_cost)
    }

    fn ensure_editable(&self, cell: Cell) -> Result<(), GameError> {
        if self.state.phase.is_terminal() {
            return Err(GameError::RunFinished);
        }
        if usize::from(cell.step) >= STEPS {
            return Err(GameError::CellOutOfRange { step: cell.step });
        }
        Ok(())
    }
}
