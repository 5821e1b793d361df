//! Choice prompt dispatch.
//! This module routes prompt/choice pairs to the wave and card handlers.
//! It does not own card effects or phase rules.

use super::*;
use crate::game::prompts::PendingPromptKind;

impl Game {
    pub fn apply_choice(
        &mut self,
        prompt_id: ChoicePromptId,
        choice: Choice,
    ) -> Result<(), GameError> {
        let Some(prompt) = self.pending_prompt.clone() else {
            return Err(GameError::PromptMismatch);
        };
        if prompt.id != prompt_id {
            return Err(GameError::PromptMismatch);
        }

        match (prompt.kind, choice) {
            (PendingPromptKind::WaveStart, Choice::StartWave) => {}
            (PendingPromptKind::CardOffer { cards }, Choice::PickCard(index)) => {
                let Some(card) = cards.get(usize::from(index)).copied() else {
                    return Err(GameError::InvalidChoice);
                };
                self.apply_card(card);
            }
            (PendingPromptKind::CardOffer { .. }, Choice::SkipCards) => {}
            _ => return Err(GameError::InvalidChoice),
        }

        self.pending_prompt = None;
        self.next_input_seq += 1;
        self.start_wave();
        Ok(())
    }
}
