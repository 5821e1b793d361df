//! Prompt state and interrupt conversion for player-facing decisions.
//! This module exists to isolate prompt lifecycle and ID stability logic.
//! It does not own the gameplay consequences of accepted choices.

use super::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) enum PendingPromptKind {
    WaveStart,
    CardOffer { cards: Vec<CardKind> },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) struct PendingPrompt {
    pub(super) id: ChoicePromptId,
    pub(super) kind: PendingPromptKind,
}

impl Game {
    /// Raises the prompt the current phase is waiting on, or re-issues the
    /// one already pending. Returns `None` while the simulation can run.
    pub fn pending_interrupt(&mut self) -> Option<Interrupt> {
        if let Some(prompt) = self.pending_prompt.clone() {
            return Some(self.prompt_to_interrupt(prompt));
        }
        let kind = match self.state.phase {
            Phase::Setup | Phase::Complete => PendingPromptKind::WaveStart,
            Phase::CardPick => PendingPromptKind::CardOffer { cards: self.state.card_offer.clone() },
            _ => return None,
        };
        let prompt = PendingPrompt { id: ChoicePromptId(self.next_input_seq), kind };
        self.pending_prompt = Some(prompt.clone());
        Some(self.prompt_to_interrupt(prompt))
    }

    pub(super) fn prompt_to_interrupt(&self, prompt: PendingPrompt) -> Interrupt {
        match prompt.kind {
            PendingPromptKind::WaveStart => {
                Interrupt::AwaitingWaveStart { prompt_id: prompt.id, wave: self.state.wave }
            }
            PendingPromptKind::CardOffer { cards } => {
                Interrupt::CardOffer { prompt_id: prompt.id, wave: self.state.wave, cards }
            }
        }
    }
}
