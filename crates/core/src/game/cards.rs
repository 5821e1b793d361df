//! Card offers and the run-wide modifiers each card applies.

use super::*;

pub(super) const OFFER_SIZE: usize = 3;

impl Game {
    /// Draws `OFFER_SIZE` distinct cards into `state.card_offer`.
    pub(super) fn draw_card_offer(&mut self) {
        let mut pool = CardKind::ALL.to_vec();
        let mut offer = Vec::with_capacity(OFFER_SIZE);
        while offer.len() < OFFER_SIZE && !pool.is_empty() {
            let index = self.roll_below(pool.len() as u32) as usize;
            offer.push(pool.swap_remove(index));
        }
        self.state.card_offer = offer;
    }

    pub(super) fn apply_card(&mut self, card: CardKind) {
        let modifiers = &mut self.state.modifiers;
        match card {
            CardKind::Overdrive => {
                modifiers.damage_permille = modifiers.damage_permille * 1250 / 1000;
            }
            CardKind::HeavyLowEnd => {
                modifiers.low_end_permille = modifiers.low_end_permille * 1500 / 1000;
            }
            CardKind::Reinforced => modifiers.alien_hp_bonus += 1,
            CardKind::DoubleTime => modifiers.bpm_bonus += 15,
            CardKind::EncoreLoop => modifiers.extra_loops += 1,
            CardKind::BargainBin => modifiers.low_end_discount += 1,
            CardKind::Resonance => modifiers.crossfire_bonus_factor *= 2,
            CardKind::Velocity => {
                modifiers.projectile_speed_permille =
                    modifiers.projectile_speed_permille * 1200 / 1000;
            }
        }
        self.state.picked_cards.push(card);
        self.log.push(LogEvent::CardPicked { card });
    }
}
