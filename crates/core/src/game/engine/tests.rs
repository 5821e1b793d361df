//! Regression test module wiring for engine behaviors.


/// Shared imports for engine regression tests.
mod support {
    pub(super) use super::super::*;
    pub(super) use crate::content::ContentPack;
    pub(super) use crate::game::test_support::*;
    pub(super) use crate::*;

    /// Advances until the engine stops for something other than the frame limit.
    pub(super) fn advance_until_stop(game: &mut Game, max_frames: u32) -> AdvanceStopReason {
        let mut spent = 0;
        while spent < max_frames {
            let result = game.advance(max_frames - spent);
            spent += result.simulated_frames;
            if !matches!(result.stop_reason, AdvanceStopReason::FrameLimitReached) {
                return result.stop_reason;
            }
        }
        AdvanceStopReason::FrameLimitReached
    }
}
