pub mod app_loop;
pub mod launch;
pub mod progress_file;

use backbeat_core::RunOutcome;

pub const APP_NAME: &str = "Backbeat Assault";

/// Renders a snapshot hash the way the replay tool prints it, so the two can be compared by eye.
pub fn format_snapshot_hash(hash: u64) -> String {
    format!("0x{hash:016x}")
}

/// Stable code shown on the recap screen and stored with finished runs.
pub fn reason_code(outcome: &RunOutcome) -> &'static str {
    match outcome {
        RunOutcome::Victory => "WIN_FINAL_WAVE",
        RunOutcome::Defeat => "DEF_LOOPS_EXHAUSTED",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_hash_is_zero_padded_lowercase() {
        assert_eq!(format_snapshot_hash(0xBEA7), "0x000000000000bea7");
        assert_eq!(format_snapshot_hash(u64::MAX).len(), 18);
    }

    #[test]
    fn each_outcome_has_its_own_code() {
        assert_ne!(reason_code(&RunOutcome::Victory), reason_code(&RunOutcome::Defeat));
        assert_eq!(reason_code(&RunOutcome::Defeat), "DEF_LOOPS_EXHAUSTED");
    }
}
