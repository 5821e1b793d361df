//! Per-frame simulation loop and stop-reason handling for the game engine.

use super::*;

impl Game {
    pub fn advance(&mut self, max_frames: u32) -> AdvanceResult {
        self.at_pause_boundary = false;
        let mut frames = 0;
        if let Some(outcome) = self.finished_outcome() {
            return AdvanceResult {
                simulated_frames: 0,
                stop_reason: AdvanceStopReason::Finished(outcome),
            };
        }
        if let Some(interrupt) = self.pending_interrupt() {
            return AdvanceResult {
                simulated_frames: 0,
                stop_reason: AdvanceStopReason::Interrupted(interrupt),
            };
        }

        while frames < max_frames {
            if self.pause_requested {
                self.pause_requested = false;
                self.at_pause_boundary = true;
                return AdvanceResult {
                    simulated_frames: frames,
                    stop_reason: AdvanceStopReason::PausedAtBoundary { frame: self.frame },
                };
            }

            let outcome = match self.state.phase {
                Phase::Setup | Phase::Complete | Phase::CardPick => {
                    if let Some(interrupt) = self.pending_interrupt() {
                        return AdvanceResult {
                            simulated_frames: frames,
                            stop_reason: AdvanceStopReason::Interrupted(interrupt),
                        };
                    }
                    None
                }
                Phase::GameOver | Phase::Victory => None,
                Phase::Playing => {
                    self.tick_sequencer();
                    self.update_defender();
                    self.step_projectiles();
                    self.resolve_wave()
                }
                Phase::Prepare { frames_left } => self.tick_prepare(frames_left),
            };

            self.frame += 1;
            frames += 1;
            self.record_threat_trace();

            if let Some(outcome) = outcome.or_else(|| self.finished_outcome()) {
                return AdvanceResult {
                    simulated_frames: frames,
                    stop_reason: AdvanceStopReason::Finished(outcome),
                };
            }
        }
        AdvanceResult { simulated_frames: frames, stop_reason: AdvanceStopReason::FrameLimitReached }
    }

    pub fn finished_outcome(&self) -> Option<RunOutcome> {
        match self.state.phase {
            Phase::Victory => Some(RunOutcome::Victory),
            Phase::GameOver => Some(RunOutcome::Defeat),
            _ => None,
        }
    }

    fn record_threat_trace(&mut self) {
        if self.state.phase != Phase::Playing {
            return;
        }
        let map = self.current_threat_map();
        let zone = super::threat::zone_of(self.state.defender.pos.x);
        self.state.threat_trace.push_front(ThreatTrace {
            frame: self.frame,
            peak_threat: map.peak(),
            current_zone_threat: map.threat(zone),
            hostile_projectiles: self.state.hostile_projectile_count(),
            decision: self.state.defender.decision.map(|decision| decision.kind),
        });
        if self.state.threat_trace.len() > THREAT_TRACE_LEN {
            self.state.threat_trace.pop_back();
        }
    }
}
