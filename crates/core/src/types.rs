use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    pub struct AlienId;
    pub struct ProjectileId;
}

/// Columns in the pattern grid; one per sixteenth-note step.
pub const STEPS: usize = 16;
/// Instrument rows in the pattern grid.
pub const ROWS: usize = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RowKind {
    Kick,
    Snare,
    ClosedHat,
    OpenHat,
    Clap,
    Tom,
}

impl RowKind {
    pub const ALL: [RowKind; ROWS] = [
        RowKind::Kick,
        RowKind::Snare,
        RowKind::ClosedHat,
        RowKind::OpenHat,
        RowKind::Clap,
        RowKind::Tom,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Kick and tom share the "low end" card modifiers.
    pub fn is_low_end(self) -> bool {
        matches!(self, RowKind::Kick | RowKind::Tom)
    }
}

/// One slot of the pattern grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: RowKind,
    pub step: u8,
}

impl Cell {
    pub const fn new(row: RowKind, step: u8) -> Self {
        Self { row, step }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    BassBomb,
    SnareShot,
    HatNeedle,
    HatSpray,
    ClapBurst,
    TomShell,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// How many aliens fired from the same column on the same step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CrossfireTier {
    Solo,
    Duo,
    Trio,
}

impl CrossfireTier {
    pub fn from_count(count: usize) -> Self {
        match count {
            0 | 1 => CrossfireTier::Solo,
            2 => CrossfireTier::Duo,
            _ => CrossfireTier::Trio,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Flat score bonus awarded when a projectile of this tier lands.
    pub fn score_bonus(self) -> i64 {
        match self {
            CrossfireTier::Solo => 0,
            CrossfireTier::Duo => 10,
            CrossfireTier::Trio => 30,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChoicePromptId(pub u64);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Choice {
    StartWave,
    PickCard(u8),
    SkipCards,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    Overdrive,
    HeavyLowEnd,
    Reinforced,
    DoubleTime,
    EncoreLoop,
    BargainBin,
    Resonance,
    Velocity,
}

impl CardKind {
    pub const ALL: [CardKind; 8] = [
        CardKind::Overdrive,
        CardKind::HeavyLowEnd,
        CardKind::Reinforced,
        CardKind::DoubleTime,
        CardKind::EncoreLoop,
        CardKind::BargainBin,
        CardKind::Resonance,
        CardKind::Velocity,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    Setup,
    Playing,
    Prepare { frames_left: u32 },
    CardPick,
    Complete,
    GameOver,
    Victory,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::GameOver | Phase::Victory)
    }

    pub(crate) fn tag(self) -> u8 {
        match self {
            Phase::Setup => 0,
            Phase::Playing => 1,
            Phase::Prepare { .. } => 2,
            Phase::CardPick => 3,
            Phase::Complete => 4,
            Phase::GameOver => 5,
            Phase::Victory => 6,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WaveKind {
    Normal,
    Boss,
    Berserk,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BossPattern {
    Fan,
    Barrage,
    Shield,
}

impl BossPattern {
    pub fn next(self) -> Self {
        match self {
            BossPattern::Fan => BossPattern::Barrage,
            BossPattern::Barrage => BossPattern::Shield,
            BossPattern::Shield => BossPattern::Fan,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DecisionKind {
    Dodge,
    Hunt,
    Center,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DefenderDecision {
    pub kind: DecisionKind,
    pub target_x: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    Victory,
    Defeat,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Interrupt {
    AwaitingWaveStart { prompt_id: ChoicePromptId, wave: u32 },
    CardOffer { prompt_id: ChoicePromptId, wave: u32, cards: Vec<CardKind> },
}

impl Interrupt {
    pub fn prompt_id(&self) -> ChoicePromptId {
        match self {
            Interrupt::AwaitingWaveStart { prompt_id, .. }
            | Interrupt::CardOffer { prompt_id, .. } => *prompt_id,
        }
    }
}

#[derive(Clone, Debug)]
pub enum AdvanceStopReason {
    Interrupted(Interrupt),
    PausedAtBoundary { frame: u64 },
    Finished(RunOutcome),
    FrameLimitReached,
}

#[derive(Clone, Debug)]
pub struct AdvanceResult {
    pub simulated_frames: u32,
    pub stop_reason: AdvanceStopReason,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("choice is not valid for the pending prompt")]
    InvalidChoice,
    #[error("no pending prompt with that id")]
    PromptMismatch,
    #[error("step {step} is outside the {STEPS}-step grid")]
    CellOutOfRange { step: u8 },
    #[error("cell {0:?} already holds an alien")]
    CellOccupied(Cell),
    #[error("cell {0:?} is empty")]
    CellEmpty(Cell),
    #[error("placement costs {cost} but only {remaining} budget remains")]
    InsufficientBudget { cost: u32, remaining: u32 },
    #[error("the run has finished")]
    RunFinished,
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogEvent {
    PhaseChanged { wave: u32, phase: Phase },
    LoopStarted { loop_index: u32, aliens: usize },
    StepTriggered { step: u8, loop_index: u32, rows: Vec<RowKind> },
    AlienPlaced { cell: Cell, cost: u32 },
    AlienRemoved { cell: Cell, refund: u32 },
    AlienDestroyed { cell: Cell },
    DefenderHit { damage: i32, tier: CrossfireTier, hp_left: i32 },
    DecisionChanged { kind: DecisionKind },
    BossPattern { pattern: BossPattern },
    WaveWon { wave: u32, score: i64 },
    CardPicked { card: CardKind },
}
