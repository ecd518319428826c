use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Vec2 {
    pub x: i32,
    pub y: i32,
}

impl Vec2 {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// One decoded key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    /// Any unrecognised key. Still advances a full tick.
    Idle,
    /// Screen needs repainting; no tick.
    Redraw,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOutcome {
    Won,
    Quit,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    CoinCollected {
        x: i32,
        y: i32,
        score: u32,
    },
    GatesOpened {
        #[serde(rename = "gateCount")]
        gate_count: usize,
    },
    AdversaryContact {
        #[serde(rename = "adversaryIndex")]
        adversary_index: usize,
        x: i32,
        y: i32,
    },
    Won {
        score: u32,
    },
}

#[derive(Clone, Debug, Serialize)]
pub struct GameSummary {
    #[serde(rename = "gameId")]
    pub game_id: String,
    pub outcome: GameOutcome,
    pub score: u32,
    #[serde(rename = "maxScore")]
    pub max_score: u32,
    #[serde(rename = "coinsCollected")]
    pub coins_collected: usize,
    pub ticks: u64,
    #[serde(rename = "elapsedMs")]
    pub elapsed_ms: u64,
    #[serde(rename = "finishedAt")]
    pub finished_at: String,
}
