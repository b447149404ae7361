mod engine;
mod rng;
mod session;
mod settings;
mod snake;
mod types;

pub use engine::{GameEngine, GameSnapshot};
pub use rng::EngineRng;
pub use session::{
    snapshot_channel, EngineCommand, EngineSession, SnapshotBroadcaster, WatchBroadcaster,
};
pub use settings::{
    EngineSettings, DEFAULT_BOARD_SIDE, DEFAULT_TICK_INTERVAL_MS, STARTUP_TICK_INTERVAL_MS,
};
pub use snake::Snake;
pub use types::{CrashReason, Direction, GameStatus, Position};
