pub mod game;
pub mod logger;

pub use game::{
    snapshot_channel, CrashReason, Direction, EngineCommand, EngineRng, EngineSession,
    EngineSettings, GameEngine, GameSnapshot, GameStatus, Position, Snake, SnapshotBroadcaster,
    WatchBroadcaster,
};
pub use logger::init_logger;
