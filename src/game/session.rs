use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::{self, Instant, Interval, MissedTickBehavior};

use crate::log;

use super::engine::{GameEngine, GameSnapshot};
use super::rng::EngineRng;
use super::settings::EngineSettings;
use super::types::{Direction, GameStatus};

/// Discrete command events produced by the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineCommand {
    Start,
    Pause,
    /// Pause when running, start otherwise.
    Toggle,
    Reset,
    Turn(Direction),
}

/// Seam towards snapshot consumers; called after every tick and command.
pub trait SnapshotBroadcaster: Send + 'static {
    fn publish(&mut self, snapshot: GameSnapshot);
}

/// [`SnapshotBroadcaster`] backed by a tokio watch channel: consumers always
/// see the latest snapshot and never block the session.
pub struct WatchBroadcaster {
    tx: watch::Sender<GameSnapshot>,
}

impl SnapshotBroadcaster for WatchBroadcaster {
    fn publish(&mut self, snapshot: GameSnapshot) {
        let _ = self.tx.send(snapshot);
    }
}

pub fn snapshot_channel(
    initial: GameSnapshot,
) -> (WatchBroadcaster, watch::Receiver<GameSnapshot>) {
    let (tx, rx) = watch::channel(initial);
    (WatchBroadcaster { tx }, rx)
}

/// Drives a [`GameEngine`] at a fixed cadence on a single task. Commands
/// arrive through an mpsc channel and are serialized with ticks by the task
/// itself, so the engine needs no lock.
pub struct EngineSession {
    engine: GameEngine,
    startup_tick_interval: Duration,
    tick_interval: Duration,
}

impl EngineSession {
    pub fn new(settings: &EngineSettings, rng: EngineRng) -> Result<Self, String> {
        settings.validate()?;
        Ok(Self {
            engine: GameEngine::new(settings, rng),
            startup_tick_interval: settings.startup_tick_interval(),
            tick_interval: settings.tick_interval(),
        })
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.engine.snapshot()
    }

    /// Runs until the command channel closes, then returns the final snapshot.
    ///
    /// The ticker is created at the transient startup cadence and immediately
    /// replaced with the configured one, mirroring the original two-step
    /// initialization; the startup interval never drives a tick. There is
    /// exactly one live ticker at any point: installing a new one drops (and
    /// thereby cancels) its predecessor, and the loop's exit tears down the
    /// last one.
    pub async fn run(
        mut self,
        mut command_rx: mpsc::UnboundedReceiver<EngineCommand>,
        mut broadcaster: impl SnapshotBroadcaster,
    ) -> GameSnapshot {
        let mut ticker = new_ticker(self.startup_tick_interval);
        install_ticker(&mut ticker, self.tick_interval);
        log!(
            "session running, tick interval {}ms",
            self.tick_interval.as_millis()
        );

        loop {
            tokio::select! {
                _ = ticker.tick(), if self.engine.status() == GameStatus::Running => {
                    self.engine.tick();
                    broadcaster.publish(self.engine.snapshot());
                }
                command = command_rx.recv() => {
                    let Some(command) = command else {
                        break;
                    };
                    self.apply(command, &mut ticker);
                    broadcaster.publish(self.engine.snapshot());
                }
            }
        }

        log!("session stopped, final score {}", self.engine.snapshot().score);
        self.engine.snapshot()
    }

    fn apply(&mut self, command: EngineCommand, ticker: &mut Interval) {
        match command {
            EngineCommand::Start => self.start(ticker),
            EngineCommand::Pause => self.engine.pause(),
            EngineCommand::Toggle => {
                if self.engine.status() == GameStatus::Running {
                    self.engine.pause();
                } else {
                    self.start(ticker);
                }
            }
            EngineCommand::Reset => self.engine.reset(),
            EngineCommand::Turn(direction) => self.engine.set_direction(direction),
        }
    }

    fn start(&mut self, ticker: &mut Interval) {
        let was_running = self.engine.status() == GameStatus::Running;
        self.engine.start();
        // A fresh ticker on resume, so the pause gap is not replayed as a
        // burst of catch-up ticks.
        if !was_running && self.engine.status() == GameStatus::Running {
            install_ticker(ticker, self.tick_interval);
        }
    }
}

fn new_ticker(period: Duration) -> Interval {
    // interval_at: the first tick fires one full period after (re)start,
    // never immediately.
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

fn install_ticker(ticker: &mut Interval, period: Duration) {
    *ticker = new_ticker(period);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::types::Position;

    fn create_session() -> EngineSession {
        let settings = EngineSettings::default();
        EngineSession::new(&settings, EngineRng::new(42)).expect("default settings are valid")
    }

    fn spawn_session(
        session: EngineSession,
    ) -> (
        GameSnapshot,
        mpsc::UnboundedSender<EngineCommand>,
        watch::Receiver<GameSnapshot>,
        tokio::task::JoinHandle<GameSnapshot>,
    ) {
        let initial = session.snapshot();
        let (broadcaster, rx) = snapshot_channel(initial.clone());
        let (tx, command_rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(session.run(command_rx, broadcaster));
        (initial, tx, rx, handle)
    }

    #[test]
    fn test_new_rejects_invalid_settings() {
        let settings = EngineSettings {
            board_side: 1,
            ..EngineSettings::default()
        };
        assert!(EngineSession::new(&settings, EngineRng::new(42)).is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_ticks_while_running() {
        let (initial, tx, mut rx, _handle) = spawn_session(create_session());

        tx.send(EngineCommand::Start).unwrap();
        loop {
            rx.changed().await.unwrap();
            let snapshot = rx.borrow_and_update().clone();
            // One tick either moves the snake or ends the game at a wall.
            if snapshot.segments != initial.segments || snapshot.status == GameStatus::Ended {
                break;
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_stops_ticking() {
        let (initial, tx, mut rx, _handle) = spawn_session(create_session());

        tx.send(EngineCommand::Start).unwrap();
        tx.send(EngineCommand::Pause).unwrap();
        loop {
            rx.changed().await.unwrap();
            if rx.borrow_and_update().status == GameStatus::Paused {
                break;
            }
        }
        let paused = rx.borrow().clone();
        assert_eq!(paused.segments, initial.segments);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_toggle_starts_and_pauses() {
        let (_, tx, mut rx, _handle) = spawn_session(create_session());

        tx.send(EngineCommand::Toggle).unwrap();
        tx.send(EngineCommand::Toggle).unwrap();
        loop {
            rx.changed().await.unwrap();
            if rx.borrow_and_update().status == GameStatus::Paused {
                break;
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_turn_commands_reach_the_engine() {
        let session = create_session();
        let start_cell = session.snapshot().segments[0];
        let (_, tx, mut rx, _handle) = spawn_session(session);

        tx.send(EngineCommand::Start).unwrap();
        tx.send(EngineCommand::Turn(Direction::Down)).unwrap();
        loop {
            rx.changed().await.unwrap();
            let snapshot = rx.borrow_and_update().clone();
            if snapshot.status == GameStatus::Ended {
                break;
            }
            if snapshot.segments != vec![start_cell] {
                assert_eq!(snapshot.segments, vec![Position(start_cell.0 + 11)]);
                break;
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_closing_command_channel_stops_session() {
        let (initial, tx, _rx, handle) = spawn_session(create_session());
        drop(tx);
        let final_snapshot = handle.await.unwrap();
        assert_eq!(final_snapshot, initial);
    }
}
