use super::constants::{CELL_SIZE, GRID_HEIGHT, GRID_WIDTH, INTRO_TICK_MS};
use super::engine::{self, TickOutcome};
use super::grid::Direction;
use super::input::InputBuffer;
use super::intro::IntroSnake;
use super::state::{GameState, RunStatus};
use crate::protocol::{ClientMessage, ServerMessage};
use crate::score::HighScoreStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::Mutex;

// One session per websocket connection. All mutation happens under the state
// lock inside a tick; the loops re-check the run epoch there, so a sleeper
// that outlives a restart or disconnect wakes, sees a stale epoch, and dies
// without touching the fresh state.
pub struct GameSession {
    state: Mutex<SessionState>,
    scores: HighScoreStore,
}

struct SessionState {
    client: Option<UnboundedSender<ServerMessage>>,
    game: GameState,
    input: InputBuffer,
    intro: IntroSnake,
    epoch: u64,
}

impl GameSession {
    pub fn new(scores: HighScoreStore) -> Self {
        Self {
            state: Mutex::new(SessionState {
                client: None,
                game: GameState::new(),
                input: InputBuffer::new(Direction::Right),
                intro: IntroSnake::new(),
                epoch: 0,
            }),
            scores,
        }
    }

    pub async fn attach_client(self: &Arc<Self>, sender: UnboundedSender<ServerMessage>) {
        let mut state = self.state.lock().await;
        state.client = Some(sender);
        state.send(ServerMessage::Init {
            grid_width: GRID_WIDTH,
            grid_height: GRID_HEIGHT,
            cell_size: CELL_SIZE,
            high_score: self.scores.current(),
        });
        let intro_frame = ServerMessage::Intro {
            snake: state.intro.body.iter().copied().collect(),
            direction: state.intro.direction,
        };
        state.send(intro_frame);
        let epoch = state.bump_epoch();
        drop(state);
        self.spawn_intro_loop(epoch);
    }

    pub async fn detach_client(&self) {
        let mut state = self.state.lock().await;
        state.client = None;
        state.bump_epoch();
    }

    pub async fn handle_message(self: &Arc<Self>, text: &str) {
        let Ok(message) = serde_json::from_str::<ClientMessage>(text) else { return };
        match message {
            ClientMessage::Start => self.start_run().await,
            ClientMessage::Input { direction } => {
                let mut state = self.state.lock().await;
                state.input.set(direction);
            }
        }
    }

    async fn start_run(self: &Arc<Self>) {
        let mut state = self.state.lock().await;
        let mut rng = rand::thread_rng();
        state.game.start(&mut rng);
        state.input.reset(Direction::Right);
        let epoch = state.bump_epoch();
        let delay = state.game.tick_ms;
        let message = state.state_message(self.scores.current());
        state.send(message);
        drop(state);
        self.spawn_run_loop(epoch, delay);
    }

    fn spawn_run_loop(self: &Arc<Self>, epoch: u64, initial_delay: u64) {
        let session = Arc::clone(self);
        tokio::spawn(async move {
            let mut delay = initial_delay;
            loop {
                tokio::time::sleep(Duration::from_millis(delay)).await;
                match session.run_tick(epoch).await {
                    Some(next_delay) => delay = next_delay,
                    None => break,
                }
            }
        });
    }

    // Returns the delay before the next tick, or None when the loop is done.
    async fn run_tick(&self, epoch: u64) -> Option<u64> {
        let mut state = self.state.lock().await;
        if state.epoch != epoch || state.game.status != RunStatus::Running {
            return None;
        }

        let direction = state.input.commit();
        let mut rng = rand::thread_rng();
        let outcome = engine::advance(&mut state.game, direction, &mut rng);

        if matches!(outcome, TickOutcome::AteFood | TickOutcome::AteBonus)
            && self.scores.record(state.game.score)
        {
            tracing::debug!(score = state.game.score, "new high score");
        }

        if state.game.status == RunStatus::GameOver {
            tracing::debug!(score = state.game.score, "game over");
            let score = state.game.score;
            let high_score = self.scores.current();
            state.send(ServerMessage::GameOver {
                score,
                high_score,
            });
            return None;
        }

        let message = state.state_message(self.scores.current());
        state.send(message);
        Some(state.game.tick_ms)
    }

    fn spawn_intro_loop(self: &Arc<Self>, epoch: u64) {
        let session = Arc::clone(self);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_millis(INTRO_TICK_MS));
            interval.tick().await;
            loop {
                interval.tick().await;
                if !session.intro_tick(epoch).await {
                    break;
                }
            }
        });
    }

    async fn intro_tick(&self, epoch: u64) -> bool {
        let mut state = self.state.lock().await;
        if state.epoch != epoch
            || state.client.is_none()
            || state.game.status != RunStatus::NotStarted
        {
            return false;
        }
        let mut rng = rand::thread_rng();
        let moved = state.intro.step(&mut rng);
        if moved {
            let message = ServerMessage::Intro {
                snake: state.intro.body.iter().copied().collect(),
                direction: state.intro.direction,
            };
            state.send(message);
        }
        true
    }
}

impl SessionState {
    fn bump_epoch(&mut self) -> u64 {
        self.epoch += 1;
        self.epoch
    }

    fn send(&mut self, message: ServerMessage) {
        let Some(sender) = &self.client else { return };
        if sender.send(message).is_err() {
            self.client = None;
            self.epoch += 1;
        }
    }

    fn state_message(&self, high_score: i64) -> ServerMessage {
        ServerMessage::State {
            snake: self.game.snake.iter().copied().collect(),
            direction: self.input.current(),
            food: self.game.food,
            bonus_food: self.game.bonus_food,
            score: self.game.score,
            high_score,
        }
    }
}
