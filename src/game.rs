use crate::score::ScoreResult;
use crate::words::WordPool;
use chrono::Local;
use rand::Rng;

/// Where a session is in its one legal path through a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Idle,
    CountingDown,
    Active,
    Ended,
}

/// How a round ended: every word cleared, or the clock ran out first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundOutcome {
    Flawless,
    Timeout,
}

/// Side effects surfaced to the rendering/audio layer. Each logical event is
/// queued at most once; callers drain the queue after driving the session.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    CountdownTick(u32),
    WordChanged(String),
    HitRegistered(u32),
    TimeChanged(u32),
    RoundEnded {
        result: ScoreResult,
        outcome: RoundOutcome,
    },
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub round_secs: u32,
    pub countdown_ticks: u32,
    /// Exact comparison when set; ASCII-case-insensitive otherwise.
    pub match_case: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            round_secs: 20,
            countdown_ticks: 3,
            match_case: false,
        }
    }
}

/// One timed round: word queue, current target word, remaining time, hits.
///
/// Driven purely by `start`, `submit_input`, `tick` and `reset`; all other
/// behavior (transitions, the single round-ended emission) follows from the
/// status machine. Out-of-state commands are idempotent no-ops.
#[derive(Debug)]
pub struct GameSession {
    pool: WordPool,
    config: SessionConfig,
    status: Status,
    remaining_words: Vec<String>,
    current_word: String,
    hits: u32,
    seconds_remaining: u32,
    countdown_remaining: u32,
    events: Vec<SessionEvent>,
}

impl GameSession {
    pub fn new(pool: WordPool, config: SessionConfig) -> Self {
        Self {
            pool,
            config,
            status: Status::Idle,
            remaining_words: Vec::new(),
            current_word: String::new(),
            hits: 0,
            seconds_remaining: 0,
            countdown_remaining: 0,
            events: Vec::new(),
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn hits(&self) -> u32 {
        self.hits
    }

    pub fn seconds_remaining(&self) -> u32 {
        self.seconds_remaining
    }

    pub fn countdown_remaining(&self) -> u32 {
        self.countdown_remaining
    }

    pub fn current_word(&self) -> &str {
        &self.current_word
    }

    pub fn words_left(&self) -> usize {
        self.remaining_words.len()
    }

    pub fn total_words(&self) -> usize {
        self.pool.len()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Take all events queued since the last drain.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Begin a round. Ignored while a countdown or round is already running.
    pub fn start(&mut self) {
        match self.status {
            Status::CountingDown | Status::Active => {}
            Status::Idle | Status::Ended => {
                if self.config.countdown_ticks == 0 {
                    self.begin_round();
                } else {
                    self.status = Status::CountingDown;
                    self.countdown_remaining = self.config.countdown_ticks;
                    self.events
                        .push(SessionEvent::CountdownTick(self.countdown_remaining));
                }
            }
        }
    }

    /// Discard any in-progress round without emitting a round-ended event.
    pub fn reset(&mut self) {
        self.status = Status::Idle;
        self.remaining_words.clear();
        self.current_word.clear();
        self.hits = 0;
        self.seconds_remaining = 0;
        self.countdown_remaining = 0;
    }

    /// Advance one time unit. Counts the pre-round countdown down, and during
    /// a round decrements the clock; a no-op in Idle/Ended. The round clock
    /// never moves while the countdown runs.
    pub fn tick(&mut self) {
        match self.status {
            Status::Idle | Status::Ended => {}
            Status::CountingDown => {
                self.countdown_remaining -= 1;
                if self.countdown_remaining == 0 {
                    self.begin_round();
                } else {
                    self.events
                        .push(SessionEvent::CountdownTick(self.countdown_remaining));
                }
            }
            Status::Active => {
                // Exhaustion wins over timeout when both land on one tick.
                if self.remaining_words.is_empty() && self.current_word.is_empty() {
                    self.end_round(RoundOutcome::Flawless);
                    return;
                }

                self.seconds_remaining = self.seconds_remaining.saturating_sub(1);
                self.events
                    .push(SessionEvent::TimeChanged(self.seconds_remaining));

                if self.seconds_remaining == 0 {
                    self.end_round(RoundOutcome::Timeout);
                }
            }
        }
    }

    /// Compare submitted text against the current target word. A match counts
    /// a hit and draws the next word; clearing the last word ends the round
    /// flawless. Submissions outside Active (and misses) change nothing.
    pub fn submit_input(&mut self, text: &str) {
        if self.status != Status::Active || self.current_word.is_empty() {
            return;
        }

        if !self.matches(text) {
            return;
        }

        self.hits += 1;
        self.current_word.clear();
        self.events.push(SessionEvent::HitRegistered(self.hits));

        if self.remaining_words.is_empty() {
            self.end_round(RoundOutcome::Flawless);
        } else {
            self.draw_next_word();
        }
    }

    fn matches(&self, text: &str) -> bool {
        if self.config.match_case {
            text == self.current_word
        } else {
            text.eq_ignore_ascii_case(&self.current_word)
        }
    }

    fn begin_round(&mut self) {
        self.status = Status::Active;
        self.countdown_remaining = 0;
        self.remaining_words = self.pool.round_copy();
        self.current_word.clear();
        self.hits = 0;
        self.seconds_remaining = self.config.round_secs;
        self.events
            .push(SessionEvent::TimeChanged(self.seconds_remaining));

        if !self.remaining_words.is_empty() {
            self.draw_next_word();
        }
    }

    fn draw_next_word(&mut self) {
        debug_assert!(!self.remaining_words.is_empty());
        let idx = rand::thread_rng().gen_range(0..self.remaining_words.len());
        self.current_word = self.remaining_words.remove(idx);
        self.events
            .push(SessionEvent::WordChanged(self.current_word.clone()));
    }

    // Only reachable from Active, so a round can never end twice.
    fn end_round(&mut self, outcome: RoundOutcome) {
        self.status = Status::Ended;
        let result = ScoreResult::new(self.hits, self.pool.len(), Local::now());
        self.events.push(SessionEvent::RoundEnded { result, outcome });
    }
}
