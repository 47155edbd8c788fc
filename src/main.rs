mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    time::Duration,
};

use lightspeed::config::{Config, ConfigStore, FileConfigStore};
use lightspeed::game::{GameSession, RoundOutcome, SessionEvent, Status};
use lightspeed::runtime::{CrosstermEventSource, LoopEvent, Runner};
use lightspeed::score::ScoreResult;
use lightspeed::scoreboard::ScoreStore;
use lightspeed::words::WordPool;

// One logical time unit per second; the session counts whole seconds.
const TICK_RATE_MS: u64 = 1000;

/// fast-paced terminal word sprint
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Type each displayed word before the clock runs out. Finished rounds are ranked on a locally persisted scoreboard."
)]
pub struct Cli {
    /// round length in seconds
    #[clap(short = 's', long)]
    seconds: Option<u32>,

    /// pre-round countdown in seconds
    #[clap(short = 'c', long)]
    countdown: Option<u32>,

    /// require exact case when matching words
    #[clap(long)]
    match_case: bool,

    /// word list to draw challenge words from
    #[clap(short = 'w', long, value_enum, default_value_t = WordList::English)]
    word_list: WordList,

    /// print the persisted scoreboard and exit
    #[clap(long)]
    scores: bool,
}

/// Embedded word lists a round may draw from.
#[derive(Debug, Copy, Clone, PartialEq, clap::ValueEnum)]
pub enum WordList {
    English,
}

impl WordList {
    fn as_pool(&self) -> WordPool {
        WordPool::new(self.file_name())
    }

    fn file_name(&self) -> &'static str {
        match self {
            WordList::English => "english",
        }
    }
}

impl std::fmt::Display for WordList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.file_name())
    }
}

impl Cli {
    fn apply(&self, cfg: &mut Config) {
        if let Some(secs) = self.seconds {
            cfg.round_secs = secs;
        }
        if let Some(ticks) = self.countdown {
            cfg.countdown_ticks = ticks;
        }
        if self.match_case {
            cfg.match_case = true;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Banner {
    Flawless,
    GameOver,
}

#[derive(Debug)]
pub struct App {
    pub session: GameSession,
    pub store: ScoreStore,
    pub input: String,
    pub banner: Option<Banner>,
    pub last_result: Option<ScoreResult>,
    pub show_scoreboard: bool,
}

impl App {
    pub fn new(cfg: &Config, pool: WordPool, store: ScoreStore) -> Self {
        Self {
            session: GameSession::new(pool, cfg.session_config()),
            store,
            input: String::new(),
            banner: None,
            last_result: None,
            show_scoreboard: false,
        }
    }

    fn start_round(&mut self) {
        // Restarting mid-round discards the round; no result is recorded.
        if matches!(
            self.session.status(),
            Status::Active | Status::CountingDown
        ) {
            self.session.reset();
        }
        self.banner = None;
        self.last_result = None;
        self.show_scoreboard = false;
        self.input.clear();
        self.session.start();
    }

    /// Returns true when the app should exit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc => return true,
            KeyCode::Enter => self.start_round(),
            KeyCode::Tab => {
                // Never show the scoreboard midgame.
                if self.session.status() != Status::Active {
                    self.show_scoreboard = !self.show_scoreboard;
                }
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) => {
                // Challenge words are plain letters; ignore everything else.
                if self.session.status() == Status::Active && c.is_ascii_alphabetic() {
                    self.input.push(c);
                    let text = self.input.clone();
                    self.session.submit_input(&text);
                    self.apply_session_events();
                }
            }
            _ => {}
        }
        false
    }

    fn on_tick(&mut self) {
        self.session.tick();
        self.apply_session_events();
    }

    fn apply_session_events(&mut self) {
        for event in self.session.drain_events() {
            match event {
                SessionEvent::WordChanged(_) => self.input.clear(),
                SessionEvent::RoundEnded { result, outcome } => {
                    self.input.clear();
                    self.banner = Some(match outcome {
                        RoundOutcome::Flawless => Banner::Flawless,
                        RoundOutcome::Timeout => Banner::GameOver,
                    });
                    self.last_result = Some(result.clone());
                    // A failed write is already logged; the in-memory board
                    // keeps serving the scoreboard view either way.
                    let _update = self.store.record(result);
                    self.show_scoreboard = true;
                }
                SessionEvent::CountdownTick(_)
                | SessionEvent::HitRegistered(_)
                | SessionEvent::TimeChanged(_) => {}
            }
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let mut cfg = FileConfigStore::new().load();
    cli.apply(&mut cfg);

    if cli.scores {
        print_scores(&ScoreStore::open(cfg.scoreboard_cap));
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let pool = cli.word_list.as_pool();
    let store = ScoreStore::open(cfg.scoreboard_cap);
    let mut app = App::new(&cfg, pool, store);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        Duration::from_millis(TICK_RATE_MS),
    );

    loop {
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;

        match runner.step() {
            LoopEvent::Tick => app.on_tick(),
            LoopEvent::Key(key) => {
                if app.handle_key(key) {
                    return Ok(());
                }
            }
        }
    }
}

fn print_scores(store: &ScoreStore) {
    match store.high_score() {
        None => println!("No games have been played yet!"),
        Some(best) => {
            println!("High Score: {best}");
            for (rank, score) in store.top_scores().iter().enumerate() {
                println!("{}", ui::format_score_row(rank + 1, score));
            }
        }
    }
}
