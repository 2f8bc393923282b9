//! Interactive game session on stdin.
//!
//! Each input line is one command; replies go to stdout, logs to stderr.
//! A leading `!` is accepted so chat-style input works unchanged.
//!
//! ```text
//! start [day] [mode]      random far game, or game number `day`
//! test_start <secret> [mode]
//! daily [mode]            today's game
//! join [player]           join the current game
//! player <name>           switch who is guessing
//! guess <word>
//! status [n]              top n guesses so far
//! top [n]                 n nearest neighbors of the secret
//! range                   similarity landmarks of the secret
//! session <id>            switch session
//! games                   list active games
//! help | quit
//! ```

use std::sync::Arc;

use clap::Args;
use multimantle_core::config::{Config, GameConfig};
use multimantle_core::format::{
    format_guess_record, format_nearby_word, format_round, format_similarity_range,
    format_status,
};
use multimantle_core::secrets::SecretWords;
use multimantle_core::{
    CoreError, CoreResult, GameMode, GameRegistry, GuessOutcome, PlayerId, SessionId,
    SharedGame, VectorStore,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};

use crate::error::CliExitCode;

const NO_GAME: &str = "No Multimantle game in this session";

const HELP: &str = "\
Commands:
  start [day] [mode]          start a random far game, or game number <day>
  test_start <secret> [mode]  start a game with a chosen secret
  daily [mode]                start today's game
  join [player]               join the current game
  player <name>               switch who is guessing
  guess <word>                submit a guess
  status [n]                  top n guesses so far
  top [n]                     n nearest neighbors of the secret
  range                       similarity landmarks of the secret
  session <id>                switch session
  games                       list active games
  help                        show this text
  quit                        leave";

/// Arguments for the play command.
#[derive(Args, Debug)]
pub struct PlayArgs {
    /// Session games are created in
    #[arg(long, default_value = "local")]
    pub session: String,

    /// Name guesses are submitted under
    #[arg(long, default_value = "player")]
    pub player: String,
}

/// One parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayCommand {
    Start { day: Option<i64>, mode: GameMode },
    TestStart { secret: String, mode: GameMode },
    Daily { mode: GameMode },
    Join { player: Option<String> },
    Player { name: String },
    Guess { word: String },
    Status { n: Option<usize> },
    Top { n: Option<usize> },
    Range,
    Session { id: String },
    Games,
    Help,
    Quit,
}

fn no_word_list() -> CoreError {
    CoreError::ConfigError("no secret word list loaded".into())
}

fn parse_mode(raw: Option<&str>, default_mode: GameMode) -> Result<GameMode, String> {
    match raw {
        None => Ok(default_mode),
        Some(raw) => raw
            .parse()
            .map_err(|_| format!("Unknown mode: {}", raw)),
    }
}

fn parse_count(raw: Option<&str>) -> Result<Option<usize>, String> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    match raw.parse::<i64>() {
        Ok(n) if n > 0 => Ok(Some(n as usize)),
        _ => Err(format!("Invalid n: {}", raw)),
    }
}

/// Parse one input line. Blank lines parse to `None`; the error string is
/// the reply to show.
pub fn parse_line(line: &str, default_mode: GameMode) -> Result<Option<PlayCommand>, String> {
    let line = line.trim();
    let line = line.strip_prefix('!').unwrap_or(line);
    let mut parts = line.split_whitespace();
    let Some(name) = parts.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = parts.collect();

    let command = match name.to_ascii_lowercase().as_str() {
        "start" => {
            let (day, mode_arg) = match args.first() {
                Some(first) => match first.parse::<i64>() {
                    Ok(day) if day > 0 => (Some(day), args.get(1).copied()),
                    Ok(_) => return Err(format!("Invalid game num: {}", first)),
                    Err(_) if first.parse::<GameMode>().is_ok() => (None, Some(*first)),
                    Err(_) => return Err(format!("Invalid game num: {}", first)),
                },
                None => (None, None),
            };
            PlayCommand::Start {
                day,
                mode: parse_mode(mode_arg, default_mode)?,
            }
        }
        "test_start" => {
            let secret = args
                .first()
                .ok_or_else(|| "Usage: test_start <secret> [mode]".to_string())?;
            PlayCommand::TestStart {
                secret: secret.to_string(),
                mode: parse_mode(args.get(1).copied(), default_mode)?,
            }
        }
        "daily" | "semantle_daily_start" => PlayCommand::Daily {
            mode: parse_mode(args.first().copied(), default_mode)?,
        },
        "join" => PlayCommand::Join {
            player: args.first().map(|p| p.to_string()),
        },
        "player" => PlayCommand::Player {
            name: args
                .first()
                .ok_or_else(|| "Usage: player <name>".to_string())?
                .to_string(),
        },
        "guess" => {
            // Spoiler markers around a guess are chat decoration.
            let word = args.join(" ").replace("||", "");
            let word = word.trim();
            if word.is_empty() {
                return Err("Usage: guess <word>".to_string());
            }
            PlayCommand::Guess {
                word: word.to_string(),
            }
        }
        "status" => PlayCommand::Status {
            n: parse_count(args.first().copied())?,
        },
        "top" => PlayCommand::Top {
            n: parse_count(args.first().copied())?,
        },
        "range" => PlayCommand::Range,
        "session" => PlayCommand::Session {
            id: args
                .first()
                .ok_or_else(|| "Usage: session <id>".to_string())?
                .to_string(),
        },
        "games" | "test_status" => PlayCommand::Games,
        "help" => PlayCommand::Help,
        "quit" | "exit" => PlayCommand::Quit,
        other => return Err(format!("Unknown command: {} (try `help`)", other)),
    };
    Ok(Some(command))
}

/// State of one interactive session: the registry plus who is typing where.
pub struct PlaySession {
    registry: GameRegistry,
    secrets: Option<SecretWords>,
    game_config: GameConfig,
    session: SessionId,
    player: PlayerId,
    rng: StdRng,
}

impl PlaySession {
    pub fn new(
        store: Arc<dyn VectorStore>,
        secrets: Option<SecretWords>,
        game_config: GameConfig,
        session: SessionId,
        player: PlayerId,
    ) -> Self {
        Self {
            registry: GameRegistry::new(store),
            secrets,
            game_config,
            session,
            player,
            rng: StdRng::from_entropy(),
        }
    }

    /// Run one command and return the reply text.
    pub async fn execute(&mut self, command: PlayCommand) -> String {
        match self.dispatch(command).await {
            Ok(reply) => reply,
            Err(e) => self.describe_error(e),
        }
    }

    async fn dispatch(&mut self, command: PlayCommand) -> CoreResult<String> {
        match command {
            PlayCommand::Start { day, mode } => {
                let secrets = self.secrets.as_ref().ok_or_else(no_word_list)?;
                let (day, secret) = match day {
                    Some(day) => (day, secrets.secret_for_day(day)?.to_string()),
                    None => {
                        let (day, secret) = secrets.random_far(&mut self.rng)?;
                        (day, secret.to_string())
                    }
                };
                self.registry.create_game(&self.session, &secret, mode).await?;
                Ok(format!(
                    "Starting ({}) Semantle Game #{}! Spoiler Warning!!!",
                    mode, day
                ))
            }
            PlayCommand::TestStart { secret, mode } => {
                let game = self.registry.create_game(&self.session, &secret, mode).await?;
                let game = game.lock().await;
                Ok(format!("Starting game: ||`{}`||", game))
            }
            PlayCommand::Daily { mode } => {
                let (day, secret) = {
                    let (day, secret) = self.require_secrets()?.today()?;
                    (day, secret.to_string())
                };
                self.registry.create_game(&self.session, &secret, mode).await?;
                Ok(format!(
                    "Starting ({}) Semantle Game #{}! Spoiler Warning!!!",
                    mode, day
                ))
            }
            PlayCommand::Join { player } => {
                let name = player.unwrap_or_else(|| self.player.clone());
                let game = self.current_game()?;
                let mut game = game.lock().await;
                if game.add_player(&name) {
                    Ok(format!("Welcome to the game, {}", name))
                } else {
                    Ok(format!("{} is already playing", name))
                }
            }
            PlayCommand::Player { name } => {
                self.player = name;
                Ok(format!("Now guessing as {}", self.player))
            }
            PlayCommand::Guess { word } => {
                let game = self.current_game()?;
                let mut game = game.lock().await;
                match game.guess(&word, &self.player).await? {
                    GuessOutcome::Scored(record) => Ok(format_guess_record(&record)),
                    GuessOutcome::RoundPending => {
                        let waiting: Vec<&str> = game
                            .pending_players()
                            .into_iter()
                            .map(String::as_str)
                            .collect();
                        Ok(format!(
                            "Guess received from {}; waiting on {}",
                            self.player,
                            waiting.join(", ")
                        ))
                    }
                    GuessOutcome::RoundResolved(round) => Ok(format_round(&round)),
                }
            }
            PlayCommand::Status { n } => {
                let n = n.unwrap_or(self.game_config.default_status_count);
                let game = self.current_game()?;
                let game = game.lock().await;
                let records = game.status(n)?;
                if records.is_empty() {
                    return Ok("No guesses yet".to_string());
                }
                Ok(format_status(records))
            }
            PlayCommand::Top { n } => {
                let n = n.unwrap_or(self.game_config.default_top_count);
                let game = self.current_game()?;
                let game = game.lock().await;
                let nearby = game.nearby(n).await?;
                if nearby.is_empty() {
                    return Ok("No neighbors known for this secret".to_string());
                }
                Ok(nearby
                    .iter()
                    .map(format_nearby_word)
                    .collect::<Vec<_>>()
                    .join("\n"))
            }
            PlayCommand::Range => {
                let game = self.current_game()?;
                let game = game.lock().await;
                Ok(match game.similarity_range().await? {
                    Some(range) => format_similarity_range(&range),
                    None => "No similarity range known for this secret".to_string(),
                })
            }
            PlayCommand::Session { id } => {
                self.session = id;
                Ok(format!("Switched to session {}", self.session))
            }
            PlayCommand::Games => {
                let ids = self.registry.session_ids();
                if ids.is_empty() {
                    return Ok("No active games".to_string());
                }
                let mut lines = Vec::with_capacity(ids.len());
                for id in ids {
                    if let Some(game) = self.registry.get_game(&id) {
                        lines.push(format!("||`{}: {}`||", id, game.lock().await));
                    }
                }
                Ok(lines.join("\n"))
            }
            PlayCommand::Help => Ok(HELP.to_string()),
            PlayCommand::Quit => Ok(String::new()),
        }
    }

    fn require_secrets(&self) -> CoreResult<&SecretWords> {
        self.secrets.as_ref().ok_or_else(no_word_list)
    }

    fn current_game(&self) -> CoreResult<SharedGame> {
        self.registry
            .get_game(&self.session)
            .ok_or(CoreError::GameNotStarted)
    }

    fn describe_error(&self, err: CoreError) -> String {
        match err {
            CoreError::WordNotFound { word } => format!("Could not find word {}", word),
            CoreError::PlayerNotRegistered { player } => {
                format!("{} has not joined this game (use `join`)", player)
            }
            CoreError::GameNotStarted => NO_GAME.to_string(),
            CoreError::SecretNotFound { day } => format!("Invalid game num: {}", day),
            other => {
                error!(session = %self.session, error = %other, "Command failed");
                format!("Error: {}", other)
            }
        }
    }
}

/// Execute the play command.
///
/// # Returns
///
/// Exit code:
/// - 0: stdin closed or `quit`
/// - 1: reading stdin failed
pub async fn handle_play(
    args: PlayArgs,
    config: &Config,
    store: Arc<dyn VectorStore>,
) -> i32 {
    let secrets = match SecretWords::load(&config.secrets) {
        Ok(secrets) => Some(secrets),
        Err(e) => {
            warn!("Secret word list unavailable, only test_start will work: {}", e);
            None
        }
    };

    let default_mode = config.game.default_mode;
    let mut session = PlaySession::new(
        store,
        secrets,
        config.game.clone(),
        args.session,
        args.player,
    );
    info!("Ready. Type `help` for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                error!("Failed to read stdin: {}", e);
                return CliExitCode::Error.into();
            }
        };
        match parse_line(&line, default_mode) {
            Ok(None) => continue,
            Ok(Some(PlayCommand::Quit)) => break,
            Ok(Some(command)) => println!("{}", session.execute(command).await),
            Err(reply) => println!("{}", reply),
        }
    }

    CliExitCode::Success.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use multimantle_core::config::SecretsConfig;
    use multimantle_core::stubs::{axis_vector, blend_vector, InMemoryVectorStore};
    use multimantle_core::SimilarityRange;

    fn session_with(secrets: Option<SecretWords>) -> PlaySession {
        let store = InMemoryVectorStore::new()
            .with_vector("ocean", axis_vector(0))
            .with_vector("forest", axis_vector(1))
            .with_vector("wave", blend_vector(0, 0.81))
            .with_vector("sun", blend_vector(0, 0.30))
            .with_vector("moon", blend_vector(0, 0.20))
            .with_neighbor("ocean", "ocean", 1000, 100.0)
            .with_neighbor("ocean", "wave", 42, 81.0)
            .with_neighbor("ocean", "sea", 999, 68.4)
            .with_range(
                "ocean",
                SimilarityRange {
                    top: 68.4,
                    top10: 50.0,
                    rest: 21.25,
                },
            );
        PlaySession::new(
            Arc::new(store),
            secrets,
            GameConfig::default(),
            "test".to_string(),
            "alice".to_string(),
        )
    }

    fn session() -> PlaySession {
        session_with(None)
    }

    fn cmd(line: &str) -> PlayCommand {
        parse_line(line, GameMode::Chaos).unwrap().unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_line("   ", GameMode::Chaos), Ok(None));
        assert_eq!(cmd("!guess Wave"), PlayCommand::Guess { word: "Wave".into() });
        assert_eq!(cmd("guess ||wave||"), PlayCommand::Guess { word: "wave".into() });
        assert_eq!(
            cmd("start 12 simul"),
            PlayCommand::Start {
                day: Some(12),
                mode: GameMode::Simul
            }
        );
        assert_eq!(
            cmd("start turns"),
            PlayCommand::Start {
                day: None,
                mode: GameMode::Turns
            }
        );
        assert_eq!(cmd("status"), PlayCommand::Status { n: None });
        assert_eq!(cmd("top 3"), PlayCommand::Top { n: Some(3) });
        assert_eq!(cmd("QUIT"), PlayCommand::Quit);
    }

    #[test]
    fn test_parse_rejects_bad_counts() {
        assert_eq!(
            parse_line("status 0", GameMode::Chaos),
            Err("Invalid n: 0".to_string())
        );
        assert_eq!(
            parse_line("top -2", GameMode::Chaos),
            Err("Invalid n: -2".to_string())
        );
        assert_eq!(
            parse_line("status many", GameMode::Chaos),
            Err("Invalid n: many".to_string())
        );
        assert_eq!(
            parse_line("start 0", GameMode::Chaos),
            Err("Invalid game num: 0".to_string())
        );
        assert!(parse_line("guess", GameMode::Chaos).is_err());
        assert!(parse_line("dance", GameMode::Chaos).is_err());
        assert!(parse_line("daily frantic", GameMode::Chaos).is_err());
    }

    #[tokio::test]
    async fn test_guess_flow() {
        let mut s = session();
        assert_eq!(s.execute(cmd("guess wave")).await, NO_GAME);

        let reply = s.execute(cmd("test_start ocean")).await;
        assert_eq!(reply, "Starting game: ||`Game \"ocean\": CHAOS, 0 guesses`||");

        assert_eq!(s.execute(cmd("guess Wave")).await, "#1 | wave | 81.00 | 42");
        assert_eq!(s.execute(cmd("guess zzyzx")).await, "Could not find word zzyzx");
        assert_eq!(s.execute(cmd("status")).await, "#1 | wave | 81.00 | 42");
    }

    #[tokio::test]
    async fn test_top_and_range() {
        let mut s = session();
        s.execute(cmd("test_start ocean")).await;

        assert_eq!(
            s.execute(cmd("top 5")).await,
            "#top | sea | 68.40 | 999\n#top | wave | 81.00 | 42"
        );
        assert_eq!(
            s.execute(cmd("range")).await,
            "nearest 68.40 | 10th nearest 50.00 | 1000th nearest 21.25"
        );

        s.execute(cmd("test_start forest")).await;
        assert_eq!(s.execute(cmd("top")).await, "No neighbors known for this secret");
        assert_eq!(s.execute(cmd("status")).await, "No guesses yet");
    }

    #[tokio::test]
    async fn test_simul_round() {
        let mut s = session();
        s.execute(cmd("test_start ocean simul")).await;

        assert_eq!(
            s.execute(cmd("guess sun")).await,
            "alice has not joined this game (use `join`)"
        );
        assert_eq!(s.execute(cmd("join")).await, "Welcome to the game, alice");
        assert_eq!(s.execute(cmd("join")).await, "alice is already playing");
        assert_eq!(s.execute(cmd("join bob")).await, "Welcome to the game, bob");

        assert_eq!(
            s.execute(cmd("guess sun")).await,
            "Guess received from alice; waiting on bob"
        );
        s.execute(cmd("player bob")).await;
        assert_eq!(
            s.execute(cmd("guess moon")).await,
            "alice: #1 | sun | 30.00 | cold\nbob: #2 | moon | 20.00 | cold"
        );
    }

    #[tokio::test]
    async fn test_sessions_are_separate() {
        let mut s = session();
        s.execute(cmd("test_start ocean")).await;
        s.execute(cmd("session other")).await;
        assert_eq!(s.execute(cmd("status")).await, NO_GAME);

        s.execute(cmd("test_start forest")).await;
        let games = s.execute(cmd("games")).await;
        assert!(games.contains("other: Game \"forest\""));
        assert!(games.contains("test: Game \"ocean\""));
    }

    #[tokio::test]
    async fn test_numbered_start_uses_word_list() {
        let secrets = SecretWords::parse("forest\nocean\n", &SecretsConfig::default());
        let mut s = session_with(Some(secrets));

        assert_eq!(
            s.execute(cmd("start 1")).await,
            "Starting (CHAOS) Semantle Game #1! Spoiler Warning!!!"
        );
        assert_eq!(s.execute(cmd("guess wave")).await, "#1 | wave | 81.00 | 42");
        assert_eq!(s.execute(cmd("start 7")).await, "Invalid game num: 7");
    }

    #[tokio::test]
    async fn test_start_without_word_list() {
        let mut s = session();
        let reply = s.execute(cmd("start")).await;
        assert!(reply.contains("no secret word list loaded"));
    }
}
