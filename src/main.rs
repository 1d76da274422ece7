//! ChronoLock CLI - drive a lock-picking session from the terminal
//!
//! Usage:
//!   chronolock                                  # Interactive pin-tumbler session
//!   chronolock --variant rotary --cursed        # Cursed rotary puzzle
//!   chronolock --time-limit 30 --seed 7         # Timed, deterministic secrets
//!   chronolock --script run.txt --json          # Replay a command file as JSON
//!
//! Commands: start, turn <delta>, commit, back, reset, wait <secs>,
//! hr <bpm>, status, quit.

use clap::Parser;
use std::cell::Cell;
use std::fs;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

use chronolock::core::{parse_command, Command, ScriptError};
use chronolock::core::{BiometricSource, FeedbackSink, LockEngine, ProgressionSink};
use chronolock::types::{IntensityTier, LockChallenge, LockEvent, LockVariant, SessionState};
use chronolock::{TICK_CADENCE_SECS, VERSION};

#[derive(Parser, Debug)]
#[command(
    name = "chronolock",
    version = VERSION,
    about = "ChronoLock - pick virtual locks with crown rotations",
    long_about = "Drives one lock-picking session of the ChronoLock simulation core.\n\n\
                  Feed crown rotations with 'turn <delta>', lock stages in with\n\
                  'commit', and advance the clock with 'wait <secs>'. Cursed locks\n\
                  read the simulated heart rate set via 'hr <bpm>'.\n\n\
                  Variants:\n  \
                  pin     Pin tumbler - raise each pin to its sweet spot\n  \
                  dial    Dial combination - step each dial to its digit\n  \
                  rotary  Rotary puzzle - rotate each ring to its phase"
)]
struct Args {
    /// Lock variant: pin, dial, or rotary
    #[arg(short, long, default_value = "pin")]
    variant: LockVariant,

    /// Lock difficulty (clamped to the variant's stage range)
    #[arg(short, long, default_value_t = 3)]
    difficulty: u32,

    /// Cursed lock: heart rate feeds input noise
    #[arg(short, long)]
    cursed: bool,

    /// Time limit in seconds (untimed if omitted)
    #[arg(short, long)]
    time_limit: Option<f64>,

    /// RNG seed for deterministic secrets and noise
    #[arg(long)]
    seed: Option<u64>,

    /// Run commands from a file instead of stdin
    #[arg(long)]
    script: Option<String>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Show per-input resistance and tick cues
    #[arg(long)]
    verbose: bool,
}

/// Feedback sink that renders event cues to the terminal
struct TerminalFeedback {
    no_color: bool,
    verbose: bool,
    json: bool,
}

impl TerminalFeedback {
    fn paint(&self, code: &str, text: &str) {
        if self.no_color {
            println!("{}", text);
        } else {
            println!("{}{}\x1b[0m", code, text);
        }
    }
}

impl FeedbackSink for TerminalFeedback {
    fn on_event(&mut self, event: &LockEvent) {
        if self.json {
            if event.is_edge() || self.verbose {
                println!("{}", serde_json::to_string(event).unwrap_or_default());
            }
            return;
        }

        match event {
            LockEvent::Tick => {
                if self.verbose {
                    self.paint("\x1b[90m", "  · tick");
                }
            }
            LockEvent::ZoneEntered { stage } => {
                self.paint("\x1b[32m", &format!("  ✓ stage {} in the sweet spot", stage + 1));
            }
            LockEvent::ZoneLeft { stage } => {
                self.paint("\x1b[33m", &format!("  ↘ stage {} slipped out", stage + 1));
            }
            LockEvent::Resistance { magnitude } => {
                if self.verbose {
                    let weight = if *magnitude < 0.3 { "light" } else { "heavy" };
                    self.paint("\x1b[90m", &format!("  resistance={:.2} ({})", magnitude, weight));
                }
            }
            LockEvent::StageCommitted { stage } => {
                self.paint("\x1b[32m", &format!("  ● stage {} set", stage + 1));
            }
            LockEvent::Rejected => {
                self.paint("\x1b[31m", "  ✗ not aligned - commit refused");
            }
            LockEvent::Warning { remaining_secs } => {
                self.paint("\x1b[31m", &format!("  ⏰ {:.0}s left", remaining_secs));
            }
            LockEvent::Succeeded { variant } => {
                self.paint("\x1b[32m", &format!("  ✓ LOCK OPEN - {}", variant));
            }
            LockEvent::Failed => {
                self.paint("\x1b[31m", "  ✗ time expired - the lock resets");
            }
        }
    }
}

/// Progression sink that announces the unlock
struct ConsoleProgression {
    no_color: bool,
}

impl ProgressionSink for ConsoleProgression {
    fn report_unlock(&mut self, challenge: &LockChallenge) {
        let line = format!(
            "UNLOCKED: {} (difficulty {})",
            challenge.variant, challenge.difficulty
        );
        if self.no_color {
            println!("{}", line);
        } else {
            println!("\x1b[1m\x1b[32m{}\x1b[0m", line);
        }
    }
}

/// Biometric source backed by the bpm set with the `hr` command
struct ScriptedBiometric {
    bpm: Rc<Cell<f64>>,
}

impl BiometricSource for ScriptedBiometric {
    fn intensity_tier(&self) -> IntensityTier {
        IntensityTier::from_bpm(self.bpm.get())
    }

    fn is_active(&self) -> bool {
        self.bpm.get() > 0.0
    }
}

fn main() {
    let args = Args::parse();

    let mut challenge = LockChallenge::new(args.variant, args.difficulty);
    if args.cursed {
        challenge = challenge.cursed();
    }
    if let Some(limit) = args.time_limit {
        challenge = challenge.with_time_limit(limit);
    }

    let bpm = Rc::new(Cell::new(0.0));
    let feedback = Box::new(TerminalFeedback {
        no_color: args.no_color,
        verbose: args.verbose,
        json: args.json,
    });
    let progression = Box::new(ConsoleProgression {
        no_color: args.no_color,
    });
    let biometric = Box::new(ScriptedBiometric { bpm: bpm.clone() });

    let mut engine = match args.seed {
        Some(seed) => LockEngine::with_seed(challenge, seed, feedback, progression, biometric),
        None => LockEngine::new(challenge, feedback, progression, biometric),
    };

    if let Some(ref path) = args.script {
        run_script(path, &mut engine, &bpm, &args);
    } else {
        run_interactive(&mut engine, &bpm, &args);
    }
}

/// Run interactive mode - read commands from stdin
fn run_interactive(engine: &mut LockEngine, bpm: &Rc<Cell<f64>>, args: &Args) {
    print_header(args);

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{}", format_prompt(engine, args.no_color));
        let _ = stdout.flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => break,
        }

        match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => {
                execute(engine, bpm, command, args);
                print_status(engine, args);
            }
            Err(ScriptError::Empty) => continue,
            Err(err) => eprintln!("  {}", err),
        }
    }

    println!();
    println!(
        "Session ended: {} | progress {:.0}%",
        engine.state(),
        engine.progress() * 100.0
    );
}

/// Run script mode - replay commands from a file
fn run_script(path: &str, engine: &mut LockEngine, bpm: &Rc<Cell<f64>>, args: &Args) {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            eprintln!("cannot read script '{}': {}", path, err);
            std::process::exit(1);
        }
    };

    for (lineno, line) in content.lines().enumerate() {
        match parse_command(line) {
            Ok(Command::Quit) => break,
            Ok(command) => {
                execute(engine, bpm, command, args);
                print_status(engine, args);
            }
            Err(ScriptError::Empty) => continue,
            Err(err) => eprintln!("{}:{}: {}", path, lineno + 1, err),
        }
    }
}

/// Apply one command to the engine
fn execute(engine: &mut LockEngine, bpm: &Rc<Cell<f64>>, command: Command, args: &Args) {
    match command {
        Command::Start => engine.start(),
        Command::Turn(delta) => engine.apply_input(delta),
        Command::Commit => engine.commit_active_stage(),
        Command::Back => engine.retreat(),
        Command::Reset => engine.reset_active_stage(),
        Command::Wait(secs) => {
            let ticks = (secs / TICK_CADENCE_SECS).round() as u64;
            for _ in 0..ticks {
                engine.tick(TICK_CADENCE_SECS);
            }
        }
        Command::HeartRate(value) => {
            bpm.set(value);
            let tier = IntensityTier::from_bpm(value);
            if !args.json {
                let color = if args.no_color { "" } else { tier.color_code() };
                let reset = if args.no_color { "" } else { "\x1b[0m" };
                println!("{}  ♥ {:.0} bpm ({}){}", color, value, tier, reset);
            }
        }
        Command::Status | Command::Quit => {}
    }
}

/// Print the session status in the selected output mode
fn print_status(engine: &LockEngine, args: &Args) {
    let status = engine.status();
    if args.json {
        println!("{}", serde_json::to_string(&status).unwrap_or_default());
    } else if args.no_color {
        println!("{}", status.to_parseable_string());
    } else {
        println!("{}", status.to_terminal_string());
    }
}

/// Print header
fn print_header(args: &Args) {
    if args.json {
        return;
    }
    println!("========================================");
    println!("  ChronoLock v{} - {}", VERSION, args.variant);
    println!("========================================");
    println!("Type commands to pick the lock. 'start' begins the attempt,");
    println!("'turn <delta>' rotates the crown, 'commit' sets an aligned stage.");
    if args.time_limit.is_some() {
        println!("The clock only moves when you 'wait <secs>'.");
    }
    if args.cursed {
        println!("This lock is cursed: set your heart rate with 'hr <bpm>'.");
    }
    println!("Type 'quit' to exit.");
    println!();
}

/// Format the interactive prompt from the engine state
fn format_prompt(engine: &LockEngine, no_color: bool) -> String {
    let state = engine.state();
    let stage = engine.active_stage() + 1;
    let count = engine.stage_count();

    if no_color {
        format!("[{} {}/{}] > ", state, stage, count)
    } else {
        format!(
            "{}{} [{} {}/{}]{} > ",
            state.color_code(),
            state.emoji(),
            state,
            stage,
            count,
            SessionState::color_reset()
        )
    }
}
