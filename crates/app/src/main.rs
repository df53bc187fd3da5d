use std::fmt;
use std::io::{self, BufRead, Write};

use log::info;
use services::{
    Clock, QuizError, QuizMachine, QuizPhase, QuizSession, SubmitOutcome, cheatsheet_entries,
    validate_all_templates,
};
use study_core::model::{QuizSettings, QuizSettingsDraft, SectionFilter};

const DEFAULT_ITERATIONS: u32 = 50;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidSeed { raw: String },
    InvalidNumber { flag: &'static str, raw: String },
    Settings(study_core::model::SettingsError),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
            ArgsError::InvalidNumber { flag, raw } => write!(f, "invalid {flag} value: {raw}"),
            ArgsError::Settings(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- quiz     [--seed <u32>] [--section <all|quant|verbal|integrated>] [--partial-credit <bool>]");
    eprintln!("  cargo run -p app -- dump     [--seed <u32>] [--section <filter>] [--attempt <n>] [--cheatsheet]");
    eprintln!("  cargo run -p app -- validate [--seed <u32>] [--iterations <n>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --seed derived from the current time");
    eprintln!("  --section all");
    eprintln!("  --iterations {DEFAULT_ITERATIONS}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  STUDY_SEED, STUDY_SECTION, STUDY_PARTIAL_CREDIT, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Quiz,
    Dump,
    Validate,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "quiz" => Some(Self::Quiz),
            "dump" => Some(Self::Dump),
            "validate" => Some(Self::Validate),
            _ => None,
        }
    }
}

struct Args {
    seed: u32,
    settings: QuizSettings,
    attempt: u32,
    iterations: u32,
    cheatsheet: bool,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut seed = std::env::var("STUDY_SEED")
            .ok()
            .and_then(|value| value.trim().parse::<u32>().ok());
        let mut draft = QuizSettingsDraft {
            partial_credit: std::env::var("STUDY_PARTIAL_CREDIT").ok(),
            default_filter: std::env::var("STUDY_SECTION").ok(),
        };
        let mut attempt = 0;
        let mut iterations = DEFAULT_ITERATIONS;
        let mut cheatsheet = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--seed" => {
                    let value = require_value(args, "--seed")?;
                    let parsed = value
                        .trim()
                        .parse()
                        .map_err(|_| ArgsError::InvalidSeed { raw: value.clone() })?;
                    seed = Some(parsed);
                }
                "--section" => draft.default_filter = Some(require_value(args, "--section")?),
                "--partial-credit" => {
                    draft.partial_credit = Some(require_value(args, "--partial-credit")?);
                }
                "--attempt" => attempt = parse_number(args, "--attempt")?,
                "--iterations" => iterations = parse_number(args, "--iterations")?,
                "--cheatsheet" => cheatsheet = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let settings = draft.validate().map_err(ArgsError::Settings)?;
        let seed = seed.unwrap_or_else(|| Clock::default_clock().base_seed());
        Ok(Self {
            seed,
            settings,
            attempt,
            iterations,
            cheatsheet,
        })
    }
}

fn parse_number(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<u32, ArgsError> {
    let value = require_value(args, flag)?;
    value
        .trim()
        .parse()
        .map_err(|_| ArgsError::InvalidNumber { flag, raw: value })
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // No subcommand means an interactive quiz.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Quiz,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Quiz,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            io::Error::new(io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };
    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(&mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    info!("running {cmd:?} with base seed {}", parsed.seed);

    match cmd {
        Command::Quiz => run_quiz(&parsed),
        Command::Dump => run_dump(&parsed),
        Command::Validate => run_validate(&parsed),
    }
}

fn run_dump(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let session = QuizSession::generate(args.seed, args.attempt, args.settings.default_filter())?;
    let json = if args.cheatsheet {
        serde_json::to_string_pretty(&cheatsheet_entries(session.questions()))?
    } else {
        serde_json::to_string_pretty(&session)?
    };
    println!("{json}");
    Ok(())
}

fn run_validate(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let report = validate_all_templates(args.seed, args.iterations);
    println!("{report}");
    if report.is_clean() {
        Ok(())
    } else {
        Err(io::Error::other(format!("{} template instances failed", report.failures.len())).into())
    }
}

//
// ─── INTERACTIVE QUIZ ──────────────────────────────────────────────────────────
//

fn run_quiz(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut machine = QuizMachine::new(args.seed, args.settings.clone());
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut prompt = |label: &str| -> io::Result<Option<String>> {
        print!("{label}");
        io::stdout().flush()?;
        lines.next().transpose().map(|line| line.map(|l| l.trim().to_lowercase()))
    };

    machine.start()?;
    loop {
        match machine.phase() {
            QuizPhase::NotStarted => break,
            QuizPhase::SectionSelect => {
                let Some(input) = prompt("Section [all/quant/verbal/integrated, q to quit]: ")?
                else {
                    break;
                };
                if input == "q" {
                    machine.quit();
                    continue;
                }
                let filter = if input.is_empty() {
                    machine.settings().default_filter()
                } else {
                    match input.parse::<SectionFilter>() {
                        Ok(filter) => filter,
                        Err(err) => {
                            println!("{err}");
                            continue;
                        }
                    }
                };
                match machine.begin(filter) {
                    Ok(()) => println!("\n{} questions. Two wrong answers restart the quiz.", machine.total()),
                    Err(QuizError::NoQuestions { filter }) => {
                        println!("No questions available for {filter}. Pick another section.");
                    }
                    Err(err) => return Err(err.into()),
                }
            }
            QuizPhase::InProgress => {
                if let Some(step) = machine.current_step().cloned() {
                    let progress = machine.progress();
                    println!("\n[step {}/{}] {}", progress.step_index + 1, progress.step_count, step.prompt);
                    print_choices(&step.choices);
                    let Some(input) = prompt("Answer (letter, enter to skip, q to quit): ")? else {
                        break;
                    };
                    if input == "q" {
                        machine.quit();
                        continue;
                    }
                    if let Some(index) = parse_choice(&input) {
                        match machine.check_step(index) {
                            Ok(true) => println!("Correct."),
                            Ok(false) => println!("Not quite. It is {}.", step.correct_value),
                            Err(err) => {
                                println!("{err}");
                                continue;
                            }
                        }
                    }
                    machine.advance_step()?;
                    continue;
                }

                let Some(question) = machine.current_question().cloned() else {
                    break;
                };
                println!(
                    "\nQuestion {}/{} ({:.0}% done)\n{}",
                    machine.q_index() + 1,
                    machine.total(),
                    machine.progress().fraction() * 100.0,
                    question.final_question()
                );
                print_choices(question.final_choices());
                let Some(input) = prompt("Answer (letter, q to quit): ")? else {
                    break;
                };
                if input == "q" {
                    machine.quit();
                    continue;
                }
                match machine.submit_answer(parse_choice(&input)) {
                    Ok(SubmitOutcome::Correct { credit, .. }) => {
                        println!("Correct! +{credit} (score {})", machine.score());
                    }
                    Ok(SubmitOutcome::Incorrect { attempts_left }) => {
                        println!("Incorrect. {attempts_left} try left before the quiz restarts.");
                    }
                    Ok(SubmitOutcome::Restarted {
                        revealed_answer, ..
                    }) => {
                        println!("Incorrect again. The answer was {revealed_answer}.");
                        println!("{}", question.cheatsheet().body);
                        println!("Restarting with new questions.");
                    }
                    Err(QuizError::NoSelection | QuizError::InvalidChoice { .. }) => {
                        println!("Pick one of the listed letters.");
                    }
                    Err(err) => return Err(err.into()),
                }
            }
            QuizPhase::Complete => {
                println!("\nQuiz complete! Score: {} / {}", machine.score(), machine.total());
                let Some(input) = prompt("[r]etry, [c]hange section, [q]uit: ")? else {
                    break;
                };
                match input.as_str() {
                    "r" => {
                        machine.retry()?;
                    }
                    "c" => machine.change_section()?,
                    "q" => machine.quit(),
                    _ => println!("Unknown option."),
                }
            }
        }
    }
    Ok(())
}

fn print_choices(choices: &[String]) {
    for (letter, choice) in ('A'..='Z').zip(choices) {
        println!("  {letter}) {choice}");
    }
}

/// Letter (`a`, `b`, ...) or 1-based number to a choice index.
fn parse_choice(input: &str) -> Option<usize> {
    let mut chars = input.chars();
    match (chars.next(), chars.next()) {
        (Some(c @ 'a'..='z'), None) => Some(c as usize - 'a' as usize),
        _ => input.parse::<usize>().ok()?.checked_sub(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_letters_and_numbers() {
        assert_eq!(parse_choice("a"), Some(0));
        assert_eq!(parse_choice("d"), Some(3));
        assert_eq!(parse_choice("2"), Some(1));
        assert_eq!(parse_choice("0"), None);
        assert_eq!(parse_choice(""), None);
        assert_eq!(parse_choice("ab"), None);
    }

    #[test]
    fn flags_override_defaults() {
        let mut args = ["--seed", "42", "--section", "quant", "--partial-credit", "yes"]
            .into_iter()
            .map(String::from);
        let parsed = Args::parse(&mut args).unwrap();
        assert_eq!(parsed.seed, 42);
        assert!(parsed.settings.partial_credit());
        assert_eq!(parsed.settings.default_filter().to_string(), "quant");
    }

    #[test]
    fn rejects_bad_values() {
        let mut args = ["--seed", "nope"].into_iter().map(String::from);
        assert!(matches!(Args::parse(&mut args), Err(ArgsError::InvalidSeed { .. })));
        let mut args = ["--iterations"].into_iter().map(String::from);
        assert!(matches!(
            Args::parse(&mut args),
            Err(ArgsError::MissingValue { flag: "--iterations" })
        ));
    }
}
