use clap::Parser;
use crossterm::style::Stylize;
use kartochki::{
    config::{Config, ConfigStore, FileConfigStore},
    deck::{self, Deck},
    history::HistoryLog,
    session::{AnswerPort, Session, QUIT_SENTINEL},
    study::{self, StudyMode},
};
use rand::thread_rng;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// terminal flashcard trainer
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A terminal flashcard trainer: JSON word/translation decks, three study directions, shuffled quizzing with inline mistake re-drilling, and a session history log."
)]
struct Cli {
    /// directory to scan for deck files
    #[clap(long)]
    decks_dir: Option<PathBuf>,

    /// learn a single deck file directly, skipping the menu
    #[clap(short = 'd', long)]
    deck: Option<PathBuf>,

    /// study mode used with --deck
    #[clap(short = 'm', long, value_enum)]
    mode: Option<StudyMode>,
}

fn main() {
    let cli = Cli::parse();

    let store = FileConfigStore::new();
    let mut config = store.load();
    if let Some(dir) = cli.decks_dir {
        config.decks_dir = dir;
    }

    let stdin = io::stdin();
    let mut reader = stdin.lock();

    if let Some(path) = cli.deck {
        let name = deck::deck_name_from_path(&path);
        match Deck::load(name, &path) {
            Ok(deck) => {
                let mode = cli.mode.unwrap_or(config.default_mode);
                learn(&deck, mode, &mut reader);
            }
            Err(e) => {
                eprintln!("{}", format!("Failed to load deck: {e}").red());
                std::process::exit(1);
            }
        }
        return;
    }

    main_menu(&mut reader, &config);
}

/// Print `prompt_text` and block for one line. None on EOF or a broken stdin.
fn read_line(reader: &mut dyn BufRead, prompt_text: &str) -> Option<String> {
    print!("{prompt_text}");
    let _ = io::stdout().flush();

    let mut line = String::new();
    match reader.read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line),
    }
}

fn main_menu(reader: &mut dyn BufRead, config: &Config) {
    loop {
        println!();
        println!("{}", "=".repeat(40));
        println!("Welcome to kartochki!");
        println!("{}", "=".repeat(40));
        println!("Pick an option:");
        println!("1. Profile (in progress)");
        println!("2. Add deck");
        println!("3. Learn decks");
        println!("4. Exit");

        let Some(choice) = read_line(reader, "Enter a number (1-4): ") else {
            return;
        };

        match choice.trim() {
            "1" => show_profile(),
            "2" => add_deck(reader),
            "3" => learn_menu(reader, config),
            "4" => {
                println!("Goodbye!");
                return;
            }
            _ => println!("{}", "Invalid choice, try again.".red()),
        }
    }
}

fn show_profile() {
    println!("In progress");
}

/// Prompt for a name and a file path, then load the deck to verify it.
fn add_deck(reader: &mut dyn BufRead) {
    println!();
    println!("Adding a new deck");

    let Some(name) = read_line(reader, "Deck display name (q to go back): ") else {
        return;
    };
    let name = name.trim().to_string();
    if name.eq_ignore_ascii_case(QUIT_SENTINEL) {
        return;
    }

    let Some(path) = read_line(reader, "Path to the JSON file (e.g. decks/words.json): ") else {
        return;
    };
    let path = path.trim().to_string();
    if path.eq_ignore_ascii_case(QUIT_SENTINEL) {
        return;
    }

    match Deck::load(name, &path) {
        Ok(deck) => println!(
            "{}",
            format!(
                "Deck '{}' loaded successfully ({} cards). Keep it under the decks directory to study it.",
                deck.name,
                deck.cards.len()
            )
            .green()
        ),
        Err(e) => println!("{}", format!("Failed to load deck: {e}").red()),
    }
}

fn learn_menu(reader: &mut dyn BufRead, config: &Config) {
    println!();
    println!("Pick a deck to study");

    let files = match deck::find_deck_files(&config.decks_dir) {
        Ok(files) => files,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            println!(
                "Decks directory '{}' not found; only the built-in deck is available.",
                config.decks_dir.display()
            );
            Vec::new()
        }
        Err(e) => {
            println!(
                "{}",
                format!(
                    "Could not read decks directory '{}': {e}",
                    config.decks_dir.display()
                )
                .red()
            );
            return;
        }
    };

    println!("Available decks:");
    println!("1. starter (built-in)");
    for (i, file) in files.iter().enumerate() {
        println!("{}. {}", i + 2, file.display());
    }
    let back = files.len() + 2;
    println!("{back}. Back to main menu");

    let Some(choice) = read_line(reader, "Pick a deck number: ") else {
        return;
    };
    let selected = match choice.trim().parse::<usize>() {
        Ok(n) if (1..=back).contains(&n) => n,
        _ => {
            println!("{}", "Invalid choice.".red());
            return;
        }
    };

    if selected == back {
        return;
    }

    let deck = if selected == 1 {
        Deck::starter()
    } else {
        let path = &files[selected - 2];
        match Deck::load(deck::deck_name_from_path(path), path) {
            Ok(deck) => deck,
            Err(e) => {
                println!("{}", format!("Failed to load deck: {e}").red());
                return;
            }
        }
    };

    if deck.cards.is_empty() {
        println!("{}", "Deck is empty, nothing to study.".red());
        return;
    }

    let mode = select_mode(reader);
    learn(&deck, mode, reader);
}

/// Unrecognized input falls back to word -> translation, with a warning.
fn select_mode(reader: &mut dyn BufRead) -> StudyMode {
    println!("Choose a study mode:");
    println!("1. {}", StudyMode::WordToTranslation);
    println!("2. {}", StudyMode::TranslationToWord);
    println!("3. {}", StudyMode::Both);

    let choice = read_line(reader, "Enter a number (1-3): ").unwrap_or_default();
    match StudyMode::parse_choice(&choice) {
        Some(mode) => mode,
        None => {
            println!(
                "{}",
                format!("Unrecognized choice, using {}", StudyMode::WordToTranslation).yellow()
            );
            StudyMode::WordToTranslation
        }
    }
}

fn learn(deck: &Deck, mode: StudyMode, reader: &mut dyn BufRead) {
    let study_cards = study::expand(deck, mode);
    if study_cards.is_empty() {
        println!("Deck {} has no cards to study.", deck.name);
        return;
    }

    println!(
        "Learning deck {} in mode {} ({} cards)",
        deck.name,
        mode,
        study_cards.len()
    );
    println!("Type your answer after each question; {QUIT_SENTINEL} ends the session early.");

    let session = Session::new(study_cards, &mut thread_rng());
    let mut port = StdioPort { reader };
    let result = session.run(&mut port);

    println!();
    println!(
        "Result: {}/{} ({:.0}%) in {}s",
        result.correct,
        result.total,
        result.accuracy(),
        result.elapsed.as_secs()
    );

    if !result.incorrect.is_empty() {
        println!("Still to master:");
        for study_card in &result.incorrect {
            if let Some(card) = study_card.source_card(deck) {
                println!("  {} = {}", card.word, card.translation);
            }
        }
    }

    if let Some(log) = HistoryLog::new() {
        let _ = log.append(&deck.name, mode, &result);
    }
}

/// AnswerPort over stdin/stdout. EOF maps to the quit sentinel so a closed
/// pipe ends the session instead of hanging it.
struct StdioPort<'a> {
    reader: &'a mut dyn BufRead,
}

impl AnswerPort for StdioPort<'_> {
    fn prompt(&mut self, question: &str) -> String {
        print!("{}: ", question.bold());
        let _ = io::stdout().flush();

        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) | Err(_) => QUIT_SENTINEL.to_string(),
            Ok(_) => line,
        }
    }

    fn notify(&mut self, message: &str) {
        if message.starts_with("Correct!") {
            println!("{}", message.green());
        } else if message.starts_with("Wrong!") || message.starts_with("Still wrong!") {
            println!("{}", message.red());
        } else {
            println!("{message}");
        }
    }
}
