use anyhow::{bail, Context};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use encoding_rs::Encoding;
use lingo_engine::api::{check_invariants, sweep};
use lingo_engine::tables::{
    attack_complexity_bonus, attack_pronunciation_bonus, defense_complexity_bonus,
    defense_pronunciation_bonus, Points,
};
use lingo_engine::{
    BalanceConfig, CombatActionInput, CombatActionResult, CombatRequest, ComplexityLevel,
    ItemClass, PronunciationAssessment, Rating, TurnType,
};
use std::{fs, path::Path, path::PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Copy, Clone, ValueEnum)]
enum Turn {
    Attack,
    Defense,
}

#[derive(Copy, Clone, ValueEnum)]
enum Item {
    Regular,
    Special,
}

#[derive(Subcommand)]
enum Cmd {
    /// Resolve a single attack or defense turn
    Resolve {
        /// Turn type
        #[arg(long, value_enum)]
        turn: Turn,
        /// Equipped item class
        #[arg(long, value_enum, default_value_t = Item::Regular)]
        item: Item,
        /// Raw pronunciation score (0..=100)
        #[arg(long)]
        score: f64,
        /// Rating: excellent | good | okay | needs-improvement
        #[arg(long)]
        rating: String,
        /// Complexity tier of the vocabulary item (1..=5)
        #[arg(long)]
        complexity: u8,
        /// The answer card was revealed before resolution
        #[arg(long, default_value_t = false)]
        revealed: bool,
        /// Override the base value taken from the balance config
        #[arg(long)]
        base: Option<f64>,
        /// Built-in balance preset
        #[arg(long, default_value = "standard")]
        preset: String,
        /// Balance file (JSON or YAML); takes precedence over --preset
        #[arg(long)]
        balance: Option<PathBuf>,
        /// Print the full result as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Resolve a JSON request file (snake_case fields, string enums)
    Request {
        #[arg(long)]
        file: PathBuf,
        /// Print the full result as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print every bonus table
    Tables,
    /// Resolve every combination for a score and check the combat invariants
    Sweep {
        /// Raw pronunciation score (0..=100)
        #[arg(long, default_value_t = 75.0)]
        score: f64,
        /// Base value used for every turn
        #[arg(long, default_value_t = 40.0)]
        base: f64,
        /// Print each resolved formula
        #[arg(long, default_value_t = false)]
        list: bool,
    },
    /// Print the resolved balance config as JSON
    Balance {
        #[arg(long, default_value = "standard")]
        preset: String,
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

#[derive(Parser)]
#[command(name = "lingo")]
#[command(about = "Pronunciation combat engine harness")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    cmd: Cmd,
}

fn to_turn(t: Turn) -> TurnType {
    match t {
        Turn::Attack => TurnType::Attack,
        Turn::Defense => TurnType::Defense,
    }
}

fn to_item(i: Item) -> ItemClass {
    match i {
        Item::Regular => ItemClass::Regular,
        Item::Special => ItemClass::Special,
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_text_auto(path: &Path) -> anyhow::Result<String> {
    let bytes = fs::read(path)?;
    if let Some((enc, bom_len)) = Encoding::for_bom(&bytes) {
        let (cow, _, _) = enc.decode(&bytes[bom_len..]);
        Ok(cow.into_owned())
    } else {
        Ok(String::from_utf8(bytes)?)
    }
}

fn load_balance(preset: &str, file: Option<&Path>) -> anyhow::Result<BalanceConfig> {
    match file {
        Some(path) => BalanceConfig::load(path)
            .with_context(|| format!("failed to load balance file: {}", path.display())),
        None => BalanceConfig::builtin(preset)
            .with_context(|| format!("failed to load balance preset: {}", preset)),
    }
}

fn print_result(res: &CombatActionResult, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(res)?);
        return Ok(());
    }
    println!("{}", res.formula());
    println!(
        "{} damage={:.1} multiplier={:.2} pronunciation={:+.2} complexity={:+.2} revealed={} clamped={}",
        res.turn_type,
        res.final_damage,
        res.multiplier,
        res.pronunciation_bonus,
        res.complexity_bonus,
        res.reveal_penalty_applied,
        res.clamp_applied
    );
    Ok(())
}

fn print_tables() {
    let row = |label: String, p: Points| println!("  {:<20} {:+.2}", label, p.as_fraction());

    println!("attack pronunciation");
    for rating in Rating::ALL {
        row(rating.to_string(), attack_pronunciation_bonus(rating));
    }
    println!("attack complexity");
    for level in ComplexityLevel::ALL {
        row(format!("level {}", level.get()), attack_complexity_bonus(level));
    }
    for class in ItemClass::ALL {
        println!("defense pronunciation ({})", class);
        for rating in Rating::ALL {
            row(rating.to_string(), defense_pronunciation_bonus(class, rating));
        }
    }
    println!("defense complexity");
    for level in ComplexityLevel::ALL {
        row(format!("level {}", level.get()), defense_complexity_bonus(level));
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Cmd::Resolve {
            turn,
            item,
            score,
            rating,
            complexity,
            revealed,
            base,
            preset,
            balance,
            json,
        } => {
            let turn_type = to_turn(turn);
            let item_class = to_item(item);
            let base_value = match base {
                Some(b) => b,
                None => {
                    let cfg = load_balance(&preset, balance.as_deref())?;
                    match turn_type {
                        TurnType::Attack => cfg.attack_base(item_class),
                        TurnType::Defense => cfg.defense_base(),
                    }
                }
            };
            debug!(base_value, turn = %turn_type, item = %item_class, "using base value");
            let input = CombatActionInput {
                turn_type,
                item_class,
                assessment: PronunciationAssessment {
                    raw_score: score,
                    rating: rating.parse()?,
                },
                complexity,
                card_revealed: revealed,
                base_value,
            };
            let res = lingo_engine::resolve(input)?;
            print_result(&res, json)?;
        }
        Cmd::Request { file, json } => {
            let text = read_text_auto(&file)
                .with_context(|| format!("failed to read request: {}", file.display()))?;
            let req: CombatRequest = serde_json::from_str(&text)
                .with_context(|| format!("failed to parse request JSON: {}", file.display()))?;
            let res = lingo_engine::resolve_request(req)?;
            print_result(&res, json)?;
        }
        Cmd::Tables => print_tables(),
        Cmd::Sweep { score, base, list } => {
            let entries = sweep(score, base)?;
            let mut violations = 0usize;
            for e in &entries {
                if list {
                    println!(
                        "{:<7} {:<7} {:<17} L{} revealed={:<5} {}",
                        e.input.turn_type,
                        e.input.item_class,
                        e.input.assessment.rating,
                        e.input.complexity,
                        e.input.card_revealed,
                        e.result.formula()
                    );
                }
                for v in check_invariants(&e.input, &e.result) {
                    violations += 1;
                    eprintln!("[VIOLATION] {}", v);
                }
            }
            println!(
                "checked {} combinations at score {}: {} violations",
                entries.len(),
                score,
                violations
            );
            if violations > 0 {
                bail!("{} invariant violations", violations);
            }
        }
        Cmd::Balance { preset, file } => {
            let cfg = load_balance(&preset, file.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&cfg)?);
        }
    }
    Ok(())
}
