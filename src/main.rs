use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};

use debate_threads::config::Config;
use debate_threads::debate::DebateFixtures;
use debate_threads::models::{load_messages, Message, SenderType, ViewMode};
use debate_threads::summary::ThreadSummary;
use debate_threads::{organize, reply_preview, tracing_init};

#[derive(Parser, Debug)]
#[command(version, about = "Threaded views of multi-agent debate transcripts", long_about = None)]
struct Args {
    #[clap(short, long, global = true, help = "TOML configuration file")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a transcript (JSON array of messages) in display order
    Show {
        path: PathBuf,
        #[clap(short, long, value_enum, help = "Defaults to the configured mode")]
        mode: Option<ViewMode>,
        #[clap(short, long, help = "Emit the organized messages as JSON")]
        json: bool,
        #[clap(short, long, help = "Show only the thread and participation summary")]
        analysis_only: bool,
    },
    /// Pick the next debate speaker round-robin and print its briefing
    NextSpeaker {
        debate_id: String,
        #[clap(long, help = "Transcript so far; empty if omitted")]
        history: Option<PathBuf>,
    },
}

fn main() {
    tracing_init::init_tracing();
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = Config::load(args.config.as_deref()).context("loading configuration")?;

    match args.command {
        Command::Show { path, mode, json, analysis_only } => {
            show(&config, &path, mode.unwrap_or(config.default_mode), json, analysis_only)
        }
        Command::NextSpeaker { debate_id, history } => {
            next_speaker(&config, &debate_id, history.as_deref())
        }
    }
}

fn show(config: &Config, path: &Path, mode: ViewMode, json: bool, analysis_only: bool) -> anyhow::Result<()> {
    let messages = load_messages(path).with_context(|| format!("reading {}", path.display()))?;
    let organized = organize(&messages, mode);

    if json {
        println!("{}", serde_json::to_string_pretty(&organized)?);
        return Ok(());
    }

    let summary = ThreadSummary::from_organized(&organized);
    if !analysis_only {
        println!("{} messages, {} view", organized.len(), mode);
        for message in &organized {
            print_message(config, &organized, message, mode);
        }
        summary.print_summary();
    }
    summary.print_participation_analysis();
    Ok(())
}

fn print_message(config: &Config, all: &[Message], message: &Message, mode: ViewMode) {
    let depth = match mode {
        ViewMode::Threaded => message.thread_depth.unwrap_or(0),
        ViewMode::Chronological => 0,
    };
    let indent = " ".repeat(depth * config.indent_width);
    let marker = match message.sender_type {
        SenderType::Ai => "🤖",
        SenderType::Human => "🙂",
        SenderType::System => "⚙",
        SenderType::Viewer => "👀",
    };

    println!();
    if mode == ViewMode::Threaded && depth > 0 {
        if let Some(preview) = reply_preview(all, message, config.preview_chars) {
            println!("{}↳ Replying to: {}", indent, preview);
        }
    }
    println!(
        "{}{} {} ({}) [{}] {}",
        indent,
        marker,
        message.sender_name,
        message.sender_type.as_str(),
        message.timestamp.format("%H:%M"),
        message.id
    );
    for line in message.content.lines() {
        println!("{}  {}", indent, line);
    }
}

fn next_speaker(config: &Config, debate_id: &str, history: Option<&Path>) -> anyhow::Result<()> {
    let fixtures = match config.fixtures_path() {
        Some(path) => DebateFixtures::load(&path)
            .with_context(|| format!("reading debate fixtures {}", path.display()))?,
        None => DebateFixtures::builtin(),
    };
    let debate = fixtures.get(debate_id)?;

    let history_len = match history {
        Some(path) => load_messages(path)
            .with_context(|| format!("reading {}", path.display()))?
            .len(),
        None => 0,
    };

    let speaker = debate.next_speaker(history_len)?;
    let profile = speaker.agent.profile();
    println!("Debate: {}", debate.title);
    println!(
        "Next speaker after {} messages: {}, {} ({} / {})",
        history_len,
        profile.name,
        profile.speciality,
        profile.provider.as_str(),
        profile.model
    );
    println!("\n{}", debate.system_prompt(speaker));
    Ok(())
}
