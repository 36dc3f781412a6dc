use std::env;
use std::path::PathBuf;

use debate_threads::models::{load_messages, save_messages};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    if args.len() != 4 {
        eprintln!("Usage: {} <input.json> <output.json> <sample_percentage>", args[0]);
        eprintln!("Example: sample_messages transcript.json sample.json 10");
        std::process::exit(1);
    }

    let input_path = PathBuf::from(&args[1]);
    let output_path = PathBuf::from(&args[2]);
    let sample_percentage: f32 = args[3].parse()
        .map_err(|_| "Sample percentage must be a number")?;

    if sample_percentage <= 0.0 || sample_percentage > 100.0 {
        eprintln!("Sample percentage must be between 0 and 100");
        std::process::exit(1);
    }

    println!("Sampling {}% of messages from {} to {}",
             sample_percentage, input_path.display(), output_path.display());

    let messages = load_messages(&input_path)?;
    let total_messages = messages.len();
    println!("Total messages in source: {}", total_messages);

    let sample_size = ((total_messages as f32) * (sample_percentage / 100.0)) as usize;
    let step = if sample_size > 0 { total_messages / sample_size } else { 1 };
    let step = step.max(1);
    println!("Taking every {}th message", step);

    // Replies whose parent is not sampled become orphans in the output.
    let sampled: Vec<_> = messages.into_iter().step_by(step).collect();
    save_messages(&output_path, &sampled)?;

    println!("Sampled {} messages into {}", sampled.len(), output_path.display());

    Ok(())
}
