use anyhow::Result;

use rusty_datalab::data::{stats, synth};

/// Frame statistics demo: seeded random 10×3 integer frame, a derived
/// column D = A + B, summary statistics, and one scalar mean.
fn main() -> Result<()> {
    env_logger::init();

    let frame = synth::random_int_frame(synth::DEMO_SEED, 10, 3);
    println!("Initial frame:");
    frame.show(None);

    let frame = frame.derive("D", |row| &row["A"] + &row["B"])?;
    println!("\nFrame after adding column 'D' (A + B):");
    frame.show(None);

    println!("\nSummary statistics:");
    stats::describe(&frame)?.show(None);

    let mean_c = stats::mean(&frame.numeric_column("C")?);
    println!("\nMean of column 'C': {mean_c}");
    Ok(())
}
