use vectrace::{VectorizeResult, Vectorizer};

use crate::cli::AnalyzeCommand;

use super::utils::load_rgba;

/// The main function to run the analyze command.
pub fn run(cmd: AnalyzeCommand) -> VectorizeResult<()> {
    let image = load_rgba(&cmd.input)?;
    let (width, height) = image.dimensions();
    let analysis = Vectorizer::analyze(image.as_raw(), width, height)?;

    println!("threshold:  {}", analysis.threshold);
    println!("foreground: {}", analysis.foreground_count);
    println!("background: {}", analysis.background_count);

    Ok(())
}
