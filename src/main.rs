use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;

use hangtui::tui;
use hangtui::words::Dictionary;

#[derive(Parser)]
#[command(version, about = "Hangman in the terminal")]
struct Cli {
    /// Play with a custom word list, one word per line
    #[arg(long, value_name = "FILE")]
    words: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let dictionary = match &cli.words {
        Some(path) => Dictionary::from_file(path).map_err(|e| color_eyre::eyre::eyre!(e))?,
        None => Dictionary::builtin(),
    };

    tui::initialize_panic_handler();
    let mut terminal = tui::init()?;
    let app_result = tui::App::init(Arc::new(dictionary)).run(&mut terminal).await;
    tui::restore()?;
    Ok(app_result?)
}
