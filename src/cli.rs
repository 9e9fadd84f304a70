use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to an image of the available ingredients (jpg, jpeg, png)
    #[arg(short, long, conflicts_with = "ingredients")]
    pub image: Option<String>,

    /// Comma-separated ingredient list, skipping the vision step
    #[arg(short = 'n', long)]
    pub ingredients: Option<String>,

    /// Maximum number of ranked recipes to print
    #[arg(short, long, default_value_t = 5)]
    pub top: usize,

    /// Skip the LLM label refinement pass
    #[arg(long)]
    pub no_refine: bool,

    /// Fetch and print full details for the best match
    #[arg(long)]
    pub details: bool,
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
