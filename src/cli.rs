use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// File containing the grammar and the words to test (default: standard input)
    pub file: Option<PathBuf>,

    /// Character that ends each section of the input (default: ^)
    #[arg(short, long, value_name = "CHAR")]
    pub sentinel: Option<char>,

    /// Do not prompt for input
    #[arg(short, long)]
    pub quiet: bool,

    /// Print the grammar in Chomsky normal form before testing words
    #[arg(long)]
    pub show_normalized: bool,

    /// Random words of the language to print before testing (default: 0)
    #[arg(short = 'n', long, value_name = "AMOUNT")]
    pub sample: Option<usize>
}
