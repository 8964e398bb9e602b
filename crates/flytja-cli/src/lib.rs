use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "flytja")]
#[command(about = "Export encoder checkpoints to portable ONNX + tokenizer bundles", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Source checkpoint identifier
    #[arg(long, default_value = "cointegrated/LaBSE-en-ru")]
    pub model: String,

    /// Destination directory, created recursively if absent
    #[arg(long, default_value = "/app/models")]
    pub out: PathBuf,

    /// ONNX opset version passed through to the export engine
    #[arg(long, default_value_t = 13)]
    pub opset: u32,

    /// Maximum sequence length recorded in the tokenizer configuration
    #[arg(long = "max_len", default_value_t = 256)]
    pub max_len: usize,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress the summary output
    #[arg(short, long)]
    pub quiet: bool,
}
