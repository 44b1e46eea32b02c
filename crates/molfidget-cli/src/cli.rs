use clap::Parser;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "The molfidget developers",
    version,
    about = "molfidget - Turn a PDB or MOL file into 3-D printable ball-and-shaft pieces.",
    help_template = HELP_TEMPLATE,
)]
pub struct Cli {
    /// Path to the input molecule (.pdb or .mol).
    #[arg(value_name = "FILE")]
    pub file_name: String,

    /// Millimetres per Angstrom in the exported meshes [default: 10.0]
    #[arg(long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub scale: Option<f64>,

    /// Clearance between separate pieces, in millimetres [default: 0.2]
    #[arg(long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub shaft_gap: Option<f64>,

    /// Directory that receives the exported files [default: output]
    #[arg(long, value_name = "PATH")]
    pub output_dir: Option<PathBuf>,

    /// Show the model in an external viewer before exporting.
    #[arg(long)]
    pub show_gui: bool,

    /// TOML file with shape parameters (kebab-case keys).
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Viewer program used with --show-gui.
    #[arg(long, value_name = "PROGRAM", env = "MOLFIDGET_VIEWER", default_value = "f3d")]
    pub viewer: String,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}
