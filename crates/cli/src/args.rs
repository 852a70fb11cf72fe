//! Command-line flags and their mapping onto [`Options`].

use std::path::PathBuf;

use clap::Parser;
use swaggen_core::Options;
use swaggen_core::options::{DEFAULT_CONVERTER, DEFAULT_TEMPLATE_DIR};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "swaggen",
    version,
    about = "Generate source code from a Swagger 1.2 API declaration"
)]
pub struct Args {
    #[arg(
        short = 'i',
        long = "input",
        value_name = "PATH_OR_URL",
        required_unless_present = "list_converters",
        help = "Swagger document to read, as a local path or http(s) URL"
    )]
    pub input: Option<String>,
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        required_unless_present = "list_converters",
        help = "Folder the generated files are written to"
    )]
    pub output: Option<PathBuf>,
    #[arg(
        short = 'n',
        long = "namespace",
        required_unless_present = "list_converters",
        help = "Namespace passed to the templates"
    )]
    pub namespace: Option<String>,
    #[arg(
        short = 'm',
        long = "model",
        default_value = DEFAULT_CONVERTER,
        help = "Converter to use (see --list-converters)"
    )]
    pub model: String,
    #[arg(short = 'u', long = "username", help = "Basic auth user for remote documents")]
    pub username: Option<String>,
    #[arg(short = 'p', long = "password", help = "Basic auth password for remote documents")]
    pub password: Option<String>,
    #[arg(long = "prefix", default_value = "", help = "Prefix for every output file name")]
    pub prefix: String,
    #[arg(
        short = 's',
        long = "single-file",
        value_name = "FILE",
        help = "Append all output into this one file instead of one file per unit"
    )]
    pub single_file: Option<String>,
    #[arg(
        short = 't',
        long = "template-prefix",
        default_value = "",
        help = "Prefix for ModelTemplate.txt and ActionTemplate.txt"
    )]
    pub template_prefix: String,
    #[arg(
        long = "template-dir",
        value_name = "DIR",
        default_value = DEFAULT_TEMPLATE_DIR,
        help = "Folder the templates are read from"
    )]
    pub template_dir: PathBuf,
    #[arg(long = "list-converters", help = "Print the registered converter keys and exit")]
    pub list_converters: bool,
}

impl Args {
    /// Build run options. Returns `None` when a required flag is absent,
    /// which clap only allows together with `--list-converters`.
    pub fn into_options(self) -> Option<Options> {
        let mut options = Options::new(self.input?, self.namespace?, self.output?);
        options.converter = self.model;
        options.username = self.username;
        options.password = self.password;
        options.output_prefix = self.prefix;
        options.single_file_name = self.single_file;
        options.template_prefix = self.template_prefix;
        options.template_dir = self.template_dir;
        Some(options)
    }
}
