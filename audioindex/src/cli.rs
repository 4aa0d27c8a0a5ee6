use std::path::PathBuf;

use audioindex_core::{DEFAULT_DATASET_NAME, DEFAULT_EXTENSION, DEFAULT_TOOL};
use clap::{value_parser, Arg, ArgAction, Command};

pub fn build_cli() -> Command {
    Command::new(env!("CARGO_PKG_NAME"))
        .about("Inventory audio recordings into a dataset summary table")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("dataset-name")
                .short('n')
                .long("dataset-name")
                .value_name("NAME")
                .help("Dataset label written in the first column of every row")
                .default_value(DEFAULT_DATASET_NAME),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("PATH")
                .help("Where to write the report (defaults to dataset_files.csv in the input directory)")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("extension")
                .short('e')
                .long("extension")
                .value_name("EXT")
                .help("File extension a recording must carry, without the dot")
                .default_value(DEFAULT_EXTENSION),
        )
        .arg(
            Arg::new("tool")
                .short('t')
                .long("tool")
                .value_name("TOOL")
                .help("Audio inspection tool used for duration and sample rate queries")
                .default_value(DEFAULT_TOOL),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .help("List the recordings that would be inventoried without querying or writing anything")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("input_dir")
                .value_name("INPUT_DIR")
                .help("Directory containing the recordings")
                .default_value(".")
                .value_parser(value_parser!(PathBuf)),
        )
}
