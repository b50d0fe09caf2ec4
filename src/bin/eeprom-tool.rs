//! File-backed EEPROM identification tool.
//!
//! Edits the simulated EEPROM image in `eeprom_data.bin` (or `--image`).
//! With no operation flags, prints a hex dump of the image.
//!
//! Usage: eeprom-tool --updSRNUM <18 chars> --updPID <12 chars> --updRD SRNUM

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{value_parser, Arg};
use eeprom_id::backend::FileBackend;
use eeprom_id::constants::DEFAULT_IMAGE_PATH;
use eeprom_id::{cli, EepromTool, FILE_LAYOUT};

fn main() -> ExitCode {
    env_logger::init();

    let mut cmd = cli::command(
        "eeprom-tool",
        "Edit identification fields in a simulated EEPROM image file",
        &FILE_LAYOUT,
    )
    .arg(
        Arg::new("image")
            .long("image")
            .value_name("PATH")
            .help("EEPROM image file")
            .default_value(DEFAULT_IMAGE_PATH)
            .value_parser(value_parser!(PathBuf)),
    );
    let Some(matches) = cli::parse_from(&mut cmd, std::env::args_os()) else {
        return ExitCode::SUCCESS;
    };

    let path = matches
        .get_one::<PathBuf>("image")
        .cloned()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_IMAGE_PATH));
    let mut tool = EepromTool::new(FILE_LAYOUT, FileBackend::new(path));
    if let Err(e) = tool.load() {
        eprintln!("Failed to load EEPROM data: {e}");
    }

    let commands = cli::commands(&matches, &FILE_LAYOUT);
    let result = if commands.is_empty() {
        cli::print_dump(&tool, &mut io::stdout().lock())
    } else {
        cli::run(
            &mut tool,
            &commands,
            &mut io::stdout().lock(),
            &mut io::stderr().lock(),
        )
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("failed to write output: {e}");
            ExitCode::FAILURE
        }
    }
}
