//! I2C EEPROM identification tool.
//!
//! Reads and writes the identification fields directly on the board EEPROM
//! (default: slave 0x50 on `/dev/i2c-1`).
//!
//! Usage: eeprom-i2c --updSRNUM <18 chars> --updMACID 2 --updRD MACID

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{value_parser, Arg};
use clap_num::maybe_hex;
use eeprom_id::backend::I2cBackend;
use eeprom_id::constants::{DEFAULT_I2C_ADDRESS, DEFAULT_I2C_BUS};
use eeprom_id::{cli, EepromTool, I2C_LAYOUT};
use linux_embedded_hal::I2cdev;

fn main() -> ExitCode {
    env_logger::init();

    let mut cmd = cli::command(
        "eeprom-i2c",
        "Edit identification fields on an I2C EEPROM",
        &I2C_LAYOUT,
    )
    .arg(
        Arg::new("bus")
            .long("bus")
            .value_name("PATH")
            .help("I2C bus device node")
            .default_value(DEFAULT_I2C_BUS)
            .value_parser(value_parser!(PathBuf)),
    )
    .arg(
        Arg::new("address")
            .long("address")
            .value_name("ADDR")
            .help("7-bit EEPROM slave address (decimal or 0x-prefixed hex)")
            .value_parser(maybe_hex::<u8>),
    );
    let Some(matches) = cli::parse_from(&mut cmd, std::env::args_os()) else {
        return ExitCode::SUCCESS;
    };

    let bus = matches
        .get_one::<PathBuf>("bus")
        .cloned()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_I2C_BUS));
    let address = matches
        .get_one::<u8>("address")
        .copied()
        .unwrap_or(DEFAULT_I2C_ADDRESS);

    let dev = match I2cdev::new(&bus) {
        Ok(dev) => dev,
        Err(e) => {
            eprintln!("Failed to open the I2C bus: {e}");
            return ExitCode::from(1);
        }
    };
    let backend = match I2cBackend::new(dev, address) {
        Ok(backend) => backend,
        Err(e) => {
            eprintln!("Failed to acquire bus access and/or talk to slave: {e}");
            return ExitCode::from(1);
        }
    };
    log::debug!("opened {} for slave 0x{address:02X}", bus.display());

    let mut tool = EepromTool::new(I2C_LAYOUT, backend);
    if let Err(e) = tool.load() {
        eprintln!("Failed to read EEPROM data: {e}");
        return ExitCode::from(1);
    }

    let commands = cli::commands(&matches, &I2C_LAYOUT);
    match cli::run(
        &mut tool,
        &commands,
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    ) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("failed to write output: {e}");
            ExitCode::FAILURE
        }
    }
}
