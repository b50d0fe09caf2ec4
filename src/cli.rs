//! Command-line front end shared by both binaries.
//!
//! Flags are generated from the active [`Layout`], so the product ID options
//! only exist where the layout stores one. Operations run in the order they
//! appear on the command line, and each mutating operation persists before
//! the next one starts.
//!
//! Long options may be written with one or two dashes (`-updRD SRNUM` and
//! `--updRD SRNUM`), with the value either as the next argument or after `=`.
//! Unrecognized options do not stop the run: each one prints the usage banner
//! at its position and the remaining operations still execute.

use std::ffi::OsString;
use std::io::{self, Write};

use clap::error::ErrorKind;
use clap::{crate_version, Arg, ArgAction, ArgMatches};

use crate::backend::Backend;
use crate::eeprom::{mac, Field, Layout};
use crate::error::Error;
use crate::hexdump::hex_dump;
use crate::tool::{EepromTool, FieldValue};

/// Long option for reading a field back.
pub const READ_FLAG: &str = "updRD";

/// Hidden option that carries unrecognized arguments through clap, so they
/// keep their place among the real operations.
const UNRECOGNIZED: &str = "unrecognized-option";

/// One operation requested on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `--upd<FIELD> <value>` for a text field.
    Update(Field, String),
    /// `--updMACID <count>`.
    UpdateMacIds(String),
    /// `--clear<FIELD>`.
    Clear(Field),
    /// `--updRD <SELECTOR>`.
    Read(String),
    /// An option that is not recognized or is missing its value.
    Unrecognized(String),
}

fn update_help(field: Field) -> &'static str {
    match field {
        Field::SerialNumber => "Write the 18-character serial number",
        Field::BoardSerialNumber => "Write the 18-character board serial number",
        Field::ProductId => "Write the 12-character product ID",
        Field::MacIds => "Assign 1-3 generated MAC IDs",
    }
}

fn update_value_name(field: Field) -> &'static str {
    match field {
        Field::SerialNumber => "SERIAL_NUMBER",
        Field::BoardSerialNumber => "BOARD_SERIAL_NUMBER",
        Field::ProductId => "PRODUCT_ID",
        Field::MacIds => "COUNT",
    }
}

fn usage_placeholder(field: Field) -> &'static str {
    match field {
        Field::SerialNumber => "<new_serial_number>",
        Field::BoardSerialNumber => "<new_board_serial_number>",
        Field::ProductId => "<new_product_id>",
        Field::MacIds => "<num_of_macids>",
    }
}

fn clear_help(field: Field) -> &'static str {
    match field {
        Field::SerialNumber => "Zero the serial number",
        Field::BoardSerialNumber => "Zero the board serial number",
        Field::ProductId => "Zero the product ID",
        Field::MacIds => "Zero all MAC ID slots",
    }
}

/// Build the clap command for `layout`.
///
/// Binaries add their own configuration options on top.
pub fn command(name: &'static str, about: &'static str, layout: &Layout) -> clap::Command {
    let mut cmd = clap::Command::new(name).version(crate_version!()).about(about);
    for desc in layout.fields() {
        let field = desc.field;
        cmd = cmd
            .arg(
                Arg::new(field.update_flag())
                    .long(field.update_flag())
                    .value_name(update_value_name(field))
                    .help(update_help(field))
                    .allow_hyphen_values(true)
                    .action(ArgAction::Append),
            )
            .arg(
                // Repeatable: every occurrence is its own clear operation
                Arg::new(field.clear_flag())
                    .long(field.clear_flag())
                    .help(clear_help(field))
                    .num_args(0)
                    .default_missing_value("true")
                    .action(ArgAction::Append),
            );
    }
    cmd.arg(
        Arg::new(READ_FLAG)
            .long(READ_FLAG)
            .value_name("PARAMETER")
            .help("Print a field: SRNUM, BSRNUM, PID or MACID")
            .allow_hyphen_values(true)
            .action(ArgAction::Append),
    )
    .arg(
        Arg::new(UNRECOGNIZED)
            .long(UNRECOGNIZED)
            .num_args(1)
            .allow_hyphen_values(true)
            .hide(true)
            .action(ArgAction::Append),
    )
}

/// The usage banner for `layout`, listing every operation flag.
pub fn usage(layout: &Layout) -> String {
    let mut line = String::from("Usage: [OPTIONS]");
    for desc in layout.fields() {
        let field = desc.field;
        line.push_str(&format!(" --{} {}", field.update_flag(), usage_placeholder(field)));
    }
    for desc in layout.fields() {
        line.push_str(&format!(" --{}", desc.field.clear_flag()));
    }
    line.push_str(&format!(" --{READ_FLAG} <parameter>"));
    line
}

fn find_arg<'a>(cmd: &'a clap::Command, name: &str) -> Option<&'a Arg> {
    let mut chars = name.chars();
    let short = match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    };
    cmd.get_arguments()
        .find(|arg| arg.get_long() == Some(name) || (short.is_some() && arg.get_short() == short))
}

fn takes_value(arg: &Arg) -> bool {
    arg.get_num_args().is_some_and(|range| range.takes_values())
}

fn unrecognized(out: &mut Vec<OsString>, token: String) {
    log::debug!("unrecognized argument {token:?}");
    out.push(format!("--{UNRECOGNIZED}").into());
    out.push(token.into());
}

/// Rewrite `args` into the canonical `--long [value]` form clap expects.
///
/// Single-dash long options are accepted, a known option always takes the
/// next argument as its value, and anything unrecognized is routed through
/// the hidden [`UNRECOGNIZED`] option. Non-option operands are ignored.
fn normalize(cmd: &clap::Command, args: Vec<OsString>) -> Vec<OsString> {
    let mut out = Vec::with_capacity(args.len());
    let mut args = args.into_iter();
    out.extend(args.next());

    while let Some(token) = args.next() {
        let text = token.to_string_lossy().into_owned();
        if text == "--" {
            log::debug!("ignoring operands after --");
            break;
        }
        let Some(stripped) = text
            .strip_prefix("--")
            .or_else(|| text.strip_prefix('-'))
            .filter(|s| !s.is_empty())
        else {
            log::debug!("ignoring operand {text:?}");
            continue;
        };
        let (name, inline) = match stripped.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (stripped, None),
        };

        let Some(arg) = find_arg(cmd, name) else {
            unrecognized(&mut out, text);
            continue;
        };
        let flag: OsString = match (arg.get_long(), arg.get_short()) {
            (Some(long), _) => format!("--{long}").into(),
            (None, Some(short)) => format!("-{short}").into(),
            (None, None) => {
                unrecognized(&mut out, text);
                continue;
            }
        };

        if takes_value(arg) {
            let value = match inline {
                Some(value) => Some(OsString::from(value)),
                None => args.next(),
            };
            match value {
                Some(value) => {
                    out.push(flag);
                    out.push(value);
                }
                None => unrecognized(&mut out, text),
            }
        } else if inline.is_some() {
            unrecognized(&mut out, text);
        } else {
            out.push(flag);
        }
    }
    out
}

/// Parse `args` with `cmd`.
///
/// Unrecognized options become [`Command::Unrecognized`] entries instead of
/// errors. Help and version requests are printed and yield `None`. Any other
/// parse error (for example a malformed `--address`) prints the error and the
/// usage line and also yields `None`; the caller exits successfully.
pub fn parse_from<I, T>(cmd: &mut clap::Command, args: I) -> Option<ArgMatches>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    cmd.build();
    let args = normalize(cmd, args.into_iter().map(Into::into).collect());
    match cmd.try_get_matches_from_mut(args) {
        Ok(matches) => Some(matches),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            None
        }
        Err(e) => {
            log::debug!("argument error: {:?}", e.kind());
            let _ = e.print();
            println!("{}", cmd.render_usage());
            None
        }
    }
}

/// Values of `id` paired with their command-line positions.
fn occurrences<'a>(matches: &'a ArgMatches, id: &str) -> Vec<(usize, &'a String)> {
    match (matches.indices_of(id), matches.get_many::<String>(id)) {
        (Some(indices), Some(values)) => indices.zip(values).collect(),
        _ => Vec::new(),
    }
}

/// Collect the operations in `matches` in command-line order.
pub fn commands(matches: &ArgMatches, layout: &Layout) -> Vec<Command> {
    let mut ordered: Vec<(usize, Command)> = Vec::new();

    for desc in layout.fields() {
        let field = desc.field;
        for (index, value) in occurrences(matches, field.update_flag()) {
            let cmd = match field {
                Field::MacIds => Command::UpdateMacIds(value.clone()),
                _ => Command::Update(field, value.clone()),
            };
            ordered.push((index, cmd));
        }
        for (index, _) in occurrences(matches, field.clear_flag()) {
            ordered.push((index, Command::Clear(field)));
        }
    }

    for (index, value) in occurrences(matches, READ_FLAG) {
        ordered.push((index, Command::Read(value.clone())));
    }
    for (index, value) in occurrences(matches, UNRECOGNIZED) {
        ordered.push((index, Command::Unrecognized(value.clone())));
    }

    ordered.sort_by_key(|(index, _)| *index);
    ordered.into_iter().map(|(_, cmd)| cmd).collect()
}

/// Print the whole image as a hex dump.
pub fn print_dump<B: Backend>(tool: &EepromTool<B>, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "EEPROM Hex Dump:")?;
    writeln!(out, "{}", hex_dump(tool.image().raw_buf()))
}

/// Persist `field`, reporting the outcome.
fn persist<B: Backend>(
    tool: &mut EepromTool<B>,
    field: Field,
    out: &mut impl Write,
    err: &mut impl Write,
) -> io::Result<()> {
    match tool.commit(field) {
        Ok(()) => {
            if let Some(notice) = B::COMMIT_NOTICE {
                writeln!(out, "{notice}")?;
            }
        }
        Err(e) => {
            log::debug!("commit of {field:?} failed: {e:?}");
            writeln!(err, "Failed to save EEPROM data: {e}")?;
        }
    }
    Ok(())
}

/// Report an operation that failed before anything was persisted.
fn report(e: Error, out: &mut impl Write, err: &mut impl Write) -> io::Result<()> {
    if e.is_validation() {
        writeln!(out, "{e}")
    } else {
        writeln!(err, "Failed to read EEPROM data: {e}")
    }
}

/// Execute `commands` in order.
///
/// User-facing messages go to `out`; storage failures go to `err`. A failed
/// operation is reported and skipped, and later operations still run. The
/// only error returned is a failure to write the messages themselves.
pub fn run<B: Backend>(
    tool: &mut EepromTool<B>,
    commands: &[Command],
    out: &mut impl Write,
    err: &mut impl Write,
) -> io::Result<()> {
    for command in commands {
        log::debug!("running {command:?}");
        match command {
            Command::Update(field, value) => match tool.update(*field, value) {
                Ok(()) => {
                    writeln!(out, "{} updated successfully: {value}", field.label())?;
                    print_dump(tool, out)?;
                    persist(tool, *field, out, err)?;
                }
                Err(e) => report(e, out, err)?,
            },
            Command::UpdateMacIds(arg) => {
                let ids = match mac::parse_count(arg).and_then(|n| tool.update_mac_ids(n)) {
                    Ok(ids) => ids,
                    Err(e) => {
                        report(e, out, err)?;
                        continue;
                    }
                };
                for (i, id) in ids.iter().enumerate() {
                    writeln!(out, "MAC ID {} updated successfully: {id}", i + 1)?;
                }
                print_dump(tool, out)?;
                persist(tool, Field::MacIds, out, err)?;
            }
            Command::Clear(field) => match tool.clear(*field) {
                Ok(()) => {
                    writeln!(out, "{} cleared.", field.label())?;
                    persist(tool, *field, out, err)?;
                    print_dump(tool, out)?;
                }
                Err(e) => report(e, out, err)?,
            },
            Command::Read(selector) => match tool.read(selector) {
                Ok((field, FieldValue::Text(text))) => {
                    writeln!(out, "{}: {text}", field.label())?;
                }
                Ok((_, FieldValue::MacIds(slots))) => {
                    for (i, slot) in slots.iter().enumerate() {
                        writeln!(out, "MAC ID {}: {slot}", i + 1)?;
                    }
                }
                Err(e) => report(e, out, err)?,
            },
            Command::Unrecognized(option) => {
                writeln!(err, "unrecognized option '{option}'")?;
                writeln!(out, "{}", usage(tool.layout()))?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eeprom::{FILE_LAYOUT, I2C_LAYOUT};

    fn parse(layout: &Layout, args: &[&str]) -> Vec<Command> {
        let mut cmd = command("eeprom-tool", "test", layout);
        let matches =
            parse_from(&mut cmd, std::iter::once("eeprom-tool").chain(args.iter().copied()))
                .unwrap();
        commands(&matches, layout)
    }

    #[test]
    fn preserves_command_line_order() {
        let cmds = parse(
            &FILE_LAYOUT,
            &[
                "--updRD",
                "SRNUM",
                "--clearPID",
                "--updSRNUM",
                "SRN000000000000001",
                "--updMACID",
                "2",
                "--updRD",
                "MACID",
            ],
        );
        assert_eq!(
            cmds,
            [
                Command::Read("SRNUM".into()),
                Command::Clear(Field::ProductId),
                Command::Update(Field::SerialNumber, "SRN000000000000001".into()),
                Command::UpdateMacIds("2".into()),
                Command::Read("MACID".into()),
            ]
        );
    }

    #[test]
    fn repeated_clears_each_run_in_place() {
        let cmds = parse(
            &FILE_LAYOUT,
            &[
                "--clearSRNUM",
                "--updSRNUM",
                "SRN000000000000001",
                "--clearSRNUM",
                "--clearMACID",
                "--clearMACID",
            ],
        );
        assert_eq!(
            cmds,
            [
                Command::Clear(Field::SerialNumber),
                Command::Update(Field::SerialNumber, "SRN000000000000001".into()),
                Command::Clear(Field::SerialNumber),
                Command::Clear(Field::MacIds),
                Command::Clear(Field::MacIds),
            ]
        );
    }

    #[test]
    fn unknown_flag_keeps_its_place() {
        let cmds = parse(
            &FILE_LAYOUT,
            &["--updPID", "PRODUCT00001", "--bogus", "--updRD", "PID"],
        );
        assert_eq!(
            cmds,
            [
                Command::Update(Field::ProductId, "PRODUCT00001".into()),
                Command::Unrecognized("--bogus".into()),
                Command::Read("PID".into()),
            ]
        );
    }

    #[test]
    fn single_dash_long_options() {
        let cmds = parse(
            &FILE_LAYOUT,
            &["-updRD", "SRNUM", "-clearPID", "-updMACID=3", "--updRD=MACID"],
        );
        assert_eq!(
            cmds,
            [
                Command::Read("SRNUM".into()),
                Command::Clear(Field::ProductId),
                Command::UpdateMacIds("3".into()),
                Command::Read("MACID".into()),
            ]
        );
    }

    #[test]
    fn update_value_may_start_with_a_dash() {
        let cmds = parse(&FILE_LAYOUT, &["--updBSRNUM", "-BSN0000000000001", "--updRD", "-x"]);
        assert_eq!(
            cmds,
            [
                Command::Update(Field::BoardSerialNumber, "-BSN0000000000001".into()),
                Command::Read("-x".into()),
            ]
        );
    }

    #[test]
    fn missing_value_or_stray_value_is_unrecognized() {
        let cmds = parse(&FILE_LAYOUT, &["--clearSRNUM=yes", "stray", "--updSRNUM"]);
        assert_eq!(
            cmds,
            [
                Command::Unrecognized("--clearSRNUM=yes".into()),
                Command::Unrecognized("--updSRNUM".into()),
            ]
        );
    }

    #[test]
    fn no_flags_no_commands() {
        assert!(parse(&FILE_LAYOUT, &[]).is_empty());
        assert!(parse(&FILE_LAYOUT, &["--", "--clearPID"]).is_empty());
    }

    #[test]
    fn i2c_layout_has_no_product_id_flags() {
        let cmds = parse(&I2C_LAYOUT, &["--clearPID", "--updPID", "PRODUCT00001"]);
        assert_eq!(
            cmds,
            [
                Command::Unrecognized("--clearPID".into()),
                Command::Unrecognized("--updPID".into()),
            ]
        );
    }

    #[test]
    fn usage_lists_layout_flags() {
        let file = usage(&FILE_LAYOUT);
        assert!(file.starts_with("Usage: "));
        assert!(file.contains(" --updSRNUM <new_serial_number>"));
        assert!(file.contains(" --updPID <new_product_id>"));
        assert!(file.contains(" --updMACID <num_of_macids>"));
        assert!(file.contains(" --clearBSRNUM"));
        assert!(file.ends_with(" --updRD <parameter>"));

        let i2c = usage(&I2C_LAYOUT);
        assert!(!i2c.contains("PID"));
        assert!(i2c.contains(" --clearMACID"));
    }

    #[test]
    fn help_is_not_a_match() {
        let mut cmd = command("eeprom-tool", "test", &FILE_LAYOUT);
        assert!(parse_from(&mut cmd, ["eeprom-tool", "--version"]).is_none());
    }
}
