use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

use binstream::ByteOrder;

use crate::exit::{CliError, CliResult, USAGE};
use crate::output::OutputFormat;

pub mod dump;
pub mod info;
pub mod read;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show file length and stream metadata.
    Info(InfoArgs),
    /// Hex-dump a byte range.
    Dump(DumpArgs),
    /// Decode one typed value at an offset.
    Read(ReadArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Info(args) => info::run(args, format),
        Command::Dump(args) => dump::run(args, format),
        Command::Read(args) => read::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct InfoArgs {
    /// File to inspect.
    pub path: PathBuf,
}

#[derive(Args, Debug)]
pub struct DumpArgs {
    /// File to dump.
    pub path: PathBuf,
    /// Byte offset to start from.
    #[arg(long, default_value = "0")]
    pub offset: u64,
    /// Bytes to dump. Default: everything from the offset.
    #[arg(long)]
    pub length: Option<u64>,
}

#[derive(Args, Debug)]
pub struct ReadArgs {
    /// File to read from.
    pub path: PathBuf,
    /// Byte offset of the value.
    #[arg(long, default_value = "0")]
    pub at: u64,
    /// Value kind to decode.
    #[arg(long, value_name = "KIND")]
    pub kind: ValueKind,
    /// Byte order for multi-byte kinds.
    #[arg(long, default_value = "little")]
    pub order: OrderArg,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

/// Decodable value kinds for the `read` subcommand.
#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum ValueKind {
    Bool,
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
    /// Null-terminated UTF-8 string.
    Text,
    /// Null-terminated UTF-16 string (units in the stream's byte order).
    Utf16,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum OrderArg {
    Little,
    Big,
}

impl From<OrderArg> for ByteOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Little => ByteOrder::Little,
            OrderArg::Big => ByteOrder::Big,
        }
    }
}

/// Validate a user-supplied byte offset for seeking.
///
/// Offsets beyond `i64::MAX` cannot be represented as seek positions and
/// are a usage error, not a wrapped negative.
pub fn checked_offset(offset: u64) -> CliResult<i64> {
    i64::try_from(offset)
        .map_err(|_| CliError::new(USAGE, format!("offset {offset} is out of range")))
}
