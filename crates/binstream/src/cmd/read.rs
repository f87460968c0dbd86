use binstream::{Codepage, TypedStream};
use serde::Serialize;

use crate::cmd::{checked_offset, ReadArgs, ValueKind};
use crate::exit::{stream_error, CliResult, SUCCESS};
use crate::output::OutputFormat;

#[derive(Serialize)]
struct ReadOutput {
    schema_id: &'static str,
    path: String,
    offset: u64,
    kind: String,
    order: String,
    value: String,
}

pub fn run(args: ReadArgs, format: OutputFormat) -> CliResult<i32> {
    let mut stream =
        TypedStream::open(&args.path).map_err(|err| stream_error("open failed", err))?;
    stream.set_byte_order(args.order.into());
    stream
        .set_position(checked_offset(args.at)?)
        .map_err(|err| stream_error("seek failed", err))?;

    let value = decode_value(&mut stream, args.kind)
        .map_err(|err| stream_error("decode failed", err))?;

    let out = ReadOutput {
        schema_id: "https://schemas.3leaps.dev/binstream/cli/v1/value.schema.json",
        path: args.path.display().to_string(),
        offset: args.at,
        kind: format!("{:?}", args.kind).to_lowercase(),
        order: format!("{:?}", stream.byte_order()).to_lowercase(),
        value,
    };

    print_value(&out, format);
    Ok(SUCCESS)
}

fn decode_value(stream: &mut TypedStream, kind: ValueKind) -> binstream::Result<String> {
    let value = match kind {
        ValueKind::Bool => stream.read_bool()?.to_string(),
        ValueKind::I8 => stream.read_i8()?.to_string(),
        ValueKind::U8 => stream.read_u8()?.to_string(),
        ValueKind::I16 => stream.read_i16()?.to_string(),
        ValueKind::U16 => stream.read_u16()?.to_string(),
        ValueKind::I32 => stream.read_i32()?.to_string(),
        ValueKind::U32 => stream.read_u32()?.to_string(),
        ValueKind::I64 => stream.read_i64()?.to_string(),
        ValueKind::U64 => stream.read_u64()?.to_string(),
        ValueKind::F32 => stream.read_f32()?.to_string(),
        ValueKind::F64 => stream.read_f64()?.to_string(),
        ValueKind::Text => stream.read_text(Codepage::Utf8)?,
        ValueKind::Utf16 => stream.read_utf16()?,
    };
    Ok(value)
}

fn print_value(out: &ReadOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table | OutputFormat::Pretty => {
            println!(
                "offset={:#x} kind={} order={} value={}",
                out.offset, out.kind, out.order, out.value
            );
        }
        OutputFormat::Raw => {
            println!("{}", out.value);
        }
    }
}
