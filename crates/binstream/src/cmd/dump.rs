use binstream::TypedStream;
use serde::Serialize;

use crate::cmd::{checked_offset, DumpArgs};
use crate::exit::{stream_error, CliResult, SUCCESS};
use crate::output::{dump_line, dump_table, hex_row, print_raw, OutputFormat, DUMP_ROW_WIDTH};

#[derive(Serialize)]
struct DumpOutput {
    schema_id: &'static str,
    path: String,
    offset: u64,
    length: usize,
    hex: String,
}

pub fn run(args: DumpArgs, format: OutputFormat) -> CliResult<i32> {
    let mut stream =
        TypedStream::open(&args.path).map_err(|err| stream_error("open failed", err))?;
    stream
        .set_position(checked_offset(args.offset)?)
        .map_err(|err| stream_error("seek failed", err))?;

    let data = match args.length {
        Some(length) => stream
            .read_bytes(length as usize)
            .map_err(|err| stream_error("read failed", err))?,
        None => stream
            .read_all()
            .map_err(|err| stream_error("read failed", err))?,
    };

    match format {
        OutputFormat::Json => {
            let out = DumpOutput {
                schema_id: "https://schemas.3leaps.dev/binstream/cli/v1/dump.schema.json",
                path: args.path.display().to_string(),
                offset: args.offset,
                length: data.len(),
                hex: hex_row(&data),
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            println!("{}", dump_table(args.offset, &data));
        }
        OutputFormat::Pretty => {
            for (index, row) in data.chunks(DUMP_ROW_WIDTH).enumerate() {
                let offset = args.offset + (index * DUMP_ROW_WIDTH) as u64;
                println!("{}", dump_line(offset, row));
            }
        }
        OutputFormat::Raw => {
            print_raw(&data);
        }
    }

    Ok(SUCCESS)
}
