use binstream::TypedStream;
use serde::Serialize;

use crate::cmd::InfoArgs;
use crate::exit::{stream_error, CliResult, SUCCESS};
use crate::output::OutputFormat;

#[derive(Serialize)]
struct InfoOutput {
    schema_id: &'static str,
    path: String,
    length_bytes: u64,
    remaining_bytes: u64,
    empty: bool,
}

pub fn run(args: InfoArgs, format: OutputFormat) -> CliResult<i32> {
    let mut stream =
        TypedStream::open(&args.path).map_err(|err| stream_error("open failed", err))?;
    let length = stream
        .len()
        .map_err(|err| stream_error("stat failed", err))?;
    // Freshly opened, so this is the remaining count from offset 0.
    let remaining = stream
        .remaining()
        .map_err(|err| stream_error("stat failed", err))?;

    let out = InfoOutput {
        schema_id: "https://schemas.3leaps.dev/binstream/cli/v1/file-info.schema.json",
        path: args.path.display().to_string(),
        length_bytes: length,
        remaining_bytes: remaining,
        empty: length == 0,
    };

    print_info(&out, format);
    Ok(SUCCESS)
}

fn print_info(out: &InfoOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table | OutputFormat::Pretty => {
            println!("File Info:");
            println!("  Path:       {}", out.path);
            println!("  Length:     {} bytes", out.length_bytes);
            println!("  Remaining:  {} bytes", out.remaining_bytes);
            println!("  Empty:      {}", out.empty);
        }
        OutputFormat::Raw => {
            println!("{}", out.length_bytes);
        }
    }
}
