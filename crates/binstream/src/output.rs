use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

/// Bytes per hex dump row.
pub const DUMP_ROW_WIDTH: usize = 16;

/// Render bytes as a classic offset/hex/ASCII dump table.
pub fn dump_table(start_offset: u64, data: &[u8]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["OFFSET", "HEX", "ASCII"]);

    for (index, row) in data.chunks(DUMP_ROW_WIDTH).enumerate() {
        let offset = start_offset + (index * DUMP_ROW_WIDTH) as u64;
        table.add_row(vec![
            format!("{offset:#010x}"),
            hex_row(row),
            ascii_row(row),
        ]);
    }

    table
}

/// One dump line in `offset  hex  |ascii|` form.
pub fn dump_line(offset: u64, row: &[u8]) -> String {
    format!("{offset:#010x}  {:47}  |{}|", hex_row(row), ascii_row(row))
}

pub fn hex_row(row: &[u8]) -> String {
    row.iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn ascii_row(row: &[u8]) -> String {
    row.iter()
        .map(|&b| {
            if b.is_ascii_graphic() || b == b' ' {
                b as char
            } else {
                '.'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_row_formats_bytes() {
        assert_eq!(hex_row(&[0x00, 0xAB, 0x10]), "00 ab 10");
    }

    #[test]
    fn ascii_row_masks_non_printable() {
        assert_eq!(ascii_row(b"a\x00b\x7f "), "a.b. ");
    }

    #[test]
    fn dump_line_is_aligned() {
        let line = dump_line(0x10, b"hi");
        assert!(line.starts_with("0x00000010"));
        assert!(line.ends_with("|hi|"));
    }
}
