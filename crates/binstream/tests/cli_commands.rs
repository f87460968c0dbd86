#![cfg(feature = "cli")]

use std::path::PathBuf;
use std::process::Command;

fn unique_temp_dir(tag: &str) -> PathBuf {
    let dir = PathBuf::from(format!(
        "/tmp/binstream-cli-{tag}-{}-{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time should be after epoch")
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
    dir
}

fn binstream() -> Command {
    Command::new(env!("CARGO_BIN_EXE_binstream"))
}

#[test]
fn info_reports_length_as_json() {
    let dir = unique_temp_dir("info");
    let path = dir.join("data.bin");
    std::fs::write(&path, b"0123456789abcdef").expect("fixture should be writable");

    let output = binstream()
        .arg("--format")
        .arg("json")
        .arg("info")
        .arg(&path)
        .output()
        .expect("info command should run");
    assert!(output.status.success());

    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("info output should be json");
    assert_eq!(json["length_bytes"], 16);
    assert_eq!(json["remaining_bytes"], 16);
    assert_eq!(json["empty"], false);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn read_decodes_u32_in_both_orders() {
    let dir = unique_temp_dir("read");
    let path = dir.join("value.bin");
    std::fs::write(&path, 0x1234_5678u32.to_le_bytes()).expect("fixture should be writable");

    for (order, expected) in [("little", 0x1234_5678u32), ("big", 0x7856_3412u32)] {
        let output = binstream()
            .arg("--format")
            .arg("raw")
            .arg("read")
            .arg(&path)
            .arg("--kind")
            .arg("u32")
            .arg("--order")
            .arg(order)
            .output()
            .expect("read command should run");
        assert!(output.status.success());

        let value = String::from_utf8(output.stdout).expect("value should be utf-8");
        assert_eq!(value.trim(), expected.to_string());
    }

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn read_null_terminated_text() {
    let dir = unique_temp_dir("text");
    let path = dir.join("text.bin");
    std::fs::write(&path, b"skip\0hello\0").expect("fixture should be writable");

    let output = binstream()
        .arg("--format")
        .arg("raw")
        .arg("read")
        .arg(&path)
        .arg("--at")
        .arg("5")
        .arg("--kind")
        .arg("text")
        .output()
        .expect("read command should run");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "hello");

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn dump_raw_roundtrips_bytes() {
    let dir = unique_temp_dir("dump");
    let path = dir.join("dump.bin");
    let payload: Vec<u8> = (0u8..64).collect();
    std::fs::write(&path, &payload).expect("fixture should be writable");

    let output = binstream()
        .arg("--format")
        .arg("raw")
        .arg("dump")
        .arg(&path)
        .arg("--offset")
        .arg("8")
        .arg("--length")
        .arg("16")
        .output()
        .expect("dump command should run");
    assert!(output.status.success());
    assert_eq!(output.stdout, payload[8..24]);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn short_read_exits_with_data_invalid() {
    let dir = unique_temp_dir("short");
    let path = dir.join("short.bin");
    std::fs::write(&path, b"\x01\x02").expect("fixture should be writable");

    let output = binstream()
        .arg("read")
        .arg(&path)
        .arg("--kind")
        .arg("u64")
        .output()
        .expect("read command should run");
    assert_eq!(output.status.code(), Some(60));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("insufficient data"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn oversized_offset_is_usage_error() {
    let dir = unique_temp_dir("offset");
    let path = dir.join("tiny.bin");
    std::fs::write(&path, b"\x00\x00\x00\x00").expect("fixture should be writable");

    let output = binstream()
        .arg("read")
        .arg(&path)
        .arg("--at")
        .arg(u64::MAX.to_string())
        .arg("--kind")
        .arg("u32")
        .output()
        .expect("read command should run");
    assert_eq!(output.status.code(), Some(64));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("out of range"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn missing_file_fails() {
    let output = binstream()
        .arg("info")
        .arg("/tmp/binstream-definitely-missing.bin")
        .output()
        .expect("info command should run");
    assert!(!output.status.success());
}
