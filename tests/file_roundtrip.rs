use std::fs;
use std::path::Path;
use std::process::Command;

use huffman_compress::{compress_file, decompress_bytes, decompress_file, CodecConfig, Error};

fn round_trip_file(dir: &Path, data: &[u8]) -> Vec<u8> {
    let input = dir.join("input.bin");
    let compressed = dir.join("input.huf");
    let output = dir.join("output.bin");
    fs::write(&input, data).unwrap();

    let stats = compress_file(&input, &compressed, &CodecConfig::default()).unwrap();
    assert_eq!(stats.input_size, data.len() as u64);
    assert_eq!(stats.output_size, fs::metadata(&compressed).unwrap().len());

    decompress_file(&compressed, &output).unwrap();
    fs::read(&output).unwrap()
}

#[test]
fn test_various_inputs() {
    let dir = tempfile::tempdir().unwrap();
    let inputs: Vec<Vec<u8>> = vec![
        b"Hello, World!".to_vec(),
        b"x".to_vec(),
        vec![7; 500],
        b"{\"name\": \"test\", \"value\": 123, \"array\": [1, 2, 3]}".to_vec(),
        (0..4000u32).map(|v| (v * 7 % 31) as u8).collect(),
        b"line one\nline two\r\n\ttabbed\n".to_vec(),
    ];

    for data in inputs {
        assert_eq!(round_trip_file(dir.path(), &data), data);
    }
}

#[test]
fn test_large_input() {
    let dir = tempfile::tempdir().unwrap();
    let data = b"The quick brown fox jumps over the lazy dog. ".repeat(2000);
    assert_eq!(round_trip_file(dir.path(), &data), data);
}

#[test]
fn test_compression_ratio() {
    let dir = tempfile::tempdir().unwrap();
    let cases: [(&[u8], usize, f64); 2] = [
        (b"AAAA", 250, 20.0),
        (b"The quick brown fox jumps over the lazy dog. ", 50, 70.0),
    ];

    for (chunk, times, max_ratio) in cases {
        let input = dir.path().join("ratio.txt");
        let compressed = dir.path().join("ratio.huf");
        fs::write(&input, chunk.repeat(times)).unwrap();

        let stats = compress_file(&input, &compressed, &CodecConfig::default()).unwrap();
        assert!(
            stats.ratio() < max_ratio,
            "ratio {:.2}% exceeds {max_ratio}%",
            stats.ratio()
        );
    }
}

#[test]
fn test_empty_input_produces_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("empty.txt");
    let output = dir.path().join("empty.huf");
    fs::write(&input, b"").unwrap();

    let result = compress_file(&input, &output, &CodecConfig::default());
    assert!(matches!(result, Err(Error::EmptyInput)));
    assert!(!output.exists());
}

#[test]
fn test_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let result = compress_file(
        dir.path().join("does-not-exist"),
        dir.path().join("out.huf"),
        &CodecConfig::default(),
    );
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_invalid_container() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("invalid.huf");
    let output = dir.path().join("output.txt");
    fs::write(&input, b"not a valid huffman file").unwrap();

    assert!(decompress_file(&input, &output).is_err());
    assert!(!output.exists());
}

#[test]
fn test_failed_decompress_keeps_existing_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("invalid.huf");
    let output = dir.path().join("output.txt");
    fs::write(&input, [0x48, 0, 0, 0, 9, 0b000_00010, b'a', 1, b'b', 1]).unwrap();
    fs::write(&output, b"previous contents").unwrap();

    assert!(matches!(
        decompress_file(&input, &output),
        Err(Error::CorruptStream(_))
    ));
    assert_eq!(fs::read(&output).unwrap(), b"previous contents");
}

#[test]
fn test_unordered_table() {
    // The table entries need not be sorted: here 'c' comes first.
    let data = [
        0x48, 0, 0, 0, 6, 0b111_00011, b'c', 1, b'a', 3, b'b', 2, 0b0001_1111, 0,
    ];
    assert_eq!(decompress_bytes(&data).unwrap(), b"aaabbc");
}

#[test]
fn test_cli() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("cli.txt");
    fs::write(&input, b"mississippi river").unwrap();

    let binary = env!("CARGO_BIN_EXE_huffman-compress");
    let status = Command::new(binary)
        .arg("compress")
        .arg(&input)
        .status()
        .unwrap();
    assert!(status.success());

    let compressed = dir.path().join("cli.txt.huf");
    let status = Command::new(binary)
        .arg("decompress")
        .arg(&compressed)
        .status()
        .unwrap();
    assert!(status.success());
    assert_eq!(
        fs::read(dir.path().join("cli.txt.huf.dec")).unwrap(),
        b"mississippi river"
    );

    let output = Command::new(binary)
        .arg("inspect")
        .arg(&compressed)
        .output()
        .unwrap();
    assert!(output.status.success());
    let report = String::from_utf8_lossy(&output.stdout);
    assert!(report.contains("Original size: 17 bytes"));
    assert!(report.lines().any(|line| {
        line.strip_prefix("\t'i'\t")
            .map_or(false, |bits| !bits.is_empty() && bits.chars().all(|c| c == '0' || c == '1'))
    }));
    assert!(report.lines().any(|line| line.starts_with("\t0x20\t")));

    let status = Command::new(binary)
        .arg("decompress")
        .arg(&input)
        .status()
        .unwrap();
    assert!(!status.success());
}

#[test]
fn test_cli_strict() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("counts.txt");
    let output = dir.path().join("counts.huf");
    let mut data = vec![b'a'; 300];
    data.extend(b"bc");
    fs::write(&input, &data).unwrap();

    let binary = env!("CARGO_BIN_EXE_huffman-compress");
    let status = Command::new(binary)
        .arg("--strict")
        .arg("compress")
        .arg(&input)
        .arg(&output)
        .status()
        .unwrap();
    assert!(!status.success());
    assert!(!output.exists());

    let status = Command::new(binary)
        .arg("compress")
        .arg(&input)
        .arg(&output)
        .status()
        .unwrap();
    assert!(status.success());
    assert_eq!(decompress_bytes(&fs::read(&output).unwrap()).unwrap(), data);
}
