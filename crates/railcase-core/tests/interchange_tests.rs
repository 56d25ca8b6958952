use railcase_core::interchange::{convert_files, read_case_file, read_json_lines};
use railcase_core::{CaseRecord, DelimitedCodec, InterchangeError, Platform};
use std::fs;
use tempfile::TempDir;

fn record(title: &str, platform: Platform, description: &str) -> CaseRecord {
    CaseRecord {
        title: title.to_string(),
        type_id: 1,
        priority_id: 3,
        estimate: "3m".to_string(),
        platform,
        description: description.to_string(),
    }
}

#[test]
fn test_description_survives_file_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("cases.csv");
    let records = vec![
        record("TestA", Platform::Default, "line one\nline two"),
        record("TestB/with, comma", Platform::Mac, r#"says "hi" on darwin"#),
        record("TestC", Platform::Linux, "path C:\\tmp\\new\tand a tab"),
    ];

    let codec = DelimitedCodec::default();
    assert_eq!(codec.write_file(&path, &records).unwrap(), 3);

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), 3);

    assert_eq!(codec.read_file(&path).unwrap(), records);
}

#[test]
fn test_convert_files_writes_one_output_per_input() {
    let temp_dir = TempDir::new().unwrap();
    let first = temp_dir.path().join("first.csv");
    let second = temp_dir.path().join("second.csv");
    fs::write(&first, "TestA,1,3,3m,1,plain\n").unwrap();
    fs::write(&second, "TestB,1,3,3m,3,runs on linux\nTestC,2,1,5m,2,osx only\n").unwrap();
    let out_dir = temp_dir.path().join("out");

    let written = convert_files(&DelimitedCodec::default(), &[first, second], &out_dir).unwrap();
    assert_eq!(written, vec![out_dir.join("first.jsonl"), out_dir.join("second.jsonl")]);

    let records = read_json_lines(&out_dir.join("second.jsonl")).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].platform, Platform::Mac);
    assert_eq!(records[1].priority_id, 1);
}

#[test]
fn test_convert_files_same_stem_in_different_dirs() {
    let temp_dir = TempDir::new().unwrap();
    let a = temp_dir.path().join("a");
    let b = temp_dir.path().join("b");
    fs::create_dir_all(&a).unwrap();
    fs::create_dir_all(&b).unwrap();
    fs::write(a.join("cases.csv"), "TestA,1,3,3m,1,from a\n").unwrap();
    fs::write(b.join("cases.csv"), "TestB,1,3,3m,1,from b\n").unwrap();
    let out_dir = temp_dir.path().join("out");

    let written = convert_files(
        &DelimitedCodec::default(),
        &[a.join("cases.csv"), b.join("cases.csv")],
        &out_dir,
    )
    .unwrap();
    assert_eq!(
        written,
        vec![out_dir.join("cases.jsonl"), out_dir.join("cases-2.jsonl")]
    );

    let first = read_json_lines(&written[0]).unwrap();
    let second = read_json_lines(&written[1]).unwrap();
    assert_eq!(first[0].title, "TestA");
    assert_eq!(second[0].title, "TestB");
}

#[test]
fn test_convert_files_stops_at_malformed_file() {
    let temp_dir = TempDir::new().unwrap();
    let good = temp_dir.path().join("good.csv");
    let bad = temp_dir.path().join("bad.csv");
    let never = temp_dir.path().join("never.csv");
    fs::write(&good, "TestA,1,3,3m,1,plain\n").unwrap();
    fs::write(&bad, "TestB,1,3,3m,1,ok\nTestC,1,3\n").unwrap();
    fs::write(&never, "TestD,1,3,3m,1,plain\n").unwrap();
    let out_dir = temp_dir.path().join("out");

    let err = convert_files(
        &DelimitedCodec::default(),
        &[good, bad.clone(), never],
        &out_dir,
    )
    .unwrap_err();

    match err {
        InterchangeError::MalformedRow { path, row, .. } => {
            assert_eq!(path, bad);
            assert_eq!(row, 2);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(out_dir.join("good.jsonl").exists());
    assert!(!out_dir.join("bad.jsonl").exists());
    assert!(!out_dir.join("never.jsonl").exists());
}

#[test]
fn test_non_numeric_column_is_malformed() {
    let err = DelimitedCodec::default()
        .decode_str("TestA,one,3,3m,1,plain\n")
        .unwrap_err();
    assert!(matches!(err, InterchangeError::MalformedRow { row: 1, .. }));
}

#[test]
fn test_read_case_file_picks_format_by_extension() {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("cases.csv");
    fs::write(&csv_path, "TestA,1,3,3m,1,plain\n").unwrap();
    let out_dir = temp_dir.path().join("out");

    let codec = DelimitedCodec::default();
    convert_files(&codec, &[csv_path.clone()], &out_dir).unwrap();

    let from_csv = read_case_file(&codec, &csv_path).unwrap();
    let from_jsonl = read_case_file(&codec, &out_dir.join("cases.jsonl")).unwrap();
    assert_eq!(from_csv, from_jsonl);
}
