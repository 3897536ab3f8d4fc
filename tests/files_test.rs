//! ファイル収集のテスト

use std::fs;
use summy::files::collect_files;
use summy::upload::build_draft;
use summy::error::SummyError;
use tempfile::tempdir;

/// フォルダは直下のファイルを名前順に、サブフォルダと隠しファイルは除く
#[test]
fn test_folder_one_level_sorted() {
    let dir = tempdir().expect("Failed to create temp dir");
    fs::write(dir.path().join("b.docx"), "b").unwrap();
    fs::write(dir.path().join("a.pdf"), "a").unwrap();
    fs::write(dir.path().join(".hidden"), "h").unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("sub").join("c.txt"), "c").unwrap();

    let files = collect_files(&[dir.path().to_path_buf()]).unwrap();
    let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["a.pdf", "b.docx"]);
}

/// ファイル指定は指定順のまま
#[test]
fn test_explicit_files_keep_order() {
    let dir = tempdir().expect("Failed to create temp dir");
    let z = dir.path().join("z.pdf");
    let a = dir.path().join("a.pdf");
    fs::write(&z, "z").unwrap();
    fs::write(&a, "a").unwrap();

    let files = collect_files(&[z.clone(), a.clone()]).unwrap();
    assert_eq!(files[0].content, z);
    assert_eq!(files[1].content, a);
}

/// 同名ファイルは最初の1つだけ残る
#[test]
fn test_draft_dedupes_by_name() {
    let first = tempdir().expect("Failed to create temp dir");
    let second = tempdir().expect("Failed to create temp dir");
    fs::write(first.path().join("report.pdf"), "1").unwrap();
    fs::write(second.path().join("report.pdf"), "2").unwrap();

    let draft = build_draft(
        &[first.path().to_path_buf(), second.path().to_path_buf()],
        &["bilancio".into(), " bilancio ".into(), "rischi".into()],
    )
    .unwrap();

    assert_eq!(draft.file_names(), vec!["report.pdf"]);
    assert_eq!(draft.files()[0].content, first.path().join("report.pdf"));
    assert_eq!(draft.keywords(), ["bilancio", "rischi"]);
}

/// 空のフォルダはエラー
#[test]
fn test_empty_folder() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = build_draft(&[dir.path().to_path_buf()], &[]);
    assert!(matches!(result, Err(SummyError::NoFilesFound(_))));
}
