//! アップロード対象ファイルの収集

use crate::error::{Result, SummyError};
use std::path::{Path, PathBuf};
use summy_common::SelectedFile;
use walkdir::WalkDir;

/// 引数のパスを送信ファイルの一覧にする
///
/// ファイルはそのまま、フォルダは直下のファイルを名前順に追加する。
/// 隠しファイル（`.` 始まり）は除く。
pub fn collect_files(paths: &[PathBuf]) -> Result<Vec<SelectedFile<PathBuf>>> {
    let mut files = Vec::new();

    for path in paths {
        if !path.exists() {
            return Err(SummyError::FileNotFound(path.display().to_string()));
        }

        if path.is_file() {
            files.push(selected(path));
            continue;
        }

        let mut entries: Vec<SelectedFile<PathBuf>> = WalkDir::new(path)
            .min_depth(1)
            .max_depth(1) // 直下のみ
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| !is_hidden(e.path()))
            .map(|e| selected(e.path()))
            .collect();

        // ファイル名でソート
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        tracing::debug!(folder = %path.display(), count = entries.len(), "folder scanned");
        files.extend(entries);
    }

    Ok(files)
}

fn selected(path: &Path) -> SelectedFile<PathBuf> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    SelectedFile::new(name, path.to_path_buf())
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_hidden() {
        assert!(is_hidden(Path::new("/tmp/.DS_Store")));
        assert!(!is_hidden(Path::new("/tmp/relazione.pdf")));
    }

    #[test]
    fn test_missing_path() {
        let result = collect_files(&[PathBuf::from("/nonexistent/summy/file.pdf")]);
        assert!(matches!(result, Err(SummyError::FileNotFound(_))));
    }
}
