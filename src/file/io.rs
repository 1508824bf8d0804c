//! ファイル入出力
//!
//! エディタの永続化コラボレータ。読み込みは行単位、保存は一時ファイル経由

use crate::buffer::text_buffer::strip_line_terminator;
use crate::error::{FileError, NanoError, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// ファイルの読み書きを担当するトレイト
pub trait Persistence {
    /// ファイルを行のリストとして読み込む（行末は除去済み）
    fn load(&mut self, path: &Path) -> Result<Vec<Vec<u8>>>;

    /// シリアライズ済みの内容を書き出す
    fn save(&mut self, path: &Path, content: &[u8]) -> Result<()>;
}

/// 内容を `\n` で分割し、各行の末尾の `\r` / `\n` を取り除く
///
/// 最後の行末の後ろには空行を作らない
pub fn split_lines(content: &[u8]) -> Vec<Vec<u8>> {
    content
        .split_inclusive(|byte| *byte == b'\n')
        .map(|line| strip_line_terminator(line).to_vec())
        .collect()
}

/// ファイルシステム上の永続化
#[derive(Debug, Clone)]
pub struct FilePersistence {
    /// 一時ファイル + rename による保存
    atomic_save: bool,
}

impl FilePersistence {
    pub fn new() -> Self {
        Self { atomic_save: true }
    }

    /// 保存方式を指定
    pub fn with_atomic_save(mut self, atomic_save: bool) -> Self {
        self.atomic_save = atomic_save;
        self
    }

    /// 一時ファイルに書いてから置き換える
    ///
    /// シンボリックリンクはリンク先を置き換え、既存ファイルのパーミッションを引き継ぐ
    fn atomic_save_impl(&self, path: &Path, content: &[u8]) -> Result<()> {
        let target = resolve_save_target(path);
        let temp_path = generate_temp_path(&target)?;
        log::debug!("atomic save via {}", temp_path.display());

        std::fs::write(&temp_path, content).map_err(|err| {
            let _ = std::fs::remove_file(&temp_path);
            io_error(path, &err)
        })?;

        if let Ok(metadata) = std::fs::metadata(&target) {
            if let Err(err) = std::fs::set_permissions(&temp_path, metadata.permissions()) {
                log::warn!("could not keep permissions of {}: {}", target.display(), err);
            }
        }

        std::fs::rename(&temp_path, &target).map_err(|err| {
            let _ = std::fs::remove_file(&temp_path);
            io_error(path, &err)
        })
    }

    fn direct_save_impl(&self, path: &Path, content: &[u8]) -> Result<()> {
        std::fs::write(path, content).map_err(|err| io_error(path, &err))
    }
}

impl Default for FilePersistence {
    fn default() -> Self {
        Self::new()
    }
}

impl Persistence for FilePersistence {
    fn load(&mut self, path: &Path) -> Result<Vec<Vec<u8>>> {
        let content = std::fs::read(path).map_err(|err| io_error(path, &err))?;
        let lines = split_lines(&content);
        log::debug!("read {} lines from {}", lines.len(), path.display());
        Ok(lines)
    }

    fn save(&mut self, path: &Path, content: &[u8]) -> Result<()> {
        if self.atomic_save {
            self.atomic_save_impl(path, content)
        } else {
            self.direct_save_impl(path, content)
        }
    }
}

fn io_error(path: &Path, err: &std::io::Error) -> NanoError {
    FileError::from_io(&path.display().to_string(), err).into()
}

/// シンボリックリンクならリンク先の実体を返す
fn resolve_save_target(path: &Path) -> PathBuf {
    match std::fs::symlink_metadata(path) {
        Ok(metadata) if metadata.file_type().is_symlink() => {
            std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
        }
        _ => path.to_path_buf(),
    }
}

/// 同じディレクトリに一意な一時ファイル名を生成
fn generate_temp_path(original: &Path) -> Result<PathBuf> {
    let invalid = || {
        NanoError::File(FileError::InvalidPath {
            path: original.display().to_string(),
        })
    };
    let parent = original.parent().ok_or_else(invalid)?;
    let filename = original.file_name().ok_or_else(invalid)?;

    let temp_name = format!(".{}_{}", filename.to_string_lossy(), std::process::id());
    Ok(parent.join(temp_name))
}

/// メモリ上の永続化
///
/// 読み書きの呼び出し回数を記録する。存在しないパスの読み込みは `NotFound`
#[derive(Debug, Clone, Default)]
pub struct MemoryPersistence {
    files: HashMap<PathBuf, Vec<u8>>,
    /// すべての保存を失敗させる
    fail_saves: bool,
    pub loads: usize,
    pub saves: usize,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// ファイルを追加
    pub fn with_file<P: Into<PathBuf>>(mut self, path: P, content: &[u8]) -> Self {
        self.files.insert(path.into(), content.to_vec());
        self
    }

    /// 保存を常に失敗させる
    pub fn failing_saves(mut self) -> Self {
        self.fail_saves = true;
        self
    }

    pub fn contents(&self, path: &Path) -> Option<&[u8]> {
        self.files.get(path).map(Vec::as_slice)
    }
}

impl Persistence for MemoryPersistence {
    fn load(&mut self, path: &Path) -> Result<Vec<Vec<u8>>> {
        self.loads += 1;
        match self.files.get(path) {
            Some(content) => Ok(split_lines(content)),
            None => Err(FileError::NotFound {
                path: path.display().to_string(),
            }
            .into()),
        }
    }

    fn save(&mut self, path: &Path, content: &[u8]) -> Result<()> {
        self.saves += 1;
        if self.fail_saves {
            return Err(FileError::Io {
                message: "Write error".to_string(),
            }
            .into());
        }
        self.files.insert(path.to_path_buf(), content.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_split_lines_strips_terminators() {
        assert_eq!(
            split_lines(b"one\r\ntwo\nthree"),
            vec![b"one".to_vec(), b"two".to_vec(), b"three".to_vec()]
        );
        assert_eq!(split_lines(b"a\n"), vec![b"a".to_vec()]);
        assert_eq!(split_lines(b"a\n\n"), vec![b"a".to_vec(), Vec::new()]);
        assert!(split_lines(b"").is_empty());
    }

    #[test]
    fn test_file_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.txt");
        let mut persistence = FilePersistence::new();

        persistence.save(&path, b"hello\nworld\n").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"hello\nworld\n");
        assert_eq!(
            persistence.load(&path).unwrap(),
            vec![b"hello".to_vec(), b"world".to_vec()]
        );
    }

    #[test]
    fn test_atomic_save_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.txt");
        std::fs::write(&path, b"old\n").unwrap();

        FilePersistence::new().save(&path, b"new\n").unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"new\n");
        let entries: Vec<_> = std::fs::read_dir(temp_dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_atomic_save_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("script.sh");
        std::fs::write(&path, b"echo old\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o750)).unwrap();

        FilePersistence::new().save(&path, b"echo new\n").unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o750);
        assert_eq!(std::fs::read(&path).unwrap(), b"echo new\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_atomic_save_through_symlink_updates_target() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("real.txt");
        let link = temp_dir.path().join("link.txt");
        std::fs::write(&target, b"old\n").unwrap();
        std::os::unix::fs::symlink(&target, &link).unwrap();

        FilePersistence::new().save(&link, b"new\n").unwrap();

        assert!(std::fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(std::fs::read(&target).unwrap(), b"new\n");
    }

    #[test]
    fn test_direct_save() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("direct.txt");
        let mut persistence = FilePersistence::new().with_atomic_save(false);

        persistence.save(&path, b"x\n").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"x\n");
    }

    #[test]
    fn test_load_missing_file_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.txt");

        let err = FilePersistence::new().load(&path).unwrap_err();
        assert!(matches!(err, NanoError::File(FileError::NotFound { .. })));
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("no-such-dir").join("out.txt");

        assert!(FilePersistence::new().save(&path, b"x\n").is_err());
    }

    #[test]
    fn test_memory_persistence_failing_saves_fail_every_time() {
        let mut persistence = MemoryPersistence::new().failing_saves();
        assert!(persistence.save(Path::new("a.txt"), b"1\n").is_err());
        assert!(persistence.save(Path::new("a.txt"), b"2\n").is_err());
        assert_eq!(persistence.saves, 2);
        assert_eq!(persistence.contents(Path::new("a.txt")), None);
    }

    #[test]
    fn test_memory_persistence_counts_calls() {
        let mut persistence = MemoryPersistence::new().with_file("a.txt", b"1\n2\n");
        assert_eq!(persistence.load(Path::new("a.txt")).unwrap().len(), 2);
        assert!(persistence.load(Path::new("b.txt")).is_err());
        persistence.save(Path::new("b.txt"), b"x\n").unwrap();

        assert_eq!(persistence.loads, 2);
        assert_eq!(persistence.saves, 1);
        assert_eq!(persistence.contents(Path::new("b.txt")), Some(&b"x\n"[..]));
    }
}
