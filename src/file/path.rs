//! パス処理ユーティリティ
//!
//! プロンプトやコマンドラインで入力されたファイル名の展開

use crate::error::{FileError, Result};
use std::path::PathBuf;

/// `~` と環境変数（`$VAR`, `${VAR}`）を展開する
pub fn expand_path(input: &str) -> Result<PathBuf> {
    if input.is_empty() || input.contains('\0') {
        return Err(FileError::InvalidPath {
            path: input.to_string(),
        }
        .into());
    }

    match shellexpand::full(input) {
        Ok(expanded) => Ok(PathBuf::from(expanded.as_ref())),
        Err(err) => {
            log::warn!("path expansion failed for {}: {}", input, err);
            Err(FileError::InvalidPath {
                path: input.to_string(),
            }
            .into())
        }
    }
}
