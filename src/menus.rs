// src/menus.rs
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::MenuLoadError;
use crate::model::MenuNode;

/// メニューの JSON はそのまま配列の場合と、サーバーのレスポンス
/// `{ "code": 0, "data": [...] }` のままの場合がある
#[derive(Deserialize)]
#[serde(untagged)]
enum MenuDocument {
    Bare(Vec<MenuNode>),
    Envelope { data: Vec<MenuNode> },
}

pub fn parse_menus(src: &str) -> Result<Vec<MenuNode>, MenuLoadError> {
    let menus = match serde_json::from_str::<MenuDocument>(src)? {
        MenuDocument::Bare(menus) => menus,
        MenuDocument::Envelope { data } => data,
    };
    Ok(menus)
}

/// ファイルからメニューツリーを読み込む
pub fn load_menus(path: &Path) -> Result<Vec<MenuNode>, MenuLoadError> {
    let src = fs::read_to_string(path).map_err(|source| MenuLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let menus = parse_menus(&src)?;
    tracing::debug!(?path, count = menus.len(), "メニューを読み込みました");
    Ok(menus)
}
