use path_absolutize::Absolutize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ResolveError;

/// `@/` は src ディレクトリを指すエイリアス
const SRC_ALIAS: &str = "@/";

/// 拡張子なしで書かれた指定子に補う拡張子
const EXTENSIONS: &[&str] = &["vue", "ts", "tsx", "js"];

/// ルート定義の component に書かれた import 指定子 (`specifier`) を、
/// 実際のコンポーネントファイルの絶対パスに解決する関数。
///
/// - `specifier`: 例 "@/views/main/system/user/user.vue" や "./Dashboard.vue"
/// - `route_module`: その指定子を持つルートモジュールのパス
/// - `src_root`: `@/` が指す src ディレクトリ
///
/// 戻り値:
/// - Ok(Some(path)) → 見つかったコンポーネントファイルの絶対パス
/// - Ok(None)       → パッケージ指定子、もしくはファイルが存在しない
pub fn resolve_component_path(
    specifier: &str,
    route_module: &Path,
    src_root: &Path,
) -> Result<Option<PathBuf>, ResolveError> {
    // 1) 指定子の種類ごとに基準パスを決める
    let candidate_base = if let Some(rest) = specifier.strip_prefix(SRC_ALIAS) {
        src_root.join(rest)
    } else if specifier.starts_with("./") || specifier.starts_with("../") {
        let parent_dir = route_module
            .parent()
            .ok_or_else(|| ResolveError::NoParentDir(route_module.to_path_buf()))?;
        parent_dir.join(specifier)
    } else {
        // "vue" などのパッケージ指定子はファイルに解決しない
        return Ok(None);
    };

    // 2) 典型的なファイル名パターンを列挙
    let mut candidates: Vec<PathBuf> = vec![candidate_base.clone()];

    // A) 拡張子を補う (user → user.vue)
    if let Some(file_name) = candidate_base.file_name() {
        for ext in EXTENSIONS {
            let name = format!("{}.{}", file_name.to_string_lossy(), ext);
            candidates.push(candidate_base.with_file_name(name));
        }
    }

    // B) ディレクトリなら index.vue / index.ts を探す
    candidates.push(candidate_base.join("index.vue"));
    candidates.push(candidate_base.join("index.ts"));

    // 3) 絶対パス化し、最初に存在するファイルを返却
    for cand in candidates {
        let abs = cand
            .absolutize()
            .map_err(|source| ResolveError::Absolutize {
                path: cand.clone(),
                source,
            })?
            .to_path_buf();
        if fs::metadata(&abs).map(|m| m.is_file()).unwrap_or(false) {
            return Ok(Some(abs));
        }
    }

    // 4) どれにも該当しなければ None
    Ok(None)
}
