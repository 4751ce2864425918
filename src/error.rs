// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

/// メニュー JSON の読み込みエラー
#[derive(Debug, Error)]
pub enum MenuLoadError {
    #[error("メニューファイルを読めません {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("メニュー JSON の形式が不正です: {0}")]
    Json(#[from] serde_json::Error),
}

/// ルートモジュール (.ts) の解析エラー
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("ルートモジュールを読めません {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("構文エラー {path:?}: {message}")]
    Syntax { path: PathBuf, message: String },
}

/// component の import 指定子の解決エラー
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("ルートモジュールの親ディレクトリが取得できません: {0:?}")]
    NoParentDir(PathBuf),

    #[error("パスを絶対化できません {path:?}: {source}")]
    Absolutize {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// ルート定義の探索エラー
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("ルートディレクトリが存在しません: {0:?}")]
    MissingDir(PathBuf),

    #[error("ルートディレクトリの走査に失敗しました: {0}")]
    Walk(#[from] walkdir::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/// strict モードでの build_routes のエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MapError {
    #[error("メニュー {menu:?} のサブメニュー {url:?} に対応するルート定義がありません")]
    UnmatchedSubmenu { menu: String, url: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("{path:?} からのリダイレクトが {hops} 回を超えました")]
    RedirectLoop { path: String, hops: usize },
}

/// CLI 全体のエラー
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    MenuLoad(#[from] MenuLoadError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Map(#[from] MapError),

    #[error(transparent)]
    Navigation(#[from] NavigationError),

    #[error("JSON 出力に失敗しました: {0}")]
    Output(#[from] serde_json::Error),
}
