// src/navigation.rs
//! 静的ルート (`/`, `/login`, `/main`, NotFound) と動的ルートを合わせた遷移解決。
//! `/main` 配下は認証トークンが必要で、`/main` 自体は FirstMenu へ着地させる。

use serde::Serialize;

use crate::error::NavigationError;
use crate::model::{RouteDefinition, RouteEntry, SubmenuNode};

pub const ROOT_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const MAIN_PATH: &str = "/main";

/// navigate がたどるリダイレクトの上限
const MAX_REDIRECTS: usize = 8;

/// 描画されるビュー
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum View {
    Login,
    Main,
    /// `/main` の子として登録された動的ルート
    Page(RouteDefinition),
}

/// 1 回の遷移解決の結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Navigation {
    Render { view: View },
    Redirect { to: String },
    /// 未ログインで認証が必要なルートに来た。ログイン後に `redirect` へ戻す
    Login { redirect: String },
    NotFound { path: String },
}

/// build_routes の結果を `/main` の子として取り付けたルーター
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    children: Vec<RouteEntry>,
    first_menu: Option<SubmenuNode>,
}

impl Navigator {
    pub fn new(children: Vec<RouteEntry>, first_menu: Option<SubmenuNode>) -> Self {
        Navigator {
            children,
            first_menu,
        }
    }

    /// `full_path` (クエリ・ハッシュ付き可) を 1 段だけ解決する
    pub fn resolve(&self, full_path: &str, token: Option<&str>) -> Navigation {
        let path = normalize(full_path);

        if path == ROOT_PATH {
            return Navigation::Redirect {
                to: MAIN_PATH.to_string(),
            };
        }
        if path == LOGIN_PATH {
            return Navigation::Render { view: View::Login };
        }

        // 同じパスに葉とリダイレクトがある場合 (メニューと子の url が同じ) は葉を優先する
        let child = self
            .children
            .iter()
            .find(|entry| matches!(entry, RouteEntry::Leaf(def) if def.path == path))
            .or_else(|| self.children.iter().find(|entry| entry.path() == path));
        if child.is_none() && path != MAIN_PATH {
            return Navigation::NotFound {
                path: path.to_string(),
            };
        }

        // ここから先は /main とその子。トークンがなければログインへ
        if !token.is_some_and(|t| !t.is_empty()) {
            tracing::debug!(path = %full_path, "未ログインのためログイン画面へ遷移します");
            return Navigation::Login {
                redirect: full_path.to_string(),
            };
        }

        match child {
            Some(RouteEntry::Redirect { redirect_to, .. }) => Navigation::Redirect {
                to: redirect_to.clone(),
            },
            Some(RouteEntry::Leaf(def)) => Navigation::Render {
                view: View::Page(def.clone()),
            },
            None => match &self.first_menu {
                Some(first) => Navigation::Redirect {
                    to: first.url.clone(),
                },
                None => Navigation::Render { view: View::Main },
            },
        }
    }

    /// リダイレクトを最後までたどって最終的な結果を返す
    pub fn navigate(&self, full_path: &str, token: Option<&str>) -> Result<Navigation, NavigationError> {
        let mut current = full_path.to_string();
        for _ in 0..=MAX_REDIRECTS {
            match self.resolve(&current, token) {
                Navigation::Redirect { to } => {
                    tracing::trace!(from = %current, %to, "リダイレクト");
                    current = to;
                }
                done => return Ok(done),
            }
        }
        Err(NavigationError::RedirectLoop {
            path: full_path.to_string(),
            hops: MAX_REDIRECTS,
        })
    }
}

/// クエリとハッシュを落とし、末尾の `/` を取り除く
fn normalize(full_path: &str) -> &str {
    let end = full_path.find(['?', '#']).unwrap_or(full_path.len());
    let path = &full_path[..end];
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { ROOT_PATH } else { trimmed }
}
