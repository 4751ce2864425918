// src/model.rs
use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// サーバーから受け取るトップレベルのメニュー (ナビゲーショングループ)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// リダイレクトエントリのキーになるパス (例: "/main/system")
    pub url: String,

    /// 表示名
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// サブメニュー (順序はそのまま走査順になる)。null は空扱い
    #[serde(default, deserialize_with = "null_as_empty")]
    pub children: Vec<SubmenuNode>,
}

/// 権限エントリ (葉)。`url` がルート定義の `path` と一致したときだけルーティング可能になる
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmenuNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub url: String,
    pub name: String,
}

/// ルートモジュールから解析したルート定義
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDefinition {
    /// ルートのパス (例: "/main/system/user")
    pub path: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// component に書かれた import 指定子をそのまま格納
    /// 例: "@/views/main/system/user/user.vue"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,

    /// import 指定子を解決したファイルの絶対パス (存在する場合のみ)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_file: Option<PathBuf>,

    /// このルート定義が書かれているソースファイル
    pub source_file: PathBuf,
}

impl RouteDefinition {
    /// パスだけを持つ定義を作る (インプロセスでレジストリを組み立てる用途)
    pub fn new(path: impl Into<String>) -> Self {
        RouteDefinition {
            path: path.into(),
            name: None,
            component: None,
            component_file: None,
            source_file: PathBuf::new(),
        }
    }
}

/// build_routes の出力。トップレベルのリダイレクトか、マッチしたルート定義そのもの
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RouteEntry {
    Redirect {
        path: String,
        #[serde(rename = "redirect")]
        redirect_to: String,
    },
    Leaf(RouteDefinition),
}

impl RouteEntry {
    pub fn path(&self) -> &str {
        match self {
            RouteEntry::Redirect { path, .. } => path,
            RouteEntry::Leaf(def) => &def.path,
        }
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, RouteEntry::Redirect { .. })
    }
}

/// パンくずリストの 1 要素
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreadcrumbItem {
    pub name: String,
    pub path: String,
}

/// FirstMenu の更新方針
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FirstMenuPolicy {
    /// 未設定のときだけ設定し、以降の呼び出しでは上書きしない
    #[default]
    SetOnce,
    /// 呼び出しごとにクリアし、その回の最初のマッチで置き換える
    Refresh,
}

/// デフォルト遷移先に使う「最初にルーティングできたサブメニュー」を保持するスロット。
/// 呼び出し側が所有し、build_routes に `&mut` で渡す。
#[derive(Debug, Clone, Default)]
pub struct FirstMenu {
    policy: FirstMenuPolicy,
    menu: Option<SubmenuNode>,
}

impl FirstMenu {
    pub fn new(policy: FirstMenuPolicy) -> Self {
        FirstMenu { policy, menu: None }
    }

    pub fn policy(&self) -> FirstMenuPolicy {
        self.policy
    }

    pub fn get(&self) -> Option<&SubmenuNode> {
        self.menu.as_ref()
    }

    pub fn is_set(&self) -> bool {
        self.menu.is_some()
    }

    /// ログアウト時などに明示的にクリアする
    pub fn reset(&mut self) {
        self.menu = None;
    }

    /// 1 回の build_routes の結果 (その回の最初のマッチ) を方針に従って反映する
    pub(crate) fn commit(&mut self, first_match: Option<SubmenuNode>) {
        match self.policy {
            FirstMenuPolicy::SetOnce => {
                if self.menu.is_none() {
                    self.menu = first_match;
                }
            }
            FirstMenuPolicy::Refresh => self.menu = first_match,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submenu(url: &str) -> SubmenuNode {
        SubmenuNode {
            id: None,
            url: url.to_string(),
            name: url.to_string(),
        }
    }

    #[test]
    fn set_once_keeps_the_first_value() {
        let mut first = FirstMenu::default();
        first.commit(Some(submenu("/a")));
        first.commit(Some(submenu("/b")));
        assert_eq!(first.get().map(|m| m.url.as_str()), Some("/a"));

        first.reset();
        first.commit(Some(submenu("/b")));
        assert_eq!(first.get().map(|m| m.url.as_str()), Some("/b"));
    }

    #[test]
    fn refresh_replaces_and_clears() {
        let mut first = FirstMenu::new(FirstMenuPolicy::Refresh);
        first.commit(Some(submenu("/a")));
        first.commit(Some(submenu("/b")));
        assert_eq!(first.get().map(|m| m.url.as_str()), Some("/b"));

        first.commit(None);
        assert!(!first.is_set());
    }

    #[test]
    fn route_entry_json_shape() {
        let redirect = RouteEntry::Redirect {
            path: "/main/system".into(),
            redirect_to: "/main/system/user".into(),
        };
        let json = serde_json::to_value(&redirect).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "path": "/main/system", "redirect": "/main/system/user" })
        );

        let leaf = RouteEntry::Leaf(RouteDefinition::new("/main/system/user"));
        let json = serde_json::to_value(&leaf).unwrap();
        assert_eq!(json["path"], "/main/system/user");
        assert!(json.get("redirect").is_none());
    }

    #[test]
    fn menu_deserializes_with_extra_fields() {
        let raw = r#"{
            "id": 38, "name": "系统总览", "type": 1, "url": "/main/analysis", "icon": "el-icon-monitor",
            "sort": 1,
            "children": [
                { "id": 39, "url": "/main/analysis/overview", "name": "核心技术", "sort": 106, "type": 2,
                  "children": null, "parentId": 38 }
            ]
        }"#;
        let menu: MenuNode = serde_json::from_str(raw).unwrap();
        assert_eq!(menu.url, "/main/analysis");
        assert_eq!(menu.icon.as_deref(), Some("el-icon-monitor"));
        assert_eq!(menu.children.len(), 1);
        assert_eq!(menu.children[0].url, "/main/analysis/overview");

        let bare: MenuNode =
            serde_json::from_str(r#"{ "url": "/main/empty", "name": "空", "children": null }"#)
                .unwrap();
        assert!(bare.children.is_empty());
    }
}
