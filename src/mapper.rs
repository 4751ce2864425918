// src/mapper.rs
//! メニューツリー → 動的ルートの変換と、パスからメニュー・パンくずを引く関数群

use std::collections::HashSet;

use crate::error::MapError;
use crate::model::{BreadcrumbItem, FirstMenu, MenuNode, RouteEntry, SubmenuNode};
use crate::registry::RouteRegistry;

/// build_routes の挙動設定
#[derive(Debug, Clone, Copy, Default)]
pub struct MapOptions {
    /// true ならルート定義のないサブメニューをエラーにする。
    /// false (既定) なら黙って読み飛ばす (開発中のルートを許容する)
    pub strict: bool,
}

/// 起動時に探索済みのレジストリを使ってメニューをルートに変換する
#[derive(Debug, Clone, Copy)]
pub struct MenuRouteBuilder<'a> {
    registry: &'a RouteRegistry,
    options: MapOptions,
}

impl<'a> MenuRouteBuilder<'a> {
    pub fn new(registry: &'a RouteRegistry, options: MapOptions) -> Self {
        MenuRouteBuilder { registry, options }
    }

    /// メニューを走査順にルート定義と突き合わせ、動的ルートを組み立てる。
    ///
    /// - サブメニューの `url` と一致する定義があれば、その定義を葉エントリとして追加する
    /// - 親メニューの `url` に対するリダイレクトがまだなければ、葉の直前に追加する
    ///   (親メニューには対応するコンポーネントがないので最初の子へ飛ばす)
    /// - この呼び出しで最初にマッチしたサブメニューを `first_menu` に渡す
    ///
    /// strict モードでエラーになった場合 `first_menu` は変更しない。
    pub fn build_routes(
        &self,
        menus: &[MenuNode],
        first_menu: &mut FirstMenu,
    ) -> Result<Vec<RouteEntry>, MapError> {
        let mut routes: Vec<RouteEntry> = Vec::new();
        let mut redirected: HashSet<&str> = HashSet::new();
        let mut first_match: Option<&SubmenuNode> = None;

        for menu in menus {
            for submenu in &menu.children {
                let Some(route) = self.registry.find(&submenu.url) else {
                    if self.options.strict {
                        return Err(MapError::UnmatchedSubmenu {
                            menu: menu.url.clone(),
                            url: submenu.url.clone(),
                        });
                    }
                    tracing::trace!(menu = %menu.url, url = %submenu.url, "ルート定義のないサブメニューを読み飛ばします");
                    continue;
                };

                // 1) トップレベルメニューのリダイレクト
                if redirected.insert(menu.url.as_str()) {
                    routes.push(RouteEntry::Redirect {
                        path: menu.url.clone(),
                        redirect_to: route.path.clone(),
                    });
                }

                // 2) サブメニューに対応するルート
                routes.push(RouteEntry::Leaf(route.clone()));

                if first_match.is_none() {
                    first_match = Some(submenu);
                }
            }
        }

        first_menu.commit(first_match.cloned());

        tracing::debug!(
            menus = menus.len(),
            routes = routes.len(),
            first_menu = ?first_menu.get().map(|m| m.url.as_str()),
            policy = ?first_menu.policy(),
            "メニューからルートを生成しました"
        );
        Ok(routes)
    }
}

/// パスに一致する最初のサブメニューを返す (メニューのハイライト用)
pub fn find_menu_by_path<'m>(path: &str, menus: &'m [MenuNode]) -> Option<&'m SubmenuNode> {
    menus
        .iter()
        .flat_map(|menu| menu.children.iter())
        .find(|submenu| submenu.url == path)
}

/// パスに一致するサブメニューごとに (親メニュー, サブメニュー) の 2 要素を積む
pub fn build_breadcrumb(path: &str, menus: &[MenuNode]) -> Vec<BreadcrumbItem> {
    let mut breadcrumbs = Vec::new();
    for menu in menus {
        for submenu in menu.children.iter().filter(|submenu| submenu.url == path) {
            breadcrumbs.push(BreadcrumbItem {
                name: menu.name.clone(),
                path: menu.url.clone(),
            });
            breadcrumbs.push(BreadcrumbItem {
                name: submenu.name.clone(),
                path: submenu.url.clone(),
            });
        }
    }
    breadcrumbs
}
