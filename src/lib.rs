// src/lib.rs
//! CMS 管理画面のメニューツリーを動的ルートに変換するライブラリ。
//!
//! サーバーから受け取ったメニュー (`MenuNode`) を、起動時に一度だけ探索した
//! ルート定義 (`RouteRegistry`) と突き合わせ、リダイレクト付きのルート一覧と
//! デフォルト遷移先 (`FirstMenu`) を作る。

pub mod error;
pub mod logging;
pub mod mapper;
pub mod menus;
pub mod model;
pub mod navigation;
pub mod parser;
pub mod registry;
pub mod resolver;

pub use mapper::{build_breadcrumb, find_menu_by_path, MapOptions, MenuRouteBuilder};
pub use model::{
    BreadcrumbItem, FirstMenu, FirstMenuPolicy, MenuNode, RouteDefinition, RouteEntry,
    SubmenuNode,
};
pub use navigation::{Navigation, Navigator};
pub use registry::{RegistryConfig, RouteRegistry};
