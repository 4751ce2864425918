use std::fs::{create_dir_all, write};
use std::path::Path;

use cms_menu_router::menus::parse_menus;
use cms_menu_router::navigation::View;
use cms_menu_router::{
    build_breadcrumb, find_menu_by_path, FirstMenu, MapOptions, MenuRouteBuilder, Navigation,
    Navigator, RegistryConfig, RouteEntry, RouteRegistry,
};

const MENUS: &str = r#"{
  "code": 0,
  "data": [
    {
      "id": 38, "name": "系统总览", "type": 1, "url": "/main/analysis", "icon": "el-icon-monitor",
      "children": [
        { "id": 39, "url": "/main/analysis/overview", "name": "核心技术", "type": 2 },
        { "id": 40, "url": "/main/analysis/dashboard", "name": "商品统计", "type": 2 }
      ]
    },
    {
      "id": 1, "name": "系统管理", "type": 1, "url": "/main/system", "icon": "el-icon-setting",
      "children": [
        { "id": 2, "url": "/main/system/user", "name": "用户管理", "type": 2,
          "children": [{ "id": 5, "name": "创建用户", "type": 3, "permission": "system:users:create" }] },
        { "id": 3, "url": "/main/system/department", "name": "部门管理", "type": 2 },
        { "id": 4, "url": "/main/system/role", "name": "角色管理", "type": 2 }
      ]
    },
    {
      "id": 42, "name": "随便聊聊", "type": 1, "url": "/main/story",
      "children": [{ "id": 43, "url": "/main/story/chat", "name": "你的故事", "type": 2 }]
    }
  ]
}"#;

fn write_route(src: &Path, menu: &str, page: &str) {
    let dir = src.join("router/main").join(menu).join(page);
    create_dir_all(&dir).unwrap();
    write(
        dir.join(format!("{page}.ts")),
        format!(
            "const {page} = () => import('@/views/main/{menu}/{page}/{page}.vue')\n\
             export default {{\n  path: '/main/{menu}/{page}',\n  name: '{page}',\n  component: {page},\n  children: []\n}}\n"
        ),
    )
    .unwrap();

    let view_dir = src.join("views/main").join(menu).join(page);
    create_dir_all(&view_dir).unwrap();
    write(view_dir.join(format!("{page}.vue")), "<template><div/></template>").unwrap();
}

/// analysis/dashboard と story/chat はまだルートがない状態
fn console_tree() -> (tempfile::TempDir, RouteRegistry) {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("src");
    write_route(&src, "analysis", "overview");
    write_route(&src, "system", "user");
    write_route(&src, "system", "department");
    write_route(&src, "system", "role");

    let registry = RouteRegistry::discover(&RegistryConfig::new(src.join("router/main"))).unwrap();
    (dir, registry)
}

#[test]
fn menus_become_routes_with_redirects() {
    let (_dir, registry) = console_tree();
    assert_eq!(registry.len(), 4);

    let menus = parse_menus(MENUS).unwrap();
    let mut first_menu = FirstMenu::default();
    let routes = MenuRouteBuilder::new(&registry, MapOptions::default())
        .build_routes(&menus, &mut first_menu)
        .unwrap();

    let paths: Vec<&str> = routes.iter().map(RouteEntry::path).collect();
    assert_eq!(
        paths,
        vec![
            "/main/analysis",
            "/main/analysis/overview",
            "/main/system",
            "/main/system/user",
            "/main/system/department",
            "/main/system/role",
        ]
    );
    assert_eq!(
        routes[2],
        RouteEntry::Redirect {
            path: "/main/system".into(),
            redirect_to: "/main/system/user".into()
        }
    );
    match &routes[3] {
        RouteEntry::Leaf(def) => {
            assert_eq!(def.name.as_deref(), Some("user"));
            assert_eq!(def.component.as_deref(), Some("@/views/main/system/user/user.vue"));
            assert!(def.component_file.is_some());
        }
        other => panic!("expected leaf, got {other:?}"),
    }
    assert_eq!(
        first_menu.get().map(|m| m.url.as_str()),
        Some("/main/analysis/overview")
    );

    let strict = MenuRouteBuilder::new(&registry, MapOptions { strict: true })
        .build_routes(&menus, &mut FirstMenu::default());
    assert!(strict.is_err());
}

#[test]
fn lookups_and_navigation_over_built_routes() {
    let (_dir, registry) = console_tree();
    let menus = parse_menus(MENUS).unwrap();

    assert_eq!(
        find_menu_by_path("/main/system/role", &menus).map(|m| m.name.as_str()),
        Some("角色管理")
    );
    let crumbs = build_breadcrumb("/main/story/chat", &menus);
    let labels: Vec<&str> = crumbs.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(labels, vec!["随便聊聊", "你的故事"]);

    let mut first_menu = FirstMenu::default();
    let routes = MenuRouteBuilder::new(&registry, MapOptions::default())
        .build_routes(&menus, &mut first_menu)
        .unwrap();
    let navigator = Navigator::new(routes, first_menu.get().cloned());

    match navigator.navigate("/", Some("token")).unwrap() {
        Navigation::Render {
            view: View::Page(def),
        } => assert_eq!(def.path, "/main/analysis/overview"),
        other => panic!("unexpected navigation: {other:?}"),
    }
    assert_eq!(
        navigator.navigate("/main/system", None).unwrap(),
        Navigation::Login {
            redirect: "/main/system".into()
        }
    );
    // メニューにはあるがルートがまだない
    assert_eq!(
        navigator.navigate("/main/story/chat", Some("token")).unwrap(),
        Navigation::NotFound {
            path: "/main/story/chat".into()
        }
    );
}
