// src/main.rs

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

use cms_menu_router::error::AppError;
use cms_menu_router::menus::load_menus;
use cms_menu_router::{
    build_breadcrumb, find_menu_by_path, logging, FirstMenu, MapOptions, MenuRouteBuilder,
    Navigator, RegistryConfig, RouteEntry, RouteRegistry, SubmenuNode,
};

/// CLI 引数定義
#[derive(Parser, Debug)]
#[command(
    name = "cms-menu-router",
    version,
    about = "CMS のメニューツリーとルートモジュールから動的ルートを生成して JSON 出力する CLI ツール"
)]
struct Cli {
    /// ログを詳しくする (-v: info, -vv: debug, -vvv: trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// ルートモジュールを探索してルート定義の一覧を出力する
    Scan {
        #[command(flatten)]
        registry: RegistryArgs,
    },
    /// メニューから動的ルートと FirstMenu を生成する
    Routes {
        #[command(flatten)]
        registry: RegistryArgs,
        /// メニュー JSON (配列、または `{ "data": [...] }`)
        #[arg(short = 'm', long, value_name = "FILE")]
        menus: PathBuf,
        /// ルート定義のないサブメニューをエラーにする
        #[arg(long)]
        strict: bool,
    },
    /// パスに一致するサブメニューを出力する
    Menu {
        #[arg(short = 'm', long, value_name = "FILE")]
        menus: PathBuf,
        #[arg(short, long)]
        path: String,
    },
    /// パスのパンくずリストを出力する
    Breadcrumb {
        #[arg(short = 'm', long, value_name = "FILE")]
        menus: PathBuf,
        #[arg(short, long)]
        path: String,
    },
    /// 生成したルートでパスを解決し、最終的な遷移先を出力する
    Navigate {
        #[command(flatten)]
        registry: RegistryArgs,
        #[arg(short = 'm', long, value_name = "FILE")]
        menus: PathBuf,
        #[arg(short, long)]
        path: String,
        /// ログイントークン。なければ未ログイン扱い
        #[arg(short, long)]
        token: Option<String>,
    },
}

#[derive(Args, Debug)]
struct RegistryArgs {
    /// ルートモジュールのディレクトリ
    /// 例: `--routes-dir C:/path/to/cms/src/router/main`
    #[arg(short = 'r', long = "routes-dir", value_name = "DIR")]
    routes_dir: PathBuf,

    /// `@/` が指す src ディレクトリ (省略時は routes-dir から推定)
    #[arg(long = "src-root", value_name = "DIR")]
    src_root: Option<PathBuf>,
}

impl RegistryArgs {
    fn discover(&self) -> Result<RouteRegistry, AppError> {
        let config = RegistryConfig {
            routes_dir: self.routes_dir.clone(),
            src_root: self.src_root.clone(),
        };
        Ok(RouteRegistry::discover(&config)?)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RoutesOutput<'a> {
    routes: &'a [RouteEntry],
    first_menu: Option<&'a SubmenuNode>,
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(cli: Cli) -> Result<(), AppError> {
    match cli.command {
        Command::Scan { registry } => {
            let registry = registry.discover()?;
            print_json(registry.definitions())
        }
        Command::Routes {
            registry,
            menus,
            strict,
        } => {
            let registry = registry.discover()?;
            let menus = load_menus(&menus)?;
            let mut first_menu = FirstMenu::default();
            let routes = MenuRouteBuilder::new(&registry, MapOptions { strict })
                .build_routes(&menus, &mut first_menu)?;
            print_json(&RoutesOutput {
                routes: &routes,
                first_menu: first_menu.get(),
            })
        }
        Command::Menu { menus, path } => {
            let menus = load_menus(&menus)?;
            print_json(&find_menu_by_path(&path, &menus))
        }
        Command::Breadcrumb { menus, path } => {
            let menus = load_menus(&menus)?;
            print_json(&build_breadcrumb(&path, &menus))
        }
        Command::Navigate {
            registry,
            menus,
            path,
            token,
        } => {
            let registry = registry.discover()?;
            let menus = load_menus(&menus)?;
            let mut first_menu = FirstMenu::default();
            let routes = MenuRouteBuilder::new(&registry, MapOptions::default())
                .build_routes(&menus, &mut first_menu)?;
            let navigator = Navigator::new(routes, first_menu.get().cloned());
            print_json(&navigator.navigate(&path, token.as_deref())?)
        }
    }
}

fn main() -> ExitCode {
    // 1) CLI 引数をパースしてロギングを初期化
    let cli = Cli::parse();
    logging::init(cli.verbose);

    // 2) サブコマンドを実行し、結果の JSON を標準出力へ
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
