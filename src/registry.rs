// src/registry.rs
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::RegistryError;
use crate::model::RouteDefinition;
use crate::parser::parse_route_module;
use crate::resolver::resolve_component_path;

/// ルート定義の探索設定
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// ルートモジュールを置くディレクトリ (例: `src/router/main`)
    pub routes_dir: PathBuf,
    /// `@/` が指すディレクトリ。None なら `routes_dir` から推定する
    pub src_root: Option<PathBuf>,
}

impl RegistryConfig {
    pub fn new(routes_dir: impl Into<PathBuf>) -> Self {
        RegistryConfig {
            routes_dir: routes_dir.into(),
            src_root: None,
        }
    }

    /// `src_root` が未指定なら、祖先の `router` ディレクトリの親を src とみなす。
    /// 見つからなければ `routes_dir` の親。
    pub fn effective_src_root(&self) -> PathBuf {
        if let Some(root) = &self.src_root {
            return root.clone();
        }
        self.routes_dir
            .ancestors()
            .find(|dir| dir.file_name().is_some_and(|name| name == "router"))
            .and_then(Path::parent)
            .or_else(|| self.routes_dir.parent())
            .unwrap_or(self.routes_dir.as_path())
            .to_path_buf()
    }
}

/// 起動時に一度だけ組み立てる、不変のルート定義テーブル
#[derive(Debug, Clone, Default)]
pub struct RouteRegistry {
    definitions: Vec<RouteDefinition>,
    /// path → definitions 内の最初の位置
    by_path: HashMap<String, usize>,
}

impl RouteRegistry {
    /// 定義を登録順のまま取り込む。同じ path が複数ある場合は先勝ち
    pub fn from_definitions(definitions: Vec<RouteDefinition>) -> Self {
        let mut by_path = HashMap::with_capacity(definitions.len());
        for (idx, def) in definitions.iter().enumerate() {
            if by_path.contains_key(&def.path) {
                tracing::debug!(path = %def.path, source = ?def.source_file, "重複したルート定義を無視します");
                continue;
            }
            by_path.insert(def.path.clone(), idx);
        }
        RouteRegistry {
            definitions,
            by_path,
        }
    }

    /// `routes_dir` 以下の .ts ファイルをパス順に解析してレジストリを作る
    pub fn discover(config: &RegistryConfig) -> Result<Self, RegistryError> {
        let routes_dir = &config.routes_dir;
        if !routes_dir.is_dir() {
            return Err(RegistryError::MissingDir(routes_dir.clone()));
        }
        let src_root = config.effective_src_root();

        // 1) WalkDir で .ts ファイル (.d.ts を除く) を集める
        let mut module_paths: Vec<PathBuf> = Vec::new();
        for entry in WalkDir::new(routes_dir) {
            let entry = entry?;
            if entry.file_type().is_file() && is_route_module(entry.path()) {
                module_paths.push(entry.path().to_path_buf());
            }
        }

        // 2) 探索順を固定する
        module_paths.sort();

        // 3) 各モジュールを解析して RouteDefinition にする
        let mut definitions = Vec::with_capacity(module_paths.len());
        for module_path in module_paths {
            let Some(parsed) = parse_route_module(&module_path)? else {
                tracing::warn!(?module_path, "ルート定義を default export していないモジュールをスキップします");
                continue;
            };

            let component_file = match &parsed.component {
                Some(specifier) => resolve_component_path(specifier, &module_path, &src_root)?,
                None => None,
            };
            if parsed.component.is_some() && component_file.is_none() {
                tracing::debug!(path = %parsed.path, component = ?parsed.component, "component のファイルが見つかりません");
            }

            tracing::debug!(path = %parsed.path, ?module_path, "ルート定義を登録しました");
            definitions.push(RouteDefinition {
                path: parsed.path,
                name: parsed.name,
                component: parsed.component,
                component_file,
                source_file: module_path,
            });
        }

        let registry = Self::from_definitions(definitions);
        tracing::info!(
            routes_dir = ?routes_dir,
            count = registry.len(),
            "ルート定義の探索が完了しました"
        );
        Ok(registry)
    }

    /// path が一致する最初の定義
    pub fn find(&self, path: &str) -> Option<&RouteDefinition> {
        self.by_path.get(path).map(|&idx| &self.definitions[idx])
    }

    pub fn definitions(&self) -> &[RouteDefinition] {
        &self.definitions
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

fn is_route_module(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    name.ends_with(".ts") && !name.ends_with(".d.ts")
}
