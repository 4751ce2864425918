use swc_common::{sync::Lrc, FileName, SourceMap};
use swc_ecma_ast::*;
use swc_ecma_parser::{lexer::Lexer, Parser as SwcParser, StringInput, Syntax, TsConfig};
use swc_ecma_visit::Visit;
use std::collections::HashMap;

use std::fs;
use std::path::Path;

use crate::error::ParseError;

/// 識別子 → 変数初期化式 をたどる最大の深さ (循環参照対策)
const MAX_BINDING_DEPTH: usize = 8;

/// 1 つのルートモジュールから取り出したルート情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRoute {
    pub path: String,
    pub name: Option<String>,
    /// component の import 指定子 (例: "@/views/main/system/user/user.vue")
    pub component: Option<String>,
}

/// ルートモジュールの AST を走査して、default export と
/// それが参照する変数・import を集める Visitor
#[derive(Default)]
struct RouteModuleVisitor {
    /// `const user = ...` の変数名と初期化式
    bindings: HashMap<String, Expr>,
    /// `import User from "..."` のローカル名と指定子
    imports: HashMap<String, String>,
    /// `export default ...` の式
    default_export: Option<Expr>,
}

impl RouteModuleVisitor {
    /// `as RouteRecordRaw` / `satisfies ...` / 括弧 / 識別子参照 を剥がして実体の式にする
    fn unwrap_expr<'a>(&'a self, mut expr: &'a Expr) -> &'a Expr {
        let mut depth = 0;
        loop {
            expr = match expr {
                Expr::Paren(ParenExpr { expr, .. })
                | Expr::TsAs(TsAsExpr { expr, .. })
                | Expr::TsSatisfies(TsSatisfiesExpr { expr, .. })
                | Expr::TsConstAssertion(TsConstAssertion { expr, .. })
                | Expr::TsTypeAssertion(TsTypeAssertion { expr, .. }) => &**expr,
                Expr::Ident(ident) if depth < MAX_BINDING_DEPTH => {
                    match self.bindings.get(&*ident.sym) {
                        Some(init) => {
                            depth += 1;
                            init
                        }
                        None => return expr,
                    }
                }
                _ => return expr,
            };
        }
    }

    /// default export のオブジェクトリテラルから ParsedRoute を構築する
    fn parse_route_object(&self, obj_lit: &ObjectLit) -> Option<ParsedRoute> {
        let mut path: Option<String> = None;
        let mut name: Option<String> = None;
        let mut component: Option<String> = None;

        for prop in &obj_lit.props {
            let PropOrSpread::Prop(boxed_prop) = prop else {
                continue;
            };
            match &**boxed_prop {
                Prop::KeyValue(KeyValueProp { key, value }) => {
                    let Some(key_name) = prop_name(key) else {
                        continue;
                    };
                    match key_name.as_str() {
                        "path" => path = self.string_value(value),
                        "name" => name = self.string_value(value),
                        "component" => component = self.component_specifier(value),
                        _ => {}
                    }
                }
                // `{ path, component }` のような省略記法
                Prop::Shorthand(ident) => {
                    let binding = Expr::Ident(ident.clone());
                    match &*ident.sym {
                        "path" => path = self.string_value(&binding),
                        "name" => name = self.string_value(&binding),
                        "component" => component = self.component_specifier(&binding),
                        _ => {}
                    }
                }
                _ => {}
            }
        }

        match path {
            Some(path) => Some(ParsedRoute {
                path,
                name,
                component,
            }),
            None => {
                tracing::debug!("default export に文字列の path がありません");
                None
            }
        }
    }

    fn string_value(&self, expr: &Expr) -> Option<String> {
        match self.unwrap_expr(expr) {
            Expr::Lit(Lit::Str(Str { value, .. })) => Some(value.to_string()),
            // 埋め込み式のないテンプレートリテラル
            Expr::Tpl(Tpl { exprs, quasis, .. }) if exprs.is_empty() && quasis.len() == 1 => {
                quasis[0].cooked.as_ref().map(|s| s.to_string())
            }
            _ => None,
        }
    }

    /// component の値から import 指定子を取り出す
    ///
    /// - `() => import("x")` / `() => import("x").then(m => m.X)`
    /// - `() => { return import("x") }`
    /// - 上記を束縛した変数
    /// - `import X from "x"` で束縛した識別子
    fn component_specifier(&self, expr: &Expr) -> Option<String> {
        if let Expr::Ident(ident) = expr {
            if let Some(src) = self.imports.get(&*ident.sym) {
                return Some(src.clone());
            }
        }
        match self.unwrap_expr(expr) {
            Expr::Arrow(ArrowExpr { body, .. }) => match &**body {
                BlockStmtOrExpr::Expr(body_expr) => dynamic_import_source(body_expr),
                BlockStmtOrExpr::BlockStmt(BlockStmt { stmts, .. }) => {
                    stmts.iter().find_map(|stmt| match stmt {
                        Stmt::Return(ReturnStmt { arg: Some(arg), .. }) => {
                            dynamic_import_source(arg)
                        }
                        _ => None,
                    })
                }
            },
            Expr::Ident(ident) => self.imports.get(&*ident.sym).cloned(),
            _ => None,
        }
    }

    fn into_route(self) -> Option<ParsedRoute> {
        let default_export = self.default_export.as_ref()?;
        match self.unwrap_expr(default_export) {
            Expr::Object(obj_lit) => self.parse_route_object(obj_lit),
            other => {
                tracing::debug!("default export がオブジェクトではありません: {:?}", other);
                None
            }
        }
    }
}

impl RouteModuleVisitor {
    fn record_var_decl(&mut self, var_decl: &VarDecl) {
        for declarator in &var_decl.decls {
            if let Pat::Ident(BindingIdent { id, .. }) = &declarator.name {
                if let Some(init) = &declarator.init {
                    self.bindings.insert(id.sym.to_string(), (**init).clone());
                }
            }
        }
    }
}

impl Visit for RouteModuleVisitor {
    /// モジュール直下の宣言だけを記録する。関数やブロック内の同名変数は
    /// default export から参照されないので、中には降りない
    fn visit_module_item(&mut self, item: &ModuleItem) {
        match item {
            ModuleItem::ModuleDecl(ModuleDecl::Import(import)) => {
                for specifier in &import.specifiers {
                    if let ImportSpecifier::Default(ImportDefaultSpecifier { local, .. }) =
                        specifier
                    {
                        self.imports
                            .insert(local.sym.to_string(), import.src.value.to_string());
                    }
                }
            }
            ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultExpr(export)) => {
                self.default_export = Some((*export.expr).clone());
            }
            ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(ExportDecl {
                decl: Decl::Var(var_decl),
                ..
            }))
            | ModuleItem::Stmt(Stmt::Decl(Decl::Var(var_decl))) => self.record_var_decl(var_decl),
            _ => {}
        }
    }
}

fn prop_name(key: &PropName) -> Option<String> {
    match key {
        PropName::Ident(ident) => Some(ident.sym.to_string()),
        PropName::Str(Str { value, .. }) => Some(value.to_string()),
        _ => None,
    }
}

/// `import("x")` もしくは `import("x").then(...)` から "x" を取り出す
fn dynamic_import_source(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Paren(ParenExpr { expr, .. }) => dynamic_import_source(expr),
        Expr::Call(CallExpr {
            callee: Callee::Import(_),
            args,
            ..
        }) => match args.first().map(|arg| &*arg.expr) {
            Some(Expr::Lit(Lit::Str(Str { value, .. }))) => Some(value.to_string()),
            _ => None,
        },
        Expr::Call(CallExpr {
            callee: Callee::Expr(callee),
            ..
        }) => match &**callee {
            Expr::Member(MemberExpr { obj, .. }) => dynamic_import_source(obj),
            _ => None,
        },
        _ => None,
    }
}

/// ソース文字列を TypeScript として解析し、default export のルートを返す
///
/// 戻り値:
/// - Ok(Some(route)) → ルート定義が見つかった
/// - Ok(None)        → default export がない、または path が文字列でない
pub fn parse_route_source(file_path: &Path, src: String) -> Result<Option<ParsedRoute>, ParseError> {
    let cm: Lrc<SourceMap> = Default::default();
    let fm = cm.new_source_file(FileName::Real(file_path.to_path_buf()), src);

    // TypeScript構文でパースする設定
    let syntax = Syntax::Typescript(TsConfig {
        tsx: false,
        decorators: true,
        dts: false,
        no_early_errors: true,
        disallow_ambiguous_jsx_like: true,
    });

    let lexer = Lexer::new(syntax, Default::default(), StringInput::from(&*fm), None);
    let mut parser = SwcParser::new_from(lexer);

    let module = parser.parse_module().map_err(|e| ParseError::Syntax {
        path: file_path.to_path_buf(),
        message: format!("{:?}", e.kind()),
    })?;

    let mut visitor = RouteModuleVisitor::default();
    visitor.visit_module(&module);

    tracing::trace!(
        ?file_path,
        bindings = visitor.bindings.len(),
        imports = visitor.imports.len(),
        has_default = visitor.default_export.is_some(),
        "ルートモジュールを解析しました"
    );

    Ok(visitor.into_route())
}

pub fn parse_route_module(file_path: &Path) -> Result<Option<ParsedRoute>, ParseError> {
    let src = fs::read_to_string(file_path).map_err(|source| ParseError::Io {
        path: file_path.to_path_buf(),
        source,
    })?;
    parse_route_source(file_path, src)
}
