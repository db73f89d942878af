//! Restricted literal evaluator for locale modules.
//!
//! Locale files are JS/TS modules that export one object literal:
//!
//! ```text
//! export default {
//!   nav: { home: "Home", "sign-in": "Sign in" },
//!   tags: ["fast", "friendly"],
//! } as const;
//! ```
//!
//! The source is parsed with swc and the AST is walked by [`Evaluator`],
//! which understands object, array, string, number and boolean literals and
//! nothing else. Identifiers, calls, spreads and template interpolation are
//! rejected with a [`ParseError`] pointing at the offending node; the module
//! is never executed.

use std::sync::Arc;

use swc_common::{BytePos, FileName, GLOBALS, Globals, SourceMap, Span, Spanned};
use swc_ecma_ast::{
    ArrayLit, AssignOp, AssignTarget, Decl, Expr, Lit, MemberProp, Module, ModuleDecl, ModuleItem,
    ObjectLit, Pat, Prop, PropName, PropOrSpread, SimpleAssignTarget, Stmt, Str, Tpl, UnaryOp,
};
use swc_ecma_parser::{Parser, StringInput, Syntax, TsSyntax};
use thiserror::Error;

use crate::core::tree::{LocaleTree, Node, Scalar, format_number};

/// A locale source that could not be turned into a tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}, column {column}: {message}")]
pub struct ParseError {
    /// Byte offset into the source text.
    pub offset: usize,
    /// 1-based line.
    pub line: usize,
    /// 1-based column, in characters.
    pub column: usize,
    pub message: String,
}

/// How the object literal was exported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportForm {
    /// `export default { ... }`
    Default,
    /// `export const name = { ... }`
    Named(String),
    /// `module.exports = { ... }`
    CommonJs,
}

/// A parsed locale module: its tree and the export form to write it back with.
#[derive(Debug, Clone, PartialEq)]
pub struct LocaleDocument {
    pub tree: LocaleTree,
    pub export: ExportForm,
}

impl LocaleDocument {
    pub fn new(tree: LocaleTree) -> Self {
        Self {
            tree,
            export: ExportForm::Default,
        }
    }
}

/// Parse locale module source text into a [`LocaleDocument`].
pub fn parse_locale_source(source: &str) -> Result<LocaleDocument, ParseError> {
    let source_map: Arc<SourceMap> = Default::default();

    GLOBALS.set(&Globals::new(), || {
        let source_file =
            source_map.new_source_file(FileName::Anon.into(), source.to_string());
        let evaluator = Evaluator::new(source, source_file.start_pos);

        let syntax = Syntax::Typescript(TsSyntax::default());
        let mut parser = Parser::new(syntax, StringInput::from(&*source_file), None);

        let module = parser
            .parse_module()
            .map_err(|e| evaluator.error_at(e.span(), e.kind().msg()))?;

        if let Some(e) = parser.take_errors().into_iter().next() {
            return Err(evaluator.error_at(e.span(), e.kind().msg()));
        }

        evaluator.document(&module)
    })
}

/// Parse source text and keep only the tree.
pub fn parse_locale_tree(source: &str) -> Result<LocaleTree, ParseError> {
    parse_locale_source(source).map(|document| document.tree)
}

/// Strip TypeScript-only wrappers: `as const`, `satisfies T`, `as T`, parens.
fn unwrap_ts_expr(expr: &Expr) -> &Expr {
    match expr {
        Expr::TsAs(ts_as) => unwrap_ts_expr(&ts_as.expr),
        Expr::TsConstAssertion(ts_const) => unwrap_ts_expr(&ts_const.expr),
        Expr::TsSatisfies(ts_sat) => unwrap_ts_expr(&ts_sat.expr),
        Expr::Paren(paren) => unwrap_ts_expr(&paren.expr),
        _ => expr,
    }
}

fn describe_rejected(expr: &Expr) -> &'static str {
    match expr {
        Expr::Ident(_) => "variable references are not allowed",
        Expr::Call(_) | Expr::New(_) => "function calls are not allowed",
        Expr::Member(_) | Expr::OptChain(_) => "member access is not allowed",
        Expr::Fn(_) | Expr::Arrow(_) | Expr::Class(_) => "functions and classes are not allowed",
        Expr::TaggedTpl(_) => "tagged templates are not allowed",
        Expr::Object(_) | Expr::Array(_) => "lists may only contain strings, numbers and booleans",
        Expr::Lit(Lit::Null(_)) => "null is not a supported value",
        Expr::Lit(Lit::Regex(_)) => "regular expressions are not allowed",
        Expr::Lit(Lit::BigInt(_)) => "bigint literals are not supported",
        Expr::Bin(_) | Expr::Cond(_) | Expr::Assign(_) | Expr::Update(_) | Expr::Seq(_) => {
            "expressions are not allowed, only literal values"
        }
        _ => "only literal values are allowed",
    }
}

struct Evaluator<'a> {
    source: &'a str,
    start_pos: BytePos,
    line_index: Vec<usize>,
}

impl<'a> Evaluator<'a> {
    fn new(source: &'a str, start_pos: BytePos) -> Self {
        Self {
            source,
            start_pos,
            line_index: build_line_index(source),
        }
    }

    fn error_at(&self, span: Span, message: impl Into<String>) -> ParseError {
        let offset = (span.lo.0.saturating_sub(self.start_pos.0) as usize).min(self.source.len());
        self.error_at_offset(offset, message)
    }

    fn error_at_offset(&self, offset: usize, message: impl Into<String>) -> ParseError {
        let line = offset_to_line(&self.line_index, offset);
        let line_start = self.line_index[line - 1];
        let column = self
            .source
            .get(line_start..offset)
            .map(|prefix| prefix.chars().count())
            .unwrap_or(0)
            + 1;
        ParseError {
            offset,
            line,
            column,
            message: message.into(),
        }
    }

    fn document(&self, module: &Module) -> Result<LocaleDocument, ParseError> {
        let mut found: Option<(ExportForm, &Expr)> = None;

        for item in &module.body {
            let candidate = match item {
                ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultExpr(export)) => {
                    Some((ExportForm::Default, &*export.expr))
                }
                ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(export)) => match &export.decl {
                    Decl::Var(var) => {
                        let [declarator] = var.decls.as_slice() else {
                            return Err(self.error_at(
                                var.span,
                                "export exactly one declaration per locale module",
                            ));
                        };
                        let Pat::Ident(binding) = &declarator.name else {
                            return Err(self.error_at(
                                declarator.span,
                                "destructuring exports are not allowed",
                            ));
                        };
                        let Some(init) = &declarator.init else {
                            return Err(self.error_at(
                                declarator.span,
                                "exported declaration has no value",
                            ));
                        };
                        Some((ExportForm::Named(binding.id.sym.to_string()), &**init))
                    }
                    Decl::TsInterface(_) | Decl::TsTypeAlias(_) => None,
                    _ => {
                        return Err(self.error_at(
                            item.span(),
                            "only an object literal may be exported",
                        ));
                    }
                },
                ModuleItem::ModuleDecl(ModuleDecl::Import(import)) if import.type_only => None,
                ModuleItem::ModuleDecl(ModuleDecl::Import(import)) => {
                    return Err(self.error_at(
                        import.span,
                        "imports are not allowed (type-only imports are)",
                    ));
                }
                ModuleItem::Stmt(Stmt::Empty(_)) => None,
                ModuleItem::Stmt(Stmt::Decl(Decl::TsInterface(_) | Decl::TsTypeAlias(_))) => None,
                ModuleItem::Stmt(Stmt::Expr(stmt)) => match self.commonjs_export(&stmt.expr) {
                    Some(value) => Some((ExportForm::CommonJs, value)),
                    None => {
                        return Err(self.error_at(
                            stmt.span,
                            "statements are not allowed in a locale module",
                        ));
                    }
                },
                other => {
                    return Err(self.error_at(
                        other.span(),
                        "only a single exported object literal is allowed",
                    ));
                }
            };

            if let Some(candidate) = candidate {
                if found.is_some() {
                    return Err(self.error_at(
                        item.span(),
                        "only one exported object literal is allowed",
                    ));
                }
                found = Some(candidate);
            }
        }

        let Some((export, expr)) = found else {
            return Err(self.error_at_offset(0, "no exported object literal found"));
        };

        match unwrap_ts_expr(expr) {
            Expr::Object(obj) => Ok(LocaleDocument {
                tree: self.object(obj)?,
                export,
            }),
            other => Err(self.error_at(
                other.span(),
                "the exported value must be an object literal",
            )),
        }
    }

    /// Match `module.exports = <expr>` and return `<expr>`.
    fn commonjs_export<'e>(&self, expr: &'e Expr) -> Option<&'e Expr> {
        let Expr::Assign(assign) = expr else {
            return None;
        };
        if assign.op != AssignOp::Assign {
            return None;
        }
        let AssignTarget::Simple(SimpleAssignTarget::Member(member)) = &assign.left else {
            return None;
        };
        let Expr::Ident(object) = &*member.obj else {
            return None;
        };
        let MemberProp::Ident(property) = &member.prop else {
            return None;
        };
        if &*object.sym == "module" && &*property.sym == "exports" {
            Some(&*assign.right)
        } else {
            None
        }
    }

    fn object(&self, obj: &ObjectLit) -> Result<LocaleTree, ParseError> {
        let mut tree = LocaleTree::new();

        for prop in &obj.props {
            match prop {
                PropOrSpread::Spread(spread) => {
                    return Err(self.error_at(spread.span(), "spread properties are not allowed"));
                }
                PropOrSpread::Prop(prop) => match &**prop {
                    Prop::KeyValue(kv) => {
                        let key = self.key(&kv.key)?;
                        let value = self.value(&kv.value)?;
                        tree.insert(key, value);
                    }
                    Prop::Shorthand(ident) => {
                        return Err(self.error_at(
                            ident.span,
                            format!("shorthand property '{}' refers to a variable", ident.sym),
                        ));
                    }
                    other => {
                        return Err(self.error_at(
                            other.span(),
                            "methods and accessors are not allowed",
                        ));
                    }
                },
            }
        }

        Ok(tree)
    }

    fn key(&self, key: &PropName) -> Result<String, ParseError> {
        match key {
            PropName::Ident(ident) => Ok(ident.sym.to_string()),
            PropName::Str(s) => self.string(s),
            PropName::Num(n) => self.number(n.span, n.value).map(format_number),
            PropName::Computed(computed) => match unwrap_ts_expr(&computed.expr) {
                Expr::Lit(Lit::Str(s)) => self.string(s),
                Expr::Tpl(tpl) => self.template(tpl),
                other => Err(self.error_at(
                    other.span(),
                    "computed keys must be string literals",
                )),
            },
            other => Err(self.error_at(other.span(), "unsupported property key")),
        }
    }

    fn value(&self, expr: &Expr) -> Result<Node, ParseError> {
        match unwrap_ts_expr(expr) {
            Expr::Object(obj) => self.object(obj).map(Node::Map),
            Expr::Array(arr) => self.array(arr).map(Node::List),
            other => self.scalar(other).map(Node::Scalar),
        }
    }

    fn array(&self, arr: &ArrayLit) -> Result<Vec<Scalar>, ParseError> {
        let mut items = Vec::with_capacity(arr.elems.len());

        for elem in &arr.elems {
            match elem {
                None => return Err(self.error_at(arr.span, "array holes are not allowed")),
                Some(elem) if elem.spread.is_some() => {
                    return Err(self.error_at(elem.expr.span(), "spread elements are not allowed"));
                }
                Some(elem) => items.push(self.scalar(&elem.expr)?),
            }
        }

        Ok(items)
    }

    fn scalar(&self, expr: &Expr) -> Result<Scalar, ParseError> {
        match unwrap_ts_expr(expr) {
            Expr::Lit(Lit::Str(s)) => self.string(s).map(Scalar::String),
            Expr::Lit(Lit::Num(n)) => self.number(n.span, n.value).map(Scalar::Number),
            Expr::Lit(Lit::Bool(b)) => Ok(Scalar::Bool(b.value)),
            Expr::Unary(unary) if matches!(unary.op, UnaryOp::Minus | UnaryOp::Plus) => {
                match unwrap_ts_expr(&unary.arg) {
                    Expr::Lit(Lit::Num(n)) if unary.op == UnaryOp::Minus => {
                        self.number(n.span, -n.value).map(Scalar::Number)
                    }
                    Expr::Lit(Lit::Num(n)) => self.number(n.span, n.value).map(Scalar::Number),
                    other => Err(self.error_at(other.span(), describe_rejected(other))),
                }
            }
            Expr::Tpl(tpl) => self.template(tpl).map(Scalar::String),
            other => Err(self.error_at(other.span(), describe_rejected(other))),
        }
    }

    /// Literals like `1e400` overflow to infinity, which has no literal spelling.
    fn number(&self, span: Span, value: f64) -> Result<f64, ParseError> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(self.error_at(span, "number is out of range"))
        }
    }

    fn string(&self, s: &Str) -> Result<String, ParseError> {
        s.value
            .as_str()
            .map(|v| v.to_string())
            .ok_or_else(|| self.error_at(s.span, "string is not valid UTF-8"))
    }

    /// A template literal without `${}` substitutions is a plain string.
    fn template(&self, tpl: &Tpl) -> Result<String, ParseError> {
        if let Some(first) = tpl.exprs.first() {
            return Err(self.error_at(first.span(), "template interpolation is not allowed"));
        }

        let lo = (tpl.span.lo.0.saturating_sub(self.start_pos.0)) as usize;
        let hi = (tpl.span.hi.0.saturating_sub(self.start_pos.0)) as usize;
        let raw = self
            .source
            .get(lo + 1..hi.saturating_sub(1))
            .ok_or_else(|| self.error_at(tpl.span, "malformed template literal"))?;

        unescape_template(raw)
            .ok_or_else(|| self.error_at(tpl.span, "invalid escape sequence in template literal"))
    }
}

/// Resolve the escape sequences of a template literal's raw text.
fn unescape_template(raw: &str) -> Option<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\r' {
            // Template literals normalize CRLF and CR to LF.
            if chars.peek() == Some(&'\n') {
                chars.next();
            }
            out.push('\n');
            continue;
        }
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            '0' => out.push('\0'),
            '\n' => {}
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
            }
            'x' => {
                let hex: String = (0..2).filter_map(|_| chars.next()).collect();
                out.push(char::from_u32(u32::from_str_radix(&hex, 16).ok()?)?);
            }
            'u' => {
                let code = if chars.peek() == Some(&'{') {
                    chars.next();
                    let hex: String = chars.by_ref().take_while(|c| *c != '}').collect();
                    u32::from_str_radix(&hex, 16).ok()?
                } else {
                    let hex: String = (0..4).filter_map(|_| chars.next()).collect();
                    if hex.len() != 4 {
                        return None;
                    }
                    u32::from_str_radix(&hex, 16).ok()?
                };
                out.push(char::from_u32(code)?);
            }
            other => out.push(other),
        }
    }

    Some(out)
}

/// Build an index of line start byte offsets for O(log n) line lookups.
///
/// Line 1 starts at offset 0, line 2 starts after the first '\n', etc.
fn build_line_index(content: &str) -> Vec<usize> {
    let mut offsets = vec![0];
    for (i, c) in content.char_indices() {
        if c == '\n' {
            offsets.push(i + 1);
        }
    }
    offsets
}

/// Find the 1-based line number for a byte offset using binary search.
fn offset_to_line(line_index: &[usize], offset: usize) -> usize {
    match line_index.binary_search(&offset) {
        Ok(line) => line + 1,
        Err(line) => line,
    }
}
