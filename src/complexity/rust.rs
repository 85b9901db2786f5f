//! Decision-point counting over a parsed Rust syntax tree.
//!
//! Every function or method that has a body gets its own entry. Inside a
//! body, each `if`, `while`, `for`, `loop`, `match` arm, arm guard,
//! `let ... else` and `&&`/`||` operator adds one. Closures count toward the enclosing function; nested
//! item definitions (inner `fn`, `impl`, `mod`) do not.

use syn::visit::{self, Visit};
use syn::{
    BinOp, Block, Expr, ImplItem, Item, ItemFn, ItemImpl, ItemTrait, Local, TraitItem, Type,
};

use super::FunctionComplexity;

/// Parse `source` and return per-function complexity in declaration order.
pub fn analyze_source(source: &str) -> Result<Vec<FunctionComplexity>, syn::Error> {
    let file = syn::parse_file(source)?;
    let mut collector = FunctionCollector::default();
    collector.visit_file(&file);
    Ok(collector.functions)
}

/// Complexity of a single body: 1 plus its decision points.
pub fn block_complexity(block: &Block) -> usize {
    let mut counter = DecisionCounter { decisions: 0 };
    counter.visit_block(block);
    1 + counter.decisions
}

#[derive(Default)]
struct FunctionCollector {
    functions: Vec<FunctionComplexity>,
}

impl FunctionCollector {
    fn record(&mut self, name: String, fn_token: &syn::token::Fn, block: &Block) {
        self.functions.push(FunctionComplexity {
            name,
            complexity: block_complexity(block),
            line: fn_token.span.start().line,
        });
    }
}

impl<'ast> Visit<'ast> for FunctionCollector {
    fn visit_item_fn(&mut self, item: &'ast ItemFn) {
        self.record(item.sig.ident.to_string(), &item.sig.fn_token, &item.block);
    }

    fn visit_item_impl(&mut self, item: &'ast ItemImpl) {
        let owner = type_name(&item.self_ty);
        for impl_item in &item.items {
            if let ImplItem::Fn(method) = impl_item {
                let name = qualify(owner.as_deref(), &method.sig.ident);
                self.record(name, &method.sig.fn_token, &method.block);
            }
        }
    }

    fn visit_item_trait(&mut self, item: &'ast ItemTrait) {
        let owner = item.ident.to_string();
        for trait_item in &item.items {
            if let TraitItem::Fn(method) = trait_item
                && let Some(block) = &method.default
            {
                let name = qualify(Some(&owner), &method.sig.ident);
                self.record(name, &method.sig.fn_token, block);
            }
        }
    }
}

struct DecisionCounter {
    decisions: usize,
}

impl<'ast> Visit<'ast> for DecisionCounter {
    fn visit_expr(&mut self, expr: &'ast Expr) {
        self.decisions += match expr {
            Expr::If(_) | Expr::While(_) | Expr::ForLoop(_) | Expr::Loop(_) => 1,
            Expr::Match(m) => m.arms.len() + m.arms.iter().filter(|a| a.guard.is_some()).count(),
            Expr::Binary(b) if matches!(b.op, BinOp::And(_) | BinOp::Or(_)) => 1,
            _ => 0,
        };
        visit::visit_expr(self, expr);
    }

    fn visit_local(&mut self, local: &'ast Local) {
        if local.init.as_ref().is_some_and(|init| init.diverge.is_some()) {
            self.decisions += 1;
        }
        visit::visit_local(self, local);
    }

    // nested items are counted on their own, not as part of this body
    fn visit_item(&mut self, _item: &'ast Item) {}
}

/// Receiver type name used to qualify methods; `None` when the self type
/// is not a plain (possibly referenced) path.
fn type_name(ty: &Type) -> Option<String> {
    match ty {
        Type::Path(p) => p.path.segments.last().map(|s| s.ident.to_string()),
        Type::Reference(r) => type_name(&r.elem),
        Type::Paren(p) => type_name(&p.elem),
        _ => None,
    }
}

fn qualify(owner: Option<&str>, ident: &syn::Ident) -> String {
    match owner {
        Some(o) => format!("{o}::{ident}"),
        None => ident.to_string(),
    }
}

#[cfg(test)]
#[path = "rust_test.rs"]
mod tests;
