//! # Module Assembly
//!
//! Walks the top-level items of a script and fills the container for its
//! document kind. Assembly is all-or-nothing: the first failing item aborts
//! the script.

use super::expressions::{lower_children, lower_node};
use super::statements::lower_block;
use crate::error::LowerError;
use crate::module::{PrdModule, ServiceModule};
use crate::printer::Printer;
use crate::statement::{Function, Parameter, Process};
use quest_parser::{CstNode, NodeKind, TokenKind};

// =============================================================================
// SERVICE
// =============================================================================

/// Assemble a `@kind service` script.
pub fn assemble_service(root: &CstNode) -> Result<ServiceModule, LowerError> {
    let mut module = ServiceModule::default();

    for item in root.significant_children() {
        match item.kind {
            NodeKind::KindDecl => {}
            NodeKind::BusinessHeader => set_business(&mut module.biz_module, item)?,
            NodeKind::ProcessDecl => {
                let process = lower_process(item)?;
                tracing::debug!(process = %process.name, statements = process.children.len(), "assembled process");
                module.put_process(process.name.clone(), process);
            }
            NodeKind::FunctionDecl => {
                let function = lower_function(item)?;
                tracing::debug!(function = %function.name, statements = function.children.len(), "assembled function");
                module.put_function(function.name.clone(), function);
            }
            _ => return Err(unsupported(item)),
        }
    }
    Ok(module)
}

/// Lower `process name { ... }`.
pub fn lower_process(node: &CstNode) -> Result<Process, LowerError> {
    let name = lower_name(node)?;
    let children = lower_block(body(node)?)?;
    Ok(Process::new(name, children))
}

/// Lower `function name(params) { ... }`.
pub fn lower_function(node: &CstNode) -> Result<Function, LowerError> {
    let name = lower_name(node)?;
    let parameters = node.find_child(NodeKind::Parameters).map(lower_parameters).unwrap_or_default();
    let children = lower_block(body(node)?)?;
    Ok(Function::new(name, parameters, children))
}

fn lower_parameters(node: &CstNode) -> Vec<Parameter> {
    let mut parameters = Vec::new();
    let mut pending_type = None;
    for child in node.significant_children() {
        match child.kind {
            NodeKind::Type => pending_type = Some(child.full_text()),
            NodeKind::Token(TokenKind::Identifier) => {
                if let Some(type_name) = pending_type.take() {
                    parameters.push(Parameter { type_name, name: child.text_or_empty().to_string() });
                }
            }
            _ => {}
        }
    }
    parameters
}

// =============================================================================
// PRD
// =============================================================================

/// Assemble a `@kind prd` script.
pub fn assemble_prd(root: &CstNode) -> Result<PrdModule, LowerError> {
    let mut module = PrdModule::default();

    for item in root.significant_children() {
        match item.kind {
            NodeKind::KindDecl => {}
            NodeKind::BusinessHeader => set_business(&mut module.biz_module, item)?,
            NodeKind::RequirementDecl => {
                let (name, items) = lower_requirement(item)?;
                tracing::debug!(requirement = %name, items = items.len(), "assembled requirement");
                module.put_requirement(name, items);
            }
            _ => return Err(unsupported(item)),
        }
    }
    Ok(module)
}

/// Lower `requirement name { "item"; ... }` to its name and unquoted items.
pub fn lower_requirement(node: &CstNode) -> Result<(String, Vec<String>), LowerError> {
    let name = lower_name(node)?;
    let items = node
        .children
        .iter()
        .filter(|child| child.kind == NodeKind::Token(TokenKind::String))
        .map(|child| unquote(child.text_or_empty()).to_string())
        .collect();
    Ok((name, items))
}

fn unquote(text: &str) -> &str {
    ['"', '\'']
        .into_iter()
        .find_map(|quote| text.strip_prefix(quote).and_then(|rest| rest.strip_suffix(quote)))
        .unwrap_or(text)
}

// =============================================================================
// SHARED
// =============================================================================

/// Business name of a header: its lowered parts rendered back to back,
/// with the back-quote delimiters suppressed.
pub fn business_name(header: &CstNode) -> Result<String, LowerError> {
    let name = header
        .find_child(NodeKind::BusinessName)
        .ok_or_else(|| LowerError::InvalidCst("business header missing name".to_string()))?;
    Ok(Printer::content().print_all(&lower_children(&name.children)?).trim().to_string())
}

fn set_business(slot: &mut String, header: &CstNode) -> Result<(), LowerError> {
    let name = business_name(header)?;
    if !slot.is_empty() {
        tracing::warn!(previous = %slot, current = %name, "business module declared twice, keeping the last");
    }
    *slot = name;
    Ok(())
}

/// Render the declared name token of a process, function or requirement.
fn lower_name(node: &CstNode) -> Result<String, LowerError> {
    let token = node
        .find_token(TokenKind::Identifier)
        .ok_or_else(|| LowerError::InvalidCst(format!("{} missing name", node.kind.name())))?;
    Ok(lower_node(token)?.map(|name| name.render()).unwrap_or_default())
}

fn body(node: &CstNode) -> Result<&CstNode, LowerError> {
    node.find_child(NodeKind::Block)
        .ok_or_else(|| LowerError::InvalidCst(format!("{} missing body", node.kind.name())))
}

fn unsupported(node: &CstNode) -> LowerError {
    LowerError::UnsupportedNode { rule: node.kind.name(), span: node.span }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statement::StatementKind;
    use quest_parser::parse;

    fn service(source: &str) -> Result<ServiceModule, LowerError> {
        let cst = parse(source);
        assert!(cst.is_ok(), "errors: {:?}", cst.errors);
        assemble_service(&cst.root)
    }

    #[test]
    fn test_business_and_process() {
        let module = service("@kind service;\n@business `订单业务`;\nprocess biz {\nString id = \"1\";\n}").expect("module");
        assert_eq!(module.biz_module, "订单业务");
        let process = module.process("biz").expect("process");
        assert_eq!(process.children.len(), 1);
        assert_eq!(process.children[0].kind(), StatementKind::Variable);
        assert_eq!(process.render(), "String id = \"1\";");
    }

    #[test]
    fn test_function_parameters() {
        let module = service("function total(List<Item> items, int limit) { return limit; }").expect("module");
        let function = module.function("total").expect("function");
        assert_eq!(
            function.parameters,
            vec![
                Parameter { type_name: "List<Item>".into(), name: "items".into() },
                Parameter { type_name: "int".into(), name: "limit".into() },
            ]
        );
        assert_eq!(function.render(), "return limit;");
    }

    #[test]
    fn test_duplicate_process_keeps_last() {
        let module = service("process p { a = 1; }\nprocess p { b = 2; c = 3; }").expect("module");
        assert_eq!(module.processes.len(), 1);
        assert_eq!(module.process("p").map(|p| p.children.len()), Some(2));
    }

    #[test]
    fn test_requirement_in_service_is_rejected() {
        let result = service("@kind service;\nrequirement r { \"x\"; }");
        assert!(matches!(result, Err(LowerError::UnsupportedNode { ref rule, .. }) if rule == "RequirementDecl"));
    }

    #[test]
    fn test_prd_requirements() {
        let cst = parse("@kind prd;\n@business `用户中心`;\nrequirement login {\n\"支持手机号登录\";\n'支持邮箱登录';\n}");
        let module = assemble_prd(&cst.root).expect("module");
        assert_eq!(module.biz_module, "用户中心");
        assert_eq!(module.requirements["login"], vec!["支持手机号登录".to_string(), "支持邮箱登录".to_string()]);
    }

    #[test]
    fn test_process_in_prd_is_rejected() {
        let cst = parse("@kind prd;\nprocess p { }");
        assert!(matches!(assemble_prd(&cst.root), Err(LowerError::UnsupportedNode { .. })));
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("\"a\""), "a");
        assert_eq!(unquote("'b'"), "b");
        assert_eq!(unquote("c"), "c");
    }
}
