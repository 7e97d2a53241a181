use config::constants::QuestConfig;
use quest_ast::visitor::cst_to_ast::{lower_block, lower_children, lower_node};
use quest_ast::visitor::collect_invocations;
use quest_ast::{
    lower_script, DocumentKind, Invocation, LowerError, PipelineRegistry, Printer, Process, ServiceModule, Statement,
    StatementKind,
};
use quest_parser::{parse, NodeKind, TokenKind};

const ORDER_SERVICE: &str = r#"@kind service;
@business `订单业务`;

process createOrder {
    String id = idGenerator.next();
    Order order = new Order(id, request.amount);
    if (order.amount > 1000) {
        order.setLevel("VIP");
    } else {
        order.setLevel("NORMAL");
    }
    for (Item item : request.items) {
        order.add(item);
    }
    return order;
}

function total(List<Item> items) {
    int sum = 0;
    for (int i = 0; i < items.size(); i++) {
        sum += items.get(i).price;
    }
    return sum > 0 ? sum : 0;
}
"#;

fn lower(source: &str) -> Result<ServiceModule, LowerError> {
    let module = lower_script(source, &PipelineRegistry::standard(), &QuestConfig::default())?;
    Ok(module.as_service().cloned().expect("service module"))
}

/// Statements of `process p { <body> }`.
fn lower_body(body: &str) -> Vec<Statement> {
    let source = format!("process p {{\n{body}\n}}");
    let cst = parse(&source);
    assert!(cst.is_ok(), "errors: {:?} in {source}", cst.errors);
    let block = cst.root.children[0].find_child(NodeKind::Block).expect("block");
    lower_block(block).expect("lowered")
}

/// The single expression of `process p { <source>; }`.
fn lower_expression(source: &str) -> Statement {
    let cst = parse(&format!("process p {{ {source}; }}"));
    let block = cst.root.children[0].find_child(NodeKind::Block).expect("block");
    let statement = block.find_child(NodeKind::ExpressionStatement).expect("statement");
    lower_node(&statement.children[0]).expect("lowered").expect("node")
}

#[test]
fn scenario_a_service_module() {
    let source = "@kind service;\n@business `订单业务`;\nprocess biz {\nString id = \"1\";\n}";
    let cst = parse(source);
    assert_eq!(quest_ast::extract_kind(&cst.root), Ok(DocumentKind::Service));

    let module = lower(source).expect("module");
    assert_eq!(module.biz_module, "订单业务");

    let process = module.process("biz").expect("process biz");
    assert_eq!(process.children.len(), 1);
    assert_eq!(process.children[0].kind(), StatementKind::Variable);
    assert_eq!(process.children[0].render(), "String id = \"1\";");
}

#[test]
fn scenario_b_token_spacing() {
    assert_eq!(Statement::token(TokenKind::Comma, ",").render(), ", ");
    assert_eq!(Statement::token(TokenKind::Colon, ":").render(), ":");

    let padded = QuestConfig::new(true, 64).expect("config");
    let printer = Printer::content().with_config(&padded);
    assert_eq!(printer.print(&Statement::token(TokenKind::Colon, ":")), " : ");
    assert_eq!(printer.print(&Statement::token(TokenKind::Comma, ",")), ", ");
}

#[test]
fn scenario_c_function_invocation() {
    let node = lower_expression("foo(a, b)");
    assert_eq!(node.kind(), StatementKind::FunctionInvokeExpr);
    assert_eq!(node, Statement::Invocation(Invocation::function("foo", "a, b")));
    assert!(node.children().is_empty());
}

#[test]
fn scenario_d_method_invocation() {
    let node = lower_expression("user.getName()");
    assert_eq!(node.kind(), StatementKind::MethodInvokeExpr);
    let Statement::Invocation(call) = node else { panic!("expected invocation") };
    assert_eq!(call.receiver.as_deref(), Some("user"));
    assert_eq!(call.name, "getName");
    assert_eq!(call.arguments, "");
}

#[test]
fn full_service_assembles() {
    let module = lower(ORDER_SERVICE).expect("module");
    assert_eq!(module.biz_module, "订单业务");

    let process = module.process("createOrder").expect("createOrder");
    let kinds: Vec<StatementKind> = process.children.iter().map(Statement::kind).collect();
    assert_eq!(
        kinds,
        vec![
            StatementKind::Variable,
            StatementKind::Variable,
            StatementKind::If,
            StatementKind::For,
            StatementKind::Return
        ]
    );

    let calls: Vec<String> = collect_invocations(&process.children).iter().map(Invocation::call_text).collect();
    assert_eq!(
        calls,
        vec![
            "idGenerator.next()",
            "order.setLevel(\"VIP\")",
            "order.setLevel(\"NORMAL\")",
            "order.add(item)"
        ]
    );

    let function = module.function("total").expect("total");
    assert_eq!(function.parameters.len(), 1);
    assert_eq!(function.children.last().map(Statement::render).as_deref(), Some("return sum > 0 ? sum : 0;"));
}

#[test]
fn source_mode_rebuilds_body() {
    let module = lower(ORDER_SERVICE).expect("module");
    let function = module.function("total").expect("total");
    assert_eq!(
        function.to_source(),
        "int sum = 0;for (int i = 0; i < items.size(); i++) { sum += items.get(i).price; }return sum > 0 ? sum : 0;"
    );
}

#[test]
fn content_mode_omits_invocations() {
    let statements = lower_body("order.add(item);");
    assert_eq!(statements[0].render(), ";");
    assert_eq!(statements[0].to_source(), "order.add(item);");
}

#[test]
fn rendering_reaches_fixed_point() {
    let bodies = [
        "int a=1,b ,  c = 2;",
        "x = cond?first:second;",
        "for(int i=0;i<n;i++){total+=(int) values[i];}",
        "for (Item item : items) { if (!item.valid) { continue(); } }",
        "list = new ArrayList<>();\nwhile (it.hasNext()) { list.add(it.next()); }",
        "return a /* why */ + b;",
    ];
    for body in bodies {
        let first: String = lower_body(body).iter().map(Statement::to_source).collect();
        let second: String = lower_body(&first).iter().map(Statement::to_source).collect();
        assert_eq!(first, second, "not a fixed point for {body:?}");
    }
}

#[test]
fn long_operator_chain_renders_in_content_mode() {
    let chain = vec!["a"; 100].join(" + ");
    let body = format!("x = {chain};");
    let statements = lower_body(&body);
    assert_eq!(statements.len(), 1);

    let rendered = statements[0].render();
    assert_eq!(rendered, body);
    let again: String = lower_body(&rendered).iter().map(Statement::render).collect();
    assert_eq!(again, rendered);
}

#[test]
fn overlong_chains_are_syntax_errors() {
    let chains = [
        vec!["a"; 20_000].join(" + "),
        format!("a{}", ".b".repeat(20_000)),
        format!("a{}", "[0]".repeat(20_000)),
    ];
    for chain in chains {
        let source = format!("@kind service;\nprocess p {{\nx = {chain};\n}}\n");
        let error = lower(&source).expect_err("chain deeper than the nesting limit");
        assert!(matches!(error, LowerError::Syntax(_)), "{error}");
    }
}

#[test]
fn children_render_in_order() {
    let node = lower_expression("a - b");
    let parts: Vec<String> = node.children().iter().map(Statement::render).collect();
    assert_eq!(node.render(), parts.concat());

    let mut reversed = node.children().to_vec();
    reversed.reverse();
    let permuted = Statement::composite(quest_ast::CompositeKind::Binary, reversed);
    let expected: String = parts.iter().rev().cloned().collect();
    assert_eq!(permuted.render(), expected);
}

#[test]
fn spacing_applies_only_to_trailing_set() {
    let statements = lower_body("Object o = new Box(a , b);\nx = flag ? new Box(c) : d;");
    let mut tokens = Vec::new();
    collect_tokens(&statements, &mut tokens);

    for (kind, text, rendered) in tokens {
        match kind {
            TokenKind::Comma | TokenKind::New | TokenKind::Question => assert_eq!(rendered, format!("{text} ")),
            _ => assert_eq!(rendered, text),
        }
    }
}

fn collect_tokens(statements: &[Statement], out: &mut Vec<(TokenKind, String, String)>) {
    for statement in statements {
        if let Statement::Token { token_kind, text } = statement {
            out.push((*token_kind, text.clone(), statement.render()));
        }
        collect_tokens(statement.children(), out);
    }
}

#[test]
fn backquotes_are_suppressed() {
    let cst = parse("@business `订单 业务`;");
    let header = &cst.root.children[0];
    let name = header.find_child(NodeKind::BusinessName).expect("name");
    let lowered = lower_children(&name.children).expect("lowered");

    assert!(lowered.iter().all(|s| !matches!(s, Statement::Token { token_kind: TokenKind::Backquote, .. })));
    assert_eq!(Printer::content().print_all(&lowered), "订单 业务");
}

#[test]
fn duplicate_names_overwrite() {
    let module = lower("@kind service;\nprocess p { a(); }\nprocess p { b(); c(); }\nfunction f() { }\nfunction f() { x(); }")
        .expect("module");
    assert_eq!(module.processes.len(), 1);
    assert_eq!(module.process("p").map(|p| p.children.len()), Some(2));
    assert_eq!(module.functions.len(), 1);
    assert_eq!(module.function("f").map(|f| f.children.len()), Some(1));

    let mut direct = ServiceModule::new("x");
    direct.put_process("p", Process::new("p", Vec::new()));
    direct.put_process("p", Process::new("p", vec![Statement::primary("second")]));
    assert_eq!(direct.processes.len(), 1);
    assert_eq!(direct.processes["p"].render(), "second");
}

#[test]
fn unknown_kind_is_named_failure() {
    let error = lower("@kind report;\nprocess p { }").expect_err("unknown kind");
    assert_eq!(error, LowerError::UnrecognizedKind { found: Some("report".into()) });
    assert!(error.to_string().starts_with("unrecognized document kind"));

    let missing = lower("process p { }").expect_err("missing kind");
    assert_eq!(missing, LowerError::UnrecognizedKind { found: None });
}

#[test]
fn unsupported_statement_surfaces() {
    let cst = parse("@kind service;\nprocess p { a(); ) b(); }");
    assert!(!cst.is_ok());
    let process = cst.root.find_child(NodeKind::ProcessDecl).expect("process");
    let block = process.find_child(NodeKind::Block).expect("block");
    assert!(matches!(lower_block(block), Err(LowerError::UnsupportedStatement { .. })));
}

#[test]
fn failed_script_leaves_registry_usable() {
    let registry = PipelineRegistry::standard();
    let config = QuestConfig::default();
    assert!(lower_script("@kind service;\nprocess p { ) }", &registry, &config).is_err());
    assert!(lower_script("@kind service;\nprocess p { a(); }", &registry, &config).is_ok());
}

#[test]
fn module_serializes_to_json() {
    let module = lower_script(
        "@kind service;\n@business `订单`;\nprocess p {\nint a = 1;\n}",
        &PipelineRegistry::standard(),
        &QuestConfig::default(),
    )
    .expect("module");
    let json = serde_json::to_value(&module).expect("json");
    assert_eq!(json["kind"], "service");
    assert_eq!(json["biz_module"], "订单");
    assert_eq!(json["processes"]["p"]["children"][0]["node"], "composite");
    assert_eq!(json["processes"]["p"]["children"][0]["kind"], "variable");
}
