use super::*;

fn parse(source: &str) -> (NodeArena, NodeIndex, Vec<ParseDiagnostic>) {
    let mut parser = ParserState::new("test.cs".to_string(), source.to_string());
    let root = parser.parse_source_file();
    let diagnostics = parser.get_diagnostics().to_vec();
    (parser.into_arena(), root, diagnostics)
}

fn parse_clean(source: &str) -> (NodeArena, NodeIndex) {
    let (arena, root, diagnostics) = parse(source);
    assert!(diagnostics.is_empty(), "unexpected diagnostics: {diagnostics:?}");
    (arena, root)
}

fn items(arena: &NodeArena, root: NodeIndex) -> Vec<NodeIndex> {
    match arena.kind(root) {
        Some(NodeKind::SourceFile { items }) => items.clone(),
        other => panic!("expected source file, got {other:?}"),
    }
}

fn find_all(arena: &NodeArena, root: NodeIndex, pred: impl Fn(&NodeKind) -> bool) -> Vec<NodeIndex> {
    let mut found = Vec::new();
    arena.walk_descendants(root, |idx| {
        if arena.kind(idx).is_some_and(&pred) {
            found.push(idx);
        }
        true
    });
    found
}

#[test]
fn test_parse_expression_bodied_async_function() {
    let source = "async Task<int> F() => await G();";
    let (arena, root) = parse_clean(source);
    let items = items(&arena, root);
    assert_eq!(items.len(), 1);

    let data = arena.function_data(items[0]).expect("function");
    assert!(data.is_async());
    assert!(data.is_expression_body);
    assert_eq!(data.name.as_deref(), Some("F"));
    assert_eq!(arena.text_of(data.return_type), "Task<int>");

    let async_range = data.async_keyword.expect("async keyword range");
    assert_eq!(async_range.slice(source), "async");
    assert!(matches!(
        arena.kind(data.body),
        Some(NodeKind::AwaitExpression { .. })
    ));
    assert_eq!(arena.text_of(data.body), "await G()");
}

#[test]
fn test_parse_block_body_statements() {
    let source = r#"
async Task F(int x) {
    if (x > 0) {
        await G();
        return;
    } else {
        throw new Exception("no");
    }
    while (x < 10) x = x + 1;
    await H();
}
"#;
    let (arena, root) = parse_clean(source);
    let function = items(&arena, root)[0];
    let data = arena.function_data(function).expect("function");
    let Some(NodeKind::Block { statements }) = arena.kind(data.body) else {
        panic!("expected block body");
    };
    assert_eq!(statements.len(), 3);
    assert!(matches!(arena.kind(statements[0]), Some(NodeKind::IfStatement { .. })));
    assert!(matches!(arena.kind(statements[1]), Some(NodeKind::WhileStatement { .. })));
    assert!(matches!(
        arena.kind(statements[2]),
        Some(NodeKind::ExpressionStatement { .. })
    ));
    assert_eq!(arena.text_of(statements[2]), "await H();");
}

#[test]
fn test_parse_class_with_members_and_type_parameters() {
    let source = r#"
extern class Task<T> {
    ConfiguredTaskAwaitable<T> ConfigureAwait(bool continueOnCapturedContext);
}
class Service {
    static async Task<int> Load() => await Fetch();
    Task<int> Fetch();
}
"#;
    let (arena, root) = parse_clean(source);
    let items = items(&arena, root);
    assert_eq!(items.len(), 2);

    let Some(NodeKind::ClassDeclaration {
        name,
        type_parameters,
        members,
        is_extern,
    }) = arena.kind(items[0])
    else {
        panic!("expected class");
    };
    assert_eq!(&**name, "Task");
    assert_eq!(type_parameters.len(), 1);
    assert!(*is_extern);
    let member = arena.function_data(members[0]).expect("member");
    assert!(member.body.is_none());

    let Some(NodeKind::ClassDeclaration { members, .. }) = arena.kind(items[1]) else {
        panic!("expected class");
    };
    let load = arena.function_data(members[0]).expect("Load");
    assert!(load.modifiers.contains(ModifierFlags::STATIC | ModifierFlags::ASYNC));
}

#[test]
fn test_parse_try_and_using_forms() {
    let source = r#"
async Task F() {
    try { await G(); } catch (Exception e) { } finally { }
    using (var r = Open()) { await G(); }
    using var s = Open();
    await G();
}
"#;
    let (arena, root) = parse_clean(source);
    let tries = find_all(&arena, root, |k| matches!(k, NodeKind::TryStatement { .. }));
    assert_eq!(tries.len(), 1);
    let usings = find_all(&arena, root, |k| matches!(k, NodeKind::UsingStatement { .. }));
    assert_eq!(usings.len(), 1);
    let using_vars = find_all(&arena, root, |k| {
        matches!(k, NodeKind::VariableStatement { is_using: true, .. })
    });
    assert_eq!(using_vars.len(), 1);
}

#[test]
fn test_parse_lambdas() {
    let source = r#"
void F() {
    var a = async () => await G();
    var b = async Task<int> (int x) => await H(x);
    var c = x => x + 1;
    Run(async () => { await G(); });
}
"#;
    let (arena, root) = parse_clean(source);
    let lambdas = find_all(&arena, root, |k| matches!(k, NodeKind::Lambda(_)));
    assert_eq!(lambdas.len(), 4);

    let typed = arena.function_data(lambdas[1]).expect("lambda");
    assert!(typed.is_async());
    assert_eq!(arena.text_of(typed.return_type), "Task<int>");
    assert_eq!(typed.parameters.len(), 1);

    let untyped = arena.function_data(lambdas[2]).expect("lambda");
    assert!(!untyped.is_async());
    assert!(untyped.return_type.is_none());

    let block = arena.function_data(lambdas[3]).expect("lambda");
    assert!(!block.is_expression_body);
}

#[test]
fn test_parse_local_function() {
    let source = r#"
void Outer() {
    async Task<int> Inner() => await G();
    Task<int> Other() { return G(); }
    Console.WriteLine(1);
}
"#;
    let (arena, root) = parse_clean(source);
    let locals = find_all(&arena, root, |k| {
        matches!(k, NodeKind::LocalFunctionDeclaration(_))
    });
    assert_eq!(locals.len(), 2);
    let calls = find_all(&arena, root, |k| matches!(k, NodeKind::CallExpression { .. }));
    assert!(calls.iter().any(|&c| arena.text_of(c) == "Console.WriteLine(1)"));
}

#[test]
fn test_member_call_chain_shape() {
    let source = "async Task F() => await G().ConfigureAwait(false);";
    let (arena, root) = parse_clean(source);
    let function = items(&arena, root)[0];
    let data = arena.function_data(function).expect("function");
    let Some(NodeKind::AwaitExpression { expression }) = arena.kind(data.body) else {
        panic!("expected await");
    };
    let Some(NodeKind::CallExpression { callee, arguments }) = arena.kind(*expression) else {
        panic!("expected call");
    };
    assert_eq!(arguments.len(), 1);
    let Some(NodeKind::PropertyAccessExpression { expression, name, .. }) = arena.kind(*callee)
    else {
        panic!("expected member access");
    };
    assert_eq!(&**name, "ConfigureAwait");
    assert_eq!(arena.text_of(*expression), "G()");
}

#[test]
fn test_binary_precedence() {
    let source = "int F() => a + b * c == d && e;";
    let (arena, root) = parse_clean(source);
    let data = arena.function_data(items(&arena, root)[0]).expect("function");
    let Some(NodeKind::BinaryExpression { operator, left, .. }) = arena.kind(data.body) else {
        panic!("expected binary");
    };
    assert_eq!(*operator, unawait_scanner::SyntaxKind::AmpersandAmpersandToken);
    assert_eq!(arena.text_of(*left), "a + b * c == d");
}

#[test]
fn test_parenthesized_expression_is_not_lambda() {
    let source = "int F() => (a + b);";
    let (arena, root) = parse_clean(source);
    let data = arena.function_data(items(&arena, root)[0]).expect("function");
    assert!(matches!(
        arena.kind(data.body),
        Some(NodeKind::ParenthesizedExpression { .. })
    ));
    let inner = arena.skip_parentheses(data.body);
    assert_eq!(arena.text_of(inner), "a + b");
    assert_eq!(arena.parent_skipping_parentheses(inner), arena.parent(data.body));
}

#[test]
fn test_parent_links() {
    let source = "async Task F() { await G(); }";
    let (arena, root) = parse_clean(source);
    let awaits = find_all(&arena, root, |k| matches!(k, NodeKind::AwaitExpression { .. }));
    assert_eq!(awaits.len(), 1);
    let chain: Vec<NodeIndex> = arena.ancestors(awaits[0]).collect();
    assert!(matches!(
        arena.kind(chain[0]),
        Some(NodeKind::ExpressionStatement { .. })
    ));
    assert!(matches!(arena.kind(chain[1]), Some(NodeKind::Block { .. })));
    assert!(arena.is_function_like(chain[2]));
    assert_eq!(*chain.last().expect("root"), root);
}

#[test]
fn test_ranges_exclude_trivia() {
    let source = "  // leading comment\n  async Task F() { }  ";
    let (arena, root) = parse_clean(source);
    let function = items(&arena, root)[0];
    assert_eq!(arena.text_of(function), "async Task F() { }");
}

#[test]
fn test_missing_semicolon_reports_expected() {
    let (_, _, diagnostics) = parse("async Task F() { await G() }");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message, "';' expected.");
}

#[test]
fn test_recovery_makes_progress_on_garbage() {
    let (arena, root, diagnostics) = parse("} ) ; async Task F() => await G();");
    assert!(!diagnostics.is_empty());
    let functions = items(&arena, root)
        .into_iter()
        .filter(|&i| arena.function_data(i).is_some())
        .count();
    assert_eq!(functions, 1);
}

#[test]
fn test_deep_nesting_is_reported_not_overflowed() {
    let mut source = String::from("int F() => ");
    source.push_str(&"(".repeat(2000));
    source.push('1');
    source.push_str(&")".repeat(2000));
    source.push(';');
    // Debug builds use large frames; give the parser room to hit its own limit.
    let diagnostics = std::thread::Builder::new()
        .stack_size(32 * 1024 * 1024)
        .spawn(move || parse(&source).2)
        .expect("spawn parser thread")
        .join()
        .expect("parser thread");
    assert!(diagnostics.iter().any(|d| d.code == 1200));
}

fn chain(term: &str, separator: &str, count: usize) -> String {
    vec![term; count].join(separator)
}

#[test]
fn test_long_binary_chain_stops_at_recursion_limit() {
    let source = format!("void F() {{ var x = {}; Log(); }}", chain("1", " + ", 10_000));
    let (arena, root, diagnostics) = parse(&source);

    let too_deep: Vec<_> = diagnostics.iter().filter(|d| d.code == 1200).collect();
    assert_eq!(too_deep.len(), 1, "{diagnostics:?}");
    assert_eq!(diagnostics.len(), 1, "{diagnostics:?}");

    let binaries = find_all(&arena, root, |k| matches!(k, NodeKind::BinaryExpression { .. }));
    assert!(binaries.len() <= unawait_common::limits::MAX_PARSER_RECURSION_DEPTH as usize);
    // The statement after the chain is still parsed.
    let calls = find_all(&arena, root, |k| matches!(k, NodeKind::CallExpression { .. }));
    assert_eq!(calls.len(), 1);
}

#[test]
fn test_long_call_chain_stops_at_recursion_limit() {
    let source = format!("void F() {{ Builder(){}; }}", ".Next()".repeat(10_000));
    let (arena, root, diagnostics) = parse(&source);

    assert_eq!(diagnostics.len(), 1, "{diagnostics:?}");
    assert_eq!(diagnostics[0].code, 1200);
    let calls = find_all(&arena, root, |k| matches!(k, NodeKind::CallExpression { .. }));
    assert!(calls.len() <= unawait_common::limits::MAX_PARSER_RECURSION_DEPTH as usize);
}

#[test]
fn test_binary_chain_below_limit_is_clean() {
    let source = format!("int F() => {};", chain("1", " * ", 100));
    let (arena, root) = parse_clean(&source);
    let binaries = find_all(&arena, root, |k| matches!(k, NodeKind::BinaryExpression { .. }));
    assert_eq!(binaries.len(), 99);
}
