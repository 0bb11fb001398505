use super::*;
use crate::{CallTarget, DeclarationTable, SemanticQueries};
use unawait_parser::ParserState;

struct Bound {
    interner: TypeInterner,
    arena: NodeArena,
    root: NodeIndex,
    model: SemanticModel,
}

fn bind(source: &str) -> Bound {
    let interner = TypeInterner::new();
    let mut parser = ParserState::new("test.cs".to_string(), source.to_string());
    let root = parser.parse_source_file();
    assert!(
        parser.get_diagnostics().is_empty(),
        "parse errors: {:?}",
        parser.get_diagnostics()
    );
    let arena = parser.into_arena();

    let mut declarations = DeclarationTable::with_prelude(&interner);
    declarations.declare_source_file(&interner, &arena, root);
    let model = BinderState::new(&interner, &declarations).bind_source_file(&arena, root);
    Bound {
        interner,
        arena,
        root,
        model,
    }
}

impl Bound {
    fn find(&self, text: &str, pred: impl Fn(&NodeKind) -> bool) -> NodeIndex {
        let mut found = NodeIndex::NONE;
        self.arena.walk_descendants(self.root, |idx| {
            if found.is_none()
                && self.arena.kind(idx).is_some_and(&pred)
                && self.arena.text_of(idx) == text
            {
                found = idx;
            }
            true
        });
        assert!(found.is_some(), "no node with text {text:?}");
        found
    }

    fn call(&self, text: &str) -> NodeIndex {
        self.find(text, |k| matches!(k, NodeKind::CallExpression { .. }))
    }

    fn type_text(&self, node: NodeIndex) -> Option<String> {
        self.model.type_of(node).map(|ty| self.interner.format(ty))
    }
}

#[test]
fn test_prelude_declares_task_types() {
    let interner = TypeInterner::new();
    let declarations = DeclarationTable::with_prelude(&interner);
    assert!(declarations.class("Task", 0).is_some());
    assert!(declarations.class("Task", 1).is_some());
    assert!(declarations.class("ValueTask", 1).is_some());
    let delay = declarations
        .class("Task", 0)
        .and_then(|class| class.method("Delay", 1))
        .expect("Task.Delay");
    assert!(delay.is_static);
    assert_eq!(interner.format(delay.return_type), "Task");
}

#[test]
fn test_free_call_resolves_declared_result_type() {
    let bound = bind(
        r#"
Task<int> G();
async Task<int> F() => await G();
"#,
    );
    let call = bound.call("G()");
    assert_eq!(
        bound.model.call_target(call),
        Some(&CallTarget {
            name: "G".into(),
            return_type: bound.interner.named("Task", vec![bound.interner.named("int", Vec::new())]),
        })
    );
    let await_expr = bound.find("await G()", |k| matches!(k, NodeKind::AwaitExpression { .. }));
    assert_eq!(bound.type_text(await_expr).as_deref(), Some("int"));
}

#[test]
fn test_configure_await_is_instantiated_for_receiver() {
    let bound = bind(
        r#"
Task<string> Load();
async Task<string> F() => await Load().ConfigureAwait(false);
"#,
    );
    let wrapper = bound.call("Load().ConfigureAwait(false)");
    let target = bound.model.call_target(wrapper).expect("ConfigureAwait target");
    assert_eq!(&*target.name, "ConfigureAwait");
    assert_eq!(
        bound.interner.format(target.return_type),
        "ConfiguredTaskAwaitable<string>"
    );
    let await_expr = bound.find("await Load().ConfigureAwait(false)", |k| {
        matches!(k, NodeKind::AwaitExpression { .. })
    });
    assert_eq!(bound.type_text(await_expr).as_deref(), Some("string"));
}

#[test]
fn test_static_member_call_on_class_name() {
    let bound = bind("async Task F() { await Task.Delay(1000); }");
    let delay = bound.call("Task.Delay(1000)");
    let target = bound.model.call_target(delay).expect("Task.Delay target");
    assert_eq!(&*target.name, "Delay");
    assert_eq!(bound.interner.format(target.return_type), "Task");
}

#[test]
fn test_local_shadows_class_name_for_member_calls() {
    let bound = bind(
        r#"
class Task2 { }
async Task F(Task<int> Task) { await Task.ConfigureAwait(false); }
"#,
    );
    let call = bound.call("Task.ConfigureAwait(false)");
    let target = bound.model.call_target(call).expect("instance call");
    assert_eq!(
        bound.interner.format(target.return_type),
        "ConfiguredTaskAwaitable<int>"
    );
}

#[test]
fn test_class_members_and_local_functions_resolve() {
    let bound = bind(
        r#"
class Service {
    Task<int> Fetch(int id);
    async Task<int> Load() {
        Task<int> Helper() => Fetch(1);
        return await Helper();
    }
}
"#,
    );
    let fetch = bound.call("Fetch(1)");
    assert!(bound.model.call_target(fetch).is_some());
    let helper = bound.call("Helper()");
    assert_eq!(
        bound.interner.format(bound.model.call_target(helper).expect("Helper").return_type),
        "Task<int>"
    );
}

#[test]
fn test_new_expression_type_and_locals() {
    let bound = bind(
        r#"
async Task<Widget> F() {
    var w = new Widget(1, "a");
    return await Wrap(w);
}
Task<Widget> Wrap(Widget w);
"#,
    );
    let new_expr = bound.find("new Widget(1, \"a\")", |k| matches!(k, NodeKind::NewExpression { .. }));
    assert_eq!(bound.type_text(new_expr).as_deref(), Some("Widget"));
    let w = bound.find("w", |k| matches!(k, NodeKind::Identifier { .. }));
    assert_eq!(bound.type_text(w).as_deref(), Some("Widget"));
}

#[test]
fn test_unknown_callee_has_no_target() {
    let bound = bind("async Task F() { await Missing(); }");
    let call = bound.call("Missing()");
    assert_eq!(bound.model.call_target(call), None);
    assert_eq!(bound.model.type_of(call), None);
}

#[test]
fn test_overloads_resolve_by_argument_count() {
    let bound = bind(
        r#"
Task<int> Get();
Task<string> Get(int key);
async Task<string> F() => await Get(1);
"#,
    );
    let call = bound.call("Get(1)");
    assert_eq!(
        bound.interner.format(bound.model.call_target(call).expect("Get").return_type),
        "Task<string>"
    );
}

#[test]
fn test_declared_return_types_are_recorded() {
    let bound = bind("async ValueTask<bool> F() => await G();");
    let function = bound.find("async ValueTask<bool> F() => await G();", |k| {
        matches!(k, NodeKind::FunctionDeclaration(_))
    });
    let declared = bound.model.declared_return_type(function).expect("declared type");
    assert_eq!(bound.interner.format(declared), "ValueTask<bool>");
}
