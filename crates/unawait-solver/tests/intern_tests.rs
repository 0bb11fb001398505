use super::*;
use crate::{TypeData, TypeSubstitution, instantiate};

#[test]
fn test_interner_intrinsics() {
    let interner = TypeInterner::new();

    // Intrinsics should be pre-registered
    assert_eq!(interner.lookup(TypeId::ERROR), Some(TypeData::Intrinsic(IntrinsicKind::Error)));
    assert_eq!(interner.lookup(TypeId::VOID), Some(TypeData::Intrinsic(IntrinsicKind::Void)));
    assert_eq!(interner.len(), TypeId::FIRST_USER as usize);
}

#[test]
fn test_interner_deduplication() {
    let interner = TypeInterner::new();

    let int = interner.named("int", Vec::new());
    let task_int_1 = interner.named("Task", vec![int]);
    let task_int_2 = interner.named("Task", vec![int]);
    let task = interner.named("Task", Vec::new());

    assert_eq!(task_int_1, task_int_2);
    assert_ne!(task_int_1, task);
    assert!(!task.is_intrinsic());
}

#[test]
fn test_lookup_unknown_id_is_none() {
    let interner = TypeInterner::new();
    assert_eq!(interner.lookup(TypeId(10_000)), None);
}

#[test]
fn test_format_nested_generic() {
    let interner = TypeInterner::new();
    let int = interner.named("int", Vec::new());
    let string = interner.named("string", Vec::new());
    let dict = interner.named("Dictionary", vec![string, int]);
    let task = interner.named("Task", vec![dict]);
    assert_eq!(interner.format(task), "Task<Dictionary<string, int>>");
    assert_eq!(interner.format(TypeId::VOID), "void");
}

#[test]
fn test_instantiate_replaces_type_parameters() {
    let interner = TypeInterner::new();
    let t = interner.type_parameter("T");
    let awaitable_t = interner.named("ConfiguredTaskAwaitable", vec![t]);
    let int = interner.named("int", Vec::new());

    let substitution = TypeSubstitution::from_args(&["T".into()], &[int]);
    let result = instantiate(&interner, awaitable_t, &substitution);
    assert_eq!(result, interner.named("ConfiguredTaskAwaitable", vec![int]));

    // Types without parameters are returned unchanged.
    assert_eq!(instantiate(&interner, int, &substitution), int);
}

#[test]
fn test_missing_type_argument_becomes_error() {
    let substitution = TypeSubstitution::from_args(&["T".into(), "U".into()], &[TypeId::VOID]);
    assert_eq!(substitution.get("T"), Some(TypeId::VOID));
    assert_eq!(substitution.get("U"), Some(TypeId::ERROR));
}

#[test]
fn test_simple_name_strips_namespace() {
    let data = TypeData::Named {
        name: "System.Threading.Tasks.Task".into(),
        args: Vec::new(),
    };
    assert_eq!(data.simple_name(), Some("Task"));
}
