use super::*;
use crate::test_support::{analyze, with_decls};

#[test]
fn test_registry_knows_only_the_redundant_await_fix() {
    let fixes = CodeFixRegistry::fixes_for_error_code(diagnostic_codes::UNNECESSARY_ASYNC_AWAIT);
    assert_eq!(fixes.len(), 1);
    assert_eq!(fixes[0].0, "removeUnnecessaryAsync");
    assert!(CodeFixRegistry::has_fixes(90001));
    assert!(!CodeFixRegistry::has_fixes(1005));
}

#[test]
fn test_fix_positions_are_one_based() {
    let analyzed = analyze(&with_decls("async Task F() {\n    await H();\n}"));
    let findings = analyzed.findings();
    let fix = remove_unnecessary_async_fix(&analyzed.ctx(), &findings[0]).expect("fix");
    assert_eq!(fix.fix_id.as_deref(), Some("fixRemoveUnnecessaryAsync"));
    assert_eq!(fix.changes.len(), 1);
    assert_eq!(fix.changes[0].file_name, "test.cs");

    let changes = &fix.changes[0].text_changes;
    assert_eq!(changes.len(), 2);
    let decl_lines = with_decls("").lines().count() as u32;

    // Statement first, then the keyword.
    assert_eq!(changes[0].new_text, "return H();");
    assert_eq!(
        changes[0].start,
        CodeFixPosition {
            line: decl_lines + 2,
            offset: 5
        }
    );
    assert_eq!(changes[1].new_text, "");
    assert_eq!(
        changes[1].start,
        CodeFixPosition {
            line: decl_lines + 1,
            offset: 1
        }
    );
    assert_eq!(
        changes[1].end,
        CodeFixPosition {
            line: decl_lines + 1,
            offset: 7
        }
    );
}

#[test]
fn test_fix_serializes_in_tsserver_shape() {
    let analyzed = analyze(&with_decls("async Task<int> F() => await G();"));
    let findings = analyzed.findings();
    let fix = remove_unnecessary_async_fix(&analyzed.ctx(), &findings[0]).expect("fix");
    let json = serde_json::to_value(&fix).expect("serialize");
    assert_eq!(json["fixName"], "removeUnnecessaryAsync");
    assert_eq!(json["changes"][0]["fileName"], "test.cs");
    assert!(json["changes"][0]["textChanges"][0]["start"]["line"].is_u64());
}
