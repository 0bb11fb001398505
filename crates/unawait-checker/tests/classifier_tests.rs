use super::*;
use crate::context::CheckerOptions;
use crate::test_support::analyze;

const DECLS: &str = r#"
Task<int> G();
Task<string> S();
Task H();
ValueTask<int> V();
Resource Open();
void Log();
"#;

fn source(body: &str) -> String {
    format!("{DECLS}\n{body}")
}

fn reason(body: &str, name: &str) -> RejectionReason {
    match analyze(&source(body)).verdict(name) {
        EligibilityVerdict::Ineligible(reason) => reason,
        EligibilityVerdict::Eligible(points) => {
            panic!("{name} unexpectedly eligible with {} points", points.len())
        }
    }
}

fn eligible_forms(body: &str, name: &str) -> Vec<EnclosingForm> {
    let verdict = analyze(&source(body)).verdict(name);
    let points = verdict
        .points()
        .unwrap_or_else(|| panic!("{name} not eligible: {verdict:?}"));
    points.iter().map(|point| point.enclosing_form).collect()
}

#[test]
fn test_expression_body_single_await_is_eligible() {
    assert_eq!(
        eligible_forms("async Task<int> F() => await G();", "F"),
        vec![EnclosingForm::TailExpression]
    );
}

#[test]
fn test_parenthesized_await_in_expression_body() {
    assert_eq!(
        eligible_forms("async Task<int> F() => (await (G()));", "F"),
        vec![EnclosingForm::TailExpression]
    );
}

#[test]
fn test_no_value_tail_statement_is_eligible() {
    assert_eq!(
        eligible_forms("async Task F() { Log(); await H(); }", "F"),
        vec![EnclosingForm::TailStatementOfBlock]
    );
}

#[test]
fn test_value_return_await_is_eligible() {
    assert_eq!(
        eligible_forms("async Task<int> F() { Log(); return await G(); }", "F"),
        vec![EnclosingForm::ReturnStatementOperand]
    );
}

#[test]
fn test_value_task_is_eligible() {
    assert_eq!(
        eligible_forms("async ValueTask<int> F() => await V();", "F"),
        vec![EnclosingForm::TailExpression]
    );
}

#[test]
fn test_discard_context_wrapper_is_unwrapped() {
    assert_eq!(
        eligible_forms(
            "async Task<int> F() { return await G().ConfigureAwait(false); }",
            "F"
        ),
        vec![EnclosingForm::ReturnStatementOperand]
    );
}

#[test]
fn test_unlisted_wrapper_is_not_unwrapped() {
    let mut options = CheckerOptions::default();
    options.discard_context_methods.clear();
    let checked = crate::test_support::analyze_with(
        &source("async Task<int> F() => await G().ConfigureAwait(false);"),
        options,
    );
    assert!(matches!(
        checked.verdict("F"),
        EligibilityVerdict::Ineligible(RejectionReason::TypeMismatch)
    ));
}

#[test]
fn test_static_delay_matches_task() {
    assert_eq!(
        eligible_forms("async Task F() { await Task.Delay(100); }", "F"),
        vec![EnclosingForm::TailStatementOfBlock]
    );
}

#[test]
fn test_both_branches_convert() {
    let body = r#"
async Task F(bool b) {
    if (b) {
        await H();
    } else {
        await Task.Delay(1);
    }
}
"#;
    assert_eq!(
        eligible_forms(body, "F"),
        vec![
            EnclosingForm::TailStatementOfBlock,
            EnclosingForm::TailStatementOfBlock
        ]
    );
}

#[test]
fn test_value_branches_with_returns() {
    let body = r#"
async Task<int> F(bool b) {
    if (b) {
        return await G();
    }
    return await G().ConfigureAwait(false);
}
"#;
    assert_eq!(eligible_forms(body, "F").len(), 2);
}

#[test]
fn test_await_followed_by_bare_return() {
    let body = r#"
async Task F(bool b) {
    if (b) {
        await H();
        return;
    }
    await H();
}
"#;
    assert_eq!(
        eligible_forms(body, "F"),
        vec![
            EnclosingForm::ReturnStatementOperand,
            EnclosingForm::TailStatementOfBlock
        ]
    );
}

#[test]
fn test_throwing_branch_does_not_fall_through() {
    let body = r#"
async Task F(bool b) {
    if (b) {
        throw new InvalidOperationException();
    } else {
        await H();
    }
}
"#;
    assert_eq!(eligible_forms(body, "F").len(), 1);
}

#[test]
fn test_not_async() {
    assert_eq!(reason("Task<int> F() => G();", "F"), RejectionReason::NotAsync);
}

#[test]
fn test_no_awaits() {
    assert_eq!(
        reason("async Task<int> F() { return 1; }", "F"),
        RejectionReason::NoSuspensionPoints
    );
}

#[test]
fn test_try_block_rejects() {
    let body = r#"
async Task<int> F() {
    try {
        return await G();
    } catch (Exception e) {
        throw;
    }
}
"#;
    assert_eq!(reason(body, "F"), RejectionReason::ProtectedScope);
}

#[test]
fn test_try_finally_rejects() {
    let body = "async Task<int> F() { try { return await G(); } finally { Log(); } }";
    assert_eq!(reason(body, "F"), RejectionReason::ProtectedScope);
}

#[test]
fn test_using_declaration_in_same_block_rejects() {
    let body = "async Task<int> F() { using var r = Open(); return await G(); }";
    assert_eq!(reason(body, "F"), RejectionReason::ProtectedScope);
}

#[test]
fn test_using_declaration_in_no_value_body_rejects() {
    let body = "async Task F() { using var r = Open(); await H(); }";
    assert_eq!(reason(body, "F"), RejectionReason::ResourceScopeInBody);
}

#[test]
fn test_await_nested_in_using_statement_rejects() {
    let body = r#"
async Task<int> F() {
    using (var r = Open()) {
        return await G();
    }
}
"#;
    assert_eq!(reason(body, "F"), RejectionReason::ProtectedScope);
}

#[test]
fn test_try_elsewhere_in_enclosing_block_rejects() {
    let body = r#"
async Task<int> F(bool b) {
    if (b) {
        try { Log(); } catch (Exception e) { }
        return await G();
    }
    return await G();
}
"#;
    assert_eq!(reason(body, "F"), RejectionReason::ProtectedScope);
}

#[test]
fn test_try_in_sibling_block_does_not_reject() {
    let body = r#"
async Task<int> F(bool b) {
    if (b) {
        return await G();
    } else {
        try { Log(); } catch (Exception e) { }
        throw new InvalidOperationException();
    }
}
"#;
    assert_eq!(eligible_forms(body, "F").len(), 1);
}

#[test]
fn test_mixed_returns_reject() {
    let body = r#"
async Task<int> F(bool b) {
    if (b) {
        return 1;
    }
    return await G();
}
"#;
    assert_eq!(reason(body, "F"), RejectionReason::ReturnWithoutAwait);
}

#[test]
fn test_await_used_in_larger_expression_rejects() {
    let body = "async Task<int> F() { return await G() + 1; }";
    assert_eq!(reason(body, "F"), RejectionReason::ReturnWithoutAwait);
}

#[test]
fn test_result_type_mismatch_rejects() {
    assert_eq!(
        reason("async Task<object> F() => await S();", "F"),
        RejectionReason::TypeMismatch
    );
}

#[test]
fn test_value_result_into_no_value_function_rejects() {
    assert_eq!(
        reason("async Task F() { await G(); }", "F"),
        RejectionReason::TypeMismatch
    );
}

#[test]
fn test_unresolved_operation_rejects() {
    assert_eq!(
        reason("async Task F() { await Missing(); }", "F"),
        RejectionReason::TypeMismatch
    );
}

#[test]
fn test_awaiting_a_variable_rejects() {
    assert_eq!(
        reason("async Task<int> F(Task<int> t) => await t;", "F"),
        RejectionReason::TypeMismatch
    );
}

#[test]
fn test_await_not_last_rejects() {
    assert_eq!(
        reason("async Task F() { await H(); Log(); }", "F"),
        RejectionReason::NotInTailPosition
    );
}

#[test]
fn test_await_in_loop_rejects() {
    assert_eq!(
        reason("async Task F(bool b) { while (b) { await H(); } }", "F"),
        RejectionReason::NotInTailPosition
    );
}

#[test]
fn test_if_without_else_falls_through() {
    assert_eq!(
        reason("async Task F(bool b) { if (b) { await H(); } }", "F"),
        RejectionReason::FallsThrough
    );
}

#[test]
fn test_unpaired_bare_return_rejects() {
    let body = "async Task F(bool b) { if (b) { return; } await H(); }";
    assert_eq!(reason(body, "F"), RejectionReason::ReturnWithoutAwait);
}

#[test]
fn test_awaits_in_nested_lambda_are_not_counted() {
    let body = r#"
async Task F() {
    var f = async () => { await H(); Log(); };
    await H();
}
"#;
    let verdict = analyze(&source(body)).verdict("F");
    assert_eq!(verdict.points().map(<[_]>::len), Some(1));
}

#[test]
fn test_only_nested_awaits_means_no_points() {
    let body = "async Task F() { var f = async () => await H(); Log(); }";
    assert_eq!(reason(body, "F"), RejectionReason::NoSuspensionPoints);
}

#[test]
fn test_points_are_in_source_order() {
    let body = r#"
async Task<int> F(bool b) {
    if (b) {
        return await G();
    }
    return await G().ConfigureAwait(false);
}
"#;
    let checked = analyze(&source(body));
    let verdict = checked.verdict("F");
    let points = verdict.points().expect("eligible");
    assert_eq!(checked.text(points[0].await_expression), "await G()");
    assert_eq!(
        checked.text(points[1].await_expression),
        "await G().ConfigureAwait(false)"
    );
    assert_eq!(checked.text(points[1].operation), "G().ConfigureAwait(false)");
    assert!(points.iter().all(|point| !point.is_protected));
}

#[test]
fn test_construction_of_declared_type_is_eligible() {
    assert_eq!(
        eligible_forms("async Task<int> F() => await new Task<int>();", "F"),
        vec![EnclosingForm::TailExpression]
    );
    assert_eq!(
        eligible_forms("async Task F() { await new Task(); }", "F"),
        vec![EnclosingForm::TailStatementOfBlock]
    );
}

#[test]
fn test_construction_of_other_type_rejects() {
    assert_eq!(
        reason("async Task<int> F() => await new Task<string>();", "F"),
        RejectionReason::TypeMismatch
    );
    assert_eq!(
        reason("async Task F() { await new Task<int>(); }", "F"),
        RejectionReason::TypeMismatch
    );
}
