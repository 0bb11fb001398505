use super::*;
use crate::context::CheckerOptions;
use crate::test_support::{analyze, analyze_with};
use unawait_common::diagnostics::{DiagnosticCategory, diagnostic_codes, diagnostic_messages};

const DECLS: &str = r#"
Task<int> G();
Task H();
"#;

#[test]
fn test_single_await_produces_one_finding() {
    let checked = analyze(&format!("{DECLS}\nasync Task F() {{ await H(); }}"));
    let findings = checked.findings();
    assert_eq!(findings.len(), 1);
    let finding = &findings[0];
    assert_eq!(finding.unit.name.as_deref(), Some("F"));
    assert_eq!(finding.file_name, "test.cs");
    assert_eq!(finding.rule.id, "UA0001");
    assert!(finding.secondary.is_empty());
    let text = checked.arena.source_text();
    assert_eq!(
        &text[finding.primary.pos as usize..finding.primary.end as usize],
        "await H()"
    );
}

#[test]
fn test_ineligible_functions_produce_nothing() {
    let source = format!(
        "{DECLS}{}",
        r#"
async Task A() { using var r = Open(); await H(); }
async Task<int> B() { try { return await G(); } finally { } }
async Task<int> C(bool b) { if (b) { return 0; } return await G(); }
async void D() { await H(); }
Task<int> E() => G();
async Task<int> F() { return 1; }
"#
    );
    assert!(analyze(&source).findings().is_empty());
}

#[test]
fn test_findings_keep_source_order() {
    let source = format!(
        "{DECLS}{}",
        r#"
class Service {
    async Task<int> First() => await G();
    async Task Skipped() { await H(); Log(); }
    async Task Second() { await H(); }
}
async Task<int> Third() { return await G(); }
"#
    );
    let names: Vec<_> = analyze(&source)
        .findings()
        .into_iter()
        .filter_map(|finding| finding.unit.name)
        .collect();
    assert_eq!(
        names.iter().map(|name| &**name).collect::<Vec<_>>(),
        vec!["First", "Second", "Third"]
    );
}

#[test]
fn test_two_awaits_report_related_location() {
    let source = format!(
        "{DECLS}{}",
        r#"
async Task<int> F(bool b) {
    if (b) {
        return await G();
    }
    return await G().ConfigureAwait(false);
}
"#
    );
    let checked = analyze(&source);
    let findings = checked.findings();
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].secondary.len(), 1);

    let diagnostic = findings[0].to_diagnostic();
    assert_eq!(diagnostic.code, diagnostic_codes::UNNECESSARY_ASYNC_AWAIT);
    assert_eq!(diagnostic.category, DiagnosticCategory::Warning);
    assert_eq!(diagnostic.start, findings[0].primary.pos);
    assert_eq!(diagnostic.related_information.len(), 1);
    assert_eq!(
        diagnostic.related_information[0].message_text,
        diagnostic_messages::ADDITIONAL_AWAIT_LOCATION
    );
    assert_eq!(diagnostic.related_information[0].start, findings[0].secondary[0].pos);
}

#[test]
fn test_lambdas_and_local_functions_are_analyzed() {
    let source = format!(
        "{DECLS}{}",
        r#"
async Task F() {
    async Task<int> Inner() => await G();
    var typed = async Task<int> () => await G();
    var untyped = async () => await G();
    await H();
}
"#
    );
    let checked = analyze(&source);
    let findings = checked.findings();
    assert_eq!(findings.len(), 3);
    assert_eq!(findings[0].unit.name.as_deref(), Some("F"));
    assert_eq!(findings[1].unit.name.as_deref(), Some("Inner"));
    assert_eq!(findings[2].unit.name, None);
}

#[test]
fn test_nested_analysis_can_be_disabled() {
    let source = format!(
        "{DECLS}{}",
        r#"
async Task F() {
    async Task<int> Inner() => await G();
    await H();
}
"#
    );
    let options = CheckerOptions {
        analyze_lambdas: false,
        ..CheckerOptions::default()
    };
    let findings = analyze_with(&source, options).findings();
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].unit.name.as_deref(), Some("F"));
}

#[test]
fn test_severity_option_flows_into_diagnostics() {
    let options = CheckerOptions {
        severity: DiagnosticCategory::Error,
        ..CheckerOptions::default()
    };
    let checked = analyze_with(&format!("{DECLS}\nasync Task<int> F() => await G();"), options);
    let diagnostics = CheckerState::new(checked.ctx()).check_source_file_diagnostics(checked.root);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].category, DiagnosticCategory::Error);
}

#[test]
fn test_async_enumerable_is_not_a_candidate() {
    let checked = analyze(&format!(
        "{DECLS}\nasync IAsyncEnumerable<int> F() {{ await H(); }}"
    ));
    assert!(checked.units().is_empty());
    assert!(checked.findings().is_empty());
}

#[test]
fn test_classify_all_reports_every_candidate() {
    let checked = analyze(&format!(
        "{DECLS}\nasync Task<int> F() => await G();\nasync Task<int> K() => await G() + 1;"
    ));
    let verdicts = CheckerState::new(checked.ctx()).classify_all(checked.root);
    assert_eq!(verdicts.len(), 2);
    assert!(verdicts[0].1.is_eligible());
    assert!(!verdicts[1].1.is_eligible());
}

#[test]
fn test_long_operator_chain_is_bound_and_checked() {
    use unawait_binder::{BinderState, DeclarationTable};
    use unawait_parser::ParserState;
    use unawait_solver::TypeInterner;

    let chain = vec!["1"; 10_000].join(" + ");
    let source = format!("{DECLS}\nasync Task F() {{ var x = {chain}; await H(); }}");
    let interner = TypeInterner::new();
    let mut parser = ParserState::new("test.cs".to_string(), source);
    let root = parser.parse_source_file();
    assert!(parser.get_diagnostics().iter().any(|d| d.code == 1200));
    let arena = parser.into_arena();

    let mut declarations = DeclarationTable::with_prelude(&interner);
    declarations.declare_source_file(&interner, &arena, root);
    let model = BinderState::new(&interner, &declarations).bind_source_file(&arena, root);
    let options = CheckerOptions::default();
    let well_known = options.well_known_types(&interner);
    let ctx = crate::context::CheckerContext::new(&arena, &model, &interner, &well_known, &options);

    let findings = CheckerState::new(ctx).check_source_file(root);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].unit.name.as_deref(), Some("F"));
}
