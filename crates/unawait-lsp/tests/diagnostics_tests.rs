use super::*;
use crate::test_support::{analyze, with_decls};
use unawait_common::diagnostics::{DiagnosticRelatedInformation, diagnostic_codes};

#[test]
fn test_convert_diagnostic_with_related_info() {
    let source = "line1\nline2\nline3";
    let line_map = LineMap::build(source);

    let related = DiagnosticRelatedInformation {
        file: "test.cs".to_string(),
        start: 0,
        length: 5,
        message_text: "Related here".to_string(),
        category: DiagnosticCategory::Message,
        code: 0,
    };
    let related_other = DiagnosticRelatedInformation {
        file: "other.cs".to_string(),
        start: 0,
        length: 5,
        message_text: "Ignored".to_string(),
        category: DiagnosticCategory::Message,
        code: 0,
    };
    let diag = Diagnostic {
        file: "test.cs".to_string(),
        start: 6,
        length: 5,
        message_text: "Main".to_string(),
        category: DiagnosticCategory::Warning,
        code: 90001,
        related_information: vec![related, related_other],
    };

    let lsp_diag = convert_diagnostic(&diag, &line_map, source);
    assert_eq!(lsp_diag.message, "Main");
    assert_eq!(lsp_diag.range.start.line, 1);
    assert_eq!(lsp_diag.severity, Some(DiagnosticSeverity::Warning));
    assert_eq!(lsp_diag.source.as_deref(), Some("unawait"));

    let related_info = lsp_diag.related_information.expect("related info");
    assert_eq!(related_info.len(), 1);
    assert_eq!(related_info[0].message, "Related here");
    assert_eq!(related_info[0].location.range.start.line, 0);
}

#[test]
fn test_finding_converts_with_secondary_location() {
    let analyzed = analyze(&with_decls(
        "async Task<int> F(bool b) {\n    if (b) {\n        return await G();\n    }\n    return await G();\n}\n",
    ));
    let findings = analyzed.findings();
    assert_eq!(findings.len(), 1);

    let source = analyzed.arena.source_text();
    let line_map = LineMap::build(source);
    let lsp_diag = convert_diagnostic(&findings[0].to_diagnostic(), &line_map, source);
    assert_eq!(lsp_diag.code, Some(diagnostic_codes::UNNECESSARY_ASYNC_AWAIT));

    let decl_lines = with_decls("").lines().count() as u32;
    assert_eq!(lsp_diag.range.start.line, decl_lines + 2);
    assert_eq!(lsp_diag.range.start.character, 15);
    let related = lsp_diag.related_information.expect("second await");
    assert_eq!(related[0].location.range.start.line, decl_lines + 4);
}

#[test]
fn test_no_related_information_for_single_await() {
    let analyzed = analyze(&with_decls("async Task F() { await H(); }"));
    let findings = analyzed.findings();
    let source = analyzed.arena.source_text();
    let lsp_diag = convert_diagnostic(&findings[0].to_diagnostic(), &LineMap::build(source), source);
    assert!(lsp_diag.related_information.is_none());
}

#[test]
fn test_severity_round_trips_through_u8() {
    for severity in [
        DiagnosticSeverity::Error,
        DiagnosticSeverity::Warning,
        DiagnosticSeverity::Information,
        DiagnosticSeverity::Hint,
    ] {
        assert_eq!(DiagnosticSeverity::try_from(u8::from(severity)), Ok(severity));
    }
    assert!(DiagnosticSeverity::try_from(0u8).is_err());
    assert_eq!(
        DiagnosticSeverity::from(DiagnosticCategory::Suggestion),
        DiagnosticSeverity::Hint
    );
}
