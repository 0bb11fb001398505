use super::*;

fn kinds(source: &str) -> Vec<SyntaxKind> {
    let mut scanner = ScannerState::new(source);
    let mut out = Vec::new();
    loop {
        let kind = scanner.scan();
        if kind == SyntaxKind::EndOfFileToken {
            break;
        }
        out.push(kind);
    }
    out
}

#[test]
fn test_scan_async_method_header() {
    assert_eq!(
        kinds("async Task<int> F() => await G();"),
        vec![
            SyntaxKind::AsyncKeyword,
            SyntaxKind::Identifier,
            SyntaxKind::LessThanToken,
            SyntaxKind::Identifier,
            SyntaxKind::GreaterThanToken,
            SyntaxKind::Identifier,
            SyntaxKind::OpenParenToken,
            SyntaxKind::CloseParenToken,
            SyntaxKind::EqualsGreaterThanToken,
            SyntaxKind::AwaitKeyword,
            SyntaxKind::Identifier,
            SyntaxKind::OpenParenToken,
            SyntaxKind::CloseParenToken,
            SyntaxKind::SemicolonToken,
        ]
    );
}

#[test]
fn test_nested_generic_close_is_two_tokens() {
    assert_eq!(
        kinds("Task<List<int>>"),
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::LessThanToken,
            SyntaxKind::Identifier,
            SyntaxKind::LessThanToken,
            SyntaxKind::Identifier,
            SyntaxKind::GreaterThanToken,
            SyntaxKind::GreaterThanToken,
        ]
    );
}

#[test]
fn test_token_range_excludes_trivia() {
    let source = "  // leading\n  /* block */ await";
    let mut scanner = ScannerState::new(source);
    assert_eq!(scanner.scan(), SyntaxKind::AwaitKeyword);
    assert_eq!(scanner.token_text(), "await");
    assert_eq!(&source[scanner.token_pos()..scanner.token_end()], "await");
}

#[test]
fn test_string_value_and_unterminated_diagnostic() {
    let mut scanner = ScannerState::new("\"https://example.test\" \"open");
    assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
    assert_eq!(scanner.token_value(), "https://example.test");
    assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
    assert_eq!(scanner.get_scanner_diagnostics().len(), 1);
    assert_eq!(scanner.get_scanner_diagnostics()[0].code, 1002);
}

#[test]
fn test_save_and_restore() {
    let mut scanner = ScannerState::new("a b c");
    scanner.scan();
    let snapshot = scanner.save();
    scanner.scan();
    scanner.scan();
    assert_eq!(scanner.token_value(), "c");
    scanner.restore(snapshot);
    assert_eq!(scanner.token_value(), "a");
    scanner.scan();
    assert_eq!(scanner.token_value(), "b");
}

#[test]
fn test_invalid_character_reports_and_advances() {
    let mut scanner = ScannerState::new("a # b");
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.scan(), SyntaxKind::Unknown);
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.get_scanner_diagnostics()[0].code, 1127);
}
