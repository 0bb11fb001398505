/// Token kinds produced by the scanner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    Unknown,
    EndOfFileToken,

    // Literals and names
    Identifier,
    NumericLiteral,
    StringLiteral,

    // Punctuation
    OpenBraceToken,
    CloseBraceToken,
    OpenParenToken,
    CloseParenToken,
    OpenBracketToken,
    CloseBracketToken,
    LessThanToken,
    GreaterThanToken,
    LessThanEqualsToken,
    GreaterThanEqualsToken,
    CommaToken,
    SemicolonToken,
    DotToken,
    QuestionToken,
    ColonToken,
    EqualsToken,
    EqualsGreaterThanToken,
    EqualsEqualsToken,
    ExclamationEqualsToken,
    PlusToken,
    MinusToken,
    AsteriskToken,
    SlashToken,
    PercentToken,
    ExclamationToken,
    AmpersandAmpersandToken,
    BarBarToken,
    QuestionQuestionToken,

    // Keywords
    AsyncKeyword,
    AwaitKeyword,
    CatchKeyword,
    ClassKeyword,
    ElseKeyword,
    ExternKeyword,
    FalseKeyword,
    FinallyKeyword,
    IfKeyword,
    NewKeyword,
    NullKeyword,
    ReturnKeyword,
    StaticKeyword,
    ThrowKeyword,
    TrueKeyword,
    TryKeyword,
    UsingKeyword,
    VarKeyword,
    VoidKeyword,
    WhileKeyword,
}

impl SyntaxKind {
    pub const fn is_keyword(self) -> bool {
        (self as u16) >= (SyntaxKind::AsyncKeyword as u16)
    }

    /// Source text of fixed tokens, used in "'{0}' expected." diagnostics.
    pub const fn text(self) -> &'static str {
        match self {
            SyntaxKind::OpenBraceToken => "{",
            SyntaxKind::CloseBraceToken => "}",
            SyntaxKind::OpenParenToken => "(",
            SyntaxKind::CloseParenToken => ")",
            SyntaxKind::OpenBracketToken => "[",
            SyntaxKind::CloseBracketToken => "]",
            SyntaxKind::LessThanToken => "<",
            SyntaxKind::GreaterThanToken => ">",
            SyntaxKind::LessThanEqualsToken => "<=",
            SyntaxKind::GreaterThanEqualsToken => ">=",
            SyntaxKind::CommaToken => ",",
            SyntaxKind::SemicolonToken => ";",
            SyntaxKind::DotToken => ".",
            SyntaxKind::QuestionToken => "?",
            SyntaxKind::ColonToken => ":",
            SyntaxKind::EqualsToken => "=",
            SyntaxKind::EqualsGreaterThanToken => "=>",
            SyntaxKind::EqualsEqualsToken => "==",
            SyntaxKind::ExclamationEqualsToken => "!=",
            SyntaxKind::PlusToken => "+",
            SyntaxKind::MinusToken => "-",
            SyntaxKind::AsteriskToken => "*",
            SyntaxKind::SlashToken => "/",
            SyntaxKind::PercentToken => "%",
            SyntaxKind::ExclamationToken => "!",
            SyntaxKind::AmpersandAmpersandToken => "&&",
            SyntaxKind::BarBarToken => "||",
            SyntaxKind::QuestionQuestionToken => "??",
            SyntaxKind::AsyncKeyword => "async",
            SyntaxKind::AwaitKeyword => "await",
            SyntaxKind::CatchKeyword => "catch",
            SyntaxKind::ClassKeyword => "class",
            SyntaxKind::ElseKeyword => "else",
            SyntaxKind::ExternKeyword => "extern",
            SyntaxKind::FalseKeyword => "false",
            SyntaxKind::FinallyKeyword => "finally",
            SyntaxKind::IfKeyword => "if",
            SyntaxKind::NewKeyword => "new",
            SyntaxKind::NullKeyword => "null",
            SyntaxKind::ReturnKeyword => "return",
            SyntaxKind::StaticKeyword => "static",
            SyntaxKind::ThrowKeyword => "throw",
            SyntaxKind::TrueKeyword => "true",
            SyntaxKind::TryKeyword => "try",
            SyntaxKind::UsingKeyword => "using",
            SyntaxKind::VarKeyword => "var",
            SyntaxKind::VoidKeyword => "void",
            SyntaxKind::WhileKeyword => "while",
            SyntaxKind::Identifier => "identifier",
            SyntaxKind::NumericLiteral => "number",
            SyntaxKind::StringLiteral => "string",
            SyntaxKind::Unknown => "unknown",
            SyntaxKind::EndOfFileToken => "end of file",
        }
    }
}

/// Map identifier text to its keyword kind, if it is a keyword.
pub fn keyword_kind(text: &str) -> Option<SyntaxKind> {
    let kind = match text {
        "async" => SyntaxKind::AsyncKeyword,
        "await" => SyntaxKind::AwaitKeyword,
        "catch" => SyntaxKind::CatchKeyword,
        "class" => SyntaxKind::ClassKeyword,
        "else" => SyntaxKind::ElseKeyword,
        "extern" => SyntaxKind::ExternKeyword,
        "false" => SyntaxKind::FalseKeyword,
        "finally" => SyntaxKind::FinallyKeyword,
        "if" => SyntaxKind::IfKeyword,
        "new" => SyntaxKind::NewKeyword,
        "null" => SyntaxKind::NullKeyword,
        "return" => SyntaxKind::ReturnKeyword,
        "static" => SyntaxKind::StaticKeyword,
        "throw" => SyntaxKind::ThrowKeyword,
        "true" => SyntaxKind::TrueKeyword,
        "try" => SyntaxKind::TryKeyword,
        "using" => SyntaxKind::UsingKeyword,
        "var" => SyntaxKind::VarKeyword,
        "void" => SyntaxKind::VoidKeyword,
        "while" => SyntaxKind::WhileKeyword,
        _ => return None,
    };
    Some(kind)
}
