use super::{DiagnosticCategory, DiagnosticMessage, RuleDescriptor};

pub mod diagnostic_codes {
    pub const UNTERMINATED_STRING_LITERAL: u32 = 1002;
    pub const IDENTIFIER_EXPECTED: u32 = 1003;
    pub const EXPECTED: u32 = 1005;
    pub const EXPRESSION_EXPECTED: u32 = 1109;
    pub const INVALID_CHARACTER: u32 = 1127;
    pub const DECLARATION_OR_STATEMENT_EXPECTED: u32 = 1128;
    pub const TYPE_EXPECTED: u32 = 1110;
    pub const NESTING_TOO_DEEP: u32 = 1200;
    pub const UNNECESSARY_ASYNC_AWAIT: u32 = 90001;
}

pub mod diagnostic_messages {
    pub const UNTERMINATED_STRING_LITERAL: &str = "Unterminated string literal.";
    pub const IDENTIFIER_EXPECTED: &str = "Identifier expected.";
    pub const EXPECTED: &str = "'{0}' expected.";
    pub const EXPRESSION_EXPECTED: &str = "Expression expected.";
    pub const INVALID_CHARACTER: &str = "Invalid character.";
    pub const DECLARATION_OR_STATEMENT_EXPECTED: &str = "Declaration or statement expected.";
    pub const TYPE_EXPECTED: &str = "Type expected.";
    pub const NESTING_TOO_DEEP: &str = "Source nesting is too deep to analyze.";
    pub const UNNECESSARY_ASYNC_AWAIT: &str =
        "The 'async' and 'await' in this function are unnecessary; return the awaited task directly.";
    pub const ADDITIONAL_AWAIT_LOCATION: &str = "This 'await' is also removed by the fix.";
}

pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    DiagnosticMessage {
        code: diagnostic_codes::UNTERMINATED_STRING_LITERAL,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::UNTERMINATED_STRING_LITERAL,
    },
    DiagnosticMessage {
        code: diagnostic_codes::IDENTIFIER_EXPECTED,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::IDENTIFIER_EXPECTED,
    },
    DiagnosticMessage {
        code: diagnostic_codes::EXPECTED,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::EXPECTED,
    },
    DiagnosticMessage {
        code: diagnostic_codes::EXPRESSION_EXPECTED,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::EXPRESSION_EXPECTED,
    },
    DiagnosticMessage {
        code: diagnostic_codes::TYPE_EXPECTED,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::TYPE_EXPECTED,
    },
    DiagnosticMessage {
        code: diagnostic_codes::INVALID_CHARACTER,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::INVALID_CHARACTER,
    },
    DiagnosticMessage {
        code: diagnostic_codes::DECLARATION_OR_STATEMENT_EXPECTED,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::DECLARATION_OR_STATEMENT_EXPECTED,
    },
    DiagnosticMessage {
        code: diagnostic_codes::NESTING_TOO_DEEP,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::NESTING_TOO_DEEP,
    },
    DiagnosticMessage {
        code: diagnostic_codes::UNNECESSARY_ASYNC_AWAIT,
        category: DiagnosticCategory::Warning,
        message: diagnostic_messages::UNNECESSARY_ASYNC_AWAIT,
    },
];

/// UA0001: an async function only forwards awaited handles.
pub const UNNECESSARY_ASYNC_AWAIT_RULE: RuleDescriptor = RuleDescriptor {
    id: "UA0001",
    code: diagnostic_codes::UNNECESSARY_ASYNC_AWAIT,
    title: "Unnecessary async/await",
    message: diagnostic_messages::UNNECESSARY_ASYNC_AWAIT,
    category: "Performance",
    default_severity: DiagnosticCategory::Warning,
};

pub static RULES: &[RuleDescriptor] = &[UNNECESSARY_ASYNC_AWAIT_RULE];
