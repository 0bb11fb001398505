//! Declarations every analyzed program can see.

/// Signatures of the asynchronous handle types.
pub const PRELUDE_SOURCE: &str = r#"
extern class Task {
    ConfiguredTaskAwaitable ConfigureAwait(bool continueOnCapturedContext);
    static Task Delay(int millisecondsDelay);
    static YieldAwaitable Yield();
    static Task WhenAll(Task first, Task second);
}

extern class Task<TResult> {
    ConfiguredTaskAwaitable<TResult> ConfigureAwait(bool continueOnCapturedContext);
}

extern class ValueTask {
    ConfiguredValueTaskAwaitable ConfigureAwait(bool continueOnCapturedContext);
}

extern class ValueTask<TResult> {
    ConfiguredValueTaskAwaitable<TResult> ConfigureAwait(bool continueOnCapturedContext);
}
"#;

pub(crate) const PRELUDE_FILE_NAME: &str = "lib.unawait.cs";
