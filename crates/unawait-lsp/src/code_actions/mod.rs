//! Code actions.

pub mod code_action_fixes;
pub mod remove_async;

pub use code_action_fixes::{
    CodeFixFileChange, CodeFixInfo, CodeFixPosition, CodeFixRegistry, CodeFixTextChange,
    remove_unnecessary_async_fix,
};
pub use remove_async::{TextEdit, apply_edits, plan};
