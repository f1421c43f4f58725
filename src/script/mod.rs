//! Session scripts
//!
//! Loading, validating, and replaying scripted sessions.

pub mod runner;
pub mod validator;

pub use runner::{explain_script, ScriptResult, ScriptRunner};
pub use validator::{
    has_errors, has_warnings, validate_script, ScriptValidationError, ValidationOptions,
    ValidationSeverity,
};
