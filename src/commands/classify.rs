//! `registry-idgen classify` and `registry-idgen types` commands.

use crate::modifier::{classify, recognized_types, TypeTag};

/// Describe how a primary type is treated.
#[must_use]
pub fn describe(primary_type: &str) -> String {
    match classify(Some(primary_type)) {
        Some(tag) => format!("{tag} -> {}", tag.target_property()),
        None => "none".to_string(),
    }
}

/// Execute the `classify` command.
///
/// # Errors
///
/// Never fails; the signature matches the other handlers.
pub fn run(primary_type: &str) -> Result<(), String> {
    println!("{}", describe(primary_type));
    Ok(())
}

/// Execute the `types` command.
///
/// # Errors
///
/// Never fails; the signature matches the other handlers.
pub fn list_types() -> Result<(), String> {
    for (primary_type, tag) in recognized_types() {
        println!("{:<24} {:<26} {primary_type}", tag.as_str(), tag.target_property());
    }
    Ok(())
}
