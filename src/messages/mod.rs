// ============================================================================
// XliffMerge - Message Table Module
// ============================================================================
//
// File: src/messages/mod.rs
// Responsibility: lookup and positional formatting of user facing messages
// Boundaries:
//   - ✅ Message table lookup
//   - ✅ Message macros
//   - ✅ Positional argument formatting
//   - ❌ Should not contain message texts
//   - ❌ Should not contain business logic
//   - ❌ Should not contain output handling
//
// ============================================================================

pub mod en_us;

/// Look up the template of a message key
pub fn get_message(key: &str) -> String {
    for &(k, v) in en_us::MESSAGES {
        if k == key {
            return v.to_string();
        }
    }

    format!("Unknown message key: {}", key)
}

/// Simple message macro
#[macro_export]
macro_rules! t {
    ($key:expr) => {
        $crate::messages::get_message($key)
    };
}

/// Replace the `{}` placeholders of `template` from left to right
pub fn format_with_args(template: String, args: Vec<String>) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template.as_str();
    let mut args = args.into_iter();
    while let Some(pos) = rest.find("{}") {
        result.push_str(&rest[..pos]);
        match args.next() {
            Some(arg) => result.push_str(&arg),
            None => result.push_str("{}"),
        }
        rest = &rest[pos + 2..];
    }
    result.push_str(rest);
    result
}

/// Message macro with positional arguments
#[macro_export]
macro_rules! tf {
    ($key:expr, $($arg:expr),*) => {{
        let template = $crate::messages::get_message($key);
        let args = vec![$(format!("{}", $arg)),*];
        $crate::messages::format_with_args(template, args)
    }};
}
