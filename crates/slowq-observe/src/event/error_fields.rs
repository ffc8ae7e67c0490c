use std::{error::Error, fmt::Write};

const FALLBACK_KIND: &str = "Error";

/// Error description attached to an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorFields {
    /// Innermost variant or type name visible in the error's `Debug` form.
    pub kind: String,
    /// The error's `Display` form.
    pub message: String,
    /// `kind: message` followed by one `Caused by:` line per source.
    pub stack: String,
}

impl ErrorFields {
    pub fn from_error(err: &(dyn Error + 'static)) -> Self {
        let kind = kind_of(&format!("{err:?}"));
        let message = err.to_string();

        let mut stack = format!("{kind}: {message}");
        let mut source = err.source();
        while let Some(cause) = source {
            let _ = write!(stack, "\nCaused by: {cause}");
            source = cause.source();
        }

        Self {
            kind,
            message,
            stack,
        }
    }
}

/// Follow tuple-variant wrappers such as `Inspect(DataUnavailable("..."))` down to the
/// last capitalized name, which is the most specific kind of the error.
fn kind_of(debug: &str) -> String {
    let mut rest = debug.trim_start();
    let mut kind = None;

    loop {
        let ident_len = rest
            .find(|c: char| !(c.is_alphanumeric() || c == '_'))
            .unwrap_or(rest.len());
        let ident = &rest[..ident_len];
        if !ident.starts_with(|c: char| c.is_ascii_uppercase()) {
            break;
        }
        kind = Some(ident);

        match rest[ident_len..].strip_prefix('(') {
            Some(inner) => rest = inner,
            None => break,
        }
    }

    kind.unwrap_or(FALLBACK_KIND).to_string()
}
