use std::io::{self, Write};

/// Writes `message` to stdout and, when given, to `writer` as well.
///
/// An empty message prints nothing, so an empty issue list leaves stdout empty.
pub fn println(message: &str, writer: &mut Option<&mut dyn Write>) -> io::Result<()> {
    if message.is_empty() {
        return Ok(());
    }

    if let Err(e) = writeln!(io::stdout(), "{message}") {
        tracing::error!(error = %e, "Failed to write to stdout");
    }

    if let Some(w) = writer {
        writeln!(w, "{message}")?;
    }

    Ok(())
}
