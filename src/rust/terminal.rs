//! Line-oriented terminal front-end.
//!
//! The title is printed once, then every submitted line is one render with
//! the action fired. End of input closes the session.

use std::io::{self, BufRead, Write};
use log::info;

use crate::app::{App, RenderOutcome};
use crate::artifacts::ArtifactSource;

fn write_header<W: Write>(writer: &mut W, title: &str) -> io::Result<()> {
    writeln!(writer, "{}", title)?;
    writeln!(writer, "{}", "=".repeat(title.chars().count()))?;
    Ok(())
}

fn write_outcome<S: ArtifactSource, W: Write>(
    app: &App<S>,
    outcome: &RenderOutcome,
    writer: &mut W,
) -> io::Result<()> {
    if let Some(message) = app.display(outcome) {
        writeln!(writer, "{}", message)?;
    }
    Ok(())
}

/// Strips the line terminator and nothing else
fn strip_newline(line: &str) -> &str {
    line.strip_suffix('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .unwrap_or(line)
}

/// Runs an interactive session until `reader` is exhausted.
///
/// Returns the number of submitted renders.
pub fn run_interactive<S, R, W>(app: &mut App<S>, mut reader: R, mut writer: W) -> io::Result<usize>
where
    S: ArtifactSource,
    R: BufRead,
    W: Write,
{
    let locale = app.locale();
    write_header(&mut writer, locale.title())?;

    // First render: nothing submitted yet, only a missing artifact shows up.
    let outcome = app.render("", false);
    write_outcome(app, &outcome, &mut writer)?;
    writeln!(writer, "[Enter] {} · [Ctrl-D] {}", locale.action(), locale.quit())?;

    let mut submitted = 0;
    let mut line = Vec::new();
    loop {
        write!(writer, "{} ", locale.prompt())?;
        writer.flush()?;

        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            writeln!(writer)?;
            break;
        }

        // Invalid UTF-8 is replaced rather than ending the session.
        let text = String::from_utf8_lossy(&line);
        let outcome = app.render(strip_newline(&text), true);
        write_outcome(app, &outcome, &mut writer)?;
        submitted += 1;
    }

    info!("Session closed after {} submissions", submitted);
    writer.flush()?;
    Ok(submitted)
}

/// Performs a single render with `text` submitted and prints the result.
pub fn run_once<S, W>(app: &mut App<S>, text: &str, mut writer: W) -> io::Result<RenderOutcome>
where
    S: ArtifactSource,
    W: Write,
{
    let outcome = app.render(text, true);
    write_outcome(app, &outcome, &mut writer)?;
    writer.flush()?;
    Ok(outcome)
}
