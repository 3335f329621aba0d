//! Output formatting for occurrence search results
//!
//! Renders each occurrence as `offset:line:` plus the containing line with
//! the matched span highlighted, grep-style. Strictly a consumer of the
//! tree's read contract.

use crate::tree::{SuffixTree, SENTINEL_BYTE};
use memchr::{memchr, memchr_iter, memrchr};
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Print `offsets` (occurrences of a pattern of `pattern_len` bytes) with
/// their containing lines.
pub fn print_occurrences(
    tree: &SuffixTree,
    pattern_len: usize,
    offsets: &[usize],
    color: bool,
) -> io::Result<()> {
    let choice = if color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(choice);
    let text = tree.text();

    for &offset in offsets {
        let line_number = memchr_iter(b'\n', &text[..offset]).count() + 1;
        let line_start = memrchr(b'\n', &text[..offset]).map(|p| p + 1).unwrap_or(0);
        let line_end = memchr(b'\n', &text[offset..])
            .map(|p| offset + p)
            .unwrap_or(text.len());

        // Byte offset, then line number, colored like grep output
        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))?;
        write!(stdout, "{}", offset)?;
        stdout.reset()?;
        write!(stdout, ":")?;
        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        write!(stdout, "{}", line_number)?;
        stdout.reset()?;
        write!(stdout, ":")?;

        // A match may run past the end of its line; clamp the highlight
        let match_end = (offset + pattern_len).min(line_end);

        write_span(&mut stdout, &text[line_start..offset])?;
        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
        write_span(&mut stdout, &text[offset..match_end])?;
        stdout.reset()?;
        write_span(&mut stdout, &text[match_end..line_end])?;
        writeln!(stdout)?;
    }

    Ok(())
}

/// Write a text span lossily, dropping the sentinel byte from display.
fn write_span(stdout: &mut StandardStream, span: &[u8]) -> io::Result<()> {
    let span = if span.last() == Some(&SENTINEL_BYTE) {
        &span[..span.len() - 1]
    } else {
        span
    };
    write!(stdout, "{}", String::from_utf8_lossy(span))
}
