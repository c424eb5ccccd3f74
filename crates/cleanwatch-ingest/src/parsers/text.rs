//! Plain text blank-line stripping.

use std::io::{self, BufRead, Write};

/// Line totals from one stripping pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineCounts {
    pub total: usize,
    pub kept: usize,
}

impl LineCounts {
    pub fn removed(&self) -> usize {
        self.total - self.kept
    }
}

/// Copy `reader` to `writer`, dropping every line that is empty after trimming.
///
/// Kept lines are written byte for byte, terminator included, so a file
/// without blank lines comes out unchanged.
pub fn strip_blank_lines<R: BufRead, W: Write>(
    mut reader: R,
    mut writer: W,
) -> io::Result<LineCounts> {
    let mut counts = LineCounts::default();
    let mut line = Vec::new();

    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        counts.total += 1;

        if String::from_utf8_lossy(&line).trim().is_empty() {
            continue;
        }
        writer.write_all(&line)?;
        counts.kept += 1;
    }

    writer.flush()?;
    Ok(counts)
}
