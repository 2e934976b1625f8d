//! Indentation-aware sink for the hierarchical dump.
//!
//! Every parsed value is written out as it is decoded; no intermediate tree is built. The
//! [`Logger`] tracks the current nesting depth and whether the cursor sits at the start of a
//! line, so a label written with [`write`](Logger::write) can be completed by a later
//! [`write_line`](Logger::write_line) from a nested reader.

use std::fmt;
use std::io::Write;

use crate::Result;

/// Byte dumps are collapsed after this many bytes.
const BYTE_DUMP_LIMIT: usize = 1024;

const BYTES_PER_ROW: usize = 16;

/// Indented text output over any [`Write`] sink.
pub struct Logger<'a> {
    out: &'a mut dyn Write,
    depth: usize,
    at_line_start: bool,
}

impl<'a> Logger<'a> {
    /// Create a new `Logger` writing to `out`
    pub fn new(out: &'a mut dyn Write) -> Self {
        Logger {
            out,
            depth: 0,
            at_line_start: true,
        }
    }

    /// Increase the nesting depth by one level
    pub fn indent(&mut self) {
        self.depth += 1;
    }

    /// Decrease the nesting depth by one level
    pub fn unindent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Write text without a trailing newline, indenting if at the start of a line.
    ///
    /// # Errors
    /// Returns [`crate::Error::Io`] if the sink fails
    pub fn write(&mut self, args: fmt::Arguments<'_>) -> Result<()> {
        self.write_indent()?;
        self.out.write_fmt(args)?;
        Ok(())
    }

    /// Write one full line of text.
    ///
    /// # Errors
    /// Returns [`crate::Error::Io`] if the sink fails
    pub fn write_line(&mut self, args: fmt::Arguments<'_>) -> Result<()> {
        self.write_indent()?;
        self.out.write_fmt(args)?;
        self.out.write_all(b"\n")?;
        self.at_line_start = true;
        Ok(())
    }

    /// Write a labeled enum value, falling back to the raw number when out of range.
    ///
    /// # Errors
    /// Returns [`crate::Error::Io`] if the sink fails
    pub fn write_enum(&mut self, label: &str, value: i32, names: &[&str]) -> Result<()> {
        match usize::try_from(value).ok().and_then(|i| names.get(i)) {
            Some(name) => self.write_line(format_args!("{label}: {name}")),
            None => self.write_line(format_args!("{label}: {value}")),
        }
    }

    /// Write a labeled hex dump, collapsed after the first kilobyte.
    ///
    /// With an empty label the byte count completes the current line instead of starting one.
    ///
    /// # Errors
    /// Returns [`crate::Error::Io`] if the sink fails
    pub fn write_bytes(&mut self, label: &str, bytes: &[u8]) -> Result<()> {
        if label.is_empty() {
            self.write_line(format_args!(": {} bytes", bytes.len()))?;
        } else {
            self.write_line(format_args!("{}: {} bytes", label, bytes.len()))?;
        }

        self.indent();

        let shown = &bytes[..bytes.len().min(BYTE_DUMP_LIMIT)];
        for row in shown.chunks(BYTES_PER_ROW) {
            let mut text = String::with_capacity(BYTES_PER_ROW * 3);
            for (i, byte) in row.iter().enumerate() {
                if i > 0 {
                    text.push(' ');
                }
                let _ = fmt::Write::write_fmt(&mut text, format_args!("{byte:02x}"));
            }
            self.write_line(format_args!("{text}"))?;
        }

        if bytes.len() > BYTE_DUMP_LIMIT {
            self.write_line(format_args!(
                "... ({} more bytes)",
                bytes.len() - BYTE_DUMP_LIMIT
            ))?;
        }

        self.unindent();
        Ok(())
    }

    fn write_indent(&mut self) -> Result<()> {
        if self.at_line_start {
            for _ in 0..self.depth {
                self.out.write_all(b"  ")?;
            }
            self.at_line_start = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture(run: impl FnOnce(&mut Logger<'_>)) -> String {
        let mut buffer = Vec::new();
        let mut log = Logger::new(&mut buffer);
        run(&mut log);
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn nested_lines_are_indented() {
        let output = capture(|log| {
            log.write_line(format_args!("Asset:")).unwrap();
            log.indent();
            log.write_line(format_args!("Type: System.Int32")).unwrap();
            log.indent();
            log.write_line(format_args!("42")).unwrap();
            log.unindent();
            log.unindent();
            log.write_line(format_args!("done")).unwrap();
        });

        assert_eq!(output, "Asset:\n  Type: System.Int32\n    42\ndone\n");
    }

    #[test]
    fn partial_line_is_completed_in_place() {
        let output = capture(|log| {
            log.indent();
            log.write(format_args!("Parent: ")).unwrap();
            log.write_line(format_args!("bone #3")).unwrap();
            log.write_line(format_args!("next")).unwrap();
        });

        assert_eq!(output, "  Parent: bone #3\n  next\n");
    }

    #[test]
    fn enum_in_and_out_of_range() {
        let output = capture(|log| {
            log.write_enum("Format", 1, &["Color", "Bgr565"]).unwrap();
            log.write_enum("Format", 57, &["Color", "Bgr565"]).unwrap();
            log.write_enum("Format", -2, &["Color", "Bgr565"]).unwrap();
        });

        assert_eq!(output, "Format: Bgr565\nFormat: 57\nFormat: -2\n");
    }

    #[test]
    fn byte_dump_small() {
        let output = capture(|log| {
            log.write_bytes("Index data", &[0xAB, 0x00, 0xFF]).unwrap();
        });

        assert_eq!(output, "Index data: 3 bytes\n  ab 00 ff\n");
    }

    #[test]
    fn byte_dump_completes_partial_line() {
        let output = capture(|log| {
            log.write(format_args!("Mip 0")).unwrap();
            log.write_bytes("", &[0x01, 0x02]).unwrap();
        });

        assert_eq!(output, "Mip 0: 2 bytes\n  01 02\n");
    }

    #[test]
    fn byte_dump_collapses_after_limit() {
        let data = vec![0x11_u8; 1500];
        let output = capture(|log| {
            log.write_bytes("Vertex data", &data).unwrap();
        });

        assert!(output.starts_with("Vertex data: 1500 bytes\n"));
        assert!(output.ends_with("... (476 more bytes)\n"));
        // 1024 shown bytes is 64 full rows, plus the header and trailer lines.
        assert_eq!(output.lines().count(), 66);
    }

    #[test]
    fn byte_dump_empty() {
        let output = capture(|log| {
            log.write_bytes("Data", &[]).unwrap();
        });

        assert_eq!(output, "Data: 0 bytes\n");
    }
}
