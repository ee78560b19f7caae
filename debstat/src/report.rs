//! Formatting of the package ranking.

use std::io::{self, Write};

use crate::contents::RankedEntry;

/// Write one `"<rank>. <package-name> <count>"` line per entry, rank from 1.
pub fn write_ranking<W: Write>(out: &mut W, entries: &[RankedEntry]) -> io::Result<()> {
    for (i, entry) in entries.iter().enumerate() {
        writeln!(out, "{}. {} {}", i + 1, entry.name, entry.count)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(entries: &[RankedEntry]) -> String {
        let mut out = Vec::new();
        write_ranking(&mut out, entries).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_write_ranking() {
        let entries = vec![
            RankedEntry::new("fonts-cns11643-pixmaps", 110999),
            RankedEntry::new("piglit", 52001),
        ];
        assert_eq!(
            render(&entries),
            "1. fonts-cns11643-pixmaps 110999\n2. piglit 52001\n"
        );
    }

    #[test]
    fn test_write_empty_ranking() {
        assert_eq!(render(&[]), "");
    }

    #[test]
    fn test_write_error_propagates() {
        struct Closed;
        impl Write for Closed {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let err = write_ranking(&mut Closed, &[RankedEntry::new("ash", 3)]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
