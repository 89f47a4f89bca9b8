//! Small stdin prompt helpers

use std::io::{self, Write};

/// Print a prompt and read one trimmed line.
pub fn line(msg: &str) -> io::Result<String> {
    print!("{msg}");
    io::stdout().flush()?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf)?;
    Ok(buf.trim().to_string())
}
