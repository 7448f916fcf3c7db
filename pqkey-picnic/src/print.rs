//! Human-readable key dumps.
//!
//! ```text
//! picnicL1FS Private-Key:
//! priv:
//!     00:11:22:33:44:55:66:77:88:99:aa:bb:cc:dd:ee:
//!     ff
//! pub:
//!     ...
//! ```

use core::fmt::{self, Write};

use crate::key::KeyMaterial;

/// Bytes per hex dump line.
const BYTES_PER_LINE: usize = 15;

/// Indentation is capped like the host's buffer printer.
const MAX_INDENT: usize = 128;

fn pad(out: &mut dyn Write, indent: usize) -> fmt::Result {
    write!(out, "{:width$}", "", width = indent.min(MAX_INDENT))
}

/// Colon-separated lowercase hex, `BYTES_PER_LINE` bytes per line.
fn hex_dump(out: &mut dyn Write, bytes: &[u8], indent: usize) -> fmt::Result {
    if bytes.is_empty() {
        return Ok(());
    }
    for (i, chunk) in bytes.chunks(BYTES_PER_LINE).enumerate() {
        if i > 0 {
            out.write_char('\n')?;
        }
        pad(out, indent)?;
        for (j, byte) in chunk.iter().enumerate() {
            let last = i * BYTES_PER_LINE + j + 1 == bytes.len();
            write!(out, "{byte:02x}")?;
            if !last {
                out.write_char(':')?;
            }
        }
    }
    out.write_char('\n')
}

fn public_section(out: &mut dyn Write, key: &KeyMaterial, indent: usize) -> fmt::Result {
    pad(out, indent)?;
    out.write_str("pub:\n")?;
    hex_dump(out, key.public_key(), indent.saturating_add(4))
}

/// Print the public key held by `key`.
///
/// A missing key prints `<INVALID PUBLIC KEY>` and is not an error.
pub fn print_public(out: &mut dyn Write, key: Option<&KeyMaterial>, indent: usize) -> fmt::Result {
    let Some(key) = key else {
        pad(out, indent)?;
        return out.write_str("<INVALID PUBLIC KEY>\n");
    };
    pad(out, indent)?;
    writeln!(out, "{} Public-Key:", key.entry().name)?;
    public_section(out, key, indent)
}

/// Print the private and public keys held by `key`.
///
/// A missing key, or a public-only one, prints `<INVALID PRIVATE KEY>` and
/// is not an error.
pub fn print_private(out: &mut dyn Write, key: Option<&KeyMaterial>, indent: usize) -> fmt::Result {
    let Some((key, private_key)) = key.and_then(|k| k.private_key().map(|sk| (k, sk))) else {
        pad(out, indent)?;
        return out.write_str("<INVALID PRIVATE KEY>\n");
    };
    pad(out, indent)?;
    writeln!(out, "{} Private-Key:", key.entry().name)?;
    pad(out, indent)?;
    out.write_str("priv:\n")?;
    hex_dump(out, private_key, indent.saturating_add(4))?;
    public_section(out, key, indent)
}
