use std::io::{self, Write};

use tracing::info;

/// Writes the whole image in one go, with nothing before or after it.
pub fn emit<W: Write>(image: &[u8], mut out: W) -> io::Result<()> {
    out.write_all(image)?;
    out.flush()?;
    info!(bytes = image.len(), "image written");
    Ok(())
}
