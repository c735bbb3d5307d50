// devsan/src/utils/clipboard.rs
//! System clipboard access, compiled in with the `clipboard` feature.

use anyhow::Result;

#[cfg(feature = "clipboard")]
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    use anyhow::Context;

    let mut clipboard = arboard::Clipboard::new().context("Failed to open the system clipboard")?;
    clipboard
        .set_text(text.to_owned())
        .context("Failed to write to the system clipboard")?;
    Ok(())
}

#[cfg(not(feature = "clipboard"))]
pub fn copy_to_clipboard(_text: &str) -> Result<()> {
    anyhow::bail!("devsan was built without clipboard support")
}
