use arboard::Clipboard as SystemBackend;
use color_eyre::Result;
use tracing::debug;

/// Destination for copied links.
///
/// Links cannot be opened from inside the terminal UI, so activating one
/// copies it instead.
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// The system clipboard. A new connection is opened per copy.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        let mut clipboard = SystemBackend::new()?;
        clipboard.set_text(text)?;
        debug!("Copied {} bytes to clipboard", text.len());
        Ok(())
    }
}
