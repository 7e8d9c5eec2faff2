//! Process-level setup.

use seisview_core::{Options, Result};

use crate::viewer::Viewer;

/// Installs the `env_logger` backend, configured through `RUST_LOG`.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging() {
    let _ = env_logger::try_init();
}

/// Sets up logging and creates a viewer from an optional options file.
///
/// # Errors
///
/// Returns an error if the options file cannot be read or parsed.
///
/// # Example
///
/// ```no_run
/// use seisview::*;
///
/// fn main() -> Result<()> {
///     let mut viewer = init(Some("seisview.json"))?;
///     viewer.close();
///     Ok(())
/// }
/// ```
pub fn init(options_path: Option<&str>) -> Result<Viewer> {
    init_logging();
    let options = match options_path {
        Some(path) => Options::load(path)?,
        None => Options::default(),
    };
    log::info!("seisview-rs initialized");
    Ok(Viewer::new(options))
}
