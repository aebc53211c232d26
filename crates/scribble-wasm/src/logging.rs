//! Browser console logging and panic reporting.

use std::sync::Once;

static INSTALL: Once = Once::new();

/// Install the panic hook and the `console_log` backend, starting at `info`.
/// Only the first call has any effect, so a level chosen by the host
/// survives later mounts.
pub fn install() {
    INSTALL.call_once(|| {
        #[cfg(target_arch = "wasm32")]
        {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Scribble WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
            // Fails only if the host already installed a logger; keep that one.
            let _ = console_log::init_with_level(log::Level::Info);
        }
        log::set_max_level(log::LevelFilter::Info);
    });
}
