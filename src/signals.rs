//! Process signals relayed into the event loop.
//!
//! In raw mode Ctrl-C and Ctrl-Z arrive as keys, but signals sent from
//! outside (`kill`, a closing terminal, job control) still need the terminal
//! restored. Handlers only set flags; the loop polls them once per wake-up.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Pending signal flags shared with the handlers.
#[derive(Debug, Clone, Default)]
pub struct SignalFlags {
    terminate: Arc<AtomicBool>,
    suspend: Arc<AtomicBool>,
}

impl SignalFlags {
    /// Install handlers for SIGTERM, SIGHUP, SIGINT and SIGTSTP.
    #[cfg(unix)]
    pub fn register() -> io::Result<Self> {
        use signal_hook::consts::{SIGHUP, SIGINT, SIGTERM, SIGTSTP};

        let flags = Self::default();
        for sig in [SIGTERM, SIGHUP, SIGINT] {
            signal_hook::flag::register(sig, Arc::clone(&flags.terminate))?;
        }
        signal_hook::flag::register(SIGTSTP, Arc::clone(&flags.suspend))?;
        Ok(flags)
    }

    #[cfg(not(unix))]
    pub fn register() -> io::Result<Self> {
        Ok(Self::default())
    }

    /// True once if a terminating signal arrived since the last call.
    pub fn take_terminate(&self) -> bool {
        self.terminate.swap(false, Ordering::Relaxed)
    }

    /// True once if a stop request arrived since the last call.
    pub fn take_suspend(&self) -> bool {
        self.suspend.swap(false, Ordering::Relaxed)
    }
}

/// Stop the process until SIGCONT, like the shell's Ctrl-Z.
///
/// Returns once the process has been continued.
#[cfg(unix)]
pub fn stop_process() -> io::Result<()> {
    signal_hook::low_level::raise(signal_hook::consts::SIGSTOP)
}

/// Without job control there is nothing to stop; the caller waits for input
/// instead.
#[cfg(not(unix))]
pub fn stop_process() -> io::Result<()> {
    Err(io::Error::new(io::ErrorKind::Unsupported, "no job control"))
}
