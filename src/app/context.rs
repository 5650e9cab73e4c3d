use crate::ports::PlatformPort;

/// Bundles the platform port for the run orchestrator. Generic so tests can
/// substitute a scripted port for the subprocess adapter.
pub struct AppContext<P: PlatformPort> {
    platform: P,
}

impl<P: PlatformPort> AppContext<P> {
    pub fn new(platform: P) -> Self {
        Self { platform }
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }
}
