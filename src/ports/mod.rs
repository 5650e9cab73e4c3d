mod platform;

pub use platform::PlatformPort;
