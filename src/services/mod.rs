pub mod builder;
pub mod existence;
pub mod platform_command;
pub mod policy;

pub use builder::Scratch;
pub use existence::ExistenceResult;
pub use platform_command::PlatformCliAdapter;
pub use policy::Decision;
