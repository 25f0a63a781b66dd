pub mod dispatch;
pub mod mono_build;
pub mod mono_install;
pub mod setup_ci;
pub mod vulkan;
