pub use package_manager::*;

mod package_manager;
