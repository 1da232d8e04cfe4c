pub mod admin;
pub mod books;

use shelf_authz::AdminGuard;
use shelf_kernel::{settings::Settings, ModuleRegistry};

/// Register all application modules with the registry
pub fn register_all(registry: &mut ModuleRegistry, settings: &Settings) {
    let guard = AdminGuard::new(settings.auth.admin_password.clone());

    registry.register_core(admin::create_module(guard.clone()));
    registry.register_custom(books::create_module(guard));
}
