/// Router Module Index
///
/// Organizes the application's routing logic into security-segregated
/// modules. Access control is applied explicitly at the module level (via
/// Axum layers), so a protected endpoint cannot be exposed by accident.

/// Routes accessible to all visitors. The comment submission lives here too:
/// its handler gates on login with a redirect rather than a hard rejection.
pub mod public;

/// Routes restricted to the admin account. The whole group is wrapped by the
/// `require_admin` guard layer in `create_router`.
pub mod admin;
