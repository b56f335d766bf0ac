//! BLE service access configuration.
//!
//! Static configuration data consumed by the service registration code
//! elsewhere in the firmware. The diagnostic subsystem reads none of
//! this; it lives here so the access levels have exactly one home.

/// Access level required to reach a GATT service.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ServicePermission {
    /// Access disabled.
    Disable,
    /// Access enabled with no link requirement.
    Enable,
    /// Access requires an unauthenticated link.
    Unauth,
    /// Access requires an authenticated link.
    Auth,
    /// Access requires authenticated secure-connection pairing.
    Secure,
}

/// Required access level for the custom service. Select only one.
pub const CUSTOM_SERVICE_PERMISSION: ServicePermission = ServicePermission::Secure;

// =============================================================================
// Tests
// =============================================================================
