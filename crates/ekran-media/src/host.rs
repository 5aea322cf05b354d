use ekran_platform::{MaybeSend, MaybeSync};

/// Host-environment capabilities the controller cannot probe portably.
///
/// Stands in for window-level feature detection: embedded frames and
/// touch user agents get emulated fullscreen, everything else may try the
/// element-native fullscreen API first.
#[cfg_attr(any(test, feature = "test-utils"), unimock::unimock(api = HostEnvMock))]
pub trait HostEnv: MaybeSend + MaybeSync + 'static {
    /// Whether the app runs inside an embedded frame.
    ///
    /// Embedded frames cannot use element-native fullscreen.
    fn is_embedded(&self) -> bool;

    /// Whether the primary pointer is a touch contact.
    fn is_touch(&self) -> bool;

    /// Leave element-native fullscreen if the host is currently in it.
    fn exit_native_fullscreen(&self);
}
