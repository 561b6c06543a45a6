/// Opaque identifier of a physical touch device.
pub type DeviceId = u64;

/// Lets a gesture stop a trackpad from also moving the system cursor.
///
/// Both calls are advisory and bracket an active gesture.
pub trait CursorControl: Send {
    fn disable_device_for_cursor(&self, device: DeviceId);
    fn enable_device_for_cursor(&self, device: DeviceId);
}

#[derive(Debug, Default)]
pub struct NoCursorControl;

impl CursorControl for NoCursorControl {
    fn disable_device_for_cursor(&self, _device: DeviceId) {}
    fn enable_device_for_cursor(&self, _device: DeviceId) {}
}
