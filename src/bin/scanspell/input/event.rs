/// Input decoded from raw stdin bytes. Whether a key is the switch is decided by
/// the event loop, since the activation key can change while running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputEvent {
    Key(char),
    /// Left-button press at (x, y), 1-based like terminal reports.
    MouseClick { x: u16, y: u16 },
    Exit,
}
