/// Modifier bits reported by the hotkey source.
pub const FN: u32 = 1 << 0;
pub const CTRL: u32 = 1 << 1;
pub const SHIFT: u32 = 1 << 2;
pub const ALT: u32 = 1 << 3;
pub const CMD: u32 = 1 << 4;

/// Parse a hotkey string like "fn+ctrl" into a modifier mask.
///
/// Returns `None` for unknown keys or an empty combination.
pub fn parse_hotkey(s: &str) -> Option<u32> {
    let mut mask = 0;
    for part in s.split('+') {
        let lower = part.trim().to_ascii_lowercase();
        mask |= match lower.as_str() {
            "fn" | "function" => FN,
            "ctrl" | "control" => CTRL,
            "shift" => SHIFT,
            "alt" | "option" => ALT,
            "cmd" | "command" => CMD,
            "" => 0,
            _ => return None,
        };
    }
    if mask == 0 {
        None
    } else {
        Some(mask)
    }
}

/// Inverse of [`parse_hotkey`].
pub fn format_hotkey(mask: u32) -> String {
    let names = [(FN, "fn"), (CTRL, "ctrl"), (SHIFT, "shift"), (ALT, "alt"), (CMD, "cmd")];
    names
        .iter()
        .filter(|(bit, _)| mask & bit != 0)
        .map(|(_, name)| *name)
        .collect::<Vec<_>>()
        .join("+")
}
