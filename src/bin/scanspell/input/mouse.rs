#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MouseEventKind {
    Press,
    Release,
}

/// Parse an SGR mouse report: ESC [ < button ; x ; y M (press) or m (release).
/// Only the left button is reported; motion and wheel events yield `None`.
pub(crate) fn parse_sgr_mouse(buffer: &[u8]) -> Option<(MouseEventKind, u16, u16)> {
    // Shortest form: ESC [ < 0 ; 1 ; 1 M
    if buffer.len() < 10 || !buffer.starts_with(b"\x1b[<") {
        return None;
    }
    let kind = match buffer[buffer.len() - 1] {
        b'M' => MouseEventKind::Press,
        b'm' => MouseEventKind::Release,
        _ => return None,
    };
    let params = std::str::from_utf8(&buffer[3..buffer.len() - 1]).ok()?;
    let mut parts = params.split(';');
    let button: u16 = parts.next()?.parse().ok()?;
    let x: u16 = parts.next()?.parse().ok()?;
    let y: u16 = parts.next()?.parse().ok()?;
    if parts.next().is_some() || button != 0 {
        return None;
    }
    Some((kind, x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_left_press_and_release() {
        assert_eq!(
            parse_sgr_mouse(b"\x1b[<0;12;40M"),
            Some((MouseEventKind::Press, 12, 40))
        );
        assert_eq!(
            parse_sgr_mouse(b"\x1b[<0;3;4m"),
            Some((MouseEventKind::Release, 3, 4))
        );
    }

    #[test]
    fn ignores_other_buttons_and_motion() {
        assert_eq!(parse_sgr_mouse(b"\x1b[<2;12;40M"), None);
        assert_eq!(parse_sgr_mouse(b"\x1b[<35;12;40M"), None);
        assert_eq!(parse_sgr_mouse(b"\x1b[<64;1;1M"), None);
        assert_eq!(parse_sgr_mouse(b"\x1b[A"), None);
    }
}
