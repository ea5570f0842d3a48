//! ANSI cursor sequences used by the outline painter.

const CSI: &str = "\x1b[";

/// Move the cursor to an absolute 1-based `row` and `column`.
pub fn move_to(row: u16, column: u16) -> String {
    format!("{CSI}{row};{column}H")
}

/// Save the current cursor position.
pub fn save_position() -> &'static str {
    "\x1b[s"
}

/// Restore the most recently saved cursor position.
pub fn restore_position() -> &'static str {
    "\x1b[u"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_position_is_well_formed() {
        assert_eq!(move_to(3, 5), "\x1b[3;5H");
    }
}
