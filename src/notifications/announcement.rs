// SPDX-License-Identifier: MPL-2.0
//! Screen-reader summary of the queue.
//!
//! The text is handed to an accessibility live region by the rendering
//! layer; nothing here renders it.

/// Returns a pluralised phrase for `count` active toasts.
#[must_use]
pub fn summarize(count: usize) -> String {
    match count {
        0 => "No notifications".to_string(),
        1 => "1 notification".to_string(),
        n => format!("{n} notifications"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_queue() {
        assert_eq!(summarize(0), "No notifications");
    }

    #[test]
    fn singular() {
        assert_eq!(summarize(1), "1 notification");
    }

    #[test]
    fn plural() {
        assert_eq!(summarize(3), "3 notifications");
        assert_eq!(summarize(12), "12 notifications");
    }
}
