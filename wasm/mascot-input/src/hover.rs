//! Click-through state derived from hover.

use mascot_channel::ChannelMessage;

/// Tracks whether the pointer is over the mascot and what the host was last
/// told about it.
///
/// The host hears about changes only, so repeated moves over the same
/// region cost nothing.
#[derive(Debug, Default)]
pub struct HoverTracker {
    is_hovering: bool,
    reported: bool,
}

impl HoverTracker {
    pub fn is_hovering(&self) -> bool {
        self.is_hovering
    }

    /// Record a hit-test result and return the message for the host, if
    /// any. While `suppressed` the result is recorded but nothing is sent.
    pub fn update(&mut self, hovering: bool, suppressed: bool) -> Option<ChannelMessage> {
        self.is_hovering = hovering;
        if suppressed {
            return None;
        }
        self.reconcile()
    }

    /// Bring the host in line with the last recorded hover state.
    pub fn reconcile(&mut self) -> Option<ChannelMessage> {
        if self.is_hovering == self.reported {
            return None;
        }
        self.reported = self.is_hovering;
        Some(ChannelMessage::SetIgnore(!self.is_hovering))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entering_and_leaving_send_one_message_each() {
        let mut hover = HoverTracker::default();
        assert_eq!(hover.update(false, false), None);
        assert_eq!(hover.update(true, false), Some(ChannelMessage::SetIgnore(false)));
        assert_eq!(hover.update(true, false), None);
        assert_eq!(hover.update(true, false), None);
        assert_eq!(hover.update(false, false), Some(ChannelMessage::SetIgnore(true)));
        assert_eq!(hover.update(false, false), None);
    }

    #[test]
    fn suppressed_updates_are_recorded_but_silent() {
        let mut hover = HoverTracker::default();
        hover.update(true, false);

        assert_eq!(hover.update(false, true), None);
        assert!(!hover.is_hovering());

        assert_eq!(hover.reconcile(), Some(ChannelMessage::SetIgnore(true)));
        assert_eq!(hover.reconcile(), None);
    }

    #[test]
    fn round_trip_during_suppression_needs_no_message() {
        let mut hover = HoverTracker::default();
        hover.update(true, false);
        hover.update(false, true);
        hover.update(true, true);
        assert_eq!(hover.reconcile(), None);
    }
}
