//! tmux passthrough wrapping
//!
//! tmux interprets escape sequences itself and eats the ones it does not
//! understand, so sequences meant for the outer terminal must travel inside
//! a DCS passthrough envelope:
//!
//! ```text
//! ESC P tmux ; <payload with every ESC doubled> ESC \
//! ```
//!
//! tmux strips the envelope, collapses the doubled escapes, and forwards
//! the payload verbatim. Wrapping is deliberately not applied to the screen
//! save/restore pair (tmux manages its own alternate screen and forwarding
//! a second restore corrupts the display) nor to disable-focus-reporting.

use crate::term::sequences::EscapeSequence;

const ESC: u8 = 0x1b;
const PASSTHROUGH_START: &[u8] = b"\x1bPtmux;";
const PASSTHROUGH_END: &[u8] = b"\x1b\\";

/// Wrap `seq` in the tmux passthrough envelope, doubling embedded escapes.
///
/// An empty sequence stays empty: there is nothing to forward. Calling this
/// twice on the same sequence produces a doubly-enveloped payload the inner
/// terminal would misread, so each sequence is wrapped at most once.
pub fn wrap(seq: &EscapeSequence) -> EscapeSequence {
    if seq.is_empty() {
        return EscapeSequence::empty();
    }

    let payload = seq.as_bytes();
    let mut out = Vec::with_capacity(PASSTHROUGH_START.len() + payload.len() * 2 + PASSTHROUGH_END.len());
    out.extend_from_slice(PASSTHROUGH_START);
    for &byte in payload {
        if byte == ESC {
            out.push(ESC);
        }
        out.push(byte);
    }
    out.extend_from_slice(PASSTHROUGH_END);
    EscapeSequence::from_bytes(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(bytes: &[u8]) -> EscapeSequence {
        EscapeSequence::from_bytes(bytes.to_vec())
    }

    fn payload_of(wrapped: &EscapeSequence) -> &[u8] {
        let bytes = wrapped.as_bytes();
        assert!(bytes.starts_with(PASSTHROUGH_START));
        assert!(bytes.ends_with(PASSTHROUGH_END));
        &bytes[PASSTHROUGH_START.len()..bytes.len() - PASSTHROUGH_END.len()]
    }

    fn esc_count(bytes: &[u8]) -> usize {
        bytes.iter().filter(|&&b| b == ESC).count()
    }

    #[test]
    fn test_wrap_plain_payload() {
        let wrapped = wrap(&seq(b"hello"));
        assert_eq!(wrapped.as_bytes(), b"\x1bPtmux;hello\x1b\\");
    }

    #[test]
    fn test_wrap_doubles_each_escape() {
        // OSC 50 cursor sequence: exactly one ESC in the payload
        let inner = seq(b"\x1b]50;CursorShape=1\x07");
        let wrapped = wrap(&inner);
        assert_eq!(esc_count(payload_of(&wrapped)), 2);

        // CSI + ST: two ESC bytes become four
        let inner = seq(b"\x1b[?1004h\x1b\\");
        let wrapped = wrap(&inner);
        assert_eq!(esc_count(payload_of(&wrapped)), 4);
    }

    #[test]
    fn test_wrap_has_single_envelope() {
        let wrapped = wrap(&seq(b"\x1b[?1004h"));
        let bytes = wrapped.as_bytes();
        let starts = bytes
            .windows(PASSTHROUGH_START.len())
            .filter(|w| *w == PASSTHROUGH_START)
            .count();
        assert_eq!(starts, 1);
        assert!(bytes.ends_with(PASSTHROUGH_END));
    }

    #[test]
    fn test_wrap_is_not_idempotent() {
        let inner = seq(b"\x1b[?1004h");
        let once = wrap(&inner);
        let twice = wrap(&once);
        assert_ne!(once, twice);
        // The doubly-wrapped form nests a full envelope inside the payload.
        assert!(twice.as_bytes().len() > once.as_bytes().len());
    }

    #[test]
    fn test_wrap_empty_stays_empty() {
        assert!(wrap(&EscapeSequence::empty()).is_empty());
    }
}
