#![forbid(unsafe_code)]

//! The six wiring variants.
//!
//! Every module wires the same counter domain to the same stdin gesture
//! loop; only the layer between the loop and the store changes. Read them
//! in order — each one peels the view a little further away from the store:
//!
//! 1. [`simple`] — the loop owns the store and mutates it directly.
//! 2. [`controller`] — a store-backed controller names the intentions.
//! 3. [`publisher`] — the controller gets a publish callback, not a store.
//! 4. [`interfaces`] — the view sees only capability traits.
//! 5. [`persistent`] — startup loads before first render; changes mirror
//!    back to storage fire-and-forget.
//! 6. [`routed`] — screens behind a path router, rebuilt on every change.
//!
//! The repetition across modules is deliberate; the point is the diff.

pub mod controller;
pub mod interfaces;
pub mod persistent;
pub mod publisher;
pub mod routed;
pub mod simple;

/// One line of user input, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gesture {
    Increment,
    Decrement,
    Reset,
    /// `g PATH` — only the routed variant accepts this.
    Go(String),
    Quit,
    Unknown(String),
}

/// Parse a stdin line into a gesture. Empty lines are ignored by callers.
#[must_use]
pub fn parse_gesture(line: &str) -> Gesture {
    let line = line.trim();
    match line {
        "+" => Gesture::Increment,
        "-" => Gesture::Decrement,
        "r" => Gesture::Reset,
        "q" => Gesture::Quit,
        _ => match line.strip_prefix("g ") {
            Some(path) => Gesture::Go(path.trim().to_string()),
            None => Gesture::Unknown(line.to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gestures_parse() {
        assert_eq!(parse_gesture("+"), Gesture::Increment);
        assert_eq!(parse_gesture(" - "), Gesture::Decrement);
        assert_eq!(parse_gesture("r"), Gesture::Reset);
        assert_eq!(parse_gesture("q"), Gesture::Quit);
        assert_eq!(parse_gesture("g /detail"), Gesture::Go("/detail".to_string()));
        assert_eq!(parse_gesture("zap"), Gesture::Unknown("zap".to_string()));
    }
}
