#![forbid(unsafe_code)]

//! The naive baseline: the view loop holds the store and mutates it
//! directly. Nothing names the intentions; the gesture handler *is* the
//! business logic. Every later variant exists to fix something about this
//! one.

use std::cell::Cell;
use std::io::{BufRead, Write};
use std::rc::Rc;

use tally_app::model::Counter;
use tally_store::Store;

use super::{Gesture, parse_gesture};

pub fn run(input: &mut dyn BufRead, out: &mut dyn Write) -> std::io::Result<()> {
    let store = Store::new(Counter::default());

    // The store notification is the rebuild signal: mark dirty, re-render at
    // the top of the loop.
    let dirty = Rc::new(Cell::new(true));
    let mark = Rc::clone(&dirty);
    let _sub = store.subscribe(move |_| mark.set(true));

    writeln!(out, "[simple] view mutates the store directly")?;
    let mut line = String::new();
    loop {
        if dirty.replace(false) {
            writeln!(out, "Counter: {}", store.get())?;
        }
        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }
        match parse_gesture(&line) {
            Gesture::Increment => store.update(|c| c.incremented()),
            Gesture::Decrement => store.update(|c| c.decremented()),
            Gesture::Reset => store.update(|c| c.reset()),
            Gesture::Quit => break,
            Gesture::Go(_) | Gesture::Unknown(_) => {
                writeln!(out, "? (try +, -, r, q)")?;
            }
        }
    }
    writeln!(out, "bye (final count: {})", store.get())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn scripted_session() {
        let mut input = Cursor::new("+\n+\n-\nq\n");
        let mut out = Vec::new();
        run(&mut input, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Counter: 1"));
        assert!(text.contains("Counter: 2"));
        assert!(text.contains("final count: 1"));
    }

    #[test]
    fn eof_ends_the_session() {
        let mut input = Cursor::new("+\n");
        let mut out = Vec::new();
        run(&mut input, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("final count: 1"));
    }
}
