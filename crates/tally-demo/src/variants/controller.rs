#![forbid(unsafe_code)]

//! Variant 2: a [`StoreController`] sits between the view loop and the
//! store. The loop no longer computes snapshots; it forwards intentions.
//! The controller still knows the concrete store type — the next variant
//! removes that too.

use std::cell::Cell;
use std::io::{BufRead, Write};
use std::rc::Rc;

use tally_app::controller::{CounterActions, CounterModel, StoreController};
use tally_app::model::Counter;
use tally_store::Store;

use super::{Gesture, parse_gesture};

pub fn run(input: &mut dyn BufRead, out: &mut dyn Write) -> std::io::Result<()> {
    let store = Store::new(Counter::default());
    let controller = StoreController::new(store.clone());

    let dirty = Rc::new(Cell::new(true));
    let mark = Rc::clone(&dirty);
    let _sub = store.subscribe(move |_| mark.set(true));

    writeln!(out, "[controller] intentions go through a store-backed controller")?;
    let mut line = String::new();
    loop {
        if dirty.replace(false) {
            writeln!(out, "Counter: {}", controller.value())?;
        }
        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }
        match parse_gesture(&line) {
            Gesture::Increment => controller.increment(),
            Gesture::Decrement => controller.decrement(),
            Gesture::Reset => controller.reset(),
            Gesture::Quit => break,
            Gesture::Go(_) | Gesture::Unknown(_) => {
                writeln!(out, "? (try +, -, r, q)")?;
            }
        }
    }
    writeln!(out, "bye (final count: {})", controller.value())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn scripted_session() {
        let mut input = Cursor::new("+\n+\n+\nr\n+\nq\n");
        let mut out = Vec::new();
        run(&mut input, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Counter: 3"));
        assert!(text.contains("Counter: 0"));
        assert!(text.contains("final count: 1"));
    }
}
