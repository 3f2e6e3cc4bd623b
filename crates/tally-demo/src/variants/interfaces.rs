#![forbid(unsafe_code)]

//! Variant 4: the view functions depend only on the capability traits
//! [`CounterModel`] and [`CounterActions`]. They compile without knowing
//! which controller — or which store — sits behind them, so swapping the
//! backing here is a one-line change in `run`.

use std::cell::Cell;
use std::io::{BufRead, Write};
use std::rc::Rc;

use tally_app::controller::{CounterActions, CounterModel, StoreController};
use tally_app::model::Counter;
use tally_store::Store;

use super::{Gesture, parse_gesture};

/// Read side of the view: knows only that a value can be read.
fn render(model: &dyn CounterModel, out: &mut dyn Write) -> std::io::Result<()> {
    writeln!(out, "Counter: {}", model.value())
}

/// Action side of the view: knows only which intentions exist.
fn dispatch(gesture: &Gesture, actions: &dyn CounterActions) {
    match gesture {
        Gesture::Increment => actions.increment(),
        Gesture::Decrement => actions.decrement(),
        Gesture::Reset => actions.reset(),
        _ => {}
    }
}

pub fn run(input: &mut dyn BufRead, out: &mut dyn Write) -> std::io::Result<()> {
    let store = Store::new(Counter::default());
    let controller = StoreController::new(store.clone());
    // The view only ever sees these two facets.
    let model: &dyn CounterModel = &controller;
    let actions: &dyn CounterActions = &controller;

    let dirty = Rc::new(Cell::new(true));
    let mark = Rc::clone(&dirty);
    let _sub = store.subscribe(move |_| mark.set(true));

    writeln!(out, "[interfaces] view sees capability traits only")?;
    let mut line = String::new();
    loop {
        if dirty.replace(false) {
            render(model, out)?;
        }
        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }
        match parse_gesture(&line) {
            Gesture::Quit => break,
            gesture @ (Gesture::Increment | Gesture::Decrement | Gesture::Reset) => {
                dispatch(&gesture, actions);
            }
            Gesture::Go(_) | Gesture::Unknown(_) => {
                writeln!(out, "? (try +, -, r, q)")?;
            }
        }
    }
    writeln!(out, "bye (final count: {})", model.value())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn scripted_session() {
        let mut input = Cursor::new("+\n-\n-\nq\n");
        let mut out = Vec::new();
        run(&mut input, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Counter: -1"));
        assert!(text.contains("final count: -1"));
    }

    #[test]
    fn render_needs_only_the_model_capability() {
        struct Fixed;
        impl CounterModel for Fixed {
            fn value(&self) -> i64 {
                77
            }
        }
        let mut out = Vec::new();
        render(&Fixed, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Counter: 77\n");
    }
}
