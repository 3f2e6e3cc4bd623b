#![forbid(unsafe_code)]

//! Variant 3: the controller is handed a publish callback instead of a
//! store. It is rebuilt from the latest snapshot on every render pass, so
//! it never holds state of its own and never names a store type — the
//! dependency-inversion-via-injected-function shape.

use std::cell::Cell;
use std::io::{BufRead, Write};
use std::rc::Rc;

use tally_app::controller::{CounterActions, CounterModel, PublishController, publish_to};
use tally_app::model::Counter;
use tally_store::Store;

use super::{Gesture, parse_gesture};

pub fn run(input: &mut dyn BufRead, out: &mut dyn Write) -> std::io::Result<()> {
    let store = Store::new(Counter::default());
    let publish = publish_to(&store);

    let dirty = Rc::new(Cell::new(true));
    let mark = Rc::clone(&dirty);
    let _sub = store.subscribe(move |_| mark.set(true));

    writeln!(out, "[publisher] controller holds a publish callback, not a store")?;
    let mut line = String::new();
    loop {
        if dirty.replace(false) {
            // Fresh controller per render pass, scoped to the snapshot it saw.
            let controller = PublishController::new(store.get(), Rc::clone(&publish));
            writeln!(out, "Counter: {}", controller.value())?;
        }
        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }
        // Controllers are disposable: one per interaction, built from the
        // snapshot current right now.
        let controller = PublishController::new(store.get(), Rc::clone(&publish));
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
    writeln!(out, "bye (final count: {})", store.get())
}
