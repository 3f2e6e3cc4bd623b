#![forbid(unsafe_code)]

//! Variant 5: the store is bootstrapped from storage before the first
//! render and mirrored back on every change.
//!
//! The two persistence rules on display: the load is awaited before the
//! store exists (no uninitialized snapshot is ever observable), and saving
//! is a fire-and-forget subscriber (a slow or failing backend can never
//! block or reverse an in-memory change).

use std::cell::Cell;
use std::io::{BufRead, Write};
use std::path::Path;
use std::rc::Rc;

use tally_app::controller::{CounterActions, CounterModel, StoreController};
use tally_app::persistence::{
    CounterStorage, JsonFileStorage, StubDatabase, bootstrap, mirror_to_storage,
};

use super::{Gesture, parse_gesture};

pub fn run(
    storage_path: Option<&Path>,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> std::io::Result<()> {
    let storage: Rc<dyn CounterStorage> = match storage_path {
        Some(path) => Rc::new(JsonFileStorage::new(path)),
        None => Rc::new(StubDatabase::default()),
    };

    writeln!(out, "[persistent] loading initial snapshot...")?;
    let store = bootstrap(storage.as_ref());
    let _mirror = mirror_to_storage(&store, Rc::clone(&storage));
    let controller = StoreController::new(store.clone());

    let dirty = Rc::new(Cell::new(true));
    let mark = Rc::clone(&dirty);
    let _sub = store.subscribe(move |_| mark.set(true));

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
    fn stub_session_starts_at_zero() {
        let mut input = Cursor::new("+\n+\nq\n");
        let mut out = Vec::new();
        run(None, &mut input, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("loading initial snapshot"));
        assert!(text.contains("Counter: 0"));
        assert!(text.contains("final count: 2"));
    }

    #[test]
    fn file_storage_survives_sessions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("counter.json");

        let mut out = Vec::new();
        run(Some(&path), &mut Cursor::new("+\n+\n+\nq\n"), &mut out).unwrap();

        // Second session picks up where the first left off.
        let mut out = Vec::new();
        run(Some(&path), &mut Cursor::new("-\nq\n"), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Counter: 3"));
        assert!(text.contains("final count: 2"));
    }

    #[test]
    fn missing_file_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let mut out = Vec::new();
        run(Some(&path), &mut Cursor::new("q\n"), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Counter: 0"));
    }
}
