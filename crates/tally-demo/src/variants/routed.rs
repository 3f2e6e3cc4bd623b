#![forbid(unsafe_code)]

//! Variant 6: two screens behind the path router.
//!
//! The router picks the active screen from `(path, snapshot)` and the loop
//! rebuilds it on every refresh — after a count change *or* a navigation.
//! Controllers are constructed fresh per interaction from the latest
//! snapshot; nothing but the store's snapshot survives a navigation.

use std::cell::Cell;
use std::io::{BufRead, Write};
use std::rc::Rc;

use tally_app::controller::{CounterActions, CounterModel, PublishController, publish_to};
use tally_app::model::Counter;
use tally_app::router::{RouteContext, Router};
use tally_app::view::Screen;
use tally_store::Store;

use super::{Gesture, parse_gesture};

struct HomeScreen {
    controller: PublishController,
}

impl Screen for HomeScreen {
    fn title(&self) -> &str {
        "home"
    }

    fn render(&self) -> String {
        format!(
            "Counter: {}  (+/-/r count, g /detail inspect, q quit)",
            self.controller.value()
        )
    }
}

struct DetailScreen {
    snapshot: Counter,
}

impl Screen for DetailScreen {
    fn title(&self) -> &str {
        "detail"
    }

    fn render(&self) -> String {
        format!(
            "The count is {}.  (g / to go back, q quit)",
            self.snapshot.value
        )
    }
}

fn build_router(store: Store<Counter>) -> Router {
    Router::builder()
        .route("/", |ctx: &RouteContext| {
            Box::new(HomeScreen {
                controller: PublishController::new(ctx.snapshot, Rc::clone(&ctx.publish)),
            }) as Box<dyn Screen>
        })
        .route("/detail", |ctx: &RouteContext| {
            Box::new(DetailScreen {
                snapshot: ctx.snapshot,
            }) as Box<dyn Screen>
        })
        .build(store, "/")
        .expect("default route is declared")
}

pub fn run(input: &mut dyn BufRead, out: &mut dyn Write) -> std::io::Result<()> {
    let store = Store::new(Counter::default());
    let router = build_router(store.clone());
    let navigator = router.navigator();

    let dirty = Rc::new(Cell::new(true));
    let mark = Rc::clone(&dirty);
    let _refresh = router.on_refresh(move || mark.set(true));

    writeln!(out, "[routed] screens selected by path, rebuilt on change")?;
    let mut line = String::new();
    loop {
        if dirty.replace(false) {
            let screen = router.current_screen();
            writeln!(out, "[{}] {}", screen.title(), screen.render())?;
        }
        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }
        let gesture = parse_gesture(&line);
        match gesture {
            Gesture::Quit => break,
            Gesture::Go(path) => {
                if let Err(err) = navigator.navigate(&path) {
                    writeln!(out, "{err}")?;
                }
            }
            Gesture::Increment | Gesture::Decrement | Gesture::Reset => {
                if navigator.current() == "/" {
                    // Fresh controller per interaction, scoped to the
                    // snapshot current right now.
                    let controller =
                        PublishController::new(store.get(), publish_to(&store));
                    match gesture {
                        Gesture::Increment => controller.increment(),
                        Gesture::Decrement => controller.decrement(),
                        Gesture::Reset => controller.reset(),
                        _ => unreachable!(),
                    }
                } else {
                    writeln!(out, "the detail screen is read-only (g / to count)")?;
                }
            }
            Gesture::Unknown(_) => {
                writeln!(out, "? (try +, -, r, g PATH, q)")?;
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
    fn counting_then_inspecting() {
        let mut input = Cursor::new("+\n+\ng /detail\ng /\n-\nq\n");
        let mut out = Vec::new();
        run(&mut input, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("[home] Counter: 2"));
        assert!(text.contains("[detail] The count is 2."));
        // Back home: the snapshot survived both navigations.
        assert!(text.contains("final count: 1"));
    }

    #[test]
    fn unknown_route_is_reported_not_fatal() {
        let mut input = Cursor::new("g /nowhere\n+\nq\n");
        let mut out = Vec::new();
        run(&mut input, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("unknown route"));
        assert!(text.contains("final count: 1"));
    }

    #[test]
    fn detail_screen_rejects_count_gestures() {
        let mut input = Cursor::new("g /detail\n+\nq\n");
        let mut out = Vec::new();
        run(&mut input, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("read-only"));
        assert!(text.contains("final count: 0"));
    }
}
