#![forbid(unsafe_code)]

//! The rendering seam.
//!
//! A [`Screen`] is the unit the router selects and the demos print. It reads
//! state (directly or through [`crate::controller::CounterModel`]) at render
//! time; it never caches what it read, so a rebuild after a store
//! notification is always consistent.

/// One renderable screen.
pub trait Screen {
    /// Stable name shown in the screen header and logs.
    fn title(&self) -> &str;

    /// Render the screen to text from current state.
    fn render(&self) -> String;
}
