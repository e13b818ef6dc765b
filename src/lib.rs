//! This crate provides a doubly-linked list with owned nodes, together with
//! index-aware list cursors that can walk the list in both directions and edit
//! it at the point of traversal.
//!
//! The [`List`] allows inserting, removing elements at a cursor in constant
//! time. In compromise, accessing or mutating elements by index takes *O*(*n*)
//! time: every positional operation positions a cursor and delegates to it.
//!
//! Here is a quick example showing how the list works.
//!
//! ```
//! use cursor_list::List;
//!
//! let mut list = List::new();
//! list.push("a");
//! list.push("b");
//! list.insert(1, "x").unwrap();
//! assert_eq!(list.to_string(), "[a, x, b]");
//!
//! assert!(list.remove_item(&"x"));
//! assert_eq!(list.get(0), Ok(&"a"));
//! assert_eq!(list.index_of(&"b"), Some(1));
//! assert_eq!(list.last_index_of(&"z"), None);
//! ```
//!
//! # Memory Layout
//!
//! The memory layout of the list is like the following graph:
//! ```text
//!          ┌─────────────────────────────────────────────────────────────────────┐
//!          ↓                                                     (Ghost) Node N  │
//!    ╔═══════════╗           ╔═══════════╗                        ┌───────────┐  │
//!    ║   next    ║ ────────→ ║   next    ║ ────────→ ┄┄ ────────→ │   next    │ ─┘
//!    ╟───────────╢           ╟───────────╢     Node 2, 3, ...     ├───────────┤
//! ┌─ ║   prev    ║ ←──────── ║   prev    ║ ←──────── ┄┄ ←──────── │   prev    │
//! │  ╟───────────╢           ╟───────────╢                        ├───────────┤
//! │  ║ element T ║           ║ element T ║                        ┊No element ┊
//! │  ╚═══════════╝           ╚═══════════╝                        └╌╌╌╌╌╌╌╌╌╌╌┘
//! │   Node 0 (head)           Node 1                                  ↑   ↑
//! └───────────────────────────────────────────────────────────────────┘   │
//! ╔═══════════╗                                                           │
//! ║   ghost   ║ ──────────────────────────────────────────────────────────┘
//! ╟───────────╢
//! ║    len    ║
//! ╚═══════════╝
//!     List
//! ```
//!
//! `ghost.next` is the head and `ghost.prev` is the tail of the list. When the
//! list is empty both point back at the ghost node, which plays the part of an
//! absent head, tail or neighbour everywhere else.
//!
//! Every node is owned through the `next` link of its predecessor; `prev`
//! links are only ever followed for traversal.
//!
//! # Cursors
//!
//! A cursor stands *between* two elements. In a list of length *n* it has
//! *n* + 1 positions, indexed by 0, 1, ..., *n*; stepping forward yields the
//! element at `next_index()`, stepping backward yields the one at
//! `previous_index()`.
//!
//! [`Cursor`] only borrows the list immutably, so many of them may coexist.
//! [`CursorMut`] borrows it mutably and can [`add`], [`set`] and [`remove`]
//! elements at its position. Because the borrow is exclusive, a cursor can
//! never observe a list that another handle has restructured.
//!
//! ```
//! use cursor_list::{List, ListError};
//!
//! let mut list = List::from(["a", "b", "c"]);
//! let mut cursor = list.cursor_mut(0).unwrap();
//! assert_eq!(cursor.next(), Ok(&mut "a"));
//! cursor.set("A").unwrap();
//! assert_eq!(cursor.set("Z"), Err(ListError::IllegalState));
//! assert_eq!(list.to_string(), "[A, b, c]");
//!
//! let mut cursor = list.cursor_mut(3).unwrap();
//! assert!(!cursor.has_next());
//! assert_eq!(cursor.previous(), Ok(&mut "c"));
//! assert_eq!(cursor.remove(), Ok("c"));
//! assert_eq!(list.to_string(), "[A, b]");
//! assert_eq!(list.len(), 2);
//! ```
//!
//! # Features
//!
//! - `tracing` (enabled by default): emit `trace` level events for every
//!   structural mutation and every rejected operation.
//!
//! [`List`]: crate::List
//! [`Cursor`]: crate::list::cursor::Cursor
//! [`CursorMut`]: crate::list::cursor::CursorMut
//! [`add`]: crate::list::cursor::CursorMut::add
//! [`set`]: crate::list::cursor::CursorMut::set
//! [`remove`]: crate::list::cursor::CursorMut::remove

macro_rules! trace_event {
    ($($arg:tt)+) => {{
        #[cfg(feature = "tracing")]
        {
            tracing::trace!($($arg)+);
        }
    }};
}

#[doc(inline)]
pub use error::{ListError, Result};
#[doc(inline)]
pub use list::cursor::{Cursor, CursorMut};
#[doc(inline)]
pub use list::iterator::{IntoIter, Iter, IterMut};
#[doc(inline)]
pub use list::List;

pub mod error;
pub mod list;

#[cfg(all(test, feature = "tracing"))]
mod tests {
    use crate::List;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;
    use tracing_subscriber::prelude::*;

    /// A log sink that keeps everything written to it.
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn lines(&self) -> Vec<String> {
            let bytes = self.0.lock().unwrap().clone();
            String::from_utf8(bytes)
                .unwrap()
                .lines()
                .map(str::to_owned)
                .collect()
        }
    }

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Captured {
        type Writer = Captured;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn trace_events_carry_index_and_len() {
        let captured = Captured::default();
        let subscriber = tracing_subscriber::registry().with(
            tracing_subscriber::fmt::layer()
                .with_writer(captured.clone())
                .with_ansi(false)
                .with_target(false)
                .without_time(),
        );
        tracing::subscriber::with_default(subscriber, || {
            let mut list = List::from(['a', 'b']);
            assert_eq!(list.remove(0), Ok('a'));
            assert!(list.get(5).is_err());
            assert!(list.cursor_start_mut().remove().is_err());
            assert!(list.cursor_end_mut().next().is_err());
        });

        let lines = captured.lines();
        let expected = [
            "attached node len=1",
            "attached node len=2",
            "detached node len=1",
            "index out of range index=5 len=1",
            "remove without a last returned element index=0",
            "cannot step past the end index=1",
        ];
        assert_eq!(lines.len(), expected.len(), "{:#?}", lines);
        for (line, expected) in lines.iter().zip(expected) {
            assert!(line.starts_with("TRACE"), "{}", line);
            assert!(line.ends_with(expected), "{} / {}", line, expected);
        }
    }
}
