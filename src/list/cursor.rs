use crate::error::{ListError, Result};
use crate::list::{List, Node};
use std::cmp::Ordering;
use std::fmt;
use std::fmt::Formatter;
use std::ptr::NonNull;

/// The direction of the last step of a cursor.
///
/// It decides which node [`CursorMut::set`] and [`CursorMut::remove`] act
/// upon: after a forward step it is the node before the cursor, after a
/// backward step it is the node after the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Forward,
    Backward,
}

/// A cursor over a `List`.
///
/// A `Cursor` stands between two elements and can step back-and-forth over
/// them, yielding the element it steps over.
///
/// In a list with length *n*, there are *n* + 1 valid positions for the
/// cursor, indexed by 0, 1, ..., *n*. A forward step yields the element at
/// [`next_index`](Cursor::next_index), a backward step the element at
/// [`previous_index`](Cursor::previous_index).
///
/// # Examples
///
/// Here is a simple example showing how the cursors work. (The cursor is
/// denoted by `|`).
/// ```
/// use cursor_list::{List, ListError};
///
/// // Create a list: [ A B C D ]
/// let list = List::from(['A', 'B', 'C', 'D']);
///
/// // Create a cursor at start: [|A B C D ] (index = 0)
/// let mut cursor = list.cursor_start();
/// assert!(!cursor.has_previous());
///
/// // Step forward: [ A|B C D ] (index = 1)
/// assert_eq!(cursor.next(), Ok(&'A'));
/// assert_eq!(cursor.next_index(), 1);
///
/// // Create a cursor at the end: [ A B C D|] (index = 4)
/// let mut cursor = list.cursor_end();
/// assert_eq!(cursor.next(), Err(ListError::NoSuchElement));
///
/// // Step backward: [ A B C|D ] (index = 3)
/// assert_eq!(cursor.previous(), Ok(&'D'));
/// assert_eq!(cursor.previous_index(), Some(2));
/// ```
pub struct Cursor<'a, T: 'a> {
    index: usize,
    /// The node a forward step would yield, or the ghost node at the end.
    pub(crate) current: NonNull<Node<T>>,
    last: Option<Step>,
    pub(crate) list: &'a List<T>,
}

impl<'a, T: 'a> Clone for Cursor<'a, T> {
    fn clone(&self) -> Self {
        Self {
            index: self.index,
            current: self.current,
            last: self.last,
            list: self.list,
        }
    }
}

/// Compare cursors by its position.
///
/// Only cursors belong to the same list and have the same positions
/// are considered equal.
///
/// # Examples
/// ```
/// use cursor_list::List;
///
/// let list = List::from([1, 2, 3]);
/// let cursor1 = list.cursor_start();
/// let mut cursor2 = cursor1.clone();
/// // The same list, and the same position.
/// assert_eq!(cursor1, cursor2);
///
/// cursor2.next().unwrap();
/// // The same list, but different positions.
/// assert_ne!(cursor1, cursor2);
///
/// let another_list = list.clone();
/// let cursor3 = another_list.cursor_start();
/// // Different list, the same position.
/// assert_ne!(cursor1, cursor3);
/// ```
impl<'a, T: 'a> PartialEq for Cursor<'a, T> {
    fn eq(&self, other: &Self) -> bool {
        self.same_list_with(other) && self.current == other.current
    }
}

impl<'a, T: 'a> Eq for Cursor<'a, T> {}

/// Compare cursors by its position.
///
/// Only cursors belong to the same list can compare, so it is `PartialOrd`
/// but not `Ord`.
///
/// # Examples
/// ```
/// use cursor_list::List;
///
/// let list = List::from([1, 2, 3]);
/// let cursor1 = list.cursor_start();
/// let mut cursor2 = cursor1.clone();
/// cursor2.next().unwrap();
/// // They belong to the same list, can compare.
/// assert!(cursor1 < cursor2);
///
/// let another_list = list.clone();
/// let cursor3 = another_list.cursor_end();
/// // They belong to different lists, cannot compare.
/// assert_eq!(cursor1.partial_cmp(&cursor3), None);
/// ```
impl<'a, T: 'a> PartialOrd for Cursor<'a, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if !self.same_list_with(other) {
            return None;
        }
        Some(self.index.cmp(&other.index))
    }
}

/// A cursor over a `List` with editing operations.
///
/// A `CursorMut` can [`add`](CursorMut::add) an element at its position, and
/// [`set`](CursorMut::set) or [`remove`](CursorMut::remove) the element it
/// stepped over last. The references it yields are tied to its own borrow,
/// instead of just the underlying list, so it can never hand out a reference
/// to a node it later frees.
///
/// The cursor borrows the list mutably for its whole lifetime, so no other
/// cursor can observe the list while it is being restructured.
///
/// # Examples
///
/// ```compile_fail
/// use cursor_list::List;
///
/// let mut list = List::from([1, 2, 3]);
/// let mut cursor = list.cursor_start_mut();
/// println!("{:?}", list.last());
/// println!("{:?}", cursor.next());
/// ```
pub struct CursorMut<'a, T: 'a> {
    index: usize,
    /// The node a forward step would yield, or the ghost node at the end.
    pub(crate) current: NonNull<Node<T>>,
    last: Option<Step>,
    pub(crate) list: &'a mut List<T>,
}

macro_rules! impl_cursor {
    ($CURSOR:ident) => {
        // Private methods
        impl<'a, T: 'a> $CURSOR<'a, T> {
            pub(crate) fn is_at_end(&self) -> bool {
                self.current == self.list.ghost_node()
            }
            pub(crate) fn is_at_start(&self) -> bool {
                self.prev_node() == self.list.ghost_node()
            }
            pub(crate) fn prev_node(&self) -> NonNull<Node<T>> {
                // SAFETY: `current.prev` is always valid, it is the ghost node
                // at the start of the list.
                unsafe { Node::prev_of(self.current) }
            }

            /// The node returned by the last step, if it may still be acted upon.
            fn last_node(&self) -> Option<NonNull<Node<T>>> {
                self.last.map(|step| match step {
                    Step::Forward => self.prev_node(),
                    Step::Backward => self.current,
                })
            }

            fn step_forward(&mut self) -> Result<NonNull<Node<T>>> {
                if self.is_at_end() {
                    trace_event!(index = self.index, "cannot step past the end");
                    return Err(ListError::NoSuchElement);
                }
                let node = self.current;
                // SAFETY: `node` is not the ghost node, so it is an element
                // node whose `next` is valid.
                self.current = unsafe { Node::next_of(node) };
                self.index += 1;
                self.last = Some(Step::Forward);
                Ok(node)
            }

            fn step_backward(&mut self) -> Result<NonNull<Node<T>>> {
                if self.is_at_start() {
                    trace_event!(index = self.index, "cannot step before the start");
                    return Err(ListError::NoSuchElement);
                }
                self.current = self.prev_node();
                self.index -= 1;
                self.last = Some(Step::Backward);
                Ok(self.current)
            }

            /// Move forward the cursor by given steps, without checking whether
            /// it will pass through the ghost node.
            ///
            /// It is unsafe because if the moving passes through the ghost node,
            /// the index will be invalid.
            unsafe fn seek_forward_fast(&mut self, steps: usize) {
                self.index += steps;
                (0..steps).for_each(|_| self.current = Node::next_of(self.current));
            }

            /// Move backward the cursor by given steps, without checking whether
            /// it will pass through the ghost node.
            ///
            /// It is unsafe because if the moving passes through the ghost node,
            /// the index will be invalid.
            unsafe fn seek_backward_fast(&mut self, steps: usize) {
                self.index -= steps;
                (0..steps).for_each(|_| self.current = Node::prev_of(self.current));
            }
        }

        impl<'a, T: 'a> $CURSOR<'a, T> {
            /// Return the index of the element a forward step would yield, or
            /// the length of the list if the cursor is at the end.
            pub fn next_index(&self) -> usize {
                self.index
            }

            /// Return the index of the element a backward step would yield, or
            /// `None` if the cursor is at the start.
            pub fn previous_index(&self) -> Option<usize> {
                self.index.checked_sub(1)
            }

            /// Returns the length of the `List`. See [`List::len`].
            pub fn len(&self) -> usize {
                self.list.len()
            }

            /// Returns `true` if the `List` is empty. See [`List::is_empty`].
            pub fn is_empty(&self) -> bool {
                self.list.is_empty()
            }

            /// Returns `true` if a forward step would yield an element.
            pub fn has_next(&self) -> bool {
                !self.is_at_end()
            }

            /// Returns `true` if a backward step would yield an element.
            pub fn has_previous(&self) -> bool {
                !self.is_at_start()
            }

            /// Return the element a forward step would yield, without moving.
            pub fn peek_next(&self) -> Option<&T> {
                if self.is_at_end() {
                    return None;
                }
                // SAFETY: a non-ghost node holds a valid element.
                Some(unsafe { Node::element(self.current) })
            }

            /// Return the element a backward step would yield, without moving.
            pub fn peek_previous(&self) -> Option<&T> {
                if self.is_at_start() {
                    return None;
                }
                // SAFETY: the previous node of a non-start position is never
                // the ghost node.
                Some(unsafe { Node::element(self.prev_node()) })
            }

            /// Return the element returned by the last step, or `None` if the
            /// cursor has not stepped since it was created, moved or used to
            /// edit the list.
            ///
            /// # Examples
            ///
            /// ```
            /// use cursor_list::List;
            ///
            /// let list = List::from([1, 2, 3]);
            /// let mut cursor = list.cursor(1).unwrap();
            /// assert_eq!(cursor.last_returned(), None);
            ///
            /// cursor.next().unwrap();
            /// assert_eq!(cursor.last_returned(), Some(&2));
            ///
            /// cursor.previous().unwrap();
            /// assert_eq!(cursor.last_returned(), Some(&2));
            /// ```
            pub fn last_returned(&self) -> Option<&T> {
                // SAFETY: the last returned node is an element node that has
                // not been removed, or `last` would have been cleared.
                self.last_node().map(|node| unsafe { Node::element(node) })
            }

            /// Move the cursor to the given position `target`, or return an error
            /// when `target > len`.
            ///
            /// If an error occurs, the cursor will stay put. Otherwise the cursor
            /// forgets its last returned element.
            ///
            /// This operation should compute in *O*(*n*) time, walking from
            /// whichever of the cursor, the start and the end is nearest.
            ///
            /// # Examples
            ///
            /// ```
            /// use cursor_list::List;
            ///
            /// let list = List::from([1, 2, 3]);
            /// let mut cursor = list.cursor_start();
            ///
            /// // Move cursor to a valid place (before the third element)
            /// assert!(cursor.seek_to(2).is_ok());
            /// assert_eq!(cursor.peek_next(), Some(&3));
            ///
            /// // Forbid to move to a invalid place
            /// assert!(cursor.seek_to(5).is_err());
            ///
            /// // The cursor is still before the third element
            /// assert_eq!(cursor.peek_next(), Some(&3));
            /// ```
            pub fn seek_to(&mut self, target: usize) -> Result<()> {
                let len = self.list.len();
                if target > len {
                    return Err(ListError::out_of_range(target, len));
                }
                self.last = None;
                match target {
                    target if target == self.index => {}
                    0 => self.move_to_start(),
                    target if target == len => self.move_to_end(),
                    _ => unsafe {
                        // current=c, target=t, end=#
                        if target > self.index {
                            // target is at the right side of current: [   c----->t   #]
                            if target - self.index <= len - target {
                                // target is near the right side of current: [    c-->t     #]
                                self.seek_forward_fast(target - self.index);
                            } else {
                                // target is far from the right side of current: [ c     t<--#]
                                self.move_to_end();
                                self.seek_backward_fast(len - target);
                            }
                        } else {
                            // target is at the left side of current: [   t<-----c   #]
                            if self.index - target <= target {
                                // target is near the left side of current: [    t<--c     #]
                                self.seek_backward_fast(self.index - target);
                            } else {
                                // target is far from the left side of current: [-->t      c #]
                                self.move_to_start();
                                self.seek_forward_fast(target);
                            }
                        }
                    },
                }
                Ok(())
            }

            /// Set the cursor to the start of the list (before the first element).
            ///
            /// This operation should compute in *O*(*1*) time.
            #[inline]
            pub fn move_to_start(&mut self) {
                self.index = 0;
                self.current = self.list.front_node();
                self.last = None;
            }

            /// Set the cursor to the end of the list (after the last element).
            ///
            /// This operation should compute in *O*(*1*) time.
            ///
            /// # Examples
            ///
            /// ```
            /// use cursor_list::List;
            ///
            /// let list = List::from([1, 2, 3]);
            /// let mut cursor = list.cursor_start();
            /// cursor.move_to_end();
            ///
            /// assert_eq!(cursor.next_index(), 3);
            /// assert_eq!(cursor.peek_previous(), Some(&3));
            /// ```
            #[inline]
            pub fn move_to_end(&mut self) {
                self.index = self.list.len();
                self.current = self.list.ghost_node();
                self.last = None;
            }
        }

        impl<'a, T: fmt::Debug + 'a> fmt::Debug for $CURSOR<'a, T> {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($CURSOR))
                    .field("list", &self.list)
                    .field("index", &self.index)
                    .field("last_returned", &self.last_returned())
                    .finish()
            }
        }
    };
}

impl_cursor!(CursorMut);
impl_cursor!(Cursor);

impl<'a, T: 'a> Cursor<'a, T> {
    pub(crate) fn new(list: &'a List<T>, current: NonNull<Node<T>>, index: usize) -> Self {
        Self {
            index,
            current,
            last: None,
            list,
        }
    }

    fn same_list_with(&self, other: &Self) -> bool {
        std::ptr::eq(self.list, other.list)
    }

    /// Step forward over the next element and return it.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::NoSuchElement`] if the cursor is at the end.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::{List, ListError};
    ///
    /// let list = List::from([1, 2]);
    /// let mut cursor = list.cursor_start();
    /// assert_eq!(cursor.next(), Ok(&1));
    /// assert_eq!(cursor.next(), Ok(&2));
    /// assert_eq!(cursor.next(), Err(ListError::NoSuchElement));
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<&'a T> {
        let node = self.step_forward()?;
        // SAFETY: the stepped node is an element node, and the list is
        // borrowed immutably for `'a`.
        Ok(unsafe { Node::element(node) })
    }

    /// Step backward over the previous element and return it.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::NoSuchElement`] if the cursor is at the start.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::{List, ListError};
    ///
    /// let list = List::from([1, 2]);
    /// let mut cursor = list.cursor_end();
    /// assert_eq!(cursor.previous(), Ok(&2));
    /// assert_eq!(cursor.previous(), Ok(&1));
    /// assert_eq!(cursor.previous(), Err(ListError::NoSuchElement));
    /// ```
    pub fn previous(&mut self) -> Result<&'a T> {
        let node = self.step_backward()?;
        // SAFETY: see `next`.
        Ok(unsafe { Node::element(node) })
    }
}

impl<'a, T: 'a> CursorMut<'a, T> {
    pub(crate) fn new(list: &'a mut List<T>, current: NonNull<Node<T>>, index: usize) -> Self {
        Self {
            index,
            current,
            last: None,
            list,
        }
    }
}

// Methods that does not change the linking structure of the list.
impl<'a, T: 'a> CursorMut<'a, T> {
    /// Step forward over the next element and return a mutable reference to
    /// it.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::NoSuchElement`] if the cursor is at the end.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::List;
    ///
    /// let mut list = List::from([1, 2, 3]);
    /// let mut cursor = list.cursor_start_mut();
    /// while let Ok(element) = cursor.next() {
    ///     *element *= 2;
    /// }
    /// assert_eq!(list.to_vec(), vec![2, 4, 6]);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<&mut T> {
        let node = self.step_forward()?;
        // SAFETY: the stepped node is an element node, and the returned
        // reference keeps the cursor borrowed.
        Ok(unsafe { Node::element_mut(node) })
    }

    /// Step backward over the previous element and return a mutable
    /// reference to it.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::NoSuchElement`] if the cursor is at the start.
    pub fn previous(&mut self) -> Result<&mut T> {
        let node = self.step_backward()?;
        // SAFETY: see `next`.
        Ok(unsafe { Node::element_mut(node) })
    }

    /// Like [`CursorMut::next`], but consume the cursor so that the reference
    /// can live as long as the borrow of the list.
    pub fn into_next(mut self) -> Result<&'a mut T> {
        let node = self.step_forward()?;
        // SAFETY: the cursor is consumed, so nothing else can reach the
        // element during `'a`.
        Ok(unsafe { Node::element_mut(node) })
    }

    /// Like [`CursorMut::previous`], but consume the cursor so that the
    /// reference can live as long as the borrow of the list.
    pub fn into_previous(mut self) -> Result<&'a mut T> {
        let node = self.step_backward()?;
        // SAFETY: see `into_next`.
        Ok(unsafe { Node::element_mut(node) })
    }

    /// Replace the element returned by the last step and return the old
    /// element.
    ///
    /// The cursor forgets its last returned element afterwards, so a second
    /// `set` needs another step first.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::IllegalState`] if the cursor has not stepped since
    /// it was created, moved or used to edit the list.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::{List, ListError};
    ///
    /// let mut list = List::from(["a", "b", "c"]);
    /// let mut cursor = list.cursor_start_mut();
    /// assert_eq!(cursor.set("?"), Err(ListError::IllegalState));
    ///
    /// cursor.next().unwrap();
    /// assert_eq!(cursor.set("A"), Ok("a"));
    /// assert_eq!(cursor.set("Z"), Err(ListError::IllegalState));
    ///
    /// assert_eq!(list.to_vec(), vec!["A", "b", "c"]);
    /// ```
    pub fn set(&mut self, element: T) -> Result<T> {
        let node = self.last_node().ok_or_else(|| {
            trace_event!(index = self.index, "set without a last returned element");
            ListError::IllegalState
        })?;
        self.last = None;
        // SAFETY: the last returned node is an element node of the list.
        Ok(std::mem::replace(unsafe { Node::element_mut(node) }, element))
    }

    /// Re-borrow the mutable cursor as a short-lived immutable one.
    pub fn as_cursor(&self) -> Cursor<'_, T> {
        let mut cursor = Cursor::new(self.list, self.current, self.index);
        cursor.last = self.last;
        cursor
    }

    /// Convert the mutable cursor to an immutable one.
    pub fn into_cursor(self) -> Cursor<'a, T> {
        let mut cursor = Cursor::new(self.list, self.current, self.index);
        cursor.last = self.last;
        cursor
    }

    /// Temporarily view the list via an immutable reference.
    ///
    /// This is useful where the list is not able to read while a
    /// mutable cursor is created and being used.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::List;
    ///
    /// let mut list = List::from([1, 2, 3]);
    /// let mut cursor = list.cursor_start_mut();
    ///
    /// // Temporarily view the list
    /// assert_eq!(cursor.view().last(), Ok(&3));
    ///
    /// cursor.add(4);
    /// assert_eq!(list.to_vec(), vec![4, 1, 2, 3]);
    /// ```
    pub fn view(&self) -> &List<T> {
        self.list
    }
}

// Methods that change the linking structure of the list.
impl<'a, T: 'a> CursorMut<'a, T> {
    /// Add an element at the cursor position, between the previous and the
    /// next element.
    ///
    /// After insertion the cursor stands right after the new element: its
    /// `next_index` grows by one, a following `next` is unaffected, a
    /// following `previous` returns the new element. The cursor forgets its
    /// last returned element.
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::List;
    ///
    /// let mut list = List::from([1, 2, 3]);
    /// let mut cursor = list.cursor_mut(1).unwrap();
    ///
    /// cursor.add(4); // becomes [1, 4, 2, 3]
    /// assert_eq!(cursor.next_index(), 2);
    /// assert_eq!(cursor.peek_next(), Some(&2));
    ///
    /// cursor.move_to_end();
    /// cursor.add(5); // becomes [1, 4, 2, 3, 5]
    /// assert_eq!(cursor.next_index(), 5);
    /// assert_eq!(cursor.peek_previous(), Some(&5));
    ///
    /// assert_eq!(list.to_vec(), vec![1, 4, 2, 3, 5]);
    /// ```
    pub fn add(&mut self, element: T) {
        let (prev, node) = (self.prev_node(), Node::new_detached(element));
        // SAFETY: `current.prev` and `current` are adjacent nodes of the list.
        unsafe { self.list.attach_node(prev, self.current, node) };
        self.index += 1;
        self.last = None;
    }

    /// Remove the element returned by the last step and return it.
    ///
    /// After a forward step the cursor keeps its next element and its
    /// `next_index` shrinks by one. After a backward step the cursor keeps its
    /// previous element and `next_index` is unchanged. The cursor forgets its
    /// last returned element.
    ///
    /// This operation should compute in *O*(*1*) time.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::IllegalState`] if the cursor has not stepped since
    /// it was created, moved or used to edit the list.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::{List, ListError};
    ///
    /// let mut list = List::from_iter(0..5);
    /// let mut cursor = list.cursor_mut(2).unwrap();
    ///
    /// assert_eq!(cursor.next(), Ok(&mut 2));
    /// assert_eq!(cursor.remove(), Ok(2)); // becomes [0, 1, 3, 4]
    /// assert_eq!(cursor.next_index(), 2);
    /// assert_eq!(cursor.remove(), Err(ListError::IllegalState));
    ///
    /// assert_eq!(cursor.previous(), Ok(&mut 1));
    /// assert_eq!(cursor.remove(), Ok(1)); // becomes [0, 3, 4]
    /// assert_eq!(cursor.next_index(), 1);
    /// assert_eq!(cursor.peek_next(), Some(&3));
    ///
    /// assert_eq!(list.to_vec(), vec![0, 3, 4]);
    /// ```
    pub fn remove(&mut self) -> Result<T> {
        let step = self.last.take().ok_or_else(|| {
            trace_event!(index = self.index, "remove without a last returned element");
            ListError::IllegalState
        })?;
        let node = match step {
            Step::Forward => {
                self.index -= 1;
                self.prev_node()
            }
            Step::Backward => {
                let node = self.current;
                // SAFETY: a backward step leaves `current` at an element node.
                self.current = unsafe { Node::next_of(node) };
                node
            }
        };
        // SAFETY: `node` is an element node of the list, and the cursor no
        // longer refers to it.
        let node = unsafe { self.list.detach_node(node) };
        Ok(Node::into_element(node))
    }
}

/// `CursorIter` provides an cursor-like iterator that are cyclic
/// and not fused: after the last element it yields `None` once and
/// starts over from the first element.
///
/// If you are looking for container-like iterators,
/// see [`Iter`](crate::Iter) for details.
///
/// # Examples
///
/// ```
/// use cursor_list::List;
///
/// let list = List::from([1, 2, 3]);
/// // Create a cursor iterator
/// let mut cursor_iter = list.cursor_start().into_iter();
/// assert_eq!(cursor_iter.next(), Some(&1));
/// assert_eq!(cursor_iter.next(), Some(&2));
/// assert_eq!(cursor_iter.next(), Some(&3));
/// assert_eq!(cursor_iter.next(), None);
/// assert_eq!(cursor_iter.next(), Some(&1)); // Not fused and cyclic
///
/// // Convert back to a cursor
/// let cursor = cursor_iter.into_cursor();
/// assert_eq!(cursor.peek_next(), Some(&2));
/// ```
pub struct CursorIter<'a, T: 'a> {
    pub(crate) cursor: Cursor<'a, T>,
}

/// `CursorBackIter` is largely the same as a [`CursorIter`],
/// except that the cursors are moving in an opposite direction.
///
/// # Examples
///
/// ```
/// use cursor_list::List;
///
/// let list = List::from([1, 2, 3]);
/// // Create a cursor back iterator
/// let mut cursor_iter = list.cursor_end().into_iter().rev();
/// assert_eq!(cursor_iter.next(), Some(&3));
/// assert_eq!(cursor_iter.next(), Some(&2));
/// assert_eq!(cursor_iter.next(), Some(&1));
/// assert_eq!(cursor_iter.next(), None);
/// assert_eq!(cursor_iter.next(), Some(&3)); // Not fused and cyclic
///
/// // Convert back to a cursor
/// let cursor = cursor_iter.into_cursor();
/// assert_eq!(cursor.peek_previous(), Some(&2));
/// ```
pub struct CursorBackIter<'a, T: 'a> {
    pub(crate) cursor: Cursor<'a, T>,
}

impl<'a, T: 'a> CursorIter<'a, T> {
    pub fn into_cursor(self) -> Cursor<'a, T> {
        self.cursor
    }
    pub fn rev(self) -> CursorBackIter<'a, T> {
        CursorBackIter {
            cursor: self.cursor,
        }
    }
    pub fn peek(&self) -> Option<&T> {
        self.cursor.peek_next()
    }
}

impl<'a, T: 'a> CursorBackIter<'a, T> {
    pub fn into_cursor(self) -> Cursor<'a, T> {
        self.cursor
    }
    pub fn rev(self) -> CursorIter<'a, T> {
        CursorIter {
            cursor: self.cursor,
        }
    }
    pub fn peek(&self) -> Option<&T> {
        self.cursor.peek_previous()
    }
}

impl<'a, T: 'a> From<CursorIter<'a, T>> for Cursor<'a, T> {
    fn from(cursor_iter: CursorIter<'a, T>) -> Self {
        cursor_iter.into_cursor()
    }
}

impl<'a, T: 'a> From<CursorMut<'a, T>> for Cursor<'a, T> {
    fn from(cursor: CursorMut<'a, T>) -> Self {
        cursor.into_cursor()
    }
}

unsafe impl<T: Sync> Send for Cursor<'_, T> {}

unsafe impl<T: Sync> Sync for Cursor<'_, T> {}

unsafe impl<T: Send> Send for CursorMut<'_, T> {}

unsafe impl<T: Sync> Sync for CursorMut<'_, T> {}

unsafe impl<T: Sync> Send for CursorIter<'_, T> {}

unsafe impl<T: Sync> Sync for CursorIter<'_, T> {}

unsafe impl<T: Sync> Send for CursorBackIter<'_, T> {}

unsafe impl<T: Sync> Sync for CursorBackIter<'_, T> {}


// proptest doesn't run under miri with default config
#[cfg(all(not(miri), test))]
mod proptests {
    use crate::error::{ListError, Result};
    use crate::List;
    use proptest::collection::vec;
    use proptest::prelude::*;

    #[derive(Clone, Debug)]
    enum Op {
        Next,
        Previous,
        Add(u8),
        Set(u8),
        Remove,
        Seek(usize),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => Just(Op::Next),
            3 => Just(Op::Previous),
            2 => any::<u8>().prop_map(Op::Add),
            1 => any::<u8>().prop_map(Op::Set),
            2 => Just(Op::Remove),
            1 => (0usize..12).prop_map(Op::Seek),
        ]
    }

    /// A `Vec` backed cursor: `last` is the index of the last returned element.
    struct Model {
        items: Vec<u8>,
        index: usize,
        last: Option<usize>,
    }

    impl Model {
        fn next(&mut self) -> Result<u8> {
            let element = *self.items.get(self.index).ok_or(ListError::NoSuchElement)?;
            self.last = Some(self.index);
            self.index += 1;
            Ok(element)
        }

        fn previous(&mut self) -> Result<u8> {
            self.index = self.index.checked_sub(1).ok_or(ListError::NoSuchElement)?;
            self.last = Some(self.index);
            Ok(self.items[self.index])
        }

        fn add(&mut self, element: u8) {
            self.items.insert(self.index, element);
            self.index += 1;
            self.last = None;
        }

        fn set(&mut self, element: u8) -> Result<u8> {
            let at = self.last.take().ok_or(ListError::IllegalState)?;
            Ok(std::mem::replace(&mut self.items[at], element))
        }

        fn remove(&mut self) -> Result<u8> {
            let at = self.last.take().ok_or(ListError::IllegalState)?;
            if at < self.index {
                self.index -= 1;
            }
            Ok(self.items.remove(at))
        }

        fn seek(&mut self, target: usize) -> Result<()> {
            let len = self.items.len();
            if target > len {
                return Err(ListError::IndexOutOfRange { index: target, len });
            }
            self.index = target;
            self.last = None;
            Ok(())
        }
    }

    proptest! {
        #[test]
        fn cursor_agrees_with_model(
            items in vec(any::<u8>(), 0..8),
            start in 0usize..10,
            ops in vec(op(), 0..64),
        ) {
            let mut list = List::from_iter(items.iter().copied());
            let mut model = Model { items, index: 0, last: None };
            let mut cursor = list.cursor_start_mut();
            prop_assert_eq!(cursor.seek_to(start), model.seek(start));

            for op in ops {
                match op {
                    Op::Next => {
                        prop_assert_eq!(cursor.next().map(|e| *e), model.next());
                    }
                    Op::Previous => {
                        prop_assert_eq!(cursor.previous().map(|e| *e), model.previous());
                    }
                    Op::Add(element) => {
                        cursor.add(element);
                        model.add(element);
                    }
                    Op::Set(element) => {
                        prop_assert_eq!(cursor.set(element), model.set(element));
                    }
                    Op::Remove => {
                        prop_assert_eq!(cursor.remove(), model.remove());
                    }
                    Op::Seek(target) => {
                        prop_assert_eq!(cursor.seek_to(target), model.seek(target));
                    }
                }
                prop_assert_eq!(cursor.len(), model.items.len());
                prop_assert_eq!(cursor.next_index(), model.index);
                prop_assert_eq!(cursor.previous_index(), model.index.checked_sub(1));
                prop_assert_eq!(cursor.has_next(), model.index < model.items.len());
                prop_assert_eq!(cursor.has_previous(), model.index > 0);
                prop_assert_eq!(
                    cursor.last_returned().copied(),
                    model.last.map(|at| model.items[at])
                );
            }
            prop_assert_eq!(list.to_vec(), model.items);
        }
    }
}
