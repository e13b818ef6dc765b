use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;
use std::mem::MaybeUninit;
use std::ptr::NonNull;

use crate::error::{ListError, Result};
use crate::list::cursor::{Cursor, CursorMut};
use crate::{IntoIter, Iter, IterMut};

pub mod cursor;
pub mod iterator;

mod algorithms;

/// The `List` is a doubly-linked list with owned nodes.
/// It allows inserting, removing elements at a cursor in constant time.
/// In compromise, accessing or mutating elements by index takes *O*(*n*) time.
///
/// The `List` contains:
/// - a pointer `ghost` to the ghost node, whose `next` is the head and whose
///   `prev` is the tail of the list;
/// - a length field `len` counting the element nodes.
///
/// Every indexed operation creates a cursor at the index and delegates to it,
/// so the cursors in [`cursor`] are the only code that relinks nodes.
///
/// # Naming Conventions
///
/// - an *element index* addresses an existing element and ranges over `0..len`;
/// - a *position* addresses a gap between elements and ranges over `0..=len`.
pub struct List<T> {
    ghost: NonNull<Node<T>>,
    /// the length of the list
    pub(crate) len: usize,
    _marker: PhantomData<Box<Node<T>>>,
}

/// A node of the list.
///
/// `next` owns the successor: a node is only ever freed by unlinking it from
/// its predecessor. `prev` is a back-reference used for traversal.
#[repr(C)]
pub(crate) struct Node<T> {
    pub(crate) next: NonNull<Node<T>>,
    pub(crate) prev: NonNull<Node<T>>,
    pub(crate) element: T,
}

/// The ghost node is allocated with this layout so that its element slot may
/// stay uninitialized.
type GhostNode<T> = Node<MaybeUninit<T>>;

// private methods
impl<T> List<T> {
    pub(crate) fn ghost_node(&self) -> NonNull<Node<T>> {
        self.ghost
    }
    pub(crate) fn front_node(&self) -> NonNull<Node<T>> {
        // SAFETY: `ghost.next` is always valid (either `ghost` itself, or the first
        // element in the list).
        unsafe { Node::next_of(self.ghost) }
    }
    pub(crate) fn back_node(&self) -> NonNull<Node<T>> {
        // SAFETY: `ghost.prev` is always valid (either `ghost` itself, or the last
        // element in the list).
        unsafe { Node::prev_of(self.ghost) }
    }

    /// Detach a single node `node` from the list, and return it as a box.
    ///
    /// It is unsafe because it does not check whether `node` belongs to the list,
    /// or whether it is the ghost node.
    ///
    /// If the `node` does not belong to the list, this function call will make
    /// the list ill-formed.
    pub(crate) unsafe fn detach_node(&mut self, node: NonNull<Node<T>>) -> Box<Node<T>> {
        debug_assert!(node != self.ghost, "Cannot detach the ghost node");
        let node = Box::from_raw(node.as_ptr());
        connect(node.prev, node.next);
        self.len -= 1;
        trace_event!(len = self.len, "detached node");
        node
    }

    /// Attach a single node `node` to the list, between `prev` and `next`.
    ///
    /// It is unsafe because it does not check whether `prev` and `next` belongs
    /// to the list, or whether the `prev` and `next` is adjacent (only in
    /// `#[cfg(debug_assertions)]`).
    ///
    /// If the `prev` and `next` does not belong to the list, or they are not
    /// adjacent nodes, this function call will make the list ill-formed.
    pub(crate) unsafe fn attach_node(
        &mut self,
        prev: NonNull<Node<T>>,
        next: NonNull<Node<T>>,
        node: NonNull<Node<T>>,
    ) {
        #[cfg(debug_assertions)]
        assert_adjacent(prev, next);
        connect(prev, node);
        connect(node, next);
        self.len += 1;
        trace_event!(len = self.len, "attached node");
        #[cfg(debug_assertions)]
        {
            assert_adjacent(prev, node);
            assert_adjacent(node, next);
        }
    }

    /// Check that `index` addresses an existing element.
    pub(crate) fn check_element_index(&self, index: usize) -> Result<()> {
        if index >= self.len {
            return Err(ListError::out_of_range(index, self.len));
        }
        Ok(())
    }
}

impl<T> List<T> {
    /// Create an empty `List`
    ///
    /// # Examples
    /// ```
    /// use cursor_list::List;
    /// let list: List<u32> = List::new();
    /// assert!(list.is_empty());
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self {
            ghost: new_ghost(),
            len: 0,
            _marker: PhantomData,
        }
    }

    /// Returns `true` if the `List` is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::List;
    ///
    /// let mut list = List::new();
    /// assert!(list.is_empty());
    ///
    /// list.push_front("foo");
    /// assert!(!list.is_empty());
    /// ```
    #[inline]
    pub fn is_empty(&self) -> bool {
        debug_assert_eq!(self.len == 0, self.front_node() == self.ghost);
        debug_assert_eq!(self.len == 0, self.back_node() == self.ghost);
        self.len == 0
    }

    /// Returns the length of the `List`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_front(2);
    /// assert_eq!(list.len(), 1);
    ///
    /// list.push_front(1);
    /// assert_eq!(list.len(), 2);
    ///
    /// list.push_back(3);
    /// assert_eq!(list.len(), 3);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Removes all elements from the `List`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time, since every node is
    /// freed.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::List;
    ///
    /// let mut list = List::from([1, 2]);
    /// list.clear();
    /// assert_eq!(list.len(), 0);
    /// assert!(list.first().is_err());
    /// ```
    #[inline]
    pub fn clear(&mut self) {
        while self.pop_front().is_some() {}
    }

    /// Provides a reference to the first element, or [`ListError::EmptyList`]
    /// if the list is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::{List, ListError};
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.first(), Err(ListError::EmptyList));
    ///
    /// list.push_front(1);
    /// assert_eq!(list.first(), Ok(&1));
    /// ```
    pub fn first(&self) -> Result<&T> {
        self.cursor_start().next().map_err(|_| ListError::EmptyList)
    }

    /// Provides a mutable reference to the first element, or
    /// [`ListError::EmptyList`] if the list is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::List;
    ///
    /// let mut list = List::from([1, 2]);
    /// *list.first_mut().unwrap() = 5;
    /// assert_eq!(list.first(), Ok(&5));
    /// ```
    pub fn first_mut(&mut self) -> Result<&mut T> {
        self.cursor_start_mut()
            .into_next()
            .map_err(|_| ListError::EmptyList)
    }

    /// Provides a reference to the last element, or [`ListError::EmptyList`]
    /// if the list is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::{List, ListError};
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.last(), Err(ListError::EmptyList));
    ///
    /// list.push_back(1);
    /// list.push_back(2);
    /// assert_eq!(list.last(), Ok(&2));
    /// ```
    pub fn last(&self) -> Result<&T> {
        self.cursor_end()
            .previous()
            .map_err(|_| ListError::EmptyList)
    }

    /// Provides a mutable reference to the last element, or
    /// [`ListError::EmptyList`] if the list is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::List;
    ///
    /// let mut list = List::from([1, 2]);
    /// *list.last_mut().unwrap() *= 10;
    /// assert_eq!(list.last(), Ok(&20));
    /// ```
    pub fn last_mut(&mut self) -> Result<&mut T> {
        self.cursor_end_mut()
            .into_previous()
            .map_err(|_| ListError::EmptyList)
    }

    /// Provides a reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::IndexOutOfRange`] if `index >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::List;
    ///
    /// let list = List::from(['a', 'b', 'c']);
    /// assert_eq!(list.get(1), Ok(&'b'));
    /// assert!(list.get(3).is_err());
    /// ```
    pub fn get(&self, index: usize) -> Result<&T> {
        self.check_element_index(index)?;
        self.cursor(index)?.next()
    }

    /// Provides a mutable reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::IndexOutOfRange`] if `index >= len`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        self.check_element_index(index)?;
        self.cursor_mut(index)?.into_next()
    }

    /// Replaces the element at `index` and returns the old one.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::IndexOutOfRange`] if `index >= len`; the list is
    /// left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::List;
    ///
    /// let mut list = List::from([1, 2, 3]);
    /// assert_eq!(list.set(1, 20), Ok(2));
    /// assert_eq!(list.get(1), Ok(&20));
    /// assert!(list.set(3, 0).is_err());
    /// ```
    pub fn set(&mut self, index: usize, element: T) -> Result<T> {
        self.check_element_index(index)?;
        let mut cursor = self.cursor_mut(index)?;
        cursor.next()?;
        cursor.set(element)
    }

    /// Adds an element first in the list.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_front(2);
    /// assert_eq!(list.first(), Ok(&2));
    ///
    /// list.push_front(1);
    /// assert_eq!(list.first(), Ok(&1));
    /// ```
    pub fn push_front(&mut self, element: T) {
        self.cursor_start_mut().add(element);
    }

    /// Appends an element to the back of a list, after the current last
    /// element.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::List;
    ///
    /// let mut list = List::from([1, 2]);
    /// list.push_back(3);
    /// assert_eq!(list.last(), Ok(&3));
    /// assert_eq!(list.to_vec(), vec![1, 2, 3]);
    /// ```
    pub fn push_back(&mut self, element: T) {
        self.cursor_end_mut().add(element);
    }

    /// Appends an element to the list. The same as [`List::push_back`].
    #[inline]
    pub fn push(&mut self, element: T) {
        self.push_back(element)
    }

    /// Removes the first element and returns it, or `None` if the list is
    /// empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::List;
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.pop_front(), None);
    ///
    /// list.push_front(1);
    /// list.push_front(3);
    /// assert_eq!(list.pop_front(), Some(3));
    /// assert_eq!(list.pop_front(), Some(1));
    /// assert_eq!(list.pop_front(), None);
    /// ```
    pub fn pop_front(&mut self) -> Option<T> {
        let mut cursor = self.cursor_start_mut();
        cursor.next().ok()?;
        cursor.remove().ok()
    }

    /// Removes the last element from a list and returns it, or `None` if
    /// it is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::List;
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.pop_back(), None);
    /// list.push_back(1);
    /// list.push_back(3);
    /// assert_eq!(list.pop_back(), Some(3));
    /// ```
    pub fn pop_back(&mut self) -> Option<T> {
        let mut cursor = self.cursor_end_mut();
        cursor.previous().ok()?;
        cursor.remove().ok()
    }

    /// Adds an element at the given position, before the element currently at
    /// `index`. `index == len` appends.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::IndexOutOfRange`] if `index > len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::List;
    ///
    /// let mut list = List::from([1, 2, 3]);
    ///
    /// list.insert(2, 4).unwrap();
    /// list.insert(4, 5).unwrap();
    /// assert!(list.insert(6, 6).is_err());
    ///
    /// assert_eq!(list.to_vec(), vec![1, 2, 4, 3, 5]);
    /// ```
    pub fn insert(&mut self, index: usize, element: T) -> Result<()> {
        self.cursor_mut(index)?.add(element);
        Ok(())
    }

    /// Removes the element at the given index and returns it.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::IndexOutOfRange`] if `index >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::List;
    ///
    /// let mut list = List::from([3, 2, 1]);
    ///
    /// assert_eq!(list.remove(1), Ok(2));
    /// assert_eq!(list.remove(0), Ok(3));
    /// assert_eq!(list.remove(0), Ok(1));
    /// assert!(list.remove(0).is_err());
    /// ```
    pub fn remove(&mut self, index: usize) -> Result<T> {
        self.check_element_index(index)?;
        let mut cursor = self.cursor_mut(index)?;
        cursor.next()?;
        cursor.remove()
    }

    /// Provides a cursor at the given position.
    ///
    /// By convention, the cursor is at the end of the list (no next element)
    /// if `at == len`.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::IndexOutOfRange`] if `at > len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::List;
    ///
    /// let list = List::from([1, 2, 3]);
    /// assert_eq!(list.cursor(1).unwrap().next(), Ok(&2));
    /// assert!(!list.cursor(3).unwrap().has_next());
    /// assert!(list.cursor(4).is_err());
    /// ```
    pub fn cursor(&self, at: usize) -> Result<Cursor<'_, T>> {
        let mut cursor = self.cursor_start();
        cursor.seek_to(at)?;
        Ok(cursor)
    }

    /// Provides a cursor before the first element.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::List;
    ///
    /// let list = List::from([1, 2, 3]);
    /// let mut cursor = list.cursor_start();
    /// assert_eq!(cursor.next_index(), 0);
    /// assert_eq!(cursor.next(), Ok(&1));
    /// ```
    pub fn cursor_start(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.front_node(), 0)
    }

    /// Provides a cursor after the last element.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::List;
    ///
    /// let list = List::from([1, 2, 3]);
    /// let mut cursor = list.cursor_end();
    /// assert!(!cursor.has_next());
    /// assert_eq!(cursor.previous(), Ok(&3));
    /// ```
    pub fn cursor_end(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.ghost_node(), self.len)
    }

    /// Provides a cursor with editing operations at the given position.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::IndexOutOfRange`] if `at > len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::List;
    ///
    /// let mut list = List::from([1, 2, 3]);
    /// let mut cursor = list.cursor_mut(1).unwrap();
    ///
    /// *cursor.next().unwrap() *= 5;
    /// assert_eq!(list.to_vec(), vec![1, 10, 3]);
    /// ```
    pub fn cursor_mut(&mut self, at: usize) -> Result<CursorMut<'_, T>> {
        let mut cursor = self.cursor_start_mut();
        cursor.seek_to(at)?;
        Ok(cursor)
    }

    /// Provides a cursor with editing operations before the first element.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::List;
    ///
    /// let mut list = List::from([1, 2, 3]);
    /// let mut cursor = list.cursor_start_mut();
    /// cursor.add(0);
    /// assert_eq!(list.to_vec(), vec![0, 1, 2, 3]);
    /// ```
    pub fn cursor_start_mut(&mut self) -> CursorMut<'_, T> {
        let front = self.front_node();
        CursorMut::new(self, front, 0)
    }

    /// Provides a cursor with editing operations after the last element.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::List;
    ///
    /// let mut list = List::from([1, 2, 3]);
    /// let mut cursor = list.cursor_end_mut();
    ///
    /// *cursor.previous().unwrap() *= 5;
    /// assert_eq!(list.last(), Ok(&15));
    /// ```
    pub fn cursor_end_mut(&mut self) -> CursorMut<'_, T> {
        let (ghost, len) = (self.ghost_node(), self.len);
        CursorMut::new(self, ghost, len)
    }

    /// Provides a forward iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_back(0);
    /// list.push_back(1);
    /// list.push_back(2);
    ///
    /// let mut iter = list.iter();
    /// assert_eq!(iter.next(), Some(&0));
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next(), Some(&2));
    /// assert_eq!(iter.next(), None);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Provides a forward iterator with mutable references.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::List;
    ///
    /// let mut list = List::from([0, 1, 2]);
    ///
    /// for element in list.iter_mut() {
    ///     *element += 10;
    /// }
    ///
    /// let mut iter = list.iter();
    /// assert_eq!(iter.next(), Some(&10));
    /// assert_eq!(iter.next(), Some(&11));
    /// assert_eq!(iter.next(), Some(&12));
    /// assert_eq!(iter.next(), None);
    /// ```
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self)
    }
}

impl<T: Debug> Debug for List<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Node<T> {
    /// Create a detached node with given element. Its links are dangling
    /// until it is attached.
    pub(crate) fn new_detached(element: T) -> NonNull<Node<T>> {
        let node = Box::new(Node {
            next: NonNull::dangling(),
            prev: NonNull::dangling(),
            element,
        });
        NonNull::from(Box::leak(node))
    }

    pub(crate) fn into_element(self: Box<Self>) -> T {
        self.element
    }

    /// It is unsafe because `node` must be a live node (possibly the ghost)
    /// of a list.
    pub(crate) unsafe fn next_of(node: NonNull<Self>) -> NonNull<Self> {
        (*node.as_ptr()).next
    }

    /// It is unsafe because `node` must be a live node (possibly the ghost)
    /// of a list.
    pub(crate) unsafe fn prev_of(node: NonNull<Self>) -> NonNull<Self> {
        (*node.as_ptr()).prev
    }

    /// It is unsafe because `node` must be a live element node, never the
    /// ghost node, and the caller chooses the lifetime.
    pub(crate) unsafe fn element<'a>(node: NonNull<Self>) -> &'a T {
        &(*node.as_ptr()).element
    }

    /// Same as [`Node::element`], but the caller must also guarantee the
    /// element is not aliased for `'a`.
    pub(crate) unsafe fn element_mut<'a>(node: NonNull<Self>) -> &'a mut T {
        &mut (*node.as_ptr()).element
    }
}

/// Link `prev` and `next` as neighbours.
///
/// It is unsafe because both must be live nodes (possibly the ghost).
pub(crate) unsafe fn connect<T>(prev: NonNull<Node<T>>, next: NonNull<Node<T>>) {
    (*prev.as_ptr()).next = next;
    (*next.as_ptr()).prev = prev;
}

fn new_ghost<T>() -> NonNull<Node<T>> {
    let ghost: Box<GhostNode<T>> = Box::new(Node {
        next: NonNull::dangling(),
        prev: NonNull::dangling(),
        element: MaybeUninit::uninit(),
    });
    // `Node` is `#[repr(C)]` and `MaybeUninit<T>` has the layout of `T`, so the
    // ghost can be addressed as a `Node<T>` as long as its element is never read.
    let ghost = NonNull::from(Box::leak(ghost)).cast::<Node<T>>();
    // SAFETY: the ghost is a live allocation and only its links are written.
    unsafe { connect(ghost, ghost) };
    ghost
}

#[cfg(debug_assertions)]
fn assert_adjacent<T>(prev: NonNull<Node<T>>, next: NonNull<Node<T>>) {
    unsafe {
        assert_eq!(Node::next_of(prev), next);
        assert_eq!(Node::prev_of(next), prev);
    }
}

impl<T> Drop for List<T> {
    fn drop(&mut self) {
        self.clear();
        // SAFETY: the ghost was allocated as a `GhostNode<T>` in `new_ghost` and
        // no element node refers to it any more.
        unsafe { drop(Box::from_raw(self.ghost.cast::<GhostNode<T>>().as_ptr())) };
    }
}

unsafe impl<T: Send> Send for List<T> {}

unsafe impl<T: Sync> Sync for List<T> {}

// Ensure that `List` and its read-only iterators are covariant in their type parameters.
#[allow(dead_code)]
fn assert_covariance() {
    fn a<'a>(x: List<&'static str>) -> List<&'a str> {
        x
    }
    fn b<'i, 'a>(x: Iter<'i, &'static str>) -> Iter<'i, &'a str> {
        x
    }
    fn c<'a>(x: IntoIter<&'static str>) -> IntoIter<&'a str> {
        x
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ListError;
    use crate::list::List;
    use std::cell::RefCell;

    /// Walk the links in both directions and check them against `len`.
    fn assert_well_formed<T>(list: &List<T>) {
        use crate::list::Node;
        let ghost = list.ghost_node();
        let (mut forward, mut node) = (0, list.front_node());
        while node != ghost {
            unsafe {
                assert_eq!(Node::prev_of(Node::next_of(node)), node);
                node = Node::next_of(node);
            }
            forward += 1;
        }
        let (mut backward, mut node) = (0, list.back_node());
        while node != ghost {
            unsafe { node = Node::prev_of(node) };
            backward += 1;
        }
        assert_eq!(forward, list.len());
        assert_eq!(backward, list.len());
        assert_eq!(list.is_empty(), list.front_node() == ghost);
        assert_eq!(list.is_empty(), list.back_node() == ghost);
        if list.len() == 1 {
            assert_eq!(list.front_node(), list.back_node());
        }
    }

    #[test]
    fn list_create() {
        let mut list = List::<i32>::new();
        assert!(list.is_empty());
        list.push_back(1);
        assert!(!list.is_empty());
        assert_eq!(list.pop_back(), Some(1));
        assert!(list.is_empty());
        assert_well_formed(&list);
    }

    #[test]
    fn list_drop() {
        #[derive(Debug)]
        struct DropChecker<'a, T: Copy> {
            value: T,
            dropped: &'a RefCell<Vec<T>>,
        }
        impl<'a, T: Copy> DropChecker<'a, T> {
            fn new(value: T, dropped: &'a RefCell<Vec<T>>) -> Self {
                Self { value, dropped }
            }
        }
        impl<'a, T: Copy> Drop for DropChecker<'a, T> {
            fn drop(&mut self) {
                self.dropped.borrow_mut().push(self.value);
            }
        }
        let dropped = RefCell::new(Vec::<i32>::new());
        let mut list = List::new();
        list.push_back(DropChecker::new(1, &dropped));
        list.push_back(DropChecker::new(2, &dropped));
        list.push_back(DropChecker::new(3, &dropped));
        list.push_back(DropChecker::new(4, &dropped));
        drop(list.remove(1));
        assert_eq!(dropped.borrow().as_slice(), &[2]);
        list.clear();
        assert_eq!(dropped.borrow().as_slice(), &[2, 1, 3, 4]);
        list.push_back(DropChecker::new(5, &dropped));
        drop(list);
        assert_eq!(dropped.borrow().as_slice(), &[2, 1, 3, 4, 5]);
    }

    #[test]
    fn list_push_and_pop() {
        let mut list = List::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);

        assert_eq!(list.first(), Err(ListError::EmptyList));
        assert_eq!(list.last(), Err(ListError::EmptyList));
        assert_eq!(list.pop_front(), None);
        assert_eq!(list.pop_back(), None);

        list.push_back(1);
        assert_eq!(list.last(), Ok(&1));
        assert_eq!(list.pop_front(), Some(1));
        assert_eq!(list.pop_back(), None);
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);

        list.push_front(1);
        list.push_front(2);
        list.push_back(3);
        assert_well_formed(&list);
        assert_eq!(list.last(), Ok(&3));
        assert_eq!(list.first(), Ok(&2));
        assert_eq!(list.pop_front(), Some(2));
        assert_eq!(list.pop_back(), Some(3));

        assert_eq!(list.first(), Ok(&1));
        assert_eq!(list.last(), Ok(&1));
        assert_eq!(list.pop_front(), Some(1));
        assert_eq!(list.first(), Err(ListError::EmptyList));
        assert_eq!(list.last(), Err(ListError::EmptyList));
        assert!(list.is_empty());
        assert_well_formed(&list);
    }

    #[test]
    fn list_append_is_true_append() {
        let mut list = List::from([1, 2, 3]);
        list.push_back(4);
        assert_eq!(list.to_vec(), vec![1, 2, 3, 4]);
        assert_eq!(list.last(), Ok(&4));

        let mut list = List::new();
        list.push_back('a');
        list.push('b');
        assert_eq!(list.to_vec(), vec!['a', 'b']);
    }

    #[test]
    fn list_insert_and_remove() {
        let mut list = List::from_iter(0..10);
        list.insert(5, 10).unwrap();
        assert_eq!(
            list.to_vec(),
            Vec::from_iter((0..5).chain(Some(10)).chain(5..10))
        );

        assert_eq!(list.remove(10), Ok(9));
        assert_eq!(list.last(), Ok(&8));
        assert_eq!(
            list.to_vec(),
            Vec::from_iter((0..5).chain(Some(10)).chain(5..9))
        );

        list.insert(0, 11).unwrap();
        assert_eq!(list.first(), Ok(&11));
        assert_eq!(list.remove(0), Ok(11));
        assert_eq!(list.first(), Ok(&0));

        list.insert(10, 12).unwrap();
        assert_eq!(list.last(), Ok(&12));
        assert_well_formed(&list);

        assert_eq!(
            list.insert(12, 0),
            Err(ListError::IndexOutOfRange { index: 12, len: 11 })
        );
        assert_eq!(
            list.remove(11),
            Err(ListError::IndexOutOfRange { index: 11, len: 11 })
        );
        assert_eq!(list.len(), 11);
    }

    #[test]
    fn list_insert_then_remove_is_identity() {
        let original = Vec::from_iter(0..6);
        for at in 0..=original.len() {
            let mut list = List::from_iter(original.iter().copied());
            list.insert(at, 100).unwrap();
            assert_eq!(list.get(at), Ok(&100));
            assert_eq!(list.index_of(&100), Some(at));
            assert_eq!(list.last_index_of(&100), Some(at));
            assert_eq!(list.remove(at), Ok(100));
            assert_eq!(list.to_vec(), original);
            assert_well_formed(&list);
        }
    }

    #[test]
    fn list_get_and_set() {
        let mut list = List::from(["a", "b", "c"]);
        for i in 0..3 {
            assert_eq!(list.set(i, "z"), Ok(["a", "b", "c"][i]));
            assert_eq!(list.get(i), Ok(&"z"));
        }
        assert_eq!(
            list.get(3),
            Err(ListError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(
            list.set(3, "y"),
            Err(ListError::IndexOutOfRange { index: 3, len: 3 })
        );
        *list.get_mut(2).unwrap() = "c";
        *list.first_mut().unwrap() = "a";
        *list.last_mut().unwrap() = "C";
        assert_eq!(list.to_vec(), vec!["a", "z", "C"]);
        assert!(List::<u8>::new().get_mut(0).is_err());
        assert_eq!(List::<u8>::new().first_mut(), Err(ListError::EmptyList));
        assert_eq!(List::<u8>::new().last_mut(), Err(ListError::EmptyList));
    }

    #[test]
    fn list_remove_until_empty() {
        let mut list = List::from_iter(0..5);
        for expected in 0..5 {
            assert_eq!(list.remove(0), Ok(expected));
            assert_well_formed(&list);
        }
        assert!(list.is_empty());
        assert_eq!(
            list.get(0),
            Err(ListError::IndexOutOfRange { index: 0, len: 0 })
        );
    }

    #[test]
    fn list_scenario() {
        let mut list = List::new();
        list.push("a");
        list.push("b");
        list.insert(1, "x").unwrap();
        assert_eq!(list.to_string(), "[a, x, b]");
        assert!(list.remove_item(&"x"));
        assert_eq!(list.to_string(), "[a, b]");
        assert_eq!(list.get(0), Ok(&"a"));
        assert_eq!(list.index_of(&"b"), Some(1));
        assert_eq!(list.last_index_of(&"z"), None);
    }

    #[test]
    fn list_len() {
        let mut list = List::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);

        list.push_back(1);
        assert_eq!(list.len(), 1);

        list.pop_front();
        assert_eq!(list.len(), 0);

        list.extend(0..5);
        assert_eq!(list.len(), 5);

        list.remove(3).unwrap();
        assert_eq!(list.len(), 4);

        list.insert(3, 7).unwrap();
        assert_eq!(list.len(), 5);

        assert!(list.remove_item(&7));
        assert!(!list.remove_item(&7));
        assert_eq!(list.len(), 4);

        list.clear();
        assert_eq!(list.len(), 0);
        assert_well_formed(&list);
    }
}

// proptest doesn't run under miri with default config
#[cfg(all(not(miri), test))]
mod proptests {
    use std::collections::VecDeque;

    use proptest::prelude::*;
    use proptest::test_runner::Config;
    use proptest_state_machine::{ReferenceStateMachine, StateMachineTest};

    use super::*;

    proptest_state_machine::prop_state_machine! {
        #![proptest_config(Config {
            // No regression file is captured.
            failure_persistence: None,
            .. Config::default()
        })]

        #[test]
        fn list_state_machine_test(
            sequential
            1..200
            =>
            List<u32>
        );
    }

    /// The possible transitions of the state machine. Out of range indices
    /// are generated on purpose and must leave both sides unchanged.
    #[derive(Clone, Debug)]
    pub enum Transition {
        PushFront(u32),
        PushBack(u32),
        PopFront,
        PopBack,
        Insert(usize, u32),
        Remove(usize),
        Set(usize, u32),
        RemoveItem(u32),
    }

    pub struct ListStateMachine;

    // Small values, so that `RemoveItem` finds a match now and then.
    fn value() -> impl Strategy<Value = u32> {
        0u32..16
    }

    impl ReferenceStateMachine for ListStateMachine {
        type State = VecDeque<u32>;
        type Transition = Transition;

        fn init_state() -> BoxedStrategy<Self::State> {
            Just(VecDeque::new()).boxed()
        }

        fn transitions(state: &Self::State) -> BoxedStrategy<Self::Transition> {
            let len = state.len();
            prop_oneof![
                2 => value().prop_map(Transition::PushFront),
                2 => value().prop_map(Transition::PushBack),
                1 => Just(Transition::PopFront),
                1 => Just(Transition::PopBack),
                2 => (0..=len + 1, value()).prop_map(|(i, v)| Transition::Insert(i, v)),
                2 => (0..=len).prop_map(Transition::Remove),
                1 => (0..=len, value()).prop_map(|(i, v)| Transition::Set(i, v)),
                1 => value().prop_map(Transition::RemoveItem),
            ]
            .boxed()
        }

        fn apply(mut state: Self::State, transition: &Self::Transition) -> Self::State {
            match *transition {
                Transition::PushFront(value) => state.push_front(value),
                Transition::PushBack(value) => state.push_back(value),
                Transition::PopFront => {
                    state.pop_front();
                }
                Transition::PopBack => {
                    state.pop_back();
                }
                Transition::Insert(index, value) => {
                    if index <= state.len() {
                        state.insert(index, value);
                    }
                }
                Transition::Remove(index) => {
                    state.remove(index);
                }
                Transition::Set(index, value) => {
                    if let Some(element) = state.get_mut(index) {
                        *element = value;
                    }
                }
                Transition::RemoveItem(value) => {
                    if let Some(index) = state.iter().position(|&e| e == value) {
                        state.remove(index);
                    }
                }
            }
            state
        }
    }

    impl StateMachineTest for List<u32> {
        type SystemUnderTest = Self;
        type Reference = ListStateMachine;

        fn init_test(
            _ref_state: &<Self::Reference as ReferenceStateMachine>::State,
        ) -> Self::SystemUnderTest {
            Self::new()
        }

        fn apply(
            mut state: Self::SystemUnderTest,
            _ref_state: &<Self::Reference as ReferenceStateMachine>::State,
            transition: Transition,
        ) -> Self::SystemUnderTest {
            let len = state.len();
            match transition {
                Transition::PushFront(value) => state.push_front(value),
                Transition::PushBack(value) => state.push_back(value),
                Transition::PopFront => assert_eq!(state.pop_front().is_some(), len > 0),
                Transition::PopBack => assert_eq!(state.pop_back().is_some(), len > 0),
                Transition::Insert(index, value) => {
                    assert_eq!(state.insert(index, value).is_ok(), index <= len)
                }
                Transition::Remove(index) => assert_eq!(state.remove(index).is_ok(), index < len),
                Transition::Set(index, value) => {
                    assert_eq!(state.set(index, value).is_ok(), index < len)
                }
                Transition::RemoveItem(value) => {
                    let found = state.contains(&value);
                    assert_eq!(state.remove_item(&value), found);
                }
            }
            state
        }

        fn check_invariants(
            state: &Self::SystemUnderTest,
            ref_state: &<Self::Reference as ReferenceStateMachine>::State,
        ) {
            assert_eq!(state.len(), ref_state.len());
            assert!(state.iter().eq(ref_state.iter()));
            assert!(state.iter().rev().eq(ref_state.iter().rev()));
            assert_eq!(state.first().ok(), ref_state.front());
            assert_eq!(state.last().ok(), ref_state.back());
            if let Some(value) = ref_state.back() {
                assert_eq!(
                    state.last_index_of(value),
                    ref_state.iter().rposition(|e| e == value)
                );
            }
        }
    }
}
