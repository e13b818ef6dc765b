use crate::list::cursor::{Cursor, CursorBackIter, CursorIter};
use crate::list::{List, Node};
use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ptr::NonNull;

/// A borrowing iterator over the elements of a `List`, from front to back.
///
/// The remaining elements are the nodes from `front` (inclusive) up to
/// `back` (exclusive). Both ends can be consumed, and the two meet without
/// ever yielding a node twice.
///
/// The list stays borrowed for `'a`, so it cannot be restructured while the
/// iterator is alive:
///
/// ```compile_fail
/// use cursor_list::List;
///
/// let mut list = List::from([1, 2, 3]);
/// let mut iter = list.iter();
/// list.push_back(4);
/// println!("{:?}", iter.next());
/// ```
pub struct Iter<'a, T: 'a> {
    front: NonNull<Node<T>>,
    back: NonNull<Node<T>>,
    remaining: usize,
    _marker: PhantomData<&'a List<T>>,
}

impl<'a, T: 'a> Iter<'a, T> {
    pub(crate) fn new(list: &'a List<T>) -> Self {
        Self {
            front: list.front_node(),
            back: list.ghost_node(),
            remaining: list.len(),
            _marker: PhantomData,
        }
    }
}

impl<'a, T: 'a> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

/// Print the elements of the nodes `front..back` as a tuple named `name`.
fn fmt_remaining<T: fmt::Debug>(
    name: &str,
    mut front: NonNull<Node<T>>,
    back: NonNull<Node<T>>,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    let mut tuple = f.debug_tuple(name);
    while front != back {
        // SAFETY: every node before `back` is an element node of the list.
        unsafe {
            tuple.field(Node::<T>::element(front));
            front = Node::next_of(front);
        }
    }
    tuple.finish()
}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for Iter<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_remaining("Iter", self.front, self.back, f)
    }
}

impl<'a, T: 'a> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.front;
        // SAFETY: `remaining > 0`, so `front` is an element node.
        unsafe {
            self.front = Node::next_of(node);
            self.remaining -= 1;
            Some(Node::element(node))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }

    fn last(mut self) -> Option<Self::Item> {
        self.next_back()
    }
}

impl<'a, T: 'a> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        // SAFETY: `remaining > 0`, so the node before `back` is an element node.
        unsafe {
            self.back = Node::prev_of(self.back);
            self.remaining -= 1;
            Some(Node::element(self.back))
        }
    }
}

impl<'a, T: 'a> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T: 'a> FusedIterator for Iter<'a, T> {}

/// A borrowing iterator over the elements of a `List` that hands out
/// mutable references.
///
/// Elements can be changed in place, but no node can be linked or unlinked
/// while it is alive; for that, use a [`CursorMut`](crate::CursorMut).
///
/// ```compile_fail
/// use cursor_list::List;
///
/// let mut list = List::from([1, 2, 3]);
/// let mut iter = list.iter_mut();
/// println!("{:?}", list.last());
/// println!("{:?}", iter.next());
/// ```
pub struct IterMut<'a, T: 'a> {
    front: NonNull<Node<T>>,
    back: NonNull<Node<T>>,
    remaining: usize,
    _marker: PhantomData<&'a mut List<T>>,
}

impl<'a, T: 'a> IterMut<'a, T> {
    pub(crate) fn new(list: &'a mut List<T>) -> Self {
        Self {
            front: list.front_node(),
            back: list.ghost_node(),
            remaining: list.len(),
            _marker: PhantomData,
        }
    }
}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for IterMut<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_remaining("IterMut", self.front, self.back, f)
    }
}

impl<'a, T: 'a> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.front;
        // SAFETY: `remaining > 0`, so `front` is an element node, and it
        // leaves the remaining range before its reference is handed out.
        unsafe {
            self.front = Node::next_of(node);
            self.remaining -= 1;
            Some(Node::element_mut(node))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }

    fn last(mut self) -> Option<Self::Item> {
        self.next_back()
    }
}

impl<'a, T: 'a> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        // SAFETY: see `next`.
        unsafe {
            self.back = Node::prev_of(self.back);
            self.remaining -= 1;
            Some(Node::element_mut(self.back))
        }
    }
}

impl<'a, T: 'a> ExactSizeIterator for IterMut<'a, T> {}

impl<'a, T: 'a> FusedIterator for IterMut<'a, T> {}

/// An iterator that moves the elements out of a `List`, popping from
/// whichever end is asked for.
///
/// Elements that are not consumed are dropped with the iterator.
pub struct IntoIter<T> {
    list: List<T>,
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter")
            .field("list", &self.list)
            .finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len, Some(self.list.len))
    }

    fn last(mut self) -> Option<T> {
        self.list.pop_back()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.list.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter { list: self }
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut List<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}

/// Builds a list by appending every element in order.
impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = List::new();
        list.extend(iter);
        list
    }
}

/// Appends every element at the back, through one cursor parked at the end.
impl<T> Extend<T> for List<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let mut cursor = self.cursor_end_mut();
        iter.into_iter().for_each(|element| cursor.add(element));
    }
}

impl<'a, T: 'a + Copy> Extend<&'a T> for List<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied())
    }
}

impl<'a, T: 'a> Iterator for CursorIter<'a, T> {
    type Item = &'a T;

    /// Step forward, or rewind to the start and return `None` at the end.
    fn next(&mut self) -> Option<Self::Item> {
        match self.cursor.next() {
            Ok(element) => Some(element),
            Err(_) => {
                self.cursor.move_to_start();
                None
            }
        }
    }
}

impl<'a, T: 'a> Iterator for CursorBackIter<'a, T> {
    type Item = &'a T;

    /// Step backward, or rewind to the end and return `None` at the start.
    fn next(&mut self) -> Option<Self::Item> {
        match self.cursor.previous() {
            Ok(element) => Some(element),
            Err(_) => {
                self.cursor.move_to_end();
                None
            }
        }
    }
}

/// Turns the cursor into a [`CursorIter`] that continues from its position.
impl<'a, T: 'a> IntoIterator for Cursor<'a, T> {
    type Item = &'a T;
    type IntoIter = CursorIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        CursorIter { cursor: self }
    }
}

unsafe impl<T: Sync> Send for Iter<'_, T> {}

unsafe impl<T: Sync> Sync for Iter<'_, T> {}

unsafe impl<T: Send> Send for IterMut<'_, T> {}

unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

#[cfg(test)]
mod tests {
    use crate::List;

    /// Consume `front` elements from the front, then the rest from the back,
    /// checking the exact length on the way.
    fn check_both_ends<I>(mut iter: I, expected: &[I::Item], front: usize)
    where
        I: DoubleEndedIterator + ExactSizeIterator,
        I::Item: PartialEq + std::fmt::Debug,
    {
        let mut taken = expected.len();
        for item in &expected[..front] {
            assert_eq!(iter.next().as_ref(), Some(item));
            taken -= 1;
            assert_eq!(iter.len(), taken);
        }
        for item in expected[front..].iter().rev() {
            assert_eq!(iter.next_back().as_ref(), Some(item));
            taken -= 1;
            assert_eq!(iter.len(), taken);
        }
        assert!(iter.next().is_none());
        assert!(iter.next_back().is_none());
    }

    #[test]
    fn iter_meets_in_the_middle() {
        for len in 0..6 {
            let mut list = List::from_iter(0..len);
            for front in 0..=len {
                let mut expected = Vec::from_iter(0..len);
                check_both_ends(list.iter(), &Vec::from_iter(&expected)[..], front);
                check_both_ends(list.iter().rev(), &Vec::from_iter(expected.iter().rev())[..], front);
                check_both_ends(list.iter_mut(), &Vec::from_iter(&mut expected)[..], front);
                check_both_ends(list.clone().into_iter(), &Vec::from_iter(0..len)[..], front);
            }
        }
    }

    #[test]
    fn into_iter_pops_both_ends() {
        let list = List::from(["a", "b", "c", "d"]);
        let mut iter = list.into_iter();
        assert_eq!(iter.len(), 4);
        assert_eq!(iter.next(), Some("a"));
        assert_eq!(iter.next_back(), Some("d"));
        assert_eq!(format!("{:?}", iter), r#"IntoIter { list: ["b", "c"] }"#);
        assert_eq!(iter.last(), Some("c"));
    }

    #[test]
    fn iter_debug_and_extend() {
        let mut list = List::from([1, 2]);
        list.extend(&[3, 4]);
        let mut iter = list.iter();
        iter.next();
        assert_eq!(format!("{:?}", iter), "Iter(2, 3, 4)");
        assert_eq!(format!("{:?}", list.iter_mut()), "IterMut(1, 2, 3, 4)");
        assert_eq!(format!("{:?}", List::<u8>::new().iter()), "Iter");
        assert_eq!(Vec::from_iter(&list), vec![&1, &2, &3, &4]);
        for element in &mut list {
            *element *= 10;
        }
        assert_eq!(list.to_vec(), vec![10, 20, 30, 40]);
    }
}
