use crate::list::List;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other)
    }
}

impl<T: Eq> Eq for List<T> {}

impl<T: PartialOrd> PartialOrd for List<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other)
    }
}

impl<T: Ord> Ord for List<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other)
    }
}

impl<T: Clone> Clone for List<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }

    /// Reuse the nodes of `self`: overwrite the common prefix in place, then
    /// append or drop the difference.
    fn clone_from(&mut self, other: &Self) {
        let mut cursor = self.cursor_start_mut();
        for element_other in other {
            match cursor.next() {
                Ok(element) => element.clone_from(element_other),
                Err(_) => cursor.add(element_other.clone()),
            }
        }
        while self.len() > other.len() {
            self.pop_back();
        }
    }
}

impl<T: Hash> Hash for List<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for elt in self {
            elt.hash(state);
        }
    }
}

/// Formats the list as `[a, b, c]`, rendering every element with its
/// `Display` implementation.
impl<T: fmt::Display> fmt::Display for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, element) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", element)?;
        }
        f.write_str("]")
    }
}

impl<T, const N: usize> From<[T; N]> for List<T> {
    fn from(array: [T; N]) -> Self {
        Self::from_iter(array)
    }
}

impl<T> List<T> {
    /// Returns `true` if the `List` contains an element equal to the given value.
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
    /// assert_eq!(list.contains(&0), true);
    /// assert_eq!(list.contains(&10), false);
    /// ```
    pub fn contains(&self, x: &T) -> bool
    where
        T: PartialEq<T>,
    {
        self.iter().any(|e| e == x)
    }

    /// Returns the index of the first element equal to `x`, or `None` if
    /// there is no such element.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::List;
    ///
    /// let list = List::from(['a', 'b', 'a']);
    /// assert_eq!(list.index_of(&'a'), Some(0));
    /// assert_eq!(list.index_of(&'z'), None);
    /// ```
    pub fn index_of(&self, x: &T) -> Option<usize>
    where
        T: PartialEq<T>,
    {
        self.iter().position(|e| e == x)
    }

    /// Returns the index of the last element equal to `x`, or `None` if
    /// there is no such element.
    ///
    /// The list is scanned backward from the end.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::List;
    ///
    /// let list = List::from(['a', 'b', 'a']);
    /// assert_eq!(list.last_index_of(&'a'), Some(2));
    /// assert_eq!(list.last_index_of(&'b'), Some(1));
    /// assert_eq!(list.last_index_of(&'z'), None);
    /// ```
    pub fn last_index_of(&self, x: &T) -> Option<usize>
    where
        T: PartialEq<T>,
    {
        let mut cursor = self.cursor_end();
        while let Ok(element) = cursor.previous() {
            if element == x {
                return Some(cursor.next_index());
            }
        }
        None
    }

    /// Removes the first element equal to `x`. Returns `true` if an element
    /// was removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::List;
    ///
    /// let mut list = List::from([1, 2, 1]);
    /// assert!(list.remove_item(&1));
    /// assert_eq!(list.to_vec(), vec![2, 1]);
    /// assert!(!list.remove_item(&3));
    /// ```
    pub fn remove_item(&mut self, x: &T) -> bool
    where
        T: PartialEq<T>,
    {
        let mut cursor = self.cursor_start_mut();
        while let Ok(element) = cursor.next() {
            if *element == *x {
                return cursor.remove().is_ok();
            }
        }
        false
    }

    /// Copies the elements into a new `Vec`, from front to back.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::List;
    ///
    /// let list = List::from([1, 2, 3]);
    /// assert_eq!(list.to_vec(), vec![1, 2, 3]);
    /// ```
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::List;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};
    use std::rc::Rc;

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_eq_and_ord() {
        let list = List::from([1, 2, 3]);
        assert_eq!(list, List::from_iter(1..4));
        assert_ne!(list, List::from([1, 2]));
        assert_ne!(list, List::from([1, 2, 4]));
        assert_eq!(List::<u8>::new(), List::default());

        assert!(List::from([1, 2]) < list);
        assert!(List::from([1, 3]) > list);
        assert_eq!(hash_of(&list), hash_of(&list.clone()));
    }

    #[test]
    fn test_clone_from() {
        let source = List::from_iter(0..5);

        let mut shorter = List::from([9, 9]);
        shorter.clone_from(&source);
        assert_eq!(shorter, source);

        let mut longer = List::from_iter(10..20);
        longer.clone_from(&source);
        assert_eq!(longer, source);
        assert_eq!(longer.len(), 5);

        let mut list = List::from_iter(0..3);
        list.clone_from(&List::new());
        assert!(list.is_empty());

        // the surplus tail is dropped, nothing else leaks
        let shared = Rc::new(());
        let mut list = List::from_iter((0..4).map(|_| Rc::clone(&shared)));
        let source = List::from([Rc::clone(&shared)]);
        list.clone_from(&source);
        assert_eq!(list.len(), 1);
        assert_eq!(Rc::strong_count(&shared), 3);
        drop((list, source));
        assert_eq!(Rc::strong_count(&shared), 1);
    }

    #[test]
    fn test_display() {
        assert_eq!(List::<i32>::new().to_string(), "[]");
        assert_eq!(List::from(["only"]).to_string(), "[only]");
        assert_eq!(List::from([1, 2, 3]).to_string(), "[1, 2, 3]");
        assert_eq!(format!("{:?}", List::from(["a", "b"])), r#"["a", "b"]"#);
    }

    #[test]
    fn test_search() {
        let list = List::from(["a", "b", "a", "c"]);
        assert!(list.contains(&"c"));
        assert!(!list.contains(&"d"));
        assert_eq!(list.index_of(&"a"), Some(0));
        assert_eq!(list.last_index_of(&"a"), Some(2));
        assert_eq!(list.index_of(&"c"), Some(3));
        assert_eq!(list.last_index_of(&"c"), Some(3));
        assert_eq!(list.index_of(&"d"), None);
        assert_eq!(list.last_index_of(&"d"), None);

        let empty = List::<&str>::new();
        assert_eq!(empty.index_of(&"a"), None);
        assert_eq!(empty.last_index_of(&"a"), None);
    }

    #[test]
    fn test_remove_item() {
        let mut list = List::from([3, 1, 3, 3]);
        assert!(list.remove_item(&3));
        assert_eq!(list.to_vec(), vec![1, 3, 3]);
        assert!(list.remove_item(&3));
        assert!(list.remove_item(&3));
        assert!(!list.remove_item(&3));
        assert_eq!(list.to_vec(), vec![1]);
        assert!(list.remove_item(&1));
        assert!(list.is_empty());
        assert!(!list.remove_item(&1));
    }
}
