use crate::list::{Handle, List, GHOST};
use std::fmt;
use std::iter::{FromIterator, FusedIterator};

/// An iterator over the elements of a `List`.
///
/// It uses a pair of slots `start..end` to represent a half-open subrange
/// of the list, where `start` is inclusive and `end` is not. Initially
/// `end` is the ghost node.
///
/// # Examples
///
/// ```compile_fail
/// use linked_routes::List;
///
/// let mut list = List::from_iter([1, 2, 3]);
/// let mut iter = list.iter();
///
/// // Won't compile, because list is already borrowed immutably.
/// list.push_back(4);
/// println!("{:?}", iter.next());
/// ```
#[derive(Clone)]
pub struct Iter<'a, T: 'a> {
    start: usize,
    end: usize,
    len: usize,
    list: &'a List<T>,
}

impl<'a, T: 'a> Iter<'a, T> {
    pub(crate) fn new(list: &'a List<T>) -> Self {
        Self {
            start: list.front_node(),
            end: GHOST,
            len: list.len(),
            list,
        }
    }
}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for Iter<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.len).finish()
    }
}

impl<'a, T: 'a> Iterator for Iter<'a, T> {
    type Item = &'a T;

    /// Return `*start` and reset the iterating range to `(start.next)..end`,
    /// or return `None` if `start..end` is already empty.
    fn next(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }
        let current = &self.list.nodes[self.start];
        self.start = current.next;
        self.len -= 1;
        current.element.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }

    fn last(mut self) -> Option<Self::Item> {
        self.next_back()
    }
}

impl<'a, T: 'a> DoubleEndedIterator for Iter<'a, T> {
    /// Reset the iterating range to `start..(end.prev)` and return `*end`,
    /// or return `None` if `start..end` is already empty.
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }
        self.end = self.list.nodes[self.end].prev;
        self.len -= 1;
        self.list.nodes[self.end].element.as_ref()
    }
}

impl<'a, T: 'a> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T: 'a> FusedIterator for Iter<'a, T> {}

/// An iterator over the handles of a `List`, in the same order as [`Iter`].
#[derive(Clone)]
pub struct Handles<'a, T: 'a> {
    start: usize,
    end: usize,
    len: usize,
    list: &'a List<T>,
}

impl<'a, T: 'a> Handles<'a, T> {
    pub(crate) fn new(list: &'a List<T>) -> Self {
        Self {
            start: list.front_node(),
            end: GHOST,
            len: list.len(),
            list,
        }
    }
}

impl<'a, T: 'a> Iterator for Handles<'a, T> {
    type Item = Handle;

    fn next(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }
        let handle = self.list.handle_of(self.start);
        self.start = self.list.nodes[self.start].next;
        self.len -= 1;
        Some(handle)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T: 'a> DoubleEndedIterator for Handles<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }
        self.end = self.list.nodes[self.end].prev;
        self.len -= 1;
        Some(self.list.handle_of(self.end))
    }
}

impl<'a, T: 'a> ExactSizeIterator for Handles<'a, T> {}

impl<'a, T: 'a> FusedIterator for Handles<'a, T> {}

/// An owning iterator over the elements of a `List`.
pub struct IntoIter<T> {
    list: List<T>,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(list: List<T>) -> Self {
        Self { list }
    }
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.list).finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.list.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = List::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for List<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(|elt| {
            self.push_back(elt);
        });
    }
}

impl<'a, T: 'a + Copy> Extend<&'a T> for List<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

#[cfg(test)]
mod tests {
    use crate::List;
    use proptest::prelude::*;
    use std::collections::VecDeque;

    #[test]
    fn test_iter() {
        let vec = vec![1, 2, 3, 4, 5];
        let list = List::from_iter(vec.clone());

        let mut iter = list.iter();
        for (i, item) in vec.iter().enumerate() {
            assert_eq!(iter.next(), Some(item));
            assert_eq!(iter.len(), vec.len() - i - 1);
        }
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);

        // meet in the middle
        let mut iter = list.iter();
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next_back(), Some(&5));
        assert_eq!(iter.next(), Some(&2));
        assert_eq!(iter.next_back(), Some(&4));
        assert_eq!(iter.next(), Some(&3));
        assert_eq!(iter.next_back(), None);
        assert_eq!(iter.next(), None);

        assert_eq!(list.iter().rev().copied().collect::<Vec<_>>(), vec![5, 4, 3, 2, 1]);
        assert_eq!(list.iter().last(), Some(&5));
    }

    #[test]
    fn test_handles_follow_iter() {
        let list = List::from_iter("abc".chars());
        let via_handles: String = list.handles().filter_map(|h| list.get(h)).collect();
        assert_eq!(via_handles, "abc");
        assert_eq!(list.handles().rev().next(), list.back());
    }

    #[test]
    fn test_into_iter() {
        let list = List::from_iter([1, 2, 3]);
        let mut iter = list.into_iter();
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.next_back(), Some(3));
        assert_eq!(iter.next(), Some(1));
        assert_eq!(iter.next(), Some(2));
        assert_eq!(iter.next(), None);
    }

    #[derive(Debug, Clone)]
    enum Op {
        PushBack(u8),
        PushFront(u8),
        PopBack,
        PopFront,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            any::<u8>().prop_map(Op::PushBack),
            any::<u8>().prop_map(Op::PushFront),
            Just(Op::PopBack),
            Just(Op::PopFront),
        ]
    }

    proptest! {
        #[test]
        fn behaves_like_vec_deque(ops in prop::collection::vec(op(), 0..64)) {
            let mut list = List::new();
            let mut deque = VecDeque::new();
            for op in ops {
                match op {
                    Op::PushBack(x) => {
                        list.push_back(x);
                        deque.push_back(x);
                    }
                    Op::PushFront(x) => {
                        list.push_front(x);
                        deque.push_front(x);
                    }
                    Op::PopBack => prop_assert_eq!(list.pop_back(), deque.pop_back()),
                    Op::PopFront => prop_assert_eq!(list.pop_front(), deque.pop_front()),
                }
                prop_assert_eq!(list.len(), deque.len());
            }
            prop_assert!(list.iter().eq(deque.iter()));
            prop_assert!(list.iter().rev().eq(deque.iter().rev()));
        }
    }
}
