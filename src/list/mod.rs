use std::fmt::{Debug, Formatter};
use std::sync::atomic::{AtomicU64, Ordering};

use thiserror::Error;

pub use crate::list::iterator::{Handles, IntoIter, Iter};

pub mod iterator;

/// The `List` is a doubly-linked list whose nodes live in an arena, implemented
/// as a cyclic list around a ghost node.
/// It allows inserting, removing elements at any known position in constant time.
/// In compromise, searching for an element takes *O*(*n*) time.
///
/// Nodes are addressed by [`Handle`]s instead of pointers. A handle stays valid
/// until its element is removed; afterwards every operation taking it reports
/// [`ListError::StaleHandle`], even if the slot has been reused by a newer element.
/// Handles are also bound to the list that issued them, so passing one to another
/// list reports the same error.
///
/// # Memory Layout
///
/// ```text
///   slot 0 (ghost)      slot i            slot j
/// ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
/// │ next ────────┼──→│ next ────────┼──→│ next ────────┼──→ slot 0
/// │ prev         │←──┼─ prev        │←──┼─ prev        │
/// │ (no payload) │   │ payload T    │   │ payload T    │
/// └──────────────┘   └──────────────┘   └──────────────┘
/// ```
///
/// `ghost.next` is the front element and `ghost.prev` is the back element. In an
/// empty list both point at the ghost itself.
///
/// # Examples
///
/// ```
/// use linked_routes::List;
///
/// let mut list = List::new();
/// let b = list.push_back('B');
/// list.push_front('A');
/// list.insert_after(b, 'C').unwrap();
/// assert_eq!(list.iter().collect::<String>(), "ABC");
///
/// assert_eq!(list.remove(b), Ok('B'));
/// assert!(list.remove(b).is_err());
/// ```
pub struct List<T> {
    /// unique per list, stamped into every handle it issues
    id: u64,
    nodes: Vec<Node<T>>,
    free: Vec<usize>,
    /// the number of live elements, not counting the ghost
    len: usize,
}

pub(crate) struct Node<T> {
    pub(crate) next: usize,
    pub(crate) prev: usize,
    generation: u32,
    pub(crate) element: Option<T>,
}

/// Index of the ghost node, which is allocated with the list and never freed.
pub(crate) const GHOST: usize = 0;

/// Source of list ids.
static NEXT_LIST_ID: AtomicU64 = AtomicU64::new(0);

/// An opaque reference to one element of a [`List`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Handle {
    list: u64,
    index: usize,
    generation: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ListError {
    #[error("handle does not refer to a live element of this list")]
    StaleHandle,
}

// private methods
impl<T> List<T> {
    fn ghost() -> Node<T> {
        Node {
            next: GHOST,
            prev: GHOST,
            generation: 0,
            element: None,
        }
    }

    pub(crate) fn front_node(&self) -> usize {
        self.nodes[GHOST].next
    }

    pub(crate) fn back_node(&self) -> usize {
        self.nodes[GHOST].prev
    }

    pub(crate) fn handle_of(&self, index: usize) -> Handle {
        Handle {
            list: self.id,
            index,
            generation: self.nodes[index].generation,
        }
    }

    /// Map a handle to its slot, or fail if it was issued by another list, or
    /// the slot is the ghost, freed, or reused since the handle was issued.
    fn resolve(&self, handle: Handle) -> Result<usize, ListError> {
        if handle.list != self.id {
            return Err(ListError::StaleHandle);
        }
        match self.nodes.get(handle.index) {
            Some(node)
                if handle.index != GHOST
                    && node.generation == handle.generation
                    && node.element.is_some() =>
            {
                Ok(handle.index)
            }
            _ => Err(ListError::StaleHandle),
        }
    }

    fn alloc(&mut self, element: T) -> usize {
        match self.free.pop() {
            Some(index) => {
                self.nodes[index].element = Some(element);
                index
            }
            None => {
                let index = self.nodes.len();
                self.nodes.push(Node {
                    next: index,
                    prev: index,
                    generation: 0,
                    element: Some(element),
                });
                index
            }
        }
    }

    fn connect(&mut self, prev: usize, next: usize) {
        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;
    }

    /// Attach the allocated node `node` to the list, between `prev` and `next`.
    ///
    /// `prev` and `next` must be adjacent (only checked in
    /// `#[cfg(debug_assertions)]`).
    fn attach_node(&mut self, prev: usize, next: usize, node: usize) -> Handle {
        debug_assert_eq!(self.nodes[prev].next, next, "attach between non-adjacent nodes");
        self.connect(prev, node);
        self.connect(node, next);
        self.len += 1;
        self.handle_of(node)
    }

    /// Detach a live node from the list and release its slot.
    ///
    /// The slot's generation is bumped so that outstanding handles to it turn
    /// stale, and its own links are reset to point at itself.
    fn detach_node(&mut self, node: usize) -> Option<T> {
        let (prev, next) = (self.nodes[node].prev, self.nodes[node].next);
        self.connect(prev, next);
        let slot = &mut self.nodes[node];
        slot.next = node;
        slot.prev = node;
        slot.generation = slot.generation.wrapping_add(1);
        let element = slot.element.take();
        self.free.push(node);
        self.len -= 1;
        element
    }
}

impl<T> List<T> {
    /// Create an empty `List`
    ///
    /// # Examples
    /// ```
    /// use linked_routes::List;
    /// let list: List<u32> = List::new();
    /// assert!(list.is_empty());
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty `List` with room for `capacity` elements before the
    /// arena reallocates.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity + 1);
        nodes.push(Self::ghost());
        Self {
            id: NEXT_LIST_ID.fetch_add(1, Ordering::Relaxed),
            nodes,
            free: Vec::new(),
            len: 0,
        }
    }

    /// Returns `true` if the `List` is empty.
    ///
    /// This operation should compute in *O*(1) time.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.front_node() == GHOST
    }

    /// Returns the length of the `List`.
    ///
    /// This operation should compute in *O*(1) time.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Removes all elements from the `List`. Every handle issued so far
    /// becomes stale.
    ///
    /// This operation should compute in *O*(*n*) time.
    pub fn clear(&mut self) {
        while self.pop_front().is_some() {}
    }

    /// Returns a handle to the front element, or `None` if the list is empty.
    pub fn front(&self) -> Option<Handle> {
        (!self.is_empty()).then(|| self.handle_of(self.front_node()))
    }

    /// Returns a handle to the back element, or `None` if the list is empty.
    pub fn back(&self) -> Option<Handle> {
        (!self.is_empty()).then(|| self.handle_of(self.back_node()))
    }

    /// Returns `true` if `handle` refers to a live element of this list.
    pub fn contains(&self, handle: Handle) -> bool {
        self.resolve(handle).is_ok()
    }

    /// Provides a reference to the element behind `handle`, or `None` if the
    /// handle is stale.
    pub fn get(&self, handle: Handle) -> Option<&T> {
        let index = self.resolve(handle).ok()?;
        self.nodes[index].element.as_ref()
    }

    /// Provides a mutable reference to the element behind `handle`, or `None`
    /// if the handle is stale.
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        let index = self.resolve(handle).ok()?;
        self.nodes[index].element.as_mut()
    }

    /// Appends an element to the back of the list and returns its handle.
    ///
    /// This operation should compute in *O*(1) time.
    pub fn push_back(&mut self, element: T) -> Handle {
        let node = self.alloc(element);
        self.attach_node(self.back_node(), GHOST, node)
    }

    /// Prepends an element to the front of the list and returns its handle.
    ///
    /// This operation should compute in *O*(1) time.
    pub fn push_front(&mut self, element: T) -> Handle {
        let node = self.alloc(element);
        self.attach_node(GHOST, self.front_node(), node)
    }

    /// Inserts `element` right after the element behind `anchor`.
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_routes::List;
    ///
    /// let mut list = List::from_iter([1, 3]);
    /// let one = list.front().unwrap();
    /// list.insert_after(one, 2).unwrap();
    /// assert_eq!(Vec::from_iter(list), vec![1, 2, 3]);
    /// ```
    pub fn insert_after(&mut self, anchor: Handle, element: T) -> Result<Handle, ListError> {
        let prev = self.resolve(anchor)?;
        let next = self.nodes[prev].next;
        let node = self.alloc(element);
        Ok(self.attach_node(prev, next, node))
    }

    /// Inserts `element` right before the element behind `anchor`.
    ///
    /// This operation should compute in *O*(1) time.
    pub fn insert_before(&mut self, anchor: Handle, element: T) -> Result<Handle, ListError> {
        let next = self.resolve(anchor)?;
        let prev = self.nodes[next].prev;
        let node = self.alloc(element);
        Ok(self.attach_node(prev, next, node))
    }

    /// Unlinks the element behind `handle` and returns it.
    ///
    /// This operation should compute in *O*(1) time.
    pub fn remove(&mut self, handle: Handle) -> Result<T, ListError> {
        let index = self.resolve(handle)?;
        self.detach_node(index).ok_or(ListError::StaleHandle)
    }

    /// Removes the front element and returns it, or `None` if the list is empty.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        self.detach_node(self.front_node())
    }

    /// Removes the back element and returns it, or `None` if the list is empty.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        self.detach_node(self.back_node())
    }

    /// Returns the handle after `at`, or `None` when `at` is the back element
    /// (the ghost boundary) or stale.
    pub fn next(&self, at: Handle) -> Option<Handle> {
        let index = self.resolve(at).ok()?;
        let next = self.nodes[index].next;
        (next != GHOST).then(|| self.handle_of(next))
    }

    /// Returns the handle before `at`, or `None` when `at` is the front element
    /// (the ghost boundary) or stale.
    pub fn prev(&self, at: Handle) -> Option<Handle> {
        let index = self.resolve(at).ok()?;
        let prev = self.nodes[index].prev;
        (prev != GHOST).then(|| self.handle_of(prev))
    }

    /// Returns the handle after `at`, passing over the ghost node so that the
    /// back element is followed by the front one.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_routes::List;
    ///
    /// let list = List::from_iter(['x', 'y']);
    /// let y = list.back().unwrap();
    /// assert_eq!(list.next(y), None);
    /// assert_eq!(list.next_cyclic(y), list.front());
    /// ```
    pub fn next_cyclic(&self, at: Handle) -> Option<Handle> {
        let index = self.resolve(at).ok()?;
        match self.nodes[index].next {
            GHOST => Some(self.handle_of(self.front_node())),
            next => Some(self.handle_of(next)),
        }
    }

    /// Returns the handle before `at`, passing over the ghost node so that the
    /// front element is preceded by the back one.
    pub fn prev_cyclic(&self, at: Handle) -> Option<Handle> {
        let index = self.resolve(at).ok()?;
        match self.nodes[index].prev {
            GHOST => Some(self.handle_of(self.back_node())),
            prev => Some(self.handle_of(prev)),
        }
    }

    /// Returns the handle of the first element, scanning from the front, for
    /// which `predicate` holds.
    ///
    /// This operation should compute in *O*(*n*) time.
    pub fn position<P>(&self, mut predicate: P) -> Option<Handle>
    where
        P: FnMut(&T) -> bool,
    {
        self.handles()
            .find(|&handle| self.get(handle).map_or(false, &mut predicate))
    }

    /// Returns an iterator over the elements from front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Returns an iterator over the handles from front to back.
    pub fn handles(&self) -> Handles<'_, T> {
        Handles::new(self)
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

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other)
    }
}

impl<T: Eq> Eq for List<T> {}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

#[cfg(test)]
mod tests {
    use crate::list::{List, ListError};

    fn collect<T: Clone>(list: &List<T>) -> Vec<T> {
        list.iter().cloned().collect()
    }

    #[test]
    fn list_create() {
        let mut list = List::<i32>::new();
        assert!(list.is_empty());
        list.push_back(1);
        assert!(!list.is_empty());
        assert_eq!(list.pop_back(), Some(1));
        assert!(list.is_empty());
    }

    #[test]
    fn list_push_and_pop() {
        let mut list = List::new();
        assert_eq!(list.len(), 0);
        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);
        assert_eq!(list.pop_front(), None);
        assert_eq!(list.pop_back(), None);

        list.push_back(1);
        assert_eq!(list.pop_front(), Some(1));
        assert_eq!(list.pop_back(), None);
        assert!(list.is_empty());

        list.push_front(1);
        list.push_front(2);
        list.push_back(3);
        assert_eq!(collect(&list), vec![2, 1, 3]);
        assert_eq!(list.len(), 3);
        assert_eq!(list.pop_front(), Some(2));
        assert_eq!(list.pop_back(), Some(3));
        assert_eq!(list.pop_front(), Some(1));
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
    }

    #[test]
    fn list_insert_and_remove_by_handle() {
        let mut list = List::new();
        let a = list.push_back('a');
        let c = list.push_back('c');
        let b = list.insert_after(a, 'b').unwrap();
        let d = list.insert_after(c, 'd').unwrap();
        assert_eq!(list.back(), Some(d));
        list.insert_before(a, '_').unwrap();
        assert_eq!(collect(&list), vec!['_', 'a', 'b', 'c', 'd']);

        assert_eq!(list.remove(b), Ok('b'));
        assert_eq!(list.remove(d), Ok('d'));
        assert_eq!(list.back(), Some(c));
        assert_eq!(collect(&list), vec!['_', 'a', 'c']);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn list_stale_handles() {
        let mut list = List::new();
        let a = list.push_back(1);
        assert_eq!(list.remove(a), Ok(1));
        assert_eq!(list.remove(a), Err(ListError::StaleHandle));
        assert_eq!(list.get(a), None);
        assert_eq!(list.insert_after(a, 5), Err(ListError::StaleHandle));
        assert_eq!(list.next(a), None);

        // the freed slot is reused, but the old handle must not see the new element
        let b = list.push_back(2);
        assert_ne!(a, b);
        assert!(!list.contains(a));
        assert!(list.contains(b));
        assert_eq!(list.get(b), Some(&2));
    }

    #[test]
    fn list_rejects_foreign_handles() {
        let mut ours = List::from_iter(['a', 'b']);
        let mut theirs = List::from_iter(['x', 'y']);
        let foreign = theirs.back().unwrap();

        assert!(!ours.contains(foreign));
        assert_eq!(ours.get(foreign), None);
        assert_eq!(ours.next_cyclic(foreign), None);
        assert_eq!(ours.insert_after(foreign, 'c'), Err(ListError::StaleHandle));
        assert_eq!(ours.remove(foreign), Err(ListError::StaleHandle));
        assert_eq!(ours.iter().collect::<String>(), "ab");
        assert_eq!(theirs.remove(foreign), Ok('y'));
    }

    #[test]
    fn list_clear_invalidates_handles() {
        let mut list = List::from_iter(0..4);
        let handles: Vec<_> = list.handles().collect();
        list.clear();
        assert!(list.is_empty());
        list.extend(10..14);
        assert!(handles.iter().all(|&h| !list.contains(h)));
    }

    #[test]
    fn list_bounded_and_cyclic_links() {
        let list = List::from_iter([1, 2, 3]);
        let front = list.front().unwrap();
        let back = list.back().unwrap();
        assert_eq!(list.prev(front), None);
        assert_eq!(list.next(back), None);
        assert_eq!(list.next_cyclic(back), Some(front));
        assert_eq!(list.prev_cyclic(front), Some(back));

        let single = List::from_iter([7]);
        let only = single.front().unwrap();
        assert_eq!(single.next_cyclic(only), Some(only));
        assert_eq!(single.prev_cyclic(only), Some(only));
    }

    #[test]
    fn list_position() {
        let list = List::from_iter(["x", "y", "x"]);
        let found = list.position(|s| *s == "x").unwrap();
        assert_eq!(Some(found), list.front());
        assert_eq!(list.position(|s| *s == "z"), None);
    }

    #[test]
    fn list_get_mut() {
        let mut list = List::from_iter([1, 2]);
        let back = list.back().unwrap();
        if let Some(x) = list.get_mut(back) {
            *x = 5;
        }
        assert_eq!(collect(&list), vec![1, 5]);
        assert_eq!(format!("{:?}", list), "[1, 5]");
    }
}
