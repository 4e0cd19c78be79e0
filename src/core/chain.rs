//! Singly-linked list shared by the user directory, friend indexes and post stacks.
//!
//! [`Chain`] owns its nodes through `Box` links. It supports the two shapes
//! the store needs: a LIFO stack (`push_front` / `pop_front`) and an ordered
//! set kept sorted at every insertion (`insert_sorted_by`). Sorted insertion
//! is stable, so equal keys keep their insertion order.

use std::cmp::Ordering;
use std::fmt;

use serde::ser::{Serialize, Serializer};

type Link<T> = Option<Box<Node<T>>>;

struct Node<T> {
    value: T,
    next: Link<T>,
}

pub struct Chain<T> {
    head: Link<T>,
    len: usize,
}

impl<T> Chain<T> {
    pub const fn new() -> Self {
        Self { head: None, len: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn front(&self) -> Option<&T> {
        self.head.as_deref().map(|node| &node.value)
    }

    /// O(1) insertion in front of the current head.
    pub fn push_front(&mut self, value: T) {
        let next = self.head.take();
        self.head = Some(Box::new(Node { value, next }));
        self.len += 1;
    }

    pub fn pop_front(&mut self) -> Option<T> {
        self.head.take().map(|node| {
            let node = *node;
            self.head = node.next;
            self.len -= 1;
            node.value
        })
    }

    /// Inserts `value` after every element that compares less than or equal
    /// to it and returns the 0-based position it landed at.
    ///
    /// A value that sorts before the current head becomes the new head.
    pub fn insert_sorted_by<F>(&mut self, value: T, mut compare: F) -> usize
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let mut position = 0;
        let mut cursor = &mut self.head;
        while cursor
            .as_ref()
            .is_some_and(|node| compare(&node.value, &value) != Ordering::Greater)
        {
            match cursor {
                Some(node) => cursor = &mut node.next,
                None => break,
            }
            position += 1;
        }

        let next = cursor.take();
        *cursor = Some(Box::new(Node { value, next }));
        self.len += 1;
        position
    }

    pub fn find<P>(&self, mut predicate: P) -> Option<&T>
    where
        P: FnMut(&T) -> bool,
    {
        self.iter().find(|value| predicate(value))
    }

    pub fn find_mut<P>(&mut self, mut predicate: P) -> Option<&mut T>
    where
        P: FnMut(&T) -> bool,
    {
        self.iter_mut().find(|value| predicate(value))
    }

    /// Unlinks the first element matching `predicate` and hands it back.
    pub fn remove_first<P>(&mut self, mut predicate: P) -> Option<T>
    where
        P: FnMut(&T) -> bool,
    {
        let mut cursor = &mut self.head;
        while cursor.as_ref().is_some_and(|node| !predicate(&node.value)) {
            match cursor {
                Some(node) => cursor = &mut node.next,
                None => break,
            }
        }

        let node = *cursor.take()?;
        *cursor = node.next;
        self.len -= 1;
        Some(node.value)
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.iter().nth(index)
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.head.as_deref(),
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            next: self.head.as_deref_mut(),
        }
    }

    /// Drops every node without recursing down the links.
    pub fn clear(&mut self) -> usize {
        let released = self.len;
        let mut link = self.head.take();
        while let Some(mut node) = link {
            link = node.next.take();
        }
        self.len = 0;
        released
    }
}

impl<T> Default for Chain<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Chain<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: fmt::Debug> fmt::Debug for Chain<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Serialize> Serialize for Chain<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

pub struct Iter<'a, T> {
    next: Option<&'a Node<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            &node.value
        })
    }
}

pub struct IterMut<'a, T> {
    next: Option<&'a mut Node<T>>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.take().map(|node| {
            self.next = node.next.as_deref_mut();
            &mut node.value
        })
    }
}

impl<'a, T> IntoIterator for &'a Chain<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
