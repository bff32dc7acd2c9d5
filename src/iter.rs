//! Insertion-order iterators over `OrderedHashMap`.

use crate::order_list::Links;
use crate::Value;

/// Iterator over `(key, value)` pairs, oldest insertion first.
pub struct Iter<'a> {
    links: Links<'a>,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(links: Links<'a>) -> Self {
        Self { links }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a [u8], Value);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.links.next().map(|(_k, e)| (&*e.key, e.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.links.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

/// Iterator over keys in insertion order.
pub struct Keys<'a> {
    it: Iter<'a>,
}

impl<'a> Keys<'a> {
    pub(crate) fn new(it: Iter<'a>) -> Self {
        Self { it }
    }
}

impl<'a> Iterator for Keys<'a> {
    type Item = &'a [u8];
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl ExactSizeIterator for Keys<'_> {}

/// Iterator over values in insertion order.
pub struct Values<'a> {
    it: Iter<'a>,
}

impl<'a> Values<'a> {
    pub(crate) fn new(it: Iter<'a>) -> Self {
        Self { it }
    }
}

impl Iterator for Values<'_> {
    type Item = Value;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl ExactSizeIterator for Values<'_> {}
