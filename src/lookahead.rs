/// An iterator wrapper with a one-element lookahead buffer.
///
/// [`Lookahead::has_next`] reports whether a subsequent pull will produce a
/// value without consuming it, and may be called any number of times without
/// advancing the sequence. `next` drains the buffered element first.
///
/// The parser uses this at two levels: over the sequence of input lines, to
/// know while parsing the last line whether any further line exists, and
/// over the characters within a line, to know whether a quote character is
/// the true last character of all input or just of the current line.
///
/// ### Example
///
/// ```rust
/// use csv_dialect::Lookahead;
///
/// let mut it = Lookahead::new(vec![1, 2].into_iter());
/// assert!(it.has_next());
/// assert!(it.has_next());
/// assert_eq!(it.next(), Some(1));
/// assert_eq!(it.next(), Some(2));
/// assert!(!it.has_next());
/// assert_eq!(it.next(), None);
/// ```
#[derive(Clone, Debug)]
pub struct Lookahead<I: Iterator> {
    iter: I,
    peeked: Option<I::Item>,
}

impl<I: Iterator> Lookahead<I> {
    /// Wrap an iterator in a lookahead buffer.
    pub fn new(iter: I) -> Lookahead<I> {
        Lookahead { iter: iter, peeked: None }
    }

    /// Returns true if and only if another element remains.
    ///
    /// Idempotent: the element, if any, is cached and handed back by the
    /// next call to `next`.
    pub fn has_next(&mut self) -> bool {
        if self.peeked.is_none() {
            self.peeked = self.iter.next();
        }
        self.peeked.is_some()
    }
}

impl<I: Iterator> Iterator for Lookahead<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        match self.peeked.take() {
            Some(v) => Some(v),
            None => self.iter.next(),
        }
    }
}
