/// Cursor over a non-empty image gallery. Index stays in `[0, len)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carousel {
    len: usize,
    index: usize,
}

impl Carousel {
    /// `None` for an empty gallery; the section is not shown at all then.
    pub fn new(len: usize) -> Option<Self> {
        (len > 0).then_some(Self { len, index: 0 })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn prev(&mut self) {
        self.index = (self.index + self.len - 1) % self.len;
    }

    pub fn next(&mut self) {
        self.index = (self.index + 1) % self.len;
    }

    /// Jump to an indicator. Out-of-range targets are ignored.
    pub fn select(&mut self, index: usize) {
        if index < self.len {
            self.index = index;
        }
    }

    /// Indicator dots, current one filled.
    pub fn indicator(&self) -> String {
        (0..self.len)
            .map(|i| if i == self.index { "●" } else { "○" })
            .collect::<Vec<_>>()
            .join(" ")
    }
}
