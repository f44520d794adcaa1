use crate::core::board::{Board, Pos};

const WORD_BITS: usize = u64::BITS as usize;

/// Fixed-capacity set of board cells, stored as a bitset over cell indices.
///
/// Sized to `width × height` at construction. Iteration yields positions in
/// row-major order, so anything driven by a `CellSet` is deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellSet {
    width: usize,
    capacity: usize,
    words: Vec<u64>,
    len: usize,
}

impl CellSet {
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        let capacity = width * height;
        Self {
            width,
            capacity,
            words: vec![0; capacity.div_ceil(WORD_BITS)],
            len: 0,
        }
    }

    /// Creates an empty set sized for `board`.
    #[must_use]
    pub fn for_board(board: &Board) -> Self {
        Self::new(board.width(), board.height())
    }

    /// Inserts `pos`, returning `true` if it was not already present.
    ///
    /// # Panics
    ///
    /// Panics if `pos` lies outside the board the set was sized for.
    pub fn insert(&mut self, pos: Pos) -> bool {
        let index = self.index_of(pos);
        assert!(
            pos.x < self.width && index < self.capacity,
            "cell {pos} outside of set capacity"
        );
        let (word, bit) = (index / WORD_BITS, index % WORD_BITS);
        let mask = 1_u64 << bit;
        if self.words[word] & mask != 0 {
            return false;
        }
        self.words[word] |= mask;
        self.len += 1;
        true
    }

    #[must_use]
    pub fn contains(&self, pos: Pos) -> bool {
        if pos.x >= self.width {
            return false;
        }
        let index = self.index_of(pos);
        index < self.capacity && self.words[index / WORD_BITS] & (1_u64 << (index % WORD_BITS)) != 0
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Positions in the set, in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Pos> + '_ {
        let width = self.width;
        self.words
            .iter()
            .enumerate()
            .flat_map(|(word_index, &word)| {
                let mut bits = word;
                std::iter::from_fn(move || {
                    if bits == 0 {
                        return None;
                    }
                    let bit = bits.trailing_zeros() as usize;
                    bits &= bits - 1;
                    Some(word_index * WORD_BITS + bit)
                })
            })
            .map(move |index| Pos::new(index % width, index / width))
    }

    const fn index_of(&self, pos: Pos) -> usize {
        pos.y * self.width + pos.x
    }
}

impl Extend<Pos> for CellSet {
    fn extend<T: IntoIterator<Item = Pos>>(&mut self, iter: T) {
        for pos in iter {
            self.insert(pos);
        }
    }
}
