/*!
The luby sequence, as a function and as an iterator.

See <https://oeis.org/A182105> for details on the luby sequence.

The sequence is 1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4, 8, …
That is, whenever a run 1, 2, …, 2<sup>k</sup> completes the whole sequence so far is repeated before the run is extended by 2<sup>k+1</sup>.

[luby] computes the i<sup>th</sup> element (from 1) recursively:
- If i = 2<sup>k</sup> - 1, the element is 2<sup>k-1</sup>.
- Otherwise, with 2<sup>k-1</sup> ≤ i < 2<sup>k</sup> - 1, the element is the element at i - 2<sup>k-1</sup> + 1.

[Luby] iterates over the sequence by way of [luby], and is used to schedule restarts.
*/

/// Representation used for numbers in a luby sequence.
pub type LubyRepresentation = u32;

/// The `index`<sup>th</sup> element of the luby sequence, counting from 1.
///
/// ```rust
/// # use prover_sat::generic::luby::luby;
/// assert_eq!(luby(1), 1);
/// assert_eq!(luby(7), 4);
/// assert_eq!(luby(8), 1);
/// ```
pub fn luby(index: LubyRepresentation) -> LubyRepresentation {
    let index = index.max(1);

    // The smallest k with index ≤ 2^k - 1.
    let mut k = 1;
    while ((1_u64 << k) - 1) < index as u64 {
        k += 1;
    }

    if index as u64 == (1_u64 << k) - 1 {
        1 << (k - 1)
    } else {
        luby(index - (1 << (k - 1)) + 1)
    }
}

/// An iterator over the luby sequence.
pub struct Luby {
    index: LubyRepresentation,
}

impl Default for Luby {
    fn default() -> Self {
        Luby { index: 0 }
    }
}

impl Iterator for Luby {
    type Item = LubyRepresentation;

    fn next(&mut self) -> Option<Self::Item> {
        self.index = self.index.checked_add(1)?;
        Some(luby(self.index))
    }
}

impl Luby {
    /// The position of the most recently returned element, or zero if no element has been returned.
    pub fn current(&self) -> LubyRepresentation {
        self.index
    }
}
