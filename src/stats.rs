//! Memory and shape report of a [`PowerHeap`].

use std::io::Write;
use std::mem::size_of;

use size::Size;
use thousands::Separable;

use crate::data_structures::power_heap::PowerHeap;
use crate::heap_primitives::index_parent;

impl<T> PowerHeap<T>
where
    T: Ord,
{
    /// Number of levels in the tree, `0` when empty.
    ///
    /// ```
    /// use power_heap::PowerHeap;
    ///
    /// let mut heap = PowerHeap::new(1)?;
    /// assert_eq!(heap.height(), 0);
    /// for v in 0..7 {
    ///     heap.insert(v);
    /// }
    /// assert_eq!(heap.height(), 3);
    /// heap.insert(7);
    /// assert_eq!(heap.height(), 4);
    /// # Ok::<(), power_heap::PowerHeapError>(())
    /// ```
    pub fn height(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        // The last node is on the deepest level.
        let mut i = self.len() - 1;
        let mut levels = 1;
        while i > 0 {
            i = index_parent(i, self.exponent());
            levels += 1;
        }
        levels
    }

    pub fn write_memory_stats<W: Write>(&self, mut out: W) -> std::io::Result<()> {
        writeln!(out, "PowerHeap<{}> Stats:", std::any::type_name::<T>())?;
        writeln!(
            out,
            "  - Arity:    2^{} = {}",
            self.exponent(),
            self.branching_factor().separate_with_commas()
        )?;
        writeln!(out, "  - Height:   {}", self.height())?;

        let s = size_of::<T>();
        let l = self.len();
        let c = self.capacity();
        writeln!(
            out,
            "  - |Heap|:   {} ({})",
            l.separate_with_commas(),
            Size::from_bytes(l * s)
        )?;
        writeln!(
            out,
            "  - |Heap|*:  {} ({})",
            c.separate_with_commas(),
            Size::from_bytes(c * s)
        )?;

        Ok(())
    }

    pub fn print_memory_stats(&self) -> std::io::Result<()> {
        self.write_memory_stats(std::io::stdout().lock())
    }
}
