//! Logic → render hand-off.
//!
//! The logic tick writes into the logic side of a [`SwapBuffer`]; the render
//! system exchanges the two sides exactly once per frame and then only reads
//! the render side. Both sides are complete values, so the renderer never
//! sees a mix of two frames.
//!
//! Today both roles run on one thread and the buffer lives in an
//! `Rc<RefCell<_>>`. Splitting logic and render onto separate threads only
//! requires moving the buffer behind a lock; the call pattern stays the same.

mod data;

pub use data::{LogicRenderData, ObjectId, RenderObject, Transform};

use std::mem;

use crate::registry::Handle;

/// Payload that can be recycled after it has been handed to the renderer.
pub trait SwapPayload: Default {
    /// Empties the value, keeping allocations where possible.
    fn reset(&mut self);
}

/// Double buffer shared by one producer (logic) and one consumer (render).
#[derive(Debug, Default)]
pub struct SwapBuffer<T> {
    logic: T,
    render: T,
    generation: u64,
}

impl<T: SwapPayload> SwapBuffer<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Side being filled by the current logic tick.
    pub fn logic_mut(&mut self) -> &mut T {
        &mut self.logic
    }

    /// Data published by the most recent swap.
    pub fn render(&self) -> &T {
        &self.render
    }

    /// Publishes the logic side. The new logic side starts empty.
    pub fn swap(&mut self) {
        mem::swap(&mut self.logic, &mut self.render);
        self.logic.reset();
        self.generation = self.generation.wrapping_add(1);
    }

    /// Number of swaps performed so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Producer end, handed to the world.
pub struct LogicWriter<T = LogicRenderData> {
    buffer: Handle<SwapBuffer<T>>,
}

impl<T: SwapPayload> LogicWriter<T> {
    pub fn new(buffer: Handle<SwapBuffer<T>>) -> Self {
        Self { buffer }
    }

    /// Mutates the pending (unpublished) data. `None` after teardown.
    pub fn write<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        self.buffer.with_mut(|b| f(b.logic_mut()))
    }
}

/// Consumer end, handed to the renderer.
pub struct RenderReader<T = LogicRenderData> {
    buffer: Handle<SwapBuffer<T>>,
}

impl<T: SwapPayload> RenderReader<T> {
    pub fn new(buffer: Handle<SwapBuffer<T>>) -> Self {
        Self { buffer }
    }

    /// Exchanges logic and render sides. Returns the new generation.
    pub fn swap(&self) -> Option<u64> {
        self.buffer.with_mut(|b| {
            b.swap();
            b.generation()
        })
    }

    /// Reads the published data.
    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        self.buffer.with(|b| f(b.render()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{Handle, share};

    #[derive(Debug, Default)]
    struct Frames(Vec<u64>);

    impl SwapPayload for Frames {
        fn reset(&mut self) {
            self.0.clear();
        }
    }

    #[test]
    fn render_side_only_changes_on_swap() {
        let mut buf = SwapBuffer::<Frames>::new();
        buf.logic_mut().0.push(1);
        assert!(buf.render().0.is_empty());

        buf.swap();
        assert_eq!(buf.render().0, vec![1]);
        assert!(buf.logic_mut().0.is_empty());

        buf.logic_mut().0.push(2);
        assert_eq!(buf.render().0, vec![1]);
        assert_eq!(buf.generation(), 1);
    }

    #[test]
    fn swap_never_mixes_frames() {
        let mut buf = SwapBuffer::<Frames>::new();
        for frame in 1..=5u64 {
            buf.logic_mut().0.extend([frame, frame]);
            buf.swap();
            assert_eq!(buf.render().0, vec![frame, frame]);
        }
    }

    #[test]
    fn writer_and_reader_share_one_buffer() {
        let shared = share(SwapBuffer::<Frames>::new());
        let writer = LogicWriter::new(Handle::from_shared(&shared));
        let reader = RenderReader::new(Handle::from_shared(&shared));

        writer.write(|f| f.0.push(7));
        assert_eq!(reader.read(|f| f.0.len()), Some(0));
        assert_eq!(reader.swap(), Some(1));
        assert_eq!(reader.read(|f| f.0.clone()), Some(vec![7]));

        drop(shared);
        assert_eq!(reader.swap(), None);
        assert_eq!(writer.write(|_| ()), None);
    }
}
