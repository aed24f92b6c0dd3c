//! Execution context tokens and shared state cells.
//!
//! All shared state in this crate has exactly one writer context. The
//! token types below turn that rule into a structural guarantee: a
//! function that takes a `&MainCtx` argument can only be reached from
//! the main loop, one that takes `&IrqCtx` only from an interrupt
//! handler.

use core::cell::Cell;

pub use critical_section::{CriticalSection, Mutex};

macro_rules! define_context {
    ($name:ident) => {
        pub struct $name<'cs>(CriticalSection<'cs>);

        impl<'cs> $name<'cs> {
            /// Create a new context.
            ///
            /// # SAFETY
            ///
            /// This may only be called from the corresponding context.
            /// `MainCtx` may only be constructed in the main loop and
            /// `IrqCtx` may only be constructed in interrupt handlers.
            #[inline(always)]
            pub unsafe fn new() -> Self {
                // SAFETY: This cs is only used as a borrow token for the
                //         `Mutex` cells. The interrupt safety is upheld by
                //         the context machinery instead:
                //
                //         Cells gated on `MainCtx` are written by the main
                //         loop only, cells gated on `IrqCtx` by handlers
                //         only. Everything crossing the two contexts is an
                //         atomic with a single writer. There cannot be any
                //         concurrent access in safe code.
                let cs = unsafe { CriticalSection::new() };
                fence();
                Self(cs)
            }

            /// Get the `CriticalSection` that belongs to this context.
            #[inline(always)]
            pub fn cs(&self) -> CriticalSection<'cs> {
                self.0
            }
        }

        impl Drop for $name<'_> {
            #[inline(always)]
            fn drop(&mut self) {
                fence();
            }
        }
    };
}

define_context!(MainCtx);
define_context!(IrqCtx);

/// Optimization and reordering fence.
#[inline(always)]
pub fn fence() {
    core::sync::atomic::fence(core::sync::atomic::Ordering::SeqCst);
}

/// A `Cell` that is only accessible from the main context.
pub struct MutexCell<T> {
    inner: Mutex<Cell<T>>,
}

impl<T> MutexCell<T> {
    #[inline]
    pub const fn new(inner: T) -> Self {
        Self {
            inner: Mutex::new(Cell::new(inner)),
        }
    }
}

impl<T: Copy> MutexCell<T> {
    #[inline]
    pub fn get(&self, m: &MainCtx<'_>) -> T {
        self.inner.borrow(m.cs()).get()
    }

    #[inline]
    pub fn set(&self, m: &MainCtx<'_>, inner: T) {
        self.inner.borrow(m.cs()).set(inner);
    }
}

// vim: ts=4 sw=4 expandtab
