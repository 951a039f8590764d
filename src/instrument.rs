//! Instrumentation wrapper
//!
//! [`Tracked`] owns a callable plus a handle to its tracker's state. Calling
//! it times the callable with a monotonic clock and, once the callable has
//! returned successfully, folds the elapsed time into the bucket for its
//! identifier. A panic unwinds straight through the wrapper and an `Err`
//! from [`Tracked::try_call`] is handed back untouched; neither is recorded.
//!
//! Rust has no variadic callables, so arguments are passed as a tuple:
//!
//! ```
//! use pytrack::Tracker;
//!
//! let tracker = Tracker::new("math");
//! let mut add = tracker.track("add", |a: i32, b: i32| a + b);
//! assert_eq!(add.call((2, 3)), 5);
//!
//! let mut answer = tracker.track("answer", || 42);
//! assert_eq!(answer.call(()), 42);
//!
//! assert_eq!(tracker.function_stats("add").unwrap().calls, 1);
//! ```

use crate::tracker::TrackerState;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::Instant;

/// A callable that accepts its arguments as a tuple
///
/// Implemented for every `FnMut` taking up to eight arguments.
pub trait Callable<Args> {
    /// Return type of the underlying callable
    type Output;

    /// Invoke with the unpacked argument tuple
    fn invoke(&mut self, args: Args) -> Self::Output;
}

macro_rules! impl_callable {
    ($($ty:ident $arg:ident),*) => {
        impl<Func, Ret, $($ty),*> Callable<($($ty,)*)> for Func
        where
            Func: FnMut($($ty),*) -> Ret,
        {
            type Output = Ret;

            fn invoke(&mut self, ($($arg,)*): ($($ty,)*)) -> Ret {
                (*self)($($arg),*)
            }
        }
    };
}

impl_callable!();
impl_callable!(A1 a1);
impl_callable!(A1 a1, A2 a2);
impl_callable!(A1 a1, A2 a2, A3 a3);
impl_callable!(A1 a1, A2 a2, A3 a3, A4 a4);
impl_callable!(A1 a1, A2 a2, A3 a3, A4 a4, A5 a5);
impl_callable!(A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6);
impl_callable!(A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6, A7 a7);
impl_callable!(A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6, A7 a7, A8 a8);

/// Derive a stable identifier from a callable's type path
///
/// The leading crate segment is dropped, so a function `slow` in module
/// `jobs` of crate `app` becomes `jobs::slow`. Closures resolve to their
/// enclosing item followed by `{{closure}}`, meaning every closure in one
/// function shares a bucket. Function pointers carry no path at all: a
/// `fn(u32) -> u32` resolves to `"fn(u32) -> u32"`, so every pointer with the
/// same signature shares a bucket. Pass fn items, or use an explicit id.
pub fn qualified_name<F>() -> String {
    let full = std::any::type_name::<F>();
    let path_end = full.find('<').unwrap_or(full.len());
    match full[..path_end].find("::") {
        Some(idx) => full[idx + 2..].to_string(),
        None => full.to_string(),
    }
}

/// Time `f` and record it under `id` once it returns
pub(crate) fn timed<R>(state: &RefCell<TrackerState>, id: &str, f: impl FnOnce() -> R) -> R {
    let start = Instant::now();
    let result = f();
    let elapsed = start.elapsed();
    state.borrow_mut().record_call(id, elapsed);
    result
}

/// Like [`timed`], but an `Err` skips recording
pub(crate) fn try_timed<T, E>(
    state: &RefCell<TrackerState>,
    id: &str,
    f: impl FnOnce() -> Result<T, E>,
) -> Result<T, E> {
    let start = Instant::now();
    let value = f()?;
    let elapsed = start.elapsed();
    state.borrow_mut().record_call(id, elapsed);
    Ok(value)
}

/// A callable wrapped by [`Tracker::track`](crate::Tracker::track)
pub struct Tracked<F> {
    id: String,
    func: F,
    state: Rc<RefCell<TrackerState>>,
}

impl<F> Tracked<F> {
    pub(crate) fn new(id: String, func: F, state: Rc<RefCell<TrackerState>>) -> Self {
        Self { id, func, state }
    }

    /// Identifier this wrapper records under
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Call the wrapped function, recording the call when it returns
    ///
    /// Every return counts as a success here, including an `Err` value; use
    /// [`Tracked::try_call`] for callables that report failure via `Result`.
    pub fn call<Args>(&mut self, args: Args) -> <F as Callable<Args>>::Output
    where
        F: Callable<Args>,
    {
        let func = &mut self.func;
        timed(&self.state, &self.id, || func.invoke(args))
    }

    /// Call a `Result`-returning function; only `Ok` returns are recorded
    pub fn try_call<Args, T, E>(&mut self, args: Args) -> Result<T, E>
    where
        F: Callable<Args, Output = Result<T, E>>,
    {
        let func = &mut self.func;
        try_timed(&self.state, &self.id, || func.invoke(args))
    }

    /// Unwrap the original callable
    pub fn into_inner(self) -> F {
        self.func
    }
}

impl<F> fmt::Debug for Tracked<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tracked").field("id", &self.id).finish()
    }
}
