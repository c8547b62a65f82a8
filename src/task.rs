use std::future::Future;
use std::panic;
use std::thread;

use tokio::runtime::{Builder, Handle, RuntimeFlavor};

/// Runs a future to completion from synchronous code without deadlocking.
///
/// Blocking on a future from inside a runtime is normally a trap: on a
/// current-thread runtime the blocked thread is the only one that could have
/// driven the future. `wait` picks a safe strategy for each situation:
///
/// - No ambient runtime: a throwaway current-thread runtime drives the future
///   on the calling thread.
/// - Inside a current-thread runtime: the future is detached onto a scoped
///   helper thread with its own runtime, insulating it from the blocked one.
/// - Inside a multi-thread runtime: the worker is handed back to the runtime
///   with `block_in_place` and the future runs on the ambient runtime.
///
/// A panic inside the future resurfaces on the calling thread.
///
/// # Examples
///
/// ```
/// let sum = rowfmt::task::wait(async { 2 + 2 });
/// assert_eq!(sum, 4);
/// ```
pub fn wait<F>(future: F) -> F::Output
where
    F: Future + Send,
    F::Output: Send,
{
    match Handle::try_current() {
        Ok(handle) => match handle.runtime_flavor() {
            RuntimeFlavor::CurrentThread => thread::scope(|scope| {
                match scope.spawn(|| block_on_fresh(future)).join() {
                    Ok(output) => output,
                    Err(payload) => panic::resume_unwind(payload),
                }
            }),
            _ => tokio::task::block_in_place(move || handle.block_on(future)),
        },
        Err(_) => block_on_fresh(future),
    }
}

fn block_on_fresh<F: Future>(future: F) -> F::Output {
    Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to build a fallback runtime")
        .block_on(future)
}
