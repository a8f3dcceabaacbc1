//! Blocking bridge over the async transport.
//!
//! The transport is async (hyper on tokio) while the request builder is
//! blocking. Futures are driven on one process-wide runtime so that pooled
//! connections of the shared client stay attached to a live reactor between
//! calls.

use std::future::Future;
use std::sync::LazyLock;

use tokio::runtime::{Builder, Handle, Runtime, RuntimeFlavor};

use crate::{Error, Result};

static RUNTIME: LazyLock<std::io::Result<Runtime>> = LazyLock::new(|| {
    Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("jsonreq-io")
        .enable_all()
        .build()
});

/// Run `future` to completion on the shared runtime, blocking this thread.
///
/// From a plain thread the runtime is entered directly. A worker of a
/// multi-thread tokio runtime first hands its tasks over with
/// [`tokio::task::block_in_place`]. A current-thread runtime cannot give up
/// its only thread, so the future is driven from a scoped helper thread while
/// the caller waits.
pub(crate) fn block_on<F>(future: F) -> Result<F::Output>
where
    F: Future + Send,
    F::Output: Send,
{
    let runtime = RUNTIME
        .as_ref()
        .map_err(|e| Error::connection(format!("failed to start I/O runtime: {e}")))?;

    let Ok(host) = Handle::try_current() else {
        return Ok(runtime.block_on(future));
    };

    let output = match host.runtime_flavor() {
        RuntimeFlavor::CurrentThread => std::thread::scope(|scope| {
            scope
                .spawn(|| runtime.block_on(future))
                .join()
                .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
        }),
        _ => tokio::task::block_in_place(|| runtime.block_on(future)),
    };
    Ok(output)
}
