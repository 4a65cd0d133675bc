/// Soft limit on open file descriptors for this process, if it is finite.
pub fn open_files() -> Option<u64> {
    let mut limit = libc::rlimit {
        rlim_cur: 0,
        rlim_max: 0,
    };

    // SAFETY: `limit` is a valid, writable rlimit for the duration of the call.
    let ret = unsafe { libc::getrlimit(libc::RLIMIT_NOFILE, &mut limit) };
    if ret != 0 || limit.rlim_cur == libc::RLIM_INFINITY {
        return None;
    }

    Some(limit.rlim_cur)
}

/// Warns when `threads` concurrent sockets could run out of descriptors.
pub fn check_threads(threads: usize) {
    match open_files() {
        Some(max) if threads as u64 >= max => log::warn!(
            "{} threads may exhaust the open file limit ({}), consider lowering --threads",
            threads,
            max
        ),
        Some(max) => log::debug!("Open file limit is {}", max),
        None => log::debug!("Open file limit is unlimited or unknown"),
    }
}
