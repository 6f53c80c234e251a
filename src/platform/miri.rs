//! Miri shim: there is no OS to hand pages back to, so decommit always
//! reports zero and the page size is a fixed 4 KiB. This keeps the region
//! and alignment logic fully checkable under Miri without any FFI.

pub(crate) fn query_page_size() -> usize {
    4096
}

pub(crate) unsafe fn os_decommit(_start: usize, _len: usize) -> usize {
    0
}
