//! 测试辅助：可观测打开、推进、释放次数的数据源。

use crate::SeqRes;
use crate::err::SeqErr;
use crate::seq::{Cursor, Sequence};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub(crate) struct ProbeStats {
    opened: AtomicUsize,
    advanced: AtomicUsize,
    released: AtomicUsize,
    dropped: AtomicUsize,
}

impl ProbeStats {
    /// 调用`cursor`的次数。
    pub(crate) fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    /// 调用`advance`的次数，包括返回`false`的调用。
    pub(crate) fn advanced(&self) -> usize {
        self.advanced.load(Ordering::SeqCst)
    }

    /// 通过`release`或耗尽进入终止状态的次数，重复释放只计一次。
    pub(crate) fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }

    /// 未经释放就被丢弃的游标数量。
    pub(crate) fn dropped(&self) -> usize {
        self.dropped.load(Ordering::SeqCst)
    }
}

#[derive(Debug)]
pub(crate) struct Probe<T> {
    items: Arc<[T]>,
    stats: Arc<ProbeStats>,
    indexed: bool,
    fail_at: Option<usize>,
}

impl<T> Probe<T> {
    pub(crate) fn new(items: impl IntoIterator<Item = T>) -> Self {
        Probe { items: items.into_iter().collect(), stats: Arc::default(), indexed: false, fail_at: None }
    }

    /// 暴露切片，支持随机访问。
    pub(crate) fn indexed(mut self) -> Self {
        self.indexed = true;
        self
    }

    /// 推进到指定位置时返回错误。
    pub(crate) fn failing_at(mut self, index: usize) -> Self {
        self.fail_at = Some(index);
        self
    }

    pub(crate) fn stats(&self) -> Arc<ProbeStats> {
        Arc::clone(&self.stats)
    }
}

impl<T> Clone for Probe<T> {
    fn clone(&self) -> Self {
        Probe {
            items: Arc::clone(&self.items),
            stats: Arc::clone(&self.stats),
            indexed: self.indexed,
            fail_at: self.fail_at,
        }
    }
}

impl<T> Sequence for Probe<T> {
    type Item = T;
    type Cursor = ProbeCursor<T>;

    fn cursor(&self) -> Self::Cursor {
        self.stats.opened.fetch_add(1, Ordering::SeqCst);
        ProbeCursor {
            items: Arc::clone(&self.items),
            stats: Arc::clone(&self.stats),
            fail_at: self.fail_at,
            next: 0,
            current: None,
            closed: false,
        }
    }

    fn as_slice(&self) -> Option<&[T]> {
        if self.indexed { Some(&self.items) } else { None }
    }
}

pub(crate) struct ProbeCursor<T> {
    items: Arc<[T]>,
    stats: Arc<ProbeStats>,
    fail_at: Option<usize>,
    next: usize,
    current: Option<usize>,
    closed: bool,
}

impl<T> Cursor for ProbeCursor<T> {
    type Item = T;

    fn advance(&mut self) -> SeqRes<bool> {
        self.stats.advanced.fetch_add(1, Ordering::SeqCst);
        if self.closed {
            return Ok(false);
        }
        if self.fail_at == Some(self.next) {
            self.release();
            return Err(SeqErr::Source { index: self.next, err: "probe failure".to_string() });
        }
        if self.next < self.items.len() {
            self.current = Some(self.next);
            self.next += 1;
            Ok(true)
        } else {
            self.release();
            Ok(false)
        }
    }

    fn current(&self) -> SeqRes<&T> {
        self.current.map(|index| &self.items[index]).ok_or(SeqErr::NoCurrent { cursor: "probe" })
    }

    fn release(&mut self) {
        if !self.closed {
            self.closed = true;
            self.current = None;
            self.stats.released.fetch_add(1, Ordering::SeqCst);
        }
    }
}

impl<T> Drop for ProbeCursor<T> {
    fn drop(&mut self) {
        if !self.closed {
            self.closed = true;
            self.stats.dropped.fetch_add(1, Ordering::SeqCst);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_is_not_release() {
        let probe = Probe::new([1, 2]);
        let mut cursor = probe.cursor();
        assert_eq!(Ok(true), cursor.advance());
        drop(cursor);
        assert_eq!(0, probe.stats().released());
        assert_eq!(1, probe.stats().dropped());

        let mut cursor = probe.cursor();
        cursor.release();
        drop(cursor);
        assert_eq!(1, probe.stats().released());
        assert_eq!(1, probe.stats().dropped());
    }
}
