use crate::err::SeqErr;
use crate::seq::{Cursor, Sequence};
use crate::{Integer, SeqRes};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

/// 以给定元素作为输入，支持随机访问。
pub fn of<T>(items: impl IntoIterator<Item = T>) -> Of<T> {
    Of { items: items.into_iter().collect() }
}

pub fn empty<T>() -> Of<T> {
    Of { items: Arc::from([]) }
}

/// 生成从`start`开始的`count`个连续整数，不支持随机访问。
pub fn range(start: Integer, count: usize) -> Range {
    Range { start, count }
}

/// 重复给定值，`count`为`None`时无限重复。
pub fn repeat<T>(value: T, count: Option<usize>) -> Repeat<T> {
    Repeat { value: Arc::new(value), count }
}

/// 以可能失败的读取结果作为输入，推进到`Err`时以`SeqErr::Source`失败。
pub fn of_results<T>(items: impl IntoIterator<Item = Result<T, String>>) -> OfResults<T> {
    OfResults { items: items.into_iter().collect() }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum Pos {
    Unstarted,
    At(usize),
    Closed,
}

impl Pos {
    /// 移动到下一个位置，超出`len`时关闭。
    fn step(&mut self, len: usize) -> Option<usize> {
        let next = match *self {
            Pos::Unstarted => 0,
            Pos::At(index) => index + 1,
            Pos::Closed => return None,
        };
        *self = if next < len { Pos::At(next) } else { Pos::Closed };
        self.index()
    }

    fn index(self) -> Option<usize> {
        match self {
            Pos::At(index) => Some(index),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct Of<T> {
    items: Arc<[T]>,
}

impl<T> Clone for Of<T> {
    fn clone(&self) -> Self {
        Of { items: Arc::clone(&self.items) }
    }
}

impl<T> Sequence for Of<T> {
    type Item = T;
    type Cursor = SliceCursor<T>;

    fn cursor(&self) -> Self::Cursor {
        SliceCursor { items: Arc::clone(&self.items), pos: Pos::Unstarted }
    }

    fn as_slice(&self) -> Option<&[T]> {
        Some(&self.items)
    }
}

pub struct SliceCursor<T> {
    items: Arc<[T]>,
    pos: Pos,
}

impl<T> Cursor for SliceCursor<T> {
    type Item = T;

    fn advance(&mut self) -> SeqRes<bool> {
        Ok(self.pos.step(self.items.len()).is_some())
    }

    fn current(&self) -> SeqRes<&T> {
        self.pos.index().map(|index| &self.items[index]).ok_or(SeqErr::NoCurrent { cursor: "of" })
    }

    fn release(&mut self) {
        self.pos = Pos::Closed;
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Range {
    start: Integer,
    count: usize,
}

impl Sequence for Range {
    type Item = Integer;
    type Cursor = RangeCursor;

    fn cursor(&self) -> Self::Cursor {
        RangeCursor { next: self.start, remaining: self.count, current: None }
    }
}

#[derive(Debug)]
pub struct RangeCursor {
    next: Integer,
    remaining: usize,
    current: Option<Integer>,
}

impl Cursor for RangeCursor {
    type Item = Integer;

    fn advance(&mut self) -> SeqRes<bool> {
        if self.remaining == 0 {
            self.release();
            return Ok(false);
        }
        self.current = Some(self.next);
        self.remaining -= 1;
        self.next = self.next.wrapping_add(1);
        Ok(true)
    }

    fn current(&self) -> SeqRes<&Integer> {
        self.current.as_ref().ok_or(SeqErr::NoCurrent { cursor: "range" })
    }

    fn release(&mut self) {
        self.remaining = 0;
        self.current = None;
    }
}

#[derive(Debug)]
pub struct Repeat<T> {
    value: Arc<T>,
    count: Option<usize>,
}

impl<T> Clone for Repeat<T> {
    fn clone(&self) -> Self {
        Repeat { value: Arc::clone(&self.value), count: self.count }
    }
}

impl<T> Sequence for Repeat<T> {
    type Item = T;
    type Cursor = RepeatCursor<T>;

    fn cursor(&self) -> Self::Cursor {
        RepeatCursor { value: Arc::clone(&self.value), remaining: self.count, active: false, closed: false }
    }
}

pub struct RepeatCursor<T> {
    value: Arc<T>,
    remaining: Option<usize>,
    active: bool,
    closed: bool,
}

impl<T> Cursor for RepeatCursor<T> {
    type Item = T;

    fn advance(&mut self) -> SeqRes<bool> {
        if self.closed {
            return Ok(false);
        }
        if self.remaining == Some(0) {
            self.release();
            return Ok(false);
        }
        if let Some(remaining) = &mut self.remaining {
            *remaining -= 1;
        }
        self.active = true;
        Ok(true)
    }

    fn current(&self) -> SeqRes<&T> {
        if self.active { Ok(&self.value) } else { Err(SeqErr::NoCurrent { cursor: "repeat" }) }
    }

    fn release(&mut self) {
        self.closed = true;
        self.active = false;
    }
}

#[derive(Debug)]
pub struct OfResults<T> {
    items: Arc<[Result<T, String>]>,
}

impl<T> Clone for OfResults<T> {
    fn clone(&self) -> Self {
        OfResults { items: Arc::clone(&self.items) }
    }
}

impl<T> Sequence for OfResults<T> {
    type Item = T;
    type Cursor = ResultCursor<T>;

    fn cursor(&self) -> Self::Cursor {
        ResultCursor { items: Arc::clone(&self.items), pos: Pos::Unstarted }
    }
}

pub struct ResultCursor<T> {
    items: Arc<[Result<T, String>]>,
    pos: Pos,
}

impl<T> Cursor for ResultCursor<T> {
    type Item = T;

    fn advance(&mut self) -> SeqRes<bool> {
        let Some(index) = self.pos.step(self.items.len()) else {
            return Ok(false);
        };
        match &self.items[index] {
            Ok(_) => Ok(true),
            Err(err) => {
                let err = err.clone();
                self.release();
                Err(SeqErr::Source { index, err })
            }
        }
    }

    fn current(&self) -> SeqRes<&T> {
        match self.pos.index().map(|index| &self.items[index]) {
            Some(Ok(item)) => Ok(item),
            _ => Err(SeqErr::NoCurrent { cursor: "of_results" }),
        }
    }

    fn release(&mut self) {
        self.pos = Pos::Closed;
    }
}

/// 只允许遍历一次的序列，用于确认操作不会重复遍历其上游。
///
/// 第二次获取游标本身不会失败，第二个游标第一次推进时才返回`SeqErr::RunOnceReused`。
/// 克隆得到的序列共享同一个遍历标记。
#[derive(Debug)]
pub struct RunOnce<S> {
    source: S,
    claimed: Arc<AtomicBool>,
}

impl<S> RunOnce<S> {
    pub fn new(source: S) -> Self {
        RunOnce { source, claimed: Arc::new(AtomicBool::new(false)) }
    }
}

impl<S: Clone> Clone for RunOnce<S> {
    fn clone(&self) -> Self {
        RunOnce { source: self.source.clone(), claimed: Arc::clone(&self.claimed) }
    }
}

impl<S: Sequence> Sequence for RunOnce<S> {
    type Item = S::Item;
    type Cursor = RunOnceCursor<S::Cursor>;

    fn cursor(&self) -> Self::Cursor {
        if self.claimed.swap(true, Ordering::SeqCst) {
            RunOnceCursor { state: RunOnceState::Reused }
        } else {
            RunOnceCursor { state: RunOnceState::Live(self.source.cursor()) }
        }
    }
}

pub struct RunOnceCursor<C> {
    state: RunOnceState<C>,
}

enum RunOnceState<C> {
    Live(C),
    /// 来自重复的遍历，推进时报错
    Reused,
    Closed,
}

impl<C: Cursor> Cursor for RunOnceCursor<C> {
    type Item = C::Item;

    fn advance(&mut self) -> SeqRes<bool> {
        match &mut self.state {
            RunOnceState::Live(inner) => inner.advance(),
            RunOnceState::Reused => {
                debug!("run-once sequence enumerated more than once");
                self.state = RunOnceState::Closed;
                Err(SeqErr::RunOnceReused)
            }
            RunOnceState::Closed => Ok(false),
        }
    }

    fn current(&self) -> SeqRes<&C::Item> {
        match &self.state {
            RunOnceState::Live(inner) => inner.current(),
            _ => Err(SeqErr::NoCurrent { cursor: "run_once" }),
        }
    }

    fn release(&mut self) {
        match &mut self.state {
            RunOnceState::Live(inner) => inner.release(),
            _ => self.state = RunOnceState::Closed,
        }
    }
}
