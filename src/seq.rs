use crate::comparer::{EqualityComparer, Natural};
use crate::op::distinct::Distinct;
use crate::op::element_at::{ElementAt, element_at_or_default};
use crate::op::filter::{Select, Where};
use crate::op::of_type::{AsAny, OfType};
use crate::op::zip::{Zip, Zip3, ZipWith};
use crate::source::RunOnce;
use crate::{Integer, SeqRes};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// 游标：绑定到某个序列的单次、只进遍历句柄。
///
/// 约定：
/// - `advance`返回`false`或游标被释放之后，再次调用`advance`始终返回`false`，且没有任何副作用。
/// - `current`仅在`advance`返回`true`之后有效，其他时候返回`SeqErr::NoCurrent`。
/// - `release`幂等，可以在任何时候调用（包括从未推进过），并级联释放游标持有的全部上游游标。
/// - 游标本身不是线程安全的，同一游标的调用不能并发进行。
pub trait Cursor {
    type Item;

    /// 推进到下一个元素，返回是否存在新的当前元素。
    fn advance(&mut self) -> SeqRes<bool>;

    /// 获取当前元素。
    fn current(&self) -> SeqRes<&Self::Item>;

    /// 释放游标，进入终止状态。
    fn release(&mut self);
}

impl<C: Cursor + ?Sized> Cursor for Box<C> {
    type Item = C::Item;

    fn advance(&mut self) -> SeqRes<bool> {
        (**self).advance()
    }

    fn current(&self) -> SeqRes<&Self::Item> {
        (**self).current()
    }

    fn release(&mut self) {
        (**self).release()
    }
}

/// 序列：描述如何产生元素的不可变声明。
///
/// `cursor`不会修改序列本身，可以被调用任意多次（包括并发调用），每次得到一个独立推进的游标。
/// 唯一的例外是通过`run_once`声明的单次序列。
pub trait Sequence {
    type Item;
    type Cursor: Cursor<Item = Self::Item>;

    /// 获取一个处于未开始状态的新游标。
    fn cursor(&self) -> Self::Cursor;

    /// 如果序列支持O(1)随机访问与长度，返回其底层切片。
    fn as_slice(&self) -> Option<&[Self::Item]> {
        None
    }

    fn iter(&self) -> Iter<Self::Cursor> {
        Iter::new(self.cursor())
    }

    fn to_vec(&self) -> SeqRes<Vec<Self::Item>>
    where
        Self::Item: Clone,
    {
        self.iter().collect()
    }

    fn count(&self) -> SeqRes<usize> {
        if let Some(items) = self.as_slice() {
            return Ok(items.len());
        }
        let mut cursor = self.cursor();
        let mut count = 0;
        while cursor.advance()? {
            count += 1;
        }
        Ok(count)
    }

    fn filter<P>(self, predicate: P) -> Where<Self, P>
    where
        Self: Sized,
        P: Fn(&Self::Item) -> bool,
    {
        Where::new(self, predicate)
    }

    fn map<F, R>(self, selector: F) -> Select<Self, F>
    where
        Self: Sized,
        F: Fn(&Self::Item) -> R,
    {
        Select::new(self, selector)
    }

    fn zip<B>(self, second: B) -> Zip<Self, B>
    where
        Self: Sized,
        Self::Item: Clone,
        B: Sequence,
        B::Item: Clone,
    {
        let selector: fn(&Self::Item, &B::Item) -> (Self::Item, B::Item) = pair;
        ZipWith::new(self, second, selector)
    }

    fn zip_with<B, F, R>(self, second: B, selector: F) -> ZipWith<Self, B, F>
    where
        Self: Sized,
        B: Sequence,
        F: Fn(&Self::Item, &B::Item) -> R,
    {
        ZipWith::new(self, second, selector)
    }

    fn zip3<B, C>(self, second: B, third: C) -> Zip3<Self, B, C>
    where
        Self: Sized,
        B: Sequence,
        C: Sequence,
    {
        Zip3::new(self, second, third)
    }

    fn distinct(self) -> Distinct<Self, Natural>
    where
        Self: Sized,
    {
        Distinct::new(self, Natural)
    }

    fn distinct_by<C>(self, comparer: C) -> Distinct<Self, C>
    where
        Self: Sized,
        C: EqualityComparer<Self::Item>,
    {
        Distinct::new(self, comparer)
    }

    fn of_type<U: 'static>(self) -> OfType<Self, U>
    where
        Self: Sized,
        Self::Item: AsAny,
    {
        OfType::new(self)
    }

    /// 立即求值：获取指定位置的元素，越界或索引为负时返回`None`。
    fn element_at_or_default(&self, index: Integer) -> SeqRes<Option<Self::Item>>
    where
        Self::Item: Clone,
    {
        element_at_or_default(self, index)
    }

    /// 延迟求值：仅包含一个元素（指定位置的元素或`None`）的序列。
    fn element_at(self, index: Integer) -> ElementAt<Self>
    where
        Self: Sized,
    {
        ElementAt::new(self, index)
    }

    fn run_once(self) -> RunOnce<Self>
    where
        Self: Sized,
    {
        RunOnce::new(self)
    }

    fn boxed(self) -> BoxSeq<Self::Item>
    where
        Self: Sized + Send + Sync + 'static,
        Self::Cursor: Send + 'static,
    {
        BoxSeq::new(self)
    }
}

fn pair<A: Clone, B: Clone>(a: &A, b: &B) -> (A, B) {
    (a.clone(), b.clone())
}

/// 将游标适配为标准迭代器，迭代器被丢弃时释放游标。
pub struct Iter<C: Cursor> {
    cursor: C,
    done: bool,
}

impl<C: Cursor> Iter<C> {
    pub fn new(cursor: C) -> Self {
        Iter { cursor, done: false }
    }
}

impl<C> Iterator for Iter<C>
where
    C: Cursor,
    C::Item: Clone,
{
    type Item = SeqRes<C::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.cursor.advance() {
            Ok(true) => Some(self.cursor.current().cloned()),
            Ok(false) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

impl<C: Cursor> Drop for Iter<C> {
    fn drop(&mut self) {
        self.cursor.release();
    }
}

pub type BoxCursor<T> = Box<dyn Cursor<Item = T> + Send>;

trait DynSequence<T>: Send + Sync {
    fn dyn_cursor(&self) -> BoxCursor<T>;

    fn dyn_as_slice(&self) -> Option<&[T]>;
}

impl<S> DynSequence<S::Item> for S
where
    S: Sequence + Send + Sync,
    S::Cursor: Send + 'static,
{
    fn dyn_cursor(&self) -> BoxCursor<S::Item> {
        Box::new(self.cursor())
    }

    fn dyn_as_slice(&self) -> Option<&[S::Item]> {
        self.as_slice()
    }
}

/// 类型擦除的序列，可以廉价克隆并在线程间共享。
pub struct BoxSeq<T> {
    inner: Arc<dyn DynSequence<T>>,
}

impl<T> BoxSeq<T> {
    pub fn new<S>(source: S) -> Self
    where
        S: Sequence<Item = T> + Send + Sync + 'static,
        S::Cursor: Send + 'static,
    {
        BoxSeq { inner: Arc::new(source) }
    }
}

impl<T> Clone for BoxSeq<T> {
    fn clone(&self) -> Self {
        BoxSeq { inner: Arc::clone(&self.inner) }
    }
}

impl<T> Debug for BoxSeq<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoxSeq").finish_non_exhaustive()
    }
}

impl<T> Sequence for BoxSeq<T> {
    type Item = T;
    type Cursor = BoxCursor<T>;

    fn cursor(&self) -> Self::Cursor {
        self.inner.dyn_cursor()
    }

    fn as_slice(&self) -> Option<&[T]> {
        self.inner.dyn_as_slice()
    }
}
