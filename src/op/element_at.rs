use crate::deferred::{Deferred, Generator};
use crate::seq::{Cursor, Sequence};
use crate::{Integer, SeqRes};
use std::marker::PhantomData;

/// 获取指定位置的元素。
///
/// - 索引为负：直接返回`None`，不会打开上游。
/// - 上游支持随机访问：直接按切片取值。
/// - 否则推进新游标至多`index + 1`次，不会越过目标位置，结束后释放游标。
pub fn element_at_or_default<S>(source: &S, index: Integer) -> SeqRes<Option<S::Item>>
where
    S: Sequence + ?Sized,
    S::Item: Clone,
{
    let Ok(index) = usize::try_from(index) else {
        return Ok(None);
    };
    if let Some(items) = source.as_slice() {
        return Ok(items.get(index).cloned());
    }
    let mut cursor = source.cursor();
    let found = seek(&mut cursor, index);
    cursor.release();
    found
}

fn seek<C>(cursor: &mut C, index: usize) -> SeqRes<Option<C::Item>>
where
    C: Cursor,
    C::Item: Clone,
{
    for _ in 0..index {
        if !cursor.advance()? {
            return Ok(None);
        }
    }
    if cursor.advance()? { Ok(Some(cursor.current()?.clone())) } else { Ok(None) }
}

/// 延迟的位置访问：遍历时恰好产生一个元素，即指定位置的元素或`None`。
#[derive(Debug, Clone)]
pub struct ElementAt<S> {
    source: S,
    index: Integer,
}

impl<S> ElementAt<S> {
    pub fn new(source: S, index: Integer) -> Self {
        ElementAt { source, index }
    }
}

impl<S> Sequence for ElementAt<S>
where
    S: Sequence + Clone,
    S::Item: Clone,
{
    type Item = Option<S::Item>;
    type Cursor = Deferred<ElementAtGen<S>>;

    fn cursor(&self) -> Self::Cursor {
        Deferred::new(ElementAtGen { index: self.index, _marker: PhantomData }, self.source.clone())
    }
}

pub struct ElementAtGen<S> {
    index: Integer,
    _marker: PhantomData<fn() -> S>,
}

impl<S> Generator for ElementAtGen<S>
where
    S: Sequence,
    S::Item: Clone,
{
    const NAME: &'static str = "element_at";
    type Item = Option<S::Item>;
    type Pending = S;
    type Running = Option<S>;

    fn start(&mut self, source: S) -> Option<S> {
        Some(source)
    }

    fn resume(&mut self, running: &mut Option<S>) -> SeqRes<Option<Self::Item>> {
        match running.take() {
            Some(source) => element_at_or_default(&source, self.index).map(Some),
            None => Ok(None),
        }
    }

    fn stop(&mut self, _: Option<S>) {}
}
