use crate::SeqRes;
use crate::deferred::{Deferred, Generator};
use crate::seq::{Cursor, Sequence};
use std::marker::PhantomData;
use std::sync::Arc;

/// 仅保留满足条件的元素。
pub struct Where<S, P> {
    source: S,
    predicate: Arc<P>,
}

impl<S, P> Where<S, P> {
    pub fn new(source: S, predicate: P) -> Self {
        Where { source, predicate: Arc::new(predicate) }
    }
}

impl<S: Clone, P> Clone for Where<S, P> {
    fn clone(&self) -> Self {
        Where { source: self.source.clone(), predicate: Arc::clone(&self.predicate) }
    }
}

impl<S, P> Sequence for Where<S, P>
where
    S: Sequence + Clone,
    S::Item: Clone,
    P: Fn(&S::Item) -> bool,
{
    type Item = S::Item;
    type Cursor = Deferred<WhereGen<S, P>>;

    fn cursor(&self) -> Self::Cursor {
        Deferred::new(WhereGen { predicate: Arc::clone(&self.predicate), _marker: PhantomData }, self.source.clone())
    }
}

pub struct WhereGen<S, P> {
    predicate: Arc<P>,
    _marker: PhantomData<fn() -> S>,
}

impl<S, P> Generator for WhereGen<S, P>
where
    S: Sequence,
    S::Item: Clone,
    P: Fn(&S::Item) -> bool,
{
    const NAME: &'static str = "filter";
    type Item = S::Item;
    type Pending = S;
    type Running = S::Cursor;

    fn start(&mut self, source: S) -> S::Cursor {
        source.cursor()
    }

    fn resume(&mut self, cursor: &mut S::Cursor) -> SeqRes<Option<S::Item>> {
        while cursor.advance()? {
            let item = cursor.current()?;
            if (self.predicate)(item) {
                return Ok(Some(item.clone()));
            }
        }
        Ok(None)
    }

    fn stop(&mut self, mut cursor: S::Cursor) {
        cursor.release();
    }
}

/// 将每个元素映射为新的值。
pub struct Select<S, F> {
    source: S,
    selector: Arc<F>,
}

impl<S, F> Select<S, F> {
    pub fn new(source: S, selector: F) -> Self {
        Select { source, selector: Arc::new(selector) }
    }
}

impl<S: Clone, F> Clone for Select<S, F> {
    fn clone(&self) -> Self {
        Select { source: self.source.clone(), selector: Arc::clone(&self.selector) }
    }
}

impl<S, F, R> Sequence for Select<S, F>
where
    S: Sequence + Clone,
    F: Fn(&S::Item) -> R,
{
    type Item = R;
    type Cursor = Deferred<SelectGen<S, F>>;

    fn cursor(&self) -> Self::Cursor {
        Deferred::new(SelectGen { selector: Arc::clone(&self.selector), _marker: PhantomData }, self.source.clone())
    }
}

pub struct SelectGen<S, F> {
    selector: Arc<F>,
    _marker: PhantomData<fn() -> S>,
}

impl<S, F, R> Generator for SelectGen<S, F>
where
    S: Sequence,
    F: Fn(&S::Item) -> R,
{
    const NAME: &'static str = "map";
    type Item = R;
    type Pending = S;
    type Running = S::Cursor;

    fn start(&mut self, source: S) -> S::Cursor {
        source.cursor()
    }

    fn resume(&mut self, cursor: &mut S::Cursor) -> SeqRes<Option<R>> {
        if cursor.advance()? { Ok(Some((self.selector)(cursor.current()?))) } else { Ok(None) }
    }

    fn stop(&mut self, mut cursor: S::Cursor) {
        cursor.release();
    }
}
