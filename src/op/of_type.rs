use crate::SeqRes;
use crate::deferred::{Deferred, Generator};
use crate::seq::{Cursor, Sequence};
use std::any::Any;
use std::marker::PhantomData;
use std::sync::Arc;

/// 可在运行时检查具体类型的元素。
///
/// 返回`None`表示空值，空值不属于任何类型。
pub trait AsAny {
    fn as_any(&self) -> Option<&dyn Any>;
}

impl AsAny for Box<dyn Any + Send + Sync> {
    fn as_any(&self) -> Option<&dyn Any> {
        let any: &dyn Any = &**self;
        Some(any)
    }
}

impl AsAny for Arc<dyn Any + Send + Sync> {
    fn as_any(&self) -> Option<&dyn Any> {
        let any: &dyn Any = &**self;
        Some(any)
    }
}

impl<T: AsAny> AsAny for Option<T> {
    fn as_any(&self) -> Option<&dyn Any> {
        self.as_ref().and_then(AsAny::as_any)
    }
}

/// 仅保留具体类型恰好为`U`的元素，按原顺序输出。
pub struct OfType<S, U> {
    source: S,
    _marker: PhantomData<fn() -> U>,
}

impl<S, U> OfType<S, U> {
    pub fn new(source: S) -> Self {
        OfType { source, _marker: PhantomData }
    }
}

impl<S: Clone, U> Clone for OfType<S, U> {
    fn clone(&self) -> Self {
        OfType::new(self.source.clone())
    }
}

impl<S, U> Sequence for OfType<S, U>
where
    S: Sequence + Clone,
    S::Item: AsAny,
    U: Clone + 'static,
{
    type Item = U;
    type Cursor = Deferred<OfTypeGen<S, U>>;

    fn cursor(&self) -> Self::Cursor {
        Deferred::new(OfTypeGen { _marker: PhantomData }, self.source.clone())
    }
}

pub struct OfTypeGen<S, U> {
    _marker: PhantomData<fn() -> (S, U)>,
}

impl<S, U> Generator for OfTypeGen<S, U>
where
    S: Sequence,
    S::Item: AsAny,
    U: Clone + 'static,
{
    const NAME: &'static str = "of_type";
    type Item = U;
    type Pending = S;
    type Running = S::Cursor;

    fn start(&mut self, source: S) -> S::Cursor {
        source.cursor()
    }

    fn resume(&mut self, cursor: &mut S::Cursor) -> SeqRes<Option<U>> {
        while cursor.advance()? {
            if let Some(item) = cursor.current()?.as_any().and_then(|any| any.downcast_ref::<U>()) {
                return Ok(Some(item.clone()));
            }
        }
        Ok(None)
    }

    fn stop(&mut self, mut cursor: S::Cursor) {
        cursor.release();
    }
}
