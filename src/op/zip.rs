use crate::SeqRes;
use crate::deferred::{Deferred, Generator};
use crate::seq::{Cursor, Sequence};
use std::marker::PhantomData;
use std::sync::Arc;

/// 按位置将两个序列组合为二元组，长度取较短者。
pub type Zip<A, B> = ZipWith<
    A,
    B,
    fn(&<A as Sequence>::Item, &<B as Sequence>::Item) -> (<A as Sequence>::Item, <B as Sequence>::Item),
>;

/// 按位置使用`selector`组合两个序列的元素。
///
/// 每轮依次推进两个上游，任意一个耗尽即终止并释放全部上游游标，包括本轮尚未推进的游标。
/// `selector`在两个上游都成功推进后，对每个输出元素调用一次。
pub struct ZipWith<A, B, F> {
    first: A,
    second: B,
    selector: Arc<F>,
}

impl<A, B, F> ZipWith<A, B, F> {
    pub fn new(first: A, second: B, selector: F) -> Self {
        ZipWith { first, second, selector: Arc::new(selector) }
    }
}

impl<A: Clone, B: Clone, F> Clone for ZipWith<A, B, F> {
    fn clone(&self) -> Self {
        ZipWith { first: self.first.clone(), second: self.second.clone(), selector: Arc::clone(&self.selector) }
    }
}

impl<A, B, F, R> Sequence for ZipWith<A, B, F>
where
    A: Sequence + Clone,
    B: Sequence + Clone,
    F: Fn(&A::Item, &B::Item) -> R,
{
    type Item = R;
    type Cursor = Deferred<ZipWithGen<A, B, F>>;

    fn cursor(&self) -> Self::Cursor {
        let generator = ZipWithGen { selector: Arc::clone(&self.selector), _marker: PhantomData };
        Deferred::new(generator, (self.first.clone(), self.second.clone()))
    }
}

pub struct ZipWithGen<A, B, F> {
    selector: Arc<F>,
    _marker: PhantomData<fn() -> (A, B)>,
}

impl<A, B, F, R> Generator for ZipWithGen<A, B, F>
where
    A: Sequence,
    B: Sequence,
    F: Fn(&A::Item, &B::Item) -> R,
{
    const NAME: &'static str = "zip";
    type Item = R;
    type Pending = (A, B);
    type Running = (A::Cursor, B::Cursor);

    fn start(&mut self, (first, second): Self::Pending) -> Self::Running {
        (first.cursor(), second.cursor())
    }

    fn resume(&mut self, (first, second): &mut Self::Running) -> SeqRes<Option<R>> {
        if first.advance()? && second.advance()? {
            Ok(Some((self.selector)(first.current()?, second.current()?)))
        } else {
            Ok(None)
        }
    }

    fn stop(&mut self, (mut first, mut second): Self::Running) {
        first.release();
        second.release();
    }
}

/// 按位置将三个序列组合为三元组，长度取最短者。
#[derive(Debug, Clone)]
pub struct Zip3<A, B, C> {
    first: A,
    second: B,
    third: C,
}

impl<A, B, C> Zip3<A, B, C> {
    pub fn new(first: A, second: B, third: C) -> Self {
        Zip3 { first, second, third }
    }
}

impl<A, B, C> Sequence for Zip3<A, B, C>
where
    A: Sequence + Clone,
    B: Sequence + Clone,
    C: Sequence + Clone,
    A::Item: Clone,
    B::Item: Clone,
    C::Item: Clone,
{
    type Item = (A::Item, B::Item, C::Item);
    type Cursor = Deferred<Zip3Gen<A, B, C>>;

    fn cursor(&self) -> Self::Cursor {
        Deferred::new(Zip3Gen { _marker: PhantomData }, (self.first.clone(), self.second.clone(), self.third.clone()))
    }
}

pub struct Zip3Gen<A, B, C> {
    _marker: PhantomData<fn() -> (A, B, C)>,
}

impl<A, B, C> Generator for Zip3Gen<A, B, C>
where
    A: Sequence,
    B: Sequence,
    C: Sequence,
    A::Item: Clone,
    B::Item: Clone,
    C::Item: Clone,
{
    const NAME: &'static str = "zip3";
    type Item = (A::Item, B::Item, C::Item);
    type Pending = (A, B, C);
    type Running = (A::Cursor, B::Cursor, C::Cursor);

    fn start(&mut self, (first, second, third): Self::Pending) -> Self::Running {
        (first.cursor(), second.cursor(), third.cursor())
    }

    fn resume(&mut self, (first, second, third): &mut Self::Running) -> SeqRes<Option<Self::Item>> {
        if first.advance()? && second.advance()? && third.advance()? {
            Ok(Some((first.current()?.clone(), second.current()?.clone(), third.current()?.clone())))
        } else {
            Ok(None)
        }
    }

    fn stop(&mut self, (mut first, mut second, mut third): Self::Running) {
        first.release();
        second.release();
        third.release();
    }
}
