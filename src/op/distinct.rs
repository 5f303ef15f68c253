use crate::SeqRes;
use crate::comparer::EqualityComparer;
use crate::deferred::{Deferred, Generator};
use crate::seq::{Cursor, Sequence};
use rustc_hash::FxHashMap;
use std::marker::PhantomData;
use std::sync::Arc;

/// 按首次出现的顺序输出不重复的元素。
///
/// 已见集合在每次遍历开始时新建，遍历结束即丢弃，同一个`Distinct`多次遍历的结果相同。
pub struct Distinct<S, C> {
    source: S,
    comparer: Arc<C>,
}

impl<S, C> Distinct<S, C> {
    pub fn new(source: S, comparer: C) -> Self {
        Distinct { source, comparer: Arc::new(comparer) }
    }
}

impl<S: Clone, C> Clone for Distinct<S, C> {
    fn clone(&self) -> Self {
        Distinct { source: self.source.clone(), comparer: Arc::clone(&self.comparer) }
    }
}

impl<S, C> Sequence for Distinct<S, C>
where
    S: Sequence + Clone,
    S::Item: Clone,
    C: EqualityComparer<S::Item>,
{
    type Item = S::Item;
    type Cursor = Deferred<DistinctGen<S, C>>;

    fn cursor(&self) -> Self::Cursor {
        Deferred::new(DistinctGen { comparer: Arc::clone(&self.comparer), _marker: PhantomData }, self.source.clone())
    }
}

/// 基于比较器哈希分桶的已见集合，桶内使用比较器判等。
pub struct SeenSet<T> {
    buckets: FxHashMap<u64, Vec<T>>,
}

impl<T> Default for SeenSet<T> {
    fn default() -> Self {
        SeenSet { buckets: FxHashMap::default() }
    }
}

impl<T: Clone> SeenSet<T> {
    /// 首次见到时记录并返回`true`。
    pub fn insert<C: EqualityComparer<T> + ?Sized>(&mut self, value: &T, comparer: &C) -> bool {
        let bucket = self.buckets.entry(comparer.hash(value)).or_default();
        if bucket.iter().any(|seen| comparer.equals(seen, value)) {
            false
        } else {
            bucket.push(value.clone());
            true
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

pub struct DistinctGen<S, C> {
    comparer: Arc<C>,
    _marker: PhantomData<fn() -> S>,
}

impl<S, C> Generator for DistinctGen<S, C>
where
    S: Sequence,
    S::Item: Clone,
    C: EqualityComparer<S::Item>,
{
    const NAME: &'static str = "distinct";
    type Item = S::Item;
    type Pending = S;
    type Running = (S::Cursor, SeenSet<S::Item>);

    fn start(&mut self, source: S) -> Self::Running {
        (source.cursor(), SeenSet::default())
    }

    fn resume(&mut self, (cursor, seen): &mut Self::Running) -> SeqRes<Option<S::Item>> {
        while cursor.advance()? {
            let item = cursor.current()?;
            if seen.insert(item, self.comparer.as_ref()) {
                return Ok(Some(item.clone()));
            }
        }
        Ok(None)
    }

    fn stop(&mut self, (mut cursor, _): Self::Running) {
        cursor.release();
    }
}
