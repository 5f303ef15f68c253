use rustc_hash::FxBuildHasher;
use std::hash::{BuildHasher, Hash};
use unicase::UniCase;

/// 可插拔的相等性约定，供`Distinct`等操作使用。
///
/// 实现必须保持一致：`equals(a, b)`为`true`时`hash(a) == hash(b)`，否则去重结果不可靠。
pub trait EqualityComparer<T: ?Sized> {
    fn equals(&self, left: &T, right: &T) -> bool;

    fn hash(&self, value: &T) -> u64;
}

/// 使用类型自身的`Eq`与`Hash`。
#[derive(Debug, Clone, Copy, Default)]
pub struct Natural;

impl<T: Hash + Eq + ?Sized> EqualityComparer<T> for Natural {
    fn equals(&self, left: &T, right: &T) -> bool {
        left == right
    }

    fn hash(&self, value: &T) -> u64 {
        FxBuildHasher.hash_one(value)
    }
}

/// 忽略大小写比较文本。
#[derive(Debug, Clone, Copy, Default)]
pub struct IgnoreCase;

impl<T: AsRef<str> + ?Sized> EqualityComparer<T> for IgnoreCase {
    fn equals(&self, left: &T, right: &T) -> bool {
        UniCase::new(left.as_ref()) == UniCase::new(right.as_ref())
    }

    fn hash(&self, value: &T) -> u64 {
        FxBuildHasher.hash_one(UniCase::new(value.as_ref()))
    }
}

/// 按照提取出的键比较。
#[derive(Debug, Clone, Copy)]
pub struct ByKey<F>(F);

pub fn by_key<T: ?Sized, K, F>(key: F) -> ByKey<F>
where
    K: Hash + Eq,
    F: Fn(&T) -> K,
{
    ByKey(key)
}

impl<T, K, F> EqualityComparer<T> for ByKey<F>
where
    T: ?Sized,
    K: Hash + Eq,
    F: Fn(&T) -> K,
{
    fn equals(&self, left: &T, right: &T) -> bool {
        (self.0)(left) == (self.0)(right)
    }

    fn hash(&self, value: &T) -> u64 {
        FxBuildHasher.hash_one((self.0)(value))
    }
}
