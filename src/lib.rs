//! rseq：延迟求值的序列查询引擎。
//!
//! 每个操作只描述如何产生元素，直到游标被推进时才向上游逐个拉取数据，中间结果不会被物化。
//! 同一条流水线可以被多次、甚至并发地遍历，每次遍历都持有互相独立的游标。

pub mod comparer;
pub mod config;
pub mod deferred;
pub mod err;
pub mod op;
pub mod pipe;
pub mod seq;
pub mod source;
pub mod value;

#[cfg(test)]
mod test_utils;

pub use comparer::{ByKey, EqualityComparer, IgnoreCase, Natural, by_key};
pub use config::Config;
pub use deferred::{Deferred, Generator};
pub use err::SeqErr;
pub use op::Op;
pub use op::of_type::AsAny;
pub use pipe::Pipe;
pub use seq::{BoxCursor, BoxSeq, Cursor, Iter, Sequence};
pub use source::{empty, of, of_results, range, repeat};
pub use value::{Kind, Value, ValueComparer};

/// 整数类型
pub type Integer = i64;

/// 浮点数类型
pub type Float = f64;

pub type SeqRes<T> = Result<T, SeqErr>;

pub type PipeRes = SeqRes<Pipe>;
