use crate::SeqRes;
use crate::seq::{BoxCursor, BoxSeq, Sequence};
use crate::source::of;
use crate::value::Value;

/// 由`Value`组成的类型擦除流水线，可以廉价克隆并多次遍历。
#[derive(Debug, Clone)]
pub struct Pipe {
    seq: BoxSeq<Value>,
}

impl Pipe {
    pub fn new<S>(seq: S) -> Pipe
    where
        S: Sequence<Item = Value> + Send + Sync + 'static,
        S::Cursor: Send + 'static,
    {
        Pipe { seq: seq.boxed() }
    }

    pub fn of(values: impl IntoIterator<Item = impl Into<Value>>) -> Pipe {
        Pipe::new(of(values.into_iter().map(Into::into)))
    }

    pub fn op_map(self, f: impl Fn(&Value) -> Value + Send + Sync + 'static) -> Pipe {
        Pipe::new(self.seq.map(f))
    }

    pub fn op_filter(self, f: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Pipe {
        Pipe::new(self.seq.filter(f))
    }

    pub fn collect_values(&self) -> SeqRes<Vec<Value>> {
        self.seq.to_vec()
    }
}

impl Sequence for Pipe {
    type Item = Value;
    type Cursor = BoxCursor<Value>;

    fn cursor(&self) -> Self::Cursor {
        self.seq.cursor()
    }

    fn as_slice(&self) -> Option<&[Value]> {
        self.seq.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::range;

    #[test]
    fn test_of() {
        let pipe = Pipe::of([1, 2, 3]);
        assert_eq!(Ok(vec![Value::from(1), Value::from(2), Value::from(3)]), pipe.collect_values());
        assert_eq!(Some(3), pipe.as_slice().map(<[Value]>::len));
    }

    #[test]
    fn test_op_map_filter() {
        let pipe = Pipe::new(range(0, 6).map(|i| Value::Integer(*i)))
            .op_filter(|v| matches!(v, Value::Integer(i) if i % 2 == 0))
            .op_map(|v| Value::String(format!("#{v}")));
        assert_eq!(Ok(vec![Value::from("#0"), Value::from("#2"), Value::from("#4")]), pipe.collect_values());
        assert_eq!(pipe.collect_values(), pipe.clone().collect_values());
        assert!(pipe.as_slice().is_none());
    }
}
