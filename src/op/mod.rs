pub mod distinct;
pub mod element_at;
pub mod filter;
pub mod of_type;
pub mod zip;

use crate::config::{Config, is_nocase, is_verbose};
use crate::err::SeqErr;
use crate::pipe::Pipe;
use crate::seq::Sequence;
use crate::value::{Kind, ValueComparer};
use crate::{Float, Integer, PipeRes, Value};
use tracing::debug;

/// `Zip`最多可以额外组合的流水线数量
const ZIP_MAX_WITH: usize = 2;

#[derive(Debug, Clone)]
pub enum Op {
    /* **************************************** 减少 **************************************** */
    /// 去重，保留每个值首次出现的位置，多个空值只保留第一个。
    /// `nocase`为`true`或配置了`Config::Nocase`时，字符串忽略大小写比较。
    Distinct { nocase: bool },
    /// 仅保留指定类型的值，空值总是被丢弃。
    OfType(Kind),
    /// 得到只含一个值的流水线：指定位置的值，位置为负或越界时为`Value::Null`。
    ElementAt { index: Integer },
    /* **************************************** 组合 **************************************** */
    /// 按位置将当前流水线与`with`中的流水线组合为`Value::List`，长度取最短者。
    /// `with`至少包含一个、至多包含两个流水线，否则`wrap`返回错误。
    Zip { with: Vec<Pipe> },
}

impl Op {
    pub fn new_distinct(nocase: bool) -> Op {
        Op::Distinct { nocase }
    }
    pub fn new_zip(with: Vec<Pipe>) -> Op {
        Op::Zip { with }
    }
    pub fn new_element_at(index: Integer) -> Op {
        Op::ElementAt { index }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Op::Distinct { .. } => "distinct",
            Op::OfType(_) => "oftype",
            Op::ElementAt { .. } => "at",
            Op::Zip { .. } => "zip",
        }
    }

    /// 将操作应用到流水线上，得到新的流水线，此时不会遍历任何上游。
    pub fn wrap(self, pipe: Pipe, configs: &[Config]) -> PipeRes {
        if is_verbose(configs) {
            debug!(op = self.name(), "wrap pipe");
        }
        match self {
            Op::Distinct { nocase } => {
                Ok(Pipe::new(pipe.distinct_by(ValueComparer::new(is_nocase(nocase, configs)))))
            }
            Op::OfType(kind) => Ok(match kind {
                Kind::Bool => Pipe::new(pipe.of_type::<bool>().map(|b| Value::Bool(*b))),
                Kind::Integer => Pipe::new(pipe.of_type::<Integer>().map(|i| Value::Integer(*i))),
                Kind::Float => Pipe::new(pipe.of_type::<Float>().map(|f| Value::from(*f))),
                Kind::String => Pipe::new(pipe.of_type::<String>().map(|s| Value::String(s.clone()))),
                Kind::List => Pipe::new(pipe.of_type::<Vec<Value>>().map(|items| Value::List(items.clone()))),
            }),
            Op::ElementAt { index } => {
                Ok(Pipe::new(pipe.element_at(index).map(|value| value.clone().unwrap_or_default())))
            }
            Op::Zip { with } => {
                let got = with.len();
                let mut with = with.into_iter();
                match (with.next(), with.next()) {
                    (None, _) => Err(SeqErr::MissingArg { op: "zip", arg: "with" }),
                    _ if got > ZIP_MAX_WITH => {
                        Err(SeqErr::TooManyArgs { op: "zip", arg: "with", max: ZIP_MAX_WITH, got })
                    }
                    (Some(second), None) => {
                        Ok(Pipe::new(pipe.zip_with(second, |a, b| Value::List(vec![a.clone(), b.clone()]))))
                    }
                    (Some(second), Some(third)) => Ok(Pipe::new(
                        pipe.zip3(second, third).map(|(a, b, c)| Value::List(vec![a.clone(), b.clone(), c.clone()])),
                    )),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{of, of_results};

    fn values(values: impl IntoIterator<Item = impl Into<Value>>) -> Vec<Value> {
        values.into_iter().map(Into::into).collect()
    }

    fn mixed() -> Pipe {
        Pipe::of([
            Value::from(10),
            Value::from("a"),
            Value::from(3.5),
            Value::Null,
            Value::from("b"),
            Value::from(4),
            Value::from(true),
        ])
    }

    #[test]
    fn test_distinct() {
        let pipe = Pipe::of([Value::from(1), Value::from(1), Value::from(2), Value::Null, Value::Null]);
        let result = Op::new_distinct(false).wrap(pipe, &[]).unwrap();
        assert_eq!(Ok(vec![Value::from(1), Value::from(2), Value::Null]), result.collect_values());
    }

    #[test]
    fn test_distinct_nocase() {
        let pipe = Pipe::of(["Bob", "alice", "BOB", "Alice"]);
        let result = Op::new_distinct(true).wrap(pipe.clone(), &[]).unwrap();
        assert_eq!(Ok(values(["Bob", "alice"])), result.collect_values());
        let result = Op::new_distinct(false).wrap(pipe.clone(), &[Config::Nocase]).unwrap();
        assert_eq!(Ok(values(["Bob", "alice"])), result.collect_values());
        let result = Op::new_distinct(false).wrap(pipe, &[]).unwrap();
        assert_eq!(Ok(4), result.count());
    }

    #[test]
    fn test_of_type() {
        let result = Op::OfType(Kind::Integer).wrap(mixed(), &[]).unwrap();
        assert_eq!(Ok(values([10, 4])), result.collect_values());
        let result = Op::OfType(Kind::String).wrap(mixed(), &[]).unwrap();
        assert_eq!(Ok(values(["a", "b"])), result.collect_values());
        let result = Op::OfType(Kind::Float).wrap(mixed(), &[Config::Verbose]).unwrap();
        assert_eq!(Ok(values([3.5])), result.collect_values());
        let result = Op::OfType(Kind::Bool).wrap(mixed(), &[]).unwrap();
        assert_eq!(Ok(values([true])), result.collect_values());
        let result = Op::OfType(Kind::List).wrap(mixed(), &[]).unwrap();
        assert_eq!(Ok(vec![]), result.collect_values());
    }

    #[test]
    fn test_of_type_idempotent() {
        let once = Op::OfType(Kind::Integer).wrap(mixed(), &[]).unwrap();
        let twice = Op::OfType(Kind::Integer).wrap(once.clone(), &[]).unwrap();
        assert_eq!(once.collect_values(), twice.collect_values());
    }

    #[test]
    fn test_element_at() {
        let pipe = Pipe::of([9, 8, 0, -5, 10]);
        let result = Op::new_element_at(4).wrap(pipe.clone(), &[]).unwrap();
        assert_eq!(Ok(values([10])), result.collect_values());
        let result = Op::new_element_at(-1).wrap(pipe.clone(), &[]).unwrap();
        assert_eq!(Ok(vec![Value::Null]), result.collect_values());
        let result = Op::new_element_at(5).wrap(pipe, &[]).unwrap();
        assert_eq!(Ok(vec![Value::Null]), result.collect_values());
        let result = Op::new_element_at(0).wrap(Pipe::of(Vec::<Value>::new()), &[]).unwrap();
        assert_eq!(Ok(vec![Value::Null]), result.collect_values());
    }

    #[test]
    fn test_zip() {
        let result = Op::new_zip(vec![Pipe::of([4, 5])]).wrap(Pipe::of([1, 2, 3]), &[]).unwrap();
        let expected = vec![Value::from(values([1, 4])), Value::from(values([2, 5]))];
        assert_eq!(Ok(expected), result.collect_values());

        let result = Op::new_zip(vec![Pipe::of(["a", "b"]), Pipe::of([true])]).wrap(Pipe::of([1, 2]), &[]).unwrap();
        let expected = vec![Value::List(vec![Value::from(1), Value::from("a"), Value::from(true)])];
        assert_eq!(Ok(expected), result.collect_values());
    }

    #[test]
    fn test_zip_args() {
        assert_eq!(
            Err(SeqErr::MissingArg { op: "zip", arg: "with" }),
            Op::new_zip(vec![]).wrap(Pipe::of([1]), &[]).map(|_| ())
        );
        let with = vec![Pipe::of([1]), Pipe::of([2]), Pipe::of([3])];
        assert_eq!(
            Err(SeqErr::TooManyArgs { op: "zip", arg: "with", max: 2, got: 3 }),
            Op::new_zip(with).wrap(Pipe::of([1]), &[]).map(|_| ())
        );
    }

    #[test]
    fn test_wrap_is_lazy() {
        let failing = Pipe::new(of_results([Ok(Value::from(1)), Err("broken".to_string())]));
        let result = Op::new_distinct(false).wrap(failing, &[]).unwrap();
        let result = Op::new_zip(vec![Pipe::new(of(values([1, 2, 3])))]).wrap(result, &[]).unwrap();
        assert_eq!(Err(SeqErr::Source { index: 1, err: "broken".to_string() }), result.collect_values());
    }

    #[test]
    fn test_chained_ops() {
        let pipe = Pipe::of([Value::from(3), Value::from("x"), Value::from(3), Value::from(7), Value::Null]);
        let pipe = Op::OfType(Kind::Integer).wrap(pipe, &[]).unwrap();
        let pipe = Op::new_distinct(false).wrap(pipe, &[]).unwrap();
        let pipe = Op::new_element_at(1).wrap(pipe, &[]).unwrap();
        assert_eq!(Ok(values([7])), pipe.collect_values());
        assert_eq!(pipe.collect_values(), pipe.collect_values());
    }
}
