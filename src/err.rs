use thiserror::Error;

#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum SeqErr {
    #[error("[Missing Arg] At least one value for argument `{arg}` is required for op `{op}`")]
    MissingArg { op: &'static str, arg: &'static str },

    #[error("[Bad Arg] At most {max} values for argument `{arg}` are allowed for op `{op}`, got {got}")]
    TooManyArgs { op: &'static str, arg: &'static str, max: usize, got: usize },

    #[error("[Contract] No current element on cursor `{cursor}`, `advance` must return true first")]
    NoCurrent { cursor: &'static str },

    #[error("[Contract] Run-once sequence enumerated more than once")]
    RunOnceReused,

    #[error("[Source] Read element `{index}` from source error: {err}")]
    Source { index: usize, err: String },
}

impl SeqErr {
    /// 是否为调用方违反游标协议导致的错误。
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, SeqErr::NoCurrent { .. } | SeqErr::RunOnceReused)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            "[Missing Arg] At least one value for argument `with` is required for op `zip`",
            SeqErr::MissingArg { op: "zip", arg: "with" }.to_string()
        );
        assert_eq!(
            "[Source] Read element `3` from source error: broken",
            SeqErr::Source { index: 3, err: "broken".to_string() }.to_string()
        );
    }

    #[test]
    fn test_is_contract_violation() {
        assert!(SeqErr::RunOnceReused.is_contract_violation());
        assert!(SeqErr::NoCurrent { cursor: "zip" }.is_contract_violation());
        assert!(!SeqErr::MissingArg { op: "zip", arg: "with" }.is_contract_violation());
        assert!(!SeqErr::Source { index: 0, err: String::new() }.is_contract_violation());
    }
}
