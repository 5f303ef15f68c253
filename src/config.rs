#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Config {
    /// 全局忽略大小写，作用于`Op::Distinct`等文本比较
    Nocase,
    /// 装配流水线时记录每个操作
    Verbose,
}

#[inline]
pub(crate) fn is_nocase(nocase: bool, configs: &[Config]) -> bool {
    nocase || configs.contains(&Config::Nocase)
}

#[inline]
pub(crate) fn is_verbose(configs: &[Config]) -> bool {
    configs.contains(&Config::Verbose)
}
