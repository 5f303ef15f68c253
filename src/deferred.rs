use crate::SeqRes;
use crate::err::SeqErr;
use crate::seq::Cursor;
use std::mem;
use tracing::trace;

/// 延迟操作的生成逻辑，由`Deferred`驱动其状态机。
///
/// `Pending`是未开始遍历时持有的上游声明，`Running`是遍历中独占的上游游标及操作自身的状态。
pub trait Generator {
    /// 操作名称，用于日志和错误信息。
    const NAME: &'static str;

    type Item;
    type Pending;
    type Running;

    /// 打开上游游标，仅在第一次推进时调用一次。
    fn start(&mut self, pending: Self::Pending) -> Self::Running;

    /// 产生下一个元素，`None`表示已耗尽。
    fn resume(&mut self, running: &mut Self::Running) -> SeqRes<Option<Self::Item>>;

    /// 释放运行状态持有的全部上游游标。
    fn stop(&mut self, running: Self::Running);
}

enum Phase<P, R> {
    Unstarted(P),
    Running(R),
    Closed,
}

/// 所有延迟操作共用的游标。
///
/// - 未开始：第一次`advance`打开上游，并在同一次调用中继续产生第一个元素。
/// - 运行中：每次`advance`恢复生成逻辑；耗尽或上游出错时先释放上游再返回。
/// - 已关闭：`advance`始终返回`false`。
///
/// 被丢弃时自动释放，中途放弃的遍历不会泄漏上游游标。
pub struct Deferred<G: Generator> {
    generator: G,
    phase: Phase<G::Pending, G::Running>,
    current: Option<G::Item>,
}

impl<G: Generator> Deferred<G> {
    pub fn new(generator: G, pending: G::Pending) -> Self {
        Deferred { generator, phase: Phase::Unstarted(pending), current: None }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.phase, Phase::Closed)
    }
}

impl<G: Generator> Cursor for Deferred<G> {
    type Item = G::Item;

    fn advance(&mut self) -> SeqRes<bool> {
        self.phase = match mem::replace(&mut self.phase, Phase::Closed) {
            Phase::Unstarted(pending) => {
                trace!(op = G::NAME, "open upstream");
                Phase::Running(self.generator.start(pending))
            }
            phase => phase,
        };
        let resumed = match &mut self.phase {
            Phase::Running(running) => self.generator.resume(running),
            _ => return Ok(false),
        };
        match resumed {
            Ok(Some(item)) => {
                self.current = Some(item);
                Ok(true)
            }
            Ok(None) => {
                self.release();
                Ok(false)
            }
            Err(err) => {
                self.release();
                Err(err)
            }
        }
    }

    fn current(&self) -> SeqRes<&Self::Item> {
        self.current.as_ref().ok_or(SeqErr::NoCurrent { cursor: G::NAME })
    }

    fn release(&mut self) {
        self.current = None;
        if let Phase::Running(running) = mem::replace(&mut self.phase, Phase::Closed) {
            self.generator.stop(running);
            trace!(op = G::NAME, "released");
        }
    }
}

impl<G: Generator> Drop for Deferred<G> {
    fn drop(&mut self) {
        self.release();
    }
}
