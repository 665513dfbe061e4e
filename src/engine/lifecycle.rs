// ==========================================
// 预制混凝土质量控制 - 记录生命周期管理
// ==========================================
// 状态机: DECLARED --transition--> TESTED (终态，不可回退)
//         MANUAL / WITNESSED 创建即终态 (created_at == terminal_at)
// ==========================================
// 红线: 记录要么在待检集合、要么在已完成集合，不会同时出现或同时缺失
// 红线: 编辑窗口以最近一次状态变化时间起算，修改不重置窗口
// 红线: 单次判定只读取一次当前时间
// ==========================================

use chrono::{Duration, NaiveDateTime};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::action_log::{ActionLog, ActionType};
use crate::domain::reading::ReadingFilter;
use crate::domain::record::{LifecyclePayload, Record, RecordView};
use crate::domain::types::RecordState;
use crate::engine::clock::Clock;
use crate::engine::error::{LifecycleError, LifecycleResult};

/// 默认编辑窗口 (分钟)
pub const DEFAULT_EDIT_WINDOW_MINUTES: i64 = 60;

// ==========================================
// Ledger - 记录集
// ==========================================
/// 单模块记录集，由报表门面持有
///
/// 待检 (pending) 与已完成 (completed) 两个集合均按插入顺序保存
#[derive(Debug)]
pub struct Ledger<P> {
    clock: Arc<dyn Clock>,
    edit_window: Duration,
    pending: Vec<Record<P>>,
    completed: Vec<Record<P>>,
    history: Vec<ActionLog>,
}

impl<P: LifecyclePayload> Ledger<P> {
    pub fn new(clock: Arc<dyn Clock>, edit_window: Duration) -> Self {
        Self {
            clock,
            edit_window,
            pending: Vec::new(),
            completed: Vec::new(),
            history: Vec::new(),
        }
    }

    pub fn with_window_minutes(clock: Arc<dyn Clock>, minutes: i64) -> Self {
        Self::new(clock, Duration::minutes(minutes))
    }

    pub fn edit_window(&self) -> Duration {
        self.edit_window
    }

    // ==========================================
    // 创建
    // ==========================================

    /// 申报: 新建初始态记录，进入待检集合
    pub fn declare(&mut self, payload: P) -> Record<P> {
        let now = self.clock.now();
        let record = Record {
            id: Uuid::new_v4().to_string(),
            payload,
            state: RecordState::Declared,
            created_at: now,
            terminal_at: None,
            source_id: None,
        };

        info!(record_id = %record.id, "记录已申报");
        self.log(&record.id, ActionType::Declare, now, None, Some(RecordState::Declared));
        self.pending.push(record.clone());
        record
    }

    /// 人工录入: 创建即终态
    pub fn record_manual(&mut self, payload: P) -> Record<P> {
        let now = self.clock.now();
        let record = self.finalize_new(payload, RecordState::Manual, None, now);
        info!(record_id = %record.id, "人工记录已录入");
        self.log(&record.id, ActionType::RecordManual, now, None, Some(RecordState::Manual));
        record
    }

    /// 见证: 复制来源读数字段，创建即终态
    ///
    /// 等价于申报后立即流转，两步共用同一时间点；同一来源只能见证一次
    pub fn witness(&mut self, source_id: &str, payload: P) -> LifecycleResult<Record<P>> {
        if let Some(existing) = self
            .completed
            .iter()
            .find(|r| r.source_id.as_deref() == Some(source_id))
        {
            warn!(source_id = %source_id, record_id = %existing.id, "来源读数重复见证");
            return Err(LifecycleError::DuplicateSource {
                source_id: source_id.to_string(),
                record_id: existing.id.clone(),
            });
        }

        let now = self.clock.now();
        let source = Some(source_id.to_string());
        let record = self.finalize_new(payload, RecordState::Witnessed, source, now);
        info!(record_id = %record.id, source_id = %source_id, "见证记录已创建");
        self.log(&record.id, ActionType::Witness, now, None, Some(RecordState::Witnessed));
        Ok(record)
    }

    fn finalize_new(
        &mut self,
        payload: P,
        state: RecordState,
        source_id: Option<String>,
        now: NaiveDateTime,
    ) -> Record<P> {
        let record = Record {
            id: Uuid::new_v4().to_string(),
            payload,
            state,
            created_at: now,
            terminal_at: Some(now),
            source_id,
        };
        self.completed.push(record.clone());
        record
    }

    // ==========================================
    // 状态流转
    // ==========================================

    /// 检测完成: DECLARED -> TESTED
    ///
    /// 合并检测结果，设置 terminal_at 并开始新的编辑窗口；
    /// 记录在同一次 &mut 调用内从待检集合移入已完成集合
    pub fn transition(&mut self, id: &str, outcome: P::Outcome) -> LifecycleResult<Record<P>> {
        let idx = match self.pending.iter().position(|r| r.id == id) {
            Some(idx) => idx,
            None => {
                return Err(match self.completed.iter().find(|r| r.id == id) {
                    Some(done) => {
                        warn!(record_id = %id, state = %done.state, "终态记录不可再次流转");
                        LifecycleError::InvalidState {
                            record_id: id.to_string(),
                            state: done.state,
                        }
                    }
                    None => LifecycleError::NotFound {
                        record_id: id.to_string(),
                    },
                });
            }
        };

        let now = self.clock.now();
        let mut record = self.pending.remove(idx);
        record.payload.merge_outcome(outcome);
        record.state = RecordState::Tested;
        record.terminal_at = Some(now);

        info!(record_id = %id, "记录已检测");
        self.log(
            id,
            ActionType::Transition,
            now,
            Some(RecordState::Declared),
            Some(RecordState::Tested),
        );
        self.completed.push(record.clone());
        Ok(record)
    }

    // ==========================================
    // 编辑窗口
    // ==========================================

    /// now - 起算时间 < 编辑窗口
    pub fn can_modify(&self, record: &Record<P>) -> bool {
        self.can_modify_at(record, self.clock.now())
    }

    pub fn can_modify_at(&self, record: &Record<P>, now: NaiveDateTime) -> bool {
        now - record.reference_timestamp() < self.edit_window
    }

    /// 修改: 仅在编辑窗口内允许，不重置窗口
    pub fn modify<F>(&mut self, id: &str, patch: F) -> LifecycleResult<Record<P>>
    where
        F: FnOnce(&mut P),
    {
        let now = self.clock.now();
        let window = self.edit_window;
        let record = self.find_mut(id)?;

        if now - record.reference_timestamp() >= window {
            return Err(Self::denied(record, window));
        }

        patch(&mut record.payload);
        let state = record.state;
        let updated = record.clone();

        info!(record_id = %id, "记录已修改");
        self.log(id, ActionType::Modify, now, Some(state), Some(state));
        Ok(updated)
    }

    /// 删除: 仅在编辑窗口内允许
    pub fn delete(&mut self, id: &str) -> LifecycleResult<Record<P>> {
        let now = self.clock.now();
        let window = self.edit_window;

        let (in_pending, idx) = match self.pending.iter().position(|r| r.id == id) {
            Some(idx) => (true, idx),
            None => match self.completed.iter().position(|r| r.id == id) {
                Some(idx) => (false, idx),
                None => {
                    return Err(LifecycleError::NotFound {
                        record_id: id.to_string(),
                    })
                }
            },
        };

        let collection = if in_pending { &mut self.pending } else { &mut self.completed };
        if now - collection[idx].reference_timestamp() >= window {
            return Err(Self::denied(&collection[idx], window));
        }
        let removed = collection.remove(idx);

        info!(record_id = %id, "记录已删除");
        self.log(id, ActionType::Delete, now, Some(removed.state), None);
        Ok(removed)
    }

    fn denied(record: &Record<P>, window: Duration) -> LifecycleError {
        warn!(record_id = %record.id, "编辑窗口已过，记录已锁定");
        LifecycleError::PermissionDenied {
            record_id: record.id.clone(),
            reference_at: record.reference_timestamp(),
            window_minutes: window.num_minutes(),
        }
    }

    // ==========================================
    // 查询
    // ==========================================

    pub fn get(&self, id: &str) -> Option<&Record<P>> {
        self.pending
            .iter()
            .chain(self.completed.iter())
            .find(|r| r.id == id)
    }

    fn find_mut(&mut self, id: &str) -> LifecycleResult<&mut Record<P>> {
        self.pending
            .iter_mut()
            .chain(self.completed.iter_mut())
            .find(|r| r.id == id)
            .ok_or_else(|| LifecycleError::NotFound {
                record_id: id.to_string(),
            })
    }

    pub fn pending(&self) -> &[Record<P>] {
        &self.pending
    }

    pub fn completed(&self) -> &[Record<P>] {
        &self.completed
    }

    pub fn len(&self) -> usize {
        self.pending.len() + self.completed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 全部记录视图（待检在前），可编辑标记共用同一时间点
    pub fn views(&self, filter: &ReadingFilter) -> Vec<RecordView<P>> {
        let now = self.clock.now();
        self.pending
            .iter()
            .chain(self.completed.iter())
            .filter(|r| filter.matches(r.payload.group_keys()))
            .map(|r| RecordView {
                record: r.clone(),
                can_modify: self.can_modify_at(r, now),
            })
            .collect()
    }

    /// 操作日志
    pub fn history(&self) -> &[ActionLog] {
        &self.history
    }

    fn log(
        &mut self,
        record_id: &str,
        action_type: ActionType,
        action_ts: NaiveDateTime,
        state_before: Option<RecordState>,
        state_after: Option<RecordState>,
    ) {
        self.history.push(ActionLog {
            record_id: record_id.to_string(),
            action_type,
            action_ts,
            state_before,
            state_after,
        });
    }
}

// ==========================================
// SharedLedger - 并发环境下的记录集
// ==========================================
/// 以互斥锁串行化 transition / modify / delete
#[derive(Debug)]
pub struct SharedLedger<P> {
    inner: Arc<Mutex<Ledger<P>>>,
}

impl<P> Clone for SharedLedger<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P: LifecyclePayload> SharedLedger<P> {
    pub fn new(ledger: Ledger<P>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ledger)),
        }
    }

    fn lock(&self) -> LifecycleResult<MutexGuard<'_, Ledger<P>>> {
        self.inner
            .lock()
            .map_err(|e| LifecycleError::LockPoisoned(e.to_string()))
    }

    pub fn declare(&self, payload: P) -> LifecycleResult<Record<P>> {
        Ok(self.lock()?.declare(payload))
    }

    pub fn record_manual(&self, payload: P) -> LifecycleResult<Record<P>> {
        Ok(self.lock()?.record_manual(payload))
    }

    pub fn witness(&self, source_id: &str, payload: P) -> LifecycleResult<Record<P>> {
        self.lock()?.witness(source_id, payload)
    }

    pub fn transition(&self, id: &str, outcome: P::Outcome) -> LifecycleResult<Record<P>> {
        self.lock()?.transition(id, outcome)
    }

    pub fn modify<F>(&self, id: &str, patch: F) -> LifecycleResult<Record<P>>
    where
        F: FnOnce(&mut P),
    {
        self.lock()?.modify(id, patch)
    }

    pub fn delete(&self, id: &str) -> LifecycleResult<Record<P>> {
        self.lock()?.delete(id)
    }

    pub fn can_modify(&self, id: &str) -> LifecycleResult<bool> {
        let ledger = self.lock()?;
        let record = ledger.get(id).ok_or_else(|| LifecycleError::NotFound {
            record_id: id.to_string(),
        })?;
        Ok(ledger.can_modify(record))
    }

    pub fn views(&self, filter: &ReadingFilter) -> LifecycleResult<Vec<RecordView<P>>> {
        Ok(self.lock()?.views(filter))
    }

    pub fn get(&self, id: &str) -> LifecycleResult<Option<Record<P>>> {
        Ok(self.lock()?.get(id).cloned())
    }

    /// 已完成记录快照
    pub fn completed(&self, filter: &ReadingFilter) -> LifecycleResult<Vec<Record<P>>> {
        let ledger = self.lock()?;
        Ok(filter.apply(ledger.completed()).into_iter().cloned().collect())
    }

    pub fn history(&self) -> LifecycleResult<Vec<ActionLog>> {
        Ok(self.lock()?.history().to_vec())
    }

    pub fn edit_window(&self) -> LifecycleResult<Duration> {
        Ok(self.lock()?.edit_window())
    }

    /// 待检 / 已完成数量
    pub fn counts(&self) -> LifecycleResult<(usize, usize)> {
        let ledger = self.lock()?;
        Ok((ledger.pending().len(), ledger.completed().len()))
    }
}
