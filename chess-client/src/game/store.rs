//! 状态存储与投影注册表
//!
//! 写入某字段后，按注册顺序同步执行该字段的投影，再执行全局投影（状态栏）。
//! 投影可以写入其他字段，嵌套写入的投影在外层 `set` 返回前深度优先执行完毕。

use std::collections::HashMap;
use std::rc::Rc;

use super::state::{Field, FieldValue, GameState};

/// 投影：字段写入后的同步回调
pub type Projection<C> = Rc<dyn Fn(&mut C, &FieldValue)>;

/// 持有存储的上下文
pub trait StoreHost: Sized {
    fn store(&self) -> &Store<Self>;
    fn store_mut(&mut self) -> &mut Store<Self>;
}

/// 状态存储
pub struct Store<C> {
    state: GameState,
    projections: HashMap<Field, Vec<Projection<C>>>,
    /// 每次写入后都执行的投影
    always: Vec<Projection<C>>,
    /// 正在执行投影的字段（检测环）
    in_flight: Vec<Field>,
}

impl<C> Default for Store<C> {
    fn default() -> Self {
        Self {
            state: GameState::default(),
            projections: HashMap::new(),
            always: Vec::new(),
            in_flight: Vec::new(),
        }
    }
}

impl<C> Store<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 为字段注册投影（追加到末尾）
    pub fn register(&mut self, field: Field, projection: Projection<C>) {
        self.projections.entry(field).or_default().push(projection);
    }

    /// 注册每次写入后都执行的投影
    pub fn register_always(&mut self, projection: Projection<C>) {
        self.always.push(projection);
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn get(&self, field: Field) -> FieldValue {
        self.state.get(field)
    }

    fn projections_for(&self, field: Field) -> Vec<Projection<C>> {
        self.projections.get(&field).cloned().unwrap_or_default()
    }
}

/// 写入字段并同步执行投影
pub fn set<C: StoreHost>(ctx: &mut C, value: FieldValue) {
    let field = value.field();
    let store = ctx.store_mut();
    store.state.apply(value.clone());

    if store.in_flight.contains(&field) {
        // 环上的写入只落值，不再触发本字段投影；全局投影照常执行
        tracing::warn!("Projection cycle on {:?}, skipping nested projections", field);
    } else {
        store.in_flight.push(field);
        let projections = store.projections_for(field);
        for projection in projections {
            projection(ctx, &value);
        }
        ctx.store_mut().in_flight.pop();
    }

    let always = ctx.store().always.clone();
    for projection in always {
        projection(ctx, &value);
    }
}
