//! 游戏逻辑模块
//!
//! 状态存储、选择状态机、升变检测与会话管理

mod input;
mod promotion;
mod selection;
mod session;
mod state;
mod store;

pub use input::*;
pub use promotion::PromotionPrompt;
pub use selection::{ClickAction, Selection};
pub use session::{GameSession, Identity};
pub use state::*;
pub use store::{set, Projection, Store, StoreHost};
