//! 用户模块：模型、存储与处理器

pub mod handler;
pub mod model;
pub mod store;

pub use model::{NewUser, User, UserPayload};
pub use store::UserStore;
