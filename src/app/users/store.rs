//! 用户内存存储

use std::{
    collections::BTreeMap,
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use super::model::{NewUser, User};

/// 进程内共享的用户存储
///
/// 记录与 id 计数器放在同一把锁里，分配 id 和写入是同一个临界区。
/// 克隆得到的是同一份数据的句柄。
#[derive(Clone, Default)]
pub struct UserStore {
    inner: Arc<RwLock<StoreInner>>,
}

struct StoreInner {
    users: BTreeMap<i64, User>,
    next_id: i64,
}

impl Default for StoreInner {
    fn default() -> Self {
        Self {
            users: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    // 锁内只有普通数据，任何操作都不会留下半写状态，中毒后直接继续使用
    fn read(&self) -> RwLockReadGuard<'_, StoreInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn list(&self) -> Vec<User> {
        self.read().users.values().cloned().collect()
    }

    pub fn get(&self, id: i64) -> Option<User> {
        self.read().users.get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.read().users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 分配下一个 id 并写入，id 从 1 开始递增，删除后也不会复用
    pub fn create(&self, new_user: NewUser) -> User {
        let mut inner = self.write();
        let id = inner.next_id;
        inner.next_id += 1;

        let user = new_user.with_id(id);
        inner.users.insert(id, user.clone());
        user
    }

    /// 整体替换指定 id 的记录；id 不存在时直接插入，不影响 id 计数器
    pub fn replace(&self, id: i64, new_user: NewUser) -> User {
        let user = new_user.with_id(id);
        self.write().users.insert(id, user.clone());
        user
    }

    /// 删除记录，不存在时什么也不做
    pub fn delete(&self, id: i64) -> Option<User> {
        self.write().users.remove(&id)
    }

    /// 按姓名子串（区分大小写）过滤后分页
    pub fn search(&self, name: Option<&str>, page: usize, size: usize) -> Vec<User> {
        self.read()
            .users
            .values()
            .filter(|user| name.map_or(true, |name| user.name.contains(name)))
            .skip(page.saturating_mul(size))
            .take(size)
            .cloned()
            .collect()
    }
}
