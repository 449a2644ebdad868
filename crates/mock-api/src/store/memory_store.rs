//! 有序内存存储
//!
//! 使用 `RwLock<Vec<T>>` 保留插入顺序，列表接口按生成顺序返回数据。
//! 所有操作只在内存操作期间持有锁，返回的数据均为克隆。

use std::sync::Arc;

use parking_lot::RwLock;

use super::Record;

/// 通用有序内存存储
#[derive(Debug)]
pub struct MemoryStore<T> {
    data: Arc<RwLock<Vec<T>>>,
}

impl<T: Record + Clone> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record + Clone> MemoryStore<T> {
    /// 创建空存储
    pub fn new() -> Self {
        Self::from_vec(Vec::new())
    }

    /// 使用已生成的数据创建存储
    pub fn from_vec(items: Vec<T>) -> Self {
        Self {
            data: Arc::new(RwLock::new(items)),
        }
    }

    /// 追加数据
    pub fn push(&self, item: T) {
        self.data.write().push(item);
    }

    /// 基于当前数量构造并追加数据
    ///
    /// 编号依赖数量时，构造和追加在同一把写锁内完成
    pub fn push_with<F>(&self, build: F) -> T
    where
        F: FnOnce(usize) -> T,
    {
        let mut data = self.data.write();
        let item = build(data.len());
        data.push(item.clone());
        item
    }

    /// 获取数据
    pub fn get(&self, id: &str) -> Option<T> {
        self.data.read().iter().find(|item| item.id() == id).cloned()
    }

    /// 原地修改指定数据，返回修改后的克隆
    pub fn update<F>(&self, id: &str, mutate: F) -> Option<T>
    where
        F: FnOnce(&mut T),
    {
        let mut data = self.data.write();
        let item = data.iter_mut().find(|item| item.id() == id)?;
        mutate(item);
        Some(item.clone())
    }

    /// 修改全部数据
    pub fn update_all<F>(&self, mut mutate: F)
    where
        F: FnMut(&mut T),
    {
        self.data.write().iter_mut().for_each(|item| mutate(item));
    }

    /// 删除数据，返回被删除的数据
    pub fn remove(&self, id: &str) -> Option<T> {
        let mut data = self.data.write();
        let idx = data.iter().position(|item| item.id() == id)?;
        Some(data.remove(idx))
    }

    /// 按插入顺序列出所有数据
    pub fn list(&self) -> Vec<T> {
        self.data.read().clone()
    }

    /// 获取数据总数
    pub fn count(&self) -> usize {
        self.data.read().len()
    }

    /// 检查是否存在指定编号
    pub fn contains(&self, id: &str) -> bool {
        self.data.read().iter().any(|item| item.id() == id)
    }

    /// 在读锁内访问全部数据，避免克隆整个集合
    pub fn read<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&[T]) -> R,
    {
        f(&self.data.read())
    }
}

impl<T> Clone for MemoryStore<T> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }
}
