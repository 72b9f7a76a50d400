//! # ReactiveCell — 轻量响应式值容器
//!
//! 基于 [`tokio::sync::watch`] 实现，支持异步监听和更新值。
//! 写入用 `send_replace`，无论是否有监听者都不会失败；
//! 读取只做一次 clone，无额外堆分配。
//!
//! 引擎用它承载实时传输统计：聚合器每收到一批字节就 `update` 一次，
//! 外部通过 `watch()` 后 `changed().await` 监听。

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::watch;

/// 监听端错误：所有 [`ReactiveCell`] 句柄都已销毁，不会再有新值。
#[derive(Debug, Error)]
#[error("响应式值已被销毁")]
pub struct CellClosed;

/// 轻量响应式值容器。
///
/// 可 Clone，所有克隆共享同一个值；适合高频更新场景（如下载进度）。
#[derive(Clone, Debug)]
pub struct ReactiveCell<T: Clone + Send + Sync> {
    sender: Arc<watch::Sender<T>>,
}

impl<T> ReactiveCell<T>
where
    T: Clone + Send + Sync,
{
    /// 创建一个新的响应式值。
    pub fn new(value: T) -> Self {
        let (sender, _) = watch::channel(value);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// 更新值，所有监听者都会收到通知。
    pub fn update(&self, new_value: T) {
        self.sender.send_replace(new_value);
    }

    /// 获取当前值的快照（会 clone）。
    pub fn get_current(&self) -> T {
        self.sender.borrow().clone()
    }

    /// 创建一个监听器，用于异步监听值的变化。
    pub fn watch(&self) -> CellWatcher<T> {
        CellWatcher {
            receiver: self.sender.subscribe(),
        }
    }
}

/// 值监听器，用于异步接收 [`ReactiveCell`] 的变化。
pub struct CellWatcher<T> {
    receiver: watch::Receiver<T>,
}

impl<T> CellWatcher<T>
where
    T: Clone + Send + Sync,
{
    /// 异步等待值的变化，返回新值；所有写入端销毁后返回 [`CellClosed`]。
    pub async fn changed(&mut self) -> Result<T, CellClosed> {
        self.receiver.changed().await.map_err(|_| CellClosed)?;
        Ok(self.receiver.borrow_and_update().clone())
    }

    /// 同步获取当前值的克隆。
    pub fn borrow(&self) -> T {
        self.receiver.borrow().clone()
    }
}
