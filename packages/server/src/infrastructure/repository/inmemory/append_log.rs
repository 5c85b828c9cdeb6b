//! 追記専用の順序付きログ
//!
//! History Store と Activity Log の共通部分。削除・更新の操作は持ちません。

use tokio::sync::Mutex;

/// 追記専用ログ
///
/// 追記はロック内で行われるため、並行な追記も 1 つの全順序に直列化されます。
#[derive(Debug)]
pub(crate) struct AppendOnlyLog<T> {
    entries: Mutex<Vec<T>>,
}

impl<T: Clone> AppendOnlyLog<T> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }

    /// ロックを保持したままエントリを生成して末尾に追記する
    ///
    /// `build` にはこのエントリの位置（0 始まり）が渡されます。時刻などをロック内で
    /// 採番することで、追記順と時刻順が食い違わないようにします。
    pub async fn append_with<F>(&self, build: F) -> T
    where
        F: FnOnce(usize) -> T,
    {
        let mut entries = self.entries.lock().await;
        let entry = build(entries.len());
        entries.push(entry.clone());
        entry
    }

    /// 追記順のコピーを返す
    pub async fn snapshot(&self) -> Vec<T> {
        self.entries.lock().await.clone()
    }
}

impl<T: Clone> Default for AppendOnlyLog<T> {
    fn default() -> Self {
        Self::new()
    }
}
