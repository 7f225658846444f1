use parking_lot::Mutex;

/// 进程级请求计数器
///
/// 读取与自增在同一个临界区内完成，并发调用方拿到的值互不重复且连续。
#[derive(Debug, Default)]
pub struct RequestCounter {
    count: Mutex<u64>,
}

impl RequestCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 计数加一并返回本次请求对应的序号
    pub fn increment(&self) -> u64 {
        let mut count = self.count.lock();
        *count += 1;
        *count
    }

    pub fn current(&self) -> u64 {
        *self.count.lock()
    }
}
