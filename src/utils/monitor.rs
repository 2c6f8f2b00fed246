#[cfg(feature = "cli")]
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
#[cfg(feature = "cli")]
use std::sync::Mutex;
#[cfg(feature = "cli")]
use std::time::{Duration, Instant};
#[cfg(feature = "cli")]
use sysinfo::{Pid, ProcessesToUpdate, System};

/// 某個批次結束時的行程資源快照
#[cfg(feature = "cli")]
#[derive(Debug, Clone)]
pub struct BatchSnapshot {
    pub cpu_usage: f32,
    pub memory_mb: u64,
    pub peak_memory_mb: u64,
    pub products_so_far: usize,
    pub elapsed: Duration,
}

#[cfg(feature = "cli")]
impl BatchSnapshot {
    pub fn products_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.products_so_far as f64 / secs
        } else {
            0.0
        }
    }
}

/// 同步期間的 CPU / 記憶體 / 吞吐量觀測，每個批次結束後記錄一次
#[cfg(feature = "cli")]
pub struct SystemMonitor {
    system: Mutex<System>,
    pid: Option<Pid>,
    started: Instant,
    peak_memory_mb: AtomicU64,
    products: AtomicUsize,
    enabled: bool,
}

#[cfg(feature = "cli")]
impl SystemMonitor {
    pub fn new(enabled: bool) -> Self {
        Self {
            system: Mutex::new(System::new()),
            pid: sysinfo::get_current_pid().ok(),
            started: Instant::now(),
            peak_memory_mb: AtomicU64::new(0),
            products: AtomicUsize::new(0),
            enabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// 累計已處理商品數並取一次快照；停用或取不到行程資訊時回傳 `None`
    pub fn snapshot_after_batch(&self, batch_products: usize) -> Option<BatchSnapshot> {
        if !self.enabled {
            return None;
        }
        let products_so_far = self.products.fetch_add(batch_products, Ordering::Relaxed) + batch_products;

        let pid = self.pid?;
        let mut system = self.system.lock().ok()?;
        system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
        let process = system.process(pid)?;

        let memory_mb = process.memory() / 1024 / 1024;
        let peak = self.peak_memory_mb.fetch_max(memory_mb, Ordering::Relaxed).max(memory_mb);

        Some(BatchSnapshot {
            cpu_usage: process.cpu_usage(),
            memory_mb,
            peak_memory_mb: peak,
            products_so_far,
            elapsed: self.started.elapsed(),
        })
    }

    pub fn record_batch(&self, index: usize, total: usize, batch_products: usize) {
        if let Some(snapshot) = self.snapshot_after_batch(batch_products) {
            tracing::info!(
                "📊 Batch {}/{} - CPU: {:.1}%, Memory: {}MB (peak {}MB), {} products in {:?} ({:.1}/s)",
                index,
                total,
                snapshot.cpu_usage,
                snapshot.memory_mb,
                snapshot.peak_memory_mb,
                snapshot.products_so_far,
                snapshot.elapsed,
                snapshot.products_per_second()
            );
        }
    }

    pub fn log_summary(&self) {
        if !self.enabled {
            return;
        }
        tracing::info!(
            "📊 Sync resources - Total Time: {:?}, Peak Memory: {}MB, Products: {}",
            self.started.elapsed(),
            self.peak_memory_mb.load(Ordering::Relaxed),
            self.products.load(Ordering::Relaxed)
        );
    }
}

#[cfg(feature = "cli")]
impl Default for SystemMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}

// 非 CLI 建置沒有 sysinfo，全部為空操作
#[cfg(not(feature = "cli"))]
#[derive(Default)]
pub struct SystemMonitor;

#[cfg(not(feature = "cli"))]
impl SystemMonitor {
    pub fn new(_enabled: bool) -> Self {
        Self
    }

    pub fn is_enabled(&self) -> bool {
        false
    }

    pub fn record_batch(&self, _index: usize, _total: usize, _batch_products: usize) {}

    pub fn log_summary(&self) {}
}
