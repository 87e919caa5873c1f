//! Built-in system summary, shown when no fetch tool can be started.

use serde::Serialize;
use sysinfo::{Disks, System};

#[derive(Debug, Clone, Serialize)]
pub struct SystemSummary {
    pub host: String,
    pub os: String,
    pub kernel: String,
    pub uptime_seconds: u64,
    pub cpu_count: usize,
    pub memory_used_mb: u64,
    pub memory_total_mb: u64,
    pub disk_usage_percent: f32,
}

impl SystemSummary {
    pub fn capture() -> Self {
        let mut sys = System::new();
        sys.refresh_memory();
        sys.refresh_cpu();

        let disks = Disks::new_with_refreshed_list();
        let disk_usage_percent = disks
            .iter()
            .find(|disk| disk.mount_point() == std::path::Path::new("/"))
            .or_else(|| disks.iter().next())
            .map(|disk| used_percent(disk.total_space(), disk.available_space()))
            .unwrap_or(0.0);

        let unknown = || "unknown".to_string();
        Self {
            host: System::host_name().unwrap_or_else(unknown),
            os: System::long_os_version().unwrap_or_else(unknown),
            kernel: System::kernel_version().unwrap_or_else(unknown),
            uptime_seconds: System::uptime(),
            cpu_count: sys.cpus().len(),
            memory_used_mb: sys.used_memory() / 1024 / 1024,
            memory_total_mb: sys.total_memory() / 1024 / 1024,
            disk_usage_percent,
        }
    }

    pub fn to_lines(&self) -> Vec<String> {
        vec![
            format!("Host: {}", self.host),
            format!("OS: {}", self.os),
            format!("Kernel: {}", self.kernel),
            format!("Uptime: {}", format_uptime(self.uptime_seconds)),
            format!("CPUs: {}", self.cpu_count),
            format!("Memory: {}/{} MB", self.memory_used_mb, self.memory_total_mb),
            format!("Disk: {:.1}%", self.disk_usage_percent),
        ]
    }
}

fn used_percent(total: u64, available: u64) -> f32 {
    if total == 0 {
        return 0.0;
    }
    (total.saturating_sub(available) as f64 / total as f64 * 100.0) as f32
}

fn format_uptime(seconds: u64) -> String {
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3_600;
    let minutes = (seconds % 3_600) / 60;
    if days > 0 {
        format!("{days}d {hours}h {minutes}m")
    } else {
        format!("{hours}h {minutes}m")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(59), "0h 0m");
        assert_eq!(format_uptime(3_660), "1h 1m");
        assert_eq!(format_uptime(90_061), "1d 1h 1m");
    }

    #[test]
    fn test_used_percent() {
        assert_eq!(used_percent(0, 0), 0.0);
        assert_eq!(used_percent(200, 50), 75.0);
        assert_eq!(used_percent(100, 150), 0.0);
    }

    #[test]
    fn test_capture_lines() {
        let summary = SystemSummary::capture();
        let lines = summary.to_lines();
        assert_eq!(lines.len(), 7);
        assert!(lines[0].starts_with("Host:"));
        assert!(lines.iter().any(|l| l.starts_with("Memory:")));
    }
}
