//! Process and resource monitors backed by `sysinfo`.

use std::fmt::Write as _;
use std::thread;

use sysinfo::{Disks, System, MINIMUM_CPU_UPDATE_INTERVAL};

use super::{Command, CommandError, CommandOutput};
use crate::core::context::ExecutionContext;

const GIB: f64 = 1024.0 * 1024.0 * 1024.0;
const DEFAULT_PS_LIMIT: usize = 20;

fn gib(bytes: u64) -> f64 {
    bytes as f64 / GIB
}

fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

#[derive(Clone)]
pub struct CpuCommand;

impl Command for CpuCommand {
    fn execute(
        &self,
        _args: &[String],
        _ctx: &mut ExecutionContext,
    ) -> Result<CommandOutput, CommandError> {
        let mut sys = System::new();
        // usage is a delta between two samples
        sys.refresh_cpu();
        thread::sleep(MINIMUM_CPU_UPDATE_INTERVAL);
        sys.refresh_cpu();

        let cpus = sys.cpus();
        if cpus.is_empty() {
            return Err(CommandError::ExecutionFailure(
                "cpu: no processor information available".to_string(),
            ));
        }

        let mut out = String::new();
        let _ = writeln!(out, "CPU Usage: {:.1}%", sys.global_cpu_info().cpu_usage());
        let _ = writeln!(out, "CPU Cores: {}", cpus.len());
        if let Some(physical) = sys.physical_core_count() {
            let _ = writeln!(out, "Physical Cores: {}", physical);
        }
        let frequency = cpus[0].frequency();
        if frequency > 0 {
            let _ = writeln!(out, "CPU Frequency: {:.2} MHz", frequency as f64);
        }
        Ok(CommandOutput::text(out))
    }
}

#[derive(Clone)]
pub struct MemCommand;

impl Command for MemCommand {
    fn execute(
        &self,
        _args: &[String],
        _ctx: &mut ExecutionContext,
    ) -> Result<CommandOutput, CommandError> {
        let mut sys = System::new();
        sys.refresh_memory();

        let total = sys.total_memory();
        let used = sys.used_memory();
        let mut out = String::new();
        let _ = writeln!(out, "Memory Usage: {:.1}%", percent(used, total));
        let _ = writeln!(out, "Total Memory: {:.2} GB", gib(total));
        let _ = writeln!(out, "Available Memory: {:.2} GB", gib(sys.available_memory()));
        let _ = writeln!(out, "Used Memory: {:.2} GB", gib(used));
        let _ = writeln!(
            out,
            "Swap Usage: {:.1}%",
            percent(sys.used_swap(), sys.total_swap())
        );
        Ok(CommandOutput::text(out))
    }
}

#[derive(Clone)]
pub struct PsCommand;

impl Command for PsCommand {
    fn execute(
        &self,
        args: &[String],
        _ctx: &mut ExecutionContext,
    ) -> Result<CommandOutput, CommandError> {
        let limit = match args.first() {
            Some(raw) => raw
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| {
                    CommandError::InvalidArguments(format!("ps: invalid limit '{}'", raw))
                })?,
            None => DEFAULT_PS_LIMIT,
        };

        let mut sys = System::new();
        sys.refresh_memory();
        sys.refresh_processes();
        let total_memory = sys.total_memory();

        let mut processes: Vec<_> = sys.processes().values().collect();
        processes.sort_by_key(|p| p.pid().as_u32());

        let mut out = String::new();
        let _ = writeln!(out, "{:<8} {:<20} {:<8} {:<10}", "PID", "Name", "CPU%", "Memory%");
        let _ = writeln!(out, "{}", "-".repeat(50));
        for process in processes.iter().take(limit) {
            let _ = writeln!(
                out,
                "{:<8} {:<20} {:<8.1} {:<10.1}",
                process.pid().as_u32(),
                process.name(),
                process.cpu_usage(),
                percent(process.memory(), total_memory)
            );
        }
        if processes.len() > limit {
            let _ = writeln!(out, "... and {} more processes", processes.len() - limit);
        }
        Ok(CommandOutput::text(out))
    }
}

#[derive(Clone)]
pub struct DiskCommand;

impl Command for DiskCommand {
    fn execute(
        &self,
        _args: &[String],
        _ctx: &mut ExecutionContext,
    ) -> Result<CommandOutput, CommandError> {
        let disks = Disks::new_with_refreshed_list();
        let list = disks.list();
        let root = list
            .iter()
            .find(|d| d.mount_point() == std::path::Path::new("/"))
            .or_else(|| list.first())
            .ok_or_else(|| {
                CommandError::ExecutionFailure("disk: no mounted filesystems found".to_string())
            })?;

        let total = root.total_space();
        let used = total.saturating_sub(root.available_space());

        let mut out = String::new();
        let _ = writeln!(out, "Disk Usage ({}):", root.mount_point().display());
        let _ = writeln!(out, "Total: {:.2} GB", gib(total));
        let _ = writeln!(out, "Used: {:.2} GB", gib(used));
        let _ = writeln!(out, "Free: {:.2} GB", gib(root.available_space()));
        let _ = writeln!(out, "Usage: {:.1}%\n", percent(used, total));

        let _ = writeln!(out, "Partitions:");
        let _ = writeln!(
            out,
            "{:<15} {:<20} {:<10} {:<12} {:<12} {:<12}",
            "Device", "Mountpoint", "Fstype", "Total", "Used", "Free"
        );
        let _ = writeln!(out, "{}", "-".repeat(80));
        for disk in list {
            let total = disk.total_space();
            let free = disk.available_space();
            let _ = writeln!(
                out,
                "{:<15} {:<20} {:<10} {:<12.1} {:<12.1} {:<12.1}",
                disk.name().to_string_lossy(),
                disk.mount_point().display(),
                disk.file_system().to_string_lossy(),
                gib(total),
                gib(total.saturating_sub(free)),
                gib(free)
            );
        }
        Ok(CommandOutput::text(out))
    }
}
