// tests/common/mod.rs
#![allow(dead_code)] // Allow unused fixtures in this common test module

use tracing::Level;
use workstate::{Subject, Workstate};

// --- Common Subject ---

/// The canonical test subject: a virtual machine being decommissioned.
#[derive(Debug, Default)]
pub struct VirtualMachine {
  pub status: String,
  pub exists: bool,
  pub saves: usize,
  pub fail_save: bool,
  pub log: Vec<String>,
}

impl VirtualMachine {
  pub fn with_status(status: &str) -> Self {
    Self {
      status: status.to_string(),
      exists: true,
      ..Default::default()
    }
  }
}

impl Subject for VirtualMachine {
  fn status(&self) -> &str {
    &self.status
  }

  fn set_status(&mut self, raw: String) {
    self.status = raw;
  }

  fn save(&mut self) -> anyhow::Result<()> {
    if self.fail_save {
      anyhow::bail!("storage unavailable");
    }
    self.saves += 1;
    Ok(())
  }
}

// --- Common Engine Setup ---

/// Engine wired with the `uninstall` process over
/// deactivated → diskless → vm_destroyed → uninstalled, with `destroy_vm`
/// gated on `machine_exists`.
pub fn uninstall_engine() -> Workstate<VirtualMachine> {
  let engine = Workstate::new();
  register_uninstall_steps(&engine);
  define_uninstall_process(&engine);
  engine
}

pub fn register_uninstall_steps(engine: &Workstate<VirtualMachine>) {
  engine.register_action("remove_disks", |vm: &mut VirtualMachine| {
    vm.log.push("remove_disks".to_string());
    Ok(())
  });
  engine.register_action("destroy_vm", |vm: &mut VirtualMachine| {
    vm.log.push("destroy_vm".to_string());
    Ok(())
  });
  engine.register_action("erase_data", |vm: &mut VirtualMachine| {
    vm.log.push("erase_data".to_string());
    Ok(())
  });
  engine.register_guard("machine_exists", |vm: &mut VirtualMachine| Ok(vm.exists));
}

pub fn define_uninstall_process(engine: &Workstate<VirtualMachine>) {
  engine.define_process("uninstall", |p| {
    p.must_be("deactivated")
      .transition("remove_disks", "deactivated", "diskless")
      .transition_if("destroy_vm", "diskless", "vm_destroyed", "machine_exists")
      .transition("erase_data", "vm_destroyed", "uninstalled");
  });
}

// --- Helper for Tracing Setup (call once per test run if needed) ---

use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
