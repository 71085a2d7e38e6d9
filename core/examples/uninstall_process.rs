// workstate/examples/uninstall_process.rs

use workstate::{Subject, Workstate, WorkstateError};
use tracing::info;

// 1. Define the subject the process will drive.
#[derive(Debug)]
struct Server {
  status: String,
  disks: u32,
  vm_present: bool,
}

impl Subject for Server {
  fn status(&self) -> &str {
    &self.status
  }

  fn set_status(&mut self, raw: String) {
    self.status = raw;
  }

  fn save(&mut self) -> anyhow::Result<()> {
    // A real subject would persist here (database row, API call, ...).
    Ok(())
  }
}

fn main() -> Result<(), WorkstateError> {
  // Initialize tracing (optional, for demonstration)
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Uninstall Process Example ---");

  // 2. Create an engine for the subject type and register the callables the
  //    specification refers to.
  let engine: Workstate<Server> = Workstate::new();

  engine.register_action("remove_disks", |server: &mut Server| {
    info!("removing {} disks", server.disks);
    server.disks = 0;
    Ok(())
  });
  engine.register_action("destroy_vm", |server: &mut Server| {
    info!("destroying virtual machine");
    server.vm_present = false;
    Ok(())
  });
  engine.register_action("erase_data", |_server: &mut Server| {
    info!("erasing remaining data");
    Ok(())
  });
  engine.register_guard("machine_exists", |server: &mut Server| Ok(server.vm_present));

  engine.register_hook("notify_start", |_server: &mut Server| {
    info!("uninstall starting");
    Ok(())
  });

  // 3. Define the process in a single configuration pass.
  engine.define_process("uninstall", |p| {
    p.must_be("deactivated")
      .before("notify_start")
      .transition("remove_disks", "deactivated", "diskless")
      .transition_if("destroy_vm", "diskless", "vm_destroyed", "machine_exists")
      .transition("erase_data", "vm_destroyed", "uninstalled")
      .accept_state("down", "deactivated");
  });

  // 4. Audit every invocation, whatever the process.
  engine.register_global_after_hook(|server: &mut Server| {
    info!(status = %server.status, "process finished");
  });

  // 5. Drive a subject through the chain. The raw status may use any casing.
  let mut server = Server {
    status: "DEACTIVATED".to_string(),
    disks: 4,
    vm_present: true,
  };

  let final_state = engine.run("uninstall", &mut server)?;
  info!(%final_state, raw = %server.status, "chain completed");

  // Re-invoking on a finished subject is an error here, because the process
  // has a precondition and `uninstalled` is no transition origin.
  match engine.run("uninstall", &mut server) {
    Err(WorkstateError::InvalidInitialState { .. }) => info!("already uninstalled, as expected"),
    other => info!(?other, "unexpected outcome"),
  }

  Ok(())
}
