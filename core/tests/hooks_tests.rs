// tests/hooks_tests.rs
mod common;

use common::*;
use workstate::{Workstate, WorkstateError};

fn engine_with_before_after() -> Workstate<VirtualMachine> {
  let engine = Workstate::new();
  register_uninstall_steps(&engine);
  engine.register_hook("notify_start", |vm: &mut VirtualMachine| {
    vm.log.push("notify_start".to_string());
    Ok(())
  });
  engine.register_hook("notify_end", |vm: &mut VirtualMachine| {
    vm.log.push("notify_end".to_string());
    Ok(())
  });
  engine.define_process("uninstall", |p| {
    p.must_be("deactivated")
      .before("notify_start")
      .after("notify_end")
      .transition("remove_disks", "deactivated", "diskless")
      .transition_if("destroy_vm", "diskless", "vm_destroyed", "machine_exists")
      .transition("erase_data", "vm_destroyed", "uninstalled");
  });
  engine
}

#[test]
fn before_and_after_hooks_bracket_the_invocation_once() {
  setup_tracing();
  let engine = engine_with_before_after();
  let mut vm = VirtualMachine::with_status("DEACTIVATED");

  engine.run("uninstall", &mut vm).unwrap();

  assert_eq!(
    vm.log,
    vec!["notify_start", "remove_disks", "destroy_vm", "erase_data", "notify_end"]
  );
}

#[test]
fn before_hook_runs_before_the_precondition_check() {
  setup_tracing();
  let engine = engine_with_before_after();
  let mut vm = VirtualMachine::with_status("ACTIVATED");

  let err = engine.run("uninstall", &mut vm).unwrap_err();

  assert!(matches!(err, WorkstateError::InvalidInitialState { .. }));
  // The before hook already ran; nothing after the check did.
  assert_eq!(vm.log, vec!["notify_start"]);
}

#[test]
fn after_hook_still_fires_when_a_guard_declines() {
  setup_tracing();
  let engine = engine_with_before_after();
  let mut vm = VirtualMachine::with_status("DEACTIVATED");
  vm.exists = false;

  engine.run("uninstall", &mut vm).unwrap();

  // A declining guard is a natural termination, so the after hook runs.
  assert_eq!(vm.log, vec!["notify_start", "remove_disks", "notify_end"]);
}

#[test]
fn after_hook_does_not_fire_when_an_action_fails() {
  setup_tracing();
  let engine = engine_with_before_after();
  engine.register_action("destroy_vm", |_vm: &mut VirtualMachine| {
    anyhow::bail!("hypervisor is gone")
  });
  let mut vm = VirtualMachine::with_status("DEACTIVATED");

  engine.run("uninstall", &mut vm).unwrap_err();

  assert_eq!(vm.log, vec!["notify_start", "remove_disks"]);
}

#[test]
fn failing_before_hook_aborts_before_any_transition() {
  setup_tracing();
  let engine = engine_with_before_after();
  engine.register_hook("notify_start", |_vm: &mut VirtualMachine| {
    anyhow::bail!("pager is down")
  });
  let mut vm = VirtualMachine::with_status("DEACTIVATED");

  let err = engine.run("uninstall", &mut vm).unwrap_err();

  match err {
    WorkstateError::HookFailure { hook, .. } => assert_eq!(hook, "notify_start"),
    other => panic!("expected HookFailure, got {:?}", other),
  }
  assert!(vm.log.is_empty());
  assert_eq!(vm.saves, 0);
}

#[test]
fn around_hook_wraps_each_executed_transition() {
  setup_tracing();
  let engine = uninstall_engine();
  engine.register_around_hook(|rule, vm, continuation| {
    vm.log.push(format!("around:{}", rule.action));
    continuation.call(vm)
  });
  let mut vm = VirtualMachine::with_status("DEACTIVATED");

  engine.run("uninstall", &mut vm).unwrap();

  // Once per executed transition, not once per invocation.
  assert_eq!(
    vm.log,
    vec![
      "around:remove_disks",
      "remove_disks",
      "around:destroy_vm",
      "destroy_vm",
      "around:erase_data",
      "erase_data",
    ]
  );
}

#[test]
fn around_hook_failure_aborts_the_chain() {
  setup_tracing();
  let engine = uninstall_engine();
  engine.register_around_hook(|rule, vm, continuation| {
    if rule.action == "destroy_vm" {
      return Err(WorkstateError::ActionFailure {
        action: rule.action.clone(),
        source: anyhow::anyhow!("refused by audit wrapper"),
      });
    }
    continuation.call(vm)
  });
  let mut vm = VirtualMachine::with_status("DEACTIVATED");

  let err = engine.run("uninstall", &mut vm).unwrap_err();

  assert!(matches!(err, WorkstateError::ActionFailure { .. }));
  assert_eq!(vm.log, vec!["remove_disks"]);
  assert_eq!(vm.status, "DISKLESS");
}

#[test]
fn global_after_hooks_run_in_registration_order_after_the_local_after() {
  setup_tracing();
  let engine = engine_with_before_after();
  engine.register_global_after_hook(|vm| vm.log.push("global_one".to_string()));
  engine.register_global_after_hook(|vm| vm.log.push("global_two".to_string()));
  let mut vm = VirtualMachine::with_status("DEACTIVATED");

  engine.run("uninstall", &mut vm).unwrap();

  let tail: Vec<&str> = vm.log.iter().rev().take(3).rev().map(String::as_str).collect();
  assert_eq!(tail, vec!["notify_end", "global_one", "global_two"]);
}

#[test]
fn global_after_hooks_fire_for_every_process_on_the_engine() {
  setup_tracing();
  let engine = uninstall_engine();
  engine.define_process("report", |p| {
    p.transition("erase_data", "uninstalled", "reported");
  });
  engine.register_global_after_hook(|vm| vm.log.push("audited".to_string()));
  let mut vm = VirtualMachine::with_status("DEACTIVATED");

  engine.run("uninstall", &mut vm).unwrap();
  engine.run("report", &mut vm).unwrap();

  let count = vm.log.iter().filter(|entry| *entry == "audited").count();
  assert_eq!(count, 2);
}

#[test]
fn global_after_hooks_fire_even_on_zero_transition_runs() {
  setup_tracing();
  let engine: Workstate<VirtualMachine> = Workstate::new();
  engine.define_process("archive", |p| {
    p.transition("pack_up", "active", "archived");
  });
  engine.register_global_after_hook(|vm| vm.log.push("audited".to_string()));
  let mut vm = VirtualMachine::with_status("DORMANT");

  engine.run("archive", &mut vm).unwrap();

  assert_eq!(vm.log, vec!["audited"]);
}

#[test]
fn global_after_hooks_do_not_fire_on_precondition_failure() {
  setup_tracing();
  let engine = uninstall_engine();
  engine.register_global_after_hook(|vm| vm.log.push("audited".to_string()));
  let mut vm = VirtualMachine::with_status("ACTIVATED");

  engine.run("uninstall", &mut vm).unwrap_err();

  assert!(vm.log.is_empty());
}

#[test]
fn global_after_hook_registry_is_append_only() {
  setup_tracing();
  let engine = uninstall_engine();
  engine.register_global_after_hook(|vm| vm.log.push("first".to_string()));
  let mut vm = VirtualMachine::with_status("DEACTIVATED");
  engine.run("uninstall", &mut vm).unwrap();

  // Later registrations join the earlier ones; nothing is reset.
  engine.register_global_after_hook(|vm| vm.log.push("second".to_string()));
  let mut resumed = VirtualMachine::with_status("UNINSTALLED");
  engine.define_process("report", |p| {
    p.transition("erase_data", "uninstalled", "reported");
  });
  engine.run("report", &mut resumed).unwrap();

  assert_eq!(vm.log.iter().filter(|e| *e == "first").count(), 1);
  assert_eq!(
    resumed.log,
    vec!["erase_data".to_string(), "first".to_string(), "second".to_string()]
  );
}
