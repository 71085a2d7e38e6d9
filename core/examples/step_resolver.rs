// workstate/examples/step_resolver.rs
//
// Demonstrates supplying a process's actions and guards through an injected
// step resolver instead of explicit registration.

use workstate::{PlainStatus, StepBundle, StepLookup, Workstate};
use tracing::info;

// A plain domain type with no status of its own; `PlainStatus` adapts it.
#[derive(Debug, Default)]
struct Document {
  pages: u32,
}

type Draft = PlainStatus<Document>;

fn publish_steps() -> StepBundle<Draft> {
  StepBundle::new()
    .with_action("review", |draft: &mut Draft| {
      info!(pages = draft.inner().pages, "reviewing draft");
      Ok(())
    })
    .with_action("publish", |_draft: &mut Draft| {
      info!("publishing");
      Ok(())
    })
    .with_guard("has_content", |draft: &mut Draft| Ok(draft.inner().pages > 0))
}

fn main() -> Result<(), workstate::WorkstateError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  // The resolver is consulted once per define_process call, keyed by the
  // process name. Absence is an ordinary value; a present-but-incomplete
  // bundle source logs a warning and registration continues.
  let engine: Workstate<Draft> = Workstate::with_step_resolver(|process| match process {
    "publish" => StepLookup::Found(publish_steps()),
    "retract" => StepLookup::MissingGroup {
      module: "retract_steps".to_string(),
    },
    _ => StepLookup::Absent,
  });

  engine.define_process("publish", |p| {
    p.must_be("draft")
      .transition_if("review", "draft", "reviewed", "has_content")
      .transition("publish", "reviewed", "published");
  });

  // Warns about the missing group, but the definition still succeeds.
  engine.define_process("retract", |p| {
    p.transition("unpublish", "published", "retracted");
  });

  let mut draft = Draft::new(Document { pages: 12 }, "draft");
  let final_state = engine.run("publish", &mut draft)?;
  info!(%final_state, "done");

  Ok(())
}
