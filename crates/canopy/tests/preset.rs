mod support;

use std::time::Duration;

use canopy::builder::{fire_event, sequence, wait};
use canopy::{Controller, ControllerConfig, NodeId, Preset, Status};
use support::Journal;

fn patrol() -> Preset<Journal> {
    Preset::new(sequence(vec![
        wait(Duration::from_millis(300)),
        fire_event("arrived"),
    ]))
}

#[test]
fn preset_is_instantiated_lazily_on_first_tick() {
    let preset = patrol().shared();
    let mut controller = Controller::new(preset.clone(), ControllerConfig::default());
    assert!(controller.root().is_none());

    controller.start().unwrap();
    controller.step(&mut Journal::default()).unwrap();
    assert!(controller.root().is_some());
    assert!(controller.root().unwrap().is_active());

    // The template itself is never ticked.
    assert!(!preset.root().is_active());
}

#[test]
fn instances_of_one_preset_keep_independent_state() {
    let preset = patrol().shared();
    let mut first = Controller::new(preset.clone(), ControllerConfig::default());
    let mut second = Controller::new(preset.clone(), ControllerConfig::default());
    let mut first_agent = Journal::default();
    let mut second_agent = Journal::default();
    first.start().unwrap();
    second.start().unwrap();

    // Advance the first instance two ticks ahead before the second starts.
    assert_eq!(first.step(&mut first_agent).unwrap(), Status::Running);
    assert_eq!(first.step(&mut first_agent).unwrap(), Status::Running);

    assert_eq!(second.step(&mut second_agent).unwrap(), Status::Running);
    assert_eq!(first.step(&mut first_agent).unwrap(), Status::Success);
    assert!(second_agent.events.is_empty());

    assert_eq!(second.step(&mut second_agent).unwrap(), Status::Running);
    assert_eq!(second.step(&mut second_agent).unwrap(), Status::Success);

    assert_eq!(first_agent.events, vec!["arrived"]);
    assert_eq!(second_agent.events, vec!["arrived"]);
}

#[test]
fn preset_numbers_its_nodes() {
    let preset = patrol();
    assert_eq!(preset.node_count(), 3);

    let instance = preset.instantiate();
    let ids: Vec<NodeId> = instance.children().iter().map(|c| c.id()).collect();
    assert_eq!(ids, vec![NodeId(1), NodeId(2)]);
}

#[test]
fn preset_from_a_ticked_tree_starts_fresh() {
    let mut tree = sequence(vec![wait(Duration::from_millis(500))]);
    let mut journal = Journal::default();
    canopy::FixedStep::default().take(4).for_each(|ctx| {
        tree.tick(&ctx, &mut journal, &mut canopy::NullStatusSink);
    });
    assert!(tree.is_active());

    let preset = Preset::new(tree).shared();
    assert!(!preset.root().is_active());
    assert!(preset.root().children().iter().all(|c| !c.is_active()));

    let mut controller = Controller::new(preset, ControllerConfig::default());
    let outcome = controller.run(&mut Journal::default(), 20, |_, _| {}).unwrap();
    assert_eq!(outcome.status, Status::Success);
    assert_eq!(outcome.ticks, 5);
}
