use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use skill_core::{
    CostCurve, DowngradePolicy, GraphDefinition, NodeError, NodeKey, NodeState, Progression, SaveData,
    SessionError, SkillConfig, SkillDefinition, SkillEvent, SkillTiming, SkillTree, SlotIndex,
    StatDefinition, StatRegistry, UseError,
};

fn chain_definition() -> GraphDefinition {
    GraphDefinition::new("chain", 3, 1)
        .with_node(SkillDefinition::new("a", SlotIndex(0), 3))
        .with_node(SkillDefinition::new("b", SlotIndex(1), 3).requires("a"))
        .with_node(SkillDefinition::new("c", SlotIndex(2), 3).requires("b"))
}

fn recorder(tree: &mut SkillTree) -> Rc<RefCell<Vec<SkillEvent>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    tree.subscribe(move |event| sink.borrow_mut().push(event.clone()));
    log
}

/// A→B→C prerequisite chain with exactly enough points for one level each.
#[test]
fn linear_chain_unlocks_in_order() {
    let mut tree = SkillTree::init(chain_definition(), SkillConfig::new(), Progression::new(1, 3))
        .expect("chain graph is valid");

    assert!(matches!(
        tree.upgrade("c"),
        Err(NodeError::PrerequisiteNotMet { .. })
    ));
    assert_eq!(tree.unspent_points(), 3);

    tree.upgrade("a").expect("a has no prerequisites");
    tree.upgrade("b").expect("a is obtained");
    tree.upgrade("c").expect("b is obtained");

    assert_eq!(tree.unspent_points(), 0);
    for key in ["a", "b", "c"] {
        assert_eq!(tree.node_state(key), Some(NodeState::Obtained));
    }
    assert!(matches!(
        tree.upgrade("a"),
        Err(NodeError::InsufficientPoints {
            required: 1,
            available: 0,
            ..
        })
    ));
}

/// Upgrades publish level, state and point changes for every affected node.
#[test]
fn upgrade_reports_unlocked_dependents() {
    let mut tree = SkillTree::init(chain_definition(), SkillConfig::new(), Progression::new(1, 3))
        .expect("chain graph is valid");
    let log = recorder(&mut tree);

    tree.upgrade("a").expect("a has no prerequisites");

    assert_eq!(
        *log.borrow(),
        vec![
            SkillEvent::NodeLevelChanged {
                key: "a".into(),
                previous: 0,
                current: 1
            },
            SkillEvent::NodeStateChanged {
                key: "a".into(),
                previous: NodeState::Unlocked,
                current: NodeState::Obtained
            },
            SkillEvent::NodeStateChanged {
                key: "b".into(),
                previous: NodeState::Locked,
                current: NodeState::Unlocked
            },
            SkillEvent::PointsChanged {
                previous: 3,
                current: 2
            },
        ]
    );
}

/// Level bounds hold through every operation, and state tracks level.
#[test]
fn levels_stay_within_bounds() {
    let mut tree = SkillTree::init(
        chain_definition(),
        SkillConfig::with_downgrades(DowngradePolicy::Block),
        Progression::new(1, 10),
    )
    .expect("chain graph is valid");

    for _ in 0..3 {
        tree.upgrade("a").expect("points available");
    }
    assert_eq!(tree.node_state("a"), Some(NodeState::Maxed));
    assert_eq!(
        tree.upgrade("a"),
        Err(NodeError::MaxLevelReached {
            key: "a".into(),
            max_level: 3
        })
    );
    assert_eq!(tree.level_of("a"), Some(3));

    for _ in 0..3 {
        tree.downgrade("a").expect("no dependents obtained");
    }
    assert!(matches!(
        tree.downgrade("a"),
        Err(NodeError::NotObtained { .. })
    ));
    assert_eq!(tree.level_of("a"), Some(0));
    assert_eq!(tree.node_state("a"), Some(NodeState::Unlocked));
    assert_eq!(tree.unspent_points(), 10);
}

// ================================================================
// Sessions
// ================================================================

/// Snapshot at level 2 with 5 points; the upgrade to 3 costs 2; revert restores.
#[test]
fn revert_restores_snapshot_exactly() {
    let definition = GraphDefinition::new("solo", 1, 1).with_node(
        SkillDefinition::new("a", SlotIndex(0), 5).with_cost(CostCurve::Table(vec![1, 1, 2])),
    );
    let mut tree = SkillTree::init(definition, SkillConfig::new(), Progression::new(1, 7))
        .expect("solo graph is valid");
    tree.upgrade("a").expect("level 1");
    tree.upgrade("a").expect("level 2");
    assert_eq!(tree.unspent_points(), 5);

    tree.begin_session().expect("no session active");
    assert_eq!(
        tree.begin_session(),
        Err(SessionError::SessionAlreadyActive("solo".into()))
    );

    tree.upgrade("a").expect("level 3 costs 2");
    assert_eq!(tree.level_of("a"), Some(3));
    assert_eq!(tree.unspent_points(), 3);

    let log = recorder(&mut tree);
    assert_eq!(tree.revert(), Ok(true));

    assert_eq!(tree.level_of("a"), Some(2));
    assert_eq!(tree.unspent_points(), 5);
    assert_eq!(
        *log.borrow(),
        vec![SkillEvent::GraphReloaded {
            graph_id: "solo".into()
        }]
    );
}

/// Apply commits; a later revert has nothing to restore.
#[test]
fn apply_makes_revert_a_noop() {
    let mut tree = SkillTree::init(chain_definition(), SkillConfig::new(), Progression::new(1, 3))
        .expect("chain graph is valid");

    tree.begin_session().expect("no session active");
    tree.upgrade("a").expect("a has no prerequisites");
    tree.upgrade("b").expect("a is obtained");
    assert!(tree.apply());

    assert_eq!(tree.revert(), Ok(false));
    assert_eq!(tree.level_of("a"), Some(1));
    assert_eq!(tree.level_of("b"), Some(1));
    assert_eq!(tree.unspent_points(), 1);

    tree.begin_session().expect("previous session applied");
}

// ================================================================
// Downgrade policy
// ================================================================

#[test]
fn block_policy_keeps_dependents() {
    let mut tree = SkillTree::init(
        chain_definition(),
        SkillConfig::with_downgrades(DowngradePolicy::Block),
        Progression::new(1, 3),
    )
    .expect("chain graph is valid");
    tree.upgrade("a").expect("a");
    tree.upgrade("b").expect("b");

    assert!(matches!(
        tree.downgrade("a"),
        Err(NodeError::DependentsObtained { .. })
    ));
    assert!(matches!(
        tree.deplete("a", false),
        Err(NodeError::DependentsObtained { .. })
    ));
    assert_eq!(tree.level_of("a"), Some(1));

    tree.deplete("a", true).expect("forced depletion cascades");
    assert_eq!(tree.level_of("b"), Some(0));
    assert_eq!(tree.unspent_points(), 3);
}

#[test]
fn cascade_policy_reports_every_depleted_node() {
    let mut tree = SkillTree::init(
        chain_definition(),
        SkillConfig::with_downgrades(DowngradePolicy::Cascade),
        Progression::new(1, 3),
    )
    .expect("chain graph is valid");
    tree.upgrade("a").expect("a");
    tree.upgrade("b").expect("b");
    tree.upgrade("c").expect("c");
    let log = recorder(&mut tree);

    assert_eq!(tree.downgrade("a"), Ok(0));

    let levels: Vec<_> = log
        .borrow()
        .iter()
        .filter_map(|event| match event {
            SkillEvent::NodeLevelChanged { key, current, .. } => {
                Some((key.to_string(), *current))
            }
            _ => None,
        })
        .collect();
    assert_eq!(
        levels,
        vec![
            ("a".to_string(), 0),
            ("b".to_string(), 0),
            ("c".to_string(), 0)
        ]
    );
    assert_eq!(tree.unspent_points(), 3);
}

#[test]
fn reset_refunds_everything() {
    let mut tree = SkillTree::init(chain_definition(), SkillConfig::new(), Progression::new(1, 6))
        .expect("chain graph is valid");
    tree.upgrade("a").expect("a");
    tree.upgrade("a").expect("a");
    tree.upgrade("b").expect("b");

    assert_eq!(tree.reset(), 3);
    assert_eq!(tree.unspent_points(), 6);
    assert_eq!(tree.graph().points_spent(), 0);
}

// ================================================================
// Execution
// ================================================================

/// 2 s cooldown used at t=0: rejected at t=1, accepted at t=2.
#[test]
fn cooldown_gates_reuse() {
    let definition = GraphDefinition::new("combat", 1, 1).with_node(
        SkillDefinition::new("slash", SlotIndex(0), 1).with_timing(SkillTiming {
            cooldown_ms: 2_000,
            ..SkillTiming::INSTANT
        }),
    );
    let mut tree = SkillTree::init(definition, SkillConfig::new(), Progression::new(1, 1))
        .expect("combat graph is valid");
    let mut stats = StatRegistry::new();
    tree.upgrade("slash").expect("slash");

    tree.try_use("slash", &mut stats).expect("ready at t=0");

    tree.tick(Duration::from_secs(1));
    assert_eq!(
        tree.try_use("slash", &mut stats),
        Err(UseError::OnCooldown {
            key: "slash".into(),
            remaining: Duration::from_secs(1)
        })
    );

    tree.tick(Duration::from_secs(1));
    assert_eq!(tree.cooldown_remaining("slash"), Duration::ZERO);
    tree.try_use("slash", &mut stats).expect("ready at t=2");
}

#[test]
fn use_requires_obtained_node() {
    let mut tree = SkillTree::init(chain_definition(), SkillConfig::new(), Progression::new(1, 3))
        .expect("chain graph is valid");
    let mut stats = StatRegistry::new();

    assert_eq!(
        tree.try_use("a", &mut stats),
        Err(UseError::PrerequisitesNotObtained("a".into()))
    );
    assert_eq!(
        tree.try_use("missing", &mut stats),
        Err(UseError::UnknownNode("missing".into()))
    );
}

/// Cancelling during windup refunds mana and never activates the effect.
#[test]
fn cancel_during_windup() {
    let definition = GraphDefinition::new("magic", 1, 1).with_node(
        SkillDefinition::new("fireball", SlotIndex(0), 1)
            .with_timing(SkillTiming {
                windup_ms: 800,
                effect_ms: 200,
                cooldown_ms: 3_000,
            })
            .with_resource_cost("mp", 15),
    );
    let mut tree = SkillTree::init(definition, SkillConfig::new(), Progression::new(1, 1))
        .expect("magic graph is valid");
    tree.upgrade("fireball").expect("fireball");

    let mut stats = StatRegistry::from_definitions([StatDefinition::new("Mana", "MP")
        .with_bounds(0, 100)
        .with_base(40)])
    .expect("valid stats");
    let mana = stats.resolve("mana").expect("mana defined");
    let log = recorder(&mut tree);

    let id = tree.try_use("fireball", &mut stats).expect("enough mana");
    assert_eq!(stats.current(mana), Ok(25));

    tree.tick(Duration::from_millis(400));
    tree.cancel(id, &mut stats).expect("still winding up");

    assert_eq!(stats.current(mana), Ok(40));
    assert_eq!(tree.cooldown_remaining("fireball"), Duration::ZERO);
    let log = log.borrow();
    assert!(log.contains(&SkillEvent::SkillCancelled {
        use_id: id,
        key: "fireball".into()
    }));
    assert!(!log
        .iter()
        .any(|event| matches!(event, SkillEvent::SkillActivated { .. })));
}

// ================================================================
// Persistence and progression
// ================================================================

#[test]
fn load_tolerates_drift() {
    let mut tree = SkillTree::init(chain_definition(), SkillConfig::new(), Progression::new(1, 3))
        .expect("chain graph is valid");
    let mut save = tree.save();
    save.levels.insert("a".into(), 7);
    save.levels.insert("retired".into(), 2);
    save.unspent_points = 4;

    let report = tree.load(&save).expect("same graph");

    assert_eq!(tree.level_of("a"), Some(3));
    assert_eq!(tree.unspent_points(), 4);
    assert_eq!(report.clamped, vec![NodeKey::from("a")]);
    assert_eq!(report.unknown_keys, vec![NodeKey::from("retired")]);

    let foreign = SaveData {
        graph_id: "other".into(),
        ..save
    };
    assert!(tree.load(&foreign).is_err());
}

#[test]
fn teardown_returns_final_progress() {
    let mut tree = SkillTree::init(chain_definition(), SkillConfig::new(), Progression::new(2, 3))
        .expect("chain graph is valid");
    tree.upgrade("a").expect("a");

    let save = tree.teardown();

    assert_eq!(save.graph_id.as_str(), "chain");
    assert_eq!(save.levels.get("a"), Some(&1));
    assert_eq!(save.unspent_points, 2);
    assert_eq!(save.player_level, 2);
}

#[test]
fn level_up_unlocks_player_level_gates() {
    let definition = GraphDefinition::new("gated", 1, 1)
        .with_node(SkillDefinition::new("ultimate", SlotIndex(0), 1).requires_player_level(2));
    let config = SkillConfig {
        points_per_level: 2,
        ..SkillConfig::new()
    };
    let mut tree = SkillTree::init(definition, config, Progression::new(1, 0))
        .expect("gated graph is valid");
    let log = recorder(&mut tree);

    let outcome = tree.gain_experience(100);

    assert_eq!(outcome.levels_gained, 1);
    assert_eq!(tree.node_state("ultimate"), Some(NodeState::Unlocked));
    assert_eq!(
        log.borrow().first(),
        Some(&SkillEvent::LevelUp {
            previous: 1,
            current: 2,
            points_awarded: 2
        })
    );
    tree.upgrade("ultimate").expect("level 2 reached");
}

/// Points from a level-up during an open session are kept when it is reverted.
#[test]
fn level_up_during_session_survives_revert() {
    let config = SkillConfig {
        points_per_level: 2,
        ..SkillConfig::new()
    };
    let mut tree = SkillTree::init(chain_definition(), config, Progression::new(1, 1))
        .expect("chain graph is valid");

    tree.begin_session().expect("no session yet");
    tree.upgrade("a").expect("a has no prerequisites");
    let outcome = tree.gain_experience(100);
    assert_eq!(outcome.points_awarded, 2);
    assert_eq!(tree.unspent_points(), 2);

    assert_eq!(tree.revert(), Ok(true));

    assert_eq!(tree.progression().player_level, 2);
    assert_eq!(tree.level_of("a"), Some(0));
    assert_eq!(tree.unspent_points(), 3);
}
