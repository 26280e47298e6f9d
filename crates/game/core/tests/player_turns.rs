mod common;

use common::{BrokenOracle, OpenSky, ScriptedInterface, WALL, Walk, at, npc, open_grid, player};
use umbra_core::{
    ActionResolver, BaseType, DecisionError, Direction, EntityId, GameConfig, Idle, Item, ItemId,
    MemoryGridStore, MenuChoice, PlayerCommand, SimulationError, Simulation, StaticObject,
};

fn simulation_with_player() -> Simulation {
    let mut sim = Simulation::new(GameConfig::default(), open_grid(12, 8));
    sim.spawn(player(4, 4, 100)).unwrap();
    sim.focus(&OpenSky).unwrap();
    sim
}

#[test]
fn unrecognized_input_is_asked_again_without_cost() {
    let mut sim = simulation_with_player();
    let mut ui = ScriptedInterface::new([None, None, Some(PlayerCommand::Info)]);
    let mut idle = Idle::default();
    let mut store = MemoryGridStore::new();

    let report = sim
        .step(&mut ActionResolver::new(&mut ui, &mut idle), &OpenSky, &mut store)
        .unwrap();

    assert_eq!(report.resolved, vec![(EntityId::PLAYER, 0)]);
    assert!(ui.inputs.is_empty());
    assert_eq!(ui.messages, vec!["[4, 4]".to_string()]);
}

#[test]
fn movement_is_free_and_keeps_grid_in_sync() {
    let mut sim = simulation_with_player();
    let mut ui = ScriptedInterface::commands([PlayerCommand::Move(Direction::NorthEast)]);
    let mut idle = Idle::default();
    let mut store = MemoryGridStore::new();

    let report = sim
        .step(&mut ActionResolver::new(&mut ui, &mut idle), &OpenSky, &mut store)
        .unwrap();

    assert_eq!(report.resolved, vec![(EntityId::PLAYER, 0)]);
    let hero = sim.actor(EntityId::PLAYER).unwrap();
    assert_eq!(hero.position(), at(5, 3));
    assert_eq!(hero.energy, 100);
    assert_eq!(sim.grid().occupant(at(5, 3)), Some(EntityId::PLAYER));
    assert_eq!(sim.grid().occupant(at(4, 4)), None);
    assert_eq!(sim.mirror().glyph_at(5, 3), Some('@'));
    assert_eq!(sim.mirror().glyph_at(4, 4), Some('.'));
}

#[test]
fn blocked_move_still_ends_the_turn() {
    let mut grid = open_grid(12, 8);
    grid.set_terrain(at(4, 3), WALL).unwrap();
    let mut sim = Simulation::new(GameConfig::default(), grid);
    sim.spawn(player(4, 4, 100)).unwrap();
    let mut ui = ScriptedInterface::commands([PlayerCommand::Move(Direction::North)]);
    let mut idle = Idle::default();
    let mut store = MemoryGridStore::new();

    let report = sim
        .step(&mut ActionResolver::new(&mut ui, &mut idle), &OpenSky, &mut store)
        .unwrap();

    assert_eq!(report.resolved.len(), 1);
    assert_eq!(sim.actor(EntityId::PLAYER).unwrap().position(), at(4, 4));
}

#[test]
fn picking_up_a_single_item_costs_a_full_turn() {
    let mut grid = open_grid(12, 8);
    grid.drop_item(at(4, 4), Item::new(ItemId(1), "dagger", BaseType::Weapon))
        .unwrap();
    let mut sim = Simulation::new(GameConfig::default(), grid);
    sim.spawn(player(4, 4, 100)).unwrap();
    let mut ui = ScriptedInterface::commands([PlayerCommand::PickUp]);
    let mut idle = Idle::default();
    let mut store = MemoryGridStore::new();

    let report = sim
        .step(&mut ActionResolver::new(&mut ui, &mut idle), &OpenSky, &mut store)
        .unwrap();

    assert_eq!(report.resolved, vec![(EntityId::PLAYER, 100)]);
    let hero = sim.actor(EntityId::PLAYER).unwrap();
    assert_eq!(hero.inventory.len(), 1);
    assert_eq!(hero.energy, 0);
    assert!(sim.grid().items_at(at(4, 4)).is_empty());
    assert_eq!(ui.messages, vec!["Picked up dagger.".to_string()]);
}

#[test]
fn inventory_costs_a_full_turn_even_when_nothing_changes() {
    let mut sim = simulation_with_player();
    let mut ui = ScriptedInterface::commands([PlayerCommand::OpenInventory]);
    let mut idle = Idle::default();
    let mut store = MemoryGridStore::new();

    let report = sim
        .step(&mut ActionResolver::new(&mut ui, &mut idle), &OpenSky, &mut store)
        .unwrap();

    assert_eq!(report.resolved, vec![(EntityId::PLAYER, 100)]);
    assert_eq!(ui.inventory_opened, 1);
}

#[test]
fn ground_pile_is_described_after_each_command() {
    let mut grid = open_grid(12, 8);
    grid.drop_item(at(5, 4), Item::new(ItemId(1), "apple", BaseType::Consumable))
        .unwrap();
    grid.drop_item(at(5, 4), Item::new(ItemId(2), "ruby", BaseType::Gem))
        .unwrap();
    let mut sim = Simulation::new(GameConfig::default(), grid);
    sim.spawn(player(4, 4, 100)).unwrap();
    let mut ui = ScriptedInterface::commands([PlayerCommand::Move(Direction::East)]);
    let mut idle = Idle::default();
    let mut store = MemoryGridStore::new();

    sim.step(&mut ActionResolver::new(&mut ui, &mut idle), &OpenSky, &mut store)
        .unwrap();

    assert_eq!(
        ui.messages,
        vec!["You see 2 items here: apple, ruby.".to_string()]
    );
}

#[test]
fn debug_experience_is_free() {
    let mut sim = simulation_with_player();
    let mut ui = ScriptedInterface::commands([PlayerCommand::GainExperience]);
    let mut idle = Idle::default();
    let mut store = MemoryGridStore::new();

    let report = sim
        .step(&mut ActionResolver::new(&mut ui, &mut idle), &OpenSky, &mut store)
        .unwrap();

    assert_eq!(report.resolved, vec![(EntityId::PLAYER, 0)]);
    assert_eq!(sim.actor(EntityId::PLAYER).unwrap().experience, 15);
}

#[test]
fn quitting_from_the_menu_halts_the_run() {
    let mut sim = simulation_with_player();
    let mut ui = ScriptedInterface::commands([
        PlayerCommand::Cancel,
        PlayerCommand::Cancel,
    ]);
    let mut idle = Idle::default();
    let mut store = MemoryGridStore::new();

    let report = sim
        .step(&mut ActionResolver::new(&mut ui, &mut idle), &OpenSky, &mut store)
        .unwrap();
    assert_eq!(report.resolved, vec![(EntityId::PLAYER, 0)]);
    assert!(!report.halted);

    ui.menu = MenuChoice::Quit;
    let last = sim
        .run(&mut ActionResolver::new(&mut ui, &mut idle), &OpenSky, &mut store)
        .unwrap();
    assert_eq!(last.0, 2);
    assert!(sim.is_halted());
}

#[test]
fn save_point_persists_only_for_the_player() {
    let mut grid = open_grid(12, 8);
    grid.place_object(at(5, 4), StaticObject::named("savepoint", '&'))
        .unwrap();
    grid.place_object(at(2, 2), StaticObject::named("savepoint", '&'))
        .unwrap();
    let mut sim = Simulation::new(GameConfig::default(), grid);
    sim.spawn(player(4, 4, 100)).unwrap();
    sim.spawn(npc(1, 1, 2, 100)).unwrap();
    let mut ui = ScriptedInterface::commands([PlayerCommand::Move(Direction::East)]);
    let mut walk = Walk {
        direction: Direction::East,
        cost: 100,
    };
    let mut store = MemoryGridStore::new();

    sim.step(&mut ActionResolver::new(&mut ui, &mut walk), &OpenSky, &mut store)
        .unwrap();

    assert_eq!(sim.actor(EntityId(1)).unwrap().position(), at(2, 2));
    assert_eq!(store.save_count(), 1);
    let saved = store.saved().unwrap();
    assert_eq!(saved.occupant(at(5, 4)), Some(EntityId::PLAYER));
}

#[test]
fn closed_input_is_fatal() {
    let mut sim = simulation_with_player();
    let mut ui = ScriptedInterface::default();
    let mut idle = Idle::default();
    let mut store = MemoryGridStore::new();

    let err = sim
        .step(&mut ActionResolver::new(&mut ui, &mut idle), &OpenSky, &mut store)
        .unwrap_err();
    assert!(matches!(err, SimulationError::Input(_)));
}

#[test]
fn negative_decision_cost_is_fatal() {
    let mut sim = Simulation::new(GameConfig::default(), open_grid(12, 8));
    sim.spawn(npc(1, 1, 1, 100)).unwrap();
    let mut ui = ScriptedInterface::default();
    let mut idle = Idle { cost: -5 };
    let mut store = MemoryGridStore::new();

    let err = sim
        .step(&mut ActionResolver::new(&mut ui, &mut idle), &OpenSky, &mut store)
        .unwrap_err();
    assert!(matches!(
        err,
        SimulationError::Decision(DecisionError::NegativeCost { cost: -5, .. })
    ));
}

#[test]
fn oracle_fault_during_refresh_is_fatal() {
    let mut sim = Simulation::new(GameConfig::default(), open_grid(12, 8));
    sim.spawn(player(4, 4, 100)).unwrap();
    assert!(sim.focus(&BrokenOracle).is_err());

    let mut ui = ScriptedInterface::commands([PlayerCommand::Move(Direction::West)]);
    let mut idle = Idle::default();
    let mut store = MemoryGridStore::new();
    let err = sim
        .step(&mut ActionResolver::new(&mut ui, &mut idle), &BrokenOracle, &mut store)
        .unwrap_err();
    assert!(matches!(err, SimulationError::Oracle(_)));
}
